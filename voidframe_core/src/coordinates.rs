//! The different coordinate spaces blocks live in.
//!
//! Absolute coordinates address cells of a world directly. Chunk coordinates
//! address the 16x16 column a cell falls in. Relative coordinates address a
//! cell within a craft's own frame and stay put while the craft moves.

use std::fmt::Display;

use bevy::reflect::Reflect;
use derive_more::{Add, Neg, Sub};
use serde::{Deserialize, Serialize};

/// The numeric type backing every coordinate axis.
pub type CoordinateType = i64;

const CHUNK_SHIFT: u32 = 4;

/// The number of blocks along the x/z axes of one chunk column.
pub const CHUNK_DIMENSIONS: CoordinateType = 1 << CHUNK_SHIFT;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect, Add, Sub, Neg)]
/// An absolute block position within a world.
///
/// Also doubles as a block-granularity offset, since offsets share the same
/// component ranges.
pub struct BlockCoordinate {
    /// The x component
    pub x: CoordinateType,
    /// The y component
    pub y: CoordinateType,
    /// The z component
    pub z: CoordinateType,
}

impl BlockCoordinate {
    /// Creates a block coordinate from its components.
    pub const fn new(x: CoordinateType, y: CoordinateType, z: CoordinateType) -> Self {
        Self { x, y, z }
    }

    /// The chunk column this block falls in.
    #[inline(always)]
    pub const fn chunk(&self) -> ChunkCoordinate {
        ChunkCoordinate::for_block_coordinate(*self)
    }

    /// The 6 axis-adjacent neighbors of this block.
    pub const fn axis_neighbors(&self) -> [BlockCoordinate; 6] {
        [
            Self::new(self.x + 1, self.y, self.z),
            Self::new(self.x - 1, self.y, self.z),
            Self::new(self.x, self.y + 1, self.z),
            Self::new(self.x, self.y - 1, self.z),
            Self::new(self.x, self.y, self.z + 1),
            Self::new(self.x, self.y, self.z - 1),
        ]
    }
}

impl From<(CoordinateType, CoordinateType, CoordinateType)> for BlockCoordinate {
    #[inline(always)]
    fn from((x, y, z): (CoordinateType, CoordinateType, CoordinateType)) -> Self {
        Self { x, y, z }
    }
}

impl Display for BlockCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
/// A chunk column of the world - the unit the multiblock registry is keyed by.
pub struct ChunkCoordinate {
    /// The x component, in chunks
    pub x: CoordinateType,
    /// The z component, in chunks
    pub z: CoordinateType,
}

impl ChunkCoordinate {
    /// Creates a chunk coordinate from its components.
    pub const fn new(x: CoordinateType, z: CoordinateType) -> Self {
        Self { x, z }
    }

    /// The chunk column the given block falls in.
    ///
    /// The arithmetic shift keeps negative blocks on the floor boundary, so
    /// (-1, y, -1) lands in chunk (-1, -1) rather than (0, 0).
    #[inline(always)]
    pub const fn for_block_coordinate(value: BlockCoordinate) -> Self {
        Self {
            x: value.x >> CHUNK_SHIFT,
            z: value.z >> CHUNK_SHIFT,
        }
    }
}

impl Display for ChunkCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect, Add, Sub, Neg)]
/// A block position expressed in a craft's own frame.
///
/// (0, 0, 0) is the craft's origin. Relative coordinates are unaffected by the
/// craft translating or rotating, which makes them the stable addressing
/// scheme for anything anchored to the craft (multiblocks, mount points).
pub struct RelativeCoordinate {
    /// The x component
    pub x: CoordinateType,
    /// The y component
    pub y: CoordinateType,
    /// The z component
    pub z: CoordinateType,
}

impl RelativeCoordinate {
    /// Creates a relative coordinate from its components.
    pub const fn new(x: CoordinateType, y: CoordinateType, z: CoordinateType) -> Self {
        Self { x, y, z }
    }
}

impl From<(CoordinateType, CoordinateType, CoordinateType)> for RelativeCoordinate {
    #[inline(always)]
    fn from((x, y, z): (CoordinateType, CoordinateType, CoordinateType)) -> Self {
        Self { x, y, z }
    }
}

impl Display for RelativeCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_of_positive_coords() {
        assert_eq!(BlockCoordinate::new(0, 10, 0).chunk(), ChunkCoordinate::new(0, 0));
        assert_eq!(BlockCoordinate::new(15, -3, 15).chunk(), ChunkCoordinate::new(0, 0));
        assert_eq!(BlockCoordinate::new(16, 0, 31).chunk(), ChunkCoordinate::new(1, 1));
    }

    #[test]
    fn chunk_of_negative_coords() {
        assert_eq!(BlockCoordinate::new(-1, 0, -1).chunk(), ChunkCoordinate::new(-1, -1));
        assert_eq!(BlockCoordinate::new(-16, 0, -17).chunk(), ChunkCoordinate::new(-1, -2));
    }

    #[test]
    fn axis_neighbors_are_the_six_adjacent_cells() {
        let neighbors = BlockCoordinate::new(2, -4, 7).axis_neighbors();

        for expected in [
            BlockCoordinate::new(3, -4, 7),
            BlockCoordinate::new(1, -4, 7),
            BlockCoordinate::new(2, -3, 7),
            BlockCoordinate::new(2, -5, 7),
            BlockCoordinate::new(2, -4, 8),
            BlockCoordinate::new(2, -4, 6),
        ] {
            assert!(neighbors.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn component_wise_ops() {
        let a = BlockCoordinate::new(1, 2, 3);
        let b = BlockCoordinate::new(-4, 0, 2);

        assert_eq!(a + b, BlockCoordinate::new(-3, 2, 5));
        assert_eq!(a - b, BlockCoordinate::new(5, 2, 1));
        assert_eq!(-a, BlockCoordinate::new(-1, -2, -3));
    }
}
