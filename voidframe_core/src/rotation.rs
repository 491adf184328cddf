//! Quarter-turn rotations, the 4 cardinal facings a craft can hold, and the
//! frame math converting between absolute and craft-relative coordinates.
//!
//! Block rotation is pure integer arithmetic - applying any rotation four
//! times is the identity bit-for-bit, which the rigid-move round-trip
//! guarantees rely on. Floating-point rotation only exists for entities,
//! which occupy sub-cell positions.

use std::fmt::Display;

use bevy::{math::DVec3, reflect::Reflect};
use serde::{Deserialize, Serialize};

use crate::coordinates::{BlockCoordinate, CoordinateType, RelativeCoordinate};

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize, Reflect)]
/// A rotation about the vertical axis by a multiple of 90 degrees.
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// 90 degrees clockwise, viewed from above.
    Clockwise90,
    /// 180 degrees.
    Clockwise180,
    /// 90 degrees counterclockwise, viewed from above.
    Counterclockwise90,
}

impl Rotation {
    /// The number of clockwise quarter turns this rotation performs [0, 3].
    pub const fn quarter_turns(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 1,
            Self::Clockwise180 => 2,
            Self::Counterclockwise90 => 3,
        }
    }

    /// The rotation performing the given number of clockwise quarter turns.
    ///
    /// Accepts any integer; turns are taken modulo 4, so -1 is a
    /// counterclockwise quarter turn.
    pub const fn from_quarter_turns(turns: i64) -> Self {
        match turns.rem_euclid(4) {
            0 => Self::None,
            1 => Self::Clockwise90,
            2 => Self::Clockwise180,
            _ => Self::Counterclockwise90,
        }
    }

    /// The rotation that undoes this one.
    pub const fn inverse(self) -> Self {
        Self::from_quarter_turns(-self.quarter_turns())
    }

    /// The rotation equivalent to applying `self` and then `other`.
    pub const fn then(self, other: Rotation) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    /// The clockwise yaw adjustment this rotation applies, in degrees.
    pub const fn as_degrees(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Clockwise90 => 90.0,
            Self::Clockwise180 => 180.0,
            Self::Counterclockwise90 => 270.0,
        }
    }

    const fn rotate_deltas(self, dx: CoordinateType, dz: CoordinateType) -> (CoordinateType, CoordinateType) {
        match self {
            Self::None => (dx, dz),
            Self::Clockwise90 => (-dz, dx),
            Self::Clockwise180 => (-dx, -dz),
            Self::Counterclockwise90 => (dz, -dx),
        }
    }

    /// Rotates `pos` about `pivot`, preserving y. Exact - no trig involved.
    pub const fn rotate_block(self, pos: BlockCoordinate, pivot: BlockCoordinate) -> BlockCoordinate {
        let (dx, dz) = self.rotate_deltas(pos.x - pivot.x, pos.z - pivot.z);
        BlockCoordinate::new(pivot.x + dx, pos.y, pivot.z + dz)
    }

    /// Rotates a sub-cell-precision point about `pivot`, preserving y.
    pub fn rotate_point(self, point: DVec3, pivot: DVec3) -> DVec3 {
        let (dx, dz) = (point.x - pivot.x, point.z - pivot.z);
        let (dx, dz) = match self {
            Self::None => (dx, dz),
            Self::Clockwise90 => (-dz, dx),
            Self::Clockwise180 => (-dx, -dz),
            Self::Counterclockwise90 => (dz, -dx),
        };
        DVec3::new(pivot.x + dx, point.y, pivot.z + dz)
    }
}

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize, Reflect)]
/// One of the 4 horizontal facings a craft (or a directional block) can hold.
pub enum CardinalDirection {
    /// Negative z.
    #[default]
    North,
    /// Positive x.
    East,
    /// Positive z.
    South,
    /// Negative x.
    West,
}

/// Contains each cardinal direction, in clockwise order starting from north.
pub const ALL_CARDINAL_DIRECTIONS: [CardinalDirection; 4] = [
    CardinalDirection::North,
    CardinalDirection::East,
    CardinalDirection::South,
    CardinalDirection::West,
];

impl CardinalDirection {
    /// The unit (x, z) offset a step in this direction takes.
    pub const fn offset(self) -> (CoordinateType, CoordinateType) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// The rotation carrying north onto this direction.
    pub const fn rotation_from_north(self) -> Rotation {
        match self {
            Self::North => Rotation::None,
            Self::East => Rotation::Clockwise90,
            Self::South => Rotation::Clockwise180,
            Self::West => Rotation::Counterclockwise90,
        }
    }

    const fn from_quarter_turns(turns: i64) -> Self {
        match turns.rem_euclid(4) {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// This direction after applying `rotation`.
    pub const fn rotated(self, rotation: Rotation) -> Self {
        Self::from_quarter_turns(self.rotation_from_north().quarter_turns() + rotation.quarter_turns())
    }

    /// The opposite direction.
    pub const fn inverse(self) -> Self {
        self.rotated(Rotation::Clockwise180)
    }

    /// Returns the string representation of this direction.
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }
}

impl Display for CardinalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize, Reflect)]
/// A craft's frame: the origin it pivots about and the facing its relative
/// coordinates are expressed against.
///
/// `to_relative` and `to_absolute` are mutual inverses for every facing.
pub struct CoordinateFrame {
    /// The absolute position relative coordinates are measured from.
    pub origin: BlockCoordinate,
    /// The facing the relative z axis is aligned against. A craft facing
    /// north has identical relative and absolute axes.
    pub facing: CardinalDirection,
}

impl CoordinateFrame {
    /// Creates a frame from its origin and facing.
    pub const fn new(origin: BlockCoordinate, facing: CardinalDirection) -> Self {
        Self { origin, facing }
    }

    /// Expresses an absolute position in this frame.
    pub const fn to_relative(&self, pos: BlockCoordinate) -> RelativeCoordinate {
        let unspun = self.facing.rotation_from_north().inverse().rotate_block(pos, self.origin);
        RelativeCoordinate::new(
            unspun.x - self.origin.x,
            unspun.y - self.origin.y,
            unspun.z - self.origin.z,
        )
    }

    /// Resolves a relative position back to an absolute one.
    pub const fn to_absolute(&self, pos: RelativeCoordinate) -> BlockCoordinate {
        let shifted = BlockCoordinate::new(self.origin.x + pos.x, self.origin.y + pos.y, self.origin.z + pos.z);
        self.facing.rotation_from_north().rotate_block(shifted, self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_quarter_turns_are_identity() {
        let pivot = BlockCoordinate::new(7, 2, -3);
        let pos = BlockCoordinate::new(-11, 5, 40);

        let mut rotated = pos;
        for _ in 0..4 {
            rotated = Rotation::Clockwise90.rotate_block(rotated, pivot);
        }

        assert_eq!(rotated, pos);
    }

    #[test]
    fn clockwise_turn_carries_north_to_east() {
        let pivot = BlockCoordinate::new(0, 0, 0);
        let north_of_pivot = BlockCoordinate::new(0, 0, -1);

        assert_eq!(
            Rotation::Clockwise90.rotate_block(north_of_pivot, pivot),
            BlockCoordinate::new(1, 0, 0)
        );
    }

    #[test]
    fn rotation_inverse_undoes() {
        let pivot = BlockCoordinate::new(3, 0, 3);
        let pos = BlockCoordinate::new(9, 1, -2);

        for rotation in [
            Rotation::None,
            Rotation::Clockwise90,
            Rotation::Clockwise180,
            Rotation::Counterclockwise90,
        ] {
            assert_eq!(rotation.inverse().rotate_block(rotation.rotate_block(pos, pivot), pivot), pos);
            assert_eq!(rotation.then(rotation.inverse()), Rotation::None);
        }
    }

    #[test]
    fn cardinal_rotation() {
        assert_eq!(CardinalDirection::North.rotated(Rotation::Clockwise90), CardinalDirection::East);
        assert_eq!(CardinalDirection::West.rotated(Rotation::Clockwise90), CardinalDirection::North);
        assert_eq!(CardinalDirection::East.rotated(Rotation::Counterclockwise90), CardinalDirection::North);
        assert_eq!(CardinalDirection::South.inverse(), CardinalDirection::North);
    }

    #[test]
    fn frame_round_trips_for_every_facing() {
        let origin = BlockCoordinate::new(100, 64, -50);
        let pos = BlockCoordinate::new(103, 70, -49);

        for facing in ALL_CARDINAL_DIRECTIONS {
            let frame = CoordinateFrame::new(origin, facing);
            let rel = frame.to_relative(pos);
            assert_eq!(frame.to_absolute(rel), pos, "round trip failed facing {facing}");
        }
    }

    #[test]
    fn east_facing_frame_known_values() {
        // Facing east, the relative -z axis ("forward") points east in the world.
        let frame = CoordinateFrame::new(BlockCoordinate::new(10, 5, 10), CardinalDirection::East);

        assert_eq!(
            frame.to_absolute(RelativeCoordinate::new(0, 0, -2)),
            BlockCoordinate::new(12, 5, 10)
        );
        assert_eq!(
            frame.to_relative(BlockCoordinate::new(12, 5, 10)),
            RelativeCoordinate::new(0, 0, -2)
        );
    }

    #[test]
    fn rotate_point_uses_exact_quarter_turns() {
        let pivot = DVec3::new(0.5, 0.0, 0.5);
        let point = DVec3::new(0.5, 3.0, -1.5);

        let rotated = Rotation::Clockwise90.rotate_point(point, pivot);

        assert_eq!(rotated, DVec3::new(2.5, 3.0, 0.5));
    }
}
