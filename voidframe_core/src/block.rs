//! The per-cell state the engine reads and writes through its world accessor.

use std::fmt::Display;

use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

use crate::rotation::{CardinalDirection, Rotation};

/// The numeric id of a registered block kind.
pub type BlockId = u16;

/// The id of air - the absence of a block.
pub const AIR_BLOCK_ID: BlockId = 0;

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize, Reflect)]
/// The contents of one cell: a block id plus, for directional blocks, the
/// facing baked into the placed state.
pub struct BlockState {
    /// The id of the block occupying the cell. [`AIR_BLOCK_ID`] means empty.
    pub id: BlockId,
    /// The horizontal facing of the placed block, for blocks that have one.
    pub facing: Option<CardinalDirection>,
}

impl BlockState {
    /// An empty cell.
    pub const AIR: BlockState = BlockState {
        id: AIR_BLOCK_ID,
        facing: None,
    };

    /// A facing-less state for the given block id.
    pub const fn new(id: BlockId) -> Self {
        Self { id, facing: None }
    }

    /// A directional state for the given block id.
    pub const fn with_facing(id: BlockId, facing: CardinalDirection) -> Self {
        Self { id, facing: Some(facing) }
    }

    /// Whether this cell is empty.
    #[inline(always)]
    pub const fn is_air(&self) -> bool {
        self.id == AIR_BLOCK_ID
    }

    /// This state with its facing (if any) spun by `rotation`.
    pub fn rotated(self, rotation: Rotation) -> Self {
        Self {
            id: self.id,
            facing: self.facing.map(|facing| facing.rotated(rotation)),
        }
    }
}

impl Display for BlockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_air() {
            return f.write_str("air");
        }

        match self.facing {
            Some(facing) => write!(f, "block {} facing {facing}", self.id),
            None => write!(f, "block {}", self.id),
        }
    }
}
