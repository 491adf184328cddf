//! Exports the most commonly used types.

pub use crate::{
    block::{AIR_BLOCK_ID, BlockId, BlockState},
    chat::ChatSender,
    coordinates::{BlockCoordinate, ChunkCoordinate, CoordinateType, RelativeCoordinate},
    craft::{
        Craft,
        detection::{DetectionError, DetectionSummary},
        hull::{HullMap, RelativeColumn},
        movement::{MoveError, MoveOperation},
        multiblock::{MultiblockData, MultiblockIndex, MultiblockInstance, MultiblockRegistry},
        scheduler::{MoveQueue, QueuedMove},
    },
    entities::{EntityHost, EntityPlacement, RetainFlags},
    plugin::VoidframeCorePlugin,
    rotation::{CardinalDirection, CoordinateFrame, Rotation},
    settings::{CraftSettings, SettingsError},
    world::{BlockData, BlockWorld, WorldId},
};
