//! The world accessor seam - everything the engine needs from the hosting
//! voxel world, kept behind a trait so hosts (and tests) plug their own
//! storage in. The engine never reaches for world state any other way.

use bevy::reflect::Reflect;
use serde::{Deserialize, Serialize};

use crate::{block::BlockState, coordinates::BlockCoordinate};

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize, Reflect)]
/// An opaque handle to one world (dimension) the host manages.
pub struct WorldId(u64);

impl WorldId {
    /// Wraps a host-assigned world id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Extra state attached to a single cell (container inventories, power
/// buffers, ...). The payload is the host's business; the engine only ever
/// rewrites `world` and `pos` when it relocates the cell.
pub struct BlockData {
    /// The world the data's cell is in.
    pub world: WorldId,
    /// The cell the data is attached to.
    pub pos: BlockCoordinate,
    /// Host-serialized contents. Never inspected by the engine.
    pub payload: Vec<u8>,
}

/// Read/write access to cells and their attached data, across worlds.
///
/// Implementations are expected to be plain storage: no callbacks into craft
/// logic, no reentrancy. `set_block_state` takes a `notify_neighbors` flag
/// because bulk craft moves deliberately skip neighbor updates the way the
/// host's normal block placement would trigger them.
pub trait BlockWorld {
    /// The state of the cell at `pos`, air if nothing is there.
    fn block_state(&self, world: WorldId, pos: BlockCoordinate) -> BlockState;

    /// Overwrites the cell at `pos`.
    fn set_block_state(&mut self, world: WorldId, pos: BlockCoordinate, state: BlockState, notify_neighbors: bool);

    /// The data attached at `pos`, if any.
    fn block_data(&self, world: WorldId, pos: BlockCoordinate) -> Option<&BlockData>;

    /// Removes and returns the data attached at `pos`.
    fn detach_block_data(&mut self, world: WorldId, pos: BlockCoordinate) -> Option<BlockData>;

    /// Attaches `data` at `pos`, replacing whatever was attached there.
    fn attach_block_data(&mut self, world: WorldId, pos: BlockCoordinate, data: BlockData);
}
