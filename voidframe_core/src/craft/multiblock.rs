//! Multiblocks - multi-cell machines anchored to a single cell of a craft
//! (or of the static world), tracked in a chunk-keyed registry so crafts can
//! find and relocate the ones they carry.

use bevy::platform::collections::HashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    coordinates::{BlockCoordinate, ChunkCoordinate},
    rotation::CardinalDirection,
    world::WorldId,
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Working state a multiblock carries with it when it moves.
pub enum MultiblockData {
    /// No state beyond existing.
    #[default]
    Empty,
    /// A machine holding banked power.
    Powered {
        /// Banked power, in the host's units.
        power: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One placed multiblock: where it is anchored and what it is.
pub struct MultiblockInstance {
    /// Stable identity, kept across relocations.
    pub id: Uuid,
    /// The anchor cell the whole machine hangs off.
    pub origin: BlockCoordinate,
    /// The world the anchor is in.
    pub world: WorldId,
    /// Which way the machine faces.
    pub facing: CardinalDirection,
    /// The registered kind, e.g. `"voidframe:thrust_chamber"`.
    pub kind: String,
    /// Carried working state.
    pub data: MultiblockData,
}

/// Chunk-scoped lookup of placed multiblocks.
///
/// Passed explicitly into detection and movement - the engine holds no
/// registry of its own.
pub trait MultiblockRegistry {
    /// Every multiblock anchored in the given chunk.
    fn query(&self, world: WorldId, chunk: ChunkCoordinate) -> Vec<&MultiblockInstance>;

    /// The multiblock anchored exactly at `anchor`, if any.
    fn find_by_anchor(&self, world: WorldId, chunk: ChunkCoordinate, anchor: BlockCoordinate) -> Option<&MultiblockInstance>;

    /// Registers `instance` under the given chunk.
    fn add(&mut self, world: WorldId, chunk: ChunkCoordinate, instance: MultiblockInstance);

    /// Deregisters and returns the multiblock anchored at `anchor`.
    fn remove(&mut self, world: WorldId, chunk: ChunkCoordinate, anchor: BlockCoordinate) -> Option<MultiblockInstance>;
}

#[derive(Debug, Default)]
/// In-memory [`MultiblockRegistry`] keyed by (world, chunk).
pub struct MultiblockIndex {
    by_chunk: HashMap<(WorldId, ChunkCoordinate), Vec<MultiblockInstance>>,
}

impl MultiblockIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `instance` under the chunk its own anchor falls in.
    pub fn register(&mut self, instance: MultiblockInstance) {
        self.add(instance.world, instance.origin.chunk(), instance);
    }
}

impl MultiblockRegistry for MultiblockIndex {
    fn query(&self, world: WorldId, chunk: ChunkCoordinate) -> Vec<&MultiblockInstance> {
        self.by_chunk.get(&(world, chunk)).map(|list| list.iter().collect()).unwrap_or_default()
    }

    fn find_by_anchor(&self, world: WorldId, chunk: ChunkCoordinate, anchor: BlockCoordinate) -> Option<&MultiblockInstance> {
        self.by_chunk
            .get(&(world, chunk))
            .and_then(|list| list.iter().find(|mb| mb.origin == anchor))
    }

    fn add(&mut self, world: WorldId, chunk: ChunkCoordinate, instance: MultiblockInstance) {
        self.by_chunk.entry((world, chunk)).or_default().push(instance);
    }

    fn remove(&mut self, world: WorldId, chunk: ChunkCoordinate, anchor: BlockCoordinate) -> Option<MultiblockInstance> {
        let list = self.by_chunk.get_mut(&(world, chunk))?;
        let index = list.iter().position(|mb| mb.origin == anchor)?;
        Some(list.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(origin: BlockCoordinate, world: WorldId) -> MultiblockInstance {
        MultiblockInstance {
            id: Uuid::new_v4(),
            origin,
            world,
            facing: CardinalDirection::North,
            kind: "voidframe:test_rig".into(),
            data: MultiblockData::Powered { power: 7 },
        }
    }

    #[test]
    fn register_and_find_by_anchor() {
        let world = WorldId::new(0);
        let anchor = BlockCoordinate::new(20, 5, -3);
        let mut index = MultiblockIndex::new();
        index.register(instance(anchor, world));

        let found = index.find_by_anchor(world, anchor.chunk(), anchor).expect("registered");
        assert_eq!(found.origin, anchor);
        assert!(index.find_by_anchor(world, anchor.chunk(), BlockCoordinate::new(21, 5, -3)).is_none());
    }

    #[test]
    fn query_is_chunk_scoped() {
        let world = WorldId::new(0);
        let mut index = MultiblockIndex::new();
        index.register(instance(BlockCoordinate::new(0, 0, 0), world));
        index.register(instance(BlockCoordinate::new(3, 9, 3), world));
        index.register(instance(BlockCoordinate::new(40, 0, 0), world));

        assert_eq!(index.query(world, ChunkCoordinate::new(0, 0)).len(), 2);
        assert_eq!(index.query(world, ChunkCoordinate::new(2, 0)).len(), 1);
        assert!(index.query(world, ChunkCoordinate::new(1, 1)).is_empty());
        assert!(index.query(WorldId::new(9), ChunkCoordinate::new(0, 0)).is_empty());
    }

    #[test]
    fn remove_returns_the_instance() {
        let world = WorldId::new(0);
        let anchor = BlockCoordinate::new(-8, 1, 12);
        let mut index = MultiblockIndex::new();
        index.register(instance(anchor, world));

        let removed = index.remove(world, anchor.chunk(), anchor).expect("present");
        assert_eq!(removed.data, MultiblockData::Powered { power: 7 });
        assert!(index.remove(world, anchor.chunk(), anchor).is_none());
    }
}
