//! In-memory collaborator fakes shared by the craft tests.

use bevy::{
    ecs::world::World,
    platform::collections::HashMap,
    prelude::Entity,
};

use crate::{
    block::BlockState,
    chat::ChatSender,
    coordinates::BlockCoordinate,
    entities::{EntityHost, EntityPlacement, RetainFlags},
    world::{BlockData, BlockWorld, WorldId},
};

/// Mints `count` entity ids from a scratch ECS world.
pub(crate) fn test_entities(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

#[derive(Debug, Default)]
pub(crate) struct TestWorld {
    blocks: HashMap<(WorldId, BlockCoordinate), BlockState>,
    data: HashMap<(WorldId, BlockCoordinate), BlockData>,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, world: WorldId, pos: BlockCoordinate, state: BlockState) {
        if state.is_air() {
            self.blocks.remove(&(world, pos));
        } else {
            self.blocks.insert((world, pos), state);
        }
    }

    pub fn fill(&mut self, world: WorldId, positions: impl IntoIterator<Item = BlockCoordinate>, state: BlockState) {
        for pos in positions {
            self.set(world, pos, state);
        }
    }
}

impl BlockWorld for TestWorld {
    fn block_state(&self, world: WorldId, pos: BlockCoordinate) -> BlockState {
        self.blocks.get(&(world, pos)).copied().unwrap_or(BlockState::AIR)
    }

    fn set_block_state(&mut self, world: WorldId, pos: BlockCoordinate, state: BlockState, _notify_neighbors: bool) {
        self.set(world, pos, state);
    }

    fn block_data(&self, world: WorldId, pos: BlockCoordinate) -> Option<&BlockData> {
        self.data.get(&(world, pos))
    }

    fn detach_block_data(&mut self, world: WorldId, pos: BlockCoordinate) -> Option<BlockData> {
        self.data.remove(&(world, pos))
    }

    fn attach_block_data(&mut self, world: WorldId, pos: BlockCoordinate, data: BlockData) {
        self.data.insert((world, pos), data);
    }
}

#[derive(Debug, Default)]
pub(crate) struct ChatLog {
    messages: Vec<(Entity, String)>,
}

impl ChatLog {
    /// Every message sent to `recipient`, in order.
    pub fn sent_to(&self, recipient: Entity) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(move |(to, _)| *to == recipient)
            .map(|(_, message)| message.as_str())
    }
}

impl ChatSender for ChatLog {
    fn send_message(&mut self, recipient: Entity, message: &str) {
        self.messages.push((recipient, message.to_owned()));
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestEntityHost {
    placements: HashMap<Entity, EntityPlacement>,
    retained: HashMap<Entity, RetainFlags>,
}

impl TestEntityHost {
    pub fn place(&mut self, entity: Entity, placement: EntityPlacement) {
        self.placements.insert(entity, placement);
    }

    /// The retain flags passed with the most recent relocation of `entity`.
    pub fn last_retain(&self, entity: Entity) -> Option<RetainFlags> {
        self.retained.get(&entity).copied()
    }
}

impl EntityHost for TestEntityHost {
    fn position(&self, entity: Entity) -> Option<EntityPlacement> {
        self.placements.get(&entity).copied()
    }

    fn relocate(&mut self, entity: Entity, placement: EntityPlacement, retain: RetainFlags) {
        self.placements.insert(entity, placement);
        self.retained.insert(entity, retain);
    }
}
