//! Crafts - sets of blocks that were detected as one contiguous unit and
//! move through the world together, carrying their cell data, multiblocks
//! and riders with them.

use bevy::{
    platform::collections::HashSet,
    prelude::{Component, Entity},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    chat::ChatSender,
    coordinates::{BlockCoordinate, RelativeCoordinate},
    craft::{
        hull::HullMap,
        multiblock::{MultiblockInstance, MultiblockRegistry},
    },
    rotation::{CardinalDirection, CoordinateFrame},
    world::WorldId,
};

pub mod detection;
pub mod hull;
pub mod movement;
pub mod multiblock;
pub mod passengers;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod fixtures;

#[derive(Component, Debug, Serialize, Deserialize)]
/// A rigid set of blocks detected from a seed point.
///
/// A freshly constructed craft owns no blocks; [`Craft::detect`] discovers
/// them from the origin. Movement replaces the block set wholesale and keeps
/// every derived piece (hull map, multiblock anchors) consistent with it.
///
/// Nothing coordinates *between* crafts: two crafts moved in the same tick
/// can still fight over the same cells. Hosts that care must sequence their
/// moves, e.g. through [`scheduler::MoveQueue`].
pub struct Craft {
    id: Uuid,
    /// The point detection starts from, and the craft rotates around.
    origin: BlockCoordinate,
    facing: CardinalDirection,
    world: WorldId,
    /// The player who created the craft, if any. Receives detection reports.
    #[serde(skip)]
    pub owner: Option<Entity>,
    /// Whoever is currently flying the craft. Preferred over the owner for
    /// operational reports.
    #[serde(skip)]
    pub pilot: Option<Entity>,
    blocks: HashSet<BlockCoordinate>,
    initial_block_count: usize,
    /// Entities riding the craft, relocated in lockstep with it.
    #[serde(skip)]
    pub passengers: HashSet<Entity>,
    multiblocks: HashSet<RelativeCoordinate>,
    #[serde(skip)]
    hull: HullMap,
}

impl Craft {
    /// Creates an undetected craft at `origin`.
    pub fn new(origin: BlockCoordinate, facing: CardinalDirection, world: WorldId, owner: Option<Entity>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            facing,
            world,
            owner,
            pilot: None,
            blocks: HashSet::default(),
            initial_block_count: 0,
            passengers: HashSet::default(),
            multiblocks: HashSet::default(),
            hull: HullMap::default(),
        }
    }

    /// Stable identity of this craft.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The craft's pivot and detection seed.
    pub fn origin(&self) -> BlockCoordinate {
        self.origin
    }

    /// The craft's current facing.
    pub fn facing(&self) -> CardinalDirection {
        self.facing
    }

    /// The world the craft currently sits in.
    pub fn world(&self) -> WorldId {
        self.world
    }

    /// The frame relative coordinates are expressed in.
    pub fn frame(&self) -> CoordinateFrame {
        CoordinateFrame::new(self.origin, self.facing)
    }

    /// The craft's detected blocks, as absolute positions.
    pub fn blocks(&self) -> &HashSet<BlockCoordinate> {
        &self.blocks
    }

    /// The number of currently detected blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The block count captured by the first successful detection.
    pub fn initial_block_count(&self) -> usize {
        self.initial_block_count
    }

    /// How much of the initially detected hull is still present, as a ratio.
    pub fn hull_integrity(&self) -> f64 {
        if self.initial_block_count == 0 {
            return 1.0;
        }

        self.block_count() as f64 / self.initial_block_count as f64
    }

    /// The relative anchors of every multiblock the craft carries.
    pub fn multiblocks(&self) -> &HashSet<RelativeCoordinate> {
        &self.multiblocks
    }

    /// Resolves a carried multiblock by its relative anchor.
    pub fn multiblock<'a>(
        &self,
        pos: RelativeCoordinate,
        registry: &'a impl MultiblockRegistry,
    ) -> Option<&'a MultiblockInstance> {
        let anchor = self.frame().to_absolute(pos);
        registry.find_by_anchor(self.world, anchor.chunk(), anchor)
    }

    /// Whether `pos` is considered to be inside this craft.
    ///
    /// True for every detected block, and also for positions whose relative
    /// column holds detected blocks both below and above them - so an
    /// enclosed air pocket counts as inside even though nothing was detected
    /// there. Use [`Craft::blocks`] for exact membership.
    pub fn contains(&self, pos: BlockCoordinate) -> bool {
        if self.blocks.contains(&pos) {
            return true;
        }

        self.hull.contains(self.frame().to_relative(pos))
    }

    /// The operator to address reports to: the pilot if someone is flying,
    /// otherwise the owner.
    pub fn operator(&self) -> Option<Entity> {
        self.pilot.or(self.owner)
    }

    pub(crate) fn notify_operator(&self, chat: &mut impl ChatSender, message: &str) {
        if let Some(operator) = self.operator() {
            chat.send_message(operator, message);
        }
    }

    pub(crate) fn notify_owner(&self, chat: &mut impl ChatSender, message: &str) {
        if let Some(owner) = self.owner {
            chat.send_message(owner, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::craft::fixtures::test_entities;

    #[test]
    fn fresh_craft_is_empty() {
        let craft = Craft::new(BlockCoordinate::new(0, 0, 0), CardinalDirection::North, WorldId::new(0), None);

        assert_eq!(craft.block_count(), 0);
        assert_eq!(craft.initial_block_count(), 0);
        assert_eq!(craft.hull_integrity(), 1.0);
        assert!(!craft.contains(BlockCoordinate::new(0, 0, 0)));
    }

    #[test]
    fn operator_prefers_the_pilot() {
        let entities = test_entities(2);
        let mut craft = Craft::new(
            BlockCoordinate::new(0, 0, 0),
            CardinalDirection::North,
            WorldId::new(0),
            Some(entities[0]),
        );

        assert_eq!(craft.operator(), Some(entities[0]));

        craft.pilot = Some(entities[1]);
        assert_eq!(craft.operator(), Some(entities[1]));
    }
}
