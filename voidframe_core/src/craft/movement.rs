//! Craft movement - translating and rotating a craft as one rigid unit.
//!
//! Both operations funnel into a single pipeline: compute every target
//! position (in parallel), validate the destination, then commit the block
//! writes, carry attached data, multiblocks and riders, and finally swap in
//! the new block set. Validation is the only phase that can refuse; once the
//! first block is written the move runs to completion, and anything odd
//! afterwards is reported rather than rolled back.

use bevy::{
    log::warn,
    platform::collections::{HashMap, HashSet},
};
use rayon::prelude::{ParallelIterator, ParallelSlice};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    block::BlockState,
    chat::ChatSender,
    coordinates::BlockCoordinate,
    craft::{Craft, hull::HullMap, multiblock::MultiblockRegistry},
    entities::EntityHost,
    rotation::Rotation,
    world::{BlockWorld, WorldId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// One rigid change applied to a whole craft.
pub enum MoveOperation {
    /// Shift every block by the given offset.
    Translate(BlockCoordinate),
    /// Spin every block about the craft origin.
    Rotate(Rotation),
}

impl MoveOperation {
    /// The rotation component of this operation.
    pub const fn rotation(self) -> Rotation {
        match self {
            Self::Translate(_) => Rotation::None,
            Self::Rotate(rotation) => rotation,
        }
    }

    /// Where `pos` ends up, with rotations pivoting about `pivot`.
    pub const fn apply_block(self, pos: BlockCoordinate, pivot: BlockCoordinate) -> BlockCoordinate {
        match self {
            Self::Translate(offset) => BlockCoordinate::new(pos.x + offset.x, pos.y + offset.y, pos.z + offset.z),
            Self::Rotate(rotation) => rotation.rotate_block(pos, pivot),
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Why a move refused to run. Always raised before anything was written.
pub enum MoveError {
    /// A target cell holds foreign, non-craft content. The whole move is
    /// abandoned with the world untouched.
    #[error("blocked by {blocking} at {at}")]
    Blocked {
        /// The coordinate that could not be claimed.
        at: BlockCoordinate,
        /// What was sitting there.
        blocking: BlockState,
    },
}

impl Craft {
    /// Translates the craft by `offset` blocks within its current world.
    pub fn translate(
        &mut self,
        offset: BlockCoordinate,
        world: &mut impl BlockWorld,
        registry: &mut impl MultiblockRegistry,
        entities: &mut impl EntityHost,
        chat: &mut impl ChatSender,
    ) -> Result<(), MoveError> {
        self.change(MoveOperation::Translate(offset), self.world, world, registry, entities, chat)
    }

    /// Translates the craft by `offset` blocks into `target_world`.
    ///
    /// When `target_world` differs from the craft's current world, collision
    /// validation is skipped entirely - there is no cheap consistent
    /// cross-world snapshot to validate against - and the craft overwrites
    /// whatever occupies its destination. Callers accept that risk.
    pub fn translate_into(
        &mut self,
        offset: BlockCoordinate,
        target_world: WorldId,
        world: &mut impl BlockWorld,
        registry: &mut impl MultiblockRegistry,
        entities: &mut impl EntityHost,
        chat: &mut impl ChatSender,
    ) -> Result<(), MoveError> {
        self.change(MoveOperation::Translate(offset), target_world, world, registry, entities, chat)
    }

    /// Rotates the craft and its contents about its origin.
    pub fn rotate(
        &mut self,
        rotation: Rotation,
        world: &mut impl BlockWorld,
        registry: &mut impl MultiblockRegistry,
        entities: &mut impl EntityHost,
        chat: &mut impl ChatSender,
    ) -> Result<(), MoveError> {
        self.change(MoveOperation::Rotate(rotation), self.world, world, registry, entities, chat)
    }

    /// Applies one queued [`MoveOperation`] within the craft's current world.
    pub fn apply(
        &mut self,
        operation: MoveOperation,
        world: &mut impl BlockWorld,
        registry: &mut impl MultiblockRegistry,
        entities: &mut impl EntityHost,
        chat: &mut impl ChatSender,
    ) -> Result<(), MoveError> {
        self.change(operation, self.world, world, registry, entities, chat)
    }

    fn change(
        &mut self,
        op: MoveOperation,
        target_world: WorldId,
        world: &mut impl BlockWorld,
        registry: &mut impl MultiblockRegistry,
        entities: &mut impl EntityHost,
        chat: &mut impl ChatSender,
    ) -> Result<(), MoveError> {
        if self.blocks.is_empty() {
            warn!("ignoring move of undetected craft {}", self.id);
            return Ok(());
        }

        let rotation = op.rotation();
        let pivot = self.origin;

        // Compute phase. Sections own disjoint slices of the snapshot and
        // produce private pair lists, merged once below - the merge is the
        // only synchronization point.
        let snapshot: Vec<BlockCoordinate> = self.blocks.iter().copied().collect();
        let section_size = snapshot.len() / 8 + 256;
        let sections: Vec<Vec<(BlockCoordinate, BlockCoordinate)>> = snapshot
            .par_chunks(section_size)
            .map(|section| section.iter().map(|&pos| (pos, op.apply_block(pos, pivot))).collect())
            .collect();

        let mut targets: HashMap<BlockCoordinate, BlockCoordinate> = HashMap::default();
        for section in sections {
            targets.extend(section);
        }

        // Validation phase. Also the moment to capture the pre-move state of
        // every cell about to be overwritten: once the writes start, a source
        // cell that doubles as someone else's destination no longer holds its
        // own block.
        let mut original: HashMap<BlockCoordinate, BlockState> = HashMap::default();
        if target_world == self.world {
            for &target in targets.values() {
                let state = world.block_state(target_world, target);

                if !state.is_air() && !self.blocks.contains(&target) {
                    self.notify_operator(chat, &format!("Blocked by {state} at {target}!"));
                    return Err(MoveError::Blocked {
                        at: target,
                        blocking: state,
                    });
                }

                original.insert(target, state);
            }
        }

        // Commit phase. Block data comes off every source cell before the
        // first write lands, so a chain of moves through the same cells can
        // never hand one cell's data to another craft block.
        let mut moved_data = Vec::new();
        for &current in targets.keys() {
            if let Some(data) = world.detach_block_data(self.world, current) {
                moved_data.push((current, data));
            }
        }

        let mut new_blocks: HashSet<BlockCoordinate> = HashSet::default();
        for (&current, &target) in &targets {
            let state = original
                .get(&current)
                .copied()
                .unwrap_or_else(|| world.block_state(self.world, current));

            world.set_block_state(target_world, target, state.rotated(rotation), false);
            new_blocks.insert(target);
        }

        for (current, mut data) in moved_data {
            let target = targets[&current];
            data.world = target_world;
            data.pos = target;
            world.attach_block_data(target_world, target, data);
        }

        // if this ever fires something upstream died; the writes above are
        // already in the world, so report instead of unwinding
        if new_blocks.len() != self.blocks.len() {
            warn!(
                "Lost {} blocks while moving craft {}! This is a bug!",
                self.blocks.len().saturating_sub(new_blocks.len()),
                self.id
            );
        }

        // Cleanup: clear whatever we vacated.
        if target_world == self.world {
            for &pos in self.blocks.iter().filter(|pos| !new_blocks.contains(*pos)) {
                world.set_block_state(self.world, pos, BlockState::AIR, false);
            }
        } else {
            for &pos in &self.blocks {
                world.set_block_state(self.world, pos, BlockState::AIR, false);
            }
        }

        // Multiblocks: resolve each tracked anchor in the old frame, drop the
        // ones that no longer exist (destroyed since detection), re-register
        // the rest at their new anchor.
        let old_frame = self.frame();
        let mut moving_anchors = Vec::new();
        self.multiblocks.retain(|&rel| {
            let anchor = old_frame.to_absolute(rel);
            if registry.find_by_anchor(self.world, anchor.chunk(), anchor).is_some() {
                moving_anchors.push(anchor);
                true
            } else {
                false
            }
        });

        for anchor in moving_anchors {
            let Some(mut mb) = registry.remove(self.world, anchor.chunk(), anchor) else {
                continue;
            };

            mb.origin = op.apply_block(anchor, pivot);
            mb.world = target_world;
            mb.facing = mb.facing.rotated(rotation);

            let chunk = mb.origin.chunk();
            registry.add(target_world, chunk, mb);
        }

        // Riders move against the old origin; the pivot correction in
        // move_passengers depends on it.
        self.move_passengers(op, target_world, entities);

        // Finalize: swap the block set wholesale and rebuild what derives
        // from it.
        self.blocks = new_blocks;
        self.origin = op.apply_block(self.origin, pivot);
        self.facing = self.facing.rotated(rotation);
        self.world = target_world;
        self.hull = HullMap::compute(self.frame(), &self.blocks);

        Ok(())
    }
}
