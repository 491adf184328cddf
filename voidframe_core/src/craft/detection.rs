//! Craft detection - the bounded flood fill that discovers which blocks
//! belong to a craft, which chunks it touches, and which multiblocks it
//! carries.

use std::time::{Duration, Instant};

use bevy::{log::info, platform::collections::HashSet};
use thiserror::Error;

use crate::{
    chat::ChatSender,
    coordinates::ChunkCoordinate,
    craft::{Craft, hull::HullMap, multiblock::MultiblockRegistry},
    settings::CraftSettings,
    world::BlockWorld,
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Why detection refused to form a craft.
pub enum DetectionError {
    /// The flood fill hit the configured block cap. Every partial result is
    /// discarded; the craft ends up with no blocks at all rather than a
    /// truncated set.
    #[error("detection limit reached ({limit} blocks)")]
    LimitExceeded {
        /// The configured cap that was hit.
        limit: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a successful detection found.
pub struct DetectionSummary {
    /// Blocks now belonging to the craft.
    pub blocks: usize,
    /// Multiblocks adopted because their anchor is a detected block.
    pub multiblocks: usize,
    /// Chunk columns the craft touches.
    pub chunks: usize,
    /// Wall-clock time the fill took.
    pub elapsed: Duration,
}

impl Craft {
    /// Detects the craft's blocks by flood fill from its origin.
    ///
    /// Propagation runs over the 6 axis neighbors of every solid cell; air
    /// stops a branch. The seed itself is checked first - a seed sitting in
    /// air yields a successful, empty detection.
    ///
    /// Exceeding `settings.size_limit` aborts the whole fill: the craft is
    /// left with no blocks, the owner is told, and the caller may retry
    /// (e.g. after raising the limit).
    ///
    /// On success the craft's multiblock anchors are re-adopted from
    /// `registry`: every multiblock in a touched chunk whose anchor cell was
    /// itself detected is kept, stored by its relative anchor. The hull map
    /// is rebuilt from the new block set.
    pub fn detect(
        &mut self,
        world: &impl BlockWorld,
        registry: &impl MultiblockRegistry,
        chat: &mut impl ChatSender,
        settings: &CraftSettings,
    ) -> Result<DetectionSummary, DetectionError> {
        let start = Instant::now();

        let mut detected: HashSet<_> = HashSet::default();
        let mut chunks: HashSet<ChunkCoordinate> = HashSet::default();

        let mut checked: HashSet<_> = HashSet::default();
        checked.insert(self.origin);
        let mut next_blocks_to_check = vec![self.origin];

        while !next_blocks_to_check.is_empty() {
            for current in std::mem::take(&mut next_blocks_to_check) {
                if world.block_state(self.world, current).is_air() {
                    continue;
                }

                if detected.len() >= settings.size_limit {
                    self.blocks = HashSet::default();
                    self.multiblocks.clear();
                    self.hull = HullMap::default();
                    self.notify_owner(chat, &format!("Detection limit reached. ({} blocks)", settings.size_limit));
                    return Err(DetectionError::LimitExceeded {
                        limit: settings.size_limit,
                    });
                }

                detected.insert(current);
                chunks.insert(current.chunk());

                for neighbor in current.axis_neighbors() {
                    if checked.insert(neighbor) {
                        next_blocks_to_check.push(neighbor);
                    }
                }
            }
        }

        self.blocks = detected;
        if self.initial_block_count == 0 && !self.blocks.is_empty() {
            self.initial_block_count = self.blocks.len();
        }

        let frame = self.frame();
        self.multiblocks.clear();
        for chunk in &chunks {
            for mb in registry.query(self.world, *chunk) {
                if self.blocks.contains(&mb.origin) {
                    self.multiblocks.insert(frame.to_relative(mb.origin));
                }
            }
        }

        self.hull = HullMap::compute(frame, &self.blocks);

        let elapsed = start.elapsed();
        let summary = DetectionSummary {
            blocks: self.blocks.len(),
            multiblocks: self.multiblocks.len(),
            chunks: chunks.len(),
            elapsed,
        };

        info!("craft {} detected: {} blocks across {} chunks", self.id, summary.blocks, summary.chunks);

        self.notify_owner(chat, &format!("Craft detected! ({} blocks)", summary.blocks));
        let millis = elapsed.as_millis().max(1) as usize;
        self.notify_owner(
            chat,
            &format!(
                "Detected {} blocks in {millis}ms. ({} blocks/ms)",
                summary.blocks,
                summary.blocks / millis
            ),
        );
        self.notify_owner(chat, &format!("Detected {} multiblocks", summary.multiblocks));

        Ok(summary)
    }
}
