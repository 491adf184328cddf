//! The entity host seam - how the engine asks the hosting game to move
//! riders along with a craft.

use bevy::{math::DVec3, prelude::Entity};
use bitflags::bitflags;

use crate::world::WorldId;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Entity state the host should carry through a relocation instead of
    /// resetting, so riders don't notice the craft moved under them.
    pub struct RetainFlags: u8 {
        /// Keep open container/UI screens open.
        const OPEN_SCREENS = 1 << 0;
        /// Keep the on-ground flag rather than re-deriving it mid-teleport.
        const ON_GROUND = 1 << 1;
        /// Re-apply relative motion so existing momentum isn't arrested.
        const MOMENTUM = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Where an entity is (or should be put): world, sub-cell position and
/// view angles.
pub struct EntityPlacement {
    /// The world the entity is in.
    pub world: WorldId,
    /// Sub-cell-precision position.
    pub position: DVec3,
    /// Horizontal view angle, degrees.
    pub yaw: f32,
    /// Vertical view angle, degrees.
    pub pitch: f32,
}

/// Lookup and relocation of live entities, implemented by the host.
pub trait EntityHost {
    /// Where `entity` currently is, or `None` if the host no longer knows it.
    fn position(&self, entity: Entity) -> Option<EntityPlacement>;

    /// Moves `entity` to `placement`, retaining the state named by `retain`.
    fn relocate(&mut self, entity: Entity, placement: EntityPlacement, retain: RetainFlags);
}
