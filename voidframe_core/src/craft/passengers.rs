//! Relocating the entities riding a craft.
//!
//! Blocks snap to the grid but riders occupy sub-cell positions, so a
//! rotation cannot simply pivot riders about the origin cell corner: a rider
//! standing centered on the origin block would orbit instead of spinning in
//! place. The pivot is therefore shifted half a cell along x and z, onto the
//! origin block's center.

use bevy::math::DVec3;

use crate::{
    craft::{Craft, movement::MoveOperation},
    entities::{EntityHost, EntityPlacement, RetainFlags},
    world::WorldId,
};

impl Craft {
    /// Moves every passenger consistently with `op`.
    ///
    /// Must run while the craft still holds its pre-move origin - the
    /// rotation pivot is derived from it. Riders the host no longer knows
    /// are skipped.
    pub(crate) fn move_passengers(&self, op: MoveOperation, target_world: WorldId, entities: &mut impl EntityHost) {
        for &passenger in &self.passengers {
            let Some(current) = entities.position(passenger) else {
                continue;
            };

            let position = match op {
                MoveOperation::Translate(offset) => {
                    current.position + DVec3::new(offset.x as f64, offset.y as f64, offset.z as f64)
                }
                MoveOperation::Rotate(rotation) => {
                    let pivot = DVec3::new(self.origin.x as f64 + 0.5, self.origin.y as f64, self.origin.z as f64 + 0.5);
                    rotation.rotate_point(current.position, pivot)
                }
            };

            let placement = EntityPlacement {
                world: target_world,
                position,
                yaw: current.yaw + op.rotation().as_degrees(),
                pitch: current.pitch,
            };

            entities.relocate(passenger, placement, RetainFlags::all());
        }
    }
}
