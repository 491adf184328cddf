//! Bevy plugin wiring for hosts that run the engine inside an ECS app.
//!
//! Entirely optional - every engine operation is a plain method call - but
//! hosts get the default resources and reflect registrations in one line.

use bevy::prelude::{App, Plugin};

use crate::{
    block::BlockState,
    coordinates::{BlockCoordinate, ChunkCoordinate, RelativeCoordinate},
    craft::scheduler::MoveQueue,
    rotation::{CardinalDirection, CoordinateFrame, Rotation},
    settings::CraftSettings,
    world::WorldId,
};

#[derive(Default)]
/// Registers the engine's value types and inserts default
/// [`CraftSettings`] and [`MoveQueue`] resources.
pub struct VoidframeCorePlugin;

impl Plugin for VoidframeCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CraftSettings>()
            .init_resource::<MoveQueue>()
            .register_type::<BlockCoordinate>()
            .register_type::<ChunkCoordinate>()
            .register_type::<RelativeCoordinate>()
            .register_type::<Rotation>()
            .register_type::<CardinalDirection>()
            .register_type::<CoordinateFrame>()
            .register_type::<BlockState>()
            .register_type::<WorldId>();
    }
}
