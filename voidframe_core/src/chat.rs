//! Player-facing message delivery. Reports (blocked moves, detection
//! summaries) go through this seam; nothing the engine does depends on
//! whether anyone is listening.

use bevy::prelude::Entity;

/// Delivers a plain-text message to a player entity.
pub trait ChatSender {
    /// Sends `message` to `recipient`.
    fn send_message(&mut self, recipient: Entity, message: &str);
}
