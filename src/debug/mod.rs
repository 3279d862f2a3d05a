//! Debug domain: creative-mode tooling for the animation subsystem.
//!
//! Features:
//! - Inspect the focused controller (state, action, speed, window)
//! - Force any mapped action through the public request contract
//! - Force-fire clip events into the relay
//! - Scale clip playback speed

mod state;
mod systems;
mod ui;

pub use state::{DebugAction, DebugState};
pub use ui::{DebugInfoOverlay, DebugUI};

use bevy::prelude::*;

use crate::debug::systems::{
    handle_debug_buttons, handle_debug_hotkeys, toggle_debug_ui, update_debug_info_overlay,
    update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    toggle_debug_ui,
                    handle_debug_hotkeys,
                    handle_debug_buttons,
                    update_status_message,
                )
                    .chain(),
            )
            .add_systems(Update, update_debug_info_overlay);
    }
}
