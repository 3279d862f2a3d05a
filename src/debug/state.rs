//! Debug domain: state and action definitions for debug tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Whether debug UI is visible
    pub ui_visible: bool,
    /// Whether to show the controller info overlay
    pub show_info: bool,
    /// Index into the focused profile's sorted action list
    pub selected_action: usize,
    /// Message to display temporarily in debug UI
    pub status_message: Option<(String, f32)>,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            ui_visible: false,
            show_info: false,
            selected_action: 0,
            status_message: None,
        }
    }
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}

/// Actions that can be triggered from debug UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    CycleAction,
    ForceAction,
    FireHitFrame,
    FireFootstep,
    CyclePlaybackScale,
    ToggleInfo,
    Close,
}
