//! Animation-action state machine for the Erebus action roguelike.
//!
//! Lets any character archetype (player or enemy) drive its animation
//! graph from abstract gameplay signals without per-character code:
//! continuous speed-driven locomotion, interruptible one-shot actions
//! resolved through per-archetype profile data, and frame-correct
//! mid-clip notifications for weapon damage and audio.

pub mod config;
pub mod controller;
#[cfg(feature = "dev-tools")]
pub mod debug;

pub use config::{AnimationProfile, ClipEventKind, ClipManifest, ProfileRegistry};
pub use controller::{
    ActionFinished, ActionRequest, AnimationController, AttackWindowClosed, AttackWindowOpened,
    CharacterMotion, CharacterSignal, FootstepEvent, HitFrameEvent, MovementSpeed, PlaybackScale,
    SignalSet,
};

use bevy::prelude::*;

/// Everything the animation subsystem needs, in one plugin.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((config::ConfigPlugin, controller::ControllerPlugin));
        #[cfg(feature = "dev-tools")]
        app.add_plugins(debug::DebugPlugin);
    }
}
