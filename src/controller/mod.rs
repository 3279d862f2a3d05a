//! Controller domain: the animation-action state machine.
//!
//! This module handles:
//! - Binding controllers to character capabilities (signals, speed)
//! - One-shot action requests over continuous locomotion
//! - Clip playback clocks and authored mid-clip event tracks
//! - The outward event relay (hit frames, footsteps, attack windows)

mod actions;
mod components;
mod events;
mod graph;
mod locomotion;
mod playback;
mod relay;
mod signals;
#[cfg(test)]
mod tests;

pub use actions::{CompletionOutcome, RequestOutcome};
pub use components::{
    ActiveAction, AnimationController, CharacterMotion, MovementSpeed, PlaybackScale, SignalSet,
};
pub use events::{
    ActionFinished, ActionRequest, AnimationCompleted, AnimationMarker, AttackWindowClosed,
    AttackWindowOpened, CharacterSignal, ClipEvent, FootstepEvent, HitFrameEvent,
};
pub use graph::{AnimationGraph, BlendTreeGraph, StateGraph, build_backend};
pub use playback::ClipClock;
pub use relay::RelayOutput;

use bevy::prelude::*;

use crate::controller::actions::{apply_completions, drive_actions};
use crate::controller::locomotion::drive_locomotion;
use crate::controller::playback::tick_playback;
use crate::controller::relay::relay_clip_events;
use crate::controller::signals::bind_controllers;

pub struct ControllerPlugin;

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlaybackScale>()
            .add_message::<CharacterSignal>()
            .add_message::<ActionRequest>()
            .add_message::<AnimationCompleted>()
            .add_message::<ClipEvent>()
            .add_message::<HitFrameEvent>()
            .add_message::<FootstepEvent>()
            .add_message::<AttackWindowOpened>()
            .add_message::<AttackWindowClosed>()
            .add_message::<AnimationMarker>()
            .add_message::<ActionFinished>()
            .add_systems(
                Update,
                (
                    bind_controllers,
                    drive_actions,
                    apply_completions,
                    drive_locomotion,
                    tick_playback,
                    relay_clip_events,
                )
                    .chain(),
            );
    }
}
