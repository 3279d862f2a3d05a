//! Controller domain: message definitions for the animation boundary.
//!
//! Inbound messages come from gameplay code (signals, direct requests)
//! and from clip playback (completions, event tracks). Outbound messages
//! are the notifications collaborators consume: weapon damage listens
//! for hit frames, audio for footsteps, hit detection for attack
//! windows.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::config::ClipEventKind;

/// A domain signal emitted by a character script ("started_attacking",
/// "took_damage", ...). The signal adapter maps it onto an action via
/// the character's profile.
#[derive(Debug)]
pub struct CharacterSignal {
    pub entity: Entity,
    pub signal: String,
}

impl Message for CharacterSignal {}

/// Direct request for a named action, bypassing the signal mapping.
/// Used by debug tooling and tests; gameplay code goes through signals.
#[derive(Debug)]
pub struct ActionRequest {
    pub entity: Entity,
    pub action: String,
}

impl Message for ActionRequest {}

/// Fired by clip playback when a non-looping clip reaches its end.
/// Tagged with the graph state so the controller can reject completions
/// that raced with a newer request.
#[derive(Debug)]
pub struct AnimationCompleted {
    pub entity: Entity,
    pub state: String,
}

impl Message for AnimationCompleted {}

/// A mid-clip event reaching the relay from the playing clip's track.
#[derive(Debug)]
pub struct ClipEvent {
    pub entity: Entity,
    pub event: ClipEventKind,
}

impl Message for ClipEvent {}

/// The single damage-application moment of an attack. At most one per
/// action occupancy, however many times the underlying track fires.
#[derive(Debug)]
pub struct HitFrameEvent {
    pub entity: Entity,
    /// Action that was active when the hit frame fired.
    pub action: String,
}

impl Message for HitFrameEvent {}

/// A footstep contact. Fires every time the track does; looped
/// locomotion clips produce several per loop.
#[derive(Debug)]
pub struct FootstepEvent {
    pub entity: Entity,
}

impl Message for FootstepEvent {}

/// The attack became active for external hit detection.
#[derive(Debug)]
pub struct AttackWindowOpened {
    pub entity: Entity,
}

impl Message for AttackWindowOpened {}

/// The attack stopped being active. Also fired by the controller's
/// state-exit path if a clip left its window open.
#[derive(Debug)]
pub struct AttackWindowClosed {
    pub entity: Entity,
}

impl Message for AttackWindowClosed {}

/// Generic named event channel for forward-compatible event types.
#[derive(Debug)]
pub struct AnimationMarker {
    pub entity: Entity,
    pub name: String,
}

impl Message for AnimationMarker {}

/// Fired when a non-terminal action completes and the controller hands
/// control back to locomotion.
#[derive(Debug)]
pub struct ActionFinished {
    pub entity: Entity,
    pub action: String,
}

impl Message for ActionFinished {}
