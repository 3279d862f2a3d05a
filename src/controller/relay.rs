//! Controller domain: the mid-clip event relay.
//!
//! Clip tracks invoke semantically named callbacks; the relay applies
//! the debounce contract and republishes them as outward notifications.
//! Hit frames fire at most once per action occupancy, whatever the
//! track does. Footsteps always pass through. Attack-window open/close
//! is idempotent, so a malformed or interrupted clip cannot wedge the
//! window. Stray events with no active action are harmless.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::config::ClipEventKind;

use super::components::AnimationController;
use super::events::{
    AnimationMarker, AttackWindowClosed, AttackWindowOpened, ClipEvent, FootstepEvent,
    HitFrameEvent,
};

/// Outward notification produced by one relayed clip event, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutput {
    HitFrame { action: String },
    Footstep,
    WindowOpened,
    WindowClosed,
    Marker(String),
}

impl AnimationController {
    /// Apply the relay contract to one clip event. Returns the outward
    /// notification to publish, or `None` when the event was
    /// deduplicated or arrived with no action to attribute it to.
    pub fn relay_clip_event(&mut self, event: &ClipEventKind) -> Option<RelayOutput> {
        match event {
            ClipEventKind::HitFrame => {
                let action = self.active.as_ref()?.name.clone();
                if self.hit_frame_fired {
                    return None;
                }
                self.hit_frame_fired = true;
                Some(RelayOutput::HitFrame { action })
            }
            ClipEventKind::Footstep => Some(RelayOutput::Footstep),
            ClipEventKind::AttackWindowOpen => {
                self.active.as_ref()?;
                if self.attack_window_open {
                    return None;
                }
                self.attack_window_open = true;
                Some(RelayOutput::WindowOpened)
            }
            ClipEventKind::AttackWindowClose => {
                if !self.attack_window_open {
                    return None;
                }
                self.attack_window_open = false;
                Some(RelayOutput::WindowClosed)
            }
            ClipEventKind::Marker(name) => Some(RelayOutput::Marker(name.clone())),
        }
    }
}

/// Drains clip events and republishes the surviving notifications for
/// collaborators (weapon damage, audio, hit detection).
pub(crate) fn relay_clip_events(
    mut clip_events: MessageReader<ClipEvent>,
    mut query: Query<&mut AnimationController>,
    mut hit_frames: MessageWriter<HitFrameEvent>,
    mut footsteps: MessageWriter<FootstepEvent>,
    mut opened: MessageWriter<AttackWindowOpened>,
    mut closed: MessageWriter<AttackWindowClosed>,
    mut markers: MessageWriter<AnimationMarker>,
) {
    for message in clip_events.read() {
        let Ok(mut controller) = query.get_mut(message.entity) else {
            continue;
        };
        let entity = message.entity;
        match controller.relay_clip_event(&message.event) {
            Some(RelayOutput::HitFrame { action }) => {
                hit_frames.write(HitFrameEvent { entity, action });
            }
            Some(RelayOutput::Footstep) => {
                footsteps.write(FootstepEvent { entity });
            }
            Some(RelayOutput::WindowOpened) => {
                opened.write(AttackWindowOpened { entity });
            }
            Some(RelayOutput::WindowClosed) => {
                closed.write(AttackWindowClosed { entity });
            }
            Some(RelayOutput::Marker(name)) => {
                markers.write(AnimationMarker { entity, name });
            }
            None => {}
        }
    }
}
