//! Controller domain: the clip playback clock.
//!
//! Follows the graph's current state through the clip manifest, emits
//! authored track events as they are crossed, and fires the completion
//! notification when a non-looping clip ends. Looping clips (locomotion)
//! wrap and replay their track each loop.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::config::{ClipDef, ClipEventKind, ClipManifest};

use super::components::{AnimationController, PlaybackScale};
use super::events::{AnimationCompleted, ClipEvent};

/// Per-character playback position within the current graph state's clip.
#[derive(Component, Debug, Default)]
pub struct ClipClock {
    /// Graph state this clock is tracking.
    pub state: String,
    pub elapsed: f32,
    /// Next unfired index into the clip's sorted event track.
    pub cursor: usize,
    /// Set once a non-looping clip has completed (or holds a terminal
    /// state); no further events or completions are emitted.
    pub finished: bool,
    /// Set when the state has no clip metadata, so the warning fires once.
    missing_warned: bool,
}

impl ClipClock {
    /// Re-arm for a newly entered graph state.
    pub fn arm(&mut self, state: &str) {
        self.state = state.to_string();
        self.elapsed = 0.0;
        self.cursor = 0;
        self.finished = false;
        self.missing_warned = false;
    }

    /// Park on the last frame of an absorbing (terminal) state.
    pub fn hold(&mut self) {
        self.finished = true;
    }

    /// Advance by scaled delta time against a clip, pushing crossed
    /// track events into `fired`. Returns true when the clip completed
    /// this tick.
    pub fn advance(&mut self, clip: &ClipDef, dt: f32, fired: &mut Vec<ClipEventKind>) -> bool {
        if self.finished {
            return false;
        }

        self.elapsed += dt;

        while self.cursor < clip.events.len() && clip.events[self.cursor].time <= self.elapsed {
            fired.push(clip.events[self.cursor].event.clone());
            self.cursor += 1;
        }

        if self.elapsed < clip.duration {
            return false;
        }

        if clip.looped {
            // Fire any tail events, then wrap and catch up to the
            // overshoot inside the new loop.
            while self.cursor < clip.events.len() {
                fired.push(clip.events[self.cursor].event.clone());
                self.cursor += 1;
            }
            self.elapsed -= clip.duration;
            self.cursor = 0;
            while self.cursor < clip.events.len() && clip.events[self.cursor].time <= self.elapsed {
                fired.push(clip.events[self.cursor].event.clone());
                self.cursor += 1;
            }
            false
        } else {
            self.finished = true;
            true
        }
    }
}

/// Ticks every clock, re-arming on graph state changes and emitting
/// clip events and completions. Delta time is scaled by the injected
/// playback multiplier.
pub(crate) fn tick_playback(
    time: Res<Time>,
    scale: Res<PlaybackScale>,
    manifest: Res<ClipManifest>,
    mut query: Query<(Entity, &AnimationController, &mut ClipClock)>,
    mut clip_events: MessageWriter<ClipEvent>,
    mut completions: MessageWriter<AnimationCompleted>,
) {
    let dt = time.delta_secs() * scale.0;
    let mut fired = Vec::new();

    for (entity, controller, mut clock) in &mut query {
        let state = controller.state_name();
        if clock.state != state {
            clock.arm(state);
        }

        let Some(clip) = manifest.get(&clock.state) else {
            if !clock.missing_warned {
                clock.missing_warned = true;
                warn!("No clip metadata for graph state '{}', playback idle", clock.state);
            }
            continue;
        };

        fired.clear();
        let completed = clock.advance(clip, dt, &mut fired);

        for event in fired.drain(..) {
            clip_events.write(ClipEvent {
                entity,
                event,
            });
        }
        if completed {
            completions.write(AnimationCompleted {
                entity,
                state: clock.state.clone(),
            });
        }
    }
}
