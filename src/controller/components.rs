//! Controller domain: runtime components and resources.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::AnimationProfile;

use super::graph::{AnimationGraph, build_backend};
use super::playback::ClipClock;

/// The action currently occupying the one-shot slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveAction {
    pub name: String,
    /// Graph state the action resolved to.
    pub state: String,
}

/// Which locomotion parameters the bound graph actually exposes.
/// Checked once when the controller attaches; writes to missing
/// parameters are dropped afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ParamPresence {
    pub blend: bool,
    pub to_running: bool,
    pub to_idle: bool,
}

/// Per-character animation controller.
///
/// Owns the graph backend exclusively and resolves "what animation
/// state should be playing right now" from abstract gameplay inputs:
/// sampled movement speed while in locomotion, and named action
/// requests for one-shot clips.
#[derive(Component)]
#[require(ClipClock)]
pub struct AnimationController {
    pub(crate) profile: Arc<AnimationProfile>,
    pub(crate) graph: Box<dyn AnimationGraph>,
    pub(crate) current_speed: f32,
    pub(crate) active: Option<ActiveAction>,
    pub(crate) hit_frame_fired: bool,
    pub(crate) attack_window_open: bool,
    /// Signals this character instance actually exposes, resolved to
    /// their mapped actions at bind time.
    pub(crate) bound_signals: HashMap<String, String>,
    pub(crate) params: ParamPresence,
    pub(crate) missing_param_warned: bool,
}

impl AnimationController {
    pub fn new(profile: Arc<AnimationProfile>) -> Self {
        let graph = build_backend(&profile);
        let params = ParamPresence {
            blend: graph.has_parameter(&profile.params.blend),
            to_running: graph.has_parameter(&profile.params.to_running),
            to_idle: graph.has_parameter(&profile.params.to_idle),
        };
        Self {
            profile,
            graph,
            current_speed: 0.0,
            active: None,
            hit_frame_fired: false,
            attack_window_open: false,
            bound_signals: HashMap::new(),
            params,
            missing_param_warned: false,
        }
    }

    /// Bind the profile's signal map against the signals this character
    /// exposes. Characters legitimately lack some signals (a
    /// non-attacking enemy never emits "started_attacking"); those
    /// entries are skipped, not errors.
    pub fn bind_signals(&mut self, available: &HashSet<String>) {
        self.bound_signals.clear();
        for (signal, action) in &self.profile.signal_actions {
            if available.contains(signal) {
                self.bound_signals.insert(signal.clone(), action.clone());
            } else {
                info!(
                    "Profile '{}': signal '{}' not exposed by this character, skipping",
                    self.profile.id, signal
                );
            }
        }
    }

    /// Action mapped to a bound signal, if the signal was bound.
    pub fn action_for_signal(&self, signal: &str) -> Option<&str> {
        self.bound_signals.get(signal).map(String::as_str)
    }

    /// Record the last sampled movement speed.
    pub fn sample_speed(&mut self, speed: f32) {
        self.current_speed = speed;
    }

    // Introspection for debug overlays and console commands.

    /// Resolved graph state currently playing.
    pub fn state_name(&self) -> &str {
        self.graph.current_state()
    }

    pub fn speed(&self) -> f32 {
        self.current_speed
    }

    pub fn action_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_action(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.name.as_str())
    }

    pub fn attack_window_open(&self) -> bool {
        self.attack_window_open
    }

    pub fn profile(&self) -> &AnimationProfile {
        &self.profile
    }

    pub fn graph(&self) -> &dyn AnimationGraph {
        self.graph.as_ref()
    }
}

/// Signals a character archetype can emit, declared at spawn. The
/// signal adapter binds the profile's signal map against this set.
#[derive(Component, Debug, Default)]
pub struct SignalSet(pub HashSet<String>);

impl SignalSet {
    pub fn new<I, S>(signals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(signals.into_iter().map(Into::into).collect())
    }
}

/// Dedicated horizontal-speed capability. Preferred over deriving speed
/// from a raw velocity when both are present.
#[derive(Component, Debug, Default)]
pub struct MovementSpeed(pub f32);

/// Raw planar velocity capability; speed is its magnitude.
#[derive(Component, Debug, Default)]
pub struct CharacterMotion {
    pub velocity: Vec2,
}

impl CharacterMotion {
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Global playback multiplier (bullet time, debug slow-motion).
/// Injected read-only into the playback clock.
#[derive(Resource, Debug)]
pub struct PlaybackScale(pub f32);

impl Default for PlaybackScale {
    fn default() -> Self {
        Self(1.0)
    }
}
