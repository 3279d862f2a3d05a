//! Controller domain: animation graph backends.
//!
//! The controller's contract (request a state, observe the current
//! state, drive locomotion parameters) is independent of how the
//! underlying animation asset is authored. Two backends realize it: a
//! discrete state machine with one state per action, and a single
//! locomotion blend tree with a one-shot slot layered on top. Profiles
//! select the backend matching their asset.

use std::collections::HashMap;

use crate::config::{AnimationProfile, GraphBackendKind};

/// The seam between the controller and the graph technology.
///
/// Parameter existence is checked once at bind time; writes to missing
/// parameters are dropped by the caller, never a crash.
pub trait AnimationGraph: Send + Sync {
    /// Whether the graph exposes a parameter at this path.
    fn has_parameter(&self, path: &str) -> bool;
    /// Write a continuous blend value. No-op for unknown paths.
    fn set_blend(&mut self, path: &str, value: f32);
    /// Write a boolean transition condition. No-op for unknown paths.
    fn set_condition(&mut self, path: &str, value: bool);
    /// Hard-cut to the named state, with no edge negotiation, so action
    /// latency stays deterministic.
    fn travel_to(&mut self, state: &str);
    /// The state the graph is currently in.
    fn current_state(&self) -> &str;
    /// Read back a blend parameter (introspection/presentation).
    fn blend(&self, path: &str) -> Option<f32>;
    /// Read back a condition parameter.
    fn condition(&self, path: &str) -> Option<bool>;
}

/// Discrete state-machine graph: one state per action plus the
/// locomotion state, with locomotion realized as condition-driven
/// transitions between idle and running inside the locomotion state.
pub struct StateGraph {
    current: String,
    conditions: HashMap<String, bool>,
}

impl StateGraph {
    pub fn new(profile: &AnimationProfile) -> Self {
        let mut conditions = HashMap::new();
        conditions.insert(profile.params.to_running.clone(), false);
        conditions.insert(profile.params.to_idle.clone(), true);
        Self {
            current: profile.locomotion_state.clone(),
            conditions,
        }
    }
}

impl AnimationGraph for StateGraph {
    fn has_parameter(&self, path: &str) -> bool {
        self.conditions.contains_key(path)
    }

    fn set_blend(&mut self, _path: &str, _value: f32) {
        // State-machine graphs carry no blend parameters.
    }

    fn set_condition(&mut self, path: &str, value: bool) {
        if let Some(slot) = self.conditions.get_mut(path) {
            *slot = value;
        }
    }

    fn travel_to(&mut self, state: &str) {
        self.current = state.to_string();
    }

    fn current_state(&self) -> &str {
        &self.current
    }

    fn blend(&self, _path: &str) -> Option<f32> {
        None
    }

    fn condition(&self, path: &str) -> Option<bool> {
        self.conditions.get(path).copied()
    }
}

/// Blend-tree graph: locomotion is a continuous idle/run crossfade, and
/// actions play through a one-shot slot that overrides it. While no
/// one-shot is active the graph reports the locomotion state.
pub struct BlendTreeGraph {
    locomotion_state: String,
    blend_param: String,
    blend: f32,
    one_shot: Option<String>,
}

impl BlendTreeGraph {
    pub fn new(profile: &AnimationProfile) -> Self {
        Self {
            locomotion_state: profile.locomotion_state.clone(),
            blend_param: profile.params.blend.clone(),
            blend: 0.0,
            one_shot: None,
        }
    }

    /// Weight of the idle clip in the locomotion crossfade.
    pub fn idle_weight(&self) -> f32 {
        1.0 - self.blend
    }

    /// Weight of the run clip in the locomotion crossfade.
    pub fn run_weight(&self) -> f32 {
        self.blend
    }
}

impl AnimationGraph for BlendTreeGraph {
    fn has_parameter(&self, path: &str) -> bool {
        path == self.blend_param
    }

    fn set_blend(&mut self, path: &str, value: f32) {
        if path == self.blend_param {
            self.blend = value.clamp(0.0, 1.0);
        }
    }

    fn set_condition(&mut self, _path: &str, _value: bool) {
        // Blend trees carry no transition conditions.
    }

    fn travel_to(&mut self, state: &str) {
        if state == self.locomotion_state {
            self.one_shot = None;
        } else {
            self.one_shot = Some(state.to_string());
        }
    }

    fn current_state(&self) -> &str {
        self.one_shot.as_deref().unwrap_or(&self.locomotion_state)
    }

    fn blend(&self, path: &str) -> Option<f32> {
        (path == self.blend_param).then_some(self.blend)
    }

    fn condition(&self, _path: &str) -> Option<bool> {
        None
    }
}

/// Build the backend a profile selects, starting in its locomotion state.
pub fn build_backend(profile: &AnimationProfile) -> Box<dyn AnimationGraph> {
    match profile.backend {
        GraphBackendKind::StateMachine => Box::new(StateGraph::new(profile)),
        GraphBackendKind::BlendTree => Box::new(BlendTreeGraph::new(profile)),
    }
}
