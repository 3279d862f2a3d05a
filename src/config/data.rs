//! Config domain: data definitions for animation profile RON files.
//!
//! These structs mirror the structure in assets/data/animation_profiles.ron
//! and are used for deserialization. The ProfileRegistry provides lookup
//! by id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Common wrapper for RON files with schema_version and items.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

/// Which underlying graph technology realizes a profile.
///
/// `StateMachine` is a discrete state-per-action graph driven by
/// transition conditions. `BlendTree` is a single locomotion blend tree
/// with one-shot nodes layered on top. Both sit behind the same
/// controller contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum GraphBackendKind {
    #[default]
    StateMachine,
    BlendTree,
}

/// Graph-parameter paths the locomotion driver writes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocomotionParams {
    /// Continuous-mode blend weight parameter.
    pub blend: String,
    /// Condition-mode "start moving" transition flag.
    pub to_running: String,
    /// Condition-mode "stop moving" transition flag.
    pub to_idle: String,
}

impl Default for LocomotionParams {
    fn default() -> Self {
        Self {
            blend: "parameters/locomotion/blend".to_string(),
            to_running: "conditions/to_running".to_string(),
            to_idle: "conditions/to_idle".to_string(),
        }
    }
}

/// Per-archetype animation profile (animation_profiles.ron).
///
/// Loaded once at startup and shared read-only across every instance of
/// the archetype. Action names are the open vocabulary gameplay code
/// requests; the profile maps them onto graph state names so the same
/// controller logic works across differently-authored graphs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimationProfile {
    pub id: String,
    /// Graph shape this archetype's animation asset was authored as.
    #[serde(default)]
    pub backend: GraphBackendKind,
    /// Path to the animation graph root inside the character scene.
    pub graph_root: String,
    /// Speed at or above which the character counts as moving
    /// (condition-mode locomotion).
    pub idle_to_move_speed: f32,
    /// Speed mapped to full run blend (continuous-mode locomotion).
    pub max_movement_speed: f32,
    /// Selects boolean-condition locomotion instead of continuous blend.
    #[serde(default)]
    pub condition_locomotion: bool,
    /// Graph state to return to when a non-terminal action finishes.
    pub locomotion_state: String,
    #[serde(default)]
    pub params: LocomotionParams,
    /// Abstract action name -> graph state name.
    pub action_states: HashMap<String, String>,
    /// Actions that never auto-return to locomotion (e.g. "death").
    #[serde(default)]
    pub terminal_actions: Vec<String>,
    /// Character signal name -> action name. Signals a given character
    /// doesn't expose are skipped at bind time.
    #[serde(default)]
    pub signal_actions: HashMap<String, String>,
}

impl AnimationProfile {
    /// Resolve an action name to its graph state, if mapped.
    pub fn state_for(&self, action: &str) -> Option<&str> {
        self.action_states.get(action).map(String::as_str)
    }

    /// Whether the action, once entered, absorbs the controller.
    pub fn is_terminal(&self, action: &str) -> bool {
        self.terminal_actions.iter().any(|a| a == action)
    }
}
