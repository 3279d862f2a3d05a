//! Config domain: validation for cross-references between profiles and clips.
//!
//! Validation failures are content bugs, not runtime faults: they are
//! logged at startup and the affected operations degrade to no-ops.

use super::clips::{ClipEventKind, ClipManifest};
use super::registry::ProfileRegistry;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub profile_id: String,
    pub field: &'static str,
    pub target_type: &'static str,
    pub missing_id: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Profile '{}' references missing {} '{}' in field '{}'",
            self.profile_id, self.target_type, self.missing_id, self.field
        )
    }
}

/// Helper macro for checking a reference exists.
macro_rules! check_ref {
    ($errors:expr, $exists:expr, $profile:expr, $field:expr, $target_type:expr, $ref_id:expr) => {
        if !$exists {
            $errors.push(ValidationError {
                profile_id: $profile.to_string(),
                field: $field,
                target_type: $target_type,
                missing_id: $ref_id.to_string(),
            });
        }
    };
}

/// Validate all cross-references between profiles and the clip manifest.
/// Returns a list of validation errors, empty if all references are valid.
pub fn validate_profiles(registry: &ProfileRegistry, clips: &ClipManifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (id, profile) in registry.iter() {
        // Terminal actions must be mapped actions
        for action in &profile.terminal_actions {
            check_ref!(
                errors,
                profile.action_states.contains_key(action),
                id,
                "terminal_actions",
                "Action",
                action
            );
        }

        // Signal targets must be mapped actions
        for (signal, action) in &profile.signal_actions {
            check_ref!(
                errors,
                profile.action_states.contains_key(action),
                id,
                "signal_actions",
                "Action",
                format!("{} (from signal '{}')", action, signal)
            );
        }

        // Every mapped graph state needs clip metadata, or its action
        // never completes
        if !clips.clips.is_empty() {
            check_ref!(
                errors,
                clips.contains(&profile.locomotion_state),
                id,
                "locomotion_state",
                "Clip",
                profile.locomotion_state
            );
            for (action, state) in &profile.action_states {
                check_ref!(
                    errors,
                    clips.contains(state),
                    id,
                    "action_states",
                    "Clip",
                    format!("{} (for action '{}')", state, action)
                );
            }
        }
    }

    errors
}

/// Check numeric profile fields for values the locomotion driver cannot
/// work with. The driver guards against them at runtime, but they are
/// always content bugs worth surfacing at load.
pub fn validate_profile_values(registry: &ProfileRegistry) -> Vec<String> {
    let mut warnings = Vec::new();

    for (id, profile) in registry.iter() {
        if profile.max_movement_speed <= 0.0 {
            warnings.push(format!(
                "Profile '{}' has non-positive max_movement_speed {}, continuous blend disabled",
                id, profile.max_movement_speed
            ));
        }
        if profile.idle_to_move_speed < 0.0 {
            warnings.push(format!(
                "Profile '{}' has negative idle_to_move_speed {}",
                id, profile.idle_to_move_speed
            ));
        }
    }

    warnings
}

/// Check authored event tracks for malformed attack windows: every open
/// must be balanced by a close before the clip ends. The relay survives
/// malformed tracks at runtime, but an unbalanced track almost always
/// means the authoring export is broken.
pub fn validate_clip_tracks(clips: &ClipManifest) -> Vec<String> {
    let mut warnings = Vec::new();

    for (state, clip) in &clips.clips {
        let mut open = false;
        for event in &clip.events {
            if event.time < 0.0 || event.time > clip.duration {
                warnings.push(format!(
                    "Clip '{}' has event at {:.2}s outside its {:.2}s duration",
                    state, event.time, clip.duration
                ));
            }
            match event.event {
                ClipEventKind::AttackWindowOpen => {
                    if open {
                        warnings.push(format!("Clip '{}' opens an already-open attack window", state));
                    }
                    open = true;
                }
                ClipEventKind::AttackWindowClose => {
                    if !open {
                        warnings.push(format!("Clip '{}' closes an attack window that is not open", state));
                    }
                    open = false;
                }
                _ => {}
            }
        }
        if open {
            warnings.push(format!("Clip '{}' ends with its attack window still open", state));
        }
    }

    warnings
}
