//! Controller domain: the signal adapter's bind step.
//!
//! When a controller attaches to its character, the profile's
//! signal-to-action map is intersected with the signals the character
//! declares. Binding happens once; subscriptions live for the
//! controller's lifetime. The runtime half (draining `CharacterSignal`
//! messages) lives in the action drain so same-frame requests stay
//! ordered.

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{AnimationController, SignalSet};

/// Binds freshly attached controllers against their character's
/// declared signals. Characters without a `SignalSet` bind nothing and
/// are driven through direct requests only.
pub(crate) fn bind_controllers(
    mut query: Query<(&mut AnimationController, Option<&SignalSet>), Added<AnimationController>>,
) {
    let empty = HashSet::new();
    for (mut controller, signals) in &mut query {
        let available = signals.map(|s| &s.0).unwrap_or(&empty);
        controller.bind_signals(available);
        info!(
            "Bound animation controller for profile '{}' ({} of {} signals)",
            controller.profile().id,
            controller.bound_signals.len(),
            controller.profile().signal_actions.len()
        );
    }
}
