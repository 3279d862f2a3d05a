//! Controller domain: the action state machine.
//!
//! Locomotion is the initial state; each mapped action is a one-shot
//! state entered by request. Entry is a hard cut with no graph-edge
//! negotiation. Non-terminal actions may interrupt each other freely;
//! terminal actions absorb the controller until the character is
//! destroyed. Completion hands control back to locomotion only when the
//! completion still matches the active state.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::components::{ActiveAction, AnimationController};
use super::events::{
    ActionFinished, ActionRequest, AnimationCompleted, AttackWindowClosed, CharacterSignal,
};
use super::playback::ClipClock;

/// Result of a `request_action` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The action started; the graph was hard-cut to `state`.
    Started {
        state: String,
        /// The interrupted action left its attack window open; the
        /// caller owes collaborators a close notification.
        window_was_open: bool,
    },
    /// No entry in the profile's action map: a configuration bug,
    /// logged, no state change.
    Unmapped,
    /// The active action is terminal; the request is dropped.
    BlockedByTerminal,
}

/// Result of feeding a completion notification to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// A non-terminal action finished; control returned to locomotion.
    ReturnedToLocomotion {
        action: String,
        window_was_open: bool,
    },
    /// The active action is terminal and stays put.
    TerminalHold,
    /// Completion for a state the controller already left, or no
    /// action active. Expected race, ignored.
    Stale,
}

impl AnimationController {
    /// Request the named action. Resolves it through the profile's
    /// action map, resets the per-occupancy event latches, and
    /// hard-cuts the graph to the target state.
    ///
    /// Two requests in the same tick resolve last-writer-wins; there is
    /// no queueing.
    pub fn request_action(&mut self, action: &str) -> RequestOutcome {
        if let Some(active) = &self.active {
            if self.profile.is_terminal(&active.name) {
                debug!(
                    "Profile '{}': dropping '{}', terminal action '{}' is active",
                    self.profile.id, action, active.name
                );
                return RequestOutcome::BlockedByTerminal;
            }
        }

        let Some(state) = self.profile.state_for(action) else {
            warn!(
                "Profile '{}': no graph state mapped for action '{}'",
                self.profile.id, action
            );
            return RequestOutcome::Unmapped;
        };
        let state = state.to_string();

        let window_was_open = self.attack_window_open;
        self.hit_frame_fired = false;
        self.attack_window_open = false;
        self.active = Some(ActiveAction {
            name: action.to_string(),
            state: state.clone(),
        });
        self.graph.travel_to(&state);

        RequestOutcome::Started {
            state,
            window_was_open,
        }
    }

    /// Feed a clip-completion notification tagged with its graph state.
    pub fn complete_state(&mut self, state: &str) -> CompletionOutcome {
        let Some(active) = &self.active else {
            return CompletionOutcome::Stale;
        };
        if active.state != state {
            debug!(
                "Profile '{}': stale completion for '{}' while in '{}', ignoring",
                self.profile.id, state, active.state
            );
            return CompletionOutcome::Stale;
        }
        if self.profile.is_terminal(&active.name) {
            return CompletionOutcome::TerminalHold;
        }

        let action = active.name.clone();
        let window_was_open = self.attack_window_open;
        self.active = None;
        self.hit_frame_fired = false;
        self.attack_window_open = false;
        let locomotion = self.profile.locomotion_state.clone();
        self.graph.travel_to(&locomotion);

        CompletionOutcome::ReturnedToLocomotion {
            action,
            window_was_open,
        }
    }
}

/// Drains this frame's signals and direct requests in delivery order.
///
/// A single drain point keeps same-frame competition deterministic:
/// whichever request lands last owns the one-shot slot.
pub(crate) fn drive_actions(
    mut signals: MessageReader<CharacterSignal>,
    mut requests: MessageReader<ActionRequest>,
    mut query: Query<(&mut AnimationController, &mut ClipClock)>,
    mut closed: MessageWriter<AttackWindowClosed>,
) {
    for message in signals.read() {
        let Ok((mut controller, mut clock)) = query.get_mut(message.entity) else {
            continue;
        };
        let Some(action) = controller.action_for_signal(&message.signal) else {
            // Unbound signal: expected heterogeneity across archetypes.
            continue;
        };
        let action = action.to_string();
        apply_request(message.entity, &mut controller, &mut clock, &action, &mut closed);
    }

    for message in requests.read() {
        let Ok((mut controller, mut clock)) = query.get_mut(message.entity) else {
            continue;
        };
        apply_request(
            message.entity,
            &mut controller,
            &mut clock,
            &message.action,
            &mut closed,
        );
    }
}

fn apply_request(
    entity: Entity,
    controller: &mut AnimationController,
    clock: &mut ClipClock,
    action: &str,
    closed: &mut MessageWriter<AttackWindowClosed>,
) {
    if let RequestOutcome::Started {
        state,
        window_was_open,
    } = controller.request_action(action)
    {
        // Every started request is a fresh occupancy. Re-arming here
        // instead of on state change covers re-requesting the active
        // action, where the graph state name does not change.
        clock.arm(&state);
        if window_was_open {
            // State-exit safety net: an interrupted clip must not leave
            // the window logically stuck open for consumers.
            closed.write(AttackWindowClosed { entity });
        }
    }
}

/// Applies clip completions, returning non-terminal actions to
/// locomotion and holding terminal ones in place.
pub(crate) fn apply_completions(
    mut completions: MessageReader<AnimationCompleted>,
    mut query: Query<(&mut AnimationController, &mut ClipClock)>,
    mut finished: MessageWriter<ActionFinished>,
    mut closed: MessageWriter<AttackWindowClosed>,
) {
    for message in completions.read() {
        let Ok((mut controller, mut clock)) = query.get_mut(message.entity) else {
            continue;
        };
        match controller.complete_state(&message.state) {
            CompletionOutcome::ReturnedToLocomotion {
                action,
                window_was_open,
            } => {
                if window_was_open {
                    closed.write(AttackWindowClosed {
                        entity: message.entity,
                    });
                }
                finished.write(ActionFinished {
                    entity: message.entity,
                    action,
                });
            }
            CompletionOutcome::TerminalHold => {
                // Absorbing state; the clock stays parked on its last
                // frame until the character is despawned.
                clock.hold();
            }
            CompletionOutcome::Stale => {}
        }
    }
}
