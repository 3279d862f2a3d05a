//! Controller domain: the locomotion driver.
//!
//! While no action occupies the one-shot slot, every tick pushes the
//! sampled speed into the graph: a continuous blend weight, or a pair
//! of mutually exclusive transition conditions. Condition mode writes
//! both flags every frame, not just on change, so whichever transition
//! edge the graph consumes observes the correct value even if the
//! previous tick's transition has not resolved yet. Pulse-then-clear
//! semantics missed transitions in practice.

use bevy::prelude::*;

use super::components::{AnimationController, CharacterMotion, MovementSpeed};

impl AnimationController {
    /// Push the current speed into the graph. Idempotent; safe to call
    /// every tick with an unchanged speed. Skipped while an action is
    /// active, since one-shot and locomotion parameters may overlap in
    /// some graph technologies.
    pub fn locomotion_tick(&mut self) {
        if self.active.is_some() {
            return;
        }

        if self.profile.condition_locomotion {
            let is_moving = self.current_speed >= self.profile.idle_to_move_speed;
            if self.params.to_running && self.params.to_idle {
                let to_running = self.profile.params.to_running.clone();
                let to_idle = self.profile.params.to_idle.clone();
                self.graph.set_condition(&to_running, is_moving);
                self.graph.set_condition(&to_idle, !is_moving);
            } else {
                self.warn_missing_params_once();
            }
        } else if self.params.blend {
            // A non-positive max would turn the division into NaN.
            let max = self.profile.max_movement_speed;
            let blend = if max > 0.0 {
                (self.current_speed / max).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let param = self.profile.params.blend.clone();
            self.graph.set_blend(&param, blend);
        } else {
            self.warn_missing_params_once();
        }
    }

    fn warn_missing_params_once(&mut self) {
        if !self.missing_param_warned {
            self.missing_param_warned = true;
            warn!(
                "Profile '{}': locomotion parameters missing from the bound graph, writes dropped",
                self.profile.id
            );
        }
    }
}

/// Samples each character's speed capability and ticks its locomotion.
///
/// The dedicated speed component wins over a raw velocity when a
/// character carries both; characters with neither keep their last
/// sampled speed.
pub(crate) fn drive_locomotion(
    mut query: Query<(
        &mut AnimationController,
        Option<&MovementSpeed>,
        Option<&CharacterMotion>,
    )>,
) {
    for (mut controller, speed, motion) in &mut query {
        if let Some(speed) = speed {
            controller.sample_speed(speed.0);
        } else if let Some(motion) = motion {
            controller.sample_speed(motion.speed());
        }
        controller.locomotion_tick();
    }
}
