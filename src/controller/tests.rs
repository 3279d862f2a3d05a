//! Controller domain: unit tests for the action state machine,
//! locomotion driver, event relay, and playback clock.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::config::{
    AnimationProfile, ClipDef, ClipEventDef, ClipEventKind, ClipManifest, GraphBackendKind,
    LocomotionParams,
};

use super::ControllerPlugin;
use super::actions::{CompletionOutcome, RequestOutcome};
use super::components::{AnimationController, SignalSet};
use super::events::{ActionFinished, ActionRequest, CharacterSignal, HitFrameEvent};
use super::playback::ClipClock;
use super::relay::RelayOutput;

fn test_profile(backend: GraphBackendKind, condition_locomotion: bool) -> Arc<AnimationProfile> {
    let mut action_states = HashMap::new();
    action_states.insert("attack".to_string(), "attack_state".to_string());
    action_states.insert("hit".to_string(), "hit_state".to_string());
    action_states.insert("dash".to_string(), "dash_state".to_string());
    action_states.insert("death".to_string(), "death_state".to_string());

    let mut signal_actions = HashMap::new();
    signal_actions.insert("started_attacking".to_string(), "attack".to_string());
    signal_actions.insert("took_damage".to_string(), "hit".to_string());
    signal_actions.insert("died".to_string(), "death".to_string());

    Arc::new(AnimationProfile {
        id: "test_archetype".to_string(),
        backend,
        graph_root: "AnimationTree".to_string(),
        idle_to_move_speed: 0.5,
        max_movement_speed: 6.0,
        condition_locomotion,
        locomotion_state: "locomotion".to_string(),
        params: LocomotionParams::default(),
        action_states,
        terminal_actions: vec!["death".to_string()],
        signal_actions,
    })
}

fn blend_controller() -> AnimationController {
    AnimationController::new(test_profile(GraphBackendKind::BlendTree, false))
}

fn condition_controller() -> AnimationController {
    AnimationController::new(test_profile(GraphBackendKind::StateMachine, true))
}

#[test]
fn test_unmapped_action_rejected() {
    let mut controller = blend_controller();

    let outcome = controller.request_action("taunt");
    assert_eq!(outcome, RequestOutcome::Unmapped);
    assert!(!controller.action_active());
    assert_eq!(controller.state_name(), "locomotion");
}

#[test]
fn test_terminal_action_absorbs() {
    let mut controller = blend_controller();

    assert!(matches!(
        controller.request_action("death"),
        RequestOutcome::Started { .. }
    ));
    assert_eq!(controller.active_action(), Some("death"));

    // Later damage must not interrupt death
    assert_eq!(
        controller.request_action("hit"),
        RequestOutcome::BlockedByTerminal
    );
    assert_eq!(controller.active_action(), Some("death"));

    // Completion holds the terminal state instead of returning
    assert_eq!(
        controller.complete_state("death_state"),
        CompletionOutcome::TerminalHold
    );
    assert_eq!(controller.active_action(), Some("death"));
    assert_eq!(controller.state_name(), "death_state");
}

#[test]
fn test_completion_round_trip() {
    let mut controller = blend_controller();

    controller.request_action("attack");
    assert_eq!(controller.state_name(), "attack_state");

    let outcome = controller.complete_state("attack_state");
    assert_eq!(
        outcome,
        CompletionOutcome::ReturnedToLocomotion {
            action: "attack".to_string(),
            window_was_open: false,
        }
    );
    assert!(!controller.action_active());
    assert_eq!(controller.state_name(), "locomotion");
}

#[test]
fn test_interrupt_mid_clip() {
    let mut controller = blend_controller();

    controller.request_action("attack");
    controller.request_action("hit");
    assert_eq!(controller.active_action(), Some("hit"));
    assert_eq!(controller.state_name(), "hit_state");
}

#[test]
fn test_stale_completion_ignored() {
    let mut controller = blend_controller();

    controller.request_action("attack");
    controller.request_action("hit");

    // Late completion still tagged for the interrupted attack
    assert_eq!(
        controller.complete_state("attack_state"),
        CompletionOutcome::Stale
    );
    assert_eq!(controller.active_action(), Some("hit"));
}

#[test]
fn test_completion_without_action_is_stale() {
    let mut controller = blend_controller();
    assert_eq!(
        controller.complete_state("attack_state"),
        CompletionOutcome::Stale
    );
}

#[test]
fn test_last_writer_wins_same_tick() {
    let mut controller = blend_controller();

    controller.request_action("attack");
    controller.request_action("dash");
    controller.request_action("hit");
    assert_eq!(controller.active_action(), Some("hit"));
}

#[test]
fn test_continuous_blend_value() {
    let mut controller = blend_controller();

    controller.sample_speed(2.5);
    controller.locomotion_tick();

    let blend = controller
        .graph()
        .blend("parameters/locomotion/blend")
        .unwrap();
    assert!((blend - 2.5 / 6.0).abs() < 1e-4, "blend was {}", blend);
}

#[test]
fn test_continuous_blend_clamped() {
    let mut controller = blend_controller();

    controller.sample_speed(40.0);
    controller.locomotion_tick();
    assert_eq!(
        controller.graph().blend("parameters/locomotion/blend"),
        Some(1.0)
    );
}

#[test]
fn test_condition_locomotion_flags() {
    let mut controller = condition_controller();

    controller.sample_speed(0.3);
    controller.locomotion_tick();
    assert_eq!(controller.graph().condition("conditions/to_idle"), Some(true));
    assert_eq!(
        controller.graph().condition("conditions/to_running"),
        Some(false)
    );

    controller.sample_speed(1.0);
    controller.locomotion_tick();
    assert_eq!(
        controller.graph().condition("conditions/to_running"),
        Some(true)
    );
    assert_eq!(controller.graph().condition("conditions/to_idle"), Some(false));
}

#[test]
fn test_locomotion_skipped_while_action_active() {
    let mut controller = blend_controller();

    controller.request_action("attack");
    controller.sample_speed(6.0);
    controller.locomotion_tick();

    // One-shot occupancy blocks the locomotion write
    assert_eq!(
        controller.graph().blend("parameters/locomotion/blend"),
        Some(0.0)
    );
}

#[test]
fn test_hit_frame_at_most_once_per_occupancy() {
    let mut controller = blend_controller();
    controller.request_action("attack");

    assert_eq!(
        controller.relay_clip_event(&ClipEventKind::HitFrame),
        Some(RelayOutput::HitFrame {
            action: "attack".to_string()
        })
    );
    assert_eq!(controller.relay_clip_event(&ClipEventKind::HitFrame), None);

    // New occupancy resets the latch
    controller.request_action("attack");
    assert!(controller.relay_clip_event(&ClipEventKind::HitFrame).is_some());
}

#[test]
fn test_hit_frame_without_action_ignored() {
    let mut controller = blend_controller();
    assert_eq!(controller.relay_clip_event(&ClipEventKind::HitFrame), None);
}

#[test]
fn test_attack_window_idempotent() {
    let mut controller = blend_controller();
    controller.request_action("attack");

    assert_eq!(
        controller.relay_clip_event(&ClipEventKind::AttackWindowOpen),
        Some(RelayOutput::WindowOpened)
    );
    assert_eq!(
        controller.relay_clip_event(&ClipEventKind::AttackWindowOpen),
        None
    );
    assert!(controller.attack_window_open());

    assert_eq!(
        controller.relay_clip_event(&ClipEventKind::AttackWindowClose),
        Some(RelayOutput::WindowClosed)
    );
    assert_eq!(
        controller.relay_clip_event(&ClipEventKind::AttackWindowClose),
        None
    );
    assert!(!controller.attack_window_open());
}

#[test]
fn test_footstep_always_passes() {
    let mut controller = blend_controller();
    assert_eq!(
        controller.relay_clip_event(&ClipEventKind::Footstep),
        Some(RelayOutput::Footstep)
    );
    assert_eq!(
        controller.relay_clip_event(&ClipEventKind::Footstep),
        Some(RelayOutput::Footstep)
    );
}

#[test]
fn test_marker_forwarded() {
    let mut controller = blend_controller();
    assert_eq!(
        controller.relay_clip_event(&ClipEventKind::Marker("vfx_flash".to_string())),
        Some(RelayOutput::Marker("vfx_flash".to_string()))
    );
}

#[test]
fn test_interrupt_reports_open_window() {
    let mut controller = blend_controller();
    controller.request_action("attack");
    controller.relay_clip_event(&ClipEventKind::AttackWindowOpen);

    // The interrupting request reports the open window so the system
    // layer can publish the forced close
    let outcome = controller.request_action("hit");
    assert_eq!(
        outcome,
        RequestOutcome::Started {
            state: "hit_state".to_string(),
            window_was_open: true,
        }
    );
    assert!(!controller.attack_window_open());
}

#[test]
fn test_completion_reports_open_window() {
    let mut controller = blend_controller();
    controller.request_action("attack");
    controller.relay_clip_event(&ClipEventKind::AttackWindowOpen);

    let outcome = controller.complete_state("attack_state");
    assert_eq!(
        outcome,
        CompletionOutcome::ReturnedToLocomotion {
            action: "attack".to_string(),
            window_was_open: true,
        }
    );
    assert!(!controller.attack_window_open());
}

#[test]
fn test_signal_binding_skips_missing() {
    let mut controller = blend_controller();
    let available: HashSet<String> = ["took_damage".to_string()].into_iter().collect();
    controller.bind_signals(&available);

    assert_eq!(controller.action_for_signal("took_damage"), Some("hit"));
    assert_eq!(controller.action_for_signal("started_attacking"), None);
    assert_eq!(controller.action_for_signal("died"), None);
}

#[test]
fn test_state_graph_hard_cut() {
    let mut controller = condition_controller();

    controller.request_action("dash");
    assert_eq!(controller.state_name(), "dash_state");
    controller.complete_state("dash_state");
    assert_eq!(controller.state_name(), "locomotion");
}

#[test]
fn test_blend_tree_one_shot_slot() {
    let mut controller = blend_controller();

    assert_eq!(controller.state_name(), "locomotion");
    controller.request_action("attack");
    assert_eq!(controller.state_name(), "attack_state");
    controller.complete_state("attack_state");
    assert_eq!(controller.state_name(), "locomotion");
}

fn attack_clip() -> ClipDef {
    ClipDef {
        duration: 0.8,
        looped: false,
        events: vec![
            ClipEventDef {
                time: 0.2,
                event: ClipEventKind::AttackWindowOpen,
            },
            ClipEventDef {
                time: 0.3,
                event: ClipEventKind::HitFrame,
            },
            ClipEventDef {
                time: 0.5,
                event: ClipEventKind::AttackWindowClose,
            },
        ],
    }
}

#[test]
fn test_clip_clock_fires_events_in_order() {
    let clip = attack_clip();
    let mut clock = ClipClock::default();
    clock.arm("attack_state");

    let mut fired = Vec::new();
    assert!(!clock.advance(&clip, 0.25, &mut fired));
    assert_eq!(fired, vec![ClipEventKind::AttackWindowOpen]);

    fired.clear();
    assert!(!clock.advance(&clip, 0.1, &mut fired));
    assert_eq!(fired, vec![ClipEventKind::HitFrame]);

    fired.clear();
    assert!(clock.advance(&clip, 0.5, &mut fired));
    assert_eq!(fired, vec![ClipEventKind::AttackWindowClose]);
    assert!(clock.finished);

    // A finished clock stays quiet
    fired.clear();
    assert!(!clock.advance(&clip, 1.0, &mut fired));
    assert!(fired.is_empty());
}

fn pipeline_app() -> App {
    let mut app = App::new();
    app.add_plugins(ControllerPlugin);
    app.init_resource::<Time>();

    let mut manifest = ClipManifest::default();
    manifest.clips.insert("attack_state".to_string(), attack_clip());
    manifest.clips.insert(
        "locomotion".to_string(),
        ClipDef {
            duration: 0.5,
            looped: true,
            events: Vec::new(),
        },
    );
    app.insert_resource(manifest);
    app
}

fn advance(app: &mut App, dt: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(dt));
    app.update();
}

fn drain_hit_frames(app: &mut App) -> usize {
    app.world_mut()
        .resource_mut::<Messages<HitFrameEvent>>()
        .drain()
        .count()
}

#[test]
fn test_same_action_rerequest_restarts_clip() {
    let mut app = pipeline_app();
    let entity = app
        .world_mut()
        .spawn(AnimationController::new(test_profile(
            GraphBackendKind::BlendTree,
            false,
        )))
        .id();

    app.world_mut().write_message(ActionRequest {
        entity,
        action: "attack".to_string(),
    });
    advance(&mut app, 0.35);
    assert_eq!(drain_hit_frames(&mut app), 1);

    // Re-requesting the active action is a fresh occupancy: the clip
    // restarts from zero and its track replays
    app.world_mut().write_message(ActionRequest {
        entity,
        action: "attack".to_string(),
    });
    advance(&mut app, 0.35);
    assert_eq!(drain_hit_frames(&mut app), 1);

    // 0.45s into the second occupancy the 0.8s clip is still playing
    advance(&mut app, 0.1);
    let controller = app.world().get::<AnimationController>(entity).unwrap();
    assert!(controller.action_active());

    // and it completes on its own schedule
    advance(&mut app, 0.4);
    advance(&mut app, 0.0);
    let controller = app.world().get::<AnimationController>(entity).unwrap();
    assert!(!controller.action_active());
    assert_eq!(controller.state_name(), "locomotion");
}

#[test]
fn test_signal_drives_pipeline_end_to_end() {
    let mut app = pipeline_app();
    let entity = app
        .world_mut()
        .spawn((
            AnimationController::new(test_profile(GraphBackendKind::BlendTree, false)),
            SignalSet::new(["started_attacking", "died"]),
        ))
        .id();

    app.world_mut().write_message(CharacterSignal {
        entity,
        signal: "started_attacking".to_string(),
    });
    advance(&mut app, 0.1);
    {
        let controller = app.world().get::<AnimationController>(entity).unwrap();
        assert_eq!(controller.active_action(), Some("attack"));
        assert_eq!(controller.state_name(), "attack_state");
    }

    // "took_damage" maps to an action in the profile but this character
    // never declared it, so the signal falls through
    app.world_mut().write_message(CharacterSignal {
        entity,
        signal: "took_damage".to_string(),
    });
    advance(&mut app, 0.1);
    assert_eq!(
        app.world()
            .get::<AnimationController>(entity)
            .unwrap()
            .active_action(),
        Some("attack")
    );

    // Clip runs out; the completion returns the controller to locomotion
    advance(&mut app, 0.7);
    advance(&mut app, 0.0);
    let finished = app
        .world_mut()
        .resource_mut::<Messages<ActionFinished>>()
        .drain()
        .count();
    assert_eq!(finished, 1);
    assert_eq!(
        app.world()
            .get::<AnimationController>(entity)
            .unwrap()
            .state_name(),
        "locomotion"
    );
}

#[test]
fn test_zero_max_speed_blend_stays_finite() {
    let mut profile = (*test_profile(GraphBackendKind::BlendTree, false)).clone();
    profile.max_movement_speed = 0.0;
    let mut controller = AnimationController::new(Arc::new(profile));

    controller.sample_speed(3.0);
    controller.locomotion_tick();
    assert_eq!(
        controller.graph().blend("parameters/locomotion/blend"),
        Some(0.0)
    );
}

#[test]
fn test_clip_clock_loops_and_replays_track() {
    let clip = ClipDef {
        duration: 0.5,
        looped: true,
        events: vec![
            ClipEventDef {
                time: 0.1,
                event: ClipEventKind::Footstep,
            },
            ClipEventDef {
                time: 0.4,
                event: ClipEventKind::Footstep,
            },
        ],
    };
    let mut clock = ClipClock::default();
    clock.arm("locomotion");

    // Crosses both events, wraps, and catches the first event of the
    // next loop during the overshoot
    let mut fired = Vec::new();
    assert!(!clock.advance(&clip, 0.6, &mut fired));
    assert_eq!(fired.len(), 3);
    assert!(!clock.finished);

    fired.clear();
    assert!(!clock.advance(&clip, 0.3, &mut fired));
    assert_eq!(fired, vec![ClipEventKind::Footstep]);
}
