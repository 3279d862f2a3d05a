//! Debug domain: debug systems for input and runtime tweaks.
//!
//! Everything here maps directly onto the controller's public contract:
//! forcing an action goes through `ActionRequest`, force-firing an
//! event goes through `ClipEvent`, playback speed goes through the
//! injected `PlaybackScale`.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::config::ClipEventKind;
use crate::controller::{ActionRequest, AnimationController, ClipEvent, PlaybackScale};
use crate::debug::state::{DebugAction, DebugState};
use crate::debug::ui::{
    DebugButton, DebugInfoOverlay, DebugStatusMessage, DebugUI, refresh_debug_ui,
    spawn_debug_info_overlay, spawn_debug_ui,
};

const PLAYBACK_STEPS: [f32; 4] = [0.25, 0.5, 1.0, 2.0];

/// Toggle debug UI with F1 or backtick key
pub(crate) fn toggle_debug_ui(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    let toggle = keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote);

    if toggle {
        debug_state.ui_visible = !debug_state.ui_visible;

        if debug_state.ui_visible {
            spawn_debug_ui(&mut commands);
        } else {
            for entity in &existing_ui {
                commands.entity(entity).despawn();
            }
        }
    }
}

/// Handle keyboard shortcuts for debug actions
pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut playback: ResMut<PlaybackScale>,
    controllers: Query<(Entity, &AnimationController)>,
    mut requests: MessageWriter<ActionRequest>,
    mut clip_events: MessageWriter<ClipEvent>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    // Only process hotkeys when debug UI is open or Ctrl is held
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    if !debug_state.ui_visible && !ctrl {
        return;
    }

    let hotkeys = [
        (KeyCode::KeyT, DebugAction::CycleAction),
        (KeyCode::KeyF, DebugAction::ForceAction),
        (KeyCode::KeyK, DebugAction::FireHitFrame),
        (KeyCode::KeyJ, DebugAction::FireFootstep),
        (KeyCode::KeyP, DebugAction::CyclePlaybackScale),
        (KeyCode::KeyD, DebugAction::ToggleInfo),
    ];

    for (key, action) in hotkeys {
        if ctrl && keyboard.just_pressed(key) {
            perform_debug_action(
                action,
                &mut commands,
                &mut debug_state,
                &mut playback,
                &controllers,
                &mut requests,
                &mut clip_events,
                &existing_ui,
            );
        }
    }
}

/// Handle button clicks in debug UI
pub(crate) fn handle_debug_buttons(
    mut commands: Commands,
    mut debug_state: ResMut<DebugState>,
    mut playback: ResMut<PlaybackScale>,
    controllers: Query<(Entity, &AnimationController)>,
    mut requests: MessageWriter<ActionRequest>,
    mut clip_events: MessageWriter<ClipEvent>,
    button_query: Query<(&DebugButton, &Interaction), Changed<Interaction>>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    for (button, interaction) in &button_query {
        if *interaction != Interaction::Pressed {
            continue;
        }

        perform_debug_action(
            button.action,
            &mut commands,
            &mut debug_state,
            &mut playback,
            &controllers,
            &mut requests,
            &mut clip_events,
            &existing_ui,
        );
    }
}

fn perform_debug_action(
    action: DebugAction,
    commands: &mut Commands,
    debug_state: &mut DebugState,
    playback: &mut PlaybackScale,
    controllers: &Query<(Entity, &AnimationController)>,
    requests: &mut MessageWriter<ActionRequest>,
    clip_events: &mut MessageWriter<ClipEvent>,
    existing_ui: &Query<Entity, With<DebugUI>>,
) {
    match action {
        DebugAction::CycleAction => {
            let Some((_, controller)) = controllers.iter().next() else {
                debug_state.set_message("No controller to inspect", 2.0);
                return;
            };
            let actions = sorted_actions(controller);
            if actions.is_empty() {
                debug_state.set_message("Profile maps no actions", 2.0);
                return;
            }
            debug_state.selected_action = (debug_state.selected_action + 1) % actions.len();
            let name = &actions[debug_state.selected_action];
            debug_state.set_message(format!("Action: {}", name), 2.0);
            info!("[DEBUG] Selected action: {}", name);
        }
        DebugAction::ForceAction => {
            let Some((entity, controller)) = controllers.iter().next() else {
                debug_state.set_message("No controller to drive", 2.0);
                return;
            };
            let actions = sorted_actions(controller);
            let Some(name) = actions.get(debug_state.selected_action) else {
                debug_state.set_message("No action selected", 2.0);
                return;
            };
            requests.write(ActionRequest {
                entity,
                action: name.clone(),
            });
            debug_state.set_message(format!("Forced action '{}'", name), 2.0);
            info!("[DEBUG] Forced action '{}' on {:?}", name, entity);
        }
        DebugAction::FireHitFrame => {
            fire_clip_event(debug_state, controllers, clip_events, ClipEventKind::HitFrame);
        }
        DebugAction::FireFootstep => {
            fire_clip_event(debug_state, controllers, clip_events, ClipEventKind::Footstep);
        }
        DebugAction::CyclePlaybackScale => {
            let index = PLAYBACK_STEPS
                .iter()
                .position(|s| (*s - playback.0).abs() < f32::EPSILON)
                .unwrap_or(2);
            playback.0 = PLAYBACK_STEPS[(index + 1) % PLAYBACK_STEPS.len()];
            debug_state.set_message(format!("Playback x{}", playback.0), 2.0);
            info!("[DEBUG] Playback scale set to {}", playback.0);
        }
        DebugAction::ToggleInfo => {
            debug_state.show_info = !debug_state.show_info;
            if debug_state.show_info {
                spawn_debug_info_overlay(commands);
            }
        }
        DebugAction::Close => {
            debug_state.ui_visible = false;
            for entity in existing_ui.iter() {
                commands.entity(entity).despawn();
            }
        }
    }

    if matches!(action, DebugAction::CycleAction | DebugAction::CyclePlaybackScale) {
        refresh_debug_ui(commands, debug_state, existing_ui);
    }
}

fn fire_clip_event(
    debug_state: &mut DebugState,
    controllers: &Query<(Entity, &AnimationController)>,
    clip_events: &mut MessageWriter<ClipEvent>,
    event: ClipEventKind,
) {
    let Some((entity, _)) = controllers.iter().next() else {
        debug_state.set_message("No controller to drive", 2.0);
        return;
    };
    debug_state.set_message(format!("Fired {:?}", event), 2.0);
    info!("[DEBUG] Fired {:?} on {:?}", event, entity);
    clip_events.write(ClipEvent { entity, event });
}

fn sorted_actions(controller: &AnimationController) -> Vec<String> {
    let mut actions: Vec<String> = controller.profile().action_states.keys().cloned().collect();
    actions.sort();
    actions
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    mut status_query: Query<&mut Text, With<DebugStatusMessage>>,
) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }

    if let Ok(mut text) = status_query.single_mut() {
        let message = debug_state
            .status_message
            .as_ref()
            .map(|(m, _)| m.clone())
            .unwrap_or_default();
        **text = message;
    }
}

/// Update the controller info overlay
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    playback: Res<PlaybackScale>,
    controllers: Query<&AnimationController>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Ensure overlay exists
    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some(controller), Ok(mut text)) =
        (controllers.iter().next(), overlay_query.single_mut())
    {
        **text = format!(
            "Profile: {}\nState: {}\nAction: {}\nSpeed: {:.2}\nWindow open: {}\nPlayback: x{}",
            controller.profile().id,
            controller.state_name(),
            controller.active_action().unwrap_or("-"),
            controller.speed(),
            controller.attack_window_open(),
            playback.0,
        );
    }
}
