//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - [`dispatch_input_events`] turns the key edges recorded there into
//!   triggered events: [`InputEvent`] for locomotion actions,
//!   [`SwitchDebugEvent`] and [`ReloadConfigEvent`] for application keys.
use bevy_ecs::prelude::*;
use log::info;

use crate::events::input::{InputAction, InputEvent};
use crate::events::reloadconfig::ReloadConfigEvent;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::math::Vec2;
use crate::resources::input::{BoolState, InputState};

/// Poll Raylib for keyboard and mouse input and update the `InputState` resource.
///
/// Escape toggles cursor capture; while the cursor is free the mouse delta is
/// not recorded.
pub fn update_input_state(mut input: ResMut<InputState>, mut rl: NonSendMut<raylib::RaylibHandle>) {
    let input = &mut *input;
    for state in [
        &mut input.move_forward,
        &mut input.move_left,
        &mut input.move_backward,
        &mut input.move_right,
        &mut input.look_up,
        &mut input.look_down,
        &mut input.look_left,
        &mut input.look_right,
        &mut input.jump,
        &mut input.run,
        &mut input.crouch,
        &mut input.action_back,
        &mut input.mode_debug,
        &mut input.reload_config,
    ] {
        let down = rl.is_key_down(state.key_binding);
        state.update(down);
    }
    input.refresh_axes();

    if input.action_back.just_pressed {
        input.cursor_captured = !input.cursor_captured;
        if input.cursor_captured {
            rl.disable_cursor();
        } else {
            rl.enable_cursor();
        }
        info!("Cursor {}", if input.cursor_captured { "captured" } else { "released" });
    }

    input.look_delta = if input.cursor_captured {
        let delta = rl.get_mouse_delta();
        // raylib's screen y grows downward
        Vec2::new(delta.x, -delta.y)
    } else {
        Vec2::zeros()
    };
}

fn edge_event(state: &BoolState, action: InputAction) -> Option<InputEvent> {
    if state.just_pressed {
        Some(InputEvent {
            action,
            pressed: true,
        })
    } else if state.just_released {
        Some(InputEvent {
            action,
            pressed: false,
        })
    } else {
        None
    }
}

/// Emit events for the key edges of this frame.
pub fn dispatch_input_events(input: Res<InputState>, mut commands: Commands) {
    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
    if input.reload_config.just_pressed {
        commands.trigger(ReloadConfigEvent {});
    }

    let actions = [
        (&input.jump, InputAction::Jump),
        (&input.run, InputAction::Run),
        (&input.crouch, InputAction::Crouch),
    ];
    for (state, action) in actions {
        if let Some(event) = edge_event(state, action) {
            commands.trigger(event);
        }
    }
}
