//! Input action events.
//!
//! This module defines [`InputEvent`] which is triggered when a locomotion
//! action is pressed or released. The [`InputAction`] enum lists the
//! recognized actions; movement and look stay continuous and are read from
//! [`InputState`](crate::resources::input::InputState) directly.
//!
//! [`controller_input_observer`] forwards the events to every active
//! [`CharacterController`]; [`suspend_controller_observer`] clears held
//! input when one is suspended.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::charactercontroller::CharacterController;
use crate::components::suspended::Suspended;

/// Enumeration of logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Jump (default: Space).
    Jump,
    /// Run while held (default: Left Shift).
    Run,
    /// Crouch while held (default: Left Ctrl).
    Crouch,
}

/// Event emitted when an input action is pressed or released.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}

/// Updates the held/requested flags of every controller that is not suspended.
///
/// A jump press sets `jump_request`, consumed by the jump system on the next
/// grounded fixed step. Releasing jump cancels a request that has not been
/// consumed yet.
pub fn controller_input_observer(
    trigger: On<InputEvent>,
    mut query: Query<&mut CharacterController, Without<Suspended>>,
) {
    let event = trigger.event();
    for mut controller in query.iter_mut() {
        match event.action {
            InputAction::Jump => controller.jump_request = event.pressed,
            InputAction::Run => controller.run_held = event.pressed,
            InputAction::Crouch => controller.crouch_held = event.pressed,
        }
    }
    debug!("{:?} {}", event.action, if event.pressed { "pressed" } else { "released" });
}

/// Drops held input when a controller is suspended.
///
/// Releases that happen while suspended never reach the controller, so a
/// resumed controller would otherwise keep running or jump on its own.
pub fn suspend_controller_observer(
    trigger: On<Add, Suspended>,
    mut query: Query<&mut CharacterController>,
) {
    let entity = trigger.event().entity;
    if let Ok(mut controller) = query.get_mut(entity) {
        controller.clear_input();
        debug!("{:?} suspended, input cleared", entity);
    }
}
