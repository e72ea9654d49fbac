//! Per-frame input resource.
//!
//! Captures the subset of keyboard and mouse state the controller cares about
//! and exposes it to systems via the [`InputState`] resource. Defaults use
//! WASD for movement, the mouse and arrow keys for looking, Space to jump,
//! Left Shift to run and Left Ctrl to crouch.
use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;

use crate::math::Vec2;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    pub fn bound(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding,
        }
    }

    /// Advance one frame with the key's current hardware state.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame input relevant to the controller.
///
/// Key fields are grouped by purpose: movement (WASD), look (arrow keys),
/// locomotion actions and application keys. The analog vectors are rebuilt
/// from them by [`InputState::refresh_axes`].
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub move_forward: BoolState,
    pub move_left: BoolState,
    pub move_backward: BoolState,
    pub move_right: BoolState,
    // Arrow keys
    pub look_up: BoolState,
    pub look_down: BoolState,
    pub look_left: BoolState,
    pub look_right: BoolState,
    // Locomotion
    pub jump: BoolState,
    pub run: BoolState,
    pub crouch: BoolState,
    // Application
    pub action_back: BoolState,
    pub mode_debug: BoolState,
    pub reload_config: BoolState,

    /// Movement input, x right and y forward, never longer than 1.
    pub move_vector: Vec2,
    /// Mouse delta in pixels this frame, x right and y up.
    pub look_delta: Vec2,
    /// Arrow key look rate in `[-1, 1]`, x right and y up.
    pub look_rate: Vec2,
    /// Whether the window holds the mouse cursor for mouse look.
    pub cursor_captured: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_forward: BoolState::bound(KeyboardKey::KEY_W),
            move_left: BoolState::bound(KeyboardKey::KEY_A),
            move_backward: BoolState::bound(KeyboardKey::KEY_S),
            move_right: BoolState::bound(KeyboardKey::KEY_D),
            look_up: BoolState::bound(KeyboardKey::KEY_UP),
            look_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            look_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            look_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            jump: BoolState::bound(KeyboardKey::KEY_SPACE),
            run: BoolState::bound(KeyboardKey::KEY_LEFT_SHIFT),
            crouch: BoolState::bound(KeyboardKey::KEY_LEFT_CONTROL),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
            reload_config: BoolState::bound(KeyboardKey::KEY_F5),
            move_vector: Vec2::zeros(),
            look_delta: Vec2::zeros(),
            look_rate: Vec2::zeros(),
            cursor_captured: true,
        }
    }
}

fn axis(positive: &BoolState, negative: &BoolState) -> f32 {
    (positive.active as i32 - negative.active as i32) as f32
}

impl InputState {
    /// Rebuild `move_vector` and `look_rate` from the key states.
    pub fn refresh_axes(&mut self) {
        let mv = Vec2::new(
            axis(&self.move_right, &self.move_left),
            axis(&self.move_forward, &self.move_backward),
        );
        self.move_vector = if mv.norm_squared() > 1.0 {
            mv.normalize()
        } else {
            mv
        };
        self.look_rate = Vec2::new(
            axis(&self.look_right, &self.look_left),
            axis(&self.look_up, &self.look_down),
        );
    }

    /// Look input for this frame, zero while the cursor is released.
    pub fn effective_look(&self) -> (Vec2, Vec2) {
        if self.cursor_captured {
            (self.look_delta, self.look_rate)
        } else {
            (Vec2::zeros(), Vec2::zeros())
        }
    }
}
