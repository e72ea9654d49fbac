//! HUD progress bar widget.

use bevy_ecs::prelude::{Component, Entity};
use raylib::prelude::Color;

/// Horizontal bar drawn in screen space, filled left to right.
#[derive(Component, Clone, Debug)]
pub struct ProgressBar {
    fill: f32,
    pub initial_value: f32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub fill_color: Color,
    pub background_color: Color,
    pub label: Option<String>,
}

impl ProgressBar {
    /// New bar showing `initial_value` (clamped to `[0, 1]`).
    pub fn new(initial_value: f32, x: i32, y: i32, width: i32, height: i32) -> Self {
        let mut bar = Self {
            fill: 0.0,
            initial_value,
            x,
            y,
            width,
            height,
            fill_color: Color::new(120, 200, 255, 230),
            background_color: Color::new(20, 20, 20, 160),
            label: None,
        };
        bar.set_fill(initial_value);
        bar
    }

    pub fn with_colors(mut self, fill_color: Color, background_color: Color) -> Self {
        self.fill_color = fill_color;
        self.background_color = background_color;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn fill(&self) -> f32 {
        self.fill
    }

    /// Set the fill fraction. NaN empties the bar.
    pub fn set_fill(&mut self, value: f32) {
        self.fill = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    }

    pub fn reset(&mut self) {
        self.set_fill(self.initial_value);
    }

    /// Width in pixels of the filled part.
    pub fn filled_width(&self) -> i32 {
        (self.width as f32 * self.fill).round() as i32
    }
}

/// Drives a [`ProgressBar`] from a character's current speed.
#[derive(Component, Clone, Copy, Debug)]
pub struct SpeedBar {
    pub source: Entity,
}
