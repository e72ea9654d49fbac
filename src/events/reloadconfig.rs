//! Runtime configuration reload.
//!
//! Triggering [`ReloadConfigEvent`] re-reads the INI file behind
//! [`GameConfig`]. A successful load marks the resource changed, and the
//! config systems push the new values into running controllers, cameras and
//! the physics world on the next frame.

use bevy_ecs::prelude::*;
use log::warn;

use crate::resources::gameconfig::GameConfig;

#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadConfigEvent {}

pub fn reload_config_observer(_trigger: On<ReloadConfigEvent>, config: Option<ResMut<GameConfig>>) {
    let Some(mut config) = config else {
        warn!("Reload requested without a GameConfig resource");
        return;
    };

    // Load into a copy so a broken file leaves the running values untouched.
    let mut reloaded = config.clone();
    match reloaded.load_from_file() {
        Ok(()) => *config = reloaded,
        Err(e) => warn!("Config reload failed, keeping current values: {}", e),
    }
}
