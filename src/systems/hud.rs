//! HUD widget updates.
use bevy_ecs::prelude::*;

use crate::components::charactercontroller::CharacterController;
use crate::components::progressbar::{ProgressBar, SpeedBar};

/// Fill speed bars with their source's speed as a fraction of its run speed.
pub fn update_speed_bar(
    mut bars: Query<(&SpeedBar, &mut ProgressBar)>,
    controllers: Query<&CharacterController>,
) {
    for (speed_bar, mut bar) in bars.iter_mut() {
        let Ok(controller) = controllers.get(speed_bar.source) else {
            bar.reset();
            continue;
        };
        let run_speed = controller.settings.run_speed;
        if run_speed > 0.0 {
            bar.set_fill(controller.current_speed / run_speed);
        } else {
            bar.set_fill(0.0);
        }
    }
}
