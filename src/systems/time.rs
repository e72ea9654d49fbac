//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame and decides how many fixed physics steps the frame
//! owes.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The current
/// `time_scale` is applied and the scaled delta is added to the fixed-step
/// accumulator.
pub fn update_world_time(world: &mut World, dt: f32) {
    world.resource_mut::<WorldTime>().advance(dt);
}

/// Run `fixed` once per fixed step owed by the accumulator.
///
/// Returns the number of steps taken this frame.
pub fn run_fixed_steps(world: &mut World, fixed: &mut Schedule) -> u32 {
    let mut steps = 0;
    while world.resource_mut::<WorldTime>().consume_fixed_step() {
        fixed.run(world);
        steps += 1;
    }
    steps
}
