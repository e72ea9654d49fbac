use bevy_ecs::prelude::Resource;

/// Frame and fixed-step timing.
///
/// `delta` is the scaled frame time. Physics runs on `fixed_delta` steps
/// drawn from `accumulator`, at most `max_fixed_steps` per frame.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,

    pub fixed_delta: f32,
    pub accumulator: f32,
    pub max_fixed_steps: u32,
    pub fixed_steps_this_frame: u32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
            fixed_delta: 1.0 / 50.0,
            accumulator: 0.0,
            max_fixed_steps: 5,
            fixed_steps_this_frame: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale.max(0.0);
        self
    }

    /// Set the fixed step rate; non-positive rates are ignored.
    pub fn with_fixed_hz(mut self, hz: f32) -> Self {
        self.set_fixed_hz(hz);
        self
    }

    pub fn set_fixed_hz(&mut self, hz: f32) {
        if hz > 0.0 {
            self.fixed_delta = 1.0 / hz;
        }
    }

    /// Start a frame of `raw_delta` real seconds.
    pub fn advance(&mut self, raw_delta: f32) {
        self.delta = raw_delta.max(0.0) * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
        self.accumulator += self.delta;
        self.fixed_steps_this_frame = 0;
    }

    /// Take one fixed step from the accumulator if one is due.
    ///
    /// Once the per-frame cap is reached a backlog of whole steps is dropped;
    /// a partial step stays for the next frame.
    pub fn consume_fixed_step(&mut self) -> bool {
        if self.fixed_steps_this_frame >= self.max_fixed_steps {
            if self.accumulator >= self.fixed_delta {
                self.accumulator = 0.0;
            }
            return false;
        }
        if self.accumulator + 1e-5 < self.fixed_delta {
            return false;
        }
        self.accumulator = (self.accumulator - self.fixed_delta).max(0.0);
        self.fixed_steps_this_frame += 1;
        true
    }

    /// Fraction of a fixed step left in the accumulator.
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.fixed_delta).clamp(0.0, 1.0)
    }
}
