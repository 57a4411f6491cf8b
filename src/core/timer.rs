/// Self-contained timers - accumulate delta time and decide when to fire

/// Fixed rate timer - fires at specific Hz
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f32,
    pub accumulator: f32,
}

impl FixedHz {
    /// Create timer that fires at given frequency
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns true if should fire
    pub fn tick(&mut self, delta: f32) -> bool {
        self.accumulator += delta;

        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

/// Simulation accumulator - yields fixed timesteps so focus glides are
/// independent of the render frame rate
#[derive(Debug, Clone)]
pub struct Accumulator {
    timestep: f32,
    accumulator: f32,
    max_steps: u8,
}

impl Accumulator {
    /// Create accumulator with fixed timestep
    pub fn new(hz: f32, max_steps: u8) -> Self {
        Self {
            timestep: 1.0 / hz,
            accumulator: 0.0,
            max_steps,
        }
    }

    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    /// Update with delta, returns iterator of fixed timesteps to execute
    pub fn tick(&mut self, delta: f32) -> impl Iterator<Item = f32> {
        self.accumulator += delta;

        let steps = (self.accumulator / self.timestep)
            .min(self.max_steps as f32) as usize;

        self.accumulator -= steps as f32 * self.timestep;

        std::iter::repeat(self.timestep).take(steps)
    }

    /// Fraction of a timestep left over after the last tick
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.timestep
    }
}
