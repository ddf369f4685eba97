//! Fixed-timestep accumulator.
//!
//! Frames arrive with variable durations; the simulation only ever sees
//! steps of exactly `fixed_dt`.

/// Converts variable frame times into a whole number of fixed steps.
#[derive(Debug, Clone)]
pub struct FixedStep {
    /// Fixed simulation step in seconds
    fixed_dt: f32,
    /// Time not yet consumed by a step
    accumulator: f32,
    /// Longest frame accepted, longer frames are clamped
    max_frame_dt: f32,
    /// Most steps run for a single frame
    max_steps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl FixedStep {
    /// Create an accumulator with the given step length.
    #[must_use]
    pub fn new(fixed_dt: f32) -> Self {
        let fixed_dt = fixed_dt.max(0.001); // Minimum 1ms
        Self {
            fixed_dt,
            accumulator: 0.0,
            max_frame_dt: 0.25,
            max_steps: 10,
        }
    }

    /// Fixed step length.
    #[must_use]
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Accumulate a frame's duration.
    /// Returns the number of fixed steps that should be run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // Clamp to prevent spiral of death
        self.accumulator += frame_dt.clamp(0.0, self.max_frame_dt);
        let mut count = 0;

        while self.accumulator >= self.fixed_dt && count < self.max_steps {
            self.accumulator -= self.fixed_dt;
            count += 1;
        }

        // If we're still behind, drop the backlog
        if self.accumulator > self.fixed_dt * 2.0 {
            self.accumulator = 0.0;
        }

        count
    }

    /// Fraction of a step left over, for interpolation.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.fixed_dt
    }
}
