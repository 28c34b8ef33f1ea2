//! Fixed-timestep loop implementing the "Fix Your Timestep" pattern.
//!
//! Decouples the simulation rate from the frame rate using an accumulator.
//! Frame times are passed in explicitly so the same loop drives both a
//! wall-clock run and a deterministic headless run.

use tracing::warn;

/// Fixed-timestep accumulator.
#[derive(Debug, Clone)]
pub struct FixedStepLoop {
    fixed_dt: f64,
    max_frame_time: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
}

impl FixedStepLoop {
    /// Creates a loop stepping at `fixed_dt`, clamping frames longer than `max_frame_time`.
    pub fn new(fixed_dt: f64, max_frame_time: f64) -> Self {
        Self {
            fixed_dt,
            max_frame_time,
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
        }
    }

    /// Runs one frame of `frame_time` seconds.
    ///
    /// `update_fn(fixed_dt, sim_time)` is called zero or more times, where
    /// `sim_time` is the simulation time at the start of that step. Returns
    /// the interpolation alpha in `[0.0, 1.0)` left in the accumulator.
    pub fn tick(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> f64 {
        let mut frame_time = frame_time.max(0.0);
        // Clamp frame time to prevent spiral of death
        if frame_time > self.max_frame_time {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                self.max_frame_time * 1000.0
            );
            frame_time = self.max_frame_time;
        }

        self.accumulator += frame_time;

        while self.accumulator >= self.fixed_dt {
            update_fn(self.fixed_dt, self.total_sim_time);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
        }

        self.frame_count += 1;
        self.alpha()
    }

    /// Returns the current interpolation alpha without running a tick.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    /// Returns the total number of frames ticked.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the total simulation time in seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for FixedStepLoop {
    fn default() -> Self {
        Self::new(1.0 / 60.0, 0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED_DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_accumulator_single_step() {
        let mut loop_ = FixedStepLoop::default();
        let mut updates = 0u32;
        loop_.tick(FIXED_DT, |_, _| updates += 1);
        assert_eq!(updates, 1);
        assert!(loop_.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_multiple_steps() {
        let mut loop_ = FixedStepLoop::default();
        let mut times = Vec::new();
        loop_.tick(3.0 * FIXED_DT, |_, sim_time| times.push(sim_time));
        assert_eq!(times.len(), 3);
        assert!((times[2] - 2.0 * FIXED_DT).abs() < 1e-12);
        assert!((loop_.total_sim_time() - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_accumulator_partial() {
        let mut loop_ = FixedStepLoop::default();
        let mut updates = 0u32;
        let alpha = loop_.tick(0.5 * FIXED_DT, |_, _| updates += 1);
        assert_eq!(updates, 0);
        assert!((alpha - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut loop_ = FixedStepLoop::default();
        let mut updates = 0u32;
        loop_.tick(1.0, |_, _| updates += 1);
        let max_updates = (0.25 / FIXED_DT).ceil() as u32;
        assert!(
            updates <= max_updates,
            "Expected at most {max_updates} updates, got {updates}"
        );
        assert!(updates > 0);
    }

    #[test]
    fn test_negative_frame_time_is_ignored() {
        let mut loop_ = FixedStepLoop::default();
        loop_.tick(FIXED_DT * 0.5, |_, _| {});
        loop_.tick(-1.0, |_, _| {});
        assert!((loop_.alpha() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_fast_frames_accumulate_into_steps() {
        let mut loop_ = FixedStepLoop::default();
        let mut updates = 0u32;
        for _ in 0..144 {
            loop_.tick(1.0 / 144.0, |_, _| updates += 1);
        }
        // One second of frames yields ~60 steps
        assert!((59..=60).contains(&updates), "got {updates}");
        assert_eq!(loop_.frame_count(), 144);
        assert!((loop_.total_sim_time() - f64::from(updates) * FIXED_DT).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];

        let mut loop_a = FixedStepLoop::default();
        let mut loop_b = FixedStepLoop::default();

        let (mut updates_a, mut updates_b) = (0u32, 0u32);
        for &ft in &frame_times {
            let alpha_a = loop_a.tick(ft, |_, _| updates_a += 1);
            let alpha_b = loop_b.tick(ft, |_, _| updates_b += 1);
            assert!(
                (alpha_a - alpha_b).abs() < 1e-15,
                "Alphas diverged: {alpha_a} vs {alpha_b}"
            );
        }

        assert_eq!(updates_a, updates_b);
        assert_eq!(loop_a.frame_count(), loop_b.frame_count());
    }
}
