//! Fixed-timestep scheduling of the physics pipeline.
//!
//! Wall-clock frame deltas vary; the pipeline always advances by the same
//! simulated `dt`. [`FixedStepScheduler`] accumulates deltas and runs the
//! pipeline a whole number of times per frame. A single frame longer than
//! the runaway threshold (a stall) permanently degrades the scheduler to
//! variable stepping so catch-up work stays bounded.

/// Scheduler mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Fixed-step accumulation.
    Normal,
    /// Pass-through: each frame's delta becomes one step. Terminal.
    Degraded,
}

/// What one [`FixedStepScheduler::step`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[must_use]
pub struct SchedulerTick {
    /// Pipeline invocations.
    pub steps: u32,
    /// Total simulated seconds handed to the pipeline.
    pub simulated: f64,
    /// Whether this call triggered the transition to degraded mode.
    pub runaway: bool,
    /// Bindings skipped with a warning while running those steps. The
    /// scheduler leaves this at zero; [`Fluid`](crate::Fluid) fills it in.
    pub skipped: usize,
}

/// Fixed-timestep accumulator with a one-way runaway fallback.
#[derive(Clone, Debug)]
pub struct FixedStepScheduler {
    dt: f64,
    runaway_threshold: f64,
    leftover: f64,
    state: SchedulerState,
}

impl FixedStepScheduler {
    /// Create a scheduler in the normal state with no leftover time.
    ///
    /// `dt` must be finite and positive; [`FluidConfig::validate`]
    /// guarantees this for the facade.
    ///
    /// [`FluidConfig::validate`]: crate::FluidConfig::validate
    pub fn new(dt: f64, runaway_threshold: f64) -> Self {
        Self {
            dt,
            runaway_threshold,
            leftover: 0.0,
            state: SchedulerState::Normal,
        }
    }

    /// The fixed timestep.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Accumulated simulated time not yet stepped.
    pub fn leftover(&self) -> f64 {
        self.leftover
    }

    /// Current mode.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Whether the scheduler has degraded to variable stepping.
    pub fn is_degraded(&self) -> bool {
        self.state == SchedulerState::Degraded
    }

    /// Account for `elapsed` seconds, calling `run(dt)` once per pipeline
    /// step.
    ///
    /// Negative and non-finite deltas are ignored.
    pub fn step(&mut self, elapsed: f64, mut run: impl FnMut(f64)) -> SchedulerTick {
        if !elapsed.is_finite() || elapsed < 0.0 {
            log::debug!("ignoring invalid frame delta {elapsed}");
            return SchedulerTick::default();
        }

        match self.state {
            SchedulerState::Degraded => {
                run(elapsed);
                SchedulerTick {
                    steps: 1,
                    simulated: elapsed,
                    runaway: false,
                    skipped: 0,
                }
            }
            SchedulerState::Normal if elapsed > self.runaway_threshold => {
                let catch_up = self.leftover + elapsed;
                self.leftover = 0.0;
                self.state = SchedulerState::Degraded;
                log::error!(
                    "fixed-step scheduler ran away ({elapsed:.3}s frame exceeds {:.3}s); \
                     switching to variable stepping",
                    self.runaway_threshold
                );
                run(catch_up);
                SchedulerTick {
                    steps: 1,
                    simulated: catch_up,
                    runaway: true,
                    skipped: 0,
                }
            }
            SchedulerState::Normal => {
                self.leftover += elapsed;
                let mut tick = SchedulerTick::default();
                while self.leftover >= self.dt {
                    self.leftover -= self.dt;
                    run(self.dt);
                    tick.steps += 1;
                    tick.simulated += self.dt;
                }
                tick
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(s: &mut FixedStepScheduler, elapsed: f64) -> (SchedulerTick, Vec<f64>) {
        let mut runs = Vec::new();
        let tick = s.step(elapsed, |dt| runs.push(dt));
        (tick, runs)
    }

    #[test]
    fn small_deltas_accumulate_into_one_step() {
        let mut s = FixedStepScheduler::new(0.01, 5.0);
        let (t1, r1) = record(&mut s, 0.004);
        let (t2, r2) = record(&mut s, 0.004);
        assert_eq!((t1.steps, t2.steps), (0, 0));
        assert!(r1.is_empty() && r2.is_empty());

        let (t3, r3) = record(&mut s, 0.004);
        assert_eq!(t3.steps, 1);
        assert_eq!(r3, [0.01]);
        assert!((s.leftover() - 0.002).abs() < 1e-12);
        assert_eq!(s.state(), SchedulerState::Normal);
    }

    #[test]
    fn large_delta_runs_several_fixed_steps() {
        let mut s = FixedStepScheduler::new(0.01, 5.0);
        let (tick, runs) = record(&mut s, 0.035);
        assert_eq!(tick.steps, 3);
        assert!(runs.iter().all(|&dt| dt == 0.01));
        assert!((s.leftover() - 0.005).abs() < 1e-9);
    }

    #[test]
    fn runaway_degrades_permanently() {
        let mut s = FixedStepScheduler::new(0.01, 5.0);
        let (tick, runs) = record(&mut s, 6.0);
        assert!(tick.runaway);
        assert_eq!(runs, [6.0]);
        assert!(s.is_degraded());
        assert_eq!(s.leftover(), 0.0);

        for e in [0.016, 0.5, 0.001] {
            let (tick, runs) = record(&mut s, e);
            assert!(!tick.runaway);
            assert_eq!(runs, [e]);
        }
        assert!(s.is_degraded());
    }

    #[test]
    fn runaway_includes_previous_leftover() {
        let mut s = FixedStepScheduler::new(0.01, 5.0);
        let _ = s.step(0.004, |_| {});
        let (_, runs) = record(&mut s, 6.0);
        assert_eq!(runs.len(), 1);
        assert!((runs[0] - 6.004).abs() < 1e-12);
    }

    #[test]
    fn delta_at_threshold_is_not_a_runaway() {
        let mut s = FixedStepScheduler::new(1.0, 5.0);
        let (tick, runs) = record(&mut s, 5.0);
        assert!(!tick.runaway);
        assert_eq!(runs.len(), 5);
        assert!(!s.is_degraded());
    }

    #[test]
    fn invalid_deltas_are_ignored() {
        let mut s = FixedStepScheduler::new(0.01, 5.0);
        for e in [-1.0, f64::NAN, f64::INFINITY] {
            let (tick, runs) = record(&mut s, e);
            assert_eq!(tick.steps, 0);
            assert!(runs.is_empty());
        }
        assert_eq!(s.leftover(), 0.0);
        assert!(!s.is_degraded());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn simulated_time_is_conserved(
                deltas in proptest::collection::vec(0.0f64..0.1, 0..200),
            ) {
                let dt = 0.01;
                let mut s = FixedStepScheduler::new(dt, 5.0);
                let mut simulated = 0.0;
                for &e in &deltas {
                    let mut runs = Vec::new();
                    let tick = s.step(e, |step| runs.push(step));
                    prop_assert!(runs.iter().all(|&step| step == dt));
                    simulated += tick.simulated;
                    prop_assert!(s.leftover() >= 0.0);
                    prop_assert!(s.leftover() < dt);
                }
                let total: f64 = deltas.iter().sum();
                prop_assert!((simulated + s.leftover() - total).abs() < 1e-9);
            }
        }
    }
}
