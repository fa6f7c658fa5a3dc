//! Stall recovery: a frame far longer than the runaway threshold must
//! switch the scheduler to variable stepping instead of queueing
//! thousands of catch-up steps.

use std::time::{Duration, Instant};

use fluidic_core::{FieldSlot, GridSize};
use fluidic_cpu::{BundledSources, CpuDevice};
use fluidic_engine::{Fluid, FluidConfig, SchedulerState};

fn fluid() -> Fluid<CpuDevice> {
    let config = FluidConfig {
        num_iterations: 4,
        solve_size: GridSize::square(16),
        draw_size: GridSize::square(16),
        ..FluidConfig::default()
    };
    Fluid::new(CpuDevice::new(GridSize::square(16)), &BundledSources, config).unwrap()
}

#[test]
fn normal_frames_run_fixed_steps() {
    let mut f = fluid();
    let t0 = Instant::now();
    f.start(t0);
    let tick = f.tick(t0 + Duration::from_millis(35)).unwrap();
    assert_eq!(tick.steps, 3);
    assert!(!tick.runaway);
    assert_eq!(f.frames().total_frames(), 1);
    assert_eq!(f.scheduler().state(), SchedulerState::Normal);
}

#[test]
fn stall_degrades_once_and_stays_degraded() {
    let mut f = fluid();
    let _ = f.inject([0.5, 0.5], [1.0, 1.0, 1.0, 1.0]);
    let t0 = Instant::now();
    f.start(t0);

    let stall = t0 + Duration::from_secs(6);
    let tick = f.tick(stall).unwrap();
    assert!(tick.runaway);
    assert_eq!(tick.steps, 1);
    assert!(f.scheduler().is_degraded());

    let mut now = stall;
    for _ in 0..10 {
        now += Duration::from_millis(16);
        let tick = f.tick(now).unwrap();
        assert_eq!(tick.steps, 1);
        assert!(!tick.runaway);
    }
    assert!(f.scheduler().is_degraded());
    assert!(f
        .store()
        .get(FieldSlot::Velocity)
        .texels()
        .iter()
        .flatten()
        .all(|c| c.is_finite()));
}

#[test]
fn paused_speed_runs_nothing() {
    let mut f = fluid();
    f.set_speed_multiplier(0.0).unwrap();
    let t0 = Instant::now();
    f.start(t0);
    let tick = f.tick(t0 + Duration::from_millis(500)).unwrap();
    assert_eq!(tick.steps, 0);
    assert!(f.set_speed_multiplier(f64::NAN).is_err());
}

#[test]
fn stopped_fluid_ignores_ticks() {
    let mut f = fluid();
    let t0 = Instant::now();
    f.start(t0);
    f.stop();
    assert!(f.tick(t0 + Duration::from_secs(1)).is_none());
    assert_eq!(f.frames().total_frames(), 0);
}
