//! The user-facing simulation: construction, driving, injection, drawing.

use std::error::Error;
use std::fmt;
use std::time::Instant;

use fluidic_arena::{FieldStore, StoreError};
use fluidic_core::{Device, FieldSlot, LoadError, SourceResolver, Target};
use fluidic_kernel::{BindReport, Bindings, KernelLoader, Program, SolveStep};

use crate::config::{ConfigError, FluidConfig};
use crate::metrics::FrameCounter;
use crate::pipeline::FluidStepPipeline;
use crate::scheduler::{FixedStepScheduler, SchedulerTick};

// ── InitError ──────────────────────────────────────────────────────

/// Errors from [`Fluid::new`]. Nothing is left half-initialised.
#[derive(Debug)]
pub enum InitError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The device lacks a required capability. Checked before any
    /// buffer is allocated.
    UnsupportedDevice {
        /// Name of the missing capability.
        capability: String,
    },
    /// Field storage could not be built.
    Store(StoreError),
    /// A kernel failed to load.
    Load(LoadError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::UnsupportedDevice { capability } => {
                write!(f, "device does not support {capability}")
            }
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Load(e) => write!(f, "load: {e}"),
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::UnsupportedDevice { .. } => None,
        }
    }
}

impl From<ConfigError> for InitError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StoreError> for InitError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<LoadError> for InitError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

// ── Fluid ──────────────────────────────────────────────────────────

/// A running fluid simulation on one device.
///
/// Single-threaded and cooperative: an external periodic driver calls
/// [`tick`](Self::tick) while running, or [`advance`](Self::advance)
/// directly when it keeps its own clock. A tick always completes every
/// pipeline stage before returning.
pub struct Fluid<D: Device> {
    device: D,
    store: FieldStore<D::Buffer>,
    pipeline: FluidStepPipeline<D::Kernel>,
    inject: SolveStep<D::Kernel>,
    draw: SolveStep<D::Kernel>,
    debug_draw: Program<D::Kernel>,
    scheduler: FixedStepScheduler,
    frames: FrameCounter,
    config: FluidConfig,
    last_tick: Option<Instant>,
}

impl<D: Device> Fluid<D> {
    /// Validate `config`, check the device, allocate every field, and
    /// load every kernel from `resolver`.
    pub fn new<R>(mut device: D, resolver: &R, config: FluidConfig) -> Result<Self, InitError>
    where
        R: SourceResolver + ?Sized,
    {
        config.validate()?;
        if !device.supports_float_buffers() {
            return Err(InitError::UnsupportedDevice {
                capability: "float buffers".into(),
            });
        }

        let store = FieldStore::new(&mut device, &config.store_config())?;
        let loader = KernelLoader::new(resolver);
        let pipeline = FluidStepPipeline::load(&mut device, &loader, &config)?;
        let inject = loader.solve_step(&mut device, "inject", &[])?;
        let draw = loader.solve_step(&mut device, "draw", &[])?;
        let debug_draw = loader.program(&mut device, "debug-draw", &[])?;

        log::info!(
            "fluid ready: solve {}, draw {}, {} stages",
            config.solve_size,
            config.draw_size,
            pipeline.stages().len()
        );

        Ok(Self {
            device,
            store,
            pipeline,
            inject,
            draw,
            debug_draw,
            scheduler: FixedStepScheduler::new(config.dt, config.runaway_threshold),
            frames: FrameCounter::new(),
            config,
            last_tick: None,
        })
    }

    /// Begin accepting ticks; `now` is the reference time for the first
    /// frame delta.
    pub fn start(&mut self, now: Instant) {
        if self.last_tick.is_none() {
            log::info!("fluid started");
        }
        self.last_tick = Some(now);
    }

    /// Stop accepting ticks. The current state is kept.
    pub fn stop(&mut self) {
        if self.last_tick.take().is_some() {
            log::info!("fluid stopped");
        }
    }

    /// Whether ticks are being accepted.
    pub fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Periodic driver callback.
    ///
    /// Measures the wall time since the previous tick, records it, feeds
    /// it (scaled by the speed multiplier) to the scheduler, and redraws.
    /// Returns `None` while stopped. Skipped bindings of the redraw count
    /// toward [`SchedulerTick::skipped`].
    pub fn tick(&mut self, now: Instant) -> Option<SchedulerTick> {
        let last = self.last_tick?;
        self.last_tick = Some(now);
        let elapsed = now.saturating_duration_since(last).as_secs_f64();
        self.frames.notify_frame(elapsed);
        let mut tick = self.advance(elapsed * self.config.speed_multiplier);
        tick.skipped += self.draw().warnings.len();
        Some(tick)
    }

    /// Feed `elapsed` simulated seconds to the scheduler, running the
    /// pipeline as many times as it asks.
    ///
    /// The returned tick carries the bindings skipped across every step.
    pub fn advance(&mut self, elapsed: f64) -> SchedulerTick {
        let Self {
            device,
            store,
            pipeline,
            scheduler,
            ..
        } = self;
        let mut skipped = 0;
        let mut tick = scheduler.step(elapsed, |dt| {
            skipped += pipeline.step(&mut *device, &mut *store, dt).skipped;
        });
        tick.skipped = skipped;
        tick
    }

    /// Add a localised splat of `color` to the dye field around
    /// `position` (normalised, `[0, 1]²`). Redraws when stopped.
    pub fn inject(&mut self, position: [f32; 2], color: [f32; 4]) -> BindReport {
        let bindings = Bindings::new()
            .field("field", FieldSlot::Dye)
            .vec2("position", position)
            .vec4("color", color)
            .float("radius", self.config.draw_radius);
        let report = self
            .inject
            .go(&mut self.device, &mut self.store, &bindings, FieldSlot::Dye);
        self.redraw_if_stopped();
        report
    }

    /// Replace the dye field with `image`, resampled to the draw grid.
    /// Redraws when stopped.
    pub fn load_image_as_dye(&mut self, image: &D::Buffer) -> BindReport {
        let bindings = Bindings::new().buffer("field", image);
        let report = self
            .draw
            .go(&mut self.device, &mut self.store, &bindings, FieldSlot::Dye);
        self.redraw_if_stopped();
        report
    }

    /// Render the dye field to the presentation surface.
    pub fn draw(&mut self) -> BindReport {
        let bindings = Bindings::new().field("field", FieldSlot::Dye);
        self.draw.program().execute(
            &mut self.device,
            self.store.reader(),
            &bindings,
            Target::Surface,
        )
    }

    /// Render any field to the presentation surface with the debug
    /// colour mapping.
    pub fn draw_field(&mut self, slot: FieldSlot) -> BindReport {
        let bindings = Bindings::new().field("field", slot);
        self.debug_draw.execute(
            &mut self.device,
            self.store.reader(),
            &bindings,
            Target::Surface,
        )
    }

    /// Change the wall-clock to simulated-time ratio.
    pub fn set_speed_multiplier(&mut self, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidSpeedMultiplier { value });
        }
        self.config.speed_multiplier = value;
        Ok(())
    }

    /// The active configuration.
    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// The field store.
    pub fn store(&self) -> &FieldStore<D::Buffer> {
        &self.store
    }

    /// The device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Mutable access to the device, e.g. to create image buffers.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// The physics pipeline.
    pub fn pipeline(&self) -> &FluidStepPipeline<D::Kernel> {
        &self.pipeline
    }

    /// The timestep scheduler.
    pub fn scheduler(&self) -> &FixedStepScheduler {
        &self.scheduler
    }

    /// Frame-rate metrics.
    pub fn frames(&self) -> &FrameCounter {
        &self.frames
    }

    fn redraw_if_stopped(&mut self) {
        if !self.is_running() {
            let _ = self.draw();
        }
    }
}
