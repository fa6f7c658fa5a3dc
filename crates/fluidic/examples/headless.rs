//! Run the fluid headless on the CPU device and print the dye as ASCII.
//!
//! ```text
//! RUST_LOG=info cargo run --example headless
//! ```

use std::time::{Duration, Instant};

use fluidic::prelude::*;

const SIZE: u32 = 48;
const FRAMES: u32 = 120;
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<(), InitError> {
    env_logger::init();

    let config = FluidConfig {
        solve_size: GridSize::square(SIZE),
        draw_size: GridSize::square(SIZE),
        draw_radius: 0.08,
        ..FluidConfig::default()
    };
    let mut fluid = Fluid::new(CpuDevice::new(config.draw_size), &BundledSources, config)?;

    let start = Instant::now();
    fluid.start(start);
    let mut now = start;
    for frame in 0..FRAMES {
        if frame % 10 == 0 {
            let x = 0.3 + 0.4 * (frame as f32 / FRAMES as f32);
            let report = fluid.inject([x, 0.2], [0.9, 0.6, 0.2, 1.0]);
            if !report.is_clean() {
                log::warn!("inject skipped {} bindings", report.warnings.len());
            }
        }
        now += FRAME;
        let _ = fluid.tick(now);
    }
    fluid.stop();

    if let Some(fps) = fluid.frames().average_fps() {
        log::info!("{} frames at {fps:.1} simulated fps", fluid.frames().total_frames());
    }
    print!("{}", ascii(fluid.device().surface()));
    Ok(())
}

/// Brightness ramp, top row first.
fn ascii(surface: &Texture) -> String {
    const RAMP: &[u8] = b" .:-=+*#%@";
    let size = surface.size();
    let mut out = String::new();
    for y in (0..size.height as i64).rev() {
        for x in 0..size.width as i64 {
            let [r, g, b, _] = surface.fetch(x, y);
            let lum = (0.3 * r + 0.59 * g + 0.11 * b).clamp(0.0, 1.0);
            let i = (lum * (RAMP.len() - 1) as f32).round() as usize;
            out.push(RAMP[i] as char);
        }
        out.push('\n');
    }
    out
}
