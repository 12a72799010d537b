/// Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::entities::Viewport;
use crate::spawner::DEFAULT_SPAWN_INTERVAL;

#[derive(Parser, Clone, Debug)]
#[command(name = "block_shooter")]
#[command(about = "Shoot the falling blocks before they reach you")]
pub struct Config {
    /// Viewport width in world units (default: follow the terminal)
    #[arg(long, requires = "height")]
    pub width: Option<f32>,

    /// Viewport height in world units (default: follow the terminal)
    #[arg(long, requires = "width")]
    pub height: Option<f32>,

    /// World units per terminal column
    #[arg(long, default_value_t = 10.0)]
    pub cell_width: f32,

    /// World units per terminal row
    #[arg(long, default_value_t = 20.0)]
    pub cell_height: f32,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Milliseconds between enemy spawns
    #[arg(
        long,
        default_value_t = DEFAULT_SPAWN_INTERVAL.as_millis() as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub spawn_interval_ms: u64,

    /// Seed for enemy placement (default: random)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs here; filtered by RUST_LOG (default level: info)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Number of frames that spans `window`, at least one.
    pub fn frames_in(&self, window: Duration) -> u64 {
        let frames = (window.as_nanos() * self.fps as u128).div_ceil(1_000_000_000);
        (frames as u64).max(1)
    }

    /// The viewport pinned by `--width/--height`, if any.
    pub fn fixed_viewport(&self) -> Option<Viewport> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(Viewport::new(width, height)),
            _ => None,
        }
    }

    /// The viewport for a terminal of `cols × rows` cells.
    pub fn viewport_for(&self, cols: u16, rows: u16) -> Viewport {
        self.fixed_viewport().unwrap_or_else(|| {
            Viewport::new(
                cols as f32 * self.cell_width,
                rows as f32 * self.cell_height,
            )
        })
    }
}
