use std::time::Duration;

use clap::Parser;

/// air-canvas - draw in the air with your index finger
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "air-canvas")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Camera device index
    #[arg(long, default_value_t = 0)]
    pub camera: u32,

    /// Capture width requested from the camera
    #[arg(long, default_value_t = 1280)]
    pub capture_width: u32,

    /// Capture height requested from the camera
    #[arg(long, default_value_t = 720)]
    pub capture_height: u32,

    /// Show the camera unflipped instead of as a mirror
    #[arg(long)]
    pub no_mirror: bool,

    /// Command that reads a PNG snapshot of the canvas (path appended) and prints a result
    #[arg(long)]
    pub recognizer: Option<String>,

    /// Submit the canvas to the recognizer at most once per this many frames
    #[arg(long, default_value_t = 30)]
    pub recognize_every: u32,

    /// Kill a recognizer run that takes longer than this many milliseconds
    #[arg(long, default_value_t = 2000)]
    pub recognize_timeout_ms: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn mirror(&self) -> bool {
        !self.no_mirror
    }

    pub fn recognize_timeout(&self) -> Duration {
        Duration::from_millis(self.recognize_timeout_ms)
    }
}

/// Start logging. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
}
