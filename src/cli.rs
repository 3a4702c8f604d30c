use clap::{Parser, ValueEnum};
use log::LevelFilter;
use sphere_tracer::config::{self, RenderConfig};

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Drives the interactive loop without a window: scripted camera input,
/// a fixed number of frames, and the last frame written to disk.
#[derive(Parser, Debug)]
#[command(name = "sphere-tracer")]
#[command(about = "Real-time CPU ray tracer for spheres")]
pub struct Args {
    /// Window width in pixels
    #[arg(long, default_value_t = config::DEFAULT_WIDTH)]
    pub width: usize,

    /// Window height in pixels
    #[arg(long, default_value_t = config::DEFAULT_HEIGHT)]
    pub height: usize,

    /// Render resolution relative to the window
    #[arg(long, default_value_t = config::RENDER_SCALE)]
    pub scale: f64,

    /// Worker threads (defaults to the hardware concurrency)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Number of frames to render
    #[arg(short, long, default_value_t = 120)]
    pub frames: usize,

    /// Scene preset: 0 = three spheres, 1 = random field
    #[arg(long, default_value_t = 0)]
    pub scene: usize,

    /// Where to save the last frame
    #[arg(short, long, default_value = "output/frame.png")]
    pub output: String,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        let mut render = RenderConfig {
            render_scale: self.scale,
            ..RenderConfig::default()
        };
        if let Some(threads) = self.threads {
            render.threads = threads;
        }
        render
    }
}

pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
