use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "aliasview",
    about = "Sample a sine wave, estimate its frequency from the spectrum, and render the alias"
)]
pub struct Cli {
    /// Input frequency in Hz (0 = silence)
    #[arg(short, long, default_value_t = 200.0)]
    pub freq: f64,

    /// Sample-rate control value, mapped exponentially onto the configured rate range
    #[arg(short = 'c', long, conflicts_with = "sample_rate")]
    pub rate_control: Option<f64>,

    /// Sample rate in Hz, bypassing the control mapping
    #[arg(short, long)]
    pub sample_rate: Option<f64>,

    /// Samples per analysis buffer (power of two)
    #[arg(long, default_value_t = 1024)]
    pub sample_count: usize,

    /// Sweep the input frequency up (or down) to this value over --duration
    #[arg(long)]
    pub sweep_to: Option<f64>,

    /// Sweep / video length in seconds
    #[arg(long, default_value_t = 10.0)]
    pub duration: f64,

    /// Render to a video or image file via ffmpeg (.mp4, .webm, .png, ...)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Config file (defaults to ./aliasview.toml, then the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Frame width in pixels
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Horizontal pixels per second of signal time
    #[arg(long, default_value_t = 20_000.0)]
    pub display_ratio: f64,

    /// Frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// H.264 CRF quality (0-51, lower = better). Ignored when --bitrate is set.
    #[arg(long, default_value_t = 18)]
    pub crf: u32,

    /// Video bitrate (e.g. 2400k, 5M). When set, uses -b:v instead of -crf.
    #[arg(short, long)]
    pub bitrate: Option<String>,

    /// FFmpeg video codec
    #[arg(long, default_value = "libx264")]
    pub codec: String,

    /// FFmpeg pixel format
    #[arg(long, default_value = "yuv420p")]
    pub pix_fmt: String,

    /// Legend font (TTF/OTF path)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Download the legend font from a URL
    #[arg(long)]
    pub font_url: Option<String>,

    /// Legend font size in pixels
    #[arg(long, default_value_t = 20.0)]
    pub font_size: f32,

    /// Render without the legend
    #[arg(long)]
    pub no_legend: bool,
}
