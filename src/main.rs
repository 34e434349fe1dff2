mod cli;
mod config;
mod encode;
mod render;
mod report;
mod signal;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cli::Cli;
use encode::ffmpeg::{is_image_output, EncodeSettings, FfmpegEncoder};
use render::scene::{Scene, Viewport};
use render::text::{load_font_from_url, TextOverlay};
use report::Report;
use signal::pipeline::{recompute_all, sweep_snapshots};
use signal::rate::RateMapper;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    let cfg = match config::find_config(cli.config.as_deref()) {
        Some(path) => match config::load_config(&path) {
            Some(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            None => {
                log::warn!("Failed to load config from {}", path.display());
                config::Config::default()
            }
        },
        None => config::Config::default(),
    };

    // Config values apply only when the CLI is at its default
    if cli.sample_count == 1024 { cli.sample_count = cfg.sampling.sample_count; }
    if cli.width == 1000 { cli.width = cfg.display.width; }
    if cli.height == 600 { cli.height = cfg.display.height; }
    if cli.display_ratio == 20_000.0 { cli.display_ratio = cfg.display.display_ratio; }
    if cli.font_size == 20.0 { cli.font_size = cfg.display.font_size; }
    if cli.fps == 30 { cli.fps = cfg.output.fps; }
    if cli.crf == 18 { cli.crf = cfg.output.crf; }
    if cli.codec == "libx264" { cli.codec = cfg.output.codec.clone(); }
    if cli.font.is_none() { cli.font = cfg.output.font.clone(); }
    if cli.font_url.is_none() { cli.font_url = cfg.output.font_url.clone(); }

    let mapper = RateMapper::new(
        cfg.sampling.control_max,
        cfg.sampling.rate_min,
        cfg.sampling.rate_max,
    )
    .context("Invalid [sampling] rate range")?;

    let sample_rate = match (cli.sample_rate, cli.rate_control) {
        (Some(rate), _) => rate,
        (None, Some(control)) => {
            let clamped = control.clamp(0.0, mapper.control_max());
            if clamped != control {
                log::warn!(
                    "Rate control {} clamped to {} (range 0-{})",
                    control, clamped, mapper.control_max()
                );
            }
            log::debug!(
                "Control {:.1} of {:.0} -> rate in {:.0}-{:.0} Hz",
                clamped, mapper.control_max(), mapper.rate_min(), mapper.rate_max()
            );
            mapper.sample_rate(clamped)
        }
        (None, None) => cfg.sampling.default_rate,
    };

    let total_frames = match (&cli.output, cli.sweep_to) {
        (Some(path), _) if is_image_output(path) => 1,
        (Some(_), _) => ((cli.duration * cli.fps as f64).ceil() as usize).max(1),
        (None, Some(_)) => ((cli.duration * cli.fps as f64).ceil() as usize).max(1),
        (None, None) => 1,
    };
    let end_freq = cli.sweep_to.unwrap_or(cli.freq);

    log::info!(
        "Input {:.1} Hz{}, sample rate {:.0} Hz, {} samples, {} frame(s)",
        cli.freq,
        cli.sweep_to.map(|f| format!(" -> {:.1} Hz", f)).unwrap_or_default(),
        sample_rate,
        cli.sample_count,
        total_frames
    );

    let snapshots = sweep_snapshots(cli.freq, end_freq, total_frames, sample_rate);
    let passes = recompute_all(&snapshots, cli.sample_count).context("Recompute failed")?;

    let reports: Vec<Report> = passes.iter().map(|p| Report::new(p, &mapper)).collect();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else if cli.output.is_none() {
        for report in &reports {
            println!("{}", report.line());
        }
    }

    let Some(output) = cli.output.as_ref() else {
        return Ok(());
    };

    let text_overlay = if cli.no_legend {
        None
    } else {
        let font_bytes = match cli.font_url.as_deref().map(load_font_from_url) {
            Some(Ok(bytes)) => Some(bytes),
            Some(Err(err)) => {
                log::warn!("Failed to load font from URL: {:#}", err);
                None
            }
            None => None,
        };
        match TextOverlay::new(cli.font_size, cli.font.as_deref(), font_bytes.as_deref()) {
            Ok(overlay) => Some(overlay),
            Err(err) => {
                log::warn!("Legend disabled: {:#}", err);
                None
            }
        }
    };

    let scene = Scene::new(
        Viewport::new(cli.width, cli.height, cli.display_ratio),
        text_overlay,
    );

    let settings = EncodeSettings {
        width: cli.width,
        height: cli.height,
        fps: cli.fps,
        codec: &cli.codec,
        pix_fmt: &cli.pix_fmt,
        crf: cli.crf,
        bitrate: cli.bitrate.as_deref(),
    };
    let mut encoder = FfmpegEncoder::new(output, &settings)?;

    let pb = ProgressBar::new(passes.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta} remaining)")
            .context("Invalid progress template")?
            .progress_chars("=>-"),
    );

    for (frame_idx, pass) in passes.iter().enumerate() {
        let canvas = scene.draw(pass);
        encoder.write_frame(canvas.pixels())?;
        pb.set_position(frame_idx as u64 + 1);
    }

    pb.finish_with_message("Rendering complete");

    log::info!("Finishing encoding...");
    encoder.finish()?;

    if let (Some(first), Some(last)) = (reports.first(), reports.last()) {
        log::info!("First frame: {}", first.line());
        if passes.len() > 1 {
            log::info!("Last frame:  {}", last.line());
        }
    }
    log::info!("Done! Output: {}", output.display());
    Ok(())
}
