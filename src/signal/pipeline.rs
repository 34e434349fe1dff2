use rayon::prelude::*;

use super::error::SignalError;
use super::estimate::{estimate, FrequencyEstimate};
use super::model::Sine;
use super::reconstruct::reconstruct;
use super::sampler::{sample, SampleBuffer, SamplingConfig};
use super::spectrum::{analyze, Spectrum};

/// Control values captured at the start of a recompute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub input_frequency: f64,
    pub sample_rate: f64,
}

/// Everything one recompute produces for the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Pass {
    pub config: SamplingConfig,
    pub input: Sine,
    pub samples: SampleBuffer,
    pub spectrum: Spectrum,
    pub estimate: FrequencyEstimate,
    pub reconstruction: Sine,
}

/// Sample, transform, estimate and reconstruct for one snapshot.
pub fn recompute(snapshot: &Snapshot, sample_count: usize) -> Result<Pass, SignalError> {
    let config = SamplingConfig::new(snapshot.input_frequency, snapshot.sample_rate, sample_count)?;

    let samples = sample(&config);
    let spectrum = analyze(&samples);
    let estimate = estimate(&spectrum, config.sample_rate, config.input_frequency);
    let reconstruction = reconstruct(&estimate, config.input_frequency, config.sample_rate);

    log::debug!(
        "input {:.1} Hz @ {:.0} Hz -> {} Hz (bin {}{})",
        config.input_frequency,
        config.sample_rate,
        estimate.hz,
        estimate.bin,
        if estimate.is_edge_case { ", edge case" } else { "" }
    );

    Ok(Pass {
        input: Sine::new(config.input_frequency, 0.0),
        config,
        samples,
        spectrum,
        estimate,
        reconstruction,
    })
}

/// Snapshots for a linear input-frequency ramp over `frames` frames.
pub fn sweep_snapshots(start_freq: f64, end_freq: f64, frames: usize, sample_rate: f64) -> Vec<Snapshot> {
    let span = frames.saturating_sub(1).max(1) as f64;
    (0..frames)
        .map(|i| Snapshot {
            input_frequency: start_freq + (end_freq - start_freq) * i as f64 / span,
            sample_rate,
        })
        .collect()
}

/// Recompute every snapshot independently, in parallel, preserving order.
pub fn recompute_all(snapshots: &[Snapshot], sample_count: usize) -> Result<Vec<Pass>, SignalError> {
    snapshots
        .par_iter()
        .map(|snapshot| recompute(snapshot, sample_count))
        .collect()
}
