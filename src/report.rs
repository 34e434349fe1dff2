use serde::Serialize;

use crate::signal::estimate::FrequencyEstimate;
use crate::signal::pipeline::Pass;
use crate::signal::rate::RateMapper;

/// Per-pass numbers shown to the user.
#[derive(Debug, Serialize)]
pub struct Report {
    pub input_hz: f64,
    pub sample_rate: f64,
    pub rate_control: f64,
    pub nyquist_hz: f64,
    pub bins: usize,
    pub bin_resolution_hz: f64,
    pub aliased: bool,
    /// Theoretical fold of the input around the sample rate.
    pub expected_alias_hz: f64,
    pub estimate: FrequencyEstimate,
    pub reconstruction_phase: f64,
}

impl Report {
    pub fn new(pass: &Pass, mapper: &RateMapper) -> Self {
        let config = &pass.config;
        Self {
            input_hz: config.input_frequency,
            sample_rate: config.sample_rate,
            rate_control: mapper.control_for(config.sample_rate),
            nyquist_hz: config.nyquist(),
            bins: pass.spectrum.len(),
            bin_resolution_hz: pass.spectrum.resolution(),
            aliased: config.is_aliased(),
            expected_alias_hz: FrequencyEstimate::alias_of(config.input_frequency, config.sample_rate),
            estimate: pass.estimate,
            reconstruction_phase: pass.reconstruction.phase,
        }
    }

    pub fn line(&self) -> String {
        let mut line = format!(
            "input {:>7.1} Hz  rate {:>6.0} Hz (control {:>6.1})  estimate {:>5} Hz  expected {:>6.1} Hz  phase {:.3}",
            self.input_hz,
            self.sample_rate,
            self.rate_control,
            self.estimate.hz,
            self.expected_alias_hz,
            self.reconstruction_phase,
        );
        if self.estimate.is_edge_case {
            line.push_str("  [edge case]");
        } else if self.aliased {
            line.push_str("  [aliased]");
        }
        line
    }
}
