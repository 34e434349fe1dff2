use super::error::SignalError;
use super::model::amplitude;

/// Control values for one recompute, plus the fixed buffer length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingConfig {
    pub input_frequency: f64,
    pub sample_rate: f64,
    pub sample_count: usize,
}

impl SamplingConfig {
    pub fn new(input_frequency: f64, sample_rate: f64, sample_count: usize) -> Result<Self, SignalError> {
        if !input_frequency.is_finite() || input_frequency < 0.0 {
            return Err(SignalError::InvalidFrequency(input_frequency));
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SignalError::InvalidSampleRate(sample_rate));
        }
        if sample_count < 4 || !sample_count.is_power_of_two() {
            return Err(SignalError::InvalidSampleCount(sample_count));
        }
        Ok(Self {
            input_frequency,
            sample_rate,
            sample_count,
        })
    }

    pub fn nyquist(&self) -> f64 {
        self.sample_rate * 0.5
    }

    pub fn is_aliased(&self) -> bool {
        self.input_frequency > self.nyquist()
    }
}

/// Discrete samples of the input sine; index `i` is time `i / sample_rate`.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    values: Vec<f64>,
    sample_rate: f64,
}

impl SampleBuffer {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn time_of(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate
    }

    /// `(time, amplitude)` pairs for point drawing.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.time_of(i), v))
    }
}

/// Sample the input sine (phase 0) at `config.sample_rate`.
pub fn sample(config: &SamplingConfig) -> SampleBuffer {
    let values = (0..config.sample_count)
        .map(|i| amplitude(i as f64 / config.sample_rate, config.input_frequency, 0.0))
        .collect();

    SampleBuffer {
        values,
        sample_rate: config.sample_rate,
    }
}
