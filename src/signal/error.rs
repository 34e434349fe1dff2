use thiserror::Error;

/// Invalid inputs to the numeric core. Degenerate spectra are not errors;
/// they come back as edge-case estimates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    #[error("input frequency must be finite and non-negative, got {0}")]
    InvalidFrequency(f64),
    #[error("sample rate must be finite and positive, got {0}")]
    InvalidSampleRate(f64),
    #[error("sample count must be a power of two and at least 4, got {0}")]
    InvalidSampleCount(usize),
    #[error("rate range must satisfy 0 < min < max, got {min}..{max}")]
    InvalidRateRange { min: f64, max: f64 },
    #[error("control maximum must be finite and positive, got {0}")]
    InvalidControlMax(f64),
}
