use rustfft::{num_complex::Complex, FftPlanner};

use super::sampler::SampleBuffer;

/// One-sided magnitude spectrum of a sample buffer.
///
/// Holds `N / 2` bins for an `N`-sample buffer, scaled `2·|X[k]| / N` so a
/// full-scale sine reads back at its own amplitude. Bin `k` sits at
/// `k · sample_rate / N` Hz.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    magnitudes: Vec<f64>,
    sample_rate: f64,
}

impl Spectrum {
    /// Wrap precomputed one-sided magnitudes for a buffer sampled at
    /// `sample_rate`.
    pub fn from_magnitudes(magnitudes: Vec<f64>, sample_rate: f64) -> Self {
        Self {
            magnitudes,
            sample_rate,
        }
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// Width of one bin in Hz.
    pub fn resolution(&self) -> f64 {
        self.sample_rate / (2 * self.magnitudes.len()) as f64
    }

    pub fn bin_hz(&self, bin: usize) -> f64 {
        bin as f64 * self.resolution()
    }
}

/// Forward FFT of `buffer` (rectangular window).
pub fn analyze(buffer: &SampleBuffer) -> Spectrum {
    let n = buffer.len();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    let mut bins: Vec<Complex<f64>> = buffer
        .values()
        .iter()
        .map(|&s| Complex::new(s, 0.0))
        .collect();
    fft.process(&mut bins);

    let scale = 2.0 / n as f64;
    let magnitudes = bins[..n / 2].iter().map(|c| c.norm() * scale).collect();

    Spectrum::from_magnitudes(magnitudes, buffer.sample_rate())
}
