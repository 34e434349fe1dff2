use serde::Serialize;

use super::spectrum::Spectrum;

/// Bins at or below this magnitude are treated as numerical noise.
pub const NOISE_FLOOR: f64 = 1e-10;

/// Dominant frequency recovered from a spectrum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FrequencyEstimate {
    pub hz: u32,
    pub bin: usize,
    /// Set when the estimate lacks interpolation support: silence, or a
    /// peak in the last bin.
    pub is_edge_case: bool,
}

impl FrequencyEstimate {
    /// Where a tone at `input` Hz lands after sampling at `rate` Hz.
    pub fn alias_of(input: f64, rate: f64) -> f64 {
        (input - rate * (input / rate).round()).abs()
    }
}

/// Locate the dominant peak of `spectrum` and refine it with parabolic
/// interpolation.
///
/// The DC bin never wins, but its magnitude seeds the running maximum, so a
/// tone must stand above the DC level to be detected. A peak in the last bin
/// has no right neighbour; `fallback_freq` is echoed back instead.
pub fn estimate(spectrum: &Spectrum, sample_rate: f64, fallback_freq: f64) -> FrequencyEstimate {
    let s = spectrum.magnitudes();
    let len = s.len();

    let mut maximum = s.first().copied().unwrap_or(0.0);
    let mut max_bin = 0;
    for (bin, &value) in s.iter().enumerate().skip(1) {
        if value.abs() > NOISE_FLOOR && value > maximum {
            maximum = value;
            max_bin = bin;
        }
    }

    if max_bin == 0 {
        return FrequencyEstimate {
            hz: 0,
            bin: 0,
            is_edge_case: true,
        };
    }

    if max_bin == len - 1 {
        return FrequencyEstimate {
            hz: fallback_freq.round() as u32,
            bin: max_bin,
            is_edge_case: true,
        };
    }

    let offset = parabolic_offset(s[max_bin - 1], s[max_bin], s[max_bin + 1]);
    let center = max_bin as f64 + offset;
    let hz = (sample_rate * center / (2 * len) as f64).round();

    log::trace!(
        "peak bin {} at {:.1} Hz ({:.3e}), offset {:+.4}, {} Hz",
        max_bin,
        spectrum.bin_hz(max_bin),
        maximum,
        offset,
        hz
    );

    FrequencyEstimate {
        hz: hz.max(0.0) as u32,
        bin: max_bin,
        is_edge_case: false,
    }
}

/// Vertex offset, in bins, of the parabola through three neighbouring
/// magnitudes. A flat top (zero curvature) yields no offset.
fn parabolic_offset(left: f64, center: f64, right: f64) -> f64 {
    let denominator = left - 2.0 * center + right;
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let offset = 0.5 * (left - right) / denominator;
    if offset.is_finite() {
        offset
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::sampler::{sample, SamplingConfig};
    use crate::signal::spectrum::analyze;

    fn estimate_tone(freq: f64, rate: f64) -> FrequencyEstimate {
        let config = SamplingConfig::new(freq, rate, 1024).unwrap();
        estimate(&analyze(&sample(&config)), rate, freq)
    }

    #[test]
    fn recovers_tone_below_nyquist() {
        let est = estimate_tone(100.0, 800.0);
        assert!((est.hz as i64 - 100).abs() <= 2, "got {}", est.hz);
        assert!(!est.is_edge_case);
        assert_eq!(est.bin, 128);
    }

    #[test]
    fn interpolates_between_bins() {
        // 101 Hz is 129.28 bins at 800 Hz / 1024; bin resolution alone
        // would read 100.78 Hz.
        let est = estimate_tone(101.0, 800.0);
        assert!((est.hz as i64 - 101).abs() <= 1, "got {}", est.hz);
        assert!(!est.is_edge_case);
    }

    #[test]
    fn tone_above_nyquist_reads_as_its_alias() {
        let expected = FrequencyEstimate::alias_of(500.0, 800.0);
        assert_eq!(expected, 300.0);
        let est = estimate_tone(500.0, 800.0);
        assert_eq!(est.hz, expected as u32);
        assert!(!est.is_edge_case);
    }

    #[test]
    fn alias_fold_formula() {
        assert_eq!(FrequencyEstimate::alias_of(100.0, 800.0), 100.0);
        assert_eq!(FrequencyEstimate::alias_of(450.0, 500.0), 50.0);
        assert_eq!(FrequencyEstimate::alias_of(900.0, 800.0), 100.0);
        assert_eq!(FrequencyEstimate::alias_of(800.0, 800.0), 0.0);
    }

    #[test]
    fn silence_is_edge_case() {
        let spectrum = Spectrum::from_magnitudes(vec![0.0; 512], 800.0);
        let est = estimate(&spectrum, 800.0, 123.0);
        assert_eq!(
            est,
            FrequencyEstimate {
                hz: 0,
                bin: 0,
                is_edge_case: true
            }
        );
        assert_eq!(estimate_tone(0.0, 800.0).hz, 0);
        assert!(estimate_tone(0.0, 800.0).is_edge_case);
    }

    #[test]
    fn sub_noise_floor_is_silence() {
        let spectrum = Spectrum::from_magnitudes(vec![0.0, 1e-12, 5e-11, 1e-11], 800.0);
        let est = estimate(&spectrum, 800.0, 99.0);
        assert_eq!(est.hz, 0);
        assert!(est.is_edge_case);
    }

    #[test]
    fn peak_must_exceed_dc() {
        let spectrum = Spectrum::from_magnitudes(vec![10.0, 1.0, 5.0, 1.0], 800.0);
        let est = estimate(&spectrum, 800.0, 42.0);
        assert_eq!(est.bin, 0);
        assert!(est.is_edge_case);
    }

    #[test]
    fn last_bin_peak_falls_back_to_input() {
        let spectrum = Spectrum::from_magnitudes(vec![0.0, 0.1, 0.2, 0.5, 9.0], 800.0);
        let est = estimate(&spectrum, 800.0, 397.4);
        assert_eq!(
            est,
            FrequencyEstimate {
                hz: 397,
                bin: 4,
                is_edge_case: true
            }
        );
    }

    #[test]
    fn symmetric_neighbours_stay_on_bin() {
        // 8 bins at 1600 Hz: 100 Hz per bin
        let spectrum = Spectrum::from_magnitudes(vec![0.0, 0.0, 1.0, 4.0, 1.0, 0.0, 0.0, 0.0], 1600.0);
        let est = estimate(&spectrum, 1600.0, 0.0);
        assert_eq!(est.bin, 3);
        assert_eq!(est.hz, 300);
    }

    #[test]
    fn skewed_neighbours_shift_estimate() {
        // left 1, peak 4, right 3: offset = 0.5 * (1 - 3) / (1 - 8 + 3) = 0.25 bins
        let spectrum = Spectrum::from_magnitudes(vec![0.0, 0.0, 1.0, 4.0, 3.0, 0.0, 0.0, 0.0], 1600.0);
        let est = estimate(&spectrum, 1600.0, 0.0);
        assert_eq!(est.hz, 325);
    }

    #[test]
    fn flat_top_skips_interpolation() {
        assert_eq!(parabolic_offset(2.0, 2.0, 2.0), 0.0);
        assert_eq!(parabolic_offset(1.0, 2.0, 3.0), 0.0);
        assert_eq!(parabolic_offset(f64::INFINITY, 1.0, 0.0), 0.0);
        assert_eq!(parabolic_offset(1.0, 4.0, 3.0), 0.25);
    }
}
