use std::f64::consts::PI;

use super::estimate::FrequencyEstimate;
use super::model::Sine;

/// Phase that lines the reconstruction up with the sample points.
///
/// Each Nyquist zone the input has crossed flips the folded alias by π. An
/// exact recovery of the input needs no correction.
pub fn reconstruction_phase(estimate: &FrequencyEstimate, input_freq: f64, sample_rate: f64) -> f64 {
    if f64::from(estimate.hz) == input_freq {
        return 0.0;
    }
    (input_freq / (0.5 * sample_rate)).floor() * PI
}

/// Continuous wave drawn from the estimated frequency.
pub fn reconstruct(estimate: &FrequencyEstimate, input_freq: f64, sample_rate: f64) -> Sine {
    Sine::new(
        f64::from(estimate.hz),
        reconstruction_phase(estimate, input_freq, sample_rate),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn est(hz: u32) -> FrequencyEstimate {
        FrequencyEstimate {
            hz,
            bin: 0,
            is_edge_case: false,
        }
    }

    #[test]
    fn exact_recovery_has_zero_phase() {
        assert_eq!(reconstruction_phase(&est(100), 100.0, 800.0), 0.0);
        // Equality wins even past Nyquist.
        assert_eq!(reconstruction_phase(&est(450), 450.0, 500.0), 0.0);
    }

    #[test]
    fn below_nyquist_zone_is_zero_phase() {
        // floor(100 / 400) = 0, even without the equality shortcut
        assert_eq!(reconstruction_phase(&est(99), 100.0, 800.0), 0.0);
    }

    #[test]
    fn first_fold_flips_by_pi() {
        // floor(450 / 250) = 1
        assert_eq!(reconstruction_phase(&est(50), 450.0, 500.0), PI);
    }

    #[test]
    fn second_fold_is_two_pi() {
        // floor(900 / 400) = 2
        assert_eq!(reconstruction_phase(&est(100), 900.0, 800.0), 2.0 * PI);
    }

    #[test]
    fn reconstruct_carries_estimate_and_phase() {
        let sine = reconstruct(&est(300), 500.0, 800.0);
        assert_eq!(sine, Sine::new(300.0, PI));
    }

    #[test]
    fn inverted_alias_matches_samples() {
        // 500 Hz at 800 Hz samples identically to -sin(300 Hz); the π flip
        // puts the reconstruction through the sample points.
        let sine = reconstruct(&est(300), 500.0, 800.0);
        let input = Sine::new(500.0, 0.0);
        for i in 0..16 {
            let t = i as f64 / 800.0;
            assert!((sine.at(t) - input.at(t)).abs() < 1e-9);
        }
    }
}
