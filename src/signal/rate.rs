use super::error::SignalError;

/// Exponential control-value → sample-rate curve.
///
/// Equal steps of the control multiply the rate by the same factor, which
/// keeps the low end of the range (where aliasing is most visible) usable on
/// a bounded slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateMapper {
    control_max: f64,
    rate_min: f64,
    rate_max: f64,
}

impl RateMapper {
    pub fn new(control_max: f64, rate_min: f64, rate_max: f64) -> Result<Self, SignalError> {
        if !control_max.is_finite() || control_max <= 0.0 {
            return Err(SignalError::InvalidControlMax(control_max));
        }
        if !rate_min.is_finite() || !rate_max.is_finite() || rate_min <= 0.0 || rate_max <= rate_min {
            return Err(SignalError::InvalidRateRange {
                min: rate_min,
                max: rate_max,
            });
        }
        Ok(Self {
            control_max,
            rate_min,
            rate_max,
        })
    }

    pub fn control_max(&self) -> f64 {
        self.control_max
    }

    pub fn rate_min(&self) -> f64 {
        self.rate_min
    }

    pub fn rate_max(&self) -> f64 {
        self.rate_max
    }

    /// Sample rate in whole Hz. The caller clamps `control_value` to
    /// `[0, control_max]`.
    pub fn sample_rate(&self, control_value: f64) -> f64 {
        let ratio = self.rate_max / self.rate_min;
        (self.rate_min * ratio.powf(control_value / self.control_max)).floor()
    }

    /// Control value that maps to `rate`.
    pub fn control_for(&self, rate: f64) -> f64 {
        self.control_max * (rate / self.rate_min).ln() / (self.rate_max / self.rate_min).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> RateMapper {
        RateMapper::new(1000.0, 100.0, 2000.0).unwrap()
    }

    #[test]
    fn endpoints_hit_range_limits() {
        let m = mapper();
        assert_eq!(m.sample_rate(0.0), 100.0);
        assert_eq!(m.sample_rate(1000.0), 2000.0);
    }

    #[test]
    fn endpoints_within_rounding_for_inexact_ratio() {
        let m = RateMapper::new(100.0, 500.0, 800.0).unwrap();
        assert_eq!(m.sample_rate(0.0), 500.0);
        assert!((m.sample_rate(100.0) - 800.0).abs() <= 1.0);
    }

    #[test]
    fn monotonically_increasing() {
        let m = mapper();
        let mut prev = m.sample_rate(0.0);
        for step in 1..=1000 {
            let rate = m.sample_rate(step as f64);
            assert!(rate >= prev, "rate dropped at control {}", step);
            prev = rate;
        }
        assert!(m.sample_rate(500.0) > m.sample_rate(0.0));
    }

    #[test]
    fn equal_steps_multiply_rate() {
        let m = mapper();
        // Midpoint of an exponential curve is the geometric mean.
        let mid = m.sample_rate(500.0);
        let geometric = (100.0f64 * 2000.0).sqrt();
        assert!((mid - geometric).abs() <= 1.0);
    }

    #[test]
    fn control_for_inverts_mapping() {
        let m = mapper();
        assert!((m.control_for(100.0)).abs() < 1e-9);
        assert!((m.control_for(2000.0) - 1000.0).abs() < 1e-9);
        let c = m.control_for(800.0);
        assert!((m.sample_rate(c + 1e-6) - 800.0).abs() <= 1.0);
    }

    #[test]
    fn rejects_bad_ranges() {
        assert!(matches!(
            RateMapper::new(1000.0, 0.0, 800.0),
            Err(SignalError::InvalidRateRange { .. })
        ));
        assert!(matches!(
            RateMapper::new(1000.0, 800.0, 500.0),
            Err(SignalError::InvalidRateRange { .. })
        ));
        assert_eq!(
            RateMapper::new(0.0, 100.0, 800.0),
            Err(SignalError::InvalidControlMax(0.0))
        );
    }
}
