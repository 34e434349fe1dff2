use std::f64::consts::PI;

/// Peak amplitude of every drawn wave, in display units (pixels).
/// Input and reconstruction share it so their heights are comparable.
pub const DISPLAY_AMPLITUDE: f64 = 180.0;

/// Ideal sine amplitude at time `t` seconds.
///
/// A zero frequency is silence: the result is `0.0` for every `t`, whatever
/// the phase.
pub fn amplitude(t: f64, freq: f64, phase: f64) -> f64 {
    if freq == 0.0 {
        return 0.0;
    }
    DISPLAY_AMPLITUDE * (2.0 * PI * t * freq + phase).sin()
}

/// A sine with fixed frequency and phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sine {
    pub freq: f64,
    pub phase: f64,
}

impl Sine {
    pub fn new(freq: f64, phase: f64) -> Self {
        Self { freq, phase }
    }

    pub fn at(&self, t: f64) -> f64 {
        amplitude(t, self.freq, self.phase)
    }

    /// `(t, amplitude)` points from `t_start` up to (excluding) `t_end`.
    pub fn trace(&self, t_start: f64, t_end: f64, step: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        let steps = if step > 0.0 && t_end > t_start {
            ((t_end - t_start) / step).ceil() as usize
        } else {
            0
        };
        (0..steps).map(move |i| {
            let t = t_start + i as f64 * step;
            (t, self.at(t))
        })
    }
}
