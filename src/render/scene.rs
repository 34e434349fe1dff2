use crate::signal::pipeline::Pass;

use super::canvas::{Canvas, Color};
use super::text::TextOverlay;

const BACKGROUND: Color = [45, 45, 45, 255];
const AXIS: Color = [128, 128, 128, 255];
const INPUT: Color = [31, 147, 242, 255];
const RECONSTRUCTION: Color = [245, 158, 66, 255];
const SAMPLE: Color = [255, 255, 255, 255];
const LEGEND_TEXT: Color = [255, 255, 255, 230];

const WAVE_THICKNESS: f64 = 3.0;
const SAMPLE_DIAMETER: f64 = 9.0;
/// Horizontal spacing of traced wave vertices, in pixels.
const TRACE_STEP_PX: f64 = 0.5;

/// Maps signal time and amplitude onto frame pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Pixels per second of signal time.
    pub display_ratio: f64,
    /// Pixel column of `t = 0`.
    pub origin_x: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, display_ratio: f64) -> Self {
        Self {
            width,
            height,
            display_ratio,
            origin_x: 10.0,
        }
    }

    pub fn time_to_x(&self, t: f64) -> f64 {
        self.origin_x + t * self.display_ratio
    }

    /// Amplitudes are already in pixels; positive is up.
    pub fn value_to_y(&self, amplitude: f64) -> f64 {
        self.height as f64 * 0.5 - amplitude
    }

    /// Signal time spanned by the visible area right of the origin.
    pub fn visible_duration(&self) -> f64 {
        (self.width as f64 - self.origin_x).max(0.0) / self.display_ratio
    }
}

/// One legend row: swatch color (if any) and label.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendLine {
    pub swatch: Option<Color>,
    pub text: String,
}

pub fn legend_lines(pass: &Pass) -> Vec<LegendLine> {
    let config = &pass.config;
    let mut lines = vec![
        LegendLine {
            swatch: Some(INPUT),
            text: format!("input          {:.0} Hz", config.input_frequency),
        },
        LegendLine {
            swatch: Some(SAMPLE),
            text: format!("sample rate    {:.0} Hz", config.sample_rate),
        },
        LegendLine {
            swatch: Some(RECONSTRUCTION),
            text: format!("reconstructed  {} Hz", pass.estimate.hz),
        },
    ];

    if pass.estimate.is_edge_case {
        lines.push(LegendLine {
            swatch: None,
            text: "no reliable peak".to_string(),
        });
    } else if config.is_aliased() {
        lines.push(LegendLine {
            swatch: None,
            text: format!("aliased above Nyquist ({:.0} Hz)", config.nyquist()),
        });
    }

    lines
}

/// Draws a recompute pass: axes, input wave, reconstruction, samples, legend.
pub struct Scene {
    viewport: Viewport,
    text: Option<TextOverlay>,
}

impl Scene {
    pub fn new(viewport: Viewport, text: Option<TextOverlay>) -> Self {
        Self { viewport, text }
    }

    pub fn draw(&self, pass: &Pass) -> Canvas {
        let vp = &self.viewport;
        let mut canvas = Canvas::new(vp.width, vp.height, BACKGROUND);

        self.draw_axes(&mut canvas);

        let t_end = vp.visible_duration();
        let t_step = TRACE_STEP_PX / vp.display_ratio;

        let input: Vec<(f64, f64)> = pass
            .input
            .trace(0.0, t_end, t_step)
            .map(|(t, a)| (vp.time_to_x(t), vp.value_to_y(a)))
            .collect();
        canvas.polyline(&input, WAVE_THICKNESS, INPUT);

        let reconstruction: Vec<(f64, f64)> = pass
            .reconstruction
            .trace(0.0, t_end, t_step)
            .map(|(t, a)| (vp.time_to_x(t), vp.value_to_y(a)))
            .collect();
        canvas.polyline(&reconstruction, WAVE_THICKNESS, RECONSTRUCTION);

        for (t, a) in pass.samples.points().take_while(|&(t, _)| t <= t_end) {
            canvas.fill_disc(vp.time_to_x(t), vp.value_to_y(a), SAMPLE_DIAMETER * 0.5, SAMPLE);
        }

        if let Some(ref overlay) = self.text {
            draw_legend(&mut canvas, overlay, &legend_lines(pass));
        }

        canvas
    }

    fn draw_axes(&self, canvas: &mut Canvas) {
        let vp = &self.viewport;
        let mid = vp.value_to_y(0.0);
        canvas.line((0.0, mid), (vp.width as f64, mid), 1.0, AXIS);
        canvas.line((vp.origin_x, 0.0), (vp.origin_x, vp.height as f64), 1.0, AXIS);
    }
}

fn draw_legend(canvas: &mut Canvas, overlay: &TextOverlay, lines: &[LegendLine]) {
    let font_size = overlay.font_size() as u32;
    let line_height = overlay.line_height();
    let swatch = font_size.max(4);
    let pad = (font_size as f32 * 0.6) as u32;

    let text_width = lines
        .iter()
        .map(|l| overlay.measure_width(&l.text))
        .max()
        .unwrap_or(0);
    let box_w = swatch + pad * 3 + text_width;
    let box_h = lines.len() as u32 * line_height + pad * 2;

    let margin = (canvas.height() as f32 * 0.03) as u32;
    let box_x = canvas.width().saturating_sub(box_w + margin) as i32;
    let box_y = margin as i32;

    canvas.fill_rect(box_x, box_y, box_w, box_h, [0, 0, 0, 110]);

    for (i, line) in lines.iter().enumerate() {
        let y = box_y + (pad + i as u32 * line_height) as i32;
        if let Some(color) = line.swatch {
            canvas.fill_rect(box_x + pad as i32, y + (font_size / 4) as i32, swatch, swatch / 2, color);
        }
        let x = box_x + (swatch + pad * 2) as i32;
        overlay.composite(canvas, &line.text, x, y, LEGEND_TEXT);
    }
}
