/// RGBA color, straight alpha.
pub type Color = [u8; 4];

/// CPU-side RGBA8 frame, row-major, ready for the encoder.
pub struct Canvas {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        let mut canvas = Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
        };
        canvas.clear(background);
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    #[allow(dead_code)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.pixels[idx..idx + 4]);
        Some(out)
    }

    /// Alpha-blend `color` onto one pixel, scaled by `coverage` (0.0-1.0).
    /// Out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;

        let a = coverage.clamp(0.0, 1.0) * (color[3] as f32 / 255.0);
        let inv_a = 1.0 - a;
        for c in 0..3 {
            self.pixels[idx + c] = (color[c] as f32 * a + self.pixels[idx + c] as f32 * inv_a).round() as u8;
        }
        self.pixels[idx + 3] = 255;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color) {
        for py in y..y + h as i32 {
            for px in x..x + w as i32 {
                self.blend_pixel(px, py, color, 1.0);
            }
        }
    }

    /// Filled disc centred on `(cx, cy)`.
    pub fn fill_disc(&mut self, cx: f64, cy: f64, radius: f64, color: Color) {
        let r2 = radius * radius;
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        let y0 = (cy - radius).floor() as i32;
        let y1 = (cy + radius).ceil() as i32;
        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f64 - cx;
                let dy = py as f64 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(px, py, color, 1.0);
                }
            }
        }
    }

    /// Thick line, stamped as discs every half pixel.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), thickness: f64, color: Color) {
        let radius = (thickness * 0.5).max(0.5);
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        let steps = (length * 2.0).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let f = i as f64 / steps as f64;
            self.fill_disc(from.0 + dx * f, from.1 + dy * f, radius, color);
        }
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], thickness: f64, color: Color) {
        if let [only] = points {
            self.fill_disc(only.0, only.1, (thickness * 0.5).max(0.5), color);
            return;
        }
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], thickness, color);
        }
    }
}
