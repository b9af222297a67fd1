// ============================================================================
// PIXEL CANVAS
// ============================================================================

use crate::config::Color;
use crate::geometry::{arc_sweep, polar_to_cartesian, Transform};
use crate::surface::{LineCap, Surface};

/// Approximate on-screen length of one flattened arc segment, in pixels
const ARC_SEGMENT_LENGTH: f64 = 2.0;
const MAX_ARC_SEGMENTS: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Transform,
    stroke_color: Color,
    fill_color: Color,
    line_width: f64,
    line_cap: LineCap,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
        }
    }
}

/// RGBA8 framebuffer implementing [`Surface`] in software.
///
/// Path points are transformed when they are added. Line widths are not
/// scaled by the transform, which only ever translates and rotates here.
pub struct PixelCanvas {
    frame: Vec<u8>,
    width: usize,
    height: usize,
    background: Color,
    state: DrawState,
    saved: Vec<DrawState>,
    subpaths: Vec<Vec<(f64, f64)>>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let mut canvas = Self {
            frame: vec![0; width * height * 4],
            width,
            height,
            background,
            state: DrawState::default(),
            saved: Vec::new(),
            subpaths: Vec::new(),
        };
        canvas.clear();
        canvas
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, row major
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some(Color::new(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
        ))
    }

    /// Resizes the framebuffer and clears it. Drawing state is kept.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.frame.resize(width * height * 4, 0);
        self.clear();
    }

    fn blend(&mut self, x: usize, y: usize, color: Color, alpha: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let src = [color.r as f32, color.g as f32, color.b as f32];
        for (channel, src) in self.frame[idx..idx + 3].iter_mut().zip(src) {
            *channel = (src * alpha + *channel as f32 * (1.0 - alpha)).round() as u8;
        }
        self.frame[idx + 3] = 0xff;
    }

    fn push_point(&mut self, x: f64, y: f64, connect: bool) {
        let point = self.state.transform.apply(x, y);
        match self.subpaths.last_mut() {
            Some(subpath) if connect => subpath.push(point),
            _ => self.subpaths.push(vec![point]),
        }
    }

    /// Clipped pixel bounds of `points` grown by `margin`
    fn bounds(&self, points: &[(f64, f64)], margin: f64) -> Option<(usize, usize, usize, usize)> {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let min_x = (min_x - margin).floor().max(0.0);
        let min_y = (min_y - margin).floor().max(0.0);
        let max_x = (max_x + margin).ceil().min(self.width as f64 - 1.0);
        let max_y = (max_y + margin).ceil().min(self.height as f64 - 1.0);
        if !(min_x <= max_x && min_y <= max_y) {
            return None;
        }
        Some((
            min_x as usize,
            min_y as usize,
            max_x as usize,
            max_y as usize,
        ))
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)]) {
        let half = self.state.line_width / 2.0;
        let Some((x0, y0, x1, y1)) = self.bounds(points, half + 1.0) else {
            return;
        };
        let cols = x1 - x0 + 1;
        let mut coverage = vec![0.0_f32; cols * (y1 - y0 + 1)];
        let round = self.state.line_cap == LineCap::Round;

        // Coverage is the max over segments so joints are not blended twice.
        for segment in points.windows(2) {
            let ((ax, ay), (bx, by)) = (segment[0], segment[1]);
            let Some((sx0, sy0, sx1, sy1)) = self.bounds(segment, half + 1.0) else {
                continue;
            };
            let dx = bx - ax;
            let dy = by - ay;
            let len_sq = dx * dx + dy * dy;
            for y in sy0..=sy1 {
                for x in sx0..=sx1 {
                    let px = x as f64 - ax;
                    let py = y as f64 - ay;
                    let t = if len_sq > 0.0 {
                        (px * dx + py * dy) / len_sq
                    } else {
                        0.0
                    };
                    if !round && !(0.0..=1.0).contains(&t) {
                        continue;
                    }
                    let t = t.clamp(0.0, 1.0);
                    let dist = ((px - t * dx).powi(2) + (py - t * dy).powi(2)).sqrt();
                    let aa = (1.0 - (dist - half).clamp(0.0, 1.0)) as f32;
                    let slot = &mut coverage[(y - y0) * cols + (x - x0)];
                    *slot = slot.max(aa);
                }
            }
        }

        let color = self.state.stroke_color;
        for (i, alpha) in coverage.into_iter().enumerate() {
            if alpha > 0.01 {
                self.blend(x0 + i % cols, y0 + i / cols, color, alpha);
            }
        }
    }
}

/// Even-odd containment over every subpath, each implicitly closed
fn contains(subpaths: &[Vec<(f64, f64)>], px: f64, py: f64) -> bool {
    let mut inside = false;
    for polygon in subpaths {
        let n = polygon.len();
        for i in 0..n {
            let (xi, yi) = polygon[i];
            let (xj, yj) = polygon[(i + n - 1) % n];
            if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                inside = !inside;
            }
        }
    }
    inside
}

impl Surface for PixelCanvas {
    fn clear(&mut self) {
        let (r, g, b) = self.background.as_tuple();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, 0xff]);
        }
    }

    fn begin_path(&mut self) {
        self.subpaths.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push_point(x, y, false);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_point(x, y, true);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        let sweep = arc_sweep(start_angle, end_angle);
        let segments = ((sweep * radius.abs() / ARC_SEGMENT_LENGTH).ceil() as usize)
            .clamp(1, MAX_ARC_SEGMENTS);
        for k in 0..=segments {
            let angle = start_angle + sweep * k as f64 / segments as f64;
            let (x, y) = polar_to_cartesian(cx, cy, radius, angle);
            self.push_point(x, y, true);
        }
    }

    fn stroke(&mut self) {
        let subpaths = std::mem::take(&mut self.subpaths);
        for subpath in subpaths.iter().filter(|s| s.len() > 1) {
            self.stroke_polyline(subpath);
        }
        self.subpaths = subpaths;
    }

    fn fill(&mut self) {
        let points: Vec<(f64, f64)> = self.subpaths.iter().flatten().copied().collect();
        let Some((x0, y0, x1, y1)) = self.bounds(&points, 1.0) else {
            return;
        };
        let color = self.state.fill_color;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let hits = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)]
                    .iter()
                    .filter(|(ox, oy)| contains(&self.subpaths, x as f64 + ox, y as f64 + oy))
                    .count();
                if hits > 0 {
                    self.blend(x, y, color, hits as f32 / 4.0);
                }
            }
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.state.transform.translate(x, y);
    }

    fn rotate(&mut self, angle: f64) {
        self.state.transform.rotate(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    const BG: Color = Color::new(0x10, 0x10, 0x10);

    #[test]
    fn test_clear_fills_background() {
        let canvas = PixelCanvas::new(4, 3, BG);
        assert_eq!(canvas.frame().len(), 4 * 3 * 4);
        assert!(canvas
            .frame()
            .chunks_exact(4)
            .all(|px| px == [0x10, 0x10, 0x10, 0xff]));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_stroke_horizontal_line() {
        let mut canvas = PixelCanvas::new(20, 20, BG);
        canvas.set_stroke_color(Color::WHITE);
        canvas.set_line_width(3.0);
        canvas.begin_path();
        canvas.move_to(2.0, 10.0);
        canvas.line_to(17.0, 10.0);
        canvas.stroke();

        assert_eq!(canvas.pixel(10, 10), Some(Color::WHITE));
        assert_eq!(canvas.pixel(10, 11), Some(Color::WHITE));
        assert_eq!(canvas.pixel(10, 15), Some(BG), "Far from the line");
        assert_eq!(canvas.pixel(0, 10), Some(BG), "Butt cap does not extend");
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut canvas = PixelCanvas::new(20, 20, BG);
        canvas.set_stroke_color(Color::WHITE);
        canvas.set_line_width(4.0);
        canvas.set_line_cap(LineCap::Round);
        canvas.begin_path();
        canvas.move_to(5.0, 10.0);
        canvas.line_to(15.0, 10.0);
        canvas.stroke();

        assert_eq!(canvas.pixel(4, 10), Some(Color::WHITE));
    }

    #[test]
    fn test_translate_rotate_and_restore() {
        let mut canvas = PixelCanvas::new(30, 30, BG);
        canvas.set_stroke_color(Color::WHITE);
        canvas.set_line_width(2.0);

        canvas.save();
        canvas.begin_path();
        canvas.translate(15.0, 15.0);
        canvas.rotate(FRAC_PI_2);
        canvas.move_to(-5.0, 0.0);
        canvas.line_to(5.0, 0.0);
        canvas.stroke();
        canvas.restore();

        assert_eq!(canvas.pixel(15, 12), Some(Color::WHITE), "Rotated to vertical");
        assert_eq!(canvas.pixel(12, 15), Some(BG));

        // Transform restored: this lands in the top-left corner again
        canvas.begin_path();
        canvas.move_to(1.0, 1.0);
        canvas.line_to(4.0, 1.0);
        canvas.stroke();
        assert_eq!(canvas.pixel(2, 1), Some(Color::WHITE));
    }

    #[test]
    fn test_full_circle_arc_and_fill() {
        let mut canvas = PixelCanvas::new(40, 40, BG);
        canvas.set_stroke_color(Color::WHITE);
        canvas.begin_path();
        canvas.arc(20.0, 20.0, 10.0, 0.0, TAU);
        canvas.stroke();
        assert_eq!(canvas.pixel(30, 20), Some(Color::WHITE));
        assert_eq!(canvas.pixel(20, 10), Some(Color::WHITE));
        assert_eq!(canvas.pixel(20, 20), Some(BG), "Stroke leaves center empty");

        let red = Color::new(0xff, 0, 0);
        canvas.set_fill_color(red);
        canvas.begin_path();
        canvas.arc(20.0, 20.0, 5.0, 0.0, TAU);
        canvas.fill();
        assert_eq!(canvas.pixel(20, 20), Some(red));
    }

    #[test]
    fn test_resize_clears() {
        let mut canvas = PixelCanvas::new(10, 10, BG);
        canvas.set_stroke_color(Color::WHITE);
        canvas.begin_path();
        canvas.move_to(0.0, 5.0);
        canvas.line_to(9.0, 5.0);
        canvas.stroke();
        canvas.resize(16, 8);
        assert_eq!(canvas.frame().len(), 16 * 8 * 4);
        assert_eq!(canvas.pixel(5, 5), Some(BG));
    }
}
