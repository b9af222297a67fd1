// ============================================================================
// ANGLES & SCREEN GEOMETRY
// ============================================================================

use std::f64::consts::{PI, TAU};

/// Converts degrees to radians. Any real input is accepted.
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Maps a polar coordinate around `(cx, cy)` to screen space.
///
/// Angle 0 points right and grows clockwise because screen Y grows downward.
/// Clock-style angles (0 at 12 o'clock) must be shifted by -90° first.
pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.cos(), cy + radius * angle.sin())
}

/// Sweep covered by a clockwise arc from `start` to `end`, canvas style:
/// a difference of a full turn or more is a full circle, anything else wraps
/// into `[0, 2π)`.
pub fn arc_sweep(start: f64, end: f64) -> f64 {
    let diff = end - start;
    if diff >= TAU {
        TAU
    } else {
        diff.rem_euclid(TAU)
    }
}

/// 2D affine transform in canvas layout `[a, b, c, d, e, f]`:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.e += self.a * tx + self.c * ty;
        self.f += self.b * tx + self.d * ty;
    }

    pub fn rotate(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}
