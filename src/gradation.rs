use crate::geometry::polar_to_cartesian;
use crate::surface::Surface;
use std::f64::consts::{FRAC_PI_2, TAU};

pub const TICK_COUNT: usize = 12;

/// A radial tick mark centered at `(x, y)`, oriented along `angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub length: f64,
}

/// Angle of tick `index`; ticks sit every 30° on the vertical axis.
pub fn tick_angle(index: usize) -> f64 {
    TAU * index as f64 / TICK_COUNT as f64 + FRAC_PI_2
}

/// Ticks span the whole ring band: centered between the innermost and
/// outermost arc, long enough to cross all of them.
pub fn tick_positions(
    cx: f64,
    cy: f64,
    main_radius: f64,
    delta_radius: f64,
    arc_count: usize,
) -> [Tick; TICK_COUNT] {
    let radius = main_radius - delta_radius / 2.0;
    let length = delta_radius * arc_count.saturating_sub(1) as f64;
    std::array::from_fn(|i| {
        let angle = tick_angle(i);
        let (x, y) = polar_to_cartesian(cx, cy, radius, angle);
        Tick {
            x,
            y,
            angle,
            length,
        }
    })
}

/// Strokes every tick with the surface's ambient style.
pub fn draw_gradation(surface: &mut dyn Surface, ticks: &[Tick]) {
    for tick in ticks {
        surface.save();
        surface.begin_path();
        surface.translate(tick.x, tick.y);
        surface.rotate(tick.angle);
        surface.move_to(-tick.length / 2.0, 0.0);
        surface.line_to(tick.length / 2.0, 0.0);
        surface.stroke();
        surface.restore();
    }
}
