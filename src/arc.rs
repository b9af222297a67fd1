use crate::surface::Surface;

/// Baseline rotation rate in radians per second at speed 1
pub const ROTATION_RATE: f64 = 1.0;

/// An arc segment at a fixed radius that spins around its center.
///
/// Styling is not owned here; `render` strokes with whatever color, width
/// and cap the surface currently holds.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatingArc {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    offset: f64,
}

impl RotatingArc {
    pub fn new(x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            offset: 0.0,
        }
    }

    /// Accumulated rotation in radians. Never wrapped.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn advance(&mut self, delta_seconds: f64, speed: f64) {
        self.offset += delta_seconds * speed * ROTATION_RATE;
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.arc(
            self.x,
            self.y,
            self.radius,
            self.start_angle + self.offset,
            self.end_angle + self.offset,
        );
        surface.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CommandRecorder, DrawCommand};
    use std::f64::consts::TAU;

    #[test]
    fn test_advance_is_proportional() {
        let mut arc = RotatingArc::new(0.0, 0.0, 10.0, 0.0, 1.0);
        arc.advance(0.5, 2.0);
        assert_eq!(arc.offset(), 1.0 * ROTATION_RATE);
        arc.advance(0.25, -2.0);
        assert_eq!(arc.offset(), 0.5 * ROTATION_RATE);
    }

    #[test]
    fn test_advance_by_zero_is_neutral() {
        let mut once = RotatingArc::new(0.0, 0.0, 10.0, 0.0, 1.0);
        let mut twice = once.clone();
        for (delta, speed) in [(0.016, 1.0), (1.5, -0.75), (0.0, 2.0), (3.0, 0.0)] {
            once.advance(delta, speed);
            twice.advance(delta, speed);
            twice.advance(0.0, speed);
            assert_eq!(once.offset(), twice.offset());
        }
    }

    #[test]
    fn test_zero_speed_freezes() {
        let mut arc = RotatingArc::new(0.0, 0.0, 10.0, 0.3, 2.0);
        arc.advance(10.0, 0.0);
        assert_eq!(arc.offset(), 0.0);
    }

    #[test]
    fn test_render_issues_single_offset_arc() {
        let mut arc = RotatingArc::new(400.0, 300.0, 195.0, 0.0, TAU);
        arc.advance(2.0, 0.5);
        let mut recorder = CommandRecorder::new();
        arc.render(&mut recorder);
        assert_eq!(
            recorder.commands(),
            &[
                DrawCommand::BeginPath,
                DrawCommand::Arc {
                    cx: 400.0,
                    cy: 300.0,
                    radius: 195.0,
                    start_angle: 1.0,
                    end_angle: TAU + 1.0,
                },
                DrawCommand::Stroke,
            ]
        );
        assert_eq!(arc.offset(), 1.0, "Rendering does not touch the offset");
    }
}
