// ============================================================================
// CLOCK FACE
// ============================================================================

use chrono::Timelike;

use crate::config::Color;
use crate::geometry::{deg_to_rad, polar_to_cartesian};
use crate::surface::Surface;
use std::f64::consts::TAU;

/// Hour/minute/second hands: (length as a fraction of the dial radius, width)
const HOUR_HAND: (f64, f64) = (0.5, 8.0);
const MINUTE_HAND: (f64, f64) = (0.7, 4.0);
const SECOND_HAND: (f64, f64) = (0.8, 1.0);

const HAND_COLOR: Color = Color::BLACK;
const SECOND_HAND_COLOR: Color = Color::WHITE;
const NUMERAL_COLOR: Color = Color::BLACK;

/// Wall-clock reading, whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockTime {
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    pub fn from_timelike<T: Timelike>(time: &T) -> Self {
        Self::new(time.hour(), time.minute(), time.second())
    }
}

/// Source of the current wall-clock time, queried once per clock draw.
pub trait TimeSource {
    fn now(&self) -> ClockTime;
}

/// Local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now(&self) -> ClockTime {
        ClockTime::from_timelike(&chrono::Local::now())
    }
}

/// Hand angles in clock degrees: 0 at 12 o'clock, growing clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn at(time: ClockTime) -> Self {
        let hours = (time.hours % 12) as f64;
        let minutes = time.minutes as f64;
        let seconds = time.seconds as f64;
        Self {
            hour: hours / 12.0 * 360.0 + 30.0 * minutes / 60.0,
            minute: minutes / 60.0 * 360.0 + 6.0 * seconds / 60.0,
            second: seconds / 60.0 * 360.0,
        }
    }
}

/// Dial, numeral dots and the three hands.
#[derive(Debug, Clone)]
pub struct ClockFace {
    pub radius_factor: f64,
    pub numerals: bool,
    pub numeral_dot_radius: f64,
}

impl ClockFace {
    pub fn radius(&self, width: f64, height: f64) -> f64 {
        width.min(height) * self.radius_factor
    }

    /// Screen positions of the 12 numerals, starting at 1 o'clock.
    pub fn numeral_positions(&self, width: f64, height: f64) -> [(f64, f64); 12] {
        let radius = self.radius(width, height);
        std::array::from_fn(|i| {
            let angle = deg_to_rad((i + 1) as f64 * 30.0 - 90.0);
            polar_to_cartesian(width / 2.0, height / 2.0, radius, angle)
        })
    }

    /// Draws the dial with the surface's ambient stroke style, then the
    /// hands with their own colors and widths. The ambient style is left
    /// as it was found.
    pub fn draw(&self, surface: &mut dyn Surface, width: f64, height: f64, time: ClockTime) {
        let (cx, cy) = (width / 2.0, height / 2.0);
        let radius = self.radius(width, height);

        surface.begin_path();
        surface.arc(cx, cy, radius, 0.0, TAU);
        surface.stroke();

        if self.numerals {
            surface.save();
            surface.set_fill_color(NUMERAL_COLOR);
            for (x, y) in self.numeral_positions(width, height) {
                surface.begin_path();
                surface.arc(x, y, self.numeral_dot_radius, 0.0, TAU);
                surface.fill();
            }
            surface.restore();
        }

        let angles = HandAngles::at(time);
        for (angle, (length, hand_width), color) in [
            (angles.hour, HOUR_HAND, HAND_COLOR),
            (angles.minute, MINUTE_HAND, HAND_COLOR),
            (angles.second, SECOND_HAND, SECOND_HAND_COLOR),
        ] {
            draw_hand(surface, cx, cy, angle, radius * length, hand_width, color);
        }
    }
}

fn draw_hand(
    surface: &mut dyn Surface,
    cx: f64,
    cy: f64,
    angle: f64,
    length: f64,
    width: f64,
    color: Color,
) {
    let (end_x, end_y) = polar_to_cartesian(cx, cy, length, deg_to_rad(angle - 90.0));
    surface.save();
    surface.begin_path();
    surface.move_to(cx, cy);
    surface.line_to(end_x, end_y);
    surface.set_stroke_color(color);
    surface.set_line_width(width);
    surface.stroke();
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CommandRecorder, DrawCommand};

    fn face(numerals: bool) -> ClockFace {
        ClockFace {
            radius_factor: 0.4,
            numerals,
            numeral_dot_radius: 10.0,
        }
    }

    #[test]
    fn test_midnight_points_up() {
        let angles = HandAngles::at(ClockTime::new(0, 0, 0));
        assert_eq!(angles, HandAngles { hour: 0.0, minute: 0.0, second: 0.0 });
        assert_eq!(HandAngles::at(ClockTime::new(12, 0, 0)), angles, "12h period");
    }

    #[test]
    fn test_hand_formulas() {
        assert_eq!(HandAngles::at(ClockTime::new(0, 0, 30)).second, 180.0);

        let angles = HandAngles::at(ClockTime::new(15, 30, 45));
        assert_eq!(angles.hour, 90.0 + 15.0);
        assert_eq!(angles.minute, 180.0 + 4.5);
        assert_eq!(angles.second, 270.0);
    }

    #[test]
    fn test_from_timelike() {
        let time = chrono::NaiveTime::from_hms_opt(21, 7, 59).unwrap();
        assert_eq!(ClockTime::from_timelike(&time), ClockTime::new(21, 7, 59));
    }

    #[test]
    fn test_numeral_positions() {
        let positions = face(true).numeral_positions(800.0, 600.0);
        // 12 o'clock is the last entry, straight above the center
        let (x, y) = positions[11];
        assert!((x - 400.0).abs() < 1e-9);
        assert!((y - (300.0 - 240.0)).abs() < 1e-9);
        // 3 o'clock
        let (x, y) = positions[2];
        assert!((x - 640.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_draw_sequence() {
        let mut recorder = CommandRecorder::new();
        face(false).draw(&mut recorder, 800.0, 600.0, ClockTime::new(0, 0, 15));
        let commands = recorder.take_commands();

        assert_eq!(
            commands[..3],
            [
                DrawCommand::BeginPath,
                DrawCommand::Arc {
                    cx: 400.0,
                    cy: 300.0,
                    radius: 240.0,
                    start_angle: 0.0,
                    end_angle: TAU,
                },
                DrawCommand::Stroke,
            ]
        );
        // Three hands, each wrapped in save/restore
        let saves = commands.iter().filter(|c| **c == DrawCommand::Save).count();
        let restores = commands.iter().filter(|c| **c == DrawCommand::Restore).count();
        assert_eq!((saves, restores), (3, 3));
        assert!(commands.contains(&DrawCommand::StrokeColor(SECOND_HAND_COLOR)));
        assert!(commands.contains(&DrawCommand::LineWidth(8.0)));
        assert_eq!(commands.last(), Some(&DrawCommand::Restore));

        // The second hand at 15s points to 3 o'clock at 80% of the dial
        let ends: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::LineTo { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        let (x, y) = ends[2];
        assert!((x - (400.0 + 192.0)).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_numerals_are_filled_dots() {
        let mut recorder = CommandRecorder::new();
        face(true).draw(&mut recorder, 800.0, 600.0, ClockTime::new(3, 0, 0));
        let commands = recorder.commands();
        assert_eq!(commands.iter().filter(|c| **c == DrawCommand::Fill).count(), 12);
        assert!(commands.contains(&DrawCommand::FillColor(NUMERAL_COLOR)));
    }
}
