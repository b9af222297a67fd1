// ============================================================================
// DEBUG CONTROLS
// ============================================================================

use crate::config::{Color, ParamChange, Params};

pub const LINE_WIDTH_RANGE: (f64, f64) = (1.0, 10.0);
pub const LINE_WIDTH_STEP: f64 = 1.0;
pub const SPEED_RANGE: (f64, f64) = (-2.0, 2.0);
pub const SPEED_STEP: f64 = 0.25;

/// Colors the color control cycles through
pub const PALETTE: [Color; 6] = [
    Color::WHITE,
    Color::new(0xff, 0xd1, 0x66),
    Color::new(0x06, 0xd6, 0xa0),
    Color::new(0x11, 0x8a, 0xb2),
    Color::new(0xef, 0x47, 0x6f),
    Color::BLACK,
];

/// Abstract inputs of the debug panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    WiderLines,
    NarrowerLines,
    Faster,
    Slower,
    NextColor,
    TogglePause,
}

/// Turns control inputs into clamped parameter changes.
#[derive(Debug, Default, Clone)]
pub struct DebugControls;

impl DebugControls {
    pub fn change_for(&self, key: ControlKey, params: &Params) -> Option<ParamChange> {
        let change = match key {
            ControlKey::WiderLines => ParamChange::LineWidth(step(
                params.line_width,
                LINE_WIDTH_STEP,
                LINE_WIDTH_RANGE,
            )),
            ControlKey::NarrowerLines => ParamChange::LineWidth(step(
                params.line_width,
                -LINE_WIDTH_STEP,
                LINE_WIDTH_RANGE,
            )),
            ControlKey::Faster => {
                ParamChange::Speed(step(params.speed, SPEED_STEP, SPEED_RANGE))
            }
            ControlKey::Slower => {
                ParamChange::Speed(step(params.speed, -SPEED_STEP, SPEED_RANGE))
            }
            ControlKey::NextColor => {
                let next = PALETTE
                    .iter()
                    .position(|c| *c == params.color)
                    .map_or(0, |i| (i + 1) % PALETTE.len());
                ParamChange::Color(PALETTE[next])
            }
            ControlKey::TogglePause => ParamChange::IsUpdate(!params.is_update),
        };
        (!is_noop(&change, params)).then_some(change)
    }
}

fn step(value: f64, step: f64, (min, max): (f64, f64)) -> f64 {
    // Results always land on the step grid
    let snapped = ((value + step) / step.abs()).round() * step.abs();
    snapped.clamp(min, max)
}

fn is_noop(change: &ParamChange, params: &Params) -> bool {
    match *change {
        ParamChange::LineWidth(w) => w == params.line_width,
        ParamChange::Speed(s) => s == params.speed,
        ParamChange::Color(c) => c == params.color,
        ParamChange::IsUpdate(u) => u == params.is_update,
    }
}
