use anyhow::{bail, Context};
use bon::Builder;
use std::str::FromStr;

// ============================================================================
// COLOR
// ============================================================================

/// Opaque RGB color used for strokes, fills and the background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    /// Accepts `#rrggbb`, `#rgb`, `white` and `black`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            _ => {}
        }

        let Some(hex) = s.strip_prefix('#') else {
            bail!("color '{s}' must be a name or start with '#'");
        };
        if !hex.is_ascii() {
            bail!("invalid hex digits in '{s}'");
        }
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).with_context(|| format!("invalid hex digits in '{s}'"))
        };
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #rgb expands each digit: #f80 == #ff8800
            3 => Ok(Self::new(
                channel(&hex[0..1])? * 0x11,
                channel(&hex[1..2])? * 0x11,
                channel(&hex[2..3])? * 0x11,
            )),
            _ => bail!("color '{s}' must have 3 or 6 hex digits"),
        }
    }
}

// ============================================================================
// SCENARIO CONFIGURATION
// ============================================================================

/// Static layout and window configuration, fixed for the lifetime of a scenario.
#[derive(Debug, Clone, Builder)]
pub struct ScenarioConfig {
    // Ring of arcs
    #[builder(default = 10)]
    pub arc_count: usize,
    #[builder(default = 0.65)]
    pub main_radius_factor: f64,
    #[builder(default = 0.075)]
    pub ring_spacing_factor: f64,
    /// Seed for the interior arcs' random phase and span
    pub seed: Option<u64>,

    // Clock face
    #[builder(default = 0.4)]
    pub dial_radius_factor: f64,
    #[builder(default = true)]
    pub numerals: bool,
    #[builder(default = 10.0)]
    pub numeral_dot_radius: f64,

    // Window configuration
    #[builder(default = "Ring Clock".to_string())]
    pub title: String,
    #[builder(default = 800)]
    pub window_width: usize,
    #[builder(default = 600)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(default = Color::new(0x5a, 0x62, 0x74))]
    pub background_color: Color,

    /// Enables the keyboard debug controls
    #[builder(default = false)]
    pub debug: bool,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

// ============================================================================
// RUNTIME PARAMETERS
// ============================================================================

/// Parameters an external controller may change between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub line_width: f64,
    pub speed: f64,
    pub color: Color,
    pub is_update: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            speed: 1.0,
            color: Color::WHITE,
            is_update: true,
        }
    }
}

/// A single parameter mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamChange {
    LineWidth(f64),
    Speed(f64),
    Color(Color),
    IsUpdate(bool),
}

impl Params {
    /// Applies `change`, returning false if it was rejected.
    pub fn apply(&mut self, change: ParamChange) -> bool {
        match change {
            ParamChange::LineWidth(width) => {
                if !(width.is_finite() && width > 0.0) {
                    log::warn!("Ignoring non-positive line width {width}");
                    return false;
                }
                self.line_width = width;
            }
            ParamChange::Speed(speed) => {
                if !speed.is_finite() {
                    log::warn!("Ignoring non-finite speed {speed}");
                    return false;
                }
                self.speed = speed;
            }
            ParamChange::Color(color) => self.color = color,
            ParamChange::IsUpdate(enabled) => self.is_update = enabled,
        }
        true
    }
}

/// Observer notified after every accepted parameter change.
pub trait ParamListener {
    fn on_param_change(&mut self, change: &ParamChange, params: &Params);
}

impl<F> ParamListener for F
where
    F: FnMut(&ParamChange, &Params),
{
    fn on_param_change(&mut self, change: &ParamChange, params: &Params) {
        self(change, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("#ffffff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#F80".parse::<Color>().unwrap(), Color::new(0xff, 0x88, 0x00));
        assert_eq!("black".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!(
            " #102030 ".parse::<Color>().unwrap(),
            Color::new(0x10, 0x20, 0x30)
        );
        assert!("ffffff".parse::<Color>().is_err(), "Missing '#' prefix");
        assert!("#ffff".parse::<Color>().is_err(), "Wrong digit count");
        assert!("#gg0000".parse::<Color>().is_err(), "Non-hex digits");
    }

    #[test]
    fn test_default_params() {
        let params = Params::default();
        assert_eq!(params.line_width, 2.0);
        assert_eq!(params.speed, 1.0);
        assert_eq!(params.color, Color::WHITE);
        assert!(params.is_update);
    }

    #[test]
    fn test_apply_rejects_bad_line_width() {
        let mut params = Params::default();
        assert!(!params.apply(ParamChange::LineWidth(0.0)));
        assert!(!params.apply(ParamChange::LineWidth(-3.0)));
        assert!(!params.apply(ParamChange::LineWidth(f64::NAN)));
        assert_eq!(params.line_width, 2.0, "Rejected changes leave params intact");

        assert!(params.apply(ParamChange::LineWidth(7.5)));
        assert_eq!(params.line_width, 7.5);
    }

    #[test]
    fn test_apply_accepts_negative_speed() {
        let mut params = Params::default();
        assert!(params.apply(ParamChange::Speed(-1.75)));
        assert_eq!(params.speed, -1.75);
        assert!(params.apply(ParamChange::IsUpdate(false)));
        assert!(!params.is_update);
    }

    #[test]
    fn test_config_defaults() {
        let config = ScenarioConfig::default();
        assert_eq!(config.arc_count, 10);
        assert_eq!(config.main_radius_factor, 0.65);
        assert_eq!(config.ring_spacing_factor, 0.075);
        assert!(config.numerals);
        assert!(config.seed.is_none());

        let config = ScenarioConfig::builder().arc_count(6).seed(42).build();
        assert_eq!(config.arc_count, 6);
        assert_eq!(config.seed, Some(42));
    }
}
