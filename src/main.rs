use clap::Parser;
use log::LevelFilter;
use ringclock::{ClockApp, Color, Params, ScenarioConfig};

/// Analog clock ringed by independently rotating arcs
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Window width in logical pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Frame rate cap
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Stroke width for all linework
    #[arg(long, default_value_t = 2.0)]
    line_width: f64,

    /// Arc rotation multiplier; negative reverses
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    speed: f64,

    /// Stroke color: #rrggbb, #rgb, white or black
    #[arg(long, default_value = "#ffffff")]
    color: Color,

    /// Seed for the arc layout; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Hide the numeral dots
    #[arg(long)]
    no_numerals: bool,

    /// Start with the arcs frozen
    #[arg(long)]
    paused: bool,

    /// Enable keyboard controls for width, speed, color and pause
    #[arg(long)]
    debug: bool,

    #[arg(long, default_value = "Ring Clock")]
    title: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();
    if !(args.line_width.is_finite() && args.line_width > 0.0) {
        anyhow::bail!("--line-width must be positive, got {}", args.line_width);
    }

    let config = ScenarioConfig::builder()
        .window_width(args.width)
        .window_height(args.height)
        .max_framerate(args.fps)
        .numerals(!args.no_numerals)
        .debug(args.debug)
        .title(args.title)
        .maybe_seed(args.seed)
        .build();
    let params = Params {
        line_width: args.line_width,
        speed: args.speed,
        color: args.color,
        is_update: !args.paused,
    };

    ClockApp::new(config, params).show()
}
