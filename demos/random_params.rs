use rand::Rng;
use ringclock::controls::PALETTE;
use ringclock::{ClockApp, ParamChange, Params, ScenarioConfig};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = ScenarioConfig::builder()
        .title("Ring Clock (random parameters)".to_string())
        .seed(2024)
        .build();

    let (sender, receiver) = mpsc::channel();

    // Plays the role of an external debug panel
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let changes = [
                ParamChange::Speed(rng.random_range(-8..=8) as f64 * 0.25),
                ParamChange::LineWidth(rng.random_range(1..=10) as f64),
                ParamChange::Color(PALETTE[rng.random_range(0..PALETTE.len())]),
            ];

            if changes.iter().any(|change| sender.send(*change).is_err()) {
                break;
            }

            thread::sleep(Duration::from_millis(1500));
        }
    });

    println!("Displaying the ring clock with speed, width and color changing every 1.5s");
    println!("Close the window to exit");

    ClockApp::new(config, Params::default()).show_with_commands(receiver)
}
