// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod arc;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod controls;
pub mod geometry;
pub mod gradation;
pub mod scenario;
pub mod scene;
pub mod surface;

pub use arc::RotatingArc;
pub use canvas::PixelCanvas;
pub use clock::{ClockFace, ClockTime, HandAngles, LocalClock, TimeSource};
pub use config::{Color, ParamChange, ParamListener, Params, ScenarioConfig};
pub use controls::{ControlKey, DebugControls};
pub use scenario::{RingGeometry, Scenario};
pub use scene::{FrameTimer, HeadlessHost, SceneHost};
pub use surface::{CommandRecorder, DrawCommand, LineCap, Surface};

// External crate imports
use anyhow::anyhow;
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

// ============================================================================
// PUBLIC API - WINDOWED DRIVER
// ============================================================================

/// Runs a [`Scenario`] in a window until it is closed.
#[derive(Debug, Clone)]
pub struct ClockApp {
    config: ScenarioConfig,
    params: Params,
}

impl ClockApp {
    pub fn new(config: ScenarioConfig, params: Params) -> Self {
        Self { config, params }
    }

    pub fn show(&self) -> anyhow::Result<()> {
        self.run_window(None)
    }

    /// Like [`ClockApp::show`], also applying every change received on
    /// `receiver` at the start of the next frame.
    pub fn show_with_commands(&self, receiver: Receiver<ParamChange>) -> anyhow::Result<()> {
        self.run_window(Some(receiver))
    }

    fn run_window(&self, receiver: Option<Receiver<ParamChange>>) -> anyhow::Result<()> {
        let event_loop =
            EventLoop::new().map_err(|err| anyhow!("cannot create event loop: {err}"))?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(|err| anyhow!("cannot create window: {err}"))?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)
            .map_err(|err| anyhow!("cannot create pixel surface: {err}"))?;
        log::info!("Window ready at {}x{}", size.width, size.height);

        let host = WindowHost {
            canvas: PixelCanvas::new(
                size.width as usize,
                size.height as usize,
                self.config.background_color,
            ),
            timer: FrameTimer::new(self.config.max_framerate, Instant::now()),
        };
        let mut scenario = Scenario::seeded(
            host,
            self.config.clone(),
            self.params.clone(),
            Box::new(LocalClock),
        );

        let debug = self.config.debug;
        if debug {
            let title = self.config.title.clone();
            let titled = window.clone();
            scenario.on_param_change(move |_: &ParamChange, params: &Params| {
                titled.set_title(&format!(
                    "{title} | width {} | speed {} | {}",
                    params.line_width,
                    params.speed,
                    if params.is_update { "running" } else { "paused" }
                ));
            });
            log::info!("Debug controls: arrows adjust width/speed, C cycles color, space pauses");
        }
        let controls = DebugControls;
        let window_clone = window.clone();

        event_loop
            .run(move |event, window_target| match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        // Minimized
                        if new_size.width == 0 || new_size.height == 0 {
                            return;
                        }
                        if let Err(err) = pixels
                            .resize_buffer(new_size.width, new_size.height)
                            .and_then(|()| pixels.resize_surface(new_size.width, new_size.height))
                        {
                            log::error!("Cannot resize pixel surface: {err}");
                            window_target.exit();
                            return;
                        }
                        scenario
                            .host_mut()
                            .canvas
                            .resize(new_size.width as usize, new_size.height as usize);
                        scenario.resize();
                        window_clone.request_redraw();
                    }
                    WindowEvent::KeyboardInput { event, .. }
                        if debug && event.state == ElementState::Pressed =>
                    {
                        let change = control_key(&event.logical_key)
                            .and_then(|key| controls.change_for(key, scenario.params()));
                        if let Some(change) = change {
                            scenario.apply(change);
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            while let Ok(change) = receiver.try_recv() {
                                scenario.apply(change);
                            }
                        }
                        scenario.update();

                        pixels
                            .frame_mut()
                            .copy_from_slice(scenario.host().canvas.frame());
                        if let Err(err) = pixels.render() {
                            log::error!("Render failed: {err}");
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    let next_frame = scenario.host().timer.next_frame();
                    if Instant::now() >= next_frame {
                        window_clone.request_redraw();
                    }
                    window_target.set_control_flow(ControlFlow::WaitUntil(next_frame));
                }
                _ => {}
            })
            .map_err(|err| anyhow!("event loop failed: {err}"))?;

        Ok(())
    }
}

// ============================================================================
// INTERNAL IMPLEMENTATION
// ============================================================================

struct WindowHost {
    canvas: PixelCanvas,
    timer: FrameTimer,
}

impl SceneHost for WindowHost {
    type Surface = PixelCanvas;

    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn surface(&mut self) -> &mut PixelCanvas {
        &mut self.canvas
    }

    fn elapsed_seconds(&self) -> f64 {
        self.timer.delta()
    }

    fn should_redraw(&mut self) -> bool {
        self.timer.tick(Instant::now()).is_some()
    }
}

fn control_key(key: &Key) -> Option<ControlKey> {
    match key {
        Key::Named(NamedKey::ArrowUp) => Some(ControlKey::WiderLines),
        Key::Named(NamedKey::ArrowDown) => Some(ControlKey::NarrowerLines),
        Key::Named(NamedKey::ArrowRight) => Some(ControlKey::Faster),
        Key::Named(NamedKey::ArrowLeft) => Some(ControlKey::Slower),
        Key::Named(NamedKey::Space) => Some(ControlKey::TogglePause),
        Key::Character(c) if c.eq_ignore_ascii_case("c") => Some(ControlKey::NextColor),
        _ => None,
    }
}
