// ============================================================================
// RING CLOCK SCENARIO
// ============================================================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

use crate::arc::RotatingArc;
use crate::clock::{ClockFace, TimeSource};
use crate::config::{ParamChange, ParamListener, Params, ScenarioConfig};
use crate::geometry::deg_to_rad;
use crate::gradation::{draw_gradation, tick_positions, Tick, TICK_COUNT};
use crate::scene::SceneHost;
use crate::surface::{LineCap, Surface};

/// Radii derived from the canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub main_radius: f64,
    /// Spacing between two neighbouring arcs
    pub delta_radius: f64,
}

impl RingGeometry {
    pub fn new(width: f64, height: f64, config: &ScenarioConfig) -> Self {
        let main_radius = width.min(height) * 0.5 * config.main_radius_factor;
        Self {
            main_radius,
            delta_radius: main_radius * config.ring_spacing_factor,
        }
    }

    pub fn arc_radius(&self, index: usize, arc_count: usize) -> f64 {
        self.main_radius + (index as f64 - arc_count as f64 / 2.0) * self.delta_radius
    }
}

/// The whole composition: gradation, clock face and the ring of arcs.
pub struct Scenario<H: SceneHost> {
    host: H,
    config: ScenarioConfig,
    params: Params,
    geometry: RingGeometry,
    face: ClockFace,
    arcs: Vec<RotatingArc>,
    clock: Box<dyn TimeSource>,
    listeners: Vec<Box<dyn ParamListener>>,
}

impl<H: SceneHost> Scenario<H> {
    /// Builds the scenario and draws the initial gradation.
    ///
    /// The outermost and innermost arcs are full circles; interior arcs get
    /// a random phase and span drawn from `rng`, once.
    pub fn new<R: Rng>(
        mut host: H,
        config: ScenarioConfig,
        params: Params,
        clock: Box<dyn TimeSource>,
        rng: &mut R,
    ) -> Self {
        let (width, height) = (host.width(), host.height());
        let geometry = RingGeometry::new(width, height, &config);
        let n = config.arc_count;

        let ticks = tick_positions(
            width / 2.0,
            height / 2.0,
            geometry.main_radius,
            geometry.delta_radius,
            n,
        );
        let surface = host.surface();
        apply_ambient_style(surface, &params);
        draw_gradation(surface, &ticks);

        let arcs = (0..n)
            .map(|i| {
                let (start, end) = if i == 0 || i == n - 1 {
                    (0.0, TAU)
                } else {
                    let start = deg_to_rad(rng.random_range(0.0..360.0));
                    let span = deg_to_rad(rng.random_range(0.0..360.0));
                    (start, start + span)
                };
                RotatingArc::new(
                    width / 2.0,
                    height / 2.0,
                    geometry.arc_radius(i, n),
                    start,
                    end,
                )
            })
            .collect();

        let face = ClockFace {
            radius_factor: config.dial_radius_factor,
            numerals: config.numerals,
            numeral_dot_radius: config.numeral_dot_radius,
        };

        log::debug!(
            "Scenario {width}x{height}: main radius {}, spacing {}, {n} arcs",
            geometry.main_radius,
            geometry.delta_radius
        );

        Self {
            host,
            config,
            params,
            geometry,
            face,
            arcs,
            clock,
            listeners: Vec::new(),
        }
    }

    /// Like [`Scenario::new`], seeding the arc layout from the config.
    /// Without a configured seed a fresh one is drawn; either way it is logged.
    pub fn seeded(
        host: H,
        config: ScenarioConfig,
        params: Params,
        clock: Box<dyn TimeSource>,
    ) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        log::info!("Arc layout seed: {seed}");
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(host, config, params, clock, &mut rng)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn geometry(&self) -> RingGeometry {
        self.geometry
    }

    pub fn arcs(&self) -> &[RotatingArc] {
        &self.arcs
    }

    pub fn ticks(&self) -> [Tick; TICK_COUNT] {
        tick_positions(
            self.host.width() / 2.0,
            self.host.height() / 2.0,
            self.geometry.main_radius,
            self.geometry.delta_radius,
            self.config.arc_count,
        )
    }

    /// Registers an observer called after every accepted parameter change.
    pub fn on_param_change(&mut self, listener: impl ParamListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Applies a parameter change from an external controller.
    ///
    /// A line width change redraws immediately; everything else is picked
    /// up by the next frame.
    pub fn apply(&mut self, change: ParamChange) -> bool {
        if !self.params.apply(change) {
            return false;
        }
        log::info!("Parameter changed: {change:?}");
        for listener in &mut self.listeners {
            listener.on_param_change(&change, &self.params);
        }
        if let ParamChange::LineWidth(_) = change {
            self.redraw();
        }
        true
    }

    /// Re-derives every radius and arc center from the host size, then redraws.
    pub fn resize(&mut self) {
        let (width, height) = (self.host.width(), self.host.height());
        self.geometry = RingGeometry::new(width, height, &self.config);
        let n = self.arcs.len();
        for (i, arc) in self.arcs.iter_mut().enumerate() {
            arc.x = width / 2.0;
            arc.y = height / 2.0;
            arc.radius = self.geometry.arc_radius(i, n);
        }
        log::debug!(
            "Resized to {width}x{height}: main radius {}, spacing {}",
            self.geometry.main_radius,
            self.geometry.delta_radius
        );
        self.redraw();
    }

    /// Draws a frame if the host says one is due. Returns whether it did.
    pub fn update(&mut self) -> bool {
        if !self.host.should_redraw() {
            return false;
        }
        self.redraw();
        true
    }

    /// Full frame: clear, ambient style, gradation, clock face, arcs.
    pub fn redraw(&mut self) {
        let params = self.params.clone();
        let (width, height) = (self.host.width(), self.host.height());
        let delta = self.host.elapsed_seconds();
        let time = self.clock.now();
        let ticks = self.ticks();
        log::trace!("Frame: delta {delta}s, time {time:?}");

        let surface = self.host.surface();
        surface.clear();
        apply_ambient_style(surface, &params);
        draw_gradation(surface, &ticks);
        self.face.draw(surface, width, height, time);
        for arc in &mut self.arcs {
            if params.is_update {
                arc.advance(delta, params.speed);
            }
            arc.render(surface);
        }
    }
}

fn apply_ambient_style(surface: &mut dyn Surface, params: &Params) {
    surface.set_line_cap(LineCap::Round);
    surface.set_stroke_color(params.color);
    surface.set_line_width(params.line_width);
}
