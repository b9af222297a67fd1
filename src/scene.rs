// ============================================================================
// SCENE HOST
// ============================================================================

use std::time::{Duration, Instant};

use crate::surface::Surface;

/// What a scenario needs from whoever owns the window and the frame loop.
pub trait SceneHost {
    type Surface: Surface;

    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn surface(&mut self) -> &mut Self::Surface;
    /// Seconds elapsed since the previous accepted frame
    fn elapsed_seconds(&self) -> f64;
    /// Frame gate: true when a new frame is due
    fn should_redraw(&mut self) -> bool;
}

/// Caps the frame rate and measures the delta between accepted frames.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    frame_duration: Duration,
    last_frame: Instant,
    delta: f64,
}

impl FrameTimer {
    pub fn new(max_framerate: f64, now: Instant) -> Self {
        let frame_duration = if max_framerate.is_finite() && max_framerate > 0.0 {
            Duration::from_secs_f64(1.0 / max_framerate)
        } else {
            Duration::ZERO
        };
        Self {
            frame_duration,
            last_frame: now,
            delta: 0.0,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Seconds between the last two accepted frames
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Earliest instant the next frame will be accepted
    pub fn next_frame(&self) -> Instant {
        self.last_frame + self.frame_duration
    }

    /// Accepts a frame at `now` if at least one frame duration has passed.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        let elapsed = now.saturating_duration_since(self.last_frame);
        if elapsed < self.frame_duration {
            return None;
        }
        self.last_frame = now;
        self.delta = elapsed.as_secs_f64();
        Some(self.delta)
    }
}

/// Host without a window: fixed size, fixed frame delta.
#[derive(Debug)]
pub struct HeadlessHost<S> {
    surface: S,
    width: f64,
    height: f64,
    pub delta_seconds: f64,
    pub redraw_due: bool,
}

impl<S: Surface> HeadlessHost<S> {
    pub fn new(surface: S, width: f64, height: f64, delta_seconds: f64) -> Self {
        Self {
            surface,
            width,
            height,
            delta_seconds,
            redraw_due: true,
        }
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

impl<S: Surface> SceneHost for HeadlessHost<S> {
    type Surface = S;

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn surface(&mut self) -> &mut S {
        &mut self.surface
    }

    fn elapsed_seconds(&self) -> f64 {
        self.delta_seconds
    }

    fn should_redraw(&mut self) -> bool {
        self.redraw_due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_timer_gates_by_duration() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(50.0, start);
        assert_eq!(timer.frame_duration(), Duration::from_millis(20));

        assert_eq!(timer.tick(start + Duration::from_millis(10)), None);
        assert_eq!(timer.delta(), 0.0);

        let delta = timer.tick(start + Duration::from_millis(25));
        assert_eq!(delta, Some(0.025));
        assert_eq!(timer.next_frame(), start + Duration::from_millis(45));

        // Measured from the accepted frame, not from the rejected one
        assert_eq!(timer.tick(start + Duration::from_millis(40)), None);
        assert_eq!(timer.tick(start + Duration::from_millis(45)), Some(0.02));
    }

    #[test]
    fn test_frame_timer_uncapped() {
        let start = Instant::now();
        let mut timer = FrameTimer::new(0.0, start);
        assert_eq!(timer.tick(start), Some(0.0));
    }
}
