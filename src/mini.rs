// Mini mode: the window parks against the nearest screen edge, leaving a
// thin visible strip, and slides back out when the pointer enters it.
//
// The mode's state is an owned struct the host passes around, not an
// attribute tacked onto the window. Slides are eased position animations
// the host samples once per frame; nothing here blocks or schedules.

use std::time::{Duration, Instant};

use log::debug;

use crate::geometry::{Point, Rect};

/// Pixels of the window left visible while parked.
pub const VISIBLE_STRIP: i32 = 10;
pub const SLIDE_DURATION: Duration = Duration::from_millis(300);

/// Whether mini mode is on and what geometry to restore when it ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct MiniModeState {
    pub enabled: bool,
    pub normal_geometry: Option<Rect>,
}

#[inline]
fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// An in-flight slide of the window origin.
#[derive(Clone, Copy, Debug)]
pub struct SlideAnimation {
    from: Point,
    to: Point,
    started: Instant,
    duration: Duration,
}

impl SlideAnimation {
    pub fn new(from: Point, to: Point, now: Instant) -> Self {
        Self { from, to, started: now, duration: SLIDE_DURATION }
    }

    pub fn finished(&self, now: Instant) -> bool {
        now.duration_since(self.started) >= self.duration
    }

    /// Origin at time `now`, eased toward the target.
    pub fn sample(&self, now: Instant) -> Point {
        let t = now.duration_since(self.started).as_secs_f32() / self.duration.as_secs_f32();
        if t >= 1.0 {
            return self.to;
        }
        let k = ease_out_quad(t);
        Point::new(
            self.from.x + ((self.to.x - self.from.x) as f32 * k).round() as i32,
            self.from.y + ((self.to.y - self.from.y) as f32 * k).round() as i32,
        )
    }
}

/// Controller for mini mode. Owns the state and the running slide; the host
/// applies whatever origin `tick` reports.
pub struct WindowMiniMode {
    state: MiniModeState,
    animation: Option<SlideAnimation>,
}

impl WindowMiniMode {
    pub fn new() -> Self {
        Self { state: MiniModeState::default(), animation: None }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    #[inline]
    pub fn state(&self) -> MiniModeState {
        self.state
    }

    /// Enter mini mode: remember the current geometry and start sliding
    /// toward the nearest screen edge. No-op when already enabled.
    pub fn enable(&mut self, window: Rect, screen: Rect, now: Instant) {
        if self.state.enabled {
            return;
        }
        debug!("mini mode on, parking from {:?}", window);
        self.state.enabled = true;
        self.state.normal_geometry = Some(window);
        self.attach_to_nearest_edge(window, screen, now);
    }

    /// Leave mini mode, returning the geometry to restore (if any was
    /// remembered). Any running slide stops dead.
    pub fn disable(&mut self) -> Option<Rect> {
        if !self.state.enabled {
            return None;
        }
        debug!("mini mode off");
        self.state.enabled = false;
        self.animation = None;
        self.state.normal_geometry
    }

    pub fn toggle(&mut self, window: Rect, screen: Rect, now: Instant) -> Option<Rect> {
        if self.state.enabled {
            self.disable()
        } else {
            self.enable(window, screen, now);
            None
        }
    }

    /// Slide toward whichever screen edge is closest to the window center.
    /// Ties resolve in left, right, top, bottom order.
    pub fn attach_to_nearest_edge(&mut self, window: Rect, screen: Rect, now: Instant) {
        let center = window.center();
        let distances = [
            (center.x - screen.left()).abs(),
            (screen.right() - center.x).abs(),
            (center.y - screen.top()).abs(),
            (screen.bottom() - center.y).abs(),
        ];
        let mut nearest = 0;
        for (i, d) in distances.iter().enumerate() {
            if *d < distances[nearest] {
                nearest = i;
            }
        }
        let target = self.edge_target(nearest, window, screen);
        self.animate_to(window.origin(), target, now);
    }

    /// Parking origin for an edge index (0 left, 1 right, 2 top, 3 bottom):
    /// the window sits off-screen except for the visible strip, with its
    /// free axis clamped onto the screen.
    fn edge_target(&self, edge: usize, window: Rect, screen: Rect) -> Point {
        let clamped_x = screen
            .left()
            .max(window.x.min(screen.right() - window.w));
        let clamped_y = screen
            .top()
            .max(window.y.min(screen.bottom() - window.h));
        match edge {
            0 => Point::new(screen.left() - window.w + VISIBLE_STRIP, clamped_y),
            1 => Point::new(screen.right() - VISIBLE_STRIP, clamped_y),
            2 => Point::new(clamped_x, screen.top() - window.h + VISIBLE_STRIP),
            _ => Point::new(clamped_x, screen.bottom() - VISIBLE_STRIP),
        }
    }

    fn animate_to(&mut self, from: Point, to: Point, now: Instant) {
        self.animation = Some(SlideAnimation::new(from, to, now));
    }

    /// Sample the running slide. Returns the origin to apply this frame, or
    /// `None` when nothing is animating.
    pub fn tick(&mut self, now: Instant) -> Option<Point> {
        let anim = self.animation?;
        let pos = anim.sample(now);
        if anim.finished(now) {
            self.animation = None;
        }
        Some(pos)
    }

    /// Pointer entered the parked window: bring it back out to its normal
    /// geometry (or a default strip along the right edge when none is
    /// remembered). The caller applies the returned rect.
    pub fn expand(&mut self, window: Rect, screen: Rect) -> Option<Rect> {
        if !self.state.enabled {
            return None;
        }
        self.animation = None;
        Some(self.state.normal_geometry.unwrap_or_else(|| {
            Rect::new(screen.right() - window.w, screen.top(), window.w, screen.h)
        }))
    }

    /// Pointer left the window: park again unless it is actually still over
    /// the window (a child control can produce spurious leaves).
    pub fn handle_leave(&mut self, window: Rect, pointer: Point, screen: Rect, now: Instant) {
        if self.state.enabled && !window.contains(pointer) {
            self.attach_to_nearest_edge(window, screen, now);
        }
    }
}

impl Default for WindowMiniMode {
    fn default() -> Self {
        Self::new()
    }
}
