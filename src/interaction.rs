// Pointer-driven window interaction: drag-move and edge-resize.
//
// One state machine owns the press/move/release lifecycle. The controller
// never touches the host window directly; every pointer event returns the
// geometry and cursor the host should apply, so the wiring stays explicit
// method calls on a single thread.

use std::time::{Duration, Instant};

use log::debug;

use crate::geometry::{Point, Rect};
use crate::resize::{BASE_MARGIN, CursorShape, EdgeMask, classify_edge, cursor_for_mask};

pub const DEFAULT_MIN_WIDTH: i32 = 400;
pub const DEFAULT_MIN_HEIGHT: i32 = 300;
const CURSOR_REFRESH: Duration = Duration::from_millis(100);

/// Where windows may live and how logical coordinates map to device pixels.
/// Refreshed by the host on resize and monitor-change notifications.
#[derive(Clone, Copy, Debug)]
pub struct ScreenGeometry {
    pub available: Rect,
    pub dpi_scale: f64,
}

impl ScreenGeometry {
    pub fn new(available: Rect, dpi_scale: f64) -> Self {
        Self { available, dpi_scale }
    }

    /// Resize hit-zone width in device pixels, like the original's
    /// `int(10 * dpi_scale)`.
    #[inline]
    pub fn scaled_margin(&self) -> i32 {
        (BASE_MARGIN as f64 * self.dpi_scale) as i32
    }

    #[inline]
    fn to_device(&self, p: Point) -> Point {
        Point::new(
            (p.x as f64 * self.dpi_scale) as i32,
            (p.y as f64 * self.dpi_scale) as i32,
        )
    }

    fn rect_to_device(&self, r: Rect) -> Rect {
        Rect::new(
            (r.x as f64 * self.dpi_scale) as i32,
            (r.y as f64 * self.dpi_scale) as i32,
            (r.w as f64 * self.dpi_scale) as i32,
            (r.h as f64 * self.dpi_scale) as i32,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Session {
    Idle,
    /// Pointer grab on the window body; `offset` is pointer minus origin.
    Dragging { offset: Point },
    /// Pointer grab on an edge; geometry deltas apply to the masked edges.
    Resizing {
        mask: EdgeMask,
        anchor_pointer: Point,
        anchor_geometry: Rect,
    },
}

/// What the host should apply after a pointer event. `None` fields mean
/// "leave it alone".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerUpdate {
    pub geometry: Option<Rect>,
    pub cursor: Option<CursorShape>,
}

pub struct WindowInteractionController {
    screen: ScreenGeometry,
    min_width: i32,
    min_height: i32,
    session: Session,
    last_cursor: Option<CursorShape>,
    last_cursor_refresh: Instant,
}

impl WindowInteractionController {
    pub fn new(screen: ScreenGeometry) -> Self {
        Self {
            screen,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            session: Session::Idle,
            last_cursor: None,
            last_cursor_refresh: Instant::now(),
        }
    }

    pub fn set_min_size(&mut self, min_width: i32, min_height: i32) {
        self.min_width = min_width.max(1);
        self.min_height = min_height.max(1);
    }

    /// New screen rectangle or DPI scale (monitor change, resolution change).
    pub fn set_screen_geometry(&mut self, screen: ScreenGeometry) {
        self.screen = screen;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.session, Session::Dragging { .. })
    }

    #[inline]
    pub fn is_resizing(&self) -> bool {
        matches!(self.session, Session::Resizing { .. })
    }

    /// Active edge mask, empty outside a resize session.
    pub fn edge_mask(&self) -> EdgeMask {
        match self.session {
            Session::Resizing { mask, .. } => mask,
            _ => EdgeMask::empty(),
        }
    }

    /// Edge mask under the pointer right now, independent of any session.
    pub fn hit_test(&self, global: Point, window: Rect) -> EdgeMask {
        let local = global - window.origin();
        classify_edge(
            self.screen.to_device(local),
            self.screen.rect_to_device(Rect::new(0, 0, window.w, window.h)),
            self.screen.scaled_margin(),
        )
    }

    /// Left button pressed at `global` over `window`. An edge hit opens a
    /// resize session, anything else starts a drag.
    pub fn pointer_pressed(&mut self, global: Point, window: Rect) {
        let mask = self.hit_test(global, window);
        self.session = if mask.is_empty() {
            debug!("drag session from {:?}", global);
            Session::Dragging { offset: global - window.origin() }
        } else {
            debug!("resize session mask={:?} from {:?}", mask, global);
            Session::Resizing {
                mask,
                anchor_pointer: global,
                anchor_geometry: window,
            }
        };
    }

    /// Pointer moved with the button held. Returns the geometry to apply
    /// (already clamped) and any cursor change.
    pub fn pointer_moved(&mut self, global: Point, window: Rect) -> PointerUpdate {
        let geometry = match self.session {
            Session::Resizing { mask, anchor_pointer, anchor_geometry } => {
                let delta = global - anchor_pointer;
                Some(self.resized_geometry(mask, anchor_geometry, delta))
            }
            Session::Dragging { offset } => {
                let origin = self
                    .screen
                    .available
                    .clamp_origin(global - offset, window.w, window.h);
                Some(window.moved_to(origin))
            }
            Session::Idle => None,
        };
        let cursor = self.refresh_cursor(global, geometry.unwrap_or(window));
        PointerUpdate { geometry, cursor }
    }

    /// Button released: the session ends and the hover cursor is recomputed
    /// immediately.
    pub fn pointer_released(&mut self, global: Point, window: Rect) -> PointerUpdate {
        self.session = Session::Idle;
        PointerUpdate {
            geometry: None,
            cursor: self.refresh_cursor(global, window),
        }
    }

    /// Focus or button-state loss mid-session: treat it like a release with
    /// no trailing pointer information.
    pub fn cancel(&mut self) {
        if self.session != Session::Idle {
            debug!("interaction session cancelled");
            self.session = Session::Idle;
        }
    }

    /// Periodic cursor re-evaluation (100 ms). A child control stealing the
    /// pointer can leave a stale resize cursor behind; when the pointer is
    /// no longer over the window, force the default shape and forget the
    /// cached one. `pointer` is `None` when the host has lost track of it.
    pub fn cursor_tick(
        &mut self,
        now: Instant,
        pointer: Option<Point>,
        window: Rect,
    ) -> Option<CursorShape> {
        if now.duration_since(self.last_cursor_refresh) < CURSOR_REFRESH {
            return None;
        }
        self.last_cursor_refresh = now;
        match pointer {
            Some(p) if window.contains(p) => self.refresh_cursor(p, window),
            _ => {
                if self.last_cursor.take().is_some() {
                    Some(CursorShape::Default)
                } else {
                    None
                }
            }
        }
    }

    /// Map the hover position to a cursor shape, reporting only changes.
    fn refresh_cursor(&mut self, global: Point, window: Rect) -> Option<CursorShape> {
        let shape = match self.session {
            // Mid-session the grabbed edge owns the cursor.
            Session::Resizing { mask, .. } => cursor_for_mask(mask),
            _ => cursor_for_mask(self.hit_test(global, window)),
        };
        if self.last_cursor != Some(shape) {
            self.last_cursor = Some(shape);
            Some(shape)
        } else {
            None
        }
    }

    /// Apply a pointer delta to the edges named in `mask`. Each edge clamps
    /// independently so the opposite edge is never crossed (minimum size per
    /// axis), then the result is intersected with the available screen rect.
    fn resized_geometry(&self, mask: EdgeMask, anchor: Rect, delta: Point) -> Rect {
        let mut left = anchor.left();
        let mut right = anchor.right();
        let mut top = anchor.top();
        let mut bottom = anchor.bottom();

        if mask.contains(EdgeMask::LEFT) {
            left = (anchor.left() + delta.x).min(anchor.right() - self.min_width);
        }
        if mask.contains(EdgeMask::RIGHT) {
            right = (anchor.right() + delta.x).max(anchor.left() + self.min_width);
        }
        if mask.contains(EdgeMask::TOP) {
            top = (anchor.top() + delta.y).min(anchor.bottom() - self.min_height);
        }
        if mask.contains(EdgeMask::BOTTOM) {
            bottom = (anchor.bottom() + delta.y).max(anchor.top() + self.min_height);
        }

        let resized = Rect::from_edges(left, top, right, bottom);
        let clipped = resized.intersect(&self.screen.available);
        // A fully off-screen result would otherwise vanish; keep the
        // pre-intersection geometry in that degenerate case.
        if clipped.is_empty() { resized } else { clipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> ScreenGeometry {
        ScreenGeometry::new(Rect::new(0, 0, 1920, 1080), 1.0)
    }

    fn controller() -> WindowInteractionController {
        WindowInteractionController::new(screen())
    }

    #[test]
    fn press_on_body_starts_drag() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        ctl.pointer_pressed(Point::new(500, 400), window);
        assert!(ctl.is_dragging());
        assert!(!ctl.is_resizing());
    }

    #[test]
    fn press_on_edge_starts_resize() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        // 2 px inside the right edge.
        ctl.pointer_pressed(Point::new(898, 400), window);
        assert!(ctl.is_resizing());
        assert_eq!(ctl.edge_mask(), EdgeMask::RIGHT);
    }

    #[test]
    fn right_edge_delta_grows_width_exactly() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        ctl.pointer_pressed(Point::new(898, 400), window);
        let update = ctl.pointer_moved(Point::new(948, 400), window);
        let geo = update.geometry.unwrap();
        assert_eq!(geo.w, 850);
        assert_eq!(geo.h, 600);
        assert_eq!(geo.origin(), window.origin());
    }

    #[test]
    fn resize_clamps_at_minimum_size() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        ctl.pointer_pressed(Point::new(898, 400), window);
        // Pull the right edge far past the left edge.
        let update = ctl.pointer_moved(Point::new(-2000, 400), window);
        let geo = update.geometry.unwrap();
        assert_eq!(geo.w, DEFAULT_MIN_WIDTH);
        assert_eq!(geo.left(), window.left());
    }

    #[test]
    fn left_edge_resize_moves_origin_and_width() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        ctl.pointer_pressed(Point::new(102, 400), window);
        assert_eq!(ctl.edge_mask(), EdgeMask::LEFT);
        let update = ctl.pointer_moved(Point::new(72, 400), window);
        let geo = update.geometry.unwrap();
        assert_eq!(geo.left(), 70);
        assert_eq!(geo.w, 830);
        assert_eq!(geo.right(), window.right());
    }

    #[test]
    fn corner_resize_applies_both_axes() {
        let mut ctl = controller();
        let window = Rect::new(200, 200, 800, 600);
        // Bottom-right corner.
        ctl.pointer_pressed(Point::new(997, 797), window);
        assert_eq!(ctl.edge_mask(), EdgeMask::RIGHT | EdgeMask::BOTTOM);
        let update = ctl.pointer_moved(Point::new(1037, 827), window);
        let geo = update.geometry.unwrap();
        assert_eq!(geo.w, 840);
        assert_eq!(geo.h, 630);
    }

    #[test]
    fn resize_is_clipped_to_screen() {
        let mut ctl = controller();
        let window = Rect::new(1500, 100, 400, 600);
        ctl.pointer_pressed(Point::new(1898, 400), window);
        // Drag the right edge past the screen edge.
        let update = ctl.pointer_moved(Point::new(2400, 400), window);
        let geo = update.geometry.unwrap();
        assert_eq!(geo.right(), 1920);
    }

    #[test]
    fn drag_clamps_to_screen_right_minus_width() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        ctl.pointer_pressed(Point::new(500, 400), window);
        // Throw the window far off to the bottom-right.
        let update = ctl.pointer_moved(Point::new(5000, 4000), window);
        let geo = update.geometry.unwrap();
        assert_eq!(geo.x, 1920 - 800);
        assert_eq!(geo.y, 1080 - 600);
        assert_eq!((geo.w, geo.h), (800, 600));
    }

    #[test]
    fn drag_follows_the_anchor_offset() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        ctl.pointer_pressed(Point::new(500, 400), window);
        let update = ctl.pointer_moved(Point::new(520, 390), window);
        assert_eq!(update.geometry.unwrap().origin(), Point::new(120, 90));
    }

    #[test]
    fn release_and_cancel_return_to_idle() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        ctl.pointer_pressed(Point::new(500, 400), window);
        ctl.pointer_released(Point::new(500, 400), window);
        assert!(!ctl.is_dragging());

        ctl.pointer_pressed(Point::new(898, 400), window);
        ctl.cancel();
        assert!(!ctl.is_resizing());
        assert!(ctl.pointer_moved(Point::new(600, 500), window).geometry.is_none());
    }

    #[test]
    fn cursor_reports_changes_only() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        // Hover over the right edge: one change notification.
        let u1 = ctl.pointer_moved(Point::new(898, 400), window);
        assert_eq!(u1.cursor, Some(CursorShape::ResizeHorizontal));
        // Still on the same edge: no repeat.
        let u2 = ctl.pointer_moved(Point::new(898, 420), window);
        assert_eq!(u2.cursor, None);
        // Back to the interior: reset notification.
        let u3 = ctl.pointer_moved(Point::new(500, 400), window);
        assert_eq!(u3.cursor, Some(CursorShape::Default));
    }

    #[test]
    fn cursor_tick_resets_stale_cursor_when_pointer_leaves() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        ctl.pointer_moved(Point::new(898, 400), window); // resize cursor cached
        let later = Instant::now() + Duration::from_millis(200);
        let reset = ctl.cursor_tick(later, Some(Point::new(2000, 50)), window);
        assert_eq!(reset, Some(CursorShape::Default));
        // Nothing cached any more: the next tick stays quiet.
        let reset = ctl.cursor_tick(later + Duration::from_millis(200), None, window);
        assert_eq!(reset, None);
    }

    #[test]
    fn cursor_tick_rate_limits() {
        let mut ctl = controller();
        let window = Rect::new(100, 100, 800, 600);
        ctl.pointer_moved(Point::new(898, 400), window);
        // Immediately after construction less than 100 ms have passed.
        assert_eq!(ctl.cursor_tick(Instant::now(), None, window), None);
    }

    #[test]
    fn dpi_scale_widens_the_hit_zone() {
        let mut ctl = controller();
        ctl.set_screen_geometry(ScreenGeometry::new(Rect::new(0, 0, 3840, 2160), 2.0));
        let window = Rect::new(0, 0, 800, 600);
        // 9 logical px from the left edge is outside the 1x hit zone
        // (margin 8) but inside the 2x one: device x=18 against a scaled
        // margin of 10*2 - 2 = 18.
        let mask = ctl.hit_test(Point::new(9, 300), window);
        assert_eq!(mask, EdgeMask::LEFT);
    }
}
