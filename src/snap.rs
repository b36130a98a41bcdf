// Drag-to-edge snapping and maximize/restore.
//
// Dropping a window against the top of the screen maximizes it; against the
// left or right edge tiles it to that half. Detection is pure geometry; the
// host decides when to consult it (press on the title strip, or while a
// drag is in flight).

use crate::geometry::{Point, Rect};

/// How close to a screen edge a press counts as a snap request.
pub const SNAP_MARGIN: i32 = 20;
/// Tighter band used while a drag is already in progress, so a window can
/// still be moved along the top of the screen without maximizing.
pub const DRAG_SNAP_MARGIN: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapTarget {
    Maximize,
    LeftHalf,
    RightHalf,
}

impl SnapTarget {
    /// Geometry the snap resolves to on the given screen.
    pub fn rect(self, screen: Rect) -> Rect {
        match self {
            SnapTarget::Maximize => screen,
            SnapTarget::LeftHalf => Rect::new(screen.x, screen.y, screen.w / 2, screen.h),
            SnapTarget::RightHalf => Rect::new(
                screen.x + screen.w / 2,
                screen.y,
                screen.w - screen.w / 2,
                screen.h,
            ),
        }
    }
}

/// Snap target for a pointer press near a screen edge. Top wins over the
/// sides when the pointer sits in a corner band.
pub fn snap_at_press(pos: Point, screen: Rect, margin: i32) -> Option<SnapTarget> {
    if pos.y <= screen.top() + margin {
        Some(SnapTarget::Maximize)
    } else if pos.x <= screen.left() + margin {
        Some(SnapTarget::LeftHalf)
    } else if pos.x >= screen.right() - margin {
        Some(SnapTarget::RightHalf)
    } else {
        None
    }
}

/// Snap check while dragging: only the top edge triggers, inside a narrow
/// band, so ordinary moves near the sides stay moves.
pub fn snap_while_dragging(pos: Point, screen: Rect) -> Option<SnapTarget> {
    (pos.y <= screen.top() + DRAG_SNAP_MARGIN).then_some(SnapTarget::Maximize)
}

/// Maximize toggle that remembers the geometry to restore to.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaximizeState {
    pub maximized: bool,
    pub normal_geometry: Option<Rect>,
}

impl MaximizeState {
    /// Flip between maximized and normal, returning the geometry the host
    /// should apply. Restoring without a remembered geometry centers a
    /// half-screen window.
    pub fn toggle(&mut self, current: Rect, screen: Rect) -> Rect {
        if self.maximized {
            self.maximized = false;
            self.normal_geometry.take().unwrap_or_else(|| {
                let w = screen.w / 2;
                let h = screen.h / 2;
                Rect::new(screen.x + w / 2, screen.y + h / 2, w, h)
            })
        } else {
            self.maximized = true;
            self.normal_geometry = Some(current);
            screen
        }
    }
}
