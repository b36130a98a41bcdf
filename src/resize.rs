// Edge classification for frameless-window resizing.
//
// Pure functions from (pointer position in device pixels, window rectangle
// in device pixels, DPI-scaled base margin) to an edge bitmask. The margin
// adapts to the pointer's horizontal position: wider near the corners,
// narrower mid-edge, because diagonal corner hits get unreliable at high
// DPI scale otherwise.

use bitflags::bitflags;

use crate::geometry::{Point, Rect};

/// Default hit-zone width in logical pixels, before DPI scaling.
pub const BASE_MARGIN: i32 = 10;
/// Hard cap on the adaptive margin, in device pixels.
pub const MARGIN_CAP: i32 = 20;

bitflags! {
    /// Which window edges the pointer is close enough to grab.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EdgeMask: u8 {
        const LEFT = 1;
        const RIGHT = 2;
        const TOP = 4;
        const BOTTOM = 8;
    }
}

impl EdgeMask {
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        matches!(self.bits(), 5 | 6 | 9 | 10)
    }
}

/// Cursor shape the host window should show for a given edge mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorShape {
    Default,
    ResizeHorizontal,
    ResizeVertical,
    /// Top-left/bottom-right diagonal.
    ResizeDiagonalMain,
    /// Top-right/bottom-left diagonal.
    ResizeDiagonalCross,
}

pub fn cursor_for_mask(mask: EdgeMask) -> CursorShape {
    match mask.bits() {
        1 | 2 => CursorShape::ResizeHorizontal,
        4 | 8 => CursorShape::ResizeVertical,
        5 | 10 => CursorShape::ResizeDiagonalMain,
        6 | 9 => CursorShape::ResizeDiagonalCross,
        _ => CursorShape::Default,
    }
}

/// Margin for a pointer at horizontal position `x` in a window `width` wide:
/// base plus round(2 * (1 - |x/width - 0.5| * 4)), capped at 20 device
/// pixels. The correction is positive near the corners and negative around
/// the horizontal midpoint.
pub fn adaptive_margin(base: i32, x: i32, width: i32) -> i32 {
    if width <= 0 {
        return base.min(MARGIN_CAP);
    }
    let centered = (x as f64 / width as f64 - 0.5).abs();
    let correction = (2.0 * (1.0 - centered * 4.0)).round() as i32;
    (base + correction).min(MARGIN_CAP)
}

/// Classify a pointer against a window rectangle. Both are in device pixels;
/// `base_margin` already carries the DPI scale. Returns the edge mask, empty
/// for interior positions.
///
/// Diagonal jitter suppression: a corner mask collapses to a single axis
/// only when the pointer sits at least twice as deep toward one edge as the
/// other, so genuine corner hits stay diagonal while glancing passes near a
/// corner do not flicker between diagonal and single-edge cursors.
pub fn classify_edge(pos: Point, rect: Rect, base_margin: i32) -> EdgeMask {
    let x = pos.x - rect.x;
    let y = pos.y - rect.y;
    let margin = adaptive_margin(base_margin, x, rect.w);

    let mut mask = EdgeMask::empty();
    if x <= margin {
        mask |= EdgeMask::LEFT;
    }
    if x >= rect.w - margin {
        mask |= EdgeMask::RIGHT;
    }
    if y <= margin {
        mask |= EdgeMask::TOP;
    }
    if y >= rect.h - margin {
        mask |= EdgeMask::BOTTOM;
    }

    if mask.is_diagonal() {
        // Depth of intrusion toward the active edge on each axis.
        let dx = if mask.contains(EdgeMask::LEFT) { x } else { rect.w - x };
        let dy = if mask.contains(EdgeMask::TOP) { y } else { rect.h - y };
        if dx * 2 <= dy {
            mask &= EdgeMask::LEFT | EdgeMask::RIGHT;
        } else if dy * 2 <= dx {
            mask &= EdgeMask::TOP | EdgeMask::BOTTOM;
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Rect = Rect { x: 0, y: 0, w: 400, h: 300 };

    #[test]
    fn corner_yields_diagonal_mask() {
        let mask = classify_edge(Point::new(5, 5), WINDOW, BASE_MARGIN);
        assert_eq!(mask, EdgeMask::LEFT | EdgeMask::TOP);
        assert_eq!(mask.bits(), 5);
    }

    #[test]
    fn center_yields_empty_mask() {
        let mask = classify_edge(Point::new(200, 150), WINDOW, BASE_MARGIN);
        assert!(mask.is_empty());
    }

    #[test]
    fn single_edges() {
        assert_eq!(
            classify_edge(Point::new(395, 150), WINDOW, BASE_MARGIN),
            EdgeMask::RIGHT
        );
        assert_eq!(
            classify_edge(Point::new(200, 297), WINDOW, BASE_MARGIN),
            EdgeMask::BOTTOM
        );
    }

    #[test]
    fn margin_narrows_mid_edge_and_widens_at_corners() {
        // Mid-edge: correction is round(2 * (1 - 0)) = +2... at the exact
        // center |x/w - 0.5| = 0, so the correction is +2 there and falls to
        // -2 at the ends. Near a corner (x=5 of 400) it is -2, mid-span
        // (x=100, quarter point) it is 0.
        assert_eq!(adaptive_margin(10, 200, 400), 12);
        assert_eq!(adaptive_margin(10, 100, 400), 10);
        assert_eq!(adaptive_margin(10, 5, 400), 8);
        // The cap holds for large DPI-scaled bases.
        assert_eq!(adaptive_margin(30, 200, 400), 20);
    }

    #[test]
    fn repeated_calls_are_identical() {
        // Jitter suppression must be stateless: same input, same mask.
        let first = classify_edge(Point::new(3, 3), WINDOW, BASE_MARGIN);
        for _ in 0..100 {
            assert_eq!(classify_edge(Point::new(3, 3), WINDOW, BASE_MARGIN), first);
        }
    }

    #[test]
    fn lopsided_corner_collapses_to_the_nearer_axis() {
        // Hugging the left edge while barely inside the top margin: the
        // horizontal intrusion is twice as deep, so only LEFT survives.
        let mask = classify_edge(Point::new(2, 8), WINDOW, BASE_MARGIN);
        assert_eq!(mask, EdgeMask::LEFT);
        // Mirror case along the top edge.
        let mask = classify_edge(Point::new(8, 2), WINDOW, BASE_MARGIN);
        assert_eq!(mask, EdgeMask::TOP);
    }

    #[test]
    fn window_offset_does_not_change_classification() {
        let moved = Rect::new(120, 80, 400, 300);
        let mask = classify_edge(Point::new(125, 85), moved, BASE_MARGIN);
        assert_eq!(mask, EdgeMask::LEFT | EdgeMask::TOP);
    }

    #[test]
    fn cursor_map_covers_all_masks() {
        assert_eq!(cursor_for_mask(EdgeMask::LEFT), CursorShape::ResizeHorizontal);
        assert_eq!(cursor_for_mask(EdgeMask::RIGHT), CursorShape::ResizeHorizontal);
        assert_eq!(cursor_for_mask(EdgeMask::TOP), CursorShape::ResizeVertical);
        assert_eq!(cursor_for_mask(EdgeMask::BOTTOM), CursorShape::ResizeVertical);
        assert_eq!(
            cursor_for_mask(EdgeMask::LEFT | EdgeMask::TOP),
            CursorShape::ResizeDiagonalMain
        );
        assert_eq!(
            cursor_for_mask(EdgeMask::RIGHT | EdgeMask::BOTTOM),
            CursorShape::ResizeDiagonalMain
        );
        assert_eq!(
            cursor_for_mask(EdgeMask::RIGHT | EdgeMask::TOP),
            CursorShape::ResizeDiagonalCross
        );
        assert_eq!(
            cursor_for_mask(EdgeMask::LEFT | EdgeMask::BOTTOM),
            CursorShape::ResizeDiagonalCross
        );
        assert_eq!(cursor_for_mask(EdgeMask::empty()), CursorShape::Default);
    }
}
