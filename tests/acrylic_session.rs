// End-to-end session: a frameless window over a synthetic desktop, driven
// through press/move/release while the compositor keeps its backdrop fresh.

use std::time::{Duration, Instant};

use acrylic::compositor::NoAccel;
use acrylic::geometry::{Point, Rect};
use acrylic::pixel::{PixelBuffer, Rgba};
use acrylic::resize::EdgeMask;
use acrylic::{
    BackdropCompositor, BackdropSource, RenderMode, ScreenGeometry,
    WindowInteractionController,
};

struct Desktop {
    wallpaper: PixelBuffer,
}

impl Desktop {
    fn new() -> Self {
        let mut wallpaper = PixelBuffer::new(640, 480);
        for y in 0..480usize {
            for x in 0..640usize {
                wallpaper.set_pixel(
                    x,
                    y,
                    Rgba::new((x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255),
                );
            }
        }
        Self { wallpaper }
    }
}

impl BackdropSource for Desktop {
    fn capture_region(&mut self, global_rect: Rect) -> Option<PixelBuffer> {
        self.wallpaper.copy_region(global_rect)
    }
}

#[test]
fn drag_then_resize_session_keeps_backdrop_consistent() {
    let screen = ScreenGeometry::new(Rect::new(0, 0, 640, 480), 1.0);
    let mut controller = WindowInteractionController::new(screen);
    controller.set_min_size(100, 80);

    let mut compositor = BackdropCompositor::new();
    compositor.activate(&mut NoAccel);
    assert_eq!(compositor.mode(), RenderMode::Software);

    let mut desktop = Desktop::new();
    let mut window = Rect::new(200, 150, 200, 160);
    compositor.set_window_size(window.w, window.h);

    let frame = compositor.paint(&mut desktop, window).expect("initial paint");
    assert_eq!((frame.width as i32, frame.height as i32), (window.w, window.h));

    // Drag the window 60 px right, 40 px down.
    controller.pointer_pressed(Point::new(300, 230), window);
    assert!(controller.is_dragging());
    let update = controller.pointer_moved(Point::new(360, 270), window);
    window = update.geometry.expect("drag produces geometry");
    assert_eq!(window.origin(), Point::new(260, 190));
    controller.pointer_released(Point::new(360, 270), window);

    // The move invalidates; the next paint recaptures under the new rect.
    compositor.set_window_size(window.w, window.h);
    compositor.invalidate();
    let moved = compositor.paint(&mut desktop, window).expect("paint after move");
    assert_ne!(moved.data, frame.data);

    // Resize from the bottom-right corner.
    let corner = Point::new(window.right() - 3, window.bottom() - 3);
    controller.pointer_pressed(corner, window);
    assert_eq!(controller.edge_mask(), EdgeMask::RIGHT | EdgeMask::BOTTOM);
    let update = controller.pointer_moved(Point::new(corner.x + 30, corner.y + 20), window);
    window = update.geometry.expect("resize produces geometry");
    assert_eq!((window.w, window.h), (230, 180));

    compositor.set_window_size(window.w, window.h);
    let resized = compositor.paint(&mut desktop, window).expect("paint after resize");
    assert_eq!((resized.width as i32, resized.height as i32), (230, 180));
}

#[test]
fn refresh_clock_coalesces_rapid_parameter_changes() {
    let mut compositor = BackdropCompositor::new();
    compositor.set_window_size(320, 240);
    compositor.set_update_interval(10);
    compositor.activate(&mut NoAccel);
    let t0 = Instant::now();
    compositor.tick(t0 + Duration::from_millis(50));

    // A burst of parameter changes before the next tick.
    for radius in [3, 9, 15, 4, 20] {
        compositor.set_blur_radius(radius);
    }
    compositor.set_tint_alpha(90);
    assert_eq!(compositor.dirty_len(), 1);

    let repaint = compositor
        .tick(t0 + Duration::from_millis(100))
        .expect("burst flushes one repaint");
    assert_eq!(repaint, Rect::new(0, 0, 320, 240));
}

#[test]
fn offscreen_window_skips_frames_until_back_on_screen() {
    let mut compositor = BackdropCompositor::new();
    compositor.set_window_size(100, 100);
    compositor.activate(&mut NoAccel);
    let mut desktop = Desktop::new();

    // Fully off the desktop: no frame at all yet.
    assert!(compositor.paint(&mut desktop, Rect::new(700, 500, 100, 100)).is_none());

    // Back on-screen: painting resumes.
    let frame = compositor.paint(&mut desktop, Rect::new(10, 10, 100, 100));
    assert!(frame.is_some());
}
