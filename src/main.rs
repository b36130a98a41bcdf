// Demo: a virtual frameless window with an acrylic backdrop, living inside
// a minifb window that stands in for the desktop.
//
// - Drag the window body to move it; grab an edge or corner to resize.
// - Drag it against the top of the screen to maximize.
// - X toggles maximize, M toggles mini mode (the window parks against the
//   nearest screen edge), +/- change the blur radius, T cycles the tint
//   alpha, ESC quits.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, info};

use acrylic::compositor::NoAccel;
use acrylic::geometry::Rect;
use acrylic::host::Shell;
use acrylic::mini::WindowMiniMode;
use acrylic::pixel::{PixelBuffer, Rgba};
use acrylic::snap::{MaximizeState, snap_while_dragging};
use acrylic::{
    BackdropCompositor, BackdropSource, EffectConfig, ScreenGeometry,
    WindowInteractionController,
};

const SCREEN_W: usize = 1280;
const SCREEN_H: usize = 720;
const CONFIG_PATH: &str = "acrylic.toml";

/// The fake desktop: a static wallpaper the compositor captures from.
struct Wallpaper {
    buf: PixelBuffer,
}

impl BackdropSource for Wallpaper {
    fn capture_region(&mut self, global_rect: Rect) -> Option<PixelBuffer> {
        self.buf.copy_region(global_rect)
    }
}

/// Gradient plus stripes and a few discs, so the blur has edges to soften.
fn make_wallpaper(w: usize, h: usize) -> PixelBuffer {
    let mut buf = PixelBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut r = (x * 255 / w) as u8;
            let mut g = (y * 255 / h) as u8;
            let mut b = 140u8;
            if (x / 48 + y / 48) % 2 == 0 {
                r = r.saturating_add(30);
                g = g.saturating_add(30);
                b = b.saturating_add(30);
            }
            buf.set_pixel(x, y, Rgba::new(r, g, b, 255));
        }
    }
    // Three bright discs.
    for (cx, cy, rad, color) in [
        (300i32, 200i32, 90i32, Rgba::new(240, 90, 60, 255)),
        (900, 500, 120, Rgba::new(70, 190, 240, 255)),
        (1050, 150, 70, Rgba::new(250, 220, 90, 255)),
    ] {
        for y in (cy - rad).max(0)..(cy + rad).min(h as i32) {
            for x in (cx - rad).max(0)..(cx + rad).min(w as i32) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= rad * rad {
                    buf.set_pixel(x as usize, y as usize, color);
                }
            }
        }
    }
    buf
}

/// One-pixel outline so the frameless window's edges are visible.
fn draw_border(frame: &mut PixelBuffer, rect: Rect, color: Rgba) {
    let clipped = frame.rect().intersect(&rect);
    if clipped.is_empty() {
        return;
    }
    for x in clipped.left()..clipped.right() {
        if rect.y >= 0 {
            frame.set_pixel(x as usize, rect.y as usize, color);
        }
        if rect.bottom() - 1 < frame.height as i32 && rect.bottom() - 1 >= 0 {
            frame.set_pixel(x as usize, (rect.bottom() - 1) as usize, color);
        }
    }
    for y in clipped.top()..clipped.bottom() {
        if rect.x >= 0 {
            frame.set_pixel(rect.x as usize, y as usize, color);
        }
        if rect.right() - 1 < frame.width as i32 && rect.right() - 1 >= 0 {
            frame.set_pixel((rect.right() - 1) as usize, y as usize, color);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = match EffectConfig::load(CONFIG_PATH) {
        Ok(cfg) => {
            info!("loaded {CONFIG_PATH}");
            cfg
        }
        Err(e) => {
            debug!("{e}; using defaults");
            EffectConfig::default()
        }
    };

    let mut shell =
        Shell::new("Acrylic Demo", SCREEN_W, SCREEN_H).context("open demo window")?;
    let mut wallpaper = Wallpaper { buf: make_wallpaper(SCREEN_W, SCREEN_H) };

    let screen = ScreenGeometry::new(Rect::new(0, 0, SCREEN_W as i32, SCREEN_H as i32), 1.0);
    let mut window = Rect::new(340, 160, 600, 400);

    let mut compositor = BackdropCompositor::new();
    config.apply_to_compositor(&mut compositor);
    compositor.set_window_size(window.w, window.h);
    // There is no OS compositor behind minifb; this exercises the permanent
    // software fallback.
    compositor.activate(&mut NoAccel);

    let mut controller = WindowInteractionController::new(screen);
    config.apply_to_controller(&mut controller);
    let mut mini = WindowMiniMode::new();
    let mut maximize = MaximizeState::default();

    let mut frame = PixelBuffer::new(SCREEN_W, SCREEN_H);
    let mut tint_alpha = config.tint[3];
    let mut radius = compositor.blur_radius();

    let mut was_down = false;
    let mut frames: u32 = 0;
    let mut last_fps = Instant::now();

    while shell.is_open() && !shell.esc_pressed() {
        let now = Instant::now();
        let pointer = shell.mouse_pos();
        let down = shell.left_mouse_down();

        // --- Keys ---
        if shell.radius_up() {
            radius = (radius + 1).min(20);
            compositor.set_blur_radius(radius);
            info!("blur radius {}", compositor.blur_radius());
        }
        if shell.radius_down() {
            radius = (radius - 1).max(1);
            compositor.set_blur_radius(radius);
            info!("blur radius {}", compositor.blur_radius());
        }
        if shell.tint_pressed() {
            tint_alpha = tint_alpha.wrapping_add(40);
            compositor.set_tint_alpha(tint_alpha);
            info!("tint alpha {tint_alpha}");
        }
        if shell.maximize_pressed() {
            window = maximize.toggle(window, screen.available);
            compositor.set_window_size(window.w, window.h);
            compositor.invalidate();
        }
        if shell.mini_pressed() {
            if let Some(restored) = mini.toggle(window, screen.available, now) {
                window = restored;
                compositor.set_window_size(window.w, window.h);
            }
            compositor.invalidate();
        }

        // --- Pointer ---
        if let Some(pos) = pointer {
            if down && !was_down {
                if let Some(expanded) = mini.expand(window, screen.available) {
                    window = expanded;
                    compositor.set_window_size(window.w, window.h);
                    compositor.invalidate();
                }
                controller.pointer_pressed(pos, window);
            } else if down {
                if controller.is_dragging()
                    && snap_while_dragging(pos, screen.available).is_some()
                    && !maximize.maximized
                {
                    window = maximize.toggle(window, screen.available);
                    compositor.set_window_size(window.w, window.h);
                    compositor.invalidate();
                    controller.cancel();
                }
                let update = controller.pointer_moved(pos, window);
                if let Some(geo) = update.geometry {
                    if geo != window {
                        window = geo;
                        compositor.set_window_size(window.w, window.h);
                        // Moving changes what lies beneath even when the
                        // size (and thus the cache dimensions) did not.
                        compositor.invalidate();
                    }
                }
                if let Some(shape) = update.cursor {
                    debug!("cursor -> {:?}", shape);
                }
            } else if !down && was_down {
                controller.pointer_released(pos, window);
                if mini.is_enabled() {
                    mini.attach_to_nearest_edge(window, screen.available, now);
                }
            }
        } else if was_down {
            // Pointer tracking lost mid-gesture.
            controller.cancel();
        }
        was_down = down;

        // --- Timers ---
        if let Some(origin) = mini.tick(now) {
            window = window.moved_to(origin);
            compositor.invalidate();
        }
        if let Some(shape) = controller.cursor_tick(now, pointer, window) {
            debug!("cursor tick -> {:?}", shape);
        }
        if let Some(repaint) = compositor.tick(now) {
            debug!("repaint {:?}", repaint);
        }

        // --- Compose the frame ---
        frame.data.copy_from_slice(&wallpaper.buf.data);
        if let Some(backdrop) = compositor.paint(&mut wallpaper, window) {
            frame.blit(&backdrop, window.x, window.y);
        }
        draw_border(&mut frame, window, Rgba::new(255, 255, 255, 255));
        shell.present(&frame.to_packed()).context("present frame")?;

        // --- FPS in the title, once a second ---
        frames += 1;
        if now.duration_since(last_fps) >= Duration::from_secs(1) {
            let fps = frames as f32 / now.duration_since(last_fps).as_secs_f32();
            shell.set_title(&format!(
                "Acrylic Demo — {:?} | radius {} | alpha {} | {:.1} fps",
                compositor.mode(),
                compositor.blur_radius(),
                tint_alpha,
                fps
            ));
            frames = 0;
            last_fps = now;
        }
    }

    Ok(())
}
