// Demo window shell: a thin wrapper over minifb that presents packed pixel
// buffers and reports pointer/key state to the main loop.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::Error;
use crate::geometry::Point;

pub struct Shell {
    window: Window,
    width: usize,
    height: usize,
}

impl Shell {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window, width, height })
    }

    /// Push one frame of 0xAARRGGBB words to the screen.
    pub fn present(&mut self, pixels: &[u32]) -> Result<(), Error> {
        self.window
            .update_with_buffer(pixels, self.width, self.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Pointer position clamped to the window, in window pixels.
    pub fn mouse_pos(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Point::new(x.max(0.0) as i32, y.max(0.0) as i32))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    // Key edges for the demo controls.

    /// Blur radius up/down.
    pub fn radius_up(&self) -> bool {
        self.window.is_key_pressed(Key::Equal, KeyRepeat::No)
    }

    pub fn radius_down(&self) -> bool {
        self.window.is_key_pressed(Key::Minus, KeyRepeat::No)
    }

    /// Cycle the tint alpha.
    pub fn tint_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::T, KeyRepeat::No)
    }

    /// Toggle mini mode.
    pub fn mini_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::M, KeyRepeat::No)
    }

    /// Toggle maximize.
    pub fn maximize_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::X, KeyRepeat::No)
    }
}
