// The acrylic backdrop compositor.
//
// Two mutually exclusive render modes, picked when the effect is activated:
// native mode hands the blur to the OS compositor and only tint-fills the
// window, software mode captures the pixels beneath the window, blurs them
// at half resolution, scales back up and lays the tint on top. A failed
// native probe drops the compositor into software mode for the rest of its
// life; there is no retry.
//
// All work is synchronous and runs inline in the paint call. Invalidation
// marks the full window dirty and the refresh clock coalesces those marks
// into at most one repaint per interval.

use std::time::{Duration, Instant};

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba as ImageRgba};
use log::{debug, info, warn};

use crate::blur::{BLUR_RADIUS_MAX, BLUR_RADIUS_MIN, BlurConfig, gaussian_blur};
use crate::geometry::Rect;
use crate::pixel::{PixelBuffer, Rgba};

pub const INTERVAL_MIN_MS: u64 = 10;
pub const INTERVAL_MAX_MS: u64 = 100;
pub const DEFAULT_INTERVAL_MS: u64 = 50;
pub const DEFAULT_TINT: Rgba = Rgba { r: 30, g: 30, b: 30, a: 150 };
pub const DEFAULT_BLUR_RADIUS: i32 = 8;

/// Asks the host OS compositor to blur behind the window natively.
/// Returning `false` disables native mode permanently.
pub trait AccelProbe {
    fn enable_native_blur(&mut self, tint_alpha: u8) -> bool;
}

/// Probe for hosts with no compositor acceleration at all.
pub struct NoAccel;

impl AccelProbe for NoAccel {
    fn enable_native_blur(&mut self, _tint_alpha: u8) -> bool {
        false
    }
}

/// Supplies the on-screen pixels beneath a global rectangle. `None` means
/// the region is off-screen and the frame should be skipped.
pub trait BackdropSource {
    fn capture_region(&mut self, global_rect: Rect) -> Option<PixelBuffer>;
}

/// The translucent wash drawn over the blurred backdrop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TintState {
    pub color: Rgba,
}

impl TintState {
    #[inline]
    pub fn alpha(&self) -> u8 {
        self.color.a
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// OS compositor blurs; we only fill the tint.
    Native,
    /// Full capture-blur-tint pipeline on the CPU.
    Software,
}

/// Rectangles pending redraw. Marks between refresh ticks coalesce: a new
/// rectangle is merged (union) into any pending one it touches instead of
/// being appended, so repeated invalidation cannot grow the set.
#[derive(Debug, Default)]
pub struct DirtyRegionSet {
    rects: Vec<Rect>,
}

impl DirtyRegionSet {
    pub fn mark(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        for pending in &mut self.rects {
            if pending.intersects(&rect) {
                *pending = pending.union(&rect);
                return;
            }
        }
        self.rects.push(rect);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Bounding rectangle of everything pending, clearing the set.
    pub fn flush(&mut self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for r in self.rects.drain(..) {
            bounds = Some(match bounds {
                Some(b) => b.union(&r),
                None => r,
            });
        }
        bounds
    }
}

pub struct BackdropCompositor {
    blur: BlurConfig,
    tint: TintState,
    interval: Duration,
    accel_wanted: bool,
    accel_failed: bool,
    mode: RenderMode,
    window_size: (i32, i32),
    dirty: DirtyRegionSet,
    last_tick: Instant,
    // The last composited frame. `cache_valid` is cleared on invalidation
    // but the frame itself is kept so a failed capture can fall back to it.
    cache: Option<PixelBuffer>,
    cache_valid: bool,
}

impl BackdropCompositor {
    pub fn new() -> Self {
        Self {
            blur: BlurConfig::new(DEFAULT_BLUR_RADIUS),
            tint: TintState { color: DEFAULT_TINT },
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            accel_wanted: true,
            accel_failed: false,
            mode: RenderMode::Software,
            window_size: (0, 0),
            dirty: DirtyRegionSet::default(),
            last_tick: Instant::now(),
            cache: None,
            cache_valid: false,
        }
    }

    // ------------------------- configuration surface -------------------------
    // Every setter clamps silently; a bad value degrades, it never errors.

    pub fn set_blur_radius(&mut self, radius: i32) {
        self.blur = BlurConfig::new(radius.clamp(BLUR_RADIUS_MIN, BLUR_RADIUS_MAX));
        self.invalidate();
    }

    pub fn set_tint_color(&mut self, color: Rgba) {
        self.tint.color = color;
        self.invalidate();
    }

    /// Adjust only the tint alpha (window opacity), keeping the color.
    pub fn set_tint_alpha(&mut self, alpha: u8) {
        self.tint.color.a = alpha;
        self.invalidate();
    }

    pub fn set_update_interval(&mut self, ms: u64) {
        self.interval = Duration::from_millis(ms.clamp(INTERVAL_MIN_MS, INTERVAL_MAX_MS));
    }

    pub fn set_hardware_accel(&mut self, enabled: bool) {
        self.accel_wanted = enabled;
        self.invalidate();
    }

    /// The window area the effect covers, in device pixels. Called on every
    /// window resize; the cache is stale the moment the size changes.
    pub fn set_window_size(&mut self, w: i32, h: i32) {
        if self.window_size != (w, h) {
            self.window_size = (w, h);
            self.invalidate();
        }
    }

    #[inline]
    pub fn blur_radius(&self) -> i32 {
        self.blur.radius()
    }

    #[inline]
    pub fn tint(&self) -> TintState {
        self.tint
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    #[inline]
    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    // ------------------------------ activation ------------------------------

    /// Pick the render mode. Native mode is used only when it is wanted, has
    /// never failed, and the probe accepts; any probe refusal latches the
    /// compositor into software mode permanently.
    pub fn activate(&mut self, probe: &mut dyn AccelProbe) {
        self.mode = if self.accel_wanted && !self.accel_failed {
            if probe.enable_native_blur(self.tint.alpha()) {
                info!("acrylic: native compositor blur enabled");
                RenderMode::Native
            } else {
                warn!("acrylic: native blur unavailable, falling back to software");
                self.accel_failed = true;
                RenderMode::Software
            }
        } else {
            RenderMode::Software
        };
        self.last_tick = Instant::now();
        self.invalidate();
    }

    // ------------------------ invalidation + refresh ------------------------

    /// Drop the cached frame and mark the whole window dirty. Repeated calls
    /// between ticks coalesce into a single pending rectangle.
    pub fn invalidate(&mut self) {
        self.cache_valid = false;
        let (w, h) = self.window_size;
        self.dirty.mark(Rect::new(0, 0, w, h));
    }

    /// Refresh clock. Returns the region to repaint when an interval has
    /// elapsed and something is dirty; otherwise `None`. Safe to call as
    /// often as the host likes — firing is idempotent.
    pub fn tick(&mut self, now: Instant) -> Option<Rect> {
        if now.duration_since(self.last_tick) < self.interval {
            return None;
        }
        self.last_tick = now;
        self.dirty.flush()
    }

    // -------------------------------- painting --------------------------------

    /// Produce the backdrop layer for the window at `global_rect`. Native
    /// mode is a flat tint fill; software mode runs the capture-blur-tint
    /// pipeline. Returns `None` only when there is nothing valid to draw
    /// this frame (off-screen capture with no prior frame).
    pub fn paint(
        &mut self,
        source: &mut dyn BackdropSource,
        global_rect: Rect,
    ) -> Option<PixelBuffer> {
        if global_rect.is_empty() {
            return None;
        }
        if self.mode == RenderMode::Native {
            let mut fill = PixelBuffer::new(global_rect.w as usize, global_rect.h as usize);
            fill.fill(self.tint.color);
            return Some(fill);
        }

        if self.cache_valid {
            if let Some(cache) = &self.cache {
                return Some(cache.clone());
            }
        }

        let captured = match source.capture_region(global_rect) {
            Some(buf) if !buf.is_empty() => buf,
            // Off-screen: reuse the previous frame if we have one, else
            // skip this paint entirely.
            _ => {
                debug!("acrylic: capture empty, reusing prior frame");
                return self.cache.clone();
            }
        };

        let blurred = blur_downsampled(captured, self.blur.radius());
        let mut frame = blurred;
        tint_over(&mut frame, self.tint.color);

        self.cache = Some(frame.clone());
        self.cache_valid = true;
        Some(frame)
    }
}

impl Default for BackdropCompositor {
    fn default() -> Self {
        Self::new()
    }
}

/// Software pipeline: halve the capture, gaussian-blur it, scale it back.
/// Blurring at half resolution costs a quarter of the work and the upscale
/// hides the difference behind the blur itself.
fn blur_downsampled(captured: PixelBuffer, radius: i32) -> PixelBuffer {
    let (w, h) = (captured.width, captured.height);
    let small_w = (w / 2).max(1) as u32;
    let small_h = (h / 2).max(1) as u32;

    // The resize math is channel-order agnostic, so BGRA bytes ride through
    // the image crate's RGBA buffers untouched in order.
    let img: ImageBuffer<ImageRgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(w as u32, h as u32, captured.data)
            .expect("capture length matches its dimensions");
    let small = imageops::resize(&img, small_w, small_h, FilterType::Triangle);

    let small_buf = PixelBuffer {
        width: small_w as usize,
        height: small_h as usize,
        data: small.into_raw(),
    };
    let blurred = gaussian_blur(small_buf, radius);

    let img: ImageBuffer<ImageRgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(blurred.width as u32, blurred.height as u32, blurred.data)
            .expect("blur preserves dimensions");
    let full = imageops::resize(&img, w as u32, h as u32, FilterType::Triangle);
    PixelBuffer {
        width: w,
        height: h,
        data: full.into_raw(),
    }
}

/// Source-over composite of the tint onto every pixel, output fully opaque.
fn tint_over(frame: &mut PixelBuffer, tint: Rgba) {
    let a = tint.a as u32;
    let inv = 255 - a;
    for px in frame.data.chunks_exact_mut(4) {
        px[0] = ((tint.b as u32 * a + px[0] as u32 * inv) / 255) as u8;
        px[1] = ((tint.g as u32 * a + px[1] as u32 * inv) / 255) as u8;
        px[2] = ((tint.r as u32 * a + px[2] as u32 * inv) / 255) as u8;
        px[3] = 255;
    }
}
