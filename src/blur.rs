// Gaussian blur approximated by repeated box blurs.
//
// Each single-axis pass is a sliding-window running average: prime the sum
// over the clamped [-radius, radius] window, then add the entering pixel and
// subtract the leaving one while walking the scanline, dividing by the
// tracked window count. Total cost is O(width * height) regardless of radius.
//
// The window count is tracked exactly rather than assumed constant: entering
// pixels past the end of the line are never added, leaving pixels before the
// start are never subtracted, and the clamped priming window can hold the
// first pixel more than once. The count follows the sum through all of that.

use crate::pixel::{BYTES_PER_PIXEL, PixelBuffer};

pub const BLUR_RADIUS_MIN: i32 = 1;
pub const BLUR_RADIUS_MAX: i32 = 20;
const BLUR_PASSES: u32 = 3;

/// Which direction a box pass averages along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Target blur radius plus the fixed pass count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlurConfig {
    radius: i32,
    passes: u32,
}

impl BlurConfig {
    /// Radius clamps silently to [1, 20]; passes is fixed at 3.
    pub fn new(radius: i32) -> Self {
        Self {
            radius: radius.clamp(BLUR_RADIUS_MIN, BLUR_RADIUS_MAX),
            passes: BLUR_PASSES,
        }
    }

    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    #[inline]
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Effective box radius: trunc(sqrt(radius^2 * 12 / passes) + 1) / 2,
    /// floor 1. The formula drifts from a true gaussian for radius < 3;
    /// it is kept as-is because the visual calibration depends on it.
    pub fn box_radius(&self) -> i32 {
        let r = self.radius as f64;
        let br = ((r * r * 12.0 / self.passes as f64).sqrt() + 1.0) as i64 / 2;
        (br as i32).max(1)
    }
}

/// One box-blur pass along `axis`. Consumes the source buffer and returns a
/// new one of identical dimensions; a radius below 1 (or an empty buffer)
/// is a no-op pass-through.
pub fn box_blur_pass(src: PixelBuffer, radius: i32, axis: Axis) -> PixelBuffer {
    if radius < 1 || src.is_empty() {
        return src;
    }
    let w = src.width as i32;
    let h = src.height as i32;
    let mut dst = PixelBuffer::new(src.width, src.height);

    // The two axes walk the same window logic with x/y swapped; `line` is
    // the scanline (or column) index, `i` the position along it.
    let (lines, len) = match axis {
        Axis::Horizontal => (h, w),
        Axis::Vertical => (w, h),
    };

    #[inline]
    fn offset(axis: Axis, line: i32, i: i32, w: i32) -> usize {
        let (x, y) = match axis {
            Axis::Horizontal => (i, line),
            Axis::Vertical => (line, i),
        };
        (y as usize * w as usize + x as usize) * BYTES_PER_PIXEL
    }

    for line in 0..lines {
        let mut sum = [0u32; BYTES_PER_PIXEL];
        let mut count: u32 = 0;

        // Prime the window over [-radius, radius] with positions clamped to
        // the line. The clamped duplicates count as distinct terms.
        for i in -radius..=radius {
            let pi = i.clamp(0, len - 1);
            let s = offset(axis, line, pi, w);
            for c in 0..BYTES_PER_PIXEL {
                sum[c] += src.data[s + c] as u32;
            }
            count += 1;
        }

        for i in 0..len {
            let d = offset(axis, line, i, w);
            for c in 0..BYTES_PER_PIXEL {
                dst.data[d + c] = (sum[c] / count) as u8;
            }

            // Slide: drop the leaving pixel if it was in range, take the
            // entering pixel if it exists.
            let leaving = i - radius;
            if leaving >= 0 {
                let s = offset(axis, line, leaving, w);
                for c in 0..BYTES_PER_PIXEL {
                    sum[c] -= src.data[s + c] as u32;
                }
                count -= 1;
            }
            let entering = i + radius + 1;
            if entering < len {
                let s = offset(axis, line, entering, w);
                for c in 0..BYTES_PER_PIXEL {
                    sum[c] += src.data[s + c] as u32;
                }
                count += 1;
            }
        }
    }
    dst
}

/// Approximate a gaussian blur of `radius` by three box blurs, each a
/// horizontal pass followed by a vertical one, every pass feeding the next.
/// Deterministic: the output is a pure function of (image, radius).
pub fn gaussian_blur(image: PixelBuffer, radius: i32) -> PixelBuffer {
    if radius < 1 {
        return image;
    }
    let config = BlurConfig::new(radius);
    let box_radius = config.box_radius();
    let mut out = image;
    for _ in 0..config.passes() {
        out = box_blur_pass(out, box_radius, Axis::Horizontal);
        out = box_blur_pass(out, box_radius, Axis::Vertical);
    }
    out
}
