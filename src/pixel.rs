// Raw pixel storage: width x height x 4 bytes per pixel in B,G,R,A order.
// Buffers are owned and immutable once captured; every blur pass consumes
// its input and produces a fresh buffer, so passes never alias each other.

use crate::error::Error;
use crate::geometry::Rect;

pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA color. Alpha 255 is fully opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>, // length = width * height * 4, B,G,R,A per pixel
}

impl PixelBuffer {
    /// Allocate a zeroed (transparent black) buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * BYTES_PER_PIXEL],
        }
    }

    /// Wrap raw BGRA bytes, verifying the length matches the dimensions.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, Error> {
        let expected = width * height * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(Error::BufferSize(format!(
                "expected {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        let mut buf = Self::new(width, height);
        buf.fill(color);
        buf
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn fill(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            px[0] = color.b;
            px[1] = color.g;
            px[2] = color.r;
            px[3] = color.a;
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        let i = (y * self.width + x) * BYTES_PER_PIXEL;
        Rgba::new(self.data[i + 2], self.data[i + 1], self.data[i], self.data[i + 3])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        let i = (y * self.width + x) * BYTES_PER_PIXEL;
        self.data[i] = color.b;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.r;
        self.data[i + 3] = color.a;
    }

    /// Copy out the part of this buffer covered by `region` (buffer-local
    /// coordinates). Returns `None` when the region falls outside the
    /// buffer entirely, the "off-screen capture" case.
    pub fn copy_region(&self, region: Rect) -> Option<PixelBuffer> {
        let clipped = self.rect().intersect(&region);
        if clipped.is_empty() {
            return None;
        }
        let (cw, ch) = (clipped.w as usize, clipped.h as usize);
        let mut out = PixelBuffer::new(cw, ch);
        for row in 0..ch {
            let sy = clipped.y as usize + row;
            let src_start = (sy * self.width + clipped.x as usize) * BYTES_PER_PIXEL;
            let dst_start = row * cw * BYTES_PER_PIXEL;
            out.data[dst_start..dst_start + cw * BYTES_PER_PIXEL]
                .copy_from_slice(&self.data[src_start..src_start + cw * BYTES_PER_PIXEL]);
        }
        Some(out)
    }

    /// Blit `src` into this buffer with its top-left at `(x, y)`,
    /// clipping against the destination bounds.
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        let dst_rect = self.rect();
        let place = Rect::new(x, y, src.width as i32, src.height as i32);
        let clipped = dst_rect.intersect(&place);
        if clipped.is_empty() {
            return;
        }
        let src_x = (clipped.x - x) as usize;
        let src_y = (clipped.y - y) as usize;
        let row_bytes = clipped.w as usize * BYTES_PER_PIXEL;
        for row in 0..clipped.h as usize {
            let s = ((src_y + row) * src.width + src_x) * BYTES_PER_PIXEL;
            let d = ((clipped.y as usize + row) * self.width + clipped.x as usize)
                * BYTES_PER_PIXEL;
            self.data[d..d + row_bytes].copy_from_slice(&src.data[s..s + row_bytes]);
        }
    }

    /// Pack into 0xAARRGGBB words for presentation. BGRA bytes read as a
    /// little-endian u32 are exactly that layout, so this is a straight
    /// 4-byte chunk conversion.
    pub fn to_packed(&self) -> Vec<u32> {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(PixelBuffer::from_raw(2, 2, vec![0u8; 15]).is_err());
        assert!(PixelBuffer::from_raw(2, 2, vec![0u8; 16]).is_ok());
    }

    #[test]
    fn fill_and_read_back() {
        let c = Rgba::new(10, 20, 30, 40);
        let buf = PixelBuffer::filled(3, 2, c);
        assert_eq!(buf.pixel(2, 1), c);
    }

    #[test]
    fn copy_region_clips_and_rejects_offscreen() {
        let buf = PixelBuffer::filled(10, 10, Rgba::new(1, 2, 3, 255));
        let sub = buf.copy_region(Rect::new(8, 8, 5, 5)).unwrap();
        assert_eq!((sub.width, sub.height), (2, 2));
        assert!(buf.copy_region(Rect::new(20, 20, 5, 5)).is_none());
    }

    #[test]
    fn packed_word_is_argb() {
        let buf = PixelBuffer::filled(1, 1, Rgba::new(0x11, 0x22, 0x33, 0x44));
        assert_eq!(buf.to_packed(), vec![0x44112233]);
    }

    #[test]
    fn blit_clips_at_edges() {
        let mut dst = PixelBuffer::new(4, 4);
        let src = PixelBuffer::filled(3, 3, Rgba::new(9, 9, 9, 255));
        dst.blit(&src, 2, 2);
        assert_eq!(dst.pixel(3, 3), Rgba::new(9, 9, 9, 255));
        assert_eq!(dst.pixel(1, 1), Rgba::new(0, 0, 0, 0));
    }
}
