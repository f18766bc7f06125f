//! Pixel buffer holding the result of a pass.

use glint_math::{Color, Interval};
use image::RgbaImage;

/// Convert a linear [0, 1] color to 8-bit RGBA.
///
/// Channels are clamped; no gamma curve is applied.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |c: f32| (255.0 * Interval::UNIT.clamp(c) + 0.5) as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Row-major image of linear colors; index = y * width + x.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (width * height).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Buffer index of pixel (x, y).
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Reallocate for new dimensions.
    ///
    /// Returns false and keeps the existing storage if the dimensions are
    /// unchanged. After a reallocation the contents are black.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        log::debug!(
            "Resizing pixel buffer {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        *self = PixelBuffer::new(width, height);
        true
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Convert to an 8-bit image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| image::Rgba(color_to_rgba(self.get(x, y))))
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(0.5, -1.0, 3.0)), [128, 0, 255, 255]);
    }

    #[test]
    fn test_row_major_indexing() {
        let mut buffer = PixelBuffer::new(4, 3);
        assert_eq!(buffer.len(), 12);

        buffer.set(1, 2, Color::ONE);
        assert_eq!(buffer.index(1, 2), 9);
        assert_eq!(buffer.pixels()[9], Color::ONE);
        assert_eq!(buffer.get(1, 2), Color::ONE);
    }

    #[test]
    fn test_resize_only_on_change() {
        let mut buffer = PixelBuffer::new(4, 3);
        buffer.set(0, 0, Color::ONE);

        assert!(!buffer.resize(4, 3));
        assert_eq!(buffer.get(0, 0), Color::ONE);

        assert!(buffer.resize(2, 2));
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_to_image() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.set(1, 0, Color::ONE);

        let image = buffer.to_image();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(1, 0).0, [255, 255, 255, 255]);
        assert_eq!(buffer.to_rgba8().len(), 8);
    }
}
