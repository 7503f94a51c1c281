//! Raster buffers that flow through the pipeline: the raw decoded pixel
//! buffer the detector accepts, the grayscale intermediate, and the
//! binary image the contour engine walks.

use crate::error::{ErrorInfo, ErrorKind, MagicError};

/// Decoded 8-bit-per-channel pixel buffer handed to the detector.
///
/// Produced by an external image decoder (PNG/JPEG/GIF); this crate never
/// decodes bytes itself. `channels` is 3 (RGB) or 4 (RGBA).
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps a decoded pixel buffer, validating that `data` matches
    /// `width * height * channels`.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, MagicError> {
        if channels != 3 && channels != 4 {
            return Err(MagicError::new(
                ErrorKind::InvalidImage,
                ErrorInfo::new(
                    "E_IMG_CHANNELS",
                    format!("unsupported channel count {channels}"),
                ),
            ));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(MagicError::new(
                ErrorKind::InvalidImage,
                ErrorInfo::new(
                    "E_IMG_SIZE",
                    format!(
                        "pixel buffer length {} does not match {width}x{height}x{channels}",
                        data.len()
                    ),
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels (3 or 4).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Raw byte length of the decoded input, used for the oversize check.
    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Returns the `(r, g, b)` triple at `(x, y)`, ignoring alpha.
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}

/// A rectangular buffer of 8-bit luminance values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Creates a new grayscale image filled with zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Builds a grayscale image from an explicit pixel vector.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Luminance-weighted conversion from a decoded pixel buffer
    /// (`0.299 R + 0.587 G + 0.114 B`).
    pub fn from_pixel_buffer(buf: &PixelBuffer) -> Self {
        let mut pixels = Vec::with_capacity(buf.width() as usize * buf.height() as usize);
        for y in 0..buf.height() {
            for x in 0..buf.width() {
                let (r, g, b) = buf.rgb_at(x, y);
                let lum = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                pixels.push(lum.round().clamp(0.0, 255.0) as u8);
            }
        }
        Self::from_pixels(buf.width(), buf.height(), pixels)
    }

    /// Image width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the luminance at `(x, y)`.
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Sets the luminance at `(x, y)`.
    pub fn set(&mut self, x: i32, y: i32, value: u8) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = value;
    }

    /// Raw pixel slice, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// A [`GrayImage`] constrained to `{0, 255}`, where 255 marks drawn ink
/// (foreground).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryImage {
    inner: GrayImage,
}

/// Foreground (ink) luminance value in a [`BinaryImage`].
pub const FOREGROUND: u8 = 255;
/// Background luminance value in a [`BinaryImage`].
pub const BACKGROUND: u8 = 0;

impl BinaryImage {
    /// Wraps a grayscale image already known to be binary, clamping any
    /// stray values to the nearest of `{0, 255}`.
    pub fn from_gray_clamped(mut gray: GrayImage) -> Self {
        for p in gray.pixels.iter_mut() {
            *p = if *p >= 128 { FOREGROUND } else { BACKGROUND };
        }
        Self { inner: gray }
    }

    /// Creates an empty (all-background) binary image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            inner: GrayImage::new(width, height),
        }
    }

    /// Image width.
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Image height.
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Returns true if the pixel at `(x, y)` is foreground.
    pub fn is_foreground(&self, x: i32, y: i32) -> bool {
        self.inner.get(x, y) == FOREGROUND
    }

    /// Sets whether the pixel at `(x, y)` is foreground.
    pub fn set_foreground(&mut self, x: i32, y: i32, foreground: bool) {
        self.inner
            .set(x, y, if foreground { FOREGROUND } else { BACKGROUND });
    }

    /// Borrows the underlying grayscale representation.
    pub fn as_gray(&self) -> &GrayImage {
        &self.inner
    }

    /// Returns true if every pixel is already `{0, 255}` — i.e. the image
    /// is idempotent under re-thresholding.
    pub fn is_idempotent(&self) -> bool {
        self.inner
            .pixels
            .iter()
            .all(|&p| p == FOREGROUND || p == BACKGROUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_buffer_rejects_mismatched_length() {
        let err = PixelBuffer::new(2, 2, 3, vec![0; 10]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidImage);
    }

    #[test]
    fn grayscale_conversion_preserves_dimensions() {
        let buf = PixelBuffer::new(2, 1, 3, vec![255, 255, 255, 0, 0, 0]).unwrap();
        let gray = GrayImage::from_pixel_buffer(&buf);
        assert_eq!(gray.width(), 2);
        assert_eq!(gray.height(), 1);
        assert_eq!(gray.get(0, 0), 255);
        assert_eq!(gray.get(1, 0), 0);
    }

    #[test]
    fn binary_image_round_trips_foreground() {
        let mut bin = BinaryImage::new(3, 3);
        bin.set_foreground(1, 1, true);
        assert!(bin.is_foreground(1, 1));
        assert!(!bin.is_foreground(0, 0));
        assert!(bin.is_idempotent());
    }
}
