#![deny(missing_docs)]
//! The preprocessor: converts a decoded [`PixelBuffer`] into a
//! [`BinaryImage`] suitable for contour tracing.

/// Optional Gaussian blur applied before thresholding.
pub mod blur;
/// Morphological erosion, dilation, open, and close.
pub mod morphology;
/// Global and adaptive binarization policies.
pub mod threshold;

use magic_core::{
    BinaryImage, DetectorConfig, ErrorInfo, ErrorKind, GrayImage, MagicError, PixelBuffer,
};

/// Optional morphological post-processing step requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphologyOp {
    /// No morphology.
    None,
    /// Erosion with the given Chebyshev radius.
    Erode(i32),
    /// Dilation with the given Chebyshev radius.
    Dilate(i32),
    /// Opening (erode then dilate) with the given radius.
    Open(i32),
    /// Closing (dilate then erode) with the given radius.
    Close(i32),
}

/// Runs the full preprocessing pipeline: size validation, grayscale
/// conversion, optional blur, binarization (global or adaptive per
/// `config`), and optional morphology.
///
/// Rejects oversized or malformed input before doing any per-pixel
/// work.
pub fn preprocess(
    buf: &PixelBuffer,
    config: &DetectorConfig,
    blur_first: bool,
    morphology: MorphologyOp,
) -> Result<BinaryImage, MagicError> {
    validate_limits(buf, config)?;

    let mut gray = GrayImage::from_pixel_buffer(buf);
    if blur_first {
        gray = blur::gaussian_blur_3x3(&gray);
    }

    let binary = if config.use_adaptive_threshold {
        threshold::adaptive_threshold(&gray, 15, 5)
    } else {
        threshold::global_threshold(&gray, config.contrast_threshold)
    };

    let binary = apply_morphology(&binary, morphology);

    tracing::debug!(
        width = binary.width(),
        height = binary.height(),
        adaptive = config.use_adaptive_threshold,
        "preprocess complete"
    );

    Ok(binary)
}

fn apply_morphology(binary: &BinaryImage, op: MorphologyOp) -> BinaryImage {
    match op {
        MorphologyOp::None => binary.clone(),
        MorphologyOp::Erode(r) => morphology::erode(binary, r),
        MorphologyOp::Dilate(r) => morphology::dilate(binary, r),
        MorphologyOp::Open(r) => morphology::open(binary, r),
        MorphologyOp::Close(r) => morphology::close(binary, r),
    }
}

fn validate_limits(buf: &PixelBuffer, config: &DetectorConfig) -> Result<(), MagicError> {
    if buf.byte_len() > config.max_bytes {
        return Err(MagicError::new(
            ErrorKind::FileTooLarge,
            ErrorInfo::new(
                "E_RASTER_TOO_LARGE",
                format!(
                    "decoded input is {} bytes, exceeding the configured maximum of {}",
                    buf.byte_len(),
                    config.max_bytes
                ),
            ),
        ));
    }
    if buf.width() > config.max_dim || buf.height() > config.max_dim {
        return Err(MagicError::new(
            ErrorKind::DimensionsTooLarge,
            ErrorInfo::new(
                "E_RASTER_DIMENSIONS",
                format!(
                    "image is {}x{}, exceeding the configured maximum of {} per side",
                    buf.width(),
                    buf.height(),
                    config.max_dim
                ),
            ),
        ));
    }
    if buf.width() == 0 || buf.height() == 0 {
        return Err(MagicError::new(
            ErrorKind::InvalidImage,
            ErrorInfo::new("E_RASTER_EMPTY", "image has zero width or height"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_buffer(width: u32, height: u32, value: u8) -> PixelBuffer {
        let data = vec![value; width as usize * height as usize * 3];
        PixelBuffer::new(width, height, 3, data).unwrap()
    }

    #[test]
    fn preprocess_rejects_oversized_bytes() {
        let mut config = DetectorConfig::default();
        config.max_bytes = 10;
        let buf = solid_buffer(4, 4, 0);
        let err = preprocess(&buf, &config, false, MorphologyOp::None).unwrap_err();
        assert_eq!(err.kind(), magic_core::ErrorKind::FileTooLarge);
    }

    #[test]
    fn preprocess_rejects_oversized_dimensions() {
        let mut config = DetectorConfig::default();
        config.max_dim = 2;
        let buf = solid_buffer(4, 4, 0);
        let err = preprocess(&buf, &config, false, MorphologyOp::None).unwrap_err();
        assert_eq!(err.kind(), magic_core::ErrorKind::DimensionsTooLarge);
    }

    #[test]
    fn preprocess_white_image_has_no_foreground() {
        let config = DetectorConfig::default();
        let buf = solid_buffer(10, 10, 255);
        let binary = preprocess(&buf, &config, false, MorphologyOp::None).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                assert!(!binary.is_foreground(x, y));
            }
        }
    }

    #[test]
    fn preprocess_is_idempotent_on_already_binary_input() {
        let config = DetectorConfig::default();
        let buf = solid_buffer(6, 6, 0);
        let binary = preprocess(&buf, &config, false, MorphologyOp::None).unwrap();
        assert!(binary.is_idempotent());
    }
}
