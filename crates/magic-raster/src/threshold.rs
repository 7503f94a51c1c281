//! Binarization policies: a global threshold and an
//! adaptive block threshold. Ink (low luminance) maps to foreground.

use magic_core::{BinaryImage, GrayImage};

/// Global threshold: any pixel with luminance below `threshold` becomes
/// foreground.
pub fn global_threshold(image: &GrayImage, threshold: u8) -> BinaryImage {
    let mut binary = BinaryImage::new(image.width(), image.height());
    for y in 0..image.height() as i32 {
        for x in 0..image.width() as i32 {
            let fg = image.get(x, y) < threshold;
            binary.set_foreground(x, y, fg);
        }
    }
    binary
}

/// Adaptive threshold over `block_size`-square neighborhoods: a pixel is
/// foreground when its luminance is below the local block mean minus
/// `bias`.
pub fn adaptive_threshold(image: &GrayImage, block_size: u32, bias: i32) -> BinaryImage {
    let (w, h) = (image.width() as i32, image.height() as i32);
    let half = (block_size as i32 / 2).max(1);
    let mut binary = BinaryImage::new(image.width(), image.height());
    for y in 0..h {
        for x in 0..w {
            let (mut sum, mut count) = (0i64, 0i64);
            for by in (y - half).max(0)..(y + half + 1).min(h) {
                for bx in (x - half).max(0)..(x + half + 1).min(w) {
                    sum += image.get(bx, by) as i64;
                    count += 1;
                }
            }
            let mean = if count > 0 { sum / count } else { 0 };
            let fg = (image.get(x, y) as i64) < mean - bias as i64;
            binary.set_foreground(x, y, fg);
        }
    }
    binary
}
