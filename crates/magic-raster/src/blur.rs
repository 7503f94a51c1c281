//! Optional 3x3 Gaussian approximation.

use magic_core::GrayImage;

const KERNEL: [[i32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];
const KERNEL_SUM: i32 = 16;

/// Applies the fixed `[1 2 1; 2 4 2; 1 2 1] / 16` kernel to `image`,
/// clamping at the border by repeating the edge pixel.
pub fn gaussian_blur_3x3(image: &GrayImage) -> GrayImage {
    let (w, h) = (image.width() as i32, image.height() as i32);
    let mut out = GrayImage::new(image.width(), image.height());
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0i32;
            for (ky, row) in KERNEL.iter().enumerate() {
                for (kx, weight) in row.iter().enumerate() {
                    let sx = (x + kx as i32 - 1).clamp(0, w - 1);
                    let sy = (y + ky as i32 - 1).clamp(0, h - 1);
                    acc += weight * image.get(sx, sy) as i32;
                }
            }
            out.set(x, y, (acc / KERNEL_SUM) as u8);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_preserves_dimensions() {
        let img = GrayImage::new(9, 7);
        let blurred = gaussian_blur_3x3(&img);
        assert_eq!(blurred.width(), 9);
        assert_eq!(blurred.height(), 7);
    }

    #[test]
    fn blur_of_uniform_image_is_unchanged() {
        let mut img = GrayImage::new(5, 5);
        for y in 0..5 {
            for x in 0..5 {
                img.set(x, y, 200);
            }
        }
        let blurred = gaussian_blur_3x3(&img);
        assert_eq!(blurred.get(2, 2), 200);
    }
}
