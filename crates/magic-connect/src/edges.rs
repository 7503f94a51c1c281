//! Edge image construction: 3x3 Sobel plus two diagonal kernels,
//! thresholded at a configured magnitude.

use magic_core::{BinaryImage, GrayImage};

const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];
const DIAG_45: [[i32; 3]; 3] = [[0, 1, 2], [-1, 0, 1], [-2, -1, 0]];
const DIAG_135: [[i32; 3]; 3] = [[2, 1, 0], [1, 0, -1], [0, -1, -2]];

/// Builds a binary edge image from `source` by combining Sobel x/y and
/// two diagonal kernels, thresholding the combined magnitude at
/// `threshold`.
pub fn detect_edges(source: &BinaryImage, threshold: u8) -> BinaryImage {
    let gray = source.as_gray();
    let (w, h) = (gray.width() as i32, gray.height() as i32);
    let mut edges = BinaryImage::new(gray.width(), gray.height());
    for y in 0..h {
        for x in 0..w {
            let gx = convolve(gray, x, y, &SOBEL_X);
            let gy = convolve(gray, x, y, &SOBEL_Y);
            let d45 = convolve(gray, x, y, &DIAG_45);
            let d135 = convolve(gray, x, y, &DIAG_135);
            let magnitude = ((gx * gx + gy * gy) as f64).sqrt().max(d45.unsigned_abs() as f64).max(d135.unsigned_abs() as f64);
            if magnitude >= threshold as f64 {
                edges.set_foreground(x, y, true);
            }
        }
    }
    edges
}

fn convolve(gray: &GrayImage, x: i32, y: i32, kernel: &[[i32; 3]; 3]) -> i32 {
    let mut sum = 0i32;
    for (ky, row) in kernel.iter().enumerate() {
        for (kx, weight) in row.iter().enumerate() {
            let sx = x + kx as i32 - 1;
            let sy = y + ky as i32 - 1;
            sum += *weight * gray.get(sx, sy) as i32;
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_edge_is_detected() {
        let mut img = BinaryImage::new(20, 20);
        for y in 0..20 {
            for x in 10..20 {
                img.set_foreground(x, y, true);
            }
        }
        let edges = detect_edges(&img, 40);
        assert!(edges.is_foreground(10, 10) || edges.is_foreground(9, 10));
    }

    #[test]
    fn uniform_field_has_no_edges() {
        let img = BinaryImage::new(10, 10);
        let edges = detect_edges(&img, 40);
        for y in 0..10 {
            for x in 0..10 {
                assert!(!edges.is_foreground(x, y));
            }
        }
    }
}
