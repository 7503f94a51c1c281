//! Optional erosion/dilation/open/close morphology over a square
//! structuring element.

use magic_core::BinaryImage;

/// Erodes `image`: a foreground pixel survives only if every neighbor
/// within `radius` (Chebyshev distance) is also foreground.
pub fn erode(image: &BinaryImage, radius: i32) -> BinaryImage {
    let (w, h) = (image.width() as i32, image.height() as i32);
    let mut out = BinaryImage::new(image.width(), image.height());
    for y in 0..h {
        for x in 0..w {
            let mut all_fg = image.is_foreground(x, y);
            if all_fg {
                'scan: for dy in -radius..=radius {
                    for dx in -radius..=radius {
                        if !image.is_foreground(x + dx, y + dy) {
                            all_fg = false;
                            break 'scan;
                        }
                    }
                }
            }
            out.set_foreground(x, y, all_fg);
        }
    }
    out
}

/// Dilates `image`: a pixel becomes foreground if any neighbor within
/// `radius` (Chebyshev distance) is foreground.
pub fn dilate(image: &BinaryImage, radius: i32) -> BinaryImage {
    let (w, h) = (image.width() as i32, image.height() as i32);
    let mut out = BinaryImage::new(image.width(), image.height());
    for y in 0..h {
        for x in 0..w {
            let mut any_fg = false;
            'scan: for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if image.is_foreground(x + dx, y + dy) {
                        any_fg = true;
                        break 'scan;
                    }
                }
            }
            out.set_foreground(x, y, any_fg);
        }
    }
    out
}

/// Morphological opening: erosion followed by dilation, removing small
/// foreground specks without shrinking larger regions.
pub fn open(image: &BinaryImage, radius: i32) -> BinaryImage {
    dilate(&erode(image, radius), radius)
}

/// Morphological closing: dilation followed by erosion, filling small
/// background gaps without growing larger regions.
pub fn close(image: &BinaryImage, radius: i32) -> BinaryImage {
    erode(&dilate(image, radius), radius)
}
