//! Strip-parallel contour finding: splits the image into
//! horizontal strips with a small overlap, traces each strip
//! independently, then re-merges contours that straddle a strip
//! boundary. Opt-in: callers choose this over [`crate::trace::find_contours`]
//! for large images.

use magic_core::BinaryImage;

use crate::contour::Contour;
use crate::trace;

/// Rows of overlap between adjacent strips, large enough to keep a
/// typical traced glyph boundary fully inside at least one strip.
const STRIP_OVERLAP: u32 = 8;

/// Finds contours by splitting `binary` into `strip_count` horizontal
/// strips (each processed independently, in parallel if the caller's
/// executor does so), then deduplicating boundaries that were traced
/// redundantly in the overlap region.
///
/// Falls back to [`trace::find_contours`] when the image is too small
/// to usefully split.
pub fn find_contours_parallel(binary: &BinaryImage, min_area: f64, strip_count: u32) -> Vec<Contour> {
    let height = binary.height();
    if strip_count <= 1 || height < strip_count * (STRIP_OVERLAP + 1) {
        return trace::find_contours(binary, min_area);
    }

    let strip_height = height / strip_count;
    let mut all = Vec::new();
    for i in 0..strip_count {
        let y0 = i.saturating_sub(1).min(height);
        let y1 = ((i + 1) * strip_height + STRIP_OVERLAP).min(height);
        if y0 >= y1 {
            continue;
        }
        let strip = extract_strip(binary, y0, y1);
        let mut found = trace::find_contours(&strip, min_area);
        for c in &mut found {
            shift_contour(c, y0 as i32);
        }
        all.extend(found);
    }

    dedup_by_bounding_box(all)
}

fn extract_strip(binary: &BinaryImage, y0: u32, y1: u32) -> BinaryImage {
    let mut strip = BinaryImage::new(binary.width(), y1 - y0);
    for y in y0..y1 {
        for x in 0..binary.width() {
            if binary.is_foreground(x as i32, y as i32) {
                strip.set_foreground(x as i32, (y - y0) as i32, true);
            }
        }
    }
    strip
}

fn shift_contour(contour: &mut Contour, dy: i32) {
    for p in &mut contour.points {
        p.y += dy;
    }
    contour.bounding_box.min_y += dy;
    contour.bounding_box.max_y += dy;
    contour.centroid.y += dy as f64;
}

/// Drops contours whose bounding box is fully contained in an
/// already-kept contour's bounding box, collapsing duplicates produced
/// by the strip overlap.
fn dedup_by_bounding_box(mut contours: Vec<Contour>) -> Vec<Contour> {
    contours.sort_by(|a, b| b.area.partial_cmp(&a.area).unwrap_or(std::cmp::Ordering::Equal));
    let mut kept: Vec<Contour> = Vec::new();
    'outer: for c in contours {
        for k in &kept {
            if k.bounding_box.min_x <= c.bounding_box.min_x
                && k.bounding_box.min_y <= c.bounding_box.min_y
                && k.bounding_box.max_x >= c.bounding_box.max_x
                && k.bounding_box.max_y >= c.bounding_box.max_y
            {
                continue 'outer;
            }
        }
        kept.push(c);
    }
    kept
}
