//! The interior pattern analyzer: ray-cast mask, fill ratio,
//! and a fill-ratio-banded dispatch to a [`PatternTag`].

use magic_contour::Contour;
use magic_core::{BinaryImage, PatternTag, Rectangle};

/// Classifies the interior of a non-`OuterCircle` contour into a
/// [`PatternTag`] by ray-casting an interior mask against `binary` and
/// dispatching on the resulting fill ratio band.
pub fn classify_pattern(contour: &Contour, binary: &BinaryImage) -> PatternTag {
    let bbox = contour.bounding_box;
    let mask = interior_mask(contour, bbox);
    let (filled, total) = count_filled(&mask, binary, bbox);
    if total == 0 {
        return PatternTag::Empty;
    }
    let fill_ratio = filled as f64 / total as f64;

    if fill_ratio < 0.1 {
        PatternTag::Empty
    } else if fill_ratio < 0.3 {
        classify_sparse(&mask, binary, bbox)
    } else if fill_ratio < 0.7 {
        classify_medium(&mask, binary, bbox)
    } else {
        classify_dense(&mask, binary, bbox)
    }
}

/// A row-major boolean mask over the contour's bounding box, true where
/// the pixel lies inside the contour polygon (odd-crossing ray cast).
struct Mask {
    width: usize,
    height: usize,
    inside: Vec<bool>,
}

impl Mask {
    fn at(&self, x: usize, y: usize) -> bool {
        self.inside[y * self.width + x]
    }
}

fn interior_mask(contour: &Contour, bbox: Rectangle) -> Mask {
    let width = bbox.width().max(0) as usize;
    let height = bbox.height().max(0) as usize;
    let mut inside = vec![false; width * height];
    for row in 0..height {
        let y = bbox.min_y + row as i32;
        let crossings = scanline_crossings(contour, y);
        for col in 0..width {
            let x = bbox.min_x + col as i32;
            if is_inside(&crossings, x) {
                inside[row * width + col] = true;
            }
        }
    }
    Mask { width, height, inside }
}

/// Odd-crossing rule: x-intercepts of every boundary edge crossing
/// scanline `y`, sorted ascending.
fn scanline_crossings(contour: &Contour, y: i32) -> Vec<f64> {
    let points = &contour.points;
    let n = points.len();
    let mut xs = Vec::new();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let (y0, y1) = (a.y as f64, b.y as f64);
        let yf = y as f64 + 0.5;
        if (y0 <= yf && y1 > yf) || (y1 <= yf && y0 > yf) {
            let t = (yf - y0) / (y1 - y0);
            xs.push(a.x as f64 + t * (b.x as f64 - a.x as f64));
        }
    }
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    xs
}

fn is_inside(crossings: &[f64], x: i32) -> bool {
    let xf = x as f64 + 0.5;
    let mut count = 0;
    for &c in crossings {
        if c < xf {
            count += 1;
        } else {
            break;
        }
    }
    count % 2 == 1
}

fn count_filled(mask: &Mask, binary: &BinaryImage, bbox: Rectangle) -> (usize, usize) {
    let mut filled = 0;
    let mut total = 0;
    for row in 0..mask.height {
        for col in 0..mask.width {
            if mask.at(col, row) {
                total += 1;
                let x = bbox.min_x + col as i32;
                let y = bbox.min_y + row as i32;
                if binary.is_foreground(x, y) {
                    filled += 1;
                }
            }
        }
    }
    (filled, total)
}

fn classify_sparse(mask: &Mask, binary: &BinaryImage, bbox: Rectangle) -> PatternTag {
    let components = count_components(mask, binary, bbox);
    match components {
        1 => PatternTag::Dot,
        2 => PatternTag::DoubleDot,
        3 => PatternTag::TripleDot,
        4..=9 => PatternTag::MultiDot,
        _ => PatternTag::Pattern,
    }
}

fn count_components(mask: &Mask, binary: &BinaryImage, bbox: Rectangle) -> usize {
    let mut visited = vec![false; mask.width * mask.height];
    let mut count = 0;
    for row in 0..mask.height {
        for col in 0..mask.width {
            let idx = row * mask.width + col;
            if visited[idx] || !mask.at(col, row) {
                continue;
            }
            let x = bbox.min_x + col as i32;
            let y = bbox.min_y + row as i32;
            if !binary.is_foreground(x, y) {
                continue;
            }
            flood_fill(mask, binary, bbox, col, row, &mut visited);
            count += 1;
        }
    }
    count
}

fn flood_fill(mask: &Mask, binary: &BinaryImage, bbox: Rectangle, col: usize, row: usize, visited: &mut [bool]) {
    let mut stack = vec![(col, row)];
    while let Some((c, r)) = stack.pop() {
        let idx = r * mask.width + c;
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        for (dc, dr) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
            let nc = c as i32 + dc;
            let nr = r as i32 + dr;
            if nc < 0 || nr < 0 || nc as usize >= mask.width || nr as usize >= mask.height {
                continue;
            }
            let (nc, nr) = (nc as usize, nr as usize);
            if !mask.at(nc, nr) {
                continue;
            }
            let x = bbox.min_x + nc as i32;
            let y = bbox.min_y + nr as i32;
            if binary.is_foreground(x, y) && !visited[nr * mask.width + nc] {
                stack.push((nc, nr));
            }
        }
    }
}

fn classify_medium(mask: &Mask, binary: &BinaryImage, bbox: Rectangle) -> PatternTag {
    let horizontal = count_fill_lines(mask, binary, bbox, true);
    let vertical = count_fill_lines(mask, binary, bbox, false);
    if is_half_circle(mask, binary, bbox) {
        return PatternTag::HalfCircle;
    }
    match (horizontal > 0, vertical > 0) {
        (true, false) => PatternTag::HorizontalLines,
        (false, true) => PatternTag::VerticalLines,
        _ => PatternTag::Lines,
    }
}

/// Counts rows (or columns, if `!horizontal`) where foreground coverage
/// within the mask exceeds one third of the row/column's extent.
fn count_fill_lines(mask: &Mask, binary: &BinaryImage, bbox: Rectangle, horizontal: bool) -> usize {
    let (outer, inner) = if horizontal {
        (mask.height, mask.width)
    } else {
        (mask.width, mask.height)
    };
    let mut lines = 0;
    for i in 0..outer {
        let mut fg = 0;
        let mut extent = 0;
        for j in 0..inner {
            let (col, row) = if horizontal { (j, i) } else { (i, j) };
            if !mask.at(col, row) {
                continue;
            }
            extent += 1;
            let x = bbox.min_x + col as i32;
            let y = bbox.min_y + row as i32;
            if binary.is_foreground(x, y) {
                fg += 1;
            }
        }
        if extent > 0 && fg as f64 / extent as f64 > 1.0 / 3.0 {
            lines += 1;
        }
    }
    lines
}

fn is_half_circle(mask: &Mask, binary: &BinaryImage, bbox: Rectangle) -> bool {
    if mask.height == 0 {
        return false;
    }
    let half = mask.height / 2;
    let mut fg = 0;
    let mut total = 0;
    for row in 0..half {
        for col in 0..mask.width {
            if !mask.at(col, row) {
                continue;
            }
            total += 1;
            let x = bbox.min_x + col as i32;
            let y = bbox.min_y + row as i32;
            if binary.is_foreground(x, y) {
                fg += 1;
            }
        }
    }
    total > 0 && fg as f64 / total as f64 >= 0.5
}

fn classify_dense(mask: &Mask, binary: &BinaryImage, bbox: Rectangle) -> PatternTag {
    let mid_row = mask.height / 2;
    let mid_col = mask.width / 2;
    let row_filled = row_coverage(mask, binary, bbox, mid_row) > 1.0 / 3.0;
    let col_filled = col_coverage(mask, binary, bbox, mid_col) > 1.0 / 3.0;
    if row_filled && col_filled {
        PatternTag::Cross
    } else {
        PatternTag::Filled
    }
}

fn row_coverage(mask: &Mask, binary: &BinaryImage, bbox: Rectangle, row: usize) -> f64 {
    let mut fg = 0;
    let mut extent = 0;
    for col in 0..mask.width {
        if !mask.at(col, row) {
            continue;
        }
        extent += 1;
        let x = bbox.min_x + col as i32;
        let y = bbox.min_y + row as i32;
        if binary.is_foreground(x, y) {
            fg += 1;
        }
    }
    if extent == 0 {
        0.0
    } else {
        fg as f64 / extent as f64
    }
}

fn col_coverage(mask: &Mask, binary: &BinaryImage, bbox: Rectangle, col: usize) -> f64 {
    let mut fg = 0;
    let mut extent = 0;
    for row in 0..mask.height {
        if !mask.at(col, row) {
            continue;
        }
        extent += 1;
        let x = bbox.min_x + col as i32;
        let y = bbox.min_y + row as i32;
        if binary.is_foreground(x, y) {
            fg += 1;
        }
    }
    if extent == 0 {
        0.0
    } else {
        fg as f64 / extent as f64
    }
}
