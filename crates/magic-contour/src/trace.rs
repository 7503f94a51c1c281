//! Moore-neighborhood boundary tracing and whole-image contour finding.

use magic_core::{BinaryImage, Point};

use crate::contour::Contour;

/// 8-connected offsets, clockwise starting from east.
const DIRS: [(i32, i32); 8] = [
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
];

/// Traces the boundary of the foreground component containing `start`
/// using Moore-neighborhood following. Terminates when the walk returns
/// within 2px of `start` (after at least 3 points) or after
/// `step_budget` steps.
pub fn trace_boundary(binary: &BinaryImage, start: Point, step_budget: usize) -> Vec<Point> {
    let mut boundary = vec![start];
    let mut current = start;
    // The pixel scanned immediately before `start` in row-major order was
    // background (that's why `start` is the first foreground pixel found);
    // treat it as the initial backtrack point, one step west.
    let mut backtrack = Point::new(start.x - 1, start.y);

    for _ in 0..step_budget {
        let dir_to_backtrack = direction_index(current, backtrack);
        let mut advanced = false;
        for step in 1..=8 {
            let dir = (dir_to_backtrack + step) % 8;
            let (dx, dy) = DIRS[dir];
            let candidate = Point::new(current.x + dx, current.y + dy);
            if binary.is_foreground(candidate.x, candidate.y) {
                let prev_dir = (dir + 7) % 8;
                let (pdx, pdy) = DIRS[prev_dir];
                backtrack = Point::new(current.x + pdx, current.y + pdy);
                current = candidate;
                boundary.push(current);
                advanced = true;
                break;
            }
        }
        if !advanced {
            // Isolated foreground pixel with no 8-connected neighbor.
            break;
        }
        if boundary.len() > 3 && current.distance(start) < 2.0 {
            break;
        }
    }
    boundary
}

fn direction_index(from: Point, to: Point) -> usize {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();
    DIRS.iter()
        .position(|&(ddx, ddy)| ddx == dx && ddy == dy)
        .unwrap_or(4)
}

/// Finds all connected foreground components in `binary`, returning
/// contours sorted by area, largest first. Contours with fewer than 10
/// points or area below `min_area` are discarded.
pub fn find_contours(binary: &BinaryImage, min_area: f64) -> Vec<Contour> {
    let (w, h) = (binary.width() as i32, binary.height() as i32);
    let mut visited = vec![false; (w * h) as usize];
    let step_budget = (w as usize).saturating_mul(h as usize).max(1);
    let mut contours = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if visited[idx] || !binary.is_foreground(x, y) {
                continue;
            }
            let start = Point::new(x, y);
            let boundary = trace_boundary(binary, start, step_budget);
            for p in &boundary {
                if p.x >= 0 && p.x < w && p.y >= 0 && p.y < h {
                    visited[(p.y * w + p.x) as usize] = true;
                }
            }
            if let Some(contour) = Contour::from_points(boundary) {
                suppress_interior(binary, &contour, w, h, &mut visited);
                if contour.points.len() >= 10 && contour.area >= min_area {
                    contours.push(contour);
                }
            }
        }
    }

    contours.sort_by(|a, b| b.area.partial_cmp(&a.area).unwrap_or(std::cmp::Ordering::Equal));
    contours
}

/// After tracing, sweeps the contour's bounding box and marks any
/// unvisited foreground pixel as visited, so interior regions do not
/// seed duplicate contours.
fn suppress_interior(binary: &BinaryImage, contour: &Contour, w: i32, h: i32, visited: &mut [bool]) {
    let bbox = contour.bounding_box;
    let min_x = bbox.min_x.max(0);
    let min_y = bbox.min_y.max(0);
    let max_x = bbox.max_x.min(w);
    let max_y = bbox.max_y.min(h);
    for y in min_y..max_y {
        for x in min_x..max_x {
            if binary.is_foreground(x, y) {
                visited[(y * w + x) as usize] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_square(size: u32, x0: i32, y0: i32, edge: i32) -> BinaryImage {
        let mut img = BinaryImage::new(size, size);
        for y in y0..y0 + edge {
            for x in x0..x0 + edge {
                img.set_foreground(x, y, true);
            }
        }
        img
    }

    #[test]
    fn finds_single_filled_square() {
        let img = filled_square(40, 10, 10, 20);
        let contours = find_contours(&img, 10.0);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].points.len() >= 10);
        assert!(contours[0].area >= 10.0);
    }

    #[test]
    fn discards_contours_below_min_area() {
        let mut img = BinaryImage::new(20, 20);
        for y in 5..8 {
            for x in 5..8 {
                img.set_foreground(x, y, true);
            }
        }
        let contours = find_contours(&img, 1000.0);
        assert!(contours.is_empty());
    }

    #[test]
    fn finds_two_components_sorted_by_area_descending() {
        let mut img = BinaryImage::new(60, 30);
        for y in 2..28 {
            for x in 2..20 {
                img.set_foreground(x, y, true);
            }
        }
        for y in 10..15 {
            for x in 40..48 {
                img.set_foreground(x, y, true);
            }
        }
        let contours = find_contours(&img, 10.0);
        assert_eq!(contours.len(), 2);
        assert!(contours[0].area >= contours[1].area);
    }

    #[test]
    fn recomputed_area_matches_contour_area_within_one_pixel() {
        let img = filled_square(40, 5, 5, 15);
        let contours = find_contours(&img, 10.0);
        let c = &contours[0];
        let recomputed = {
            let n = c.points.len();
            let mut sum = 0i64;
            for i in 0..n {
                let a = c.points[i];
                let b = c.points[(i + 1) % n];
                sum += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
            }
            (sum.unsigned_abs() as f64) / 2.0
        };
        assert!((recomputed - c.area).abs() < 1.0);
    }
}
