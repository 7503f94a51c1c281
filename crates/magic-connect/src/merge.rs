//! Merges near-duplicate line segments and drops exact duplicates.

use magic_core::Point;

use crate::line::Line;

const MERGE_ENDPOINT_DIST: f64 = 5.0;
const MERGE_ANGLE_DIFF: f64 = 30.0;
const DEDUP_ENDPOINT_DIST: f64 = 10.0;

/// Merges segments whose endpoints are within 5px and whose angles
/// differ by less than 30 degrees, then drops near-duplicates (endpoint
/// pairs within 10px in either orientation).
pub fn merge_lines(lines: Vec<Line>) -> Vec<Line> {
    let merged = merge_close_segments(lines);
    dedup_near_duplicates(merged)
}

fn merge_close_segments(lines: Vec<Line>) -> Vec<Line> {
    let mut groups: Vec<Line> = Vec::new();
    'outer: for line in lines {
        for existing in groups.iter_mut() {
            if shares_endpoint(existing, &line) && angle_diff(existing.angle(), line.angle()) < MERGE_ANGLE_DIFF {
                *existing = span_farthest(existing, &line);
                continue 'outer;
            }
        }
        groups.push(line);
    }
    groups
}

fn shares_endpoint(a: &Line, b: &Line) -> bool {
    let d = MERGE_ENDPOINT_DIST;
    a.start.distance(b.start) < d
        || a.start.distance(b.end) < d
        || a.end.distance(b.start) < d
        || a.end.distance(b.end) < d
}

fn angle_diff(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    diff.min(180.0 - diff)
}

fn span_farthest(a: &Line, b: &Line) -> Line {
    let points = [a.start, a.end, b.start, b.end];
    let mut best = (points[0], points[1]);
    let mut best_dist = points[0].distance_sq(points[1]);
    for i in 0..4 {
        for j in (i + 1)..4 {
            let d = points[i].distance_sq(points[j]);
            if d > best_dist {
                best_dist = d;
                best = (points[i], points[j]);
            }
        }
    }
    Line::new(best.0, best.1)
}

fn dedup_near_duplicates(lines: Vec<Line>) -> Vec<Line> {
    let mut kept: Vec<Line> = Vec::new();
    'outer: for line in lines {
        for existing in &kept {
            if is_near_duplicate(existing, &line) {
                continue 'outer;
            }
        }
        kept.push(line);
    }
    kept
}

fn is_near_duplicate(a: &Line, b: &Line) -> bool {
    let same_orientation = close(a.start, b.start) && close(a.end, b.end);
    let reversed = close(a.start, b.end) && close(a.end, b.start);
    same_orientation || reversed
}

fn close(a: Point, b: Point) -> bool {
    a.distance(b) < DEDUP_ENDPOINT_DIST
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_two_collinear_segments_sharing_an_endpoint() {
        let a = Line::new(Point::new(0, 0), Point::new(10, 0));
        let b = Line::new(Point::new(11, 0), Point::new(30, 0));
        let merged = merge_lines(vec![a, b]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].length() >= 29.0);
    }

    #[test]
    fn drops_exact_duplicate_segment() {
        let a = Line::new(Point::new(0, 0), Point::new(50, 0));
        let b = Line::new(Point::new(0, 0), Point::new(50, 0));
        let merged = merge_lines(vec![a, b]);
        assert_eq!(merged.len(), 1);
    }
}
