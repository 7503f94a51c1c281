//! The three line extractors unioned to produce candidate [`Line`]
//! segments: horizontal/vertical scan, diagonal follow, and
//! diagonal Hough accumulation.

use std::collections::HashMap;

use magic_core::{BinaryImage, Point};

use crate::line::Line;

const MIN_SCAN_RUN: i32 = 20;
const MIN_DIAGONAL_WALK: usize = 15;
const MIN_HOUGH_BUCKET: usize = 15;
const MIN_SEGMENT_LENGTH: f64 = 20.0;

/// Runs all three extractors over `edges` and returns their union.
pub fn extract_lines(edges: &BinaryImage) -> Vec<Line> {
    let mut lines = scan_lines(edges);
    lines.extend(diagonal_follow(edges));
    lines.extend(diagonal_hough(edges));
    lines
}

/// Horizontal then vertical scan: runs of `>= 20` consecutive
/// foreground pixels along a row or column.
fn scan_lines(edges: &BinaryImage) -> Vec<Line> {
    let (w, h) = (edges.width() as i32, edges.height() as i32);
    let mut lines = Vec::new();

    for y in 0..h {
        let mut run_start: Option<i32> = None;
        for x in 0..=w {
            let fg = x < w && edges.is_foreground(x, y);
            match (fg, run_start) {
                (true, None) => run_start = Some(x),
                (false, Some(s)) => {
                    if x - s >= MIN_SCAN_RUN {
                        lines.push(Line::new(Point::new(s, y), Point::new(x - 1, y)));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    for x in 0..w {
        let mut run_start: Option<i32> = None;
        for y in 0..=h {
            let fg = y < h && edges.is_foreground(x, y);
            match (fg, run_start) {
                (true, None) => run_start = Some(y),
                (false, Some(s)) => {
                    if y - s >= MIN_SCAN_RUN {
                        lines.push(Line::new(Point::new(x, s), Point::new(x, y - 1)));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
    }

    lines
}

const DIAGONAL_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// From every unvisited foreground pixel, walks each of the four
/// diagonal directions tolerating a +/-1 vertical deviation, emitting a
/// segment when the walk reaches at least 15 pixels.
fn diagonal_follow(edges: &BinaryImage) -> Vec<Line> {
    let (w, h) = (edges.width() as i32, edges.height() as i32);
    let mut visited = vec![false; (w * h) as usize];
    let mut lines = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if !edges.is_foreground(x, y) || visited[(y * w + x) as usize] {
                continue;
            }
            for &(dx, dy) in &DIAGONAL_DIRS {
                let walk = walk_diagonal(edges, Point::new(x, y), dx, dy);
                if walk.len() >= MIN_DIAGONAL_WALK {
                    for p in &walk {
                        if p.x >= 0 && p.x < w && p.y >= 0 && p.y < h {
                            visited[(p.y * w + p.x) as usize] = true;
                        }
                    }
                    lines.push(Line::new(walk[0], *walk.last().unwrap()));
                }
            }
        }
    }

    lines
}

fn walk_diagonal(edges: &BinaryImage, start: Point, dx: i32, dy: i32) -> Vec<Point> {
    let mut path = vec![start];
    let mut current = start;
    loop {
        let mut advanced = false;
        // Step forward along the diagonal; tolerate a +/-1 perpendicular
        // deviation on the cross axis before giving up.
        let forward = Point::new(current.x + dx, current.y + dy);
        if edges.is_foreground(forward.x, forward.y) {
            current = forward;
            path.push(current);
            advanced = true;
        } else {
            for dev in [1, -1] {
                let deviated = Point::new(current.x + dx, current.y + dy + dev);
                if edges.is_foreground(deviated.x, deviated.y) {
                    current = deviated;
                    path.push(current);
                    advanced = true;
                    break;
                }
            }
        }
        if !advanced {
            break;
        }
    }
    path
}

/// Accumulates edge pixels by `y - x` (45 degree intercept) and `y + x`
/// (-45 degree intercept); buckets with at least 15 points yield a
/// segment spanning their two farthest points.
fn diagonal_hough(edges: &BinaryImage) -> Vec<Line> {
    let (w, h) = (edges.width() as i32, edges.height() as i32);
    let mut buckets_45: HashMap<i32, Vec<Point>> = HashMap::new();
    let mut buckets_135: HashMap<i32, Vec<Point>> = HashMap::new();

    for y in 0..h {
        for x in 0..w {
            if edges.is_foreground(x, y) {
                buckets_45.entry(y - x).or_default().push(Point::new(x, y));
                buckets_135.entry(y + x).or_default().push(Point::new(x, y));
            }
        }
    }

    let mut lines = Vec::new();
    for bucket in buckets_45.values().chain(buckets_135.values()) {
        if bucket.len() < MIN_HOUGH_BUCKET {
            continue;
        }
        if let Some((a, b)) = farthest_pair(bucket) {
            let line = Line::new(a, b);
            if line.length() >= MIN_SEGMENT_LENGTH {
                lines.push(line);
            }
        }
    }
    lines
}

fn farthest_pair(points: &[Point]) -> Option<(Point, Point)> {
    let mut best = None;
    let mut best_dist = -1i64;
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = points[i].distance_sq(points[j]);
            if d > best_dist {
                best_dist = d;
                best = Some((points[i], points[j]));
            }
        }
    }
    best
}
