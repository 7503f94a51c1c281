//! The shape-classification cascade. The first rule that
//! fires wins; bucket order and `isStar` are load-bearing and must not
//! be reordered.

use magic_contour::Contour;
use magic_core::{ClassifierThresholds, Point, SymbolType};

use crate::simplify::simplify_contour;

/// Classifies a contour into a [`SymbolType`] using the first-match
/// cascade. `image_width`/`image_height` feed the outer-circle frame
/// heuristic (edge-touching or near-inscribed-radius span).
pub fn classify_shape(
    contour: &Contour,
    image_width: u32,
    image_height: u32,
    thresholds: &ClassifierThresholds,
) -> SymbolType {
    let vertices = simplify_contour(
        &contour.points,
        contour.perimeter,
        thresholds.simplify_epsilon_floor,
        thresholds.simplify_epsilon_fraction,
    );
    let n = vertices.len();

    if let Some(op) = classify_operator(contour, &vertices, thresholds) {
        return op;
    }
    if is_outer_circle(contour, image_width, image_height, thresholds) {
        return SymbolType::OuterCircle;
    }
    if is_rounded_square(contour, n) {
        return SymbolType::Square;
    }
    if is_square(contour, &vertices) {
        return SymbolType::Square;
    }
    if contour.circularity >= thresholds.circle_threshold {
        return SymbolType::Circle;
    }
    if is_double_circle(contour) {
        return SymbolType::DoubleCircle;
    }
    if let Some(poly) = classify_polygon(n) {
        return poly;
    }
    if is_generic_star(contour) {
        return SymbolType::Star;
    }
    SymbolType::Unknown
}

fn classify_operator(contour: &Contour, vertices: &[Point], thresholds: &ClassifierThresholds) -> Option<SymbolType> {
    let n = vertices.len();
    let aspect = contour.aspect_ratio;

    // Convergence/Divergence: Y-like shapes, very low circularity, small
    // to medium area.
    if contour.circularity < 0.35 && contour.area > 100.0 && contour.area < 5000.0 && (n == 3 || n == 4) {
        return Some(if aspect >= 1.0 {
            SymbolType::Convergence
        } else {
            SymbolType::Divergence
        });
    }

    // Distribution: radial alternating-radius pattern with moderate-high
    // circularity.
    if contour.circularity >= 0.6 && is_star(vertices, contour, 4) {
        return Some(SymbolType::Distribution);
    }

    // Amplification: 8-vertex approximation satisfying the 4-pointed
    // star test.
    if n == 8 && is_star(vertices, contour, 4) {
        return Some(SymbolType::Amplification);
    }

    // Transfer: arrow shape, 5-7 vertices, elongated, a single rightmost
    // extremum flanked above and below.
    if (5..=7).contains(&n) && aspect > 1.5 && has_single_rightmost_extremum(vertices) {
        return Some(SymbolType::Transfer);
    }

    // Equal: two horizontal strips with an empty middle band, markedly
    // elongated.
    if aspect > 2.0 && has_empty_middle_band(contour) {
        return Some(SymbolType::Equal);
    }

    // Less-than / greater-than: 3-vertex shapes, area above 200, aspect
    // ratio beyond the configured comparison cutoffs, apex to one side.
    if n == 3 && contour.area > 200.0 {
        if aspect >= thresholds.comparison_aspect_high {
            return Some(apex_side_comparison(vertices, true));
        }
        if aspect <= thresholds.comparison_aspect_low {
            return Some(apex_side_comparison(vertices, false));
        }
    }

    None
}

fn is_outer_circle(contour: &Contour, image_width: u32, image_height: u32, thresholds: &ClassifierThresholds) -> bool {
    let high_circularity = contour.circularity >= thresholds.circle_threshold;
    let large_enough = contour.area > 5000.0 || contour.perimeter > 500.0;
    if !(high_circularity && large_enough) {
        return false;
    }
    let touches_edge = contour.bounding_box.touches_edge(image_width as i32, image_height as i32, 2);
    let inscribed_radius = (image_width.min(image_height) as f64) / 2.0;
    let spans_frame = contour.max_radius() >= 0.7 * inscribed_radius;
    touches_edge || spans_frame
}

fn is_rounded_square(contour: &Contour, vertex_count: usize) -> bool {
    let aspect_ok = (0.8..=1.2).contains(&contour.aspect_ratio)
        || (contour.area < 400.0 && (0.65..=1.35).contains(&contour.aspect_ratio));
    (3..=8).contains(&vertex_count) && aspect_ok && (0.82..=0.95).contains(&contour.fill_ratio())
}

fn is_square(contour: &Contour, vertices: &[Point]) -> bool {
    if vertices.len() == 4 {
        let sides = side_lengths(vertices);
        let mean = sides.iter().sum::<f64>() / 4.0;
        let sides_uniform = mean > 0.0
            && sides.iter().all(|s| {
                let ratio = (s - mean).abs() / mean;
                (0.30..=0.50).contains(&ratio) || ratio <= 0.30
            });
        let angles = interior_angles(vertices);
        let angles_square = angles.iter().all(|a| (*a - 90.0).abs() <= 30.0);
        if sides_uniform && angles_square {
            return true;
        }
        if contour.circularity < 0.6 && contour.fill_ratio() >= 0.4 {
            return true;
        }
    }
    // Small-shape leniency: low circularity, near-square aspect, and a
    // fill ratio in one of the bands the classifier accepts as a square.
    if contour.area < 600.0
        && contour.circularity < 0.8
        && (0.7..=1.4).contains(&contour.aspect_ratio)
        && (contour.fill_ratio() >= 0.55 || (0.3..0.45).contains(&contour.fill_ratio()))
    {
        return true;
    }
    false
}

fn is_double_circle(contour: &Contour) -> bool {
    let fill = contour.fill_ratio();
    let thin_annulus = (0.1..=0.6).contains(&fill);
    let small_shape_lenient = contour.area < 2000.0 && contour.circularity > 0.5;
    thin_annulus && (contour.circularity > 0.4 || small_shape_lenient)
}

fn classify_polygon(vertex_count: usize) -> Option<SymbolType> {
    match vertex_count {
        3 => Some(SymbolType::Triangle),
        5 => Some(SymbolType::Pentagon),
        6 => Some(SymbolType::Hexagon),
        10 => Some(SymbolType::Star),
        11..=13 => Some(SymbolType::SixPointedStar),
        14..=18 => Some(SymbolType::EightPointedStar),
        _ => None,
    }
}

fn is_generic_star(contour: &Contour) -> bool {
    let mean = contour.mean_radius();
    if mean <= 0.0 {
        return false;
    }
    contour.radius_stddev() / mean > 0.15 && contour.circularity < 0.3
}

/// `isStar(vertices, k)`: exactly `2k` vertices alternating between outer
/// and inner radii, with each inner vertex at most `0.7` of both
/// neighboring outer radii.
fn is_star(vertices: &[Point], contour: &Contour, k: usize) -> bool {
    let n = vertices.len();
    if n != 2 * k || n == 0 {
        return false;
    }
    let centroid = contour.centroid;
    let radii: Vec<f64> = vertices.iter().map(|p| centroid.distance(p.to_position())).collect();
    for i in 0..n {
        if i % 2 == 1 {
            let inner = radii[i];
            let prev = radii[(i + n - 1) % n];
            let next = radii[(i + 1) % n];
            if inner > 0.7 * prev || inner > 0.7 * next {
                return false;
            }
        }
    }
    true
}

fn side_lengths(vertices: &[Point]) -> Vec<f64> {
    let n = vertices.len();
    (0..n).map(|i| vertices[i].distance(vertices[(i + 1) % n])).collect()
}

fn interior_angles(vertices: &[Point]) -> Vec<f64> {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let prev = vertices[(i + n - 1) % n];
            let cur = vertices[i];
            let next = vertices[(i + 1) % n];
            let v1 = (prev.x as f64 - cur.x as f64, prev.y as f64 - cur.y as f64);
            let v2 = (next.x as f64 - cur.x as f64, next.y as f64 - cur.y as f64);
            let dot = v1.0 * v2.0 + v1.1 * v2.1;
            let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
            let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
            if mag1 == 0.0 || mag2 == 0.0 {
                return 90.0;
            }
            (dot / (mag1 * mag2)).clamp(-1.0, 1.0).acos().to_degrees()
        })
        .collect()
}

fn has_single_rightmost_extremum(vertices: &[Point]) -> bool {
    if vertices.is_empty() {
        return false;
    }
    let rightmost = vertices.iter().max_by_key(|p| p.x).unwrap();
    let above = vertices.iter().any(|p| p.y < rightmost.y && p.x < rightmost.x);
    let below = vertices.iter().any(|p| p.y > rightmost.y && p.x < rightmost.x);
    above && below
}

fn has_empty_middle_band(contour: &Contour) -> bool {
    let bbox = contour.bounding_box;
    let mid_y = (bbox.min_y + bbox.max_y) / 2;
    let band = (bbox.height() as f64 * 0.2).max(1.0) as i32;
    !contour
        .points
        .iter()
        .any(|p| (p.y - mid_y).abs() <= band / 2)
}

fn apex_side_comparison(vertices: &[Point], apex_on_left: bool) -> SymbolType {
    let apex = vertices.iter().min_by_key(|p| p.x);
    let rightmost_x = vertices.iter().map(|p| p.x).max().unwrap_or(0);
    let leftmost_x = vertices.iter().map(|p| p.x).min().unwrap_or(0);
    let apex_is_left = apex.map(|a| a.x - leftmost_x < rightmost_x - a.x).unwrap_or(true);
    if apex_on_left == apex_is_left {
        SymbolType::LessThan
    } else {
        SymbolType::GreaterThan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::{ClassifierThresholds, Point};

    /// Builds a dense, near-circular boundary (as a traced contour would
    /// produce for a disc), used by the circularity-driven tests.
    fn dense_circle(samples: usize, radius: f64) -> Contour {
        let pts: Vec<Point> = (0..samples)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / samples as f64;
                Point::new((radius * theta.cos()).round() as i32, (radius * theta.sin()).round() as i32)
            })
            .collect();
        Contour::from_points(pts).unwrap()
    }

    /// Builds a true `sides`-vertex regular polygon contour, used by the
    /// vertex-count-driven tests.
    fn regular_polygon(sides: usize, radius: f64) -> Contour {
        let pts: Vec<Point> = (0..sides)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / sides as f64;
                Point::new((radius * theta.cos()).round() as i32, (radius * theta.sin()).round() as i32)
            })
            .collect();
        Contour::from_points(pts).unwrap()
    }

    #[test]
    fn large_circle_touching_edge_classifies_as_outer_circle() {
        let contour = dense_circle(64, 95.0);
        let thresholds = ClassifierThresholds::default();
        let kind = classify_shape(&contour, 200, 200, &thresholds);
        assert_eq!(kind, SymbolType::OuterCircle);
    }

    #[test]
    fn small_circle_classifies_as_circle() {
        let contour = dense_circle(64, 20.0);
        let thresholds = ClassifierThresholds::default();
        let kind = classify_shape(&contour, 400, 400, &thresholds);
        assert_eq!(kind, SymbolType::Circle);
    }

    #[test]
    fn axis_aligned_square_classifies_as_square() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(40, 0),
            Point::new(40, 40),
            Point::new(0, 40),
        ];
        let contour = Contour::from_points(pts).unwrap();
        let thresholds = ClassifierThresholds::default();
        let kind = classify_shape(&contour, 400, 400, &thresholds);
        assert_eq!(kind, SymbolType::Square);
    }

    #[test]
    fn pentagon_classifies_correctly() {
        // A mathematically perfect regular pentagon has an isoperimetric
        // ratio (~0.865) above the default circle threshold; a hand-drawn
        // or rasterized pentagon does not. Raise the threshold here to
        // exercise the vertex-count dispatch in isolation.
        let contour = regular_polygon(5, 60.0);
        let mut thresholds = ClassifierThresholds::default();
        thresholds.circle_threshold = 0.95;
        let kind = classify_shape(&contour, 400, 400, &thresholds);
        assert_eq!(kind, SymbolType::Pentagon);
    }
}
