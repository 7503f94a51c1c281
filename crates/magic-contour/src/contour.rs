//! The `Contour` record and its derived scalar properties.

use magic_core::{Point, Position, Rectangle};

/// A traced boundary of a connected foreground region, plus every scalar
/// derived from it.
///
/// Invariant: `points` forms a simple closed walk and `area >= 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    /// Ordered boundary points.
    pub points: Vec<Point>,
    /// Shoelace area.
    pub area: f64,
    /// Chain-step perimeter.
    pub perimeter: f64,
    /// Mean of the boundary points.
    pub centroid: Position,
    /// `4*pi*area / perimeter^2`; 1 for a perfect disc.
    pub circularity: f64,
    /// Axis-aligned bounding box.
    pub bounding_box: Rectangle,
    /// `max(w, h) / min(w, h)`.
    pub aspect_ratio: f64,
}

impl Contour {
    /// Builds a contour from a closed point sequence, computing every
    /// derived property. Returns `None` for a degenerate (fewer than 3
    /// points, or zero-perimeter) input.
    pub fn from_points(points: Vec<Point>) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let area = shoelace_area(&points);
        let perimeter = chain_perimeter(&points);
        if perimeter <= 0.0 {
            return None;
        }
        let centroid = mean_centroid(&points);
        let circularity = 4.0 * std::f64::consts::PI * area / (perimeter * perimeter);
        let bounding_box = Rectangle::bounding(&points)?;
        let aspect_ratio = bounding_box.aspect_ratio();
        Some(Self {
            points,
            area,
            perimeter,
            centroid,
            circularity,
            bounding_box,
            aspect_ratio,
        })
    }

    /// The farthest distance from any boundary point to the centroid.
    pub fn max_radius(&self) -> f64 {
        self.points
            .iter()
            .map(|p| self.centroid.distance(p.to_position()))
            .fold(0.0_f64, f64::max)
    }

    /// Mean distance from boundary points to the centroid.
    pub fn mean_radius(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .points
            .iter()
            .map(|p| self.centroid.distance(p.to_position()))
            .sum();
        sum / self.points.len() as f64
    }

    /// Standard deviation of boundary-to-centroid distances, used by the
    /// generic star-shape fallback rule.
    pub fn radius_stddev(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        let mean = self.mean_radius();
        let variance: f64 = self
            .points
            .iter()
            .map(|p| {
                let d = self.centroid.distance(p.to_position()) - mean;
                d * d
            })
            .sum::<f64>()
            / self.points.len() as f64;
        variance.sqrt()
    }

    /// Fraction of the bounding box's area covered by the contour's
    /// shoelace area, used by the square/circle lenient branches.
    pub fn fill_ratio(&self) -> f64 {
        let bbox_area = self.bounding_box.area() as f64;
        if bbox_area <= 0.0 {
            return 0.0;
        }
        (self.area / bbox_area).clamp(0.0, 1.0)
    }
}

fn shoelace_area(points: &[Point]) -> f64 {
    let n = points.len();
    let mut sum = 0i64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
    }
    (sum.unsigned_abs() as f64) / 2.0
}

fn chain_perimeter(points: &[Point]) -> f64 {
    let n = points.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        sum += a.distance(b);
    }
    sum
}

fn mean_centroid(points: &[Point]) -> Position {
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
    Position::new(sx / n, sy / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_has_area_one_and_perimeter_four() {
        let pts = vec![
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
        ];
        let c = Contour::from_points(pts).unwrap();
        assert!((c.area - 1.0).abs() < 1e-9);
        assert!((c.perimeter - 4.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_points_return_none() {
        assert!(Contour::from_points(vec![Point::new(0, 0), Point::new(1, 1)]).is_none());
    }

    #[test]
    fn circularity_is_one_for_regular_octagon_approximating_a_disc() {
        let n = 64;
        let r = 50.0;
        let pts: Vec<Point> = (0..n)
            .map(|i| {
                let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                Point::new(
                    (r * theta.cos()).round() as i32,
                    (r * theta.sin()).round() as i32,
                )
            })
            .collect();
        let c = Contour::from_points(pts).unwrap();
        assert!((c.circularity - 1.0).abs() < 0.1, "{}", c.circularity);
    }
}
