//! Merges contours whose bounding boxes touch the image edge into a
//! single outer-frame candidate: the outer circle is frequently split
//! into arcs by edge clipping.

use magic_core::Rectangle;

use crate::contour::Contour;

/// Merges every contour whose bounding box touches the image border
/// (within `width`/`height`) into one contour covering their union,
/// leaving interior contours untouched. Returns the merged set.
pub fn merge_edge_touching(contours: Vec<Contour>, width: u32, height: u32) -> Vec<Contour> {
    let (edge, interior): (Vec<Contour>, Vec<Contour>) = contours
        .into_iter()
        .partition(|c| c.bounding_box.touches_edge(width as i32, height as i32, 0));

    if edge.len() <= 1 {
        return rejoin(edge, interior);
    }

    let mut points = Vec::new();
    for c in &edge {
        points.extend_from_slice(&c.points);
    }
    let merged = Contour::from_points(points);

    let mut out = interior;
    if let Some(m) = merged {
        out.push(m);
    } else {
        out.extend(edge);
    }
    out
}

fn rejoin(edge: Vec<Contour>, mut interior: Vec<Contour>) -> Vec<Contour> {
    interior.extend(edge);
    interior
}

/// Convenience check used by callers deciding whether an outer-circle
/// search needs the edge-merge pass at all.
pub fn any_touches_edge(contours: &[Contour], width: u32, height: u32) -> bool {
    contours
        .iter()
        .any(|c| c.bounding_box.touches_edge(width as i32, height as i32, 0))
}

#[allow(dead_code)]
fn union_box(boxes: &[Rectangle]) -> Option<Rectangle> {
    boxes.iter().copied().reduce(|a, b| Rectangle {
        min_x: a.min_x.min(b.min_x),
        min_y: a.min_y.min(b.min_y),
        max_x: a.max_x.max(b.max_x),
        max_y: a.max_y.max(b.max_y),
    })
}
