//! Connection-type labeling by sampling transitions along a segment.

use magic_core::{BinaryImage, ConnectionType};

use crate::line::Line;

const SAMPLE_COUNT: usize = 11;

/// Samples 11 points along `line` on `binary` and counts
/// foreground/background transitions: `<= 2` -> solid, `<= 10` ->
/// dashed, else dotted.
pub fn label_connection_type(line: &Line, binary: &BinaryImage) -> ConnectionType {
    let mut prev: Option<bool> = None;
    let mut transitions = 0;
    for i in 0..SAMPLE_COUNT {
        let t = i as f64 / (SAMPLE_COUNT - 1) as f64;
        let x = line.start.x as f64 + t * (line.end.x - line.start.x) as f64;
        let y = line.start.y as f64 + t * (line.end.y - line.start.y) as f64;
        let fg = binary.is_foreground(x.round() as i32, y.round() as i32);
        if let Some(p) = prev {
            if p != fg {
                transitions += 1;
            }
        }
        prev = Some(fg);
    }
    if transitions <= 2 {
        ConnectionType::Solid
    } else if transitions <= 10 {
        ConnectionType::Dashed
    } else {
        ConnectionType::Dotted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::Point;

    #[test]
    fn fully_drawn_segment_labels_solid() {
        let mut binary = BinaryImage::new(50, 10);
        for x in 0..50 {
            binary.set_foreground(x, 5, true);
        }
        let line = Line::new(Point::new(0, 5), Point::new(49, 5));
        assert_eq!(label_connection_type(&line, &binary), ConnectionType::Solid);
    }

    #[test]
    fn heavily_broken_segment_labels_dotted() {
        let mut binary = BinaryImage::new(50, 10);
        for x in (0..50).step_by(2) {
            binary.set_foreground(x, 5, true);
        }
        let line = Line::new(Point::new(0, 5), Point::new(49, 5));
        assert_eq!(label_connection_type(&line, &binary), ConnectionType::Dotted);
    }
}
