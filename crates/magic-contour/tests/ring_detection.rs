use magic_contour::{find_contours, merge_edge_touching};
use magic_core::BinaryImage;

fn ring_image(size: u32, inner: i32, outer: i32) -> BinaryImage {
    let mut img = BinaryImage::new(size, size);
    let c = (size / 2) as i32;
    for y in 0..size as i32 {
        for x in 0..size as i32 {
            let d2 = (x - c) * (x - c) + (y - c) * (y - c);
            if d2 <= outer * outer && d2 >= inner * inner {
                img.set_foreground(x, y, true);
            }
        }
    }
    img
}

#[test]
fn full_ring_yields_one_contour_with_high_circularity() {
    let img = ring_image(200, 60, 80);
    let contours = find_contours(&img, 50.0);
    assert!(!contours.is_empty());
    let best = contours
        .iter()
        .max_by(|a, b| a.circularity.partial_cmp(&b.circularity).unwrap())
        .unwrap();
    assert!(best.circularity > 0.7, "circularity = {}", best.circularity);
}

#[test]
fn two_border_touching_blobs_merge_into_a_single_contour() {
    let size = 100;
    let mut img = BinaryImage::new(size, size);
    for y in 10..20 {
        for x in 0..8 {
            img.set_foreground(x, y, true);
        }
    }
    for y in 80..90 {
        for x in 92..size as i32 {
            img.set_foreground(x, y, true);
        }
    }
    let contours = find_contours(&img, 1.0);
    assert_eq!(contours.len(), 2);
    let merged = merge_edge_touching(contours, size, size);
    assert_eq!(merged.len(), 1, "both border-touching blobs should merge into one candidate");
}
