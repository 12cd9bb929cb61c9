//! Vector shape path construction.

use carousel_core::ShapeKind;
use tiny_skia::{Path, PathBuilder, Rect};

/// Ratio of the star's inner radius to its outer radius.
const STAR_INNER_RATIO: f32 = 0.4;

/// Build the outline path for a shape inside `rect`.
///
/// `corner_radius` only affects rounded rectangles. Returns `None` for
/// degenerate boxes. [`ShapeKind::Line`] produces the horizontal segment
/// through the vertical center; it is meant for stroking only and is never
/// filled.
#[must_use]
pub fn build_shape_path(kind: ShapeKind, rect: Rect, corner_radius: f32) -> Option<Path> {
    let (x, y, w, h) = (rect.x(), rect.y(), rect.width(), rect.height());
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;
    let mut pb = PathBuilder::new();

    match kind {
        ShapeKind::Rectangle => {
            pb.push_rect(rect);
        }
        ShapeKind::RoundedRectangle => {
            push_rounded_rect(&mut pb, rect, corner_radius);
        }
        ShapeKind::Ellipse => {
            pb.push_oval(rect);
        }
        ShapeKind::Triangle => {
            pb.move_to(cx, y);
            pb.line_to(x + w, y + h);
            pb.line_to(x, y + h);
            pb.close();
        }
        ShapeKind::Diamond => {
            pb.move_to(cx, y);
            pb.line_to(x + w, cy);
            pb.line_to(cx, y + h);
            pb.line_to(x, cy);
            pb.close();
        }
        ShapeKind::Hexagon => {
            pb.move_to(x + w / 4.0, y);
            pb.line_to(x + w * 3.0 / 4.0, y);
            pb.line_to(x + w, cy);
            pb.line_to(x + w * 3.0 / 4.0, y + h);
            pb.line_to(x + w / 4.0, y + h);
            pb.line_to(x, cy);
            pb.close();
        }
        ShapeKind::Star => {
            let outer = w.min(h) / 2.0;
            let inner = outer * STAR_INNER_RATIO;
            // 10 vertices at 36-degree steps, starting pointing up.
            for i in 0..10 {
                let radius = if i % 2 == 0 { outer } else { inner };
                #[allow(clippy::cast_precision_loss)]
                let angle = (-90.0 + 36.0 * i as f32).to_radians();
                let px = cx + radius * angle.cos();
                let py = cy + radius * angle.sin();
                if i == 0 {
                    pb.move_to(px, py);
                } else {
                    pb.line_to(px, py);
                }
            }
            pb.close();
        }
        ShapeKind::Line => {
            pb.move_to(x, cy);
            pb.line_to(x + w, cy);
        }
    }

    pb.finish()
}

fn push_rounded_rect(pb: &mut PathBuilder, rect: Rect, radius: f32) {
    let (x, y, w, h) = (rect.x(), rect.y(), rect.width(), rect.height());
    let r = radius.clamp(0.0, w.min(h) / 2.0);
    if r <= 0.0 {
        pb.push_rect(rect);
        return;
    }

    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
}

/// Parse a comma-separated dash pattern into stroke dash lengths.
///
/// Malformed or non-positive entries are dropped; an odd-length list is
/// doubled so the dash array is always valid. Returns `None` when nothing
/// usable remains.
#[must_use]
pub fn parse_dash(pattern: &str) -> Option<Vec<f32>> {
    let mut dashes: Vec<f32> = pattern
        .split(',')
        .filter_map(|tok| tok.trim().parse::<f32>().ok())
        .filter(|v| *v > 0.0)
        .collect();

    if dashes.is_empty() {
        return None;
    }
    if dashes.len() % 2 != 0 {
        let copy = dashes.clone();
        dashes.extend(copy);
    }
    Some(dashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::PathSegment;

    fn vertices(path: &Path) -> Vec<(f32, f32)> {
        let mut points = Vec::new();
        for seg in path.segments() {
            match seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => points.push((p.x, p.y)),
                _ => {}
            }
        }
        points
    }

    fn dist(a: (f32, f32), b: (f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
    }

    #[test]
    fn test_star_has_ten_alternating_vertices() {
        let rect = Rect::from_xywh(0.0, 0.0, 100.0, 100.0).expect("rect");
        let path = build_shape_path(ShapeKind::Star, rect, 0.0).expect("path");
        let points = vertices(&path);
        assert_eq!(points.len(), 10);

        let center = (50.0, 50.0);
        for (i, p) in points.iter().enumerate() {
            let expected = if i % 2 == 0 { 50.0 } else { 20.0 };
            let r = dist(*p, center);
            assert!(
                (r - expected).abs() < 1e-3,
                "vertex {i} radius {r}, expected {expected}"
            );
        }

        // First vertex points straight up.
        assert!((points[0].0 - 50.0).abs() < 1e-3);
        assert!((points[0].1 - 0.0).abs() < 1e-3);
    }

    #[test]
    fn test_star_uses_shorter_side() {
        let rect = Rect::from_xywh(0.0, 0.0, 200.0, 100.0).expect("rect");
        let path = build_shape_path(ShapeKind::Star, rect, 0.0).expect("path");
        let points = vertices(&path);
        let center = (100.0, 50.0);
        // Outer radius is half the shorter side.
        assert!((dist(points[0], center) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_diamond_vertices_are_edge_midpoints() {
        let rect = Rect::from_xywh(10.0, 20.0, 100.0, 60.0).expect("rect");
        let path = build_shape_path(ShapeKind::Diamond, rect, 0.0).expect("path");
        let points = vertices(&path);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], (60.0, 20.0));
        assert_eq!(points[1], (110.0, 50.0));
        assert_eq!(points[2], (60.0, 80.0));
        assert_eq!(points[3], (10.0, 50.0));
    }

    #[test]
    fn test_triangle_apex_top_center() {
        let rect = Rect::from_xywh(0.0, 0.0, 80.0, 40.0).expect("rect");
        let path = build_shape_path(ShapeKind::Triangle, rect, 0.0).expect("path");
        let points = vertices(&path);
        assert_eq!(points, vec![(40.0, 0.0), (80.0, 40.0), (0.0, 40.0)]);
    }

    #[test]
    fn test_hexagon_inset_quarter_width() {
        let rect = Rect::from_xywh(0.0, 0.0, 100.0, 60.0).expect("rect");
        let path = build_shape_path(ShapeKind::Hexagon, rect, 0.0).expect("path");
        let points = vertices(&path);
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], (25.0, 0.0));
        assert_eq!(points[1], (75.0, 0.0));
        assert_eq!(points[2], (100.0, 30.0));
        assert_eq!(points[5], (0.0, 30.0));
    }

    #[test]
    fn test_line_is_horizontal_through_center() {
        let rect = Rect::from_xywh(5.0, 10.0, 90.0, 40.0).expect("rect");
        let path = build_shape_path(ShapeKind::Line, rect, 0.0).expect("path");
        let points = vertices(&path);
        assert_eq!(points, vec![(5.0, 30.0), (95.0, 30.0)]);
    }

    #[test]
    fn test_rounded_rect_clamps_radius() {
        let rect = Rect::from_xywh(0.0, 0.0, 40.0, 40.0).expect("rect");
        // Radius larger than half the box must not produce a broken path.
        let path = build_shape_path(ShapeKind::RoundedRectangle, rect, 100.0);
        assert!(path.is_some());
    }

    #[test]
    fn test_parse_dash() {
        assert_eq!(parse_dash("4, 2"), Some(vec![4.0, 2.0]));
        // Odd-length lists are doubled.
        assert_eq!(parse_dash("5"), Some(vec![5.0, 5.0]));
        // Malformed entries are dropped.
        assert_eq!(parse_dash("4, x, 2"), Some(vec![4.0, 2.0]));
        assert_eq!(parse_dash("nope"), None);
        assert_eq!(parse_dash(""), None);
    }
}
