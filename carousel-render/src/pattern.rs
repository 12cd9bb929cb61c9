//! Procedural pattern backgrounds.
//!
//! The editor previews patterns as tiled vector snippets; export rasterizes
//! the same tiling procedurally so preview and output agree.

use carousel_core::{color, normalize_color, PatternKind};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

/// Rasterize a tiled pattern over the whole surface.
///
/// `tile` is the logical tile size; `device_scale` is the export scale so
/// the pattern tiles in document space, not device space. A transparent or
/// zero-opacity ink is a no-op.
#[allow(clippy::cast_precision_loss)]
pub fn render_pattern(
    pixmap: &mut Pixmap,
    kind: PatternKind,
    ink: &str,
    opacity: f32,
    tile: f32,
    device_scale: f32,
) {
    let normalized = normalize_color(Some(ink));
    if normalized == color::TRANSPARENT || opacity <= 0.0 {
        return;
    }
    let (r, g, b) = color::hex_to_rgb(&normalized);

    let mut paint = Paint::default();
    paint.set_color(
        tiny_skia::Color::from_rgba(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            opacity.clamp(0.0, 1.0),
        )
        .unwrap_or(tiny_skia::Color::BLACK),
    );
    paint.anti_alias = true;

    let cell = (tile.max(4.0)) * device_scale;
    let width = pixmap.width() as f32;
    let height = pixmap.height() as f32;

    match kind {
        PatternKind::Dots => {
            let radius = cell / 6.0;
            let mut pb = PathBuilder::new();
            let mut y = cell / 2.0;
            while y < height + cell {
                let mut x = cell / 2.0;
                while x < width + cell {
                    pb.push_circle(x, y, radius);
                    x += cell;
                }
                y += cell;
            }
            if let Some(path) = pb.finish() {
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        PatternKind::Grid => {
            let line_width = device_scale.max(1.0);
            let mut x = cell;
            while x < width {
                if let Some(rect) = Rect::from_xywh(x - line_width / 2.0, 0.0, line_width, height)
                {
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }
                x += cell;
            }
            let mut y = cell;
            while y < height {
                if let Some(rect) = Rect::from_xywh(0.0, y - line_width / 2.0, width, line_width) {
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }
                y += cell;
            }
        }
        PatternKind::Stripes => {
            let stroke = Stroke {
                width: cell / 3.0,
                ..Stroke::default()
            };
            let mut pb = PathBuilder::new();
            // 45-degree stripes; start left of the canvas so the top-left
            // corner is covered.
            let mut offset = -height;
            while offset < width + height {
                pb.move_to(offset, 0.0);
                pb.line_to(offset + height, height);
                offset += cell;
            }
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        PatternKind::Checkerboard => {
            let mut row = 0u32;
            let mut y = 0.0;
            while y < height {
                let mut col = 0u32;
                let mut x = 0.0;
                while x < width {
                    if (row + col) % 2 == 0 {
                        if let Some(rect) = Rect::from_xywh(x, y, cell, cell) {
                            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                        }
                    }
                    col += 1;
                    x += cell;
                }
                row += 1;
                y += cell;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink_coverage(pixmap: &Pixmap) -> usize {
        pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    #[test]
    fn test_checkerboard_covers_half() {
        let mut pixmap = Pixmap::new(100, 100).expect("pixmap");
        render_pattern(
            &mut pixmap,
            PatternKind::Checkerboard,
            "#000000",
            1.0,
            10.0,
            1.0,
        );
        let covered = ink_coverage(&pixmap);
        // 10x10 cells, alternating: exactly half the area.
        assert_eq!(covered, 100 * 100 / 2);
    }

    #[test]
    fn test_dots_paint_something() {
        let mut pixmap = Pixmap::new(64, 64).expect("pixmap");
        render_pattern(&mut pixmap, PatternKind::Dots, "#336699", 1.0, 16.0, 1.0);
        assert!(ink_coverage(&pixmap) > 0);
    }

    #[test]
    fn test_transparent_ink_is_noop() {
        let mut pixmap = Pixmap::new(32, 32).expect("pixmap");
        render_pattern(
            &mut pixmap,
            PatternKind::Grid,
            "transparent",
            1.0,
            8.0,
            1.0,
        );
        assert_eq!(ink_coverage(&pixmap), 0);
    }

    #[test]
    fn test_zero_opacity_is_noop() {
        let mut pixmap = Pixmap::new(32, 32).expect("pixmap");
        render_pattern(&mut pixmap, PatternKind::Stripes, "#FF0000", 0.0, 8.0, 1.0);
        assert_eq!(ink_coverage(&pixmap), 0);
    }
}
