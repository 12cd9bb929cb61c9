//! Slide rasterization.
//!
//! Composites one slide onto a `tiny-skia` pixmap: background first, then
//! elements in ascending z-index, each under its own rotation and opacity,
//! then an optional debug grid. All geometry arrives in logical document
//! pixels; the export scale is folded into the device transform here.
//!
//! Visual-asset failures (missing images, bad colors) degrade to safe
//! fallbacks and never abort the slide.

use carousel_core::{
    color, gradient, normalize_color, Background, Element, ElementKind, Fill, ShapeKind, Slide,
    TextStyle,
};
use tiny_skia::{
    FillRule, GradientStop, LinearGradient, Mask, MaskType, Paint, Pixmap, PixmapPaint, Point,
    Rect, SpreadMode, Stroke, StrokeDash, Transform,
};

use crate::font::{load_system_font, FontMetrics};
use crate::image_loader::{cover_fit_pixmap, ImageLoader};
use crate::pattern::render_pattern;
use crate::shape::{build_shape_path, parse_dash};
use crate::text::layout_text;

/// Spacing of the debug grid, in logical pixels.
const GRID_INTERVAL: f32 = 50.0;
/// Alpha of the debug grid lines.
const GRID_ALPHA: f32 = 0.12;
/// Alpha of the background-image overlay color.
const OVERLAY_ALPHA: f32 = 0.4;
/// Gap between a line's baseline box and its underline, in logical pixels.
const UNDERLINE_GAP: f32 = 2.0;

/// Render one slide onto `pixmap` at the given uniform export scale.
///
/// The pixmap is expected to be `canvas_size * scale`; the caller allocates
/// it fresh per slide so no state leaks between slides.
pub async fn render_slide(
    pixmap: &mut Pixmap,
    slide: &Slide,
    scale: f32,
    show_grid: bool,
    loader: &dyn ImageLoader,
) {
    pixmap.fill(tiny_skia::Color::TRANSPARENT);

    draw_background(pixmap, &slide.background, scale, loader).await;

    let mut elements: Vec<&Element> = slide.elements.iter().collect();
    elements.sort_by_key(|e| e.z_index);

    for element in elements {
        if !element.visible || element.opacity <= 0.0 || element.width <= 0.0
            || element.height <= 0.0
        {
            continue;
        }
        draw_element(pixmap, element, scale, loader).await;
    }

    if show_grid {
        draw_grid(pixmap, scale);
    }
}

async fn draw_background(
    pixmap: &mut Pixmap,
    background: &Background,
    scale: f32,
    loader: &dyn ImageLoader,
) {
    #[allow(clippy::cast_precision_loss)]
    let (width, height) = (pixmap.width() as f32, pixmap.height() as f32);
    let full = carousel_core::Rect::new(0.0, 0.0, width, height);

    match background {
        Background::Solid { color: c } => {
            fill_full(pixmap, c, 1.0);
        }
        Background::Gradient {
            from,
            to,
            direction,
        } => {
            let fill = Fill::Gradient {
                from: from.clone(),
                to: to.clone(),
                direction: *direction,
            };
            if let Some(paint) = fill_paint(&fill, full, Transform::identity(), 1.0) {
                if let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) {
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }
            }
        }
        Background::Image {
            src,
            opacity,
            overlay,
        } => match loader.load(src).await {
            Ok(texture) => {
                if let Some(cover) = cover_fit_pixmap(&texture, pixmap.width(), pixmap.height()) {
                    let paint = PixmapPaint {
                        opacity: opacity.clamp(0.0, 1.0),
                        ..PixmapPaint::default()
                    };
                    pixmap.draw_pixmap(0, 0, cover.as_ref(), &paint, Transform::identity(), None);
                }
                if let Some(overlay) = overlay {
                    fill_full(pixmap, overlay, OVERLAY_ALPHA);
                }
            }
            Err(e) => {
                tracing::warn!(src, error = %e, "background image failed, using white");
                fill_full(pixmap, "#FFFFFF", 1.0);
            }
        },
        Background::Pattern {
            kind,
            color: ink,
            opacity,
            scale: tile,
        } => {
            fill_full(pixmap, "#FFFFFF", 1.0);
            render_pattern(pixmap, *kind, ink, *opacity, *tile, scale);
        }
    }
}

async fn draw_element(
    pixmap: &mut Pixmap,
    element: &Element,
    scale: f32,
    loader: &dyn ImageLoader,
) {
    match &element.kind {
        ElementKind::Shape {
            shape,
            fill,
            stroke,
            corner_radius,
            image,
        } => {
            draw_shape(
                pixmap,
                element,
                *shape,
                fill,
                stroke,
                *corner_radius,
                image.as_ref(),
                scale,
                loader,
            )
            .await;
        }
        ElementKind::Text { content, style } => {
            draw_text(pixmap, element, content, style, scale);
        }
        ElementKind::Image { src } => {
            draw_image_element(pixmap, element, src, scale, loader).await;
        }
    }
}

/// Device transform for an element: rotation about its center in logical
/// space, then the uniform export scale.
fn element_transform(element: &Element, scale: f32) -> Transform {
    let cx = element.x + element.width / 2.0;
    let cy = element.y + element.height / 2.0;
    Transform::from_rotate_at(element.rotation, cx, cy).post_scale(scale, scale)
}

#[allow(clippy::too_many_arguments)]
async fn draw_shape(
    pixmap: &mut Pixmap,
    element: &Element,
    kind: ShapeKind,
    fill: &Fill,
    stroke: &carousel_core::Stroke,
    corner_radius: f32,
    image: Option<&carousel_core::ShapeImage>,
    scale: f32,
    loader: &dyn ImageLoader,
) {
    let Some(logical_rect) =
        Rect::from_xywh(element.x, element.y, element.width, element.height)
    else {
        return;
    };
    let Some(path) = build_shape_path(kind, logical_rect, corner_radius) else {
        return;
    };
    let ts = element_transform(element, scale);
    let Some(device_path) = path.transform(ts) else {
        return;
    };

    let fill_box = carousel_core::Rect::new(element.x, element.y, element.width, element.height);

    // A line is stroke-only, never filled.
    if kind != ShapeKind::Line {
        if let Some(paint) = fill_paint(fill, fill_box, ts, element.opacity) {
            pixmap.fill_path(
                &device_path,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    if stroke.width > 0.0 {
        let normalized = normalize_color(Some(&stroke.color));
        if normalized != color::TRANSPARENT {
            if let Some(paint) = solid_paint(&normalized, element.opacity) {
                let dash = stroke
                    .dash
                    .as_deref()
                    .and_then(parse_dash)
                    .map(|d| d.into_iter().map(|v| v * scale).collect::<Vec<f32>>())
                    .and_then(|d| StrokeDash::new(d, 0.0));
                let sk_stroke = Stroke {
                    width: stroke.width * scale,
                    dash,
                    ..Stroke::default()
                };
                pixmap.stroke_path(
                    &device_path,
                    &paint,
                    &sk_stroke,
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    if let Some(shape_image) = image {
        match loader.load(&shape_image.src).await {
            Ok(texture) => {
                draw_clipped_image(pixmap, element, kind, &device_path, &texture, scale);
            }
            Err(e) => {
                // The shape keeps its plain fill.
                tracing::warn!(src = shape_image.src, error = %e, "shape image failed");
            }
        }
    }
}

/// Draw a cover-fit image inside a shape, clipped to its outline where the
/// outline is exact (rectangles, rounded rectangles, ellipses) and to the
/// bounding box otherwise.
fn draw_clipped_image(
    pixmap: &mut Pixmap,
    element: &Element,
    kind: ShapeKind,
    device_path: &tiny_skia::Path,
    texture: &crate::image_loader::TextureData,
    scale: f32,
) {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (dev_w, dev_h) = (
        (element.width * scale).round().max(1.0) as u32,
        (element.height * scale).round().max(1.0) as u32,
    );
    let Some(cover) = cover_fit_pixmap(texture, dev_w, dev_h) else {
        return;
    };

    let clip_exact = matches!(
        kind,
        ShapeKind::Rectangle | ShapeKind::RoundedRectangle | ShapeKind::Ellipse
    );
    let mask = if clip_exact {
        path_mask(pixmap.width(), pixmap.height(), device_path)
    } else {
        let bbox_path =
            Rect::from_xywh(element.x, element.y, element.width, element.height).and_then(|b| {
                let mut pb = tiny_skia::PathBuilder::new();
                pb.push_rect(b);
                pb.finish()
                    .and_then(|p| p.transform(element_transform(element, scale)))
            });
        bbox_path.and_then(|p| path_mask(pixmap.width(), pixmap.height(), &p))
    };
    let Some(mask) = mask else { return };

    let paint = PixmapPaint {
        opacity: element.opacity,
        quality: tiny_skia::FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    let ts = element_transform(element, scale).pre_translate(element.x, element.y);
    // The cover pixmap is already device-scaled; undo the scale baked into
    // the element transform so it is not applied twice.
    let ts = ts.pre_scale(1.0 / scale, 1.0 / scale);
    pixmap.draw_pixmap(0, 0, cover.as_ref(), &paint, ts, Some(&mask));
}

/// Rasterize a path into a fresh alpha mask.
fn path_mask(width: u32, height: u32, path: &tiny_skia::Path) -> Option<Mask> {
    let mut mask = Mask::new(width, height)?;
    mask.fill_path(path, FillRule::Winding, true, Transform::identity());
    Some(mask)
}

fn draw_text(
    pixmap: &mut Pixmap,
    element: &Element,
    content: &str,
    style: &TextStyle,
    scale: f32,
) {
    let Some(font) = load_system_font() else {
        return;
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (dev_w, dev_h) = (
        (element.width * scale).round().max(1.0) as u32,
        (element.height * scale).round().max(1.0) as u32,
    );
    let Some(mut local) = Pixmap::new(dev_w, dev_h) else {
        return;
    };

    #[allow(clippy::cast_precision_loss)]
    let local_box = carousel_core::Rect::new(0.0, 0.0, dev_w as f32, dev_h as f32);

    // Background fill behind the text, with optional rounded corners.
    if let Some(background) = &style.background {
        if let Some(paint) = fill_paint(background, local_box, Transform::identity(), 1.0) {
            if let Some(rect) =
                Rect::from_xywh(local_box.x, local_box.y, local_box.width, local_box.height)
            {
                if style.corner_radius > 0.0 {
                    if let Some(path) = build_shape_path(
                        carousel_core::ShapeKind::RoundedRectangle,
                        rect,
                        style.corner_radius * scale,
                    ) {
                        local.fill_path(
                            &path,
                            &paint,
                            FillRule::Winding,
                            Transform::identity(),
                            None,
                        );
                    }
                } else {
                    local.fill_rect(rect, &paint, Transform::identity(), None);
                }
            }
        }
    }

    let padding = style.padding * scale;
    let font_size = style.font_size * scale;
    let letter_spacing = style.letter_spacing * scale;
    let content_width = (local_box.width - padding * 2.0).max(0.0);

    let metrics = FontMetrics::new(font.clone(), font_size);
    let lines = layout_text(
        content,
        content_width,
        &metrics,
        style.align,
        letter_spacing,
        style.transform,
    );

    // Glyph coverage (plus underlines) accumulates into an alpha mask, then
    // the fill paints through it in one pass; solid and gradient text share
    // the same path.
    let Some(mut coverage) = Pixmap::new(dev_w, dev_h) else {
        return;
    };
    let line_advance = font_size * style.line_height;
    let ascent = metrics.ascent();

    for (idx, line) in lines.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let line_top = padding + line_advance * idx as f32;
        let baseline = line_top + ascent;
        draw_line_coverage(
            &mut coverage,
            &metrics,
            &line.text,
            padding + line.x,
            baseline,
            letter_spacing,
        );

        if style.underline && !line.text.is_empty() {
            let underline_y = line_top + font_size + UNDERLINE_GAP * scale;
            let thickness = (font_size / 16.0).max(1.0);
            if let Some(rect) =
                Rect::from_xywh(padding + line.x, underline_y, line.width, thickness)
            {
                let mut white = Paint::default();
                white.set_color_rgba8(255, 255, 255, 255);
                coverage.fill_rect(rect, &white, Transform::identity(), None);
            }
        }
    }

    let mask = Mask::from_pixmap(coverage.as_ref(), MaskType::Alpha);
    if let Some(paint) = fill_paint(&style.fill, local_box, Transform::identity(), 1.0) {
        if let Some(rect) =
            Rect::from_xywh(local_box.x, local_box.y, local_box.width, local_box.height)
        {
            local.fill_rect(rect, &paint, Transform::identity(), Some(&mask));
        }
    }

    let paint = PixmapPaint {
        opacity: element.opacity,
        quality: tiny_skia::FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    let ts = element_transform(element, scale)
        .pre_translate(element.x, element.y)
        .pre_scale(1.0 / scale, 1.0 / scale);
    pixmap.draw_pixmap(0, 0, local.as_ref(), &paint, ts, None);
}

/// Blend glyph coverage for one line into the coverage pixmap as white ink.
fn draw_line_coverage(
    coverage: &mut Pixmap,
    metrics: &FontMetrics,
    text: &str,
    start_x: f32,
    baseline: f32,
    letter_spacing: f32,
) {
    use ab_glyph::{Font, ScaleFont};

    let font = metrics.font();
    let scaled = font.as_scaled(metrics.scale());
    let width = coverage.width();
    let height = coverage.height();

    let mut cursor_x = start_x;
    for (idx, ch) in text.chars().enumerate() {
        if idx > 0 {
            cursor_x += letter_spacing;
        }
        let glyph_id = scaled.glyph_id(ch);
        let glyph =
            glyph_id.with_scale_and_position(metrics.scale(), ab_glyph::point(cursor_x, baseline));

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let pixels = coverage.pixels_mut();
            outlined.draw(|px, py, cov| {
                #[allow(clippy::cast_possible_truncation)]
                let abs_x = bounds.min.x as i32 + px as i32;
                #[allow(clippy::cast_possible_truncation)]
                let abs_y = bounds.min.y as i32 + py as i32;
                if abs_x < 0 || abs_y < 0 {
                    return;
                }
                #[allow(clippy::cast_sign_loss)]
                let (abs_x, abs_y) = (abs_x as u32, abs_y as u32);
                if abs_x >= width || abs_y >= height {
                    return;
                }
                let idx = (abs_y * width + abs_x) as usize;
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let a = (cov.clamp(0.0, 1.0) * 255.0) as u8;
                let old = pixels[idx].alpha();
                // Saturating coverage accumulation for overlapping glyphs.
                let merged = old.max(a);
                pixels[idx] = tiny_skia::ColorU8::from_rgba(255, 255, 255, merged).premultiply();
            });
        }

        cursor_x += scaled.h_advance(glyph_id);
    }
}

async fn draw_image_element(
    pixmap: &mut Pixmap,
    element: &Element,
    src: &str,
    scale: f32,
    loader: &dyn ImageLoader,
) {
    let texture = match loader.load(src).await {
        Ok(texture) => texture,
        Err(e) => {
            tracing::warn!(src, error = %e, "image element failed, skipping");
            return;
        }
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (dev_w, dev_h) = (
        (element.width * scale).round().max(1.0) as u32,
        (element.height * scale).round().max(1.0) as u32,
    );
    let Some(cover) = cover_fit_pixmap(&texture, dev_w, dev_h) else {
        return;
    };

    let paint = PixmapPaint {
        opacity: element.opacity,
        quality: tiny_skia::FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };
    let ts = element_transform(element, scale)
        .pre_translate(element.x, element.y)
        .pre_scale(1.0 / scale, 1.0 / scale);
    pixmap.draw_pixmap(0, 0, cover.as_ref(), &paint, ts, None);
}

/// Translucent guide lines over the whole canvas, drawn after all elements.
fn draw_grid(pixmap: &mut Pixmap, scale: f32) {
    #[allow(clippy::cast_precision_loss)]
    let (width, height) = (pixmap.width() as f32, pixmap.height() as f32);
    let step = GRID_INTERVAL * scale;
    let line_width = scale.max(1.0);

    let mut paint = Paint::default();
    paint.set_color(
        tiny_skia::Color::from_rgba(0.0, 0.0, 0.0, GRID_ALPHA)
            .unwrap_or(tiny_skia::Color::BLACK),
    );

    let mut x = step;
    while x < width {
        if let Some(rect) = Rect::from_xywh(x - line_width / 2.0, 0.0, line_width, height) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
        x += step;
    }
    let mut y = step;
    while y < height {
        if let Some(rect) = Rect::from_xywh(0.0, y - line_width / 2.0, width, line_width) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
        y += step;
    }
}

/// Fill the whole surface with a normalized color at the given alpha.
fn fill_full(pixmap: &mut Pixmap, color_str: &str, alpha: f32) {
    let normalized = normalize_color(Some(color_str));
    if normalized == color::TRANSPARENT {
        return;
    }
    #[allow(clippy::cast_precision_loss)]
    let (width, height) = (pixmap.width() as f32, pixmap.height() as f32);
    if let Some(paint) = solid_paint(&normalized, alpha) {
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, width, height) {
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }
}

/// Opaque paint from a normalized hex color, scaled by `alpha`.
fn solid_paint(hex: &str, alpha: f32) -> Option<Paint<'static>> {
    let (r, g, b) = color::hex_to_rgb(hex);
    let color = tiny_skia::Color::from_rgba(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        alpha.clamp(0.0, 1.0),
    )?;
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    Some(paint)
}

/// Paint for a [`Fill`]: a flat color, or a linear gradient resolved over
/// `rect` and mapped through `ts` so it follows the element's transform.
fn fill_paint(
    fill: &Fill,
    rect: carousel_core::Rect,
    ts: Transform,
    opacity: f32,
) -> Option<Paint<'static>> {
    match fill {
        Fill::Solid { color: c } => {
            let normalized = normalize_color(Some(c));
            if normalized == color::TRANSPARENT {
                return None;
            }
            solid_paint(&normalized, opacity)
        }
        Fill::Gradient {
            from,
            to,
            direction,
        } => {
            let line = gradient::resolve(*direction, rect);
            let from_hex = normalize_color(Some(from));
            let to_hex = normalize_color(Some(to));
            let (fr, fg, fb) = color::hex_to_rgb(&from_hex);
            let (tr, tg, tb) = color::hex_to_rgb(&to_hex);
            let alpha = opacity.clamp(0.0, 1.0);

            let stops = vec![
                GradientStop::new(
                    0.0,
                    tiny_skia::Color::from_rgba(
                        f32::from(fr) / 255.0,
                        f32::from(fg) / 255.0,
                        f32::from(fb) / 255.0,
                        alpha,
                    )?,
                ),
                GradientStop::new(
                    1.0,
                    tiny_skia::Color::from_rgba(
                        f32::from(tr) / 255.0,
                        f32::from(tg) / 255.0,
                        f32::from(tb) / 255.0,
                        alpha,
                    )?,
                ),
            ];

            let shader = LinearGradient::new(
                Point::from_xy(line.start.x, line.start.y),
                Point::from_xy(line.end.x, line.end.y),
                stops,
                SpreadMode::Pad,
                ts,
            )?;
            let paint = Paint {
                shader,
                anti_alias: true,
                ..Paint::default()
            };
            Some(paint)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_core::{GradientDirection, Stroke as CoreStroke};
    use tiny_skia::Shader;

    fn shader_is_gradient(shader: &Shader<'_>) -> bool {
        matches!(shader, Shader::LinearGradient(_))
    }

    #[test]
    fn test_solid_paint_from_hex() {
        let paint = solid_paint("#FF0000", 1.0).expect("paint");
        assert!(matches!(paint.shader, Shader::SolidColor(_)));
    }

    #[test]
    fn test_fill_paint_transparent_is_none() {
        let fill = Fill::solid("transparent");
        let rect = carousel_core::Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(fill_paint(&fill, rect, Transform::identity(), 1.0).is_none());
    }

    #[test]
    fn test_fill_paint_gradient_builds_shader() {
        let fill = Fill::Gradient {
            from: "#FF0000".to_string(),
            to: "#0000FF".to_string(),
            direction: GradientDirection::ToRight,
        };
        let rect = carousel_core::Rect::new(0.0, 0.0, 100.0, 50.0);
        let paint = fill_paint(&fill, rect, Transform::identity(), 1.0).expect("paint");
        assert!(shader_is_gradient(&paint.shader));
    }

    #[tokio::test]
    async fn test_solid_background_fills_every_pixel() {
        let slide = Slide::new("s", 0).with_background(Background::Solid {
            color: "#FF0000".to_string(),
        });
        let mut pixmap = Pixmap::new(16, 16).expect("pixmap");
        render_slide(&mut pixmap, &slide, 1.0, false, &crate::FsImageLoader).await;

        for px in pixmap.pixels() {
            assert_eq!(px.red(), 255);
            assert_eq!(px.green(), 0);
            assert_eq!(px.alpha(), 255);
        }
    }

    #[tokio::test]
    async fn test_z_order_beats_list_order() {
        let mut slide = Slide::new("s", 0).with_background(Background::Solid {
            color: "#FFFFFF".to_string(),
        });
        // Red square listed first but z=1: it must paint on top of blue.
        let red = Element::new(ElementKind::Shape {
            shape: ShapeKind::Rectangle,
            fill: Fill::solid("#FF0000"),
            stroke: CoreStroke::default(),
            corner_radius: 0.0,
            image: None,
        })
        .with_frame(0.0, 0.0, 16.0, 16.0)
        .with_z_index(1);
        let blue = Element::new(ElementKind::Shape {
            shape: ShapeKind::Rectangle,
            fill: Fill::solid("#0000FF"),
            stroke: CoreStroke::default(),
            corner_radius: 0.0,
            image: None,
        })
        .with_frame(0.0, 0.0, 16.0, 16.0)
        .with_z_index(2);
        slide.add_element(red);
        slide.add_element(blue);

        let mut pixmap = Pixmap::new(16, 16).expect("pixmap");
        render_slide(&mut pixmap, &slide, 1.0, false, &crate::FsImageLoader).await;

        let center = pixmap.pixels()[8 * 16 + 8];
        assert_eq!(center.blue(), 255);
        assert_eq!(center.red(), 0);
    }

    #[tokio::test]
    async fn test_invisible_elements_skipped() {
        let mut slide = Slide::new("s", 0).with_background(Background::Solid {
            color: "#FFFFFF".to_string(),
        });
        let mut hidden = Element::new(ElementKind::Shape {
            shape: ShapeKind::Rectangle,
            fill: Fill::solid("#FF0000"),
            stroke: CoreStroke::default(),
            corner_radius: 0.0,
            image: None,
        })
        .with_frame(0.0, 0.0, 16.0, 16.0);
        hidden.visible = false;
        slide.add_element(hidden);

        let mut pixmap = Pixmap::new(16, 16).expect("pixmap");
        render_slide(&mut pixmap, &slide, 1.0, false, &crate::FsImageLoader).await;

        let center = pixmap.pixels()[8 * 16 + 8];
        assert_eq!(center.red(), 255);
        assert_eq!(center.green(), 255);
    }

    #[tokio::test]
    async fn test_missing_background_image_falls_back_to_white() {
        let slide = Slide::new("s", 0).with_background(Background::Image {
            src: "/no/such/image.png".to_string(),
            opacity: 1.0,
            overlay: None,
        });
        let mut pixmap = Pixmap::new(8, 8).expect("pixmap");
        render_slide(&mut pixmap, &slide, 1.0, false, &crate::FsImageLoader).await;

        let px = pixmap.pixels()[0];
        assert_eq!((px.red(), px.green(), px.blue()), (255, 255, 255));
    }

    #[tokio::test]
    async fn test_grid_draws_guides() {
        let plain = {
            let slide = Slide::new("s", 0).with_background(Background::Solid {
                color: "#FFFFFF".to_string(),
            });
            let mut pixmap = Pixmap::new(128, 128).expect("pixmap");
            render_slide(&mut pixmap, &slide, 1.0, false, &crate::FsImageLoader).await;
            pixmap.data().to_vec()
        };
        let gridded = {
            let slide = Slide::new("s", 0).with_background(Background::Solid {
                color: "#FFFFFF".to_string(),
            });
            let mut pixmap = Pixmap::new(128, 128).expect("pixmap");
            render_slide(&mut pixmap, &slide, 1.0, true, &crate::FsImageLoader).await;
            pixmap.data().to_vec()
        };
        assert_ne!(plain, gridded);
    }
}
