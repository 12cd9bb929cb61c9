//! Slide elements - the positioned visual primitives of a carousel.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gradient::GradientDirection;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A solid color or two-stop linear gradient fill.
///
/// Color strings may be any representation the color normalizer accepts
/// (hex, rgb, hsl, oklch, theme variables); they are normalized at render
/// time, never stored pre-resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fill {
    /// A single flat color.
    Solid {
        /// Color in any supported textual representation.
        color: String,
    },
    /// A two-color linear gradient.
    Gradient {
        /// Start color.
        from: String,
        /// End color.
        to: String,
        /// Symbolic gradient direction.
        direction: GradientDirection,
    },
}

impl Fill {
    /// A solid fill from a color string.
    #[must_use]
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid {
            color: color.into(),
        }
    }
}

/// Horizontal text alignment within the element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left (default).
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Case transform applied before layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// ALL UPPERCASE.
    Uppercase,
    /// all lowercase.
    Lowercase,
    /// First Letter Of Each Word.
    Capitalize,
}

/// Styling for a text element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family name.
    pub font_family: String,
    /// Font size in logical pixels.
    pub font_size: f32,
    /// Font weight (CSS scale, 100-900).
    pub font_weight: u16,
    /// Line height as a multiplier of the font size.
    pub line_height: f32,
    /// Extra spacing between characters, in logical pixels.
    pub letter_spacing: f32,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Text fill: solid color or gradient.
    pub fill: Fill,
    /// Optional case transform applied before layout.
    pub transform: Option<TextTransform>,
    /// Draw an underline beneath each laid-out line.
    pub underline: bool,
    /// Inner padding between the element box and the content box.
    pub padding: f32,
    /// Optional fill painted behind the text, inside the element box.
    pub background: Option<Fill>,
    /// Corner radius for the background fill.
    pub corner_radius: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 32.0,
            font_weight: 400,
            line_height: 1.3,
            letter_spacing: 0.0,
            align: TextAlign::Left,
            fill: Fill::solid("#000000"),
            transform: None,
            underline: false,
            padding: 0.0,
            background: None,
            corner_radius: 0.0,
        }
    }
}

/// Vector shape kinds the path builder knows how to construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rectangle,
    /// Rectangle with a uniform corner radius.
    RoundedRectangle,
    /// Ellipse inscribed in the element box.
    Ellipse,
    /// Triangle: apex at top-center, base at the bottom corners.
    Triangle,
    /// Diamond: vertices at the box's four edge midpoints.
    Diamond,
    /// Hexagon with vertical edges inset by a quarter of the width.
    Hexagon,
    /// Five-pointed star, 10 vertices alternating outer/inner radius.
    Star,
    /// Horizontal line through the vertical center; stroke only.
    Line,
}

/// Stroke applied to a shape outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    /// Stroke color in any supported representation.
    pub color: String,
    /// Stroke width in logical pixels; zero disables the stroke.
    pub width: f32,
    /// Optional dash pattern as a comma-separated numeric list.
    pub dash: Option<String>,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: "transparent".to_string(),
            width: 0.0,
            dash: None,
        }
    }
}

/// Bitmap drawn cover-fit inside a shape, clipped to its outline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeImage {
    /// Image source: a `data:` URI or a filesystem path.
    pub src: String,
}

/// The content variant of an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ElementKind {
    /// Wrapped, aligned text.
    Text {
        /// Text content; may contain explicit line breaks.
        content: String,
        /// Text styling.
        style: TextStyle,
    },

    /// A vector shape.
    Shape {
        /// Which shape to build.
        shape: ShapeKind,
        /// Interior fill.
        fill: Fill,
        /// Outline stroke.
        stroke: Stroke,
        /// Corner radius for rounded rectangles.
        corner_radius: f32,
        /// Optional cover-fit image clipped to the outline.
        image: Option<ShapeImage>,
    },

    /// A cover-fit bitmap.
    Image {
        /// Image source: a `data:` URI or a filesystem path.
        src: String,
    },
}

/// A positioned, sized visual primitive belonging to a slide.
///
/// Geometry is always in the document's logical pixel space; the export
/// scale is applied at render time, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// X position (logical pixels from the left edge).
    pub x: f32,
    /// Y position (logical pixels from the top edge).
    pub y: f32,
    /// Width in logical pixels.
    pub width: f32,
    /// Height in logical pixels.
    pub height: f32,
    /// Rotation about the element center, in degrees.
    pub rotation: f32,
    /// Opacity, 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
    /// Hidden elements are skipped entirely by the rasterizer.
    pub visible: bool,
    /// Compositing order; elements render in ascending z-index.
    pub z_index: i32,
    /// Content variant.
    pub kind: ElementKind,
}

impl Element {
    /// Create a new element with the given kind and default geometry.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::new(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            rotation: 0.0,
            opacity: 1.0,
            visible: true,
            z_index: 0,
            kind,
        }
    }

    /// Set position and size.
    #[must_use]
    pub fn with_frame(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_builder() {
        let element = Element::new(ElementKind::Shape {
            shape: ShapeKind::Star,
            fill: Fill::solid("#FFCC00"),
            stroke: Stroke::default(),
            corner_radius: 0.0,
            image: None,
        })
        .with_frame(10.0, 20.0, 200.0, 100.0)
        .with_rotation(45.0)
        .with_opacity(0.5)
        .with_z_index(3);

        assert_eq!(element.x, 10.0);
        assert_eq!(element.height, 100.0);
        assert_eq!(element.rotation, 45.0);
        assert_eq!(element.opacity, 0.5);
        assert_eq!(element.z_index, 3);
        assert!(element.visible);
    }

    #[test]
    fn test_opacity_clamped() {
        let element = Element::new(ElementKind::Image {
            src: "photo.png".to_string(),
        })
        .with_opacity(2.0);
        assert_eq!(element.opacity, 1.0);
    }

    #[test]
    fn test_element_json_round_trip() {
        let element = Element::new(ElementKind::Text {
            content: "Hello".to_string(),
            style: TextStyle::default(),
        });

        let json = serde_json::to_string(&element).expect("serialize");
        let back: Element = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.id, element.id);
        match back.kind {
            ElementKind::Text { content, .. } => assert_eq!(content, "Hello"),
            _ => panic!("wrong kind after round trip"),
        }
    }
}
