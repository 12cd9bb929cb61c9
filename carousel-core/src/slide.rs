//! Slides and their backgrounds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{Element, ElementId};
use crate::gradient::GradientDirection;

/// Unique identifier for a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideId(Uuid);

impl SlideId {
    /// Create a new unique slide ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SlideId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SlideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Procedural pattern kinds for pattern backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Regular grid of filled dots.
    Dots,
    /// Horizontal and vertical grid lines.
    Grid,
    /// Diagonal stripes.
    Stripes,
    /// Alternating filled cells.
    Checkerboard,
}

/// What fills the slide behind all elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    /// A single flat color.
    Solid {
        /// Color in any supported representation.
        color: String,
    },
    /// A two-color linear gradient across the whole canvas.
    Gradient {
        /// Start color.
        from: String,
        /// End color.
        to: String,
        /// Symbolic gradient direction.
        direction: GradientDirection,
    },
    /// A cover-fit bitmap.
    Image {
        /// Image source: a `data:` URI or a filesystem path.
        src: String,
        /// Opacity applied to the image, 0.0-1.0.
        opacity: f32,
        /// Optional color painted over the image.
        overlay: Option<String>,
    },
    /// A procedural tiled pattern.
    Pattern {
        /// Pattern kind.
        kind: PatternKind,
        /// Pattern ink color.
        color: String,
        /// Pattern opacity, 0.0-1.0.
        opacity: f32,
        /// Tile size in logical pixels.
        scale: f32,
    },
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid {
            color: "#FFFFFF".to_string(),
        }
    }
}

/// One page of the carousel: a background plus an ordered element list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slide {
    /// Unique identifier.
    pub id: SlideId,
    /// Display name shown in the editor.
    pub name: String,
    /// Position of this slide within the document, 0-based.
    pub order: usize,
    /// Background specification.
    pub background: Background,
    /// Elements on this slide. List order is authoring order; the
    /// rasterizer composites in ascending z-index instead.
    pub elements: Vec<Element>,
}

impl Slide {
    /// Create a new empty slide.
    #[must_use]
    pub fn new(name: impl Into<String>, order: usize) -> Self {
        Self {
            id: SlideId::new(),
            name: name.into(),
            order,
            background: Background::default(),
            elements: Vec::new(),
        }
    }

    /// Set the background.
    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Add an element, returning its ID.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Remove an element by ID, returning it if present.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let pos = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(pos))
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, TextStyle};

    #[test]
    fn test_slide_add_remove() {
        let mut slide = Slide::new("Intro", 0);
        assert!(slide.elements.is_empty());

        let id = slide.add_element(Element::new(ElementKind::Text {
            content: "Hi".to_string(),
            style: TextStyle::default(),
        }));
        assert_eq!(slide.elements.len(), 1);
        assert!(slide.get_element(id).is_some());

        let removed = slide.remove_element(id);
        assert!(removed.is_some());
        assert!(slide.elements.is_empty());
    }

    #[test]
    fn test_default_background_is_white() {
        let slide = Slide::new("Blank", 0);
        match slide.background {
            Background::Solid { ref color } => assert_eq!(color, "#FFFFFF"),
            _ => panic!("expected solid default background"),
        }
    }
}
