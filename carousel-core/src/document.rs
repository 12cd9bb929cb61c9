//! The carousel document: a named, sized, ordered list of slides.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CarouselError, CarouselResult};
use crate::slide::{Slide, SlideId};

/// Unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Create a new unique document ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named logical canvas sizes.
///
/// All geometry in the document is expressed against these logical pixel
/// dimensions; high-resolution output is produced by the export scale, not
/// by changing the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanvasPreset {
    /// 1080 x 1080 square (default).
    #[default]
    Square,
    /// 1080 x 1350 portrait.
    Portrait,
    /// 1080 x 1920 story.
    Story,
    /// 1920 x 1080 landscape.
    Landscape,
}

impl CanvasPreset {
    /// Logical canvas dimensions in pixels (width, height).
    #[must_use]
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Square => (1080, 1080),
            Self::Portrait => (1080, 1350),
            Self::Story => (1080, 1920),
            Self::Landscape => (1920, 1080),
        }
    }
}

/// A carousel document: template metadata plus ordered slides.
///
/// The document is produced and mutated by the editor layer; the export
/// engine only reads it for the duration of one export call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,
    /// Template name; used for export file naming.
    pub name: String,
    /// Logical canvas size preset.
    pub preset: CanvasPreset,
    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Document {
    /// Create a new empty document.
    #[must_use]
    pub fn new(name: impl Into<String>, preset: CanvasPreset) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            preset,
            slides: Vec::new(),
        }
    }

    /// Logical canvas dimensions in pixels (width, height).
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        self.preset.dimensions()
    }

    /// Append a slide, assigning it the next order index.
    pub fn add_slide(&mut self, mut slide: Slide) -> SlideId {
        slide.order = self.slides.len();
        let id = slide.id;
        self.slides.push(slide);
        id
    }

    /// Remove a slide by ID, re-indexing the remainder.
    ///
    /// # Errors
    ///
    /// Returns an error if the slide is not found.
    pub fn remove_slide(&mut self, id: SlideId) -> CarouselResult<Slide> {
        let pos = self
            .slides
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CarouselError::SlideNotFound(id.to_string()))?;
        let removed = self.slides.remove(pos);
        for (idx, slide) in self.slides.iter_mut().enumerate() {
            slide.order = idx;
        }
        Ok(removed)
    }

    /// Get a slide by ID.
    #[must_use]
    pub fn get_slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    /// Number of slides.
    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CarouselResult<String> {
        serde_json::to_string(self).map_err(CarouselError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CarouselResult<Self> {
        serde_json::from_str(json).map_err(CarouselError::Serialization)
    }
}
