//! # Carousel Core
//!
//! Document model for the carousel rendering and export engine.
//!
//! A carousel is an ordered list of slides; each slide carries a background
//! and an ordered list of positioned elements (text, shapes, images). This
//! crate holds the declarative model plus the two pure styling components
//! the renderer leans on:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               carousel-core                 │
//! ├─────────────────────────────────────────────┤
//! │  Document        │  Color Normalizer        │
//! │  - Slides        │  - hex/rgb/hsl/oklch     │
//! │  - Elements      │  - safe black fallback   │
//! │  - Backgrounds   │                          │
//! ├──────────────────┼──────────────────────────┤
//! │  Canvas presets  │  Gradient Resolver       │
//! │  - named sizes   │  - 8 directions          │
//! │                  │  - box-covering line     │
//! └──────────────────┴──────────────────────────┘
//! ```
//!
//! Everything is serde-serializable so the surrounding editor layer can
//! persist documents as JSON. The model is treated as read-only for the
//! duration of an export call; the renderer never writes back to it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod document;
pub mod element;
pub mod error;
pub mod gradient;
pub mod slide;

pub use color::normalize_color;
pub use document::{CanvasPreset, Document, DocumentId};
pub use element::{
    Element, ElementId, ElementKind, Fill, ShapeImage, ShapeKind, Stroke, TextAlign, TextStyle,
    TextTransform,
};
pub use error::{CarouselError, CarouselResult};
pub use gradient::{GradientDirection, GradientLine, Point, Rect};
pub use slide::{Background, PatternKind, Slide, SlideId};

/// Carousel core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
