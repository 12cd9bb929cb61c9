//! # Carousel Render
//!
//! Rendering and export engine for carousel documents. Turns the declarative
//! model from `carousel-core` into pixel-accurate raster images and paginated
//! export documents, deterministically and without any live UI.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              SlideExporter                  │
//! │  resolve indices → per slide, in order:     │
//! ├─────────────────────────────────────────────┤
//! │  Slide Rasterizer                           │
//! │  - background (solid/gradient/image/pattern)│
//! │  - elements ascending by z-index            │
//! │    ├─ Text Layout Engine                    │
//! │    └─ Shape Path Builder                    │
//! ├─────────────────────────────────────────────┤
//! │  encode PNG/JPEG  │  assemble PDF pages     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Slides are processed strictly sequentially; the returned blob order and
//! the PDF page order always match the caller's requested order, regardless
//! of how long any per-slide image load takes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod font;
pub mod image_loader;
pub mod pattern;
pub mod raster;
pub mod shape;
pub mod text;

pub use error::{RenderError, RenderResult};
pub use export::{parse_page_range, ExportFormat, ExportOptions, SlideExporter, SlideImage};
pub use font::{load_system_font, FontMetrics, TextMeasure};
pub use image_loader::{FsImageLoader, ImageLoader, TextureData};
pub use text::{layout_text, Line};
