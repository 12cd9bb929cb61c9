//! Slide export orchestration.
//!
//! Renders a [`Document`]'s slides to PNG, JPEG, or a multi-page PDF.
//! Slides are rendered strictly one at a time, in the order the selection
//! lists them, so output artifacts always line up with slide positions.
//! Asset failures degrade inside the rasterizer; encode and I/O failures
//! abort the whole export.

use std::path::{Path, PathBuf};

use carousel_core::Document;
use image::ImageEncoder;
use tiny_skia::Pixmap;

use crate::error::{RenderError, RenderResult};
use crate::image_loader::ImageLoader;
use crate::raster::render_slide;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// PNG image per slide.
    #[default]
    Png,
    /// JPEG image per slide, composited onto white.
    Jpg,
    /// Equivalent to [`ExportFormat::Jpg`].
    Jpeg,
    /// Combined multi-page PDF; per-slide blobs are still PNG.
    Pdf,
}

impl ExportFormat {
    /// File extension for per-slide artifacts, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png | Self::Pdf => "png",
            Self::Jpg | Self::Jpeg => "jpg",
        }
    }

    const fn is_jpeg(self) -> bool {
        matches!(self, Self::Jpg | Self::Jpeg)
    }
}

/// Configuration for a document export.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExportOptions {
    /// Output format.
    pub format: ExportFormat,
    /// Explicit 0-based slide subset, exported in the given order.
    /// `None` selects every slide in stored order. Out-of-range entries are
    /// skipped.
    pub slide_indices: Option<Vec<usize>>,
    /// Uniform resolution multiplier. Defaults to 2.0 for crisp output on
    /// high-density displays.
    pub scale: f32,
    /// Draw alignment guides over each slide.
    pub include_grid: bool,
    /// JPEG quality 1-100.
    pub quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            slide_indices: None,
            scale: 2.0,
            include_grid: false,
            quality: 95,
        }
    }
}

/// One exported slide artifact.
#[derive(Debug, Clone)]
pub struct SlideImage {
    /// Zero-based position of the slide in the document.
    pub slide_index: usize,
    /// Output width in device pixels.
    pub width: u32,
    /// Output height in device pixels.
    pub height: u32,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

/// Renders and encodes document slides.
pub struct SlideExporter {
    options: ExportOptions,
}

impl SlideExporter {
    /// Create an exporter with the given options.
    #[must_use]
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Create an exporter with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportOptions::default())
    }

    /// Export the selected slides of `document`, resolving images through
    /// `loader`.
    ///
    /// Returns one [`SlideImage`] per selected slide, in selection order.
    /// For the PDF format the per-slide blobs are PNG; the combined document
    /// comes from [`Self::export_pdf`].
    ///
    /// # Errors
    ///
    /// Returns an error if a surface cannot be allocated or encoding fails.
    /// A failed encode aborts the export; no partial result is returned.
    pub async fn export(
        &self,
        document: &Document,
        loader: &dyn ImageLoader,
    ) -> RenderResult<Vec<SlideImage>> {
        let selected = self.resolve_indices(document);
        let mut images = Vec::with_capacity(selected.len());

        for index in selected {
            let pixmap = self.render_one(document, index, loader).await?;
            let bytes = if self.options.format.is_jpeg() {
                encode_jpeg(&pixmap, self.options.quality)?
            } else {
                encode_png(&pixmap)?
            };
            tracing::debug!(
                slide = index,
                bytes = bytes.len(),
                format = ?self.options.format,
                "slide encoded"
            );
            images.push(SlideImage {
                slide_index: index,
                width: pixmap.width(),
                height: pixmap.height(),
                bytes,
            });
        }

        Ok(images)
    }

    /// Export the selected slides as one PDF, one full-page image per slide
    /// in selection order.
    ///
    /// # Errors
    ///
    /// Returns an error if no slides are selected, rendering fails, or the
    /// PDF cannot be assembled.
    #[allow(clippy::cast_precision_loss)]
    pub async fn export_pdf(
        &self,
        document: &Document,
        loader: &dyn ImageLoader,
    ) -> RenderResult<Vec<u8>> {
        let selected = self.resolve_indices(document);
        if selected.is_empty() {
            return Err(RenderError::Pdf(
                "No slides selected for PDF export".to_string(),
            ));
        }

        let (canvas_w, canvas_h) = document.canvas_size();
        // CSS reference pixel: 96 per inch. Orientation follows directly
        // from the canvas's width-vs-height.
        let page_w = printpdf::Mm(canvas_w as f32 / 96.0 * 25.4);
        let page_h = printpdf::Mm(canvas_h as f32 / 96.0 * 25.4);

        let (doc, first_page, first_layer) =
            printpdf::PdfDocument::new(&document.name, page_w, page_h, "Layer 1");

        for (position, index) in selected.iter().copied().enumerate() {
            let (page, layer) = if position == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(page_w, page_h, "Layer 1")
            };

            let pixmap = self.render_one(document, index, loader).await?;
            let png = encode_png(&pixmap)?;

            // printpdf bundles its own image crate version.
            let dynamic = printpdf::image_crate::load_from_memory(&png)
                .map_err(|e| RenderError::Pdf(format!("Failed to decode page image: {e}")))?;
            let pdf_image = printpdf::Image::from_dynamic_image(&dynamic);

            let transform = printpdf::ImageTransform {
                translate_x: Some(printpdf::Mm(0.0)),
                translate_y: Some(printpdf::Mm(0.0)),
                dpi: Some(96.0 * self.export_scale()),
                ..Default::default()
            };
            pdf_image.add_to_layer(doc.get_page(page).get_layer(layer), transform);
        }

        doc.save_to_bytes()
            .map_err(|e| RenderError::Pdf(format!("PDF save failed: {e}")))
    }

    /// Export and write artifacts into `out_dir`, returning the paths
    /// written in order.
    ///
    /// Raster formats produce `{name}-slide-{n}.{ext}` per slide, where `n`
    /// is the slide's original 1-based position in the document; PDF
    /// produces a single `{name}-carousel.pdf`. An empty selection writes
    /// nothing and is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if export fails or a file cannot be written.
    pub async fn download(
        &self,
        document: &Document,
        loader: &dyn ImageLoader,
        out_dir: &Path,
    ) -> RenderResult<Vec<PathBuf>> {
        if self.resolve_indices(document).is_empty() {
            return Ok(Vec::new());
        }

        let stem = file_stem(&document.name);
        let mut written = Vec::new();

        if self.options.format == ExportFormat::Pdf {
            let bytes = self.export_pdf(document, loader).await?;
            let path = out_dir.join(format!("{stem}-carousel.pdf"));
            write_artifact(&path, &bytes).await?;
            written.push(path);
            return Ok(written);
        }

        let images = self.export(document, loader).await?;
        let ext = self.options.format.extension();
        for image in images {
            let path = out_dir.join(format!("{stem}-slide-{}.{ext}", image.slide_index + 1));
            write_artifact(&path, &image.bytes).await?;
            written.push(path);
        }
        Ok(written)
    }

    /// The slide indices this export will render, in order.
    fn resolve_indices(&self, document: &Document) -> Vec<usize> {
        let total = document.slide_count();
        match &self.options.slide_indices {
            None => (0..total).collect(),
            Some(indices) => indices.iter().copied().filter(|i| *i < total).collect(),
        }
    }

    /// The export scale with degenerate values replaced by 1.0, so the
    /// surface size and the render transform always agree.
    fn export_scale(&self) -> f32 {
        let scale = self.options.scale;
        if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        }
    }

    async fn render_one(
        &self,
        document: &Document,
        index: usize,
        loader: &dyn ImageLoader,
    ) -> RenderResult<Pixmap> {
        let slide = document
            .slides
            .get(index)
            .ok_or_else(|| RenderError::Surface(format!("Slide {index} out of range")))?;

        let scale = self.export_scale();
        let (width, height) = device_size(document, scale);
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RenderError::Surface(format!("Cannot allocate {width}x{height}")))?;

        render_slide(
            &mut pixmap,
            slide,
            scale,
            self.options.include_grid,
            loader,
        )
        .await;

        Ok(pixmap)
    }
}

/// Parse a 1-based page selection like `"1,3-5"` into a de-duplicated,
/// ascending, zero-based index set.
///
/// Tokens are comma-separated, each a bare integer or an inclusive `a-b`
/// span. Malformed tokens, out-of-range pages, and inverted spans are
/// silently dropped; an empty result means nothing selected, which callers
/// treat as a no-op rather than an error.
#[must_use]
pub fn parse_page_range(range: &str, total: usize) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut push = |page: usize| {
        if page >= 1 && page <= total {
            indices.push(page - 1);
        }
    };

    for token in range.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some((start, end)) = token.split_once('-') {
            let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>())
            else {
                continue;
            };
            // Clip the span before iterating so work is bounded by the
            // slide count, not by whatever number the user typed.
            for page in start.max(1)..=end.min(total) {
                push(page);
            }
        } else if let Ok(page) = token.parse::<usize>() {
            push(page);
        }
    }

    indices.sort_unstable();
    indices.dedup();
    indices
}

/// Output surface size in device pixels. Expects an already-sanitized scale.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn device_size(document: &Document, scale: f32) -> (u32, u32) {
    let (w, h) = document.canvas_size();
    (
        ((w as f32 * scale).round() as u32).max(1),
        ((h as f32 * scale).round() as u32).max(1),
    )
}

fn encode_png(pixmap: &Pixmap) -> RenderResult<Vec<u8>> {
    pixmap
        .encode_png()
        .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
}

/// Composite onto white and encode as baseline JPEG.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn encode_jpeg(pixmap: &Pixmap, quality: u8) -> RenderResult<Vec<u8>> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        let alpha = f32::from(c.alpha()) / 255.0;
        let inv = 1.0 - alpha;
        rgb_data.push((f32::from(c.red()).mul_add(alpha, 255.0 * inv)) as u8);
        rgb_data.push((f32::from(c.green()).mul_add(alpha, 255.0 * inv)) as u8);
        rgb_data.push((f32::from(c.blue()).mul_add(alpha, 255.0 * inv)) as u8);
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder
        .write_image(&rgb_data, width, height, image::ColorType::Rgb8.into())
        .map_err(|e| RenderError::Encode(format!("JPEG encoding failed: {e}")))?;

    Ok(buf.into_inner())
}

/// Document name reduced to a safe file stem.
fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if stem.is_empty() {
        "carousel".to_string()
    } else {
        stem
    }
}

async fn write_artifact(path: &Path, bytes: &[u8]) -> RenderResult<()> {
    if let Err(e) = tokio::fs::write(path, bytes).await {
        tracing::error!(path = %path.display(), error = %e, "failed to write export");
        return Err(RenderError::Output(e));
    }
    tracing::info!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_range_mixed() {
        assert_eq!(parse_page_range("1,3-5,7", 10), vec![0, 2, 3, 4, 6]);
    }

    #[test]
    fn test_parse_page_range_sorts_ascending() {
        assert_eq!(parse_page_range("5,1,3", 5), vec![0, 2, 4]);
    }

    #[test]
    fn test_parse_page_range_drops_out_of_range() {
        assert_eq!(parse_page_range("0,99", 5), Vec::<usize>::new());
        assert_eq!(parse_page_range("2-9", 3), vec![1, 2]);
    }

    #[test]
    fn test_parse_page_range_inverted_span_is_empty() {
        assert_eq!(parse_page_range("2-1", 5), Vec::<usize>::new());
    }

    #[test]
    fn test_parse_page_range_clips_huge_spans() {
        // Span endpoints far beyond the slide count must not translate
        // into per-page work; the result is just the clipped range.
        assert_eq!(parse_page_range("1-4000000000", 5), vec![0, 1, 2, 3, 4]);
        assert_eq!(
            parse_page_range("1-18446744073709551615", 3),
            vec![0, 1, 2]
        );
        assert_eq!(
            parse_page_range("4000000000-4000000999", 5),
            Vec::<usize>::new()
        );
        assert_eq!(parse_page_range("0-2", 5), vec![0, 1]);
    }

    #[test]
    fn test_parse_page_range_dedupes() {
        assert_eq!(parse_page_range("2,2,2", 5), vec![1]);
    }

    #[test]
    fn test_parse_page_range_drops_garbage() {
        assert_eq!(parse_page_range("a,2,x-3", 5), vec![1]);
        assert_eq!(parse_page_range("", 5), Vec::<usize>::new());
    }

    #[test]
    fn test_default_options() {
        let options = ExportOptions::default();
        assert_eq!(options.format, ExportFormat::Png);
        assert!(options.slide_indices.is_none());
        assert!((options.scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(options.quality, 95);
        assert!(!options.include_grid);
    }

    #[test]
    fn test_jpg_and_jpeg_are_equivalent() {
        assert!(ExportFormat::Jpg.is_jpeg());
        assert!(ExportFormat::Jpeg.is_jpeg());
        assert_eq!(ExportFormat::Jpg.extension(), "jpg");
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_format_serde_accepts_both_jpeg_spellings() {
        let jpg: ExportFormat = serde_json::from_str("\"jpg\"").expect("jpg");
        let jpeg: ExportFormat = serde_json::from_str("\"jpeg\"").expect("jpeg");
        assert!(jpg.is_jpeg());
        assert!(jpeg.is_jpeg());
    }

    #[test]
    fn test_options_serde_round_trip() {
        let options = ExportOptions {
            format: ExportFormat::Jpeg,
            slide_indices: Some(vec![2, 0]),
            scale: 1.0,
            include_grid: true,
            quality: 80,
        };
        let json = serde_json::to_string(&options).expect("serialize");
        assert!(json.contains("\"jpeg\""));
        let back: ExportOptions = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.slide_indices, Some(vec![2, 0]));
        assert_eq!(back.quality, 80);
    }

    #[test]
    fn test_file_stem_sanitizes() {
        assert_eq!(file_stem("My Deck!"), "My-Deck-");
        assert_eq!(file_stem("  "), "carousel");
        assert_eq!(file_stem("launch_v2"), "launch_v2");
    }
}
