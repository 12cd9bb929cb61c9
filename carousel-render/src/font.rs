//! Font metrics for text layout.
//!
//! Layout only needs widths, so it goes through the [`TextMeasure`] trait;
//! the production implementation wraps an [`ab_glyph`] font at a pixel size,
//! and tests can substitute synthetic fixed-width metrics.

use std::sync::OnceLock;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};

/// Width queries against a font at a fixed size.
pub trait TextMeasure {
    /// Advance width of a single character.
    fn char_width(&self, c: char) -> f32;

    /// Bulk width of a string.
    fn text_width(&self, text: &str) -> f32;

    /// Width of a string under the layout engine's spacing rule: with
    /// non-zero letter spacing, per-character widths plus one spacing unit
    /// per gap; otherwise a single bulk measurement.
    fn measure(&self, text: &str, letter_spacing: f32) -> f32 {
        if letter_spacing == 0.0 {
            return self.text_width(text);
        }
        let mut width = 0.0;
        let mut chars = 0usize;
        for c in text.chars() {
            width += self.char_width(c);
            chars += 1;
        }
        if chars > 1 {
            #[allow(clippy::cast_precision_loss)]
            {
                width += letter_spacing * (chars - 1) as f32;
            }
        }
        width
    }
}

/// Real font metrics over an `ab_glyph` font at a pixel size.
#[derive(Clone)]
pub struct FontMetrics {
    font: FontArc,
    scale: PxScale,
}

impl FontMetrics {
    /// Create metrics for a font at the given pixel size.
    #[must_use]
    pub fn new(font: FontArc, px_size: f32) -> Self {
        Self {
            font,
            scale: PxScale::from(px_size),
        }
    }

    /// The underlying font.
    #[must_use]
    pub fn font(&self) -> &FontArc {
        &self.font
    }

    /// The pixel scale.
    #[must_use]
    pub fn scale(&self) -> PxScale {
        self.scale
    }

    /// Distance from the baseline to the top of the tallest glyph.
    #[must_use]
    pub fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }
}

impl TextMeasure for FontMetrics {
    fn char_width(&self, c: char) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        scaled.h_advance(scaled.glyph_id(c))
    }

    fn text_width(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        text.chars()
            .map(|c| scaled.h_advance(scaled.glyph_id(c)))
            .sum()
    }
}

/// Locate a usable system font, probing well-known paths once.
///
/// Returns `None` when no font can be found; callers fall back to skipping
/// text rendering rather than failing the export.
pub fn load_system_font() -> Option<&'static FontArc> {
    static FONT: OnceLock<Option<FontArc>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
            "C:\\Windows\\Fonts\\arial.ttf",
            "C:\\Windows\\Fonts\\segoeui.ttf",
        ];

        for path in &font_paths {
            if let Ok(data) = std::fs::read(path) {
                if let Ok(font) = FontArc::try_from_vec(data) {
                    return Some(font);
                }
            }
        }

        tracing::warn!("no system font found; text elements will be skipped");
        None
    })
    .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is `width` pixels wide.
    pub struct FixedWidth(pub f32);

    impl TextMeasure for FixedWidth {
        fn char_width(&self, _c: char) -> f32 {
            self.0
        }

        fn text_width(&self, text: &str) -> f32 {
            #[allow(clippy::cast_precision_loss)]
            {
                text.chars().count() as f32 * self.0
            }
        }
    }

    #[test]
    fn test_measure_without_spacing_is_bulk() {
        let m = FixedWidth(10.0);
        assert_eq!(m.measure("abcd", 0.0), 40.0);
    }

    #[test]
    fn test_measure_with_spacing_adds_per_gap() {
        let m = FixedWidth(10.0);
        // 4 chars, 3 gaps of 2px.
        assert_eq!(m.measure("abcd", 2.0), 46.0);
    }

    #[test]
    fn test_measure_single_char_has_no_gap() {
        let m = FixedWidth(10.0);
        assert_eq!(m.measure("a", 5.0), 10.0);
    }
}
