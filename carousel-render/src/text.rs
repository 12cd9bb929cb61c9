//! Text layout: case transform, wrapping, and alignment.
//!
//! Layout is pure and deterministic - it consumes width queries through the
//! [`TextMeasure`] seam and produces positioned lines; glyph rasterization
//! happens later in the slide rasterizer.

use carousel_core::{TextAlign, TextTransform};

use crate::font::TextMeasure;

/// One laid-out line: its drawn text and the X offset implied by alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Text drawn on this line, right-trimmed.
    pub text: String,
    /// X offset from the left edge of the content box.
    pub x: f32,
    /// Rendered width of the line.
    pub width: f32,
}

/// Wrap and align `content` within `box_width`.
///
/// Explicit line breaks are honored first, and empty paragraphs survive as
/// empty output lines so user-entered blank lines are preserved. Within a
/// paragraph, whitespace-preserving tokens accumulate greedily: when adding
/// the next token would overflow a non-empty line, the line is flushed
/// right-trimmed and the token starts the next line with its leading
/// whitespace stripped.
#[must_use]
pub fn layout_text(
    content: &str,
    box_width: f32,
    measure: &dyn TextMeasure,
    align: TextAlign,
    letter_spacing: f32,
    transform: Option<TextTransform>,
) -> Vec<Line> {
    let content = apply_transform(content, transform);

    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        wrap_paragraph(paragraph, box_width, measure, letter_spacing, &mut lines);
    }

    lines
        .into_iter()
        .map(|text| {
            let width = measure.measure(&text, letter_spacing);
            let slack = (box_width - width).max(0.0);
            let x = match align {
                TextAlign::Left => 0.0,
                TextAlign::Center => slack / 2.0,
                TextAlign::Right => slack,
            };
            Line { text, x, width }
        })
        .collect()
}

fn wrap_paragraph(
    paragraph: &str,
    box_width: f32,
    measure: &dyn TextMeasure,
    letter_spacing: f32,
    lines: &mut Vec<String>,
) {
    let mut current = String::new();

    for token in tokenize(paragraph) {
        let mut candidate = current.clone();
        candidate.push_str(token);

        if measure.measure(&candidate, letter_spacing) > box_width && !current.is_empty() {
            lines.push(current.trim_end().to_string());
            current = token.trim_start().to_string();
        } else {
            current = candidate;
        }
    }

    lines.push(current.trim_end().to_string());
}

/// Split into maximal runs of whitespace and non-whitespace, preserving both.
fn tokenize(paragraph: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut run_is_ws: Option<bool> = None;

    for (idx, c) in paragraph.char_indices() {
        let is_ws = c.is_whitespace();
        match run_is_ws {
            Some(prev) if prev == is_ws => {}
            Some(_) => {
                tokens.push(&paragraph[start..idx]);
                start = idx;
                run_is_ws = Some(is_ws);
            }
            None => run_is_ws = Some(is_ws),
        }
    }
    if start < paragraph.len() {
        tokens.push(&paragraph[start..]);
    }
    tokens
}

fn apply_transform(content: &str, transform: Option<TextTransform>) -> String {
    match transform {
        None => content.to_string(),
        Some(TextTransform::Uppercase) => content.to_uppercase(),
        Some(TextTransform::Lowercase) => content.to_lowercase(),
        Some(TextTransform::Capitalize) => {
            let mut out = String::with_capacity(content.len());
            let mut at_word_start = true;
            for c in content.chars() {
                if c.is_whitespace() {
                    at_word_start = true;
                    out.push(c);
                } else if at_word_start {
                    at_word_start = false;
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
            }
            out
        }
    }
}
