//! Image loading for backgrounds, shape fills, and image elements.
//!
//! Loading is the export pipeline's only external suspension point, so it
//! sits behind an async trait: the bundled [`FsImageLoader`] resolves `data:`
//! URIs and filesystem paths, and callers with other sources (HTTP, caches)
//! supply their own implementation.

use async_trait::async_trait;
use tiny_skia::Pixmap;

use crate::error::{RenderError, RenderResult};

/// A decoded bitmap in straight (non-premultiplied) RGBA.
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel.
    pub data: Vec<u8>,
}

/// Asynchronous image source resolution.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Load and decode the image at `src`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be resolved or decoded. The
    /// rasterizer catches these per image and falls back to non-image
    /// styling; a load failure never aborts an export.
    async fn load(&self, src: &str) -> RenderResult<TextureData>;
}

/// Loader for `data:` URIs and local filesystem paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

#[async_trait]
impl ImageLoader for FsImageLoader {
    async fn load(&self, src: &str) -> RenderResult<TextureData> {
        if src.starts_with("data:") {
            return decode_data_uri(src);
        }
        let bytes = tokio::fs::read(src)
            .await
            .map_err(|e| RenderError::Resource(format!("Failed to read {src}: {e}")))?;
        decode_bytes(&bytes)
    }
}

/// Decode raw image bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable image.
pub fn decode_bytes(data: &[u8]) -> RenderResult<TextureData> {
    let img = image::load_from_memory(data)
        .map_err(|e| RenderError::Resource(format!("Failed to decode image: {e}")))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureData {
        width,
        height,
        data: rgba.into_raw(),
    })
}

/// Decode a `data:` URI (base64 or percent-encoded payload).
///
/// # Errors
///
/// Returns an error if the URI is malformed or the payload cannot be
/// decoded.
pub fn decode_data_uri(uri: &str) -> RenderResult<TextureData> {
    let Some(uri_data) = uri.strip_prefix("data:") else {
        return Err(RenderError::Resource("Not a data URI".to_string()));
    };

    let comma_pos = uri_data
        .find(',')
        .ok_or_else(|| RenderError::Resource("Invalid data URI: missing comma".to_string()))?;

    let metadata = &uri_data[..comma_pos];
    let encoded = &uri_data[comma_pos + 1..];

    let bytes = if metadata.contains(";base64") {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| RenderError::Resource(format!("Failed to decode base64: {e}")))?
    } else {
        percent_decode(encoded)?
    };

    decode_bytes(&bytes)
}

fn percent_decode(input: &str) -> RenderResult<Vec<u8>> {
    let mut result = Vec::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    result.push(byte);
                    continue;
                }
            }
            return Err(RenderError::Resource("Invalid URL encoding".to_string()));
        }
        result.push(c as u8);
    }

    Ok(result)
}

/// Scale a texture to fill `target_w` x `target_h` while preserving aspect
/// ratio, cropping overflow equally on both sides, and convert it to a
/// premultiplied pixmap ready for compositing.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn cover_fit_pixmap(texture: &TextureData, target_w: u32, target_h: u32) -> Option<Pixmap> {
    if texture.width == 0 || texture.height == 0 || target_w == 0 || target_h == 0 {
        return None;
    }

    let scale_x = f64::from(target_w) / f64::from(texture.width);
    let scale_y = f64::from(target_h) / f64::from(texture.height);
    let scale = scale_x.max(scale_y);

    let scaled_w = ((f64::from(texture.width) * scale).ceil() as u32).max(target_w);
    let scaled_h = ((f64::from(texture.height) * scale).ceil() as u32).max(target_h);

    let img = image::RgbaImage::from_raw(texture.width, texture.height, texture.data.clone())?;
    let resized = image::imageops::resize(
        &img,
        scaled_w,
        scaled_h,
        image::imageops::FilterType::Lanczos3,
    );

    let off_x = (scaled_w - target_w) / 2;
    let off_y = (scaled_h - target_h) / 2;

    let mut pixmap = Pixmap::new(target_w, target_h)?;
    let pixels = pixmap.pixels_mut();
    for y in 0..target_h {
        for x in 0..target_w {
            let src = resized.get_pixel(x + off_x, y + off_y);
            let color = tiny_skia::ColorU8::from_rgba(src[0], src[1], src[2], src[3]);
            pixels[(y * target_w + x) as usize] = color.premultiply();
        }
    }

    Some(pixmap)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 red pixel PNG.
    const RED_DOT: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    #[tokio::test]
    async fn test_data_uri_load() {
        let uri = format!("data:image/png;base64,{RED_DOT}");
        let texture = FsImageLoader.load(&uri).await.expect("load data uri");
        assert_eq!(texture.width, 1);
        assert_eq!(texture.height, 1);
        assert_eq!(texture.data.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_file_errors() {
        let result = FsImageLoader.load("/definitely/not/here.png").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_data_uri() {
        assert!(decode_data_uri("not a data uri").is_err());
        assert!(decode_data_uri("data:image/png").is_err());
    }

    #[test]
    fn test_cover_fit_dimensions() {
        let texture = TextureData {
            width: 4,
            height: 2,
            data: vec![255; 4 * 2 * 4],
        };
        // Wide source into a tall target: must crop horizontally, not stretch.
        let pixmap = cover_fit_pixmap(&texture, 10, 20).expect("cover fit");
        assert_eq!(pixmap.width(), 10);
        assert_eq!(pixmap.height(), 20);
    }

    #[test]
    fn test_cover_fit_rejects_degenerate_input() {
        let texture = TextureData {
            width: 0,
            height: 0,
            data: Vec::new(),
        };
        assert!(cover_fit_pixmap(&texture, 10, 10).is_none());
    }
}
