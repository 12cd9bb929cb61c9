//! Color normalization.
//!
//! Converts any supported color representation (hex, rgb/rgba, hsl/hsla,
//! oklch, theme-variable references) to a canonical 6-digit hex string.
//! Parsing never fails rendering: anything unrecognized normalizes to black.

use std::sync::OnceLock;

use regex::Regex;

/// Sentinel for a fully transparent color.
pub const TRANSPARENT: &str = "transparent";

/// Fallback for unparseable or externally-bound colors.
const FALLBACK: &str = "#000000";

fn oklch_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Raw or percentage components, optional `deg` on hue, optional alpha.
        Regex::new(
            r"(?i)oklch\(\s*([0-9.]+)(%?)\s+([0-9.]+)(%?)\s+([0-9.]+)(?:deg)?\s*(?:/\s*[0-9.]+%?\s*)?\)",
        )
        .expect("static regex")
    })
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?[0-9.]+").expect("static regex"))
}

/// Normalize a color string to 6-digit hex.
///
/// `None`, the empty string, and `"transparent"` normalize to the
/// [`TRANSPARENT`] sentinel. Theme-variable references (`var(...)`) cannot be
/// resolved outside the editor and fall back to black, as does any string
/// that fails to parse.
#[must_use]
pub fn normalize_color(color: Option<&str>) -> String {
    let Some(raw) = color else {
        return TRANSPARENT.to_string();
    };
    let raw = raw.trim();

    if raw.is_empty() || raw.eq_ignore_ascii_case(TRANSPARENT) {
        return TRANSPARENT.to_string();
    }
    if raw.starts_with('#') {
        return normalize_hex(raw);
    }
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("rgb") {
        return parse_rgb(raw);
    }
    if lower.starts_with("hsl") {
        return parse_hsl(raw);
    }
    if lower.starts_with("oklch") {
        return parse_oklch(raw);
    }
    if lower.starts_with("var(") {
        // External style bindings are unresolvable here.
        return FALLBACK.to_string();
    }

    tracing::warn!(color = raw, "unrecognized color, falling back to black");
    FALLBACK.to_string()
}

/// Parse a normalized hex color into RGB bytes.
///
/// Expects the `#RRGGBB` form produced by [`normalize_color`]; anything else
/// yields black.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return (0, 0, 0);
    }
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    (r, g, b)
}

fn normalize_hex(raw: &str) -> String {
    let digits = &raw[1..];
    match digits.len() {
        6 if digits.chars().all(|c| c.is_ascii_hexdigit()) => raw.to_ascii_uppercase(),
        // Expand #RGB shorthand.
        3 if digits.chars().all(|c| c.is_ascii_hexdigit()) => {
            let mut out = String::with_capacity(7);
            out.push('#');
            for c in digits.chars() {
                out.push(c.to_ascii_uppercase());
                out.push(c.to_ascii_uppercase());
            }
            out
        }
        // Drop an alpha channel if present.
        8 if digits.chars().all(|c| c.is_ascii_hexdigit()) => {
            format!("#{}", digits[0..6].to_ascii_uppercase())
        }
        _ => FALLBACK.to_string(),
    }
}

fn parse_rgb(raw: &str) -> String {
    let nums: Vec<f32> = number_re()
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse::<f32>().ok())
        .collect();
    if nums.len() < 3 {
        return FALLBACK.to_string();
    }
    let to_byte = |v: f32| -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            v.clamp(0.0, 255.0).round() as u8
        }
    };
    rgb_hex(to_byte(nums[0]), to_byte(nums[1]), to_byte(nums[2]))
}

fn parse_hsl(raw: &str) -> String {
    let nums: Vec<f32> = number_re()
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse::<f32>().ok())
        .collect();
    if nums.len() < 3 {
        return FALLBACK.to_string();
    }
    let h = (nums[0].rem_euclid(360.0)) / 360.0;
    let s = (nums[1] / 100.0).clamp(0.0, 1.0);
    let l = (nums[2] / 100.0).clamp(0.0, 1.0);

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };
    rgb_hex(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
}

/// The standard piecewise hue-to-channel helper for HSL conversion.
fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Approximate OKLCH conversion: L/C/h to OKLab, a fixed linear mix into the
/// LMS cone space, a fixed matrix into linear sRGB, then the sRGB transfer
/// encode. Accuracy is within a couple of code values per channel, which is
/// the tolerance the export pipeline accepts.
fn parse_oklch(raw: &str) -> String {
    let Some(caps) = oklch_re().captures(raw) else {
        return FALLBACK.to_string();
    };
    let Some(l_raw) = caps[1].parse::<f32>().ok() else {
        return FALLBACK.to_string();
    };
    let Some(c_raw) = caps[3].parse::<f32>().ok() else {
        return FALLBACK.to_string();
    };
    let Some(h_deg) = caps[5].parse::<f32>().ok() else {
        return FALLBACK.to_string();
    };

    // Percentages: L 100% = 1.0, C 100% = 0.4.
    let l = if caps[2].is_empty() { l_raw } else { l_raw / 100.0 };
    let c = if caps[4].is_empty() { c_raw } else { c_raw / 100.0 * 0.4 };

    let h = h_deg.to_radians();
    let a = c * h.cos();
    let b = c * h.sin();

    let l_ = l + 0.396_337_78 * a + 0.215_803_76 * b;
    let m_ = l - 0.105_561_346 * a - 0.063_854_17 * b;
    let s_ = l - 0.089_484_18 * a - 1.291_485_5 * b;

    let l3 = l_ * l_ * l_;
    let m3 = m_ * m_ * m_;
    let s3 = s_ * s_ * s_;

    let lin_r = 4.076_741_7 * l3 - 3.307_711_6 * m3 + 0.230_969_94 * s3;
    let lin_g = -1.268_438 * l3 + 2.609_757_4 * m3 - 0.341_319_38 * s3;
    let lin_b = -0.004_196_086_3 * l3 - 0.703_418_6 * m3 + 1.707_614_7 * s3;

    rgb_hex(
        unit_to_byte(srgb_encode(lin_r.clamp(0.0, 1.0))),
        unit_to_byte(srgb_encode(lin_g.clamp(0.0, 1.0))),
        unit_to_byte(srgb_encode(lin_b.clamp(0.0, 1.0))),
    )
}

/// sRGB transfer function: linear segment below 0.0031308, power curve above.
fn srgb_encode(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn unit_to_byte(v: f32) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

fn rgb_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02X}{g:02X}{b:02X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_passthrough() {
        assert_eq!(normalize_color(Some("#ff8800")), "#FF8800");
        assert_eq!(normalize_color(Some("#FF8800")), "#FF8800");
    }

    #[test]
    fn test_hex_shorthand_expands() {
        assert_eq!(normalize_color(Some("#f80")), "#FF8800");
    }

    #[test]
    fn test_hex_with_alpha_drops_alpha() {
        assert_eq!(normalize_color(Some("#ff880080")), "#FF8800");
    }

    #[test]
    fn test_rgb_forms() {
        assert_eq!(normalize_color(Some("rgb(255, 0, 0)")), "#FF0000");
        assert_eq!(normalize_color(Some("rgba(0, 128, 255, 0.5)")), "#0080FF");
    }

    #[test]
    fn test_hsl_black() {
        assert_eq!(normalize_color(Some("hsl(0,0%,0%)")), "#000000");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(normalize_color(Some("hsl(0, 100%, 50%)")), "#FF0000");
        assert_eq!(normalize_color(Some("hsl(120, 100%, 50%)")), "#00FF00");
        assert_eq!(normalize_color(Some("hsl(240, 100%, 50%)")), "#0000FF");
    }

    #[test]
    fn test_oklch_pure_red_within_tolerance() {
        let hex = normalize_color(Some("oklch(0.628 0.2577 29.23)"));
        let (r, g, b) = hex_to_rgb(&hex);
        assert!(r >= 253, "red channel {r} too far from 255");
        assert!(g <= 2, "green channel {g} too far from 0");
        assert!(b <= 2, "blue channel {b} too far from 0");
    }

    #[test]
    fn test_oklch_percentage_and_deg_suffix() {
        let hex = normalize_color(Some("oklch(62.8% 0.2577 29.23deg)"));
        let (r, g, b) = hex_to_rgb(&hex);
        assert!(r >= 253 && g <= 2 && b <= 2, "got {hex}");
    }

    #[test]
    fn test_oklch_white() {
        let (r, g, b) = hex_to_rgb(&normalize_color(Some("oklch(1 0 0)")));
        assert!(r >= 253 && g >= 253 && b >= 253);
    }

    #[test]
    fn test_var_falls_back_to_black() {
        assert_eq!(normalize_color(Some("var(--accent)")), "#000000");
    }

    #[test]
    fn test_garbage_falls_back_to_black() {
        assert_eq!(normalize_color(Some("definitely not a color")), "#000000");
    }

    #[test]
    fn test_none_and_transparent() {
        assert_eq!(normalize_color(None), "transparent");
        assert_eq!(normalize_color(Some("transparent")), "transparent");
        assert_eq!(normalize_color(Some("")), "transparent");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF8800"), (255, 136, 0));
        assert_eq!(hex_to_rgb("not hex"), (0, 0, 0));
    }
}
