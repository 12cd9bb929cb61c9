//! Gradient direction resolution.
//!
//! Converts a symbolic direction plus a bounding box into the concrete
//! start/end points of a linear gradient: a line through the box center at
//! the direction's angle, sized by the half-diagonal so it covers the whole
//! box regardless of aspect ratio. Used identically for slide backgrounds,
//! shape fills, text fills, and text background fills.

use serde::{Deserialize, Serialize};

/// A point in logical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

/// An axis-aligned box in logical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Construct a rect from origin and size.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// The eight canonical gradient directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    /// Bottom to top.
    ToTop,
    /// Bottom-left to top-right.
    ToTopRight,
    /// Left to right.
    ToRight,
    /// Top-left to bottom-right.
    ToBottomRight,
    /// Top to bottom.
    ToBottom,
    /// Top-right to bottom-left.
    ToBottomLeft,
    /// Right to left.
    ToLeft,
    /// Bottom-right to top-left.
    ToTopLeft,
}

impl GradientDirection {
    /// Fixed angle in degrees, measured clockwise from straight up.
    #[must_use]
    pub fn angle_degrees(self) -> f32 {
        match self {
            Self::ToTop => 0.0,
            Self::ToTopRight => 45.0,
            Self::ToRight => 90.0,
            Self::ToBottomRight => 135.0,
            Self::ToBottom => 180.0,
            Self::ToBottomLeft => 225.0,
            Self::ToLeft => 270.0,
            Self::ToTopLeft => 315.0,
        }
    }
}

/// Resolved gradient geometry: the line the colors interpolate along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientLine {
    /// Where the first color sits.
    pub start: Point,
    /// Where the second color sits.
    pub end: Point,
}

/// Resolve a symbolic direction against a bounding box.
///
/// The line runs symmetrically through the box center along the direction's
/// unit vector, each endpoint offset by the half-diagonal.
#[must_use]
pub fn resolve(direction: GradientDirection, rect: Rect) -> GradientLine {
    let center = rect.center();
    let half_diag = (rect.width * rect.width + rect.height * rect.height).sqrt() / 2.0;

    let angle = direction.angle_degrees().to_radians();
    // Screen coordinates: y grows downward, so "up" is -y.
    let ux = angle.sin();
    let uy = -angle.cos();

    GradientLine {
        start: Point {
            x: center.x - ux * half_diag,
            y: center.y - uy * half_diag,
        },
        end: Point {
            x: center.x + ux * half_diag,
            y: center.y + uy * half_diag,
        },
    }
}
