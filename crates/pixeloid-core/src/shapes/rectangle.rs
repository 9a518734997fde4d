//! Rectangle shape: two opposite corners, resolved to min/max at use.

use super::Bounds;
use crate::coords::PixeloidPoint;
use serde::{Deserialize, Serialize};

/// Size measurements shared by rectangles and diamonds.
///
/// Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxMetrics {
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub perimeter: f64,
}

impl BoxMetrics {
    pub fn rectangle(a: PixeloidPoint, b: PixeloidPoint) -> Self {
        let bounds = Bounds::from_points(&[a, b]);
        let (width, height) = (bounds.width(), bounds.height());
        Self {
            width,
            height,
            area: width * height,
            perimeter: 2.0 * (width + height),
        }
    }

    /// Metrics of a W/N/E/S diamond: area is half the bounding box and each
    /// of the four edges runs corner-to-corner of a half-size quadrant.
    pub fn diamond(vertices: &[PixeloidPoint]) -> Self {
        let bounds = Bounds::from_points(vertices);
        let (width, height) = (bounds.width(), bounds.height());
        Self {
            width,
            height,
            area: width * height / 2.0,
            perimeter: 4.0 * (width / 2.0).hypot(height / 2.0),
        }
    }
}

/// Direction-independent containment, edges inclusive.
pub(super) fn contains(a: PixeloidPoint, b: PixeloidPoint, point: PixeloidPoint) -> bool {
    Bounds::from_points(&[a, b]).contains(point)
}
