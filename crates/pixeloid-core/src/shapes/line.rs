//! Line shape: a segment from start to end.

use super::point_to_segment_dist;
use crate::coords::PixeloidPoint;
use serde::{Deserialize, Serialize};

/// Measurements derived from a line's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineMetrics {
    pub start: PixeloidPoint,
    pub end: PixeloidPoint,
    pub midpoint: PixeloidPoint,
    pub length: f64,
    /// Direction from start to end in radians, measured from the +x axis.
    pub angle: f64,
}

impl LineMetrics {
    pub fn new(start: PixeloidPoint, end: PixeloidPoint) -> Self {
        let d = end - start;
        Self {
            start,
            end,
            midpoint: start.midpoint(end),
            length: d.hypot(),
            angle: d.y.atan2(d.x),
        }
    }

    /// Direction in degrees.
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

pub(super) fn contains(start: PixeloidPoint, end: PixeloidPoint, point: PixeloidPoint, tolerance: f64) -> bool {
    point_to_segment_dist(point, start, end) <= tolerance
}
