//! Circle shape: a center vertex plus a vertex on the rim.

use super::Bounds;
use crate::coords::PixeloidPoint;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Measurements derived from a circle's center and rim vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleMetrics {
    pub center: PixeloidPoint,
    pub radius: f64,
    pub diameter: f64,
    pub circumference: f64,
    pub area: f64,
}

impl CircleMetrics {
    pub fn new(center: PixeloidPoint, rim: PixeloidPoint) -> Self {
        let radius = center.distance(rim);
        Self {
            center,
            radius,
            diameter: radius * 2.0,
            circumference: 2.0 * PI * radius,
            area: PI * radius * radius,
        }
    }
}

pub(super) fn bounds(center: PixeloidPoint, rim: PixeloidPoint) -> Bounds {
    let r = center.distance(rim);
    Bounds::new(center.x - r, center.y - r, center.x + r, center.y + r)
}

/// The whole disc is selectable, not only the ring.
pub(super) fn contains(center: PixeloidPoint, rim: PixeloidPoint, point: PixeloidPoint) -> bool {
    center.distance(point) <= center.distance(rim)
}
