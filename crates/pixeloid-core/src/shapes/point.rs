//! Point shape: a single vertex with a square selection halo.

use crate::coords::PixeloidPoint;

/// A zero-dimension point is selectable within `halo` pixeloids on each axis.
pub(super) fn contains(position: PixeloidPoint, point: PixeloidPoint, halo: f64) -> bool {
    (point.x - position.x).abs() <= halo && (point.y - position.y).abs() <= halo
}
