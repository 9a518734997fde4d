//! Diamond shape: four vertices in west, north, east, south order.

use super::Bounds;
use crate::coords::PixeloidPoint;
use serde::{Deserialize, Serialize};

/// How a dragged diamond derives its height from the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiamondPolicy {
    /// The diamond fills the box spanned by the drag.
    #[default]
    BoundingBox,
    /// Width is rounded up to the next even pixeloid count and the height
    /// is half the width, anchored at the drag start. The even width keeps
    /// the north and south vertices on whole pixeloids.
    Isometric,
}

pub(super) fn vertices_from_drag(start: PixeloidPoint, current: PixeloidPoint, policy: DiamondPolicy) -> [PixeloidPoint; 4] {
    let bounds = match policy {
        DiamondPolicy::BoundingBox => Bounds::from_points(&[start, current]),
        DiamondPolicy::Isometric => isometric_bounds(start, current),
    };
    from_bounds(&bounds)
}

fn isometric_bounds(start: PixeloidPoint, current: PixeloidPoint) -> Bounds {
    let dx = current.x - start.x;
    let mut width = dx.abs().ceil();
    if width % 2.0 != 0.0 {
        width += 1.0;
    }
    let height = width / 2.0;

    let min_x = if dx >= 0.0 { start.x } else { start.x - width };
    let min_y = if current.y >= start.y { start.y } else { start.y - height };
    Bounds::new(min_x, min_y, min_x + width, min_y + height)
}

fn from_bounds(bounds: &Bounds) -> [PixeloidPoint; 4] {
    let center = bounds.center();
    [
        PixeloidPoint::new(bounds.min_x, center.y),
        PixeloidPoint::new(center.x, bounds.min_y),
        PixeloidPoint::new(bounds.max_x, center.y),
        PixeloidPoint::new(center.x, bounds.max_y),
    ]
}
