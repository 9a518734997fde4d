//! The three coordinate spaces and the conversions between them.
//!
//! * **Pixeloid** space is the logical authoring space; every stored vertex lives here.
//! * **Vertex** space is pixeloid space shifted by the navigation offset.
//! * **Screen** space is vertex space scaled by the cell size.
//!
//! `pixeloid = vertex + offset` and `screen = vertex * cell_size`. There is no
//! direct pixeloid/screen shortcut; the composed helpers go through vertex space.

use crate::error::{GeometryError, GeometryResult};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

macro_rules! coordinate_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        pub struct $name {
            pub x: f64,
            pub y: f64,
        }

        impl $name {
            pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

            pub const fn new(x: f64, y: f64) -> Self {
                Self { x, y }
            }

            /// Reinterpret a raw kurbo point as a coordinate in this space.
            pub fn from_point(point: Point) -> Self {
                Self::new(point.x, point.y)
            }

            /// Strip the space tag for use with kurbo math.
            pub fn to_point(self) -> Point {
                Point::new(self.x, self.y)
            }

            /// Euclidean distance to another coordinate in the same space.
            pub fn distance(self, other: Self) -> f64 {
                (self - other).hypot()
            }

            /// Midpoint between two coordinates in the same space.
            pub fn midpoint(self, other: Self) -> Self {
                Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
            }
        }

        impl Add<Vec2> for $name {
            type Output = Self;

            fn add(self, rhs: Vec2) -> Self {
                Self::new(self.x + rhs.x, self.y + rhs.y)
            }
        }

        impl Sub<Vec2> for $name {
            type Output = Self;

            fn sub(self, rhs: Vec2) -> Self {
                Self::new(self.x - rhs.x, self.y - rhs.y)
            }
        }

        impl Sub for $name {
            type Output = Vec2;

            fn sub(self, rhs: Self) -> Vec2 {
                Vec2::new(self.x - rhs.x, self.y - rhs.y)
            }
        }
    };
}

coordinate_type!(
    /// A point in logical, zoom-independent pixeloid space.
    PixeloidPoint
);
coordinate_type!(
    /// A point in mesh-relative vertex space (pixeloid minus offset).
    VertexPoint
);
coordinate_type!(
    /// A point in device pixels, the space raw pointer events arrive in.
    ScreenPoint
);

/// Pixels per pixeloid unit. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CellSize(pub(crate) f64);

impl CellSize {
    pub fn new(size: f64) -> GeometryResult<Self> {
        if size.is_finite() && size > 0.0 {
            Ok(Self(size))
        } else {
            Err(GeometryError::InvalidCellSize(size))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for CellSize {
    type Error = GeometryError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CellSize> for f64 {
    fn from(size: CellSize) -> Self {
        size.0
    }
}

/// Convert a pixeloid coordinate to vertex space by removing the offset.
pub fn to_vertex(point: PixeloidPoint, offset: Vec2) -> VertexPoint {
    VertexPoint::new(point.x - offset.x, point.y - offset.y)
}

/// Convert a vertex coordinate back to pixeloid space by adding the offset.
pub fn to_pixeloid(point: VertexPoint, offset: Vec2) -> PixeloidPoint {
    PixeloidPoint::new(point.x + offset.x, point.y + offset.y)
}

/// Scale a vertex coordinate to device pixels.
pub fn to_screen(point: VertexPoint, cell_size: CellSize) -> ScreenPoint {
    ScreenPoint::new(point.x * cell_size.0, point.y * cell_size.0)
}

/// Convert device pixels to vertex space.
pub fn to_vertex_from_screen(point: ScreenPoint, cell_size: CellSize) -> VertexPoint {
    VertexPoint::new(point.x / cell_size.0, point.y / cell_size.0)
}

/// Convert a pointer position to pixeloid space (screen -> vertex -> pixeloid).
pub fn screen_to_pixeloid(point: ScreenPoint, offset: Vec2, cell_size: CellSize) -> PixeloidPoint {
    to_pixeloid(to_vertex_from_screen(point, cell_size), offset)
}

/// Convert a pixeloid coordinate to device pixels (pixeloid -> vertex -> screen).
pub fn pixeloid_to_screen(point: PixeloidPoint, offset: Vec2, cell_size: CellSize) -> ScreenPoint {
    to_screen(to_vertex(point, offset), cell_size)
}

/// Round a pixeloid coordinate to the nearest integer lattice point.
///
/// Conversions never round; callers snap explicitly so that drag deltas
/// accumulate without rounding error.
pub fn snap_to_integer(point: PixeloidPoint) -> PixeloidPoint {
    PixeloidPoint::new(point.x.round(), point.y.round())
}
