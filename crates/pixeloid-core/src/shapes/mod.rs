//! Geometric object model.
//!
//! Every object is a [`Shape`] (a kind plus an ordered vertex list in
//! pixeloid space) together with a [`ShapeStyle`]. Derived measurements
//! are recomputed from the vertices on every read.

mod circle;
mod diamond;
mod line;
mod point;
mod rectangle;

pub use circle::CircleMetrics;
pub use diamond::DiamondPolicy;
pub use line::LineMetrics;
pub use rectangle::BoxMetrics;

use crate::coords::PixeloidPoint;
use crate::error::{GeometryError, GeometryResult};
use kurbo::Vec2;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Scale the alpha channel by `alpha` in `[0, 1]`.
    fn with_alpha(self, alpha: f64) -> Color {
        let a = (self.a as f64 * alpha.clamp(0.0, 1.0)).round() as u8;
        Color::from_rgba8(self.r, self.g, self.b, a)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in pixeloids.
    pub stroke_width: f64,
    /// Stroke opacity (0.0 = transparent, 1.0 = opaque).
    #[serde(default = "default_alpha")]
    pub stroke_alpha: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Fill opacity; `None` means opaque when a fill color is set.
    #[serde(default)]
    pub fill_alpha: Option<f64>,
    /// Hidden objects are neither rendered nor hit-tested.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_alpha() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl ShapeStyle {
    /// Get the stroke color with its alpha applied.
    pub fn stroke(&self) -> Color {
        self.stroke_color.with_alpha(self.stroke_alpha)
    }

    /// Get the fill color with its alpha applied.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color
            .map(|c| c.with_alpha(self.fill_alpha.unwrap_or(1.0)))
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }

    /// Set the fill color from a peniko Color.
    pub fn set_fill(&mut self, color: Option<Color>) {
        self.fill_color = color.map(|c| c.into());
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 1.0,
            stroke_alpha: 1.0,
            fill_color: None,
            fill_alpha: None,
            visible: true,
        }
    }
}

/// Unique identifier for stored objects. Never reused after deletion.
pub type ObjectId = Uuid;

/// The closed set of shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Point,
    Line,
    Circle,
    Rectangle,
    Diamond,
}

impl ShapeKind {
    /// Number of vertices a shape of this kind carries.
    pub fn vertex_count(self) -> usize {
        match self {
            ShapeKind::Point => 1,
            ShapeKind::Line | ShapeKind::Circle | ShapeKind::Rectangle => 2,
            ShapeKind::Diamond => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Diamond => "diamond",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned bounding box in pixeloid space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Bounding box over an arbitrary vertex list.
    ///
    /// An empty list yields a zero-sized box at the origin.
    pub fn from_points(points: &[PixeloidPoint]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        points.iter().skip(1).fold(
            Self::new(first.x, first.y, first.x, first.y),
            |b, p| Self::new(b.min_x.min(p.x), b.min_y.min(p.y), b.max_x.max(p.x), b.max_y.max(p.y)),
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> PixeloidPoint {
        PixeloidPoint::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Inclusive containment test (edges count as inside).
    pub fn contains(&self, point: PixeloidPoint) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }

    /// Whether two boxes overlap or touch.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x && other.min_x <= self.max_x && self.min_y <= other.max_y && other.min_y <= self.max_y
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(self.min_x - amount, self.min_y - amount, self.max_x + amount, self.max_y + amount)
    }

    pub fn union(&self, other: &Bounds) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn to_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Measurements derived from a shape's vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeProperties {
    Point { position: PixeloidPoint },
    Line(LineMetrics),
    Circle(CircleMetrics),
    Rectangle(BoxMetrics),
    Diamond(BoxMetrics),
}

/// A shape kind together with its validated vertex list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawShape")]
pub struct Shape {
    kind: ShapeKind,
    vertices: Vec<PixeloidPoint>,
}

#[derive(Deserialize)]
struct RawShape {
    kind: ShapeKind,
    vertices: Vec<PixeloidPoint>,
}

impl TryFrom<RawShape> for Shape {
    type Error = GeometryError;

    fn try_from(raw: RawShape) -> Result<Self, Self::Error> {
        Shape::new(raw.kind, raw.vertices)
    }
}

fn check_vertex_count(kind: ShapeKind, actual: usize) -> GeometryResult<()> {
    let expected = kind.vertex_count();
    if actual == expected {
        Ok(())
    } else {
        Err(GeometryError::VertexCount { kind, expected, actual })
    }
}

impl Shape {
    /// Create a shape, checking the vertex count for its kind.
    pub fn new(kind: ShapeKind, vertices: Vec<PixeloidPoint>) -> GeometryResult<Self> {
        check_vertex_count(kind, vertices.len())?;
        Ok(Self { kind, vertices })
    }

    pub fn point(position: PixeloidPoint) -> Self {
        Self { kind: ShapeKind::Point, vertices: vec![position] }
    }

    pub fn line(start: PixeloidPoint, end: PixeloidPoint) -> Self {
        Self { kind: ShapeKind::Line, vertices: vec![start, end] }
    }

    /// A circle through `rim`, centered on `center`.
    pub fn circle(center: PixeloidPoint, rim: PixeloidPoint) -> Self {
        Self { kind: ShapeKind::Circle, vertices: vec![center, rim] }
    }

    /// A rectangle spanned by two opposite corners, in either order.
    pub fn rectangle(a: PixeloidPoint, b: PixeloidPoint) -> Self {
        Self { kind: ShapeKind::Rectangle, vertices: vec![a, b] }
    }

    /// A diamond from its west, north, east and south vertices.
    pub fn diamond(west: PixeloidPoint, north: PixeloidPoint, east: PixeloidPoint, south: PixeloidPoint) -> Self {
        Self { kind: ShapeKind::Diamond, vertices: vec![west, north, east, south] }
    }

    /// Build a diamond from a drag gesture. `policy` decides how the
    /// height relates to the dragged width; see [`DiamondPolicy`].
    pub fn diamond_from_drag(start: PixeloidPoint, current: PixeloidPoint, policy: DiamondPolicy) -> Self {
        let [west, north, east, south] = diamond::vertices_from_drag(start, current, policy);
        Self::diamond(west, north, east, south)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn vertices(&self) -> &[PixeloidPoint] {
        &self.vertices
    }

    /// Replace the vertex list, keeping the kind.
    pub fn set_vertices(&mut self, vertices: Vec<PixeloidPoint>) -> GeometryResult<()> {
        check_vertex_count(self.kind, vertices.len())?;
        self.vertices = vertices;
        Ok(())
    }

    /// A copy of this shape moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            kind: self.kind,
            vertices: self.vertices.iter().map(|&v| v + delta).collect(),
        }
    }

    /// Axis-aligned bounds of the visible extent.
    ///
    /// For circles this is the disc, not the two defining vertices.
    pub fn bounds(&self) -> Bounds {
        match self.kind {
            ShapeKind::Circle => circle::bounds(self.vertices[0], self.vertices[1]),
            _ => Bounds::from_points(&self.vertices),
        }
    }

    pub fn properties(&self) -> ShapeProperties {
        let v = &self.vertices;
        match self.kind {
            ShapeKind::Point => ShapeProperties::Point { position: v[0] },
            ShapeKind::Line => ShapeProperties::Line(LineMetrics::new(v[0], v[1])),
            ShapeKind::Circle => ShapeProperties::Circle(CircleMetrics::new(v[0], v[1])),
            ShapeKind::Rectangle => ShapeProperties::Rectangle(BoxMetrics::rectangle(v[0], v[1])),
            ShapeKind::Diamond => ShapeProperties::Diamond(BoxMetrics::diamond(v)),
        }
    }

    /// Whether `point` lies in the selectable region of this shape.
    pub fn contains(&self, point: PixeloidPoint, tolerance: &HitTolerance, stroke_width: f64) -> bool {
        let v = &self.vertices;
        match self.kind {
            ShapeKind::Point => point::contains(v[0], point, tolerance.point_halo),
            ShapeKind::Line => line::contains(v[0], v[1], point, tolerance.line_tolerance(stroke_width)),
            ShapeKind::Circle => circle::contains(v[0], v[1], point),
            ShapeKind::Rectangle => rectangle::contains(v[0], v[1], point),
            ShapeKind::Diamond => point_in_polygon(point, v),
        }
    }

    /// How far outside [`Shape::bounds`] a hit may still land.
    pub fn hit_slop(&self, tolerance: &HitTolerance, stroke_width: f64) -> f64 {
        match self.kind {
            ShapeKind::Point => tolerance.point_halo,
            ShapeKind::Line => tolerance.line_tolerance(stroke_width),
            ShapeKind::Circle | ShapeKind::Rectangle | ShapeKind::Diamond => 0.0,
        }
    }
}

/// Selection tolerances used by hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HitTolerance {
    /// Half-size of the square halo around a point.
    pub point_halo: f64,
    /// Smallest distance tolerance for lines, so hairlines stay selectable.
    pub line_min_tolerance: f64,
    /// Fraction of the stroke width that counts as on the line.
    pub line_stroke_factor: f64,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            point_halo: 2.0,
            line_min_tolerance: 2.0,
            line_stroke_factor: 0.5,
        }
    }
}

impl HitTolerance {
    pub fn line_tolerance(&self, stroke_width: f64) -> f64 {
        (stroke_width * self.line_stroke_factor).max(self.line_min_tolerance)
    }
}

/// A stored shape with identity and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricObject {
    pub(crate) id: ObjectId,
    pub shape: Shape,
    pub style: ShapeStyle,
}

impl GeometricObject {
    pub(crate) fn new(shape: Shape, style: ShapeStyle) -> Self {
        Self { id: Uuid::new_v4(), shape, style }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn vertices(&self) -> &[PixeloidPoint] {
        self.shape.vertices()
    }

    pub fn is_visible(&self) -> bool {
        self.style.visible
    }

    pub fn bounds(&self) -> Bounds {
        self.shape.bounds()
    }

    pub fn properties(&self) -> ShapeProperties {
        self.shape.properties()
    }
}

/// A transient, never-stored shape shown while a draw or drag is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewObject {
    pub shape: Shape,
    pub style: ShapeStyle,
    /// The stored object this previews a move of, if any.
    pub source: Option<ObjectId>,
}

impl PreviewObject {
    pub fn properties(&self) -> ShapeProperties {
        self.shape.properties()
    }

    pub fn bounds(&self) -> Bounds {
        self.shape.bounds()
    }
}

/// Distance from a point to a line segment (a to b).
pub fn point_to_segment_dist(point: PixeloidPoint, a: PixeloidPoint, b: PixeloidPoint) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    point.distance(proj)
}

/// Even-odd ray-casting point-in-polygon test.
pub fn point_in_polygon(point: PixeloidPoint, polygon: &[PixeloidPoint]) -> bool {
    let mut inside = false;
    let n = polygon.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
