//! Camera module holding the navigation offset and cell size.

use crate::coords::{self, CellSize, PixeloidPoint, ScreenPoint, VertexPoint};
use crate::error::{GeometryError, GeometryResult};
use crate::shapes::Bounds;
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// Cell size a fresh camera starts at.
pub const DEFAULT_CELL_SIZE: f64 = 10.0;

/// Camera owns the mutable `{ cell_size, offset }` context every coordinate
/// conversion is parameterized by.
///
/// `offset` is measured in pixeloids: the pixeloid that sits at the
/// top-left corner of the viewport.
/// The zoom range is always non-empty and contains the current cell size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCamera")]
pub struct Camera {
    /// Navigation offset in pixeloid units.
    pub offset: Vec2,
    cell_size: CellSize,
    min_cell_size: CellSize,
    max_cell_size: CellSize,
}

#[derive(Deserialize)]
struct RawCamera {
    offset: Vec2,
    cell_size: f64,
    min_cell_size: f64,
    max_cell_size: f64,
}

impl TryFrom<RawCamera> for Camera {
    type Error = GeometryError;

    fn try_from(raw: RawCamera) -> Result<Self, Self::Error> {
        let mut camera = Camera::with_cell_size(raw.cell_size, raw.min_cell_size, raw.max_cell_size)?;
        camera.offset = raw.offset;
        Ok(camera)
    }
}

fn zoom_range(min: f64, max: f64) -> GeometryResult<(CellSize, CellSize)> {
    let (min, max) = (CellSize::new(min)?, CellSize::new(max)?);
    if min > max {
        return Err(GeometryError::InvalidZoomRange { min: min.get(), max: max.get() });
    }
    Ok((min, max))
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            cell_size: CellSize(DEFAULT_CELL_SIZE),
            min_cell_size: CellSize(1.0),
            max_cell_size: CellSize(128.0),
        }
    }
}

impl Camera {
    /// Create a camera with the default cell size and no offset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with an explicit cell size and zoom range.
    ///
    /// Fails if the range is empty or does not contain `cell_size`.
    pub fn with_cell_size(cell_size: f64, min_cell_size: f64, max_cell_size: f64) -> GeometryResult<Self> {
        let (min_cell_size, max_cell_size) = zoom_range(min_cell_size, max_cell_size)?;
        let mut camera = Self {
            offset: Vec2::ZERO,
            cell_size: min_cell_size,
            min_cell_size,
            max_cell_size,
        };
        camera.set_cell_size(cell_size)?;
        Ok(camera)
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// Smallest cell size zooming may reach.
    pub fn min_cell_size(&self) -> f64 {
        self.min_cell_size.get()
    }

    /// Largest cell size zooming may reach.
    pub fn max_cell_size(&self) -> f64 {
        self.max_cell_size.get()
    }

    /// Replace the cell size. Sizes that are non-positive or outside the
    /// zoom range are rejected, not clamped.
    pub fn set_cell_size(&mut self, cell_size: f64) -> GeometryResult<()> {
        let size = CellSize::new(cell_size)?;
        if size < self.min_cell_size || size > self.max_cell_size {
            return Err(GeometryError::CellSizeOutOfRange {
                size: cell_size,
                min: self.min_cell_size(),
                max: self.max_cell_size(),
            });
        }
        self.cell_size = size;
        Ok(())
    }

    /// Replace the zoom range. The current cell size is clamped into it.
    pub fn set_zoom_range(&mut self, min_cell_size: f64, max_cell_size: f64) -> GeometryResult<()> {
        let (min, max) = zoom_range(min_cell_size, max_cell_size)?;
        self.min_cell_size = min;
        self.max_cell_size = max;
        self.cell_size = self.clamp_to_range(self.cell_size.get());
        Ok(())
    }

    fn clamp_to_range(&self, size: f64) -> CellSize {
        CellSize(size.clamp(self.min_cell_size(), self.max_cell_size()))
    }

    pub fn screen_to_vertex(&self, point: ScreenPoint) -> VertexPoint {
        coords::to_vertex_from_screen(point, self.cell_size)
    }

    pub fn vertex_to_screen(&self, point: VertexPoint) -> ScreenPoint {
        coords::to_screen(point, self.cell_size)
    }

    /// Convert a pointer position to pixeloid coordinates.
    pub fn screen_to_pixeloid(&self, point: ScreenPoint) -> PixeloidPoint {
        coords::screen_to_pixeloid(point, self.offset, self.cell_size)
    }

    /// Convert a pixeloid coordinate to device pixels.
    pub fn pixeloid_to_screen(&self, point: PixeloidPoint) -> ScreenPoint {
        coords::pixeloid_to_screen(point, self.offset, self.cell_size)
    }

    /// Pan by a delta in screen pixels. Content follows the pointer, so the
    /// offset moves the opposite way.
    pub fn pan_screen(&mut self, delta: Vec2) {
        self.offset -= delta / self.cell_size.get();
    }

    /// Move the offset directly by a delta in pixeloids.
    pub fn pan_pixeloids(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping the pixeloid under `screen_point` fixed.
    pub fn zoom_at(&mut self, screen_point: ScreenPoint, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            log::debug!("Ignoring zoom with factor {factor}");
            return;
        }
        let new_size = self.clamp_to_range(self.cell_size.get() * factor);
        if (new_size.get() - self.cell_size.get()).abs() < f64::EPSILON {
            return;
        }

        let anchor = self.screen_to_pixeloid(screen_point);
        self.cell_size = new_size;

        // Shift so the anchor pixeloid lands back under the pointer
        let vertex = self.screen_to_vertex(screen_point);
        self.offset = Vec2::new(anchor.x - vertex.x, anchor.y - vertex.y);
    }

    /// Pixeloid-space rectangle covered by a viewport of the given pixel size.
    pub fn visible_bounds(&self, viewport: Size) -> Bounds {
        let top_left = self.screen_to_pixeloid(ScreenPoint::ORIGIN);
        let bottom_right = self.screen_to_pixeloid(ScreenPoint::new(viewport.width, viewport.height));
        Bounds::from_points(&[top_left, bottom_right])
    }

    /// Reset to no offset and the default cell size, clamped into range.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.cell_size = self.clamp_to_range(DEFAULT_CELL_SIZE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.cell_size().get() - DEFAULT_CELL_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_pixeloid_with_offset() {
        let mut camera = Camera::with_cell_size(4.0, 1.0, 64.0).unwrap();
        camera.offset = Vec2::new(5.0, -2.0);
        let p = camera.screen_to_pixeloid(ScreenPoint::new(40.0, 8.0));
        assert!((p.x - 15.0).abs() < f64::EPSILON);
        assert!((p.y - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::with_cell_size(7.5, 1.0, 64.0).unwrap();
        camera.offset = Vec2::new(30.0, -20.0);

        let original = ScreenPoint::new(123.0, 456.0);
        let back = camera.pixeloid_to_screen(camera.screen_to_pixeloid(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_cell_size() {
        let mut camera = Camera::new();
        assert!(camera.set_cell_size(0.0).is_err());
        assert!(camera.set_cell_size(-1.0).is_err());
        assert!(Camera::with_cell_size(-3.0, 1.0, 10.0).is_err());
        assert!((camera.cell_size().get() - DEFAULT_CELL_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_zoom_range_rejected() {
        assert_eq!(
            Camera::with_cell_size(5.0, 20.0, 10.0).unwrap_err(),
            GeometryError::InvalidZoomRange { min: 20.0, max: 10.0 }
        );

        let mut camera = Camera::new();
        assert!(camera.set_zoom_range(20.0, 10.0).is_err());
        assert!(camera.set_zoom_range(0.0, 10.0).is_err());
        // A rejected range leaves the camera usable
        camera.zoom_at(ScreenPoint::ORIGIN, 2.0);
        camera.reset();
        assert!((camera.cell_size().get() - DEFAULT_CELL_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cell_size_must_lie_in_range() {
        assert!(matches!(
            Camera::with_cell_size(50.0, 1.0, 10.0),
            Err(GeometryError::CellSizeOutOfRange { .. })
        ));
        let mut camera = Camera::with_cell_size(4.0, 2.0, 8.0).unwrap();
        assert!(camera.set_cell_size(9.0).is_err());
        assert!((camera.cell_size().get() - 4.0).abs() < f64::EPSILON);
        assert!(camera.set_cell_size(8.0).is_ok());
    }

    #[test]
    fn test_set_zoom_range_clamps_current_size() {
        let mut camera = Camera::new();
        camera.set_zoom_range(20.0, 40.0).unwrap();
        assert!((camera.cell_size().get() - 20.0).abs() < f64::EPSILON);
        camera.reset();
        assert!((camera.cell_size().get() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_validates_range() {
        let json = r#"{ "offset": { "x": 1.0, "y": 2.0 }, "cell_size": 5.0, "min_cell_size": 20.0, "max_cell_size": 10.0 }"#;
        assert!(serde_json::from_str::<Camera>(json).is_err());

        let camera = Camera::with_cell_size(6.0, 2.0, 12.0).unwrap();
        let back: Camera = serde_json::from_str(&serde_json::to_string(&camera).unwrap()).unwrap();
        assert!((back.cell_size().get() - 6.0).abs() < f64::EPSILON);
        assert!((back.max_cell_size() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(3.0, 4.0);
        let anchor_screen = ScreenPoint::new(200.0, 150.0);
        let before = camera.screen_to_pixeloid(anchor_screen);

        camera.zoom_at(anchor_screen, 2.0);
        assert!((camera.cell_size().get() - 20.0).abs() < f64::EPSILON);

        let after = camera.screen_to_pixeloid(anchor_screen);
        assert!((after.x - before.x).abs() < 1e-10);
        assert!((after.y - before.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(ScreenPoint::ORIGIN, 0.001);
        assert!((camera.cell_size().get() - camera.min_cell_size()).abs() < f64::EPSILON);

        camera.zoom_at(ScreenPoint::ORIGIN, 1000.0);
        assert!((camera.cell_size().get() - camera.max_cell_size()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan_screen(Vec2::new(20.0, -10.0));
        assert!((camera.offset.x + 2.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 1.0).abs() < f64::EPSILON);

        camera.pan_pixeloids(Vec2::new(2.0, 2.0));
        assert!(camera.offset.x.abs() < f64::EPSILON);
        assert!((camera.offset.y - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_visible_bounds() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(100.0, 50.0);
        let bounds = camera.visible_bounds(Size::new(800.0, 600.0));
        assert!((bounds.min_x - 100.0).abs() < f64::EPSILON);
        assert!((bounds.min_y - 50.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 80.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 60.0).abs() < f64::EPSILON);
    }
}
