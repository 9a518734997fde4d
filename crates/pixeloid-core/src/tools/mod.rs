//! Drawing engine: turns pointer gestures into committed shapes.

use crate::canvas::ObjectStore;
use crate::coords::PixeloidPoint;
use crate::shapes::{DiamondPolicy, ObjectId, PreviewObject, Shape, ShapeStyle};
use serde::{Deserialize, Serialize};

/// The armed shape type. `None` routes pointer input to selection instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    #[default]
    None,
    Point,
    Line,
    Circle,
    Rectangle,
    Diamond,
}

impl DrawingMode {
    /// Whether pointer input belongs to the drawing engine.
    pub fn is_drawing(self) -> bool {
        self != DrawingMode::None
    }
}

/// State of a drawing gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// A gesture is in flight.
    Active {
        /// Where the pointer went down.
        start: PixeloidPoint,
        /// Latest pointer position.
        current: PixeloidPoint,
    },
}

/// Manages the drawing mode and the gesture in flight.
#[derive(Debug, Clone, Default)]
pub struct DrawingEngine {
    mode: DrawingMode,
    state: DrawState,
    preview: Option<PreviewObject>,
    /// Style stamped onto new shapes.
    pub current_style: ShapeStyle,
    /// Height derivation for dragged diamonds.
    pub diamond: DiamondPolicy,
}

impl DrawingEngine {
    /// Create an idle engine in [`DrawingMode::None`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Switch drawing mode. A gesture in flight is cancelled, never committed.
    pub fn set_mode(&mut self, mode: DrawingMode) {
        if self.is_active() {
            log::debug!("Mode switch {:?} -> {:?} cancels pending draw", self.mode, mode);
        }
        self.cancel();
        self.mode = mode;
    }

    /// Begin a gesture. Point mode commits immediately and stays idle.
    pub fn pointer_down(&mut self, point: PixeloidPoint, store: &mut ObjectStore) -> Option<ObjectId> {
        match self.mode {
            DrawingMode::None => None,
            DrawingMode::Point => Some(store.add_shape(Shape::point(point), self.current_style.clone())),
            _ if self.is_active() => {
                log::debug!("Ignoring pointer down while a draw is already active");
                None
            }
            _ => {
                self.state = DrawState::Active { start: point, current: point };
                self.preview = self.build_preview(point, point);
                None
            }
        }
    }

    /// Update the preview. Returns whether a preview was recomputed.
    pub fn pointer_move(&mut self, point: PixeloidPoint) -> bool {
        let DrawState::Active { start, current } = &mut self.state else {
            return false;
        };
        *current = point;
        let start = *start;
        self.preview = self.build_preview(start, point);
        true
    }

    /// Finish the gesture and commit the shape to `store`.
    ///
    /// Degenerate shapes (zero-length line, zero-radius circle) are committed as-is.
    pub fn pointer_up(&mut self, point: PixeloidPoint, store: &mut ObjectStore) -> Option<ObjectId> {
        let DrawState::Active { start, .. } = self.state else {
            log::debug!("Ignoring pointer up without an active draw");
            return None;
        };
        let committed = self.build_preview(start, point);
        self.cancel();
        committed.map(|preview| store.add_shape(preview.shape, preview.style))
    }

    /// Drop the gesture in flight and its preview.
    pub fn cancel(&mut self) {
        self.state = DrawState::Idle;
        self.preview = None;
    }

    /// Check if a gesture is in flight.
    pub fn is_active(&self) -> bool {
        matches!(self.state, DrawState::Active { .. })
    }

    /// The live preview for the gesture in flight.
    pub fn preview(&self) -> Option<&PreviewObject> {
        self.preview.as_ref()
    }

    fn build_preview(&self, start: PixeloidPoint, end: PixeloidPoint) -> Option<PreviewObject> {
        let shape = match self.mode {
            DrawingMode::None => return None,
            DrawingMode::Point => Shape::point(end),
            DrawingMode::Line => Shape::line(start, end),
            DrawingMode::Circle => Shape::circle(start, end),
            DrawingMode::Rectangle => Shape::rectangle(start, end),
            DrawingMode::Diamond => Shape::diamond_from_drag(start, end, self.diamond),
        };
        Some(PreviewObject {
            shape,
            style: self.current_style.clone(),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeKind, ShapeProperties};

    fn p(x: f64, y: f64) -> PixeloidPoint {
        PixeloidPoint::new(x, y)
    }

    #[test]
    fn test_default_mode_is_none() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();
        assert_eq!(engine.mode(), DrawingMode::None);
        assert!(engine.pointer_down(p(0.0, 0.0), &mut store).is_none());
        assert!(!engine.is_active());
        assert!(store.is_empty());
    }

    #[test]
    fn test_point_commits_on_down() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();
        engine.set_mode(DrawingMode::Point);

        let id = engine.pointer_down(p(10.0, 10.0), &mut store).unwrap();
        assert!(!engine.is_active());
        assert_eq!(store.len(), 1);
        let object = store.get_object(id).unwrap();
        assert_eq!(object.kind(), ShapeKind::Point);
        assert_eq!(object.vertices(), &[p(10.0, 10.0)]);
    }

    #[test]
    fn test_line_draw() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();
        engine.set_mode(DrawingMode::Line);

        assert!(engine.pointer_down(p(0.0, 0.0), &mut store).is_none());
        assert!(engine.pointer_move(p(5.0, 0.0)));

        let preview = engine.preview().unwrap();
        assert_eq!(preview.shape.vertices(), &[p(0.0, 0.0), p(5.0, 0.0)]);
        let ShapeProperties::Line(metrics) = preview.properties() else {
            panic!("expected line preview");
        };
        assert_eq!(metrics.midpoint, p(2.5, 0.0));
        assert!((metrics.length - 5.0).abs() < f64::EPSILON);
        assert!(store.is_empty());

        let id = engine.pointer_up(p(10.0, 0.0), &mut store).unwrap();
        assert!(engine.preview().is_none());
        assert!(!engine.is_active());

        let object = store.get_object(id).unwrap();
        assert_eq!(object.vertices(), &[p(0.0, 0.0), p(10.0, 0.0)]);
        let ShapeProperties::Line(metrics) = object.properties() else {
            panic!("expected line");
        };
        assert!((metrics.length - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_circle_preview_radius() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();
        engine.set_mode(DrawingMode::Circle);
        engine.pointer_down(p(1.0, 1.0), &mut store);
        engine.pointer_move(p(4.0, 5.0));

        let ShapeProperties::Circle(metrics) = engine.preview().unwrap().properties() else {
            panic!("expected circle preview");
        };
        assert_eq!(metrics.center, p(1.0, 1.0));
        assert!((metrics.radius - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_rectangle_and_diamond_commit() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();

        engine.set_mode(DrawingMode::Rectangle);
        engine.pointer_down(p(10.0, 10.0), &mut store);
        let rect = engine.pointer_up(p(2.0, 4.0), &mut store).unwrap();
        assert_eq!(store.get_object(rect).unwrap().vertices(), &[p(10.0, 10.0), p(2.0, 4.0)]);

        engine.set_mode(DrawingMode::Diamond);
        engine.pointer_down(p(0.0, 0.0), &mut store);
        engine.pointer_move(p(3.0, 3.0));
        let diamond = engine.pointer_up(p(10.0, 10.0), &mut store).unwrap();
        assert_eq!(
            store.get_object(diamond).unwrap().vertices(),
            &[p(0.0, 5.0), p(5.0, 0.0), p(10.0, 5.0), p(5.0, 10.0)]
        );
    }

    #[test]
    fn test_mode_switch_cancels_draft() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();
        engine.set_mode(DrawingMode::Rectangle);
        engine.pointer_down(p(0.0, 0.0), &mut store);
        engine.pointer_move(p(20.0, 20.0));
        assert!(engine.preview().is_some());

        engine.set_mode(DrawingMode::Circle);
        assert!(engine.preview().is_none());
        assert!(!engine.is_active());
        assert!(store.is_empty());

        // The stale pointer-up must not commit anything
        assert!(engine.pointer_up(p(20.0, 20.0), &mut store).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_switch_to_none_cancels() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();
        engine.set_mode(DrawingMode::Line);
        engine.pointer_down(p(0.0, 0.0), &mut store);
        engine.set_mode(DrawingMode::None);
        assert!(engine.preview().is_none());
        assert!(engine.pointer_up(p(5.0, 5.0), &mut store).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_unmatched_events_are_noops() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();
        engine.set_mode(DrawingMode::Line);
        assert!(!engine.pointer_move(p(1.0, 1.0)));
        assert!(engine.pointer_up(p(1.0, 1.0), &mut store).is_none());

        engine.pointer_down(p(0.0, 0.0), &mut store);
        // A second down keeps the original start
        engine.pointer_down(p(9.0, 9.0), &mut store);
        let id = engine.pointer_up(p(4.0, 0.0), &mut store).unwrap();
        assert_eq!(store.get_object(id).unwrap().vertices(), &[p(0.0, 0.0), p(4.0, 0.0)]);
    }

    #[test]
    fn test_degenerate_commit_allowed() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();
        engine.set_mode(DrawingMode::Circle);
        engine.pointer_down(p(3.0, 3.0), &mut store);
        let id = engine.pointer_up(p(3.0, 3.0), &mut store).unwrap();
        let ShapeProperties::Circle(metrics) = store.get_object(id).unwrap().properties() else {
            panic!("expected circle");
        };
        assert!(metrics.radius.abs() < f64::EPSILON);
    }

    #[test]
    fn test_current_style_applied() {
        let mut engine = DrawingEngine::new();
        let mut store = ObjectStore::new();
        engine.current_style.stroke_width = 6.0;
        engine.set_mode(DrawingMode::Point);
        let id = engine.pointer_down(p(0.0, 0.0), &mut store).unwrap();
        assert!((store.get_object(id).unwrap().style.stroke_width - 6.0).abs() < f64::EPSILON);
    }
}
