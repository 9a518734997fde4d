//! Selection and drag state machine, active while no drawing mode is armed.
//!
//! A single click selects. A double click on the same object arms it; the
//! next pointer move starts a drag, and the pointer-up after that commits.

use crate::canvas::{ObjectStore, ObjectUpdate};
use crate::coords::PixeloidPoint;
use crate::hit::HitTester;
use crate::shapes::{ObjectId, PreviewObject};
use kurbo::Vec2;
use std::time::Duration;

// Use web-time on WASM, std::time otherwise
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Default double-click window.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// An in-flight drag of one stored object.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// The object being moved.
    pub object_id: ObjectId,
    /// Pointer position the drag started at.
    pub start_point: PixeloidPoint,
    /// Per-vertex offset from the pointer, captured at drag start.
    pub vertex_offsets: Vec<Vec2>,
    /// Translated copy of the object, not yet committed.
    pub preview: PreviewObject,
}

impl DragState {
    fn begin(preview: PreviewObject, object_id: ObjectId, point: PixeloidPoint) -> Self {
        let vertex_offsets = preview.shape.vertices().iter().map(|&v| v - point).collect();
        Self {
            object_id,
            start_point: point,
            vertex_offsets,
            preview,
        }
    }

    /// Vertices with the pointer at `point`. Each is `point + offset`, so the
    /// result does not depend on how many moves came before.
    fn vertices_at(&self, point: PixeloidPoint) -> Vec<PixeloidPoint> {
        self.vertex_offsets.iter().map(|&offset| point + offset).collect()
    }

    fn move_to(&mut self, point: PixeloidPoint) {
        let vertices = self.vertices_at(point);
        if let Err(err) = self.preview.shape.set_vertices(vertices) {
            log::warn!("Drag preview rejected: {err}");
        }
    }
}

/// Click, double-click and drag bookkeeping.
#[derive(Debug, Clone)]
pub struct InteractionEngine {
    hit_tester: HitTester,
    double_click_window: Duration,
    last_click_time: Option<Instant>,
    last_clicked_id: Option<ObjectId>,
    selected: Option<ObjectId>,
    /// Object armed by a double click; the next move starts dragging it.
    armed: Option<ObjectId>,
    drag: Option<DragState>,
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new(HitTester::default(), DOUBLE_CLICK_WINDOW)
    }
}

impl InteractionEngine {
    pub fn new(hit_tester: HitTester, double_click_window: Duration) -> Self {
        Self {
            hit_tester,
            double_click_window,
            last_click_time: None,
            last_clicked_id: None,
            selected: None,
            armed: None,
            drag: None,
        }
    }

    pub fn hit_tester(&self) -> &HitTester {
        &self.hit_tester
    }

    /// Currently selected object, if any.
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn select(&mut self, id: ObjectId) {
        if self.armed.is_some_and(|armed| armed != id) {
            self.armed = None;
        }
        self.selected = Some(id);
    }

    /// Clear the selection, disarming and dropping any drag in flight.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.cancel();
    }

    /// Drop any drag preview and arming without touching the store.
    pub fn cancel(&mut self) {
        if self.drag.is_some() {
            log::debug!("Drag cancelled");
        }
        self.drag = None;
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// The uncommitted, translated copy of the dragged object.
    pub fn drag_preview(&self) -> Option<&PreviewObject> {
        self.drag.as_ref().map(|d| &d.preview)
    }

    /// Handle a primary-button press. Returns the hit object, if any.
    pub fn pointer_down(&mut self, point: PixeloidPoint, store: &ObjectStore) -> Option<ObjectId> {
        self.pointer_down_at(point, store, Instant::now())
    }

    /// [`pointer_down`](Self::pointer_down) with an explicit timestamp.
    pub fn pointer_down_at(&mut self, point: PixeloidPoint, store: &ObjectStore, now: Instant) -> Option<ObjectId> {
        if self.drag.is_some() {
            // The release that follows drops the dragged object
            return self.drag.as_ref().map(|d| d.object_id);
        }

        let Some(hit) = self.hit_tester.hit_test(point, store.all_objects()) else {
            self.clear_selection();
            self.last_click_time = None;
            self.last_clicked_id = None;
            return None;
        };

        let is_double = self.last_clicked_id == Some(hit)
            && self
                .last_click_time
                .is_some_and(|last| now.saturating_duration_since(last) <= self.double_click_window);

        self.select(hit);
        if is_double {
            log::debug!("Double click armed {hit} for drag");
            self.armed = Some(hit);
            // A third click starts a fresh click sequence
            self.last_click_time = None;
            self.last_clicked_id = None;
        } else {
            self.armed = None;
            self.last_click_time = Some(now);
            self.last_clicked_id = Some(hit);
        }
        Some(hit)
    }

    /// Handle pointer motion. Returns whether the drag preview changed.
    pub fn pointer_move(&mut self, point: PixeloidPoint, store: &ObjectStore) -> bool {
        if let Some(drag) = &mut self.drag {
            drag.move_to(point);
            return true;
        }

        let Some(armed) = self.armed else {
            return false;
        };
        let Some(object) = store.get_object(armed) else {
            log::warn!("Armed object {armed} no longer exists");
            self.armed = None;
            return false;
        };
        let preview = PreviewObject {
            shape: object.shape.clone(),
            style: object.style.clone(),
            source: Some(armed),
        };
        self.drag = Some(DragState::begin(preview, armed, point));
        log::debug!("Drag started on {armed}");
        true
    }

    /// Handle a primary-button release. Commits a drag in flight and
    /// returns the moved object's id; a plain click release changes nothing.
    pub fn pointer_up(&mut self, point: PixeloidPoint, store: &mut ObjectStore) -> Option<ObjectId> {
        let mut drag = self.drag.take()?;
        self.armed = None;
        drag.move_to(point);

        let vertices = drag.preview.shape.vertices().to_vec();
        match store.update_object(drag.object_id, ObjectUpdate::vertices(vertices)) {
            Ok(true) => Some(drag.object_id),
            Ok(false) => None,
            Err(err) => {
                log::warn!("Drag commit rejected: {err}");
                None
            }
        }
    }

    /// Context action: select the object under `point` and return it so the
    /// caller can open an edit surface.
    pub fn context_click(&mut self, point: PixeloidPoint, store: &ObjectStore) -> Option<ObjectId> {
        let hit = self.hit_tester.hit_test(point, store.all_objects())?;
        self.select(hit);
        Some(hit)
    }
}
