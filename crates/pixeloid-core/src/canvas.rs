//! Object store: the authoritative list of geometric objects.

use crate::coords::PixeloidPoint;
use crate::error::GeometryResult;
use crate::shapes::{Bounds, GeometricObject, ObjectId, SerializableColor, Shape, ShapeKind, ShapeStyle};
use std::fmt;

/// A committed change to the store, delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Added(ObjectId),
    Removed(ObjectId),
    Updated(ObjectId),
    Cleared,
}

/// Handle returned by [`ObjectStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// A partial update merged into an existing object. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectUpdate {
    pub vertices: Option<Vec<PixeloidPoint>>,
    pub stroke_color: Option<SerializableColor>,
    pub stroke_width: Option<f64>,
    pub stroke_alpha: Option<f64>,
    /// `Some(None)` removes the fill.
    pub fill_color: Option<Option<SerializableColor>>,
    pub fill_alpha: Option<Option<f64>>,
    pub visible: Option<bool>,
}

impl ObjectUpdate {
    pub fn vertices(vertices: Vec<PixeloidPoint>) -> Self {
        Self { vertices: Some(vertices), ..Self::default() }
    }

    pub fn visibility(visible: bool) -> Self {
        Self { visible: Some(visible), ..Self::default() }
    }

    /// Replace every style field with the values from `style`.
    pub fn style(style: &ShapeStyle) -> Self {
        Self {
            stroke_color: Some(style.stroke_color),
            stroke_width: Some(style.stroke_width),
            stroke_alpha: Some(style.stroke_alpha),
            fill_color: Some(style.fill_color),
            fill_alpha: Some(style.fill_alpha),
            visible: Some(style.visible),
            ..Self::default()
        }
    }

    /// Whether this update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply_style(&self, style: &mut ShapeStyle) {
        if let Some(color) = self.stroke_color {
            style.stroke_color = color;
        }
        if let Some(width) = self.stroke_width {
            style.stroke_width = width;
        }
        if let Some(alpha) = self.stroke_alpha {
            style.stroke_alpha = alpha;
        }
        if let Some(fill) = self.fill_color {
            style.fill_color = fill;
        }
        if let Some(alpha) = self.fill_alpha {
            style.fill_alpha = alpha;
        }
        if let Some(visible) = self.visible {
            style.visible = visible;
        }
    }
}

/// Owns every stored object in draw order (back to front) and notifies
/// subscribers after each committed mutation.
#[derive(Default)]
pub struct ObjectStore {
    objects: Vec<GeometricObject>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStore")
            .field("objects", &self.objects)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a new object, returning its fresh id.
    pub fn add_object(&mut self, kind: ShapeKind, vertices: Vec<PixeloidPoint>, style: ShapeStyle) -> GeometryResult<ObjectId> {
        let shape = Shape::new(kind, vertices)?;
        Ok(self.add_shape(shape, style))
    }

    /// Append an already-validated shape.
    pub fn add_shape(&mut self, shape: Shape, style: ShapeStyle) -> ObjectId {
        let object = GeometricObject::new(shape, style);
        let id = object.id();
        log::debug!("Added {} {}", object.kind(), id);
        self.objects.push(object);
        self.notify(StoreEvent::Added(id));
        id
    }

    /// Remove an object. Absent ids are a no-op: a concurrent action may
    /// already have deleted it.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<GeometricObject> {
        let Some(index) = self.index_of(id) else {
            log::warn!("remove_object: no object with id {id}");
            return None;
        };
        let removed = self.objects.remove(index);
        log::debug!("Removed {} {}", removed.kind(), id);
        self.notify(StoreEvent::Removed(id));
        Some(removed)
    }

    /// Merge a partial update into an object.
    ///
    /// Returns `Ok(false)` when the id is absent (stale reference, logged)
    /// and `Err` when the new vertex list breaks the kind's vertex count.
    /// A rejected update leaves the object untouched. An empty update
    /// notifies no one.
    pub fn update_object(&mut self, id: ObjectId, mut update: ObjectUpdate) -> GeometryResult<bool> {
        let Some(index) = self.index_of(id) else {
            log::warn!("update_object: no object with id {id}");
            return Ok(false);
        };
        if update.is_empty() {
            return Ok(true);
        }
        let object = &mut self.objects[index];
        if let Some(vertices) = update.vertices.take() {
            object.shape.set_vertices(vertices)?;
        }
        update.apply_style(&mut object.style);
        log::debug!("Updated {} {}", object.kind(), id);
        self.notify(StoreEvent::Updated(id));
        Ok(true)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&GeometricObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    /// All objects in draw order (back to front).
    pub fn all_objects(&self) -> &[GeometricObject] {
        &self.objects
    }

    /// Objects whose bounds touch `area`, in draw order. Used for viewport culling.
    pub fn objects_in(&self, area: &Bounds) -> impl Iterator<Item = &GeometricObject> {
        let area = *area;
        self.objects.iter().filter(move |o| o.bounds().intersects(&area))
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        if self.objects.is_empty() {
            return;
        }
        log::debug!("Cleared {} objects", self.objects.len());
        self.objects.clear();
        self.notify(StoreEvent::Cleared);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Bounding box of every stored object, or `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.objects
            .iter()
            .map(GeometricObject::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Register a listener called after every committed mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    fn notify(&mut self, event: StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

/// Axis-aligned bounding box over an arbitrary vertex list.
///
/// An empty list yields a zero-sized box at the origin.
pub fn compute_bounds(vertices: &[PixeloidPoint]) -> Bounds {
    Bounds::from_points(vertices)
}
