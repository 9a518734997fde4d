//! Editor state: routes pointer input to the drawing or interaction engine.

use crate::camera::Camera;
use crate::canvas::{ObjectStore, ObjectUpdate};
use crate::config::EditorConfig;
use crate::coords::{self, PixeloidPoint, ScreenPoint};
use crate::error::{ConfigError, GeometryResult};
use crate::hit::HitTester;
use crate::input::{MouseButton, PixeloidEvent, PointerEvent, PointerPhase};
use crate::interaction::InteractionEngine;
use crate::shapes::{GeometricObject, ObjectId, PreviewObject};
use crate::tools::{DrawingEngine, DrawingMode};

/// What a handled event changed, for the host to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorResponse {
    /// Object created or moved by this event.
    pub committed: Option<ObjectId>,
    /// Object the user asked to edit (context action).
    pub edit_requested: Option<ObjectId>,
    /// Whether anything visible changed.
    pub needs_redraw: bool,
}

impl EditorResponse {
    fn redraw() -> Self {
        Self { needs_redraw: true, ..Self::default() }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderState<'a> {
    /// Stored objects, back to front.
    pub objects: &'a [GeometricObject],
    /// Draw or drag preview to composite over the stored objects.
    pub preview: Option<&'a PreviewObject>,
    pub selected: Option<ObjectId>,
    pub camera: &'a Camera,
}

/// Runtime editor state (not persisted).
#[derive(Debug)]
pub struct Editor {
    /// The authoritative object list.
    pub store: ObjectStore,
    /// Navigation offset and cell size.
    pub camera: Camera,
    drawing: DrawingEngine,
    interaction: InteractionEngine,
    config: EditorConfig,
    /// Last screen position of a middle-button pan.
    pan_anchor: Option<ScreenPoint>,
}

impl Editor {
    /// Create an editor from a config, validating it first.
    pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let camera = config.camera()?;
        let mut drawing = DrawingEngine::new();
        drawing.current_style = config.default_style.clone();
        drawing.diamond = config.diamond;
        let interaction = InteractionEngine::new(HitTester::new(config.hit), config.double_click_window());
        Ok(Self {
            store: ObjectStore::new(),
            camera,
            drawing,
            interaction,
            config,
            pan_anchor: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn drawing(&self) -> &DrawingEngine {
        &self.drawing
    }

    /// Mutable access for changing the current style or diamond policy.
    pub fn drawing_mut(&mut self) -> &mut DrawingEngine {
        &mut self.drawing
    }

    pub fn interaction(&self) -> &InteractionEngine {
        &self.interaction
    }

    pub fn drawing_mode(&self) -> DrawingMode {
        self.drawing.mode()
    }

    /// Arm a drawing mode. Any draw or drag in flight is cancelled.
    pub fn set_drawing_mode(&mut self, mode: DrawingMode) {
        self.drawing.set_mode(mode);
        self.interaction.cancel();
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.interaction.selected()
    }

    pub fn clear_selection(&mut self) {
        self.interaction.clear_selection();
    }

    /// Discard in-flight previews when the canvas loses focus.
    pub fn focus_lost(&mut self) {
        self.drawing.cancel();
        self.interaction.cancel();
        self.pan_anchor = None;
    }

    /// The preview to draw over the stored objects, if a gesture is in flight.
    pub fn preview(&self) -> Option<&PreviewObject> {
        self.drawing.preview().or_else(|| self.interaction.drag_preview())
    }

    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            objects: self.store.all_objects(),
            preview: self.preview(),
            selected: self.selected(),
            camera: &self.camera,
        }
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&GeometricObject> {
        self.store.get_object(id)
    }

    /// Entry point for external edit forms.
    pub fn update_object(&mut self, id: ObjectId, update: ObjectUpdate) -> GeometryResult<bool> {
        self.store.update_object(id, update)
    }

    /// Delete the selected object. Returns whether anything was removed.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.interaction.selected() else {
            return false;
        };
        self.interaction.clear_selection();
        self.store.remove_object(id).is_some()
    }

    /// Remove every object and reset selection.
    pub fn clear_all(&mut self) {
        self.focus_lost();
        self.interaction.clear_selection();
        self.store.clear();
    }

    /// Handle a raw pointer event in screen space.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> EditorResponse {
        match event {
            PointerEvent::Down { position, button: MouseButton::Right } => {
                let point = self.camera.screen_to_pixeloid(position);
                self.context_click(point)
            }
            PointerEvent::Down { position, button: MouseButton::Middle } => {
                self.pan_anchor = Some(position);
                EditorResponse::default()
            }
            PointerEvent::Up { button: MouseButton::Middle, .. } => {
                self.pan_anchor = None;
                EditorResponse::default()
            }
            PointerEvent::Move { position } if self.pan_anchor.is_some() => {
                if let Some(anchor) = self.pan_anchor.replace(position) {
                    self.camera.pan_screen(position - anchor);
                }
                EditorResponse::redraw()
            }
            PointerEvent::Scroll { position, delta } => {
                if delta.y.abs() < f64::EPSILON {
                    return EditorResponse::default();
                }
                let factor = if delta.y > 0.0 {
                    self.config.zoom_step
                } else {
                    1.0 / self.config.zoom_step
                };
                self.camera.zoom_at(position, factor);
                EditorResponse::redraw()
            }
            _ => match event.to_pixeloid(&self.camera) {
                Some(converted) => self.handle_pixeloid_event(converted),
                None => EditorResponse::default(),
            },
        }
    }

    /// Handle a primary-pointer event already in pixeloid space.
    ///
    /// Drawing mode takes precedence: while a mode is armed, input never
    /// reaches selection even if an object lies under the pointer.
    pub fn handle_pixeloid_event(&mut self, event: PixeloidEvent) -> EditorResponse {
        if self.drawing.mode().is_drawing() {
            self.route_to_drawing(event)
        } else {
            self.route_to_interaction(event)
        }
    }

    /// Select the object under `point` and ask the host to open its editor.
    ///
    /// Ignored while a drawing mode is armed.
    pub fn context_click(&mut self, point: PixeloidPoint) -> EditorResponse {
        if self.drawing.mode().is_drawing() {
            log::debug!("Ignoring context click in {:?} mode", self.drawing.mode());
            return EditorResponse::default();
        }
        match self.interaction.context_click(point, &self.store) {
            Some(id) => EditorResponse {
                edit_requested: Some(id),
                ..EditorResponse::redraw()
            },
            None => EditorResponse::default(),
        }
    }

    fn route_to_drawing(&mut self, event: PixeloidEvent) -> EditorResponse {
        let point = if self.config.snap_drawing {
            coords::snap_to_integer(event.point)
        } else {
            event.point
        };
        match event.phase {
            PointerPhase::Down => {
                let was_active = self.drawing.is_active();
                let committed = self.drawing.pointer_down(point, &mut self.store);
                EditorResponse {
                    committed,
                    needs_redraw: committed.is_some() || (!was_active && self.drawing.is_active()),
                    ..EditorResponse::default()
                }
            }
            PointerPhase::Move => EditorResponse {
                needs_redraw: self.drawing.pointer_move(point),
                ..EditorResponse::default()
            },
            PointerPhase::Up => {
                let committed = self.drawing.pointer_up(point, &mut self.store);
                EditorResponse {
                    committed,
                    needs_redraw: committed.is_some(),
                    ..EditorResponse::default()
                }
            }
        }
    }

    fn route_to_interaction(&mut self, event: PixeloidEvent) -> EditorResponse {
        match event.phase {
            PointerPhase::Down => {
                let before = self.interaction.selected();
                self.interaction.pointer_down(event.point, &self.store);
                EditorResponse {
                    needs_redraw: before != self.interaction.selected(),
                    ..EditorResponse::default()
                }
            }
            PointerPhase::Move => EditorResponse {
                needs_redraw: self.interaction.pointer_move(event.point, &self.store),
                ..EditorResponse::default()
            },
            PointerPhase::Up => {
                let committed = self.interaction.pointer_up(event.point, &mut self.store);
                EditorResponse {
                    committed,
                    needs_redraw: committed.is_some(),
                    ..EditorResponse::default()
                }
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self {
            store: ObjectStore::new(),
            camera: Camera::new(),
            drawing: DrawingEngine::new(),
            interaction: InteractionEngine::default(),
            config: EditorConfig::default(),
            pan_anchor: None,
        }
    }
}
