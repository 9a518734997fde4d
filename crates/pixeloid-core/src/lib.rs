//! Pixeloid Core Library
//!
//! Platform-agnostic geometry editing on a pixeloid grid: coordinate spaces,
//! the object store, hit testing, and the drawing and drag state machines.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod coords;
pub mod editor;
pub mod error;
pub mod hit;
pub mod input;
pub mod interaction;
pub mod shapes;
pub mod tools;

pub use camera::Camera;
pub use canvas::{ListenerId, ObjectStore, ObjectUpdate, StoreEvent};
pub use config::EditorConfig;
pub use coords::{CellSize, PixeloidPoint, ScreenPoint, VertexPoint};
pub use editor::{Editor, EditorResponse, RenderState};
pub use error::{ConfigError, GeometryError, GeometryResult};
pub use hit::{HitTester, HitTolerance};
pub use input::{MouseButton, PixeloidEvent, PointerEvent, PointerPhase};
pub use interaction::{DragState, InteractionEngine};
pub use shapes::{Bounds, GeometricObject, ObjectId, PreviewObject, Shape, ShapeKind, ShapeProperties, ShapeStyle};
pub use tools::{DrawState, DrawingEngine, DrawingMode};
