//! Error types for the editor core.

use crate::shapes::ShapeKind;
use thiserror::Error;

/// A broken shape or coordinate contract.
///
/// These are programmer errors: well-formed callers never produce them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{kind} requires {expected} vertices, got {actual}")]
    VertexCount {
        kind: ShapeKind,
        expected: usize,
        actual: usize,
    },
    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
    #[error("zoom range {min}..{max} is empty")]
    InvalidZoomRange { min: f64, max: f64 },
    #[error("cell size {size} outside zoom range {min}..{max}")]
    CellSizeOutOfRange { size: f64, min: f64, max: f64 },
}

/// Errors raised while loading an [`EditorConfig`](crate::config::EditorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
