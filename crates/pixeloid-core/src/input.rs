//! Pointer events in screen space and the converted pixeloid stream.

use crate::camera::Camera;
use crate::coords::{PixeloidPoint, ScreenPoint};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Raw pointer event as delivered by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: ScreenPoint,
        button: MouseButton,
    },
    Up {
        position: ScreenPoint,
        button: MouseButton,
    },
    Move {
        position: ScreenPoint,
    },
    Scroll {
        position: ScreenPoint,
        delta: Vec2,
    },
}

impl PointerEvent {
    pub fn position(&self) -> ScreenPoint {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Scroll { position, .. } => position,
        }
    }

    /// The pixeloid-space equivalent of a primary-button event, if this is one.
    pub fn to_pixeloid(&self, camera: &Camera) -> Option<PixeloidEvent> {
        let phase = match *self {
            PointerEvent::Down { button: MouseButton::Left, .. } => PointerPhase::Down,
            PointerEvent::Up { button: MouseButton::Left, .. } => PointerPhase::Up,
            PointerEvent::Move { .. } => PointerPhase::Move,
            _ => return None,
        };
        Some(PixeloidEvent {
            phase,
            point: camera.screen_to_pixeloid(self.position()),
        })
    }
}

/// Phase of a primary-pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A pointer event already converted to pixeloid space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixeloidEvent {
    pub phase: PointerPhase,
    pub point: PixeloidPoint,
}

impl PixeloidEvent {
    pub fn down(point: PixeloidPoint) -> Self {
        Self { phase: PointerPhase::Down, point }
    }

    pub fn moved(point: PixeloidPoint) -> Self {
        Self { phase: PointerPhase::Move, point }
    }

    pub fn up(point: PixeloidPoint) -> Self {
        Self { phase: PointerPhase::Up, point }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_events_convert() {
        let mut camera = Camera::with_cell_size(2.0, 1.0, 10.0).unwrap();
        camera.offset = Vec2::new(100.0, 0.0);

        let event = PointerEvent::Down {
            position: ScreenPoint::new(10.0, 20.0),
            button: MouseButton::Left,
        };
        assert_eq!(
            event.to_pixeloid(&camera),
            Some(PixeloidEvent::down(PixeloidPoint::new(105.0, 10.0)))
        );

        let event = PointerEvent::Move { position: ScreenPoint::new(0.0, 0.0) };
        assert_eq!(
            event.to_pixeloid(&camera),
            Some(PixeloidEvent::moved(PixeloidPoint::new(100.0, 0.0)))
        );
    }

    #[test]
    fn test_other_buttons_do_not_convert() {
        let camera = Camera::new();
        let right = PointerEvent::Down {
            position: ScreenPoint::ORIGIN,
            button: MouseButton::Right,
        };
        assert!(right.to_pixeloid(&camera).is_none());

        let scroll = PointerEvent::Scroll {
            position: ScreenPoint::new(3.0, 4.0),
            delta: Vec2::new(0.0, 1.0),
        };
        assert!(scroll.to_pixeloid(&camera).is_none());
        assert_eq!(scroll.position(), ScreenPoint::new(3.0, 4.0));
    }
}
