//! Input abstraction layer.
//!
//! Normalizes pointer and wheel events into a single `PointerEvent` enum.
//! Every position here is in canvas space; conversion to graph space
//! happens only through the view transformation.

use arrows_core::{Point, Vector};

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    /// Toggle entities in and out of the selection instead of adding.
    pub fn multi_select(&self) -> bool {
        self.shift || self.ctrl || self.meta
    }

    /// Wheel zooms instead of panning (ctrl, or cmd on macOS).
    pub fn zoom(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down { position: Point, modifiers: Modifiers },
    Move { position: Point },
    Up,
    Wheel {
        position: Point,
        delta: Vector,
        modifiers: Modifiers,
    },
    DoubleClick { position: Point },
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::Down {
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::Move {
            position: Point::new(x, y),
        }
    }

    /// Position if the event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::Down { position, .. }
            | Self::Move { position }
            | Self::Wheel { position, .. }
            | Self::DoubleClick { position } => Some(*position),
            Self::Up => None,
        }
    }
}

/// Events that external interceptors can claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterceptedEvent {
    MouseMove,
    MouseUp,
}
