//! Input events forwarded by the host framework.

/// Pointer event phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

/// A pointer event in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    pub x: i32,
    pub y: i32,
    pub action: TouchAction,
}

impl TouchEvent {
    pub fn down(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            action: TouchAction::Down,
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            action: TouchAction::Move,
        }
    }

    pub fn up(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            action: TouchAction::Up,
        }
    }
}
