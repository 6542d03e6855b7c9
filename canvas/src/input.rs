//! Input model: mouse buttons and the drag state machine.
//!
//! `DragState` is the gesture being tracked between pointer-down and
//! pointer-up. It names what is being dragged by id rather than by reference,
//! so the engine can re-resolve it against the current room on every move and
//! drop the gesture if the target vanished. It is transient and never saved.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::BlockId;
use crate::geom::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next primary press.
    #[default]
    Idle,
    /// A block is following the pointer.
    DraggingBlock {
        /// Id of the block being dragged.
        id: BlockId,
        /// Pointer position minus block origin, captured at press time so the
        /// block does not jump under the cursor.
        grab_offset: Point,
    },
    /// The door is following the pointer, snapping to room edges.
    DraggingDoor {
        /// Pointer position minus door origin at press time.
        grab_offset: Point,
    },
}

impl DragState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The origin the dragged element should aim for with the pointer at `pt`.
    #[must_use]
    pub fn target(&self, pt: Point) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::DraggingBlock { grab_offset, .. } | Self::DraggingDoor { grab_offset } => Some(pt.sub(*grab_offset)),
        }
    }
}
