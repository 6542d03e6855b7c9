//! Rendering: draws one room onto a drawing surface.
//!
//! This module never mutates application state. It reads a [`Room`] and
//! issues clear/fill/stroke calls against a [`Surface`], which the host backs
//! with whatever it draws on (a browser canvas, a text grid, a recorder in
//! tests). Blocks are drawn in insertion order so later blocks overlay earlier
//! ones, and the door is drawn last.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::doc::{Block, Room};
use crate::geom::Rect;

/// What a rectangle is painted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    /// A regular block that is switched off.
    BlockOff,
    /// A regular block that is switched on.
    BlockOn,
    /// A placeholder block.
    BlockEmpty,
    /// The room's door.
    Door,
    /// One-pixel outline around every element.
    Outline,
}

impl Paint {
    /// CSS color for this paint.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::BlockOff => "#0000FF",
            Self::BlockOn => "#00FF00",
            Self::BlockEmpty => "#808080",
            Self::Door => "#8B4513",
            Self::Outline => "#000000",
        }
    }

    /// Fill paint for a block in its current state.
    #[must_use]
    pub fn for_block(block: &Block) -> Self {
        if block.is_empty() {
            Self::BlockEmpty
        } else if block.is_on() {
            Self::BlockOn
        } else {
            Self::BlockOff
        }
    }
}

/// Minimal 2D drawing target.
pub trait Surface {
    /// Reset the whole drawing area to `width` x `height`.
    fn clear(&mut self, width: f64, height: f64);
    /// Fill `rect` with `paint`.
    fn fill_rect(&mut self, rect: Rect, paint: Paint);
    /// Outline `rect` with `paint`.
    fn stroke_rect(&mut self, rect: Rect, paint: Paint);
}

/// Draw the full room: clear, blocks bottom to top, then the door.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, room: &Room) {
    let size = room.size();
    surface.clear(size.width, size.height);

    for block in room.blocks() {
        let rect = block.rect();
        surface.fill_rect(rect, Paint::for_block(block));
        surface.stroke_rect(rect, Paint::Outline);
    }

    if let Some(door) = room.door() {
        let rect = door.rect();
        surface.fill_rect(rect, Paint::Door);
        surface.stroke_rect(rect, Paint::Outline);
    }
}

// =============================================================
// Recording surface
// =============================================================

/// A single recorded drawing call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    Fill { rect: Rect, paint: Paint },
    Stroke { rect: Rect, paint: Paint },
}

/// Surface that records every call, for hosts that replay them elsewhere.
#[derive(Debug, Clone, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl CommandList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the fill commands, in draw order.
    #[must_use]
    pub fn fills(&self) -> Vec<(Rect, Paint)> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Fill { rect, paint } => Some((*rect, *paint)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for CommandList {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, rect: Rect, paint: Paint) {
        self.commands.push(DrawCommand::Fill { rect, paint });
    }

    fn stroke_rect(&mut self, rect: Rect, paint: Paint) {
        self.commands.push(DrawCommand::Stroke { rect, paint });
    }
}
