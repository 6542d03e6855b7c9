#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{BlockId, Room};
use crate::geom::Point;

/// What sits under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Block(BlockId),
    Door,
}

/// Test which element (if any) of `room` is under `pt`.
///
/// Blocks are checked first, in insertion order, and the first one whose
/// rectangle contains the point wins. The door is only considered when no
/// block matched.
#[must_use]
pub fn hit_test(pt: Point, room: &Room) -> Option<Hit> {
    if let Some(block) = hit_block(pt, room) {
        return Some(Hit::Block(block));
    }
    room.door()
        .filter(|door| door.rect().contains(pt))
        .map(|_| Hit::Door)
}

/// The first block under `pt`, ignoring the door.
#[must_use]
pub fn hit_block(pt: Point, room: &Room) -> Option<BlockId> {
    room.blocks()
        .iter()
        .find(|b| b.rect().contains(pt))
        .map(crate::doc::Block::id)
}
