//! Room set: the ordered collection of rooms plus the current selection.
//!
//! DESIGN
//! ======
//! Rooms are owned by a map keyed by id; a separate vector records tab order
//! (creation/duplication order). The current selection is a lookup key, not
//! a reference, and is always either `None` (no rooms) or the id of a room in
//! the set.
//!
//! ERROR HANDLING
//! ==============
//! Every operation validates its inputs before touching state and reports a
//! refused edit as an [`EditError`]. Nothing is partially applied: a resize
//! with one bad dimension changes neither.

#[cfg(test)]
#[path = "rooms_test.rs"]
mod rooms_test;

use std::collections::HashMap;

use rand::Rng;
use tracing::warn;

use crate::consts::{
    COPY_SUFFIX, DEFAULT_BLOCK_SIDE, DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH, DOOR_LENGTH, MAX_ROOM_SIDE, MIN_ROOM_SIDE,
};
use crate::doc::{Block, BlockId, Door, Room, RoomId};
use crate::geom::{Point, Size};

// =============================================================================
// TYPES
// =============================================================================

/// Why an edit was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no room selected")]
    NoRoom,
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),
    #[error("block {0} is empty and has no on/off state")]
    EmptyBlock(BlockId),
    #[error("input cancelled")]
    Cancelled,
    #[error("invalid dimension: {0:?}")]
    InvalidDimension(String),
    #[error("room name must not be empty")]
    EmptyName,
}

/// Size policy for rooms and the blocks added to them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomLimits {
    /// Smallest side a resize may produce.
    pub min_side: u32,
    /// Largest side a resize may produce.
    pub max_side: u32,
    /// Width of a new room.
    pub default_width: u32,
    /// Height of a new room.
    pub default_height: u32,
    /// Side length of toolbar-added blocks.
    pub block_side: f64,
}

impl Default for RoomLimits {
    fn default() -> Self {
        Self {
            min_side: MIN_ROOM_SIDE,
            max_side: MAX_ROOM_SIDE,
            default_width: DEFAULT_ROOM_WIDTH,
            default_height: DEFAULT_ROOM_HEIGHT,
            block_side: DEFAULT_BLOCK_SIDE,
        }
    }
}

impl RoomLimits {
    /// Clamp one side length into `[min_side, max_side]`.
    #[must_use]
    pub fn clamp_side(&self, value: i64) -> u32 {
        let clamped = value.max(i64::from(self.min_side)).min(i64::from(self.max_side));
        u32::try_from(clamped).unwrap_or(self.min_side)
    }

    /// Whether every room these limits allow can hold a toolbar block and a
    /// door, and new rooms start inside the range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let smallest_content = self.block_side.max(DOOR_LENGTH);
        let in_range = |side: u32| (self.min_side..=self.max_side).contains(&side);
        self.block_side > 0.0
            && f64::from(self.min_side) >= smallest_content
            && self.min_side <= self.max_side
            && in_range(self.default_width)
            && in_range(self.default_height)
    }
}

/// One entry of the tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: RoomId,
    pub name: String,
    pub is_current: bool,
}

/// Parse a raw prompt value into a side length.
///
/// `None` means the prompt was cancelled. Only the leading integer counts, so
/// `"700.9"` reads as 700 and `"1e3"` as 1.
///
/// # Errors
///
/// Returns `Cancelled` for `None` and `InvalidDimension` when the text does
/// not start with a number.
pub fn parse_dimension(raw: Option<&str>) -> Result<i64, EditError> {
    let raw = raw.ok_or(EditError::Cancelled)?;
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return Err(EditError::InvalidDimension(raw.to_string()));
    }
    // Digits past i64 range clamp to the max side anyway.
    let magnitude = unsigned[..len].parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -magnitude } else { magnitude })
}

// =============================================================================
// ROOM SET
// =============================================================================

/// Ordered rooms plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct RoomSet {
    rooms: HashMap<RoomId, Room>,
    order: Vec<RoomId>,
    current: Option<RoomId>,
    limits: RoomLimits,
}

impl RoomSet {
    /// An empty set with the given size policy.
    #[must_use]
    pub fn new(limits: RoomLimits) -> Self {
        Self { rooms: HashMap::new(), order: Vec::new(), current: None, limits }
    }

    /// The startup fallback: one room named "Room 1" with the default door.
    #[must_use]
    pub fn with_default_room(limits: RoomLimits) -> Self {
        let mut set = Self::new(limits);
        let mut room = Room::new("Room 1", limits.default_width, limits.default_height);
        room.set_door(Some(Door::default_for_room()));
        set.insert(room);
        set
    }

    /// Build a set from rooms in tab order.
    ///
    /// A `current` id that is missing from `rooms` falls back to the first
    /// room. Rooms with a duplicate id are dropped after the first. Each room
    /// is conformed to `limits`: sides clamped, blocks pulled inside, the door
    /// put back on its edge.
    #[must_use]
    pub fn from_rooms(rooms: Vec<Room>, current: Option<RoomId>, limits: RoomLimits) -> Self {
        let mut set = Self::new(limits);
        for mut room in rooms {
            if set.rooms.contains_key(&room.id()) {
                continue;
            }
            let width = limits.clamp_side(i64::from(room.width()));
            let height = limits.clamp_side(i64::from(room.height()));
            let dropped = room.conform(width, height);
            if dropped > 0 {
                warn!(room = %room.id(), dropped, "blocks larger than their room discarded");
            }
            set.insert(room);
        }
        set.current = current
            .filter(|id| set.rooms.contains_key(id))
            .or_else(|| set.order.first().copied());
        set
    }

    fn insert(&mut self, room: Room) -> RoomId {
        let id = room.id();
        self.order.push(id);
        self.rooms.insert(id, room);
        self.current = Some(id);
        id
    }

    // --- Queries ---

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn current_id(&self) -> Option<RoomId> {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> Option<&Room> {
        self.current.and_then(|id| self.rooms.get(&id))
    }

    pub fn current_mut(&mut self) -> Option<&mut Room> {
        let id = self.current?;
        self.rooms.get_mut(&id)
    }

    #[must_use]
    pub fn get(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Rooms in tab order.
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.order.iter().filter_map(|id| self.rooms.get(id))
    }

    /// Id of the room at tab position `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<RoomId> {
        self.order.get(index).copied()
    }

    /// The tab strip, in order.
    #[must_use]
    pub fn tabs(&self) -> Vec<Tab> {
        self.iter()
            .map(|room| Tab {
                id: room.id(),
                name: room.name().to_string(),
                is_current: Some(room.id()) == self.current,
            })
            .collect()
    }

    fn room_mut(&mut self, id: &RoomId) -> Result<&mut Room, EditError> {
        if self.order.is_empty() {
            return Err(EditError::NoRoom);
        }
        self.rooms.get_mut(id).ok_or(EditError::RoomNotFound(*id))
    }

    // --- Rooms ---

    /// Switch the current room.
    ///
    /// # Errors
    ///
    /// Returns `RoomNotFound` if no room has this id.
    pub fn select(&mut self, id: &RoomId) -> Result<(), EditError> {
        if !self.rooms.contains_key(id) {
            return Err(EditError::RoomNotFound(*id));
        }
        self.current = Some(*id);
        Ok(())
    }

    /// Append a default-sized room with a door on its left edge and select it.
    pub fn create_room(&mut self) -> RoomId {
        let name = format!("Room {}", self.order.len() + 1);
        let mut room = Room::new(name, self.limits.default_width, self.limits.default_height);
        room.set_door(Some(Door::default_for_room()));
        self.insert(room)
    }

    /// Change a room's dimensions, clamping each side into the configured range.
    ///
    /// Returns the dimensions actually applied.
    ///
    /// # Errors
    ///
    /// Returns `NoRoom` / `RoomNotFound` if the room does not exist.
    pub fn resize_room(&mut self, id: &RoomId, width: i64, height: i64) -> Result<(u32, u32), EditError> {
        let width = self.limits.clamp_side(width);
        let height = self.limits.clamp_side(height);
        self.room_mut(id)?.resize(width, height);
        Ok((width, height))
    }

    /// Rename a room.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` for blank input, `NoRoom` / `RoomNotFound` if the
    /// room does not exist.
    pub fn rename_room(&mut self, id: &RoomId, name: &str) -> Result<(), EditError> {
        if name.trim().is_empty() {
            return Err(EditError::EmptyName);
        }
        self.room_mut(id)?.rename(name);
        Ok(())
    }

    /// Deep-copy a room (block ids included) to the end of the tab strip and
    /// select the copy.
    ///
    /// # Errors
    ///
    /// Returns `NoRoom` / `RoomNotFound` if the room does not exist.
    pub fn duplicate_room(&mut self, id: &RoomId) -> Result<RoomId, EditError> {
        let source = self.room_mut(id)?;
        let name = format!("{}{COPY_SUFFIX}", source.name());
        let copy = source.duplicate(name);
        Ok(self.insert(copy))
    }

    /// Remove a room. If it was current, the first remaining room (or none)
    /// becomes current.
    ///
    /// # Errors
    ///
    /// Returns `NoRoom` / `RoomNotFound` if the room does not exist.
    pub fn delete_room(&mut self, id: &RoomId) -> Result<Room, EditError> {
        if self.order.is_empty() {
            return Err(EditError::NoRoom);
        }
        let room = self.rooms.remove(id).ok_or(EditError::RoomNotFound(*id))?;
        self.order.retain(|other| other != id);
        if self.current == Some(*id) {
            self.current = self.order.first().copied();
        }
        Ok(room)
    }

    /// Give the current room the default door if it has none.
    ///
    /// Returns `true` when a door was added.
    pub fn ensure_current_door(&mut self) -> bool {
        match self.current_mut() {
            Some(room) if room.door().is_none() => {
                room.set_door(Some(Door::default_for_room()));
                true
            }
            _ => false,
        }
    }

    // --- Blocks ---

    /// Add an "off" block at a random position fully inside the room.
    ///
    /// # Errors
    ///
    /// Returns `NoRoom` / `RoomNotFound` if the room does not exist.
    pub fn add_block<R: Rng + ?Sized>(&mut self, id: &RoomId, rng: &mut R) -> Result<BlockId, EditError> {
        self.place_block(id, rng, Block::new)
    }

    /// Add an empty placeholder block at a random position fully inside the room.
    ///
    /// # Errors
    ///
    /// Returns `NoRoom` / `RoomNotFound` if the room does not exist.
    pub fn add_empty_block<R: Rng + ?Sized>(&mut self, id: &RoomId, rng: &mut R) -> Result<BlockId, EditError> {
        self.place_block(id, rng, Block::new_empty)
    }

    fn place_block<R, F>(&mut self, id: &RoomId, rng: &mut R, make: F) -> Result<BlockId, EditError>
    where
        R: Rng + ?Sized,
        F: FnOnce(Point, Size) -> Block,
    {
        let side = self.limits.block_side;
        let room = self.room_mut(id)?;
        let bounds = room.size();
        let origin = Point::new(
            rng.random::<f64>() * (bounds.width - side).max(0.0),
            rng.random::<f64>() * (bounds.height - side).max(0.0),
        );
        let block = make(origin, Size::new(side, side));
        let block_id = block.id();
        room.push_block(block);
        Ok(block_id)
    }

    /// Flip a block between on and off. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `EmptyBlock` for placeholder blocks, `BlockNotFound` for an
    /// unknown block, `NoRoom` / `RoomNotFound` if the room does not exist.
    pub fn toggle_block(&mut self, id: &RoomId, block_id: &BlockId) -> Result<bool, EditError> {
        let room = self.room_mut(id)?;
        let block = room.block(block_id).ok_or(EditError::BlockNotFound(*block_id))?;
        if block.is_empty() {
            return Err(EditError::EmptyBlock(*block_id));
        }
        room.toggle_block(block_id);
        Ok(room.block(block_id).is_some_and(Block::is_on))
    }

    /// Remove a block, whether empty or not.
    ///
    /// # Errors
    ///
    /// Returns `BlockNotFound` for an unknown block, `NoRoom` /
    /// `RoomNotFound` if the room does not exist.
    pub fn delete_block(&mut self, id: &RoomId, block_id: &BlockId) -> Result<Block, EditError> {
        self.room_mut(id)?
            .remove_block(block_id)
            .ok_or(EditError::BlockNotFound(*block_id))
    }
}
