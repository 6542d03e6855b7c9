//! Document model: blocks, doors and the rooms that own them.
//!
//! A [`Room`] is the unit the editor works on. It owns an insertion-ordered
//! list of [`Block`]s and at most one [`Door`], and it is the only place that
//! mutates their geometry, so the containment rules live here:
//!
//! - every block satisfies `0 <= x <= room.width - block.width` (same for y);
//! - the door's size always matches its [`Edge`] and the door lies flush
//!   against that edge, fully inside the room along the free axis.
//!
//! Field names on the wire are camelCase (`isOn`, `isEmpty`).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_DOOR_OFFSET, DOOR_LENGTH, DOOR_THICKNESS, SNAP_MARGIN_PX};
use crate::geom::{Point, Rect, Size, clamp_span};

/// Unique identifier for a block. Only guaranteed unique within one room.
pub type BlockId = Uuid;

/// Unique identifier for a room.
pub type RoomId = Uuid;

// =============================================================================
// BLOCK
// =============================================================================

/// A rectangular element placed inside a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    id: BlockId,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    /// Switch state. Meaningless when `is_empty` is set.
    is_on: bool,
    /// Placeholder block: no on/off semantics, can only be deleted.
    is_empty: bool,
}

impl Block {
    /// Create an "off" block with a fresh id.
    #[must_use]
    pub fn new(origin: Point, size: Size) -> Self {
        Self::with_id(Uuid::new_v4(), origin, size, false, false)
    }

    /// Create an empty placeholder block with a fresh id.
    #[must_use]
    pub fn new_empty(origin: Point, size: Size) -> Self {
        Self::with_id(Uuid::new_v4(), origin, size, false, true)
    }

    /// Create a block with every field given explicitly.
    ///
    /// Size is not validated; callers pass positive dimensions.
    #[must_use]
    pub fn with_id(id: BlockId, origin: Point, size: Size, is_on: bool, is_empty: bool) -> Self {
        Self { id, x: origin.x, y: origin.y, width: size.width, height: size.height, is_on, is_empty }
    }

    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[must_use]
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Move the top-left corner. The caller is responsible for clamping.
    pub fn move_to(&mut self, origin: Point) {
        self.x = origin.x;
        self.y = origin.y;
    }

    /// Flip the on/off state. Returns `false` (and does nothing) for empty blocks.
    pub fn toggle(&mut self) -> bool {
        if self.is_empty {
            return false;
        }
        self.is_on = !self.is_on;
        true
    }

    /// Largest origin that keeps this block inside `bounds`.
    fn max_origin(&self, bounds: Size) -> Point {
        Point::new(bounds.width - self.width, bounds.height - self.height)
    }
}

// =============================================================================
// EDGE
// =============================================================================

/// The side of a room a door sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Predicate deciding whether a pointer is close enough to snap to an edge.
pub type EdgeTest = fn(Point, Size) -> bool;

/// Edge detection order for door snapping. The first matching entry wins, so
/// the vertical edges take precedence over the horizontal ones near corners.
pub const SNAP_ORDER: [(EdgeTest, Edge); 4] = [
    (near_left, Edge::Left),
    (near_right, Edge::Right),
    (near_top, Edge::Top),
    (near_bottom, Edge::Bottom),
];

fn near_left(pt: Point, _room: Size) -> bool {
    pt.x <= SNAP_MARGIN_PX
}

fn near_right(pt: Point, room: Size) -> bool {
    pt.x >= room.width - SNAP_MARGIN_PX
}

fn near_top(pt: Point, _room: Size) -> bool {
    pt.y <= SNAP_MARGIN_PX
}

fn near_bottom(pt: Point, room: Size) -> bool {
    pt.y >= room.height - SNAP_MARGIN_PX
}

impl Edge {
    /// Whether the edge runs vertically (left or right side of the room).
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Door dimensions on this edge: 10x60 on vertical edges, 60x10 otherwise.
    #[must_use]
    pub fn door_size(self) -> Size {
        if self.is_vertical() {
            Size::new(DOOR_THICKNESS, DOOR_LENGTH)
        } else {
            Size::new(DOOR_LENGTH, DOOR_THICKNESS)
        }
    }

    /// The edge a pointer at `pt` snaps to, following [`SNAP_ORDER`].
    #[must_use]
    pub fn for_pointer(pt: Point, room: Size) -> Option<Edge> {
        SNAP_ORDER.iter().find(|(test, _)| test(pt, room)).map(|(_, edge)| *edge)
    }
}

// =============================================================================
// DOOR
// =============================================================================

/// Raw wire shape of a door. Size is rederived from the edge on load.
#[derive(Deserialize)]
struct DoorRecord {
    x: f64,
    y: f64,
    edge: Edge,
}

impl From<DoorRecord> for Door {
    fn from(raw: DoorRecord) -> Self {
        Door::new(Point::new(raw.x, raw.y), raw.edge)
    }
}

/// The single door of a room, flush against one of its edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DoorRecord")]
pub struct Door {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    edge: Edge,
}

impl Door {
    /// Create a door at `origin` with its size derived from `edge`.
    #[must_use]
    pub fn new(origin: Point, edge: Edge) -> Self {
        let size = edge.door_size();
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height, edge }
    }

    /// The door a brand-new room starts with: left edge, 300px down.
    #[must_use]
    pub fn default_for_room() -> Self {
        Self::new(Point::new(0.0, DEFAULT_DOOR_OFFSET), Edge::Left)
    }

    #[must_use]
    pub fn edge(&self) -> Edge {
        self.edge
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Snap the door to the room edge nearest `pointer`.
    ///
    /// Returns `false` and leaves the door untouched when the pointer is not
    /// within the snap margin of any edge.
    pub fn snap_to(&mut self, pointer: Point, room_width: f64, room_height: f64) -> bool {
        let room = Size::new(room_width, room_height);
        let Some(edge) = Edge::for_pointer(pointer, room) else {
            return false;
        };
        self.place(edge, pointer, room);
        true
    }

    /// Put the door flush against its own edge, keeping its position along
    /// that edge as far as the room allows.
    pub fn attach(&mut self, room_width: f64, room_height: f64) {
        let origin = self.origin();
        self.place(self.edge, origin, Size::new(room_width, room_height));
    }

    fn place(&mut self, edge: Edge, pointer: Point, room: Size) {
        let size = edge.door_size();
        let free_x = clamp_span(pointer.x, room.width - size.width);
        let free_y = clamp_span(pointer.y, room.height - size.height);
        let (x, y) = match edge {
            Edge::Left => (0.0, free_y),
            Edge::Right => (room.width - DOOR_THICKNESS, free_y),
            Edge::Top => (free_x, 0.0),
            Edge::Bottom => (free_x, room.height - DOOR_THICKNESS),
        };
        *self = Self { x, y, width: size.width, height: size.height, edge };
    }
}

// =============================================================================
// ROOM
// =============================================================================

/// A bounded canvas holding blocks and at most one door.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    name: String,
    width: u32,
    height: u32,
    blocks: Vec<Block>,
    door: Option<Door>,
}

impl Room {
    /// Create an empty room with no door and a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), width, height, blocks: Vec::new(), door: None }
    }

    #[must_use]
    pub fn id(&self) -> RoomId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Room dimensions as floating-point geometry.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Blocks in insertion (and therefore draw) order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn door(&self) -> Option<&Door> {
        self.door.as_ref()
    }

    #[must_use]
    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == *id)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_door(&mut self, door: Option<Door>) {
        self.door = door;
    }

    /// Append a block on top of the existing ones.
    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Remove a block by id, returning it if it was present.
    pub fn remove_block(&mut self, id: &BlockId) -> Option<Block> {
        let idx = self.blocks.iter().position(|b| b.id == *id)?;
        Some(self.blocks.remove(idx))
    }

    /// Toggle a block. Returns `false` if the block is missing or empty.
    pub fn toggle_block(&mut self, id: &BlockId) -> bool {
        self.blocks
            .iter_mut()
            .find(|b| b.id == *id)
            .is_some_and(Block::toggle)
    }

    /// Move a block so its origin is as close to `origin` as containment allows.
    ///
    /// Returns `false` if no block has this id.
    pub fn move_block(&mut self, id: &BlockId, origin: Point) -> bool {
        let bounds = self.size();
        let Some(block) = self.blocks.iter_mut().find(|b| b.id == *id) else {
            return false;
        };
        let max = block.max_origin(bounds);
        block.move_to(Point::new(clamp_span(origin.x, max.x), clamp_span(origin.y, max.y)));
        true
    }

    /// Snap the door toward `pointer`. Returns `false` if there is no door or
    /// the pointer is outside every snap margin.
    pub fn snap_door(&mut self, pointer: Point) -> bool {
        let bounds = self.size();
        self.door
            .as_mut()
            .is_some_and(|door| door.snap_to(pointer, bounds.width, bounds.height))
    }

    /// Change the room dimensions and pull contents back inside.
    ///
    /// Block origins are only ever capped, never pushed outward. The door is
    /// re-snapped from its current position against the new bounds, so a door
    /// that no longer sits within the snap margin of any edge stays put.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.clamp_blocks();
        let bounds = self.size();
        if let Some(door) = self.door.as_mut() {
            let origin = door.origin();
            door.snap_to(origin, bounds.width, bounds.height);
        }
    }

    /// Force a room read from outside into a valid layout at `width` x
    /// `height`: blocks whose size cannot fit are dropped, the rest are pulled
    /// inside, and the door is put back flush on its own edge.
    ///
    /// Returns the number of dropped blocks.
    pub fn conform(&mut self, width: u32, height: u32) -> usize {
        self.width = width;
        self.height = height;
        let bounds = self.size();
        let before = self.blocks.len();
        self.blocks.retain(|b| {
            let size = b.size();
            size.width > 0.0 && size.height > 0.0 && size.width <= bounds.width && size.height <= bounds.height
        });
        self.clamp_blocks();
        if let Some(door) = self.door.as_mut() {
            door.attach(bounds.width, bounds.height);
        }
        before - self.blocks.len()
    }

    fn clamp_blocks(&mut self) {
        let bounds = self.size();
        for block in &mut self.blocks {
            let max = block.max_origin(bounds);
            let origin = block.origin();
            block.move_to(Point::new(clamp_span(origin.x, max.x), clamp_span(origin.y, max.y)));
        }
    }

    /// Deep copy under a new id and name. Block ids are kept as-is.
    #[must_use]
    pub fn duplicate(&self, name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), ..self.clone() }
    }
}
