use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::doc::{BlockId, Room, RoomId};
use crate::geom::Point;
use crate::hit::{self, Hit};
use crate::input::{Button, DragState};
use crate::rooms::{EditError, RoomLimits, RoomSet, Tab, parse_dimension};
use crate::store::{self, Store};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Status line messages shown to the user after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    RoomCreated,
    BlockAdded,
    EmptyBlockAdded,
    BlockDeleted,
    RoomResized,
    RoomRenamed,
    RoomDuplicated,
    RoomDeleted,
    AllRoomsDeleted,
    DesignSaved,
    SaveFailed,
    CreateRoomFirst,
    NoRooms,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::RoomCreated => "Room created",
            Self::BlockAdded => "Block added",
            Self::EmptyBlockAdded => "Empty block added",
            Self::BlockDeleted => "Block deleted",
            Self::RoomResized => "Room resized",
            Self::RoomRenamed => "Room renamed",
            Self::RoomDuplicated => "Room duplicated",
            Self::RoomDeleted => "Room deleted",
            Self::AllRoomsDeleted => "All rooms deleted",
            Self::DesignSaved => "Design saved",
            Self::SaveFailed => "Design could not be saved",
            Self::CreateRoomFirst => "Create a room before adding a block",
            Self::NoRooms => "No rooms. Create a new room.",
        };
        f.write_str(text)
    }
}

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The current room changed and must be redrawn.
    RenderNeeded,
    /// Room names, order or selection changed; redraw the tab strip.
    TabsChanged,
    /// Show a status message.
    Status(Notice),
}

/// An entry of the right-click menu on a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Flip the block; `turn_on` is the state it will switch to.
    Toggle { turn_on: bool },
    Delete,
    AddEmptyBlock,
}

impl MenuItem {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Toggle { turn_on: true } => "Turn on",
            Self::Toggle { turn_on: false } => "Turn off",
            Self::Delete => "Delete",
            Self::AddEmptyBlock => "Add empty block",
        }
    }
}

/// Context menu for the block under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMenu {
    pub block_id: BlockId,
    pub items: Vec<MenuItem>,
}

/// Editor session: the room set, the drag gesture in flight, and the random
/// source used to place new blocks.
///
/// Everything a UI needs goes through here. Handlers never fail; refused
/// edits come back as status actions or as nothing at all.
pub struct EngineCore {
    pub rooms: RoomSet,
    pub drag: DragState,
    rng: StdRng,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(RoomSet::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(rooms: RoomSet) -> Self {
        Self { rooms, drag: DragState::Idle, rng: StdRng::from_os_rng() }
    }

    /// Deterministic block placement, for tests and reproducible scripts.
    #[must_use]
    pub fn with_seed(rooms: RoomSet, seed: u64) -> Self {
        Self { rooms, drag: DragState::Idle, rng: StdRng::seed_from_u64(seed) }
    }

    /// Start a session from whatever is saved under `key`.
    #[must_use]
    pub fn load<S: Store + ?Sized>(store: &S, key: &str, limits: RoomLimits) -> Self {
        Self::new(store::load_rooms(store, key, limits))
    }

    /// Persist the whole room set under `key`.
    pub fn save<S: Store + ?Sized>(&self, store: &mut S, key: &str) -> Vec<Action> {
        match store::save_rooms(store, key, &self.rooms) {
            Ok(()) => vec![Action::Status(Notice::DesignSaved)],
            Err(e) => {
                warn!(error = %e, key, "design save failed");
                vec![Action::Status(Notice::SaveFailed)]
            }
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn current_room(&self) -> Option<&Room> {
        self.rooms.current()
    }

    #[must_use]
    pub fn tabs(&self) -> Vec<Tab> {
        self.rooms.tabs()
    }

    // --- Rooms ---

    pub fn create_room(&mut self) -> Vec<Action> {
        self.rooms.create_room();
        self.drag = DragState::Idle;
        vec![Action::TabsChanged, Action::RenderNeeded, Action::Status(Notice::RoomCreated)]
    }

    /// Tab click.
    pub fn select_room(&mut self, id: &RoomId) -> Vec<Action> {
        match self.rooms.select(id) {
            Ok(()) => {
                self.drag = DragState::Idle;
                vec![Action::TabsChanged, Action::RenderNeeded]
            }
            Err(e) => refused("select_room", e),
        }
    }

    /// Resize from raw prompt input. `None` means the prompt was cancelled.
    /// Nothing changes unless both values parse.
    pub fn resize_room(&mut self, id: &RoomId, width: Option<&str>, height: Option<&str>) -> Vec<Action> {
        let parsed = parse_dimension(width).and_then(|w| parse_dimension(height).map(|h| (w, h)));
        match parsed.and_then(|(w, h)| self.rooms.resize_room(id, w, h)) {
            Ok(_) => vec![Action::RenderNeeded, Action::Status(Notice::RoomResized)],
            Err(e) => refused("resize_room", e),
        }
    }

    /// Rename from raw prompt input. `None` means the prompt was cancelled.
    pub fn rename_room(&mut self, id: &RoomId, name: Option<&str>) -> Vec<Action> {
        let result = name
            .ok_or(EditError::Cancelled)
            .and_then(|name| self.rooms.rename_room(id, name));
        match result {
            Ok(()) => vec![Action::TabsChanged, Action::Status(Notice::RoomRenamed)],
            Err(e) => refused("rename_room", e),
        }
    }

    pub fn duplicate_room(&mut self, id: &RoomId) -> Vec<Action> {
        match self.rooms.duplicate_room(id) {
            Ok(_) => {
                self.drag = DragState::Idle;
                vec![Action::TabsChanged, Action::RenderNeeded, Action::Status(Notice::RoomDuplicated)]
            }
            Err(e) => refused("duplicate_room", e),
        }
    }

    pub fn delete_room(&mut self, id: &RoomId) -> Vec<Action> {
        match self.rooms.delete_room(id) {
            Ok(_) => {
                self.drag = DragState::Idle;
                let notice = if self.rooms.is_empty() { Notice::AllRoomsDeleted } else { Notice::RoomDeleted };
                vec![Action::TabsChanged, Action::RenderNeeded, Action::Status(notice)]
            }
            Err(e) => refused("delete_room", e),
        }
    }

    // --- Blocks (current room) ---

    pub fn add_block(&mut self) -> Vec<Action> {
        let Some(id) = self.rooms.current_id() else {
            return vec![Action::Status(Notice::CreateRoomFirst)];
        };
        match self.rooms.add_block(&id, &mut self.rng) {
            Ok(_) => vec![Action::RenderNeeded, Action::Status(Notice::BlockAdded)],
            Err(e) => refused("add_block", e),
        }
    }

    pub fn add_empty_block(&mut self) -> Vec<Action> {
        let Some(id) = self.rooms.current_id() else {
            return vec![Action::Status(Notice::CreateRoomFirst)];
        };
        match self.rooms.add_empty_block(&id, &mut self.rng) {
            Ok(_) => vec![Action::RenderNeeded, Action::Status(Notice::EmptyBlockAdded)],
            Err(e) => refused("add_empty_block", e),
        }
    }

    pub fn toggle_block(&mut self, block_id: &BlockId) -> Vec<Action> {
        let Some(id) = self.rooms.current_id() else {
            return refused("toggle_block", EditError::NoRoom);
        };
        match self.rooms.toggle_block(&id, block_id) {
            Ok(_) => vec![Action::RenderNeeded],
            Err(e) => refused("toggle_block", e),
        }
    }

    pub fn delete_block(&mut self, block_id: &BlockId) -> Vec<Action> {
        let Some(id) = self.rooms.current_id() else {
            return refused("delete_block", EditError::NoRoom);
        };
        match self.rooms.delete_block(&id, block_id) {
            Ok(_) => {
                if matches!(self.drag, DragState::DraggingBlock { id: dragged, .. } if dragged == *block_id) {
                    self.drag = DragState::Idle;
                }
                vec![Action::RenderNeeded, Action::Status(Notice::BlockDeleted)]
            }
            Err(e) => refused("delete_block", e),
        }
    }

    /// Right-click: the menu for the block under `pt`, if any.
    #[must_use]
    pub fn context_menu(&self, pt: Point) -> Option<BlockMenu> {
        let room = self.rooms.current()?;
        let block_id = hit::hit_block(pt, room)?;
        let block = room.block(&block_id)?;
        let items = if block.is_empty() {
            vec![MenuItem::Delete]
        } else {
            vec![MenuItem::Toggle { turn_on: !block.is_on() }, MenuItem::Delete, MenuItem::AddEmptyBlock]
        };
        Some(BlockMenu { block_id, items })
    }

    /// Run a context menu choice against its block.
    pub fn apply_menu(&mut self, menu: &BlockMenu, item: MenuItem) -> Vec<Action> {
        match item {
            MenuItem::Toggle { .. } => self.toggle_block(&menu.block_id),
            MenuItem::Delete => self.delete_block(&menu.block_id),
            MenuItem::AddEmptyBlock => self.add_empty_block(),
        }
    }

    // --- Pointer input ---

    /// Primary press: start dragging the first block under the pointer, or
    /// the door if no block is there.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let Some(room) = self.rooms.current() else {
            return Vec::new();
        };
        self.drag = match hit::hit_test(pt, room) {
            Some(Hit::Block(id)) => room
                .block(&id)
                .map_or(DragState::Idle, |b| DragState::DraggingBlock { id, grab_offset: pt.sub(b.origin()) }),
            Some(Hit::Door) => room
                .door()
                .map_or(DragState::Idle, |d| DragState::DraggingDoor { grab_offset: pt.sub(d.origin()) }),
            None => DragState::Idle,
        };
        Vec::new()
    }

    /// Pointer move: drag the grabbed element along.
    ///
    /// A gesture whose target disappeared (room switched, block deleted) is
    /// dropped back to idle.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        let Some(target) = self.drag.target(pt) else {
            return Vec::new();
        };
        let Some(room) = self.rooms.current_mut() else {
            self.drag = DragState::Idle;
            return Vec::new();
        };
        match self.drag {
            DragState::DraggingBlock { id, .. } => {
                if room.move_block(&id, target) {
                    return vec![Action::RenderNeeded];
                }
                self.drag = DragState::Idle;
                Vec::new()
            }
            DragState::DraggingDoor { .. } => {
                if room.door().is_none() {
                    self.drag = DragState::Idle;
                    return Vec::new();
                }
                if room.snap_door(target) { vec![Action::RenderNeeded] } else { Vec::new() }
            }
            DragState::Idle => Vec::new(),
        }
    }

    /// Primary release ends any drag, wherever the pointer is.
    pub fn on_pointer_up(&mut self, _pt: Point, button: Button) -> Vec<Action> {
        if button == Button::Primary {
            self.drag = DragState::Idle;
        }
        Vec::new()
    }
}

/// Absorb a refused edit: log it, and tell the user when there is no room to
/// act on.
fn refused(op: &'static str, err: EditError) -> Vec<Action> {
    debug!(op, error = %err, "edit refused");
    match err {
        EditError::NoRoom => vec![Action::Status(Notice::NoRooms)],
        _ => Vec::new(),
    }
}
