//! Line-oriented editor shell.
//!
//! Each input line is one command. Commands map onto [`EngineCore`] calls;
//! the actions the engine returns become printed lines (status notices, the
//! tab strip when it changes). Pointer commands take room coordinates, so a
//! full drag is `down x y`, one or more `move x y`, then `up`.
//!
//! ERROR HANDLING
//! ==============
//! Malformed commands come back as [`CommandError`] and leave the session
//! untouched. Refused edits are not errors here: the engine already turned
//! them into notices or silent no-ops.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use canvas::doc::{Block, BlockId, RoomId};
use canvas::engine::{Action, EngineCore, MenuItem, Notice};
use canvas::geom::Point;
use canvas::input::{Button, DragState};
use canvas::render;
use canvas::rooms::RoomSet;
use canvas::store::{self, Store, StoreError};
use uuid::Uuid;

use crate::ascii::{self, AsciiSurface};

pub const HELP: &str = "\
commands:
  new                 create a room
  block | empty       add a block / an empty block to the current room
  toggle <n|id>       switch block n on or off
  delete <n|id>       delete block n
  resize <w> <h>      resize the current room
  rename <name>       rename the current room
  dup | drop          duplicate / delete the current room
  select <n>          switch to tab n
  down <x> <y> [right|middle]
  move <x> <y>
  up [right|middle]   pointer press, move and release
  menu <x> <y> [n]    show the block menu at a point, or run item n
  tabs | show | json  list rooms / draw the current room / dump the design
  save                persist the design
  help | quit";

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("no tab {0}")]
    NoTab(usize),
    #[error("no block `{0}` in the current room")]
    NoBlock(String),
    #[error("no block at that point")]
    NoMenu,
    #[error("menu has no item {0}")]
    NoMenuItem(usize),
    #[error("no current room")]
    NoRoom,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("design encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A block named on the command line: 1-based position or full id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockRef {
    Index(usize),
    Id(BlockId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    New,
    Block,
    Empty,
    Toggle(BlockRef),
    Delete(BlockRef),
    /// Raw values, parsed by the engine the way a prompt would be.
    Resize(String, String),
    Rename(String),
    Duplicate,
    Drop,
    Select(usize),
    Down(Point, Button),
    Move(Point),
    Up(Button),
    Menu(Point, Option<usize>),
    Tabs,
    Show,
    Save,
    Json,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word {
            "new" => Self::New,
            "block" => Self::Block,
            "empty" => Self::Empty,
            "toggle" => Self::Toggle(block_ref(&args, "toggle <n|id>")?),
            "delete" => Self::Delete(block_ref(&args, "delete <n|id>")?),
            "resize" => match args.as_slice() {
                [w, h] => Self::Resize((*w).to_owned(), (*h).to_owned()),
                _ => return Err(CommandError::Usage("resize <w> <h>")),
            },
            "rename" => Self::Rename(rest.to_owned()),
            "dup" => Self::Duplicate,
            "drop" => Self::Drop,
            "select" => match args.as_slice() {
                [n] => Self::Select(index(n).ok_or(CommandError::Usage("select <n>"))?),
                _ => return Err(CommandError::Usage("select <n>")),
            },
            "down" => {
                const USAGE: &str = "down <x> <y> [right|middle]";
                let (pt, extra) = point(&args, USAGE)?;
                Self::Down(pt, button(extra, USAGE)?)
            }
            "move" => match point(&args, "move <x> <y>")? {
                (pt, []) => Self::Move(pt),
                _ => return Err(CommandError::Usage("move <x> <y>")),
            },
            "up" => Self::Up(button(&args, "up [right|middle]")?),
            "menu" => {
                const USAGE: &str = "menu <x> <y> [n]";
                match point(&args, USAGE)? {
                    (pt, []) => Self::Menu(pt, None),
                    (pt, [n]) => Self::Menu(pt, Some(index(n).ok_or(CommandError::Usage(USAGE))?)),
                    _ => return Err(CommandError::Usage(USAGE)),
                }
            }
            "tabs" => Self::Tabs,
            "show" => Self::Show,
            "save" => Self::Save,
            "json" => Self::Json,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}

/// 1-based positive index.
fn index(raw: &str) -> Option<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}

fn block_ref(args: &[&str], usage: &'static str) -> Result<BlockRef, CommandError> {
    let [raw] = args else {
        return Err(CommandError::Usage(usage));
    };
    if let Some(n) = index(raw) {
        return Ok(BlockRef::Index(n));
    }
    match Uuid::parse_str(raw) {
        Ok(id) => Ok(BlockRef::Id(id)),
        Err(_) => Err(CommandError::Usage(usage)),
    }
}

fn point<'a, 'b>(args: &'a [&'b str], usage: &'static str) -> Result<(Point, &'a [&'b str]), CommandError> {
    let [x, y, extra @ ..] = args else {
        return Err(CommandError::Usage(usage));
    };
    match (x.parse::<f64>(), y.parse::<f64>()) {
        (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => Ok((Point::new(x, y), extra)),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn button(args: &[&str], usage: &'static str) -> Result<Button, CommandError> {
    match args {
        [] | ["left"] => Ok(Button::Primary),
        ["right"] => Ok(Button::Secondary),
        ["middle"] => Ok(Button::Middle),
        _ => Err(CommandError::Usage(usage)),
    }
}

/// Result of one executed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(Vec<String>),
    Quit,
}

/// An editing session bound to a store.
pub struct Shell<S: Store> {
    core: EngineCore,
    store: S,
    key: String,
    cell_px: u32,
    /// Where the last `down` or `move` left the pointer.
    pointer: Point,
}

impl<S: Store> Shell<S> {
    pub fn new(core: EngineCore, store: S, key: impl Into<String>, cell_px: u32) -> Self {
        Self { core, store, key: key.into(), cell_px, pointer: Point::default() }
    }

    /// Parse and run one line.
    pub fn exec(&mut self, line: &str) -> Result<Step, CommandError> {
        match Command::parse(line)? {
            None => Ok(Step::Continue(Vec::new())),
            Some(Command::Quit) => Ok(Step::Quit),
            Some(command) => self.run(command).map(Step::Continue),
        }
    }

    pub fn run(&mut self, command: Command) -> Result<Vec<String>, CommandError> {
        let actions = match command {
            Command::New => self.core.create_room(),
            Command::Block => self.core.add_block(),
            Command::Empty => self.core.add_empty_block(),
            Command::Toggle(target) => {
                let id = self.resolve_block(&target)?;
                self.core.toggle_block(&id)
            }
            Command::Delete(target) => {
                let id = self.resolve_block(&target)?;
                self.core.delete_block(&id)
            }
            Command::Resize(w, h) => {
                let id = self.current_id()?;
                let actions = self.core.resize_room(&id, Some(&w), Some(&h));
                if actions.is_empty() {
                    return Ok(vec![format!("size unchanged: {w} x {h} is not a valid size")]);
                }
                actions
            }
            Command::Rename(name) => {
                let id = self.current_id()?;
                let actions = self.core.rename_room(&id, Some(&name));
                if actions.is_empty() {
                    return Err(CommandError::Usage("rename <name>"));
                }
                actions
            }
            Command::Duplicate => {
                let id = self.current_id()?;
                self.core.duplicate_room(&id)
            }
            Command::Drop => {
                let id = self.current_id()?;
                self.core.delete_room(&id)
            }
            Command::Select(n) => {
                let id = self.core.rooms.id_at(n - 1).ok_or(CommandError::NoTab(n))?;
                self.core.select_room(&id)
            }
            Command::Down(pt, button) => {
                self.pointer = pt;
                self.core.on_pointer_down(pt, button);
                return Ok(vec![self.drag_line()]);
            }
            Command::Move(pt) => {
                self.pointer = pt;
                self.core.on_pointer_move(pt)
            }
            Command::Up(button) => {
                self.core.on_pointer_up(self.pointer, button);
                return Ok(vec![self.drag_line()]);
            }
            Command::Menu(pt, choice) => return self.menu(pt, choice),
            Command::Tabs => return Ok(self.tab_lines()),
            Command::Show => return Ok(self.show_lines()),
            Command::Save => self.core.save(&mut self.store, &self.key),
            Command::Json => return Ok(vec![pretty_design(&self.core.rooms)?]),
            Command::Help => return Ok(HELP.lines().map(str::to_owned).collect()),
            Command::Quit => Vec::new(),
        };
        Ok(self.describe(&actions))
    }

    fn current_id(&self) -> Result<RoomId, CommandError> {
        self.core.rooms.current_id().ok_or(CommandError::NoRoom)
    }

    fn resolve_block(&self, target: &BlockRef) -> Result<BlockId, CommandError> {
        let room = self.core.current_room().ok_or(CommandError::NoRoom)?;
        let found = match target {
            BlockRef::Index(n) => room.blocks().get(n - 1).map(Block::id),
            BlockRef::Id(id) => room.block(id).map(Block::id),
        };
        found.ok_or_else(|| {
            CommandError::NoBlock(match target {
                BlockRef::Index(n) => n.to_string(),
                BlockRef::Id(id) => id.to_string(),
            })
        })
    }

    fn menu(&mut self, pt: Point, choice: Option<usize>) -> Result<Vec<String>, CommandError> {
        let menu = self.core.context_menu(pt).ok_or(CommandError::NoMenu)?;
        let Some(n) = choice else {
            return Ok(menu
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item.label()))
                .collect());
        };
        let item: MenuItem = *menu.items.get(n - 1).ok_or(CommandError::NoMenuItem(n))?;
        let actions = self.core.apply_menu(&menu, item);
        Ok(self.describe(&actions))
    }

    /// Printable lines for engine actions. Redraws are left to `show`.
    fn describe(&self, actions: &[Action]) -> Vec<String> {
        let mut lines = Vec::new();
        for action in actions {
            match action {
                Action::Status(notice) => lines.push(notice.to_string()),
                Action::TabsChanged => lines.extend(self.tab_lines()),
                Action::RenderNeeded => {}
            }
        }
        lines
    }

    fn tab_lines(&self) -> Vec<String> {
        let tabs = self.core.tabs();
        if tabs.is_empty() {
            return vec!["(no rooms)".to_owned()];
        }
        let strip = tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                if tab.is_current {
                    format!("[{}: {}]", i + 1, tab.name)
                } else {
                    format!(" {}: {} ", i + 1, tab.name)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        vec![strip]
    }

    fn drag_line(&self) -> String {
        match self.core.drag {
            DragState::Idle => "idle".to_owned(),
            DragState::DraggingBlock { id, .. } => format!("dragging block {id}"),
            DragState::DraggingDoor { .. } => "dragging door".to_owned(),
        }
    }

    /// Title, grid, legend, then one line per block and the door.
    pub fn show_lines(&self) -> Vec<String> {
        let Some(room) = self.core.current_room() else {
            return vec![Notice::NoRooms.to_string()];
        };
        let mut surface = AsciiSurface::new(self.cell_px);
        render::draw(&mut surface, room);

        let mut lines = vec![format!("{} ({} x {})", room.name(), room.width(), room.height())];
        lines.extend(surface.lines());
        lines.push(ascii::legend());
        for (i, block) in room.blocks().iter().enumerate() {
            let state = if block.is_empty() {
                "empty"
            } else if block.is_on() {
                "on"
            } else {
                "off"
            };
            let (origin, size) = (block.origin(), block.size());
            lines.push(format!(
                "{}. {state} at ({}, {}) {} x {}  {}",
                i + 1,
                origin.x,
                origin.y,
                size.width,
                size.height,
                block.id()
            ));
        }
        if let Some(door) = room.door() {
            let origin = door.origin();
            lines.push(format!("door: {:?} at ({}, {})", door.edge(), origin.x, origin.y).to_lowercase());
        }
        lines
    }
}

/// The design as saved, indented for reading.
pub fn pretty_design(rooms: &RoomSet) -> Result<String, CommandError> {
    let raw = store::encode(rooms)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
