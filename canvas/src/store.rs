//! Persistence: a key/string store and the room-set codec on top of it.
//!
//! DESIGN
//! ======
//! A design is saved whole, as one string under one key.
//! [`Store`] abstracts that as a plain key → string map so the same codec runs
//! against memory (tests, hosts that manage storage themselves) and the file
//! system (the CLI). Writes only happen on an explicit save.
//!
//! The stored document is JSON: `{"rooms": [...], "currentRoomId": "..."}`.
//! A bare array of rooms, as older saves wrote it, is accepted on load.
//!
//! ERROR HANDLING
//! ==============
//! Loading never fails: absent or corrupt data is logged and replaced by a
//! single default room. Saving reports a [`StoreError`] to the caller.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::doc::{Room, RoomId};
use crate::rooms::{RoomLimits, RoomSet};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid saved design: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string-keyed, string-valued store.
pub trait Store {
    /// Read the value under `key`, or `None` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Saved form of a room set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLayout {
    /// Rooms in tab order.
    pub rooms: Vec<Room>,
    /// Selected room at save time.
    #[serde(default)]
    pub current_room_id: Option<RoomId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredForm {
    Layout(SavedLayout),
    Bare(Vec<Room>),
}

// =============================================================================
// BACKENDS
// =============================================================================

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store: each key is a `<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Serialize a room set, rooms in tab order.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn encode(set: &RoomSet) -> Result<String, StoreError> {
    let layout = SavedLayout { rooms: set.iter().cloned().collect(), current_room_id: set.current_id() };
    Ok(serde_json::to_string(&layout)?)
}

/// Parse a saved room set.
///
/// # Errors
///
/// Returns `Json` if `raw` is neither a saved layout nor a bare room array.
pub fn decode(raw: &str, limits: RoomLimits) -> Result<RoomSet, StoreError> {
    let set = match serde_json::from_str::<StoredForm>(raw)? {
        StoredForm::Layout(layout) => RoomSet::from_rooms(layout.rooms, layout.current_room_id, limits),
        StoredForm::Bare(rooms) => RoomSet::from_rooms(rooms, None, limits),
    };
    Ok(set)
}

/// Write the room set under `key`.
///
/// # Errors
///
/// Returns a `StoreError` if encoding or the backend write fails.
pub fn save_rooms<S: Store + ?Sized>(store: &mut S, key: &str, set: &RoomSet) -> Result<(), StoreError> {
    let raw = encode(set)?;
    store.set(key, &raw)?;
    info!(key, rooms = set.len(), bytes = raw.len(), "design saved");
    Ok(())
}

/// Read the room set under `key`, falling back to a single default room when
/// nothing usable is stored. The current room gets the default door if it has
/// none.
pub fn load_rooms<S: Store + ?Sized>(store: &S, key: &str, limits: RoomLimits) -> RoomSet {
    let mut set = match store.get(key) {
        Ok(Some(raw)) => match decode(&raw, limits) {
            Ok(set) => {
                info!(key, rooms = set.len(), "design loaded");
                set
            }
            Err(e) => {
                warn!(error = %e, key, "saved design unreadable; starting fresh");
                RoomSet::with_default_room(limits)
            }
        },
        Ok(None) => RoomSet::with_default_room(limits),
        Err(e) => {
            warn!(error = %e, key, "store read failed; starting fresh");
            RoomSet::with_default_room(limits)
        }
    };
    set.ensure_current_door();
    set
}
