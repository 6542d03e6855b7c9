//! Runtime configuration read from `ROOMPLAN_*` environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::str::FromStr;

use canvas::consts::STORAGE_KEY;
use canvas::rooms::RoomLimits;
use tracing::warn;

pub const DEFAULT_DATA_DIR: &str = ".roomplan";
pub const DEFAULT_CELL_PX: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding one JSON file per store key.
    pub data_dir: PathBuf,
    pub store_key: String,
    pub limits: RoomLimits,
    /// Room pixels per character cell in the text view.
    pub cell_px: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            store_key: STORAGE_KEY.to_owned(),
            limits: RoomLimits::default(),
            cell_px: DEFAULT_CELL_PX,
        }
    }
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Build from any key lookup. Unset or unparsable values keep their
    /// defaults. A side range that is inverted, excludes the default room
    /// size, or lets a room shrink below a block or the door falls back to
    /// the default range.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut limits = defaults.limits;
        limits.min_side = parse_or(lookup("ROOMPLAN_MIN_ROOM_SIDE"), limits.min_side);
        limits.max_side = parse_or(lookup("ROOMPLAN_MAX_ROOM_SIDE"), limits.max_side);
        if !limits.is_valid() {
            warn!(min = limits.min_side, max = limits.max_side, "invalid room side range; using defaults");
            limits = defaults.limits;
        }

        let cell_px = parse_or(lookup("ROOMPLAN_CELL_PX"), defaults.cell_px).max(1);

        Self {
            data_dir: lookup("ROOMPLAN_DATA_DIR")
                .filter(|v| !v.trim().is_empty())
                .map_or(defaults.data_dir, PathBuf::from),
            store_key: lookup("ROOMPLAN_STORE_KEY")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.store_key),
            limits,
            cell_px,
        }
    }
}

pub(crate) fn parse_or<T>(raw: Option<String>, default: T) -> T
where
    T: FromStr,
{
    match raw.map(|v| v.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        _ => default,
    }
}
