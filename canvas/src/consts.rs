//! Shared numeric constants for the canvas crate.

// ── Door ────────────────────────────────────────────────────────

/// Thickness of a door, measured perpendicular to the edge it sits on.
pub const DOOR_THICKNESS: f64 = 10.0;

/// Length of a door, measured along the edge it sits on.
pub const DOOR_LENGTH: f64 = 60.0;

/// Distance from a room boundary within which a dragged door snaps to it.
pub const SNAP_MARGIN_PX: f64 = 10.0;

/// Offset along the left edge where a freshly created room places its door.
pub const DEFAULT_DOOR_OFFSET: f64 = 300.0;

// ── Rooms ───────────────────────────────────────────────────────

/// Width of a newly created room.
pub const DEFAULT_ROOM_WIDTH: u32 = 800;

/// Height of a newly created room.
pub const DEFAULT_ROOM_HEIGHT: u32 = 600;

/// Smallest side length a resize may produce.
pub const MIN_ROOM_SIDE: u32 = 400;

/// Largest side length a resize may produce.
pub const MAX_ROOM_SIDE: u32 = 2000;

/// Suffix appended to the name of a duplicated room.
pub const COPY_SUFFIX: &str = " (copy)";

// ── Blocks ──────────────────────────────────────────────────────

/// Side length of blocks added from the toolbar.
pub const DEFAULT_BLOCK_SIDE: f64 = 50.0;

// ── Persistence ─────────────────────────────────────────────────

/// Store key the whole room set is saved under.
pub const STORAGE_KEY: &str = "roomDesigns";
