//! Room layout editor core.
//!
//! A design is a set of rooms. Each room is a rectangle holding movable
//! blocks and at most one door that snaps to the room's walls. This crate
//! owns the model and every edit to it; hosts (the `roomplan` terminal shell,
//! or any other front end) feed pointer events and commands in, and draw the
//! current room through a [`render::Surface`] when an [`engine::Action`] asks
//! for it.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editing session: pointer gestures, commands, status notices |
//! | [`rooms`] | Ordered room set, current room, validated room and block edits |
//! | [`doc`] | Room, block and door types with their clamping and snapping rules |
//! | [`geom`] | Points, sizes and rectangles |
//! | [`hit`] | Hit-testing the pointer against blocks and the door |
//! | [`input`] | Pointer buttons and the drag state machine |
//! | [`render`] | Drawing a room onto a surface |
//! | [`store`] | Key/value persistence of the whole design |
//! | [`consts`] | Shared dimensions, margins and defaults |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod render;
pub mod rooms;
pub mod store;
