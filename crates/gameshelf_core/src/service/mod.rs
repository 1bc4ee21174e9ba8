//! Use-case services behind the edit form and the game grid.
//!
//! # Responsibility
//! - Orchestrate repository calls into form/grid level APIs.
//! - Keep presentation and FFI layers decoupled from storage details.

pub mod change_feed;
pub mod game_editor;
pub mod game_list;
