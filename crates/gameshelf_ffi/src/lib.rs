//! Flutter-facing bridge for the GameShelf core.

pub mod api;
