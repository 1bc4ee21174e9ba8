//! Domain model for the game-loan inventory.
//!
//! # Responsibility
//! - Define the canonical game record persisted by the store.
//! - Own the single date pattern shared by form parsing and list display.
//!
//! # Invariants
//! - Every game is identified by a stable, non-nil `GameId`.
//! - A game that is not borrowed carries no borrower and no borrow date.

pub mod borrow_date;
pub mod game;
