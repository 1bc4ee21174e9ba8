//! Core domain logic for GameShelf, a personal game-loan inventory.
//! This crate owns the record invariants, persistence and grid formatting.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::ShelfConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::borrow_date::{
    format_borrow_date, parse_borrow_date, today_borrow_date_text, BorrowDateError,
    BORROW_DATE_PATTERN,
};
pub use model::game::{Game, GameId, GameValidationError};
pub use repo::game_repo::{
    GameListQuery, GameRepository, ListFilter, RepoError, RepoResult, SqliteGameRepository,
};
pub use service::change_feed::{ChangeFeed, ChangeListener, GameChange};
pub use service::game_editor::{
    borrow_fields_for_toggle, BorrowFields, DeleteError, FieldInput, GameEditor, SaveError,
};
pub use service::game_list::{
    format_row, pull_to_add_triggered, GameListService, RowColor, RowDisplay, TwoToneText,
    PULL_TO_ADD_OFFSET,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
