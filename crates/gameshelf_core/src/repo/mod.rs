//! Repository layer for the game store.
//!
//! # Responsibility
//! - Define the storage contract the services are written against.
//! - Isolate SQLite query details from editor/list orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Game::validate()` before persistence.
//! - Missing rows surface as `RepoError::NotFound`, not as transport errors.

pub mod game_repo;
