//! Game domain model.
//!
//! # Responsibility
//! - Define the record shown in the inventory grid and edited by the form.
//! - Validate the borrowed-state invariant before and after persistence.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another game.
//! - `borrowed == false` implies `borrowed_to` and `borrowed_date` are `None`.
//! - `date_created` is `None` only for drafts that were never saved.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one game record.
pub type GameId = Uuid;

/// Validation failures for [`Game`] state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameValidationError {
    /// `uuid` must not be the nil UUID.
    NilUuid,
    /// Borrower or borrow date is set while `borrowed == false`.
    LoanDetailsWithoutLoan,
}

impl Display for GameValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "game uuid must not be nil"),
            Self::LoanDetailsWithoutLoan => write!(
                f,
                "borrowed_to and borrowed_date must be empty when borrowed is false"
            ),
        }
    }
}

impl Error for GameValidationError {}

/// One entry of the inventory: a game, its loan state and its photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Stable identity assigned when the draft is allocated.
    pub uuid: GameId,
    /// Display title. Empty is allowed.
    pub title: String,
    /// Whether the game is currently lent out.
    pub borrowed: bool,
    /// Borrower name, stored uppercased. Only set while borrowed.
    pub borrowed_to: Option<String>,
    /// Day the game was lent. Only set while borrowed.
    pub borrowed_date: Option<NaiveDate>,
    /// Opaque photo bytes; empty when no photo was taken.
    pub image: Vec<u8>,
    /// Unix epoch milliseconds of the last save. List sort key.
    pub date_created: Option<i64>,
}

impl Game {
    /// Creates an empty draft with a generated identity.
    ///
    /// The draft is not persisted and has no `date_created` until saved.
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: String::new(),
            borrowed: false,
            borrowed_to: None,
            borrowed_date: None,
            image: Vec::new(),
            date_created: None,
        }
    }

    /// Creates an empty draft with a caller-provided identity.
    pub fn with_id(uuid: GameId) -> Result<Self, GameValidationError> {
        if uuid.is_nil() {
            return Err(GameValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            ..Self::new()
        })
    }

    /// Returns `true` once the game went through at least one save.
    pub fn is_persisted(&self) -> bool {
        self.date_created.is_some()
    }

    /// Marks the game as returned and drops the loan details.
    pub fn clear_loan(&mut self) {
        self.borrowed = false;
        self.borrowed_to = None;
        self.borrowed_date = None;
    }

    /// Checks identity and borrowed-state invariants.
    pub fn validate(&self) -> Result<(), GameValidationError> {
        if self.uuid.is_nil() {
            return Err(GameValidationError::NilUuid);
        }
        if !self.borrowed && (self.borrowed_to.is_some() || self.borrowed_date.is_some()) {
            return Err(GameValidationError::LoanDetailsWithoutLoan);
        }
        Ok(())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
