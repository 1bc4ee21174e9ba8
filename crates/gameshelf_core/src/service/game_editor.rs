//! Game edit-form use-cases.
//!
//! # Responsibility
//! - Map form input onto a new or existing game and commit it.
//! - Enforce the borrowed-state invariant on every save.
//! - Notify subscribers after each committed save or delete.
//!
//! # Invariants
//! - Turning `borrowed` off clears borrower and borrow date, also on games
//!   that were saved before.
//! - Borrower names are stored uppercased.
//! - An unparsable borrow date leaves the date unset; it never fails a save.
//! - A borrower or date missing from the input keeps the stored value.
//! - `date_created` is stamped with the current time on every save.

use crate::model::borrow_date::{format_borrow_date, parse_borrow_date, today_borrow_date_text};
use crate::model::game::{Game, GameId};
use crate::repo::game_repo::{GameRepository, RepoError};
use crate::service::change_feed::{ChangeFeed, ChangeListener, GameChange};
use chrono::Utc;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Raw values collected from the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInput {
    pub title: String,
    pub borrowed: bool,
    /// Borrower name as typed; ignored unless `borrowed`.
    pub borrowed_to: Option<String>,
    /// Borrow date as typed in `dd/mm/yyyy`; ignored unless `borrowed`.
    pub borrowed_date: Option<String>,
    /// Photo bytes; `None` stores an empty blob.
    pub image: Option<Vec<u8>>,
}

impl FieldInput {
    /// Pre-fills the form from a stored game.
    pub fn from_game(game: &Game) -> Self {
        Self {
            title: game.title.clone(),
            borrowed: game.borrowed,
            borrowed_to: game.borrowed_to.clone(),
            borrowed_date: game.borrowed_date.map(format_borrow_date),
            image: if game.image.is_empty() {
                None
            } else {
                Some(game.image.clone())
            },
        }
    }
}

/// State of the borrower/date inputs after the borrowed switch flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowFields {
    pub enabled: bool,
    pub borrowed_to_text: String,
    pub borrowed_date_text: String,
}

/// Field-enablement rule for the borrowed switch.
///
/// Off clears and disables both inputs; on enables them and pre-fills the
/// date with today.
pub fn borrow_fields_for_toggle(borrowed: bool) -> BorrowFields {
    if borrowed {
        BorrowFields {
            enabled: true,
            borrowed_to_text: String::new(),
            borrowed_date_text: today_borrow_date_text(),
        }
    } else {
        BorrowFields {
            enabled: false,
            borrowed_to_text: String::new(),
            borrowed_date_text: String::new(),
        }
    }
}

/// Failure of [`GameEditor::save`].
#[derive(Debug)]
pub enum SaveError {
    /// The edited game was deleted in the meantime.
    NotFound(GameId),
    /// The store rejected the write.
    PersistenceFailure(RepoError),
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "game not found: {id}"),
            Self::PersistenceFailure(err) => write!(f, "failed to save game: {err}"),
        }
    }
}

impl Error for SaveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PersistenceFailure(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for SaveError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::PersistenceFailure(other),
        }
    }
}

/// Failure of [`GameEditor::delete`].
#[derive(Debug)]
pub enum DeleteError {
    NotFound(GameId),
    PersistenceFailure(RepoError),
}

impl Display for DeleteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "game not found: {id}"),
            Self::PersistenceFailure(err) => write!(f, "failed to delete game: {err}"),
        }
    }
}

impl Error for DeleteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PersistenceFailure(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for DeleteError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::PersistenceFailure(other),
        }
    }
}

/// Edit-form facade over a game repository.
pub struct GameEditor<R: GameRepository> {
    repo: R,
    feed: ChangeFeed,
}

impl<R: GameRepository> GameEditor<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            feed: ChangeFeed::new(),
        }
    }

    /// Registers an observer notified after each committed mutation.
    pub fn subscribe(&mut self, listener: Arc<dyn ChangeListener>) {
        self.feed.subscribe(listener);
    }

    /// Creates (`existing == None`) or edits a game from form input.
    ///
    /// Returns the committed game as stored.
    pub fn save(&self, existing: Option<&Game>, input: &FieldInput) -> Result<Game, SaveError> {
        let mut game = match existing {
            None => self.repo.create_game(),
            Some(game) => {
                if game.is_persisted() && self.repo.get_game(game.uuid)?.is_none() {
                    warn!(
                        "event=game_save module=service status=error error_code=not_found game_id={}",
                        game.uuid
                    );
                    return Err(SaveError::NotFound(game.uuid));
                }
                game.clone()
            }
        };
        let is_new = !game.is_persisted();

        apply_input(&mut game, input);
        game.date_created = Some(Utc::now().timestamp_millis());

        if let Err(err) = self.repo.save_game(&game) {
            warn!(
                "event=game_save module=service status=error error_code=persistence_failure game_id={} error={err}",
                game.uuid
            );
            return Err(SaveError::PersistenceFailure(err));
        }

        info!(
            "event=game_save module=service status=ok game_id={} new={is_new} borrowed={}",
            game.uuid, game.borrowed
        );
        self.feed.publish(GameChange::Saved { game_id: game.uuid });
        Ok(game)
    }

    /// Removes a game permanently.
    pub fn delete(&self, game: &Game) -> Result<(), DeleteError> {
        self.repo.delete_game(game.uuid).map_err(|err| {
            warn!(
                "event=game_delete module=service status=error game_id={} error={err}",
                game.uuid
            );
            DeleteError::from(err)
        })?;

        info!(
            "event=game_delete module=service status=ok game_id={}",
            game.uuid
        );
        self.feed.publish(GameChange::Deleted { game_id: game.uuid });
        Ok(())
    }
}

fn apply_input(game: &mut Game, input: &FieldInput) {
    if !input.title.is_empty() {
        game.title = input.title.clone();
    }
    game.image = input.image.clone().unwrap_or_default();

    if !input.borrowed {
        game.clear_loan();
        return;
    }

    game.borrowed = true;
    if let Some(name) = input.borrowed_to.as_deref() {
        let name = name.trim();
        game.borrowed_to = if name.is_empty() {
            None
        } else {
            Some(name.to_uppercase())
        };
    }
    if let Some(text) = input.borrowed_date.as_deref() {
        game.borrowed_date = match parse_borrow_date(text) {
            Ok(date) => Some(date),
            Err(err) => {
                warn!(
                    "event=borrow_date_parse module=service status=skipped game_id={} reason={}",
                    game.uuid,
                    err.code()
                );
                None
            }
        };
    }
}
