//! Game grid use-cases: list query and row formatting.
//!
//! # Responsibility
//! - Build the sort/filter query for the grid's filter control.
//! - Turn one game into toolkit-independent row labels and colours.
//!
//! # Invariants
//! - Lists are sorted by `date_created` descending.
//! - Every row label is two-tone: text up to and including the first colon
//!   is neutral, the remainder uses the row highlight colour.
//! - Dates are rendered with the shared `dd/mm/yyyy` pattern.

use crate::model::borrow_date::format_borrow_date;
use crate::model::game::Game;
use crate::repo::game_repo::{GameListQuery, GameRepository, ListFilter, RepoResult};
use log::debug;

/// Pull distance (points, negative is downwards) that opens the add flow.
pub const PULL_TO_ADD_OFFSET: f64 = -120.0;

const EMPTY_VALUE: &str = "--";

impl ListFilter {
    /// Maps the grid's segmented control: segment 0 is "borrowed", any other
    /// segment is "all".
    pub fn from_segment_index(index: usize) -> Self {
        if index == 0 {
            Self::BorrowedOnly
        } else {
            Self::All
        }
    }
}

/// Colours used by row labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowColor {
    /// Label prefixes (`BORROWED:`, `TO:`, `DATE:`).
    Neutral,
    /// Highlight of games currently lent out.
    Borrowed,
    /// Highlight of games on the shelf.
    Available,
}

impl RowColor {
    /// Returns the colour as `0xRRGGBB`.
    pub fn rgb(self) -> u32 {
        match self {
            Self::Neutral => 0x000000,
            Self::Borrowed => 0xE74C3C,
            Self::Available => 0x3498DB,
        }
    }
}

/// Label text split into a neutral prefix and an accent remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoToneText {
    pub text: String,
    /// Byte offset where the accent segment starts.
    pub accent_start: usize,
    pub accent: RowColor,
}

impl TwoToneText {
    /// Splits `text` after its first colon; without a colon the whole text is
    /// accented.
    pub fn new(text: impl Into<String>, accent: RowColor) -> Self {
        let text = text.into();
        let accent_start = text.find(':').map_or(0, |colon| colon + 1);
        Self {
            text,
            accent_start,
            accent,
        }
    }

    pub fn neutral_segment(&self) -> &str {
        &self.text[..self.accent_start]
    }

    pub fn accent_segment(&self) -> &str {
        &self.text[self.accent_start..]
    }

    /// Non-empty `(segment, colour)` pairs in display order.
    pub fn segments(&self) -> Vec<(&str, RowColor)> {
        [
            (self.neutral_segment(), RowColor::Neutral),
            (self.accent_segment(), self.accent),
        ]
        .into_iter()
        .filter(|(segment, _)| !segment.is_empty())
        .collect()
    }
}

/// Display model of one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDisplay {
    pub title_text: String,
    pub borrowed_text: TwoToneText,
    pub borrowed_to_text: TwoToneText,
    pub borrowed_date_text: TwoToneText,
    pub highlight_color: RowColor,
}

/// Formats one game for the grid.
pub fn format_row(game: &Game) -> RowDisplay {
    let highlight_color = if game.borrowed {
        RowColor::Borrowed
    } else {
        RowColor::Available
    };

    let borrowed_value = if game.borrowed { "YES" } else { "NO" };
    let borrowed_to_value = game.borrowed_to.as_deref().unwrap_or(EMPTY_VALUE);
    let borrowed_date_value = game
        .borrowed_date
        .map(format_borrow_date)
        .unwrap_or_else(|| EMPTY_VALUE.to_string());

    RowDisplay {
        title_text: game.title.clone(),
        borrowed_text: TwoToneText::new(format!("BORROWED: {borrowed_value}"), highlight_color),
        borrowed_to_text: TwoToneText::new(format!("TO: {borrowed_to_value}"), highlight_color),
        borrowed_date_text: TwoToneText::new(
            format!("DATE: {borrowed_date_value}"),
            highlight_color,
        ),
        highlight_color,
    }
}

/// Whether a pull-down of `offset_y` should open the add flow.
pub fn pull_to_add_triggered(offset_y: f64) -> bool {
    offset_y < PULL_TO_ADD_OFFSET
}

/// Grid facade over a game repository.
pub struct GameListService<R: GameRepository> {
    repo: R,
}

impl<R: GameRepository> GameListService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns games for the grid, newest `date_created` first.
    pub fn fetch(&self, filter: ListFilter) -> RepoResult<Vec<Game>> {
        let query = GameListQuery {
            filter,
            ..GameListQuery::default()
        };
        let games = self.repo.list_games(&query)?;
        debug!(
            "event=game_list module=service status=ok filter={filter:?} count={}",
            games.len()
        );
        Ok(games)
    }

    /// Fetches and formats in one step.
    pub fn fetch_rows(&self, filter: ListFilter) -> RepoResult<Vec<RowDisplay>> {
        Ok(self.fetch(filter)?.iter().map(format_row).collect())
    }
}
