//! FFI use-case API for the Flutter game grid and edit form.
//!
//! # Responsibility
//! - Expose form/grid level functions to Dart via FRB.
//! - Fold every core error into a response envelope with a message.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each call opens the configured store, so a save is visible to the next
//!   list call.
//! - Colours cross the boundary as `0xRRGGBB`.

use gameshelf_core::db::open_db;
use gameshelf_core::{
    borrow_fields_for_toggle, core_version as core_version_inner, format_row,
    init_logging as init_logging_inner, ping as ping_inner, FieldInput, Game, GameEditor,
    GameListService, GameRepository, ListFilter, RowDisplay, ShelfConfig, SqliteGameRepository,
    TwoToneText,
};
use log::warn;
use rusqlite::Connection;
use std::sync::OnceLock;
use uuid::Uuid;

static SHELF_CONFIG: OnceLock<Result<ShelfConfig, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One coloured label of a grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLabel {
    pub text: String,
    /// Byte offset where the highlight colour starts; text before it is black.
    pub accent_start: u32,
    pub accent_rgb: u32,
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRowItem {
    pub game_id: String,
    pub title: String,
    pub borrowed: RowLabel,
    pub borrowed_to: RowLabel,
    pub borrowed_date: RowLabel,
    pub highlight_rgb: u32,
    /// Photo bytes; empty when the game has no photo.
    pub image: Vec<u8>,
}

/// Grid response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameListResponse {
    pub ok: bool,
    /// Cells sorted newest first. Empty means the grid shows its empty state.
    pub items: Vec<GameRowItem>,
    pub message: String,
}

/// Edit-form pre-fill for one stored game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFormResponse {
    pub ok: bool,
    pub message: String,
    pub title: String,
    pub borrowed: bool,
    pub borrowed_to: String,
    pub borrowed_date: String,
    pub image: Vec<u8>,
}

impl GameFormResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            title: String::new(),
            borrowed: false,
            borrowed_to: String::new(),
            borrowed_date: String::new(),
            image: Vec::new(),
        }
    }
}

/// Form values submitted by the save button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSaveRequest {
    /// `None` creates a new game; `Some(id)` edits an existing one.
    pub game_id: Option<String>,
    pub title: String,
    pub borrowed: bool,
    pub borrowed_to: Option<String>,
    /// `dd/mm/yyyy`; unparsable text is dropped, the save still succeeds.
    pub borrowed_date: Option<String>,
    pub image: Option<Vec<u8>>,
}

/// Result envelope for save/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameActionResponse {
    pub ok: bool,
    pub game_id: Option<String>,
    pub message: String,
}

impl GameActionResponse {
    fn success(message: impl Into<String>, game_id: String) -> Self {
        Self {
            ok: true,
            game_id: Some(game_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            game_id: None,
            message: message.into(),
        }
    }
}

/// Borrower/date input state after the borrowed switch flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowFieldsResponse {
    pub enabled: bool,
    pub borrowed_to_text: String,
    pub borrowed_date_text: String,
}

/// Lists games for the grid.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `borrowed_only = true` keeps only lent games.
#[flutter_rust_bridge::frb(sync)]
pub fn games_list(borrowed_only: bool) -> GameListResponse {
    let filter = if borrowed_only {
        ListFilter::BorrowedOnly
    } else {
        ListFilter::All
    };

    let result = with_store(|conn| {
        let repo = SqliteGameRepository::try_new(conn).map_err(|err| err.to_string())?;
        let games = GameListService::new(repo)
            .fetch(filter)
            .map_err(|err| err.to_string())?;
        Ok(games.iter().map(to_row_item).collect::<Vec<_>>())
    });

    match result {
        Ok(items) => {
            let message = if items.is_empty() {
                "No games.".to_string()
            } else {
                format!("Found {} game(s).", items.len())
            };
            GameListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => GameListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("games_list failed: {err}"),
        },
    }
}

/// Loads one game into edit-form fields.
#[flutter_rust_bridge::frb(sync)]
pub fn game_form(game_id: String) -> GameFormResponse {
    let result = with_store(|conn| {
        let game = load_game(conn, &game_id)?;
        Ok(FieldInput::from_game(&game))
    });

    match result {
        Ok(input) => GameFormResponse {
            ok: true,
            message: String::new(),
            title: input.title,
            borrowed: input.borrowed,
            borrowed_to: input.borrowed_to.unwrap_or_default(),
            borrowed_date: input.borrowed_date.unwrap_or_default(),
            image: input.image.unwrap_or_default(),
        },
        Err(err) => GameFormResponse::failure(format!("game_form failed: {err}")),
    }
}

/// Creates or edits one game from submitted form values.
#[flutter_rust_bridge::frb(sync)]
pub fn game_save(request: GameSaveRequest) -> GameActionResponse {
    let input = FieldInput {
        title: request.title,
        borrowed: request.borrowed,
        borrowed_to: request.borrowed_to,
        borrowed_date: request.borrowed_date,
        image: request.image,
    };

    let result = with_store(|conn| {
        let existing = match request.game_id.as_deref() {
            Some(game_id) => Some(load_game(conn, game_id)?),
            None => None,
        };
        let repo = SqliteGameRepository::try_new(conn).map_err(|err| err.to_string())?;
        GameEditor::new(repo)
            .save(existing.as_ref(), &input)
            .map_err(|err| err.to_string())
    });

    match result {
        Ok(game) => GameActionResponse::success("Game saved.", game.uuid.to_string()),
        Err(err) => GameActionResponse::failure(format!("game_save failed: {err}")),
    }
}

/// Deletes one game permanently.
#[flutter_rust_bridge::frb(sync)]
pub fn game_delete(game_id: String) -> GameActionResponse {
    let result = with_store(|conn| {
        let game = load_game(conn, &game_id)?;
        let repo = SqliteGameRepository::try_new(conn).map_err(|err| err.to_string())?;
        GameEditor::new(repo)
            .delete(&game)
            .map_err(|err| err.to_string())?;
        Ok(game.uuid)
    });

    match result {
        Ok(id) => GameActionResponse::success("Game deleted.", id.to_string()),
        Err(err) => GameActionResponse::failure(format!("game_delete failed: {err}")),
    }
}

/// Field-enablement for the borrowed switch.
#[flutter_rust_bridge::frb(sync)]
pub fn borrow_toggle(borrowed: bool) -> BorrowFieldsResponse {
    let fields = borrow_fields_for_toggle(borrowed);
    BorrowFieldsResponse {
        enabled: fields.enabled,
        borrowed_to_text: fields.borrowed_to_text,
        borrowed_date_text: fields.borrowed_date_text,
    }
}

fn shelf_config() -> Result<&'static ShelfConfig, String> {
    SHELF_CONFIG
        .get_or_init(ShelfConfig::from_env)
        .as_ref()
        .map_err(|err| format!("invalid configuration: {err}"))
}

fn with_store<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let config = shelf_config()?;
    let conn = open_db(&config.db_path).map_err(|err| {
        warn!("event=ffi_store_open module=ffi status=error error={err}");
        format!("store open failed: {err}")
    })?;
    f(&conn)
}

fn load_game(conn: &Connection, game_id: &str) -> Result<Game, String> {
    let id = Uuid::parse_str(game_id.trim()).map_err(|_| format!("invalid game id `{game_id}`"))?;
    let repo = SqliteGameRepository::try_new(conn).map_err(|err| err.to_string())?;
    repo.get_game(id)
        .map_err(|err| err.to_string())?
        .ok_or_else(|| format!("game not found: {id}"))
}

fn to_row_item(game: &Game) -> GameRowItem {
    let RowDisplay {
        title_text,
        borrowed_text,
        borrowed_to_text,
        borrowed_date_text,
        highlight_color,
    } = format_row(game);

    GameRowItem {
        game_id: game.uuid.to_string(),
        title: title_text,
        borrowed: to_row_label(borrowed_text),
        borrowed_to: to_row_label(borrowed_to_text),
        borrowed_date: to_row_label(borrowed_date_text),
        highlight_rgb: highlight_color.rgb(),
        image: game.image.clone(),
    }
}

fn to_row_label(label: TwoToneText) -> RowLabel {
    RowLabel {
        accent_start: u32::try_from(label.accent_start).unwrap_or(u32::MAX),
        accent_rgb: label.accent.rgb(),
        text: label.text,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        borrow_toggle, core_version, game_delete, game_form, game_save, games_list, init_logging,
        ping, GameSaveRequest,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn save_list_form_and_delete_roundtrip() {
        let title = unique_title("ffi-roundtrip");
        let saved = game_save(GameSaveRequest {
            title: title.clone(),
            borrowed: true,
            borrowed_to: Some("maria".to_string()),
            borrowed_date: Some("01/05/2024".to_string()),
            ..GameSaveRequest::default()
        });
        assert!(saved.ok, "{}", saved.message);
        let game_id = saved.game_id.expect("save should return game_id");

        let listed = games_list(true);
        assert!(listed.ok, "{}", listed.message);
        let row = listed
            .items
            .iter()
            .find(|item| item.game_id == game_id)
            .expect("saved game should be listed");
        assert_eq!(row.title, title);
        assert_eq!(row.borrowed_to.text, "TO: MARIA");
        assert_eq!(row.borrowed_date.text, "DATE: 01/05/2024");
        assert_eq!(row.borrowed_date.accent_start, 5);
        assert_eq!(row.highlight_rgb, 0xE74C3C);

        let form = game_form(game_id.clone());
        assert!(form.ok, "{}", form.message);
        assert_eq!(form.borrowed_to, "MARIA");
        assert_eq!(form.borrowed_date, "01/05/2024");

        let returned = game_save(GameSaveRequest {
            game_id: Some(game_id.clone()),
            title: title.clone(),
            borrowed: false,
            borrowed_to: Some("maria".to_string()),
            ..GameSaveRequest::default()
        });
        assert!(returned.ok, "{}", returned.message);
        let form = game_form(game_id.clone());
        assert!(!form.borrowed);
        assert!(form.borrowed_to.is_empty());
        assert!(form.borrowed_date.is_empty());

        let deleted = game_delete(game_id.clone());
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!games_list(false)
            .items
            .iter()
            .any(|item| item.game_id == game_id));

        let again = game_delete(game_id);
        assert!(!again.ok);
    }

    #[test]
    fn save_passes_title_through_untrimmed() {
        let title = format!("  {}  ", unique_title("ffi-padded"));
        let saved = game_save(GameSaveRequest {
            title: title.clone(),
            ..GameSaveRequest::default()
        });
        assert!(saved.ok, "{}", saved.message);
        let game_id = saved.game_id.expect("save should return game_id");

        let form = game_form(game_id.clone());
        assert!(form.ok, "{}", form.message);
        assert_eq!(form.title, title);

        assert!(game_delete(game_id).ok);
    }

    #[test]
    fn game_form_rejects_invalid_id() {
        let response = game_form("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid game id"));
    }

    #[test]
    fn borrow_toggle_follows_switch() {
        let on = borrow_toggle(true);
        assert!(on.enabled);
        assert_eq!(on.borrowed_date_text.len(), "dd/mm/yyyy".len());

        let off = borrow_toggle(false);
        assert!(!off.enabled);
        assert!(off.borrowed_date_text.is_empty());
    }

    fn unique_title(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
