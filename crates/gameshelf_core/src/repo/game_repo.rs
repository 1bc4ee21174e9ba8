//! Game repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Allocate, upsert, fetch and delete games in the local store.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Game::validate()` and require `date_created`.
//! - Read paths reject persisted rows that break the borrowed-state invariant.
//! - Lists are ordered by `date_created DESC, uuid ASC`.

use crate::db::DbError;
use crate::model::game::{Game, GameId, GameValidationError};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const GAME_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    borrowed,
    borrowed_to,
    borrowed_date,
    image,
    date_created
FROM games";

const REQUIRED_COLUMNS: &[&str] = &[
    "uuid",
    "title",
    "borrowed",
    "borrowed_to",
    "borrowed_date",
    "image",
    "date_created",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for game persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(GameValidationError),
    Db(DbError),
    NotFound(GameId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "game not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid game data: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GameValidationError> for RepoError {
    fn from(value: GameValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Which games a list query returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListFilter {
    /// Every stored game.
    #[default]
    All,
    /// Only games with `borrowed == true`.
    BorrowedOnly,
}

/// Sort-and-filter options for listing games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameListQuery {
    pub filter: ListFilter,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Storage contract consumed by the editor and list services.
pub trait GameRepository {
    /// Allocates a fresh identity. Nothing is written until `save_game`.
    fn create_game(&self) -> Game {
        Game::new()
    }
    /// Inserts or fully replaces one game.
    fn save_game(&self, game: &Game) -> RepoResult<()>;
    fn get_game(&self, id: GameId) -> RepoResult<Option<Game>>;
    fn list_games(&self, query: &GameListQuery) -> RepoResult<Vec<Game>>;
    /// Removes one game permanently.
    fn delete_game(&self, id: GameId) -> RepoResult<()>;
}

/// SQLite-backed game repository.
pub struct SqliteGameRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGameRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// Fails when the connection lacks the `games` schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl GameRepository for SqliteGameRepository<'_> {
    fn save_game(&self, game: &Game) -> RepoResult<()> {
        game.validate()?;
        let date_created = game.date_created.ok_or_else(|| {
            RepoError::InvalidData(format!("game {} has no date_created", game.uuid))
        })?;

        self.conn.execute(
            "INSERT INTO games (
                uuid,
                title,
                borrowed,
                borrowed_to,
                borrowed_date,
                image,
                date_created
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(uuid) DO UPDATE SET
                title = excluded.title,
                borrowed = excluded.borrowed,
                borrowed_to = excluded.borrowed_to,
                borrowed_date = excluded.borrowed_date,
                image = excluded.image,
                date_created = excluded.date_created;",
            params![
                game.uuid.to_string(),
                game.title.as_str(),
                i64::from(game.borrowed),
                game.borrowed_to.as_deref(),
                game.borrowed_date,
                game.image.as_slice(),
                date_created,
            ],
        )?;

        Ok(())
    }

    fn get_game(&self, id: GameId) -> RepoResult<Option<Game>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{GAME_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_game_row(row)?));
        }
        Ok(None)
    }

    fn list_games(&self, query: &GameListQuery) -> RepoResult<Vec<Game>> {
        let mut sql = String::from(GAME_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        if query.filter == ListFilter::BorrowedOnly {
            sql.push_str(" WHERE borrowed = 1");
        }

        sql.push_str(" ORDER BY date_created DESC, uuid ASC");

        match (query.limit, query.offset) {
            (Some(limit), offset) => {
                sql.push_str(" LIMIT ? OFFSET ?");
                bind_values.push(Value::Integer(i64::from(limit)));
                bind_values.push(Value::Integer(i64::from(offset)));
            }
            (None, 0) => {}
            (None, offset) => {
                sql.push_str(" LIMIT -1 OFFSET ?");
                bind_values.push(Value::Integer(i64::from(offset)));
            }
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut games = Vec::new();
        while let Some(row) = rows.next()? {
            games.push(parse_game_row(row)?);
        }
        Ok(games)
    }

    fn delete_game(&self, id: GameId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM games WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_game_row(row: &Row<'_>) -> RepoResult<Game> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in games.uuid"))
    })?;

    let borrowed = match row.get::<_, i64>("borrowed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid borrowed value `{other}` in games.borrowed"
            )));
        }
    };

    let borrowed_date: Option<NaiveDate> = row.get("borrowed_date")?;
    let game = Game {
        uuid,
        title: row.get("title")?,
        borrowed,
        borrowed_to: row.get("borrowed_to")?,
        borrowed_date,
        image: row.get("image")?,
        date_created: Some(row.get("date_created")?),
    };
    game.validate()?;
    Ok(game)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'games'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("games"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(games);")?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(1)?);
    }

    for &column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "games",
                column,
            });
        }
    }
    Ok(())
}
