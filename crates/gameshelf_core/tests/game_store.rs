use chrono::NaiveDate;
use gameshelf_core::db::open_db_in_memory;
use gameshelf_core::{
    Game, GameListQuery, GameRepository, ListFilter, RepoError, SqliteGameRepository,
};
use rusqlite::Connection;

fn stored_game(title: &str, date_created: i64) -> Game {
    let mut game = Game::new();
    game.title = title.to_string();
    game.date_created = Some(date_created);
    game
}

fn lent(mut game: Game, name: &str) -> Game {
    game.borrowed = true;
    game.borrowed_to = Some(name.to_string());
    game.borrowed_date = NaiveDate::from_ymd_opt(2024, 5, 1);
    game
}

#[test]
fn save_and_get_roundtrip_keeps_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let mut game = lent(stored_game("Catan", 1_000), "ANA");
    game.image = vec![0x89, 0x50, 0x4e, 0x47];
    repo.save_game(&game).unwrap();

    let loaded = repo.get_game(game.uuid).unwrap().unwrap();
    assert_eq!(loaded, game);
}

#[test]
fn empty_image_is_stored_as_empty_blob() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let game = stored_game("Go", 1_000);
    repo.save_game(&game).unwrap();

    let loaded = repo.get_game(game.uuid).unwrap().unwrap();
    assert!(loaded.image.is_empty());
}

#[test]
fn create_game_allocates_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let draft = repo.create_game();
    assert!(!draft.is_persisted());
    assert!(repo.get_game(draft.uuid).unwrap().is_none());
    assert!(repo.list_games(&GameListQuery::default()).unwrap().is_empty());
}

#[test]
fn save_replaces_existing_row_in_place() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let game = lent(stored_game("Catan", 1_000), "ANA");
    repo.save_game(&game).unwrap();

    let mut edited = game.clone();
    edited.title = "Catan 2nd".to_string();
    edited.clear_loan();
    edited.date_created = Some(2_000);
    repo.save_game(&edited).unwrap();

    let all = repo.list_games(&GameListQuery::default()).unwrap();
    assert_eq!(all, vec![edited]);
}

#[test]
fn save_rejects_drafts_and_invalid_games() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let draft = Game::new();
    let err = repo.save_game(&draft).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));

    let mut invalid = stored_game("Go", 1_000);
    invalid.borrowed_to = Some("ANA".to_string());
    let err = repo.save_game(&invalid).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn list_orders_by_date_created_desc_and_filters_borrowed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let oldest = lent(stored_game("oldest", 1_000), "ANA");
    let newest = stored_game("newest", 3_000);
    let middle = lent(stored_game("middle", 2_000), "LUIS");
    for game in [&oldest, &newest, &middle] {
        repo.save_game(game).unwrap();
    }

    let titles = |filter| {
        repo.list_games(&GameListQuery {
            filter,
            ..GameListQuery::default()
        })
        .unwrap()
        .into_iter()
        .map(|game| game.title)
        .collect::<Vec<_>>()
    };
    assert_eq!(titles(ListFilter::All), vec!["newest", "middle", "oldest"]);
    assert_eq!(titles(ListFilter::BorrowedOnly), vec!["middle", "oldest"]);
}

#[test]
fn list_supports_limit_and_offset() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();
    for idx in 0..5 {
        repo.save_game(&stored_game(&format!("game {idx}"), idx))
            .unwrap();
    }

    let page = repo
        .list_games(&GameListQuery {
            limit: Some(2),
            offset: 1,
            ..GameListQuery::default()
        })
        .unwrap();
    let titles: Vec<_> = page.iter().map(|game| game.title.as_str()).collect();
    assert_eq!(titles, vec!["game 3", "game 2"]);

    let tail = repo
        .list_games(&GameListQuery {
            offset: 3,
            ..GameListQuery::default()
        })
        .unwrap();
    assert_eq!(tail.len(), 2);
}

#[test]
fn delete_removes_row_and_reports_missing_identity() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let game = stored_game("Go", 1_000);
    repo.save_game(&game).unwrap();
    repo.delete_game(game.uuid).unwrap();
    assert!(repo.get_game(game.uuid).unwrap().is_none());

    let err = repo.delete_game(game.uuid).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == game.uuid));
}

#[test]
fn read_path_rejects_corrupted_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO games (uuid, title, date_created) VALUES ('not-a-uuid', 'x', 1);",
        [],
    )
    .unwrap();
    let repo = SqliteGameRepository::try_new(&conn).unwrap();

    let err = repo.list_games(&GameListQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_connection_without_schema() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteGameRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("games")));

    conn.execute_batch("CREATE TABLE games (uuid TEXT PRIMARY KEY, title TEXT);")
        .unwrap();
    let err = SqliteGameRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::MissingRequiredColumn {
            table: "games",
            column: "borrowed"
        }
    ));
}
