//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `gameshelf_core` linkage and print its version.
//! - Dump the configured store as formatted grid rows for quick inspection.

use gameshelf_core::db::open_db;
use gameshelf_core::{
    init_logging, GameListService, ListFilter, RowDisplay, ShelfConfig, SqliteGameRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("gameshelf_core ping={}", gameshelf_core::ping());
    println!("gameshelf_core version={}", gameshelf_core::core_version());

    match dump_store() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gameshelf_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn dump_store() -> Result<(), String> {
    let config = ShelfConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(config.log_level, &log_dir.to_string_lossy())?;
    }

    let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let repo = SqliteGameRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let rows = GameListService::new(repo)
        .fetch_rows(ListFilter::All)
        .map_err(|err| err.to_string())?;

    println!("store={} games={}", config.db_path.display(), rows.len());
    for row in &rows {
        println!("{}", row_line(row));
    }
    Ok(())
}

fn row_line(row: &RowDisplay) -> String {
    format!(
        "{} | {} | {} | {}",
        row.title_text,
        row.borrowed_text.text,
        row.borrowed_to_text.text,
        row.borrowed_date_text.text
    )
}
