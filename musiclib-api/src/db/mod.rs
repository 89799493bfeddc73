//! Database access layer for musiclib-api
//!
//! A single `songs` table, created at startup if missing.

use musiclib_common::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

pub mod songs;

pub use songs::SongFilter;

/// Open a connection pool for `database_url` and create the schema
pub async fn init_database_pool(database_url: &str) -> Result<SqlitePool> {
    tracing::debug!("Connecting to database: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(5));

    // An in-memory database lives and dies with its connection
    let pool_options = if database_url.contains(":memory:") {
        pool_options
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        pool_options.max_connections(5)
    };

    let pool = pool_options.connect_with(options).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Create the `songs` table if it doesn't exist
///
/// The (group, song) uniqueness constraint backs up the duplicate check done
/// before inserting.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            "group" TEXT NOT NULL,
            song TEXT NOT NULL,
            release_date TEXT NOT NULL DEFAULT '',
            text TEXT NOT NULL DEFAULT '',
            link TEXT NOT NULL DEFAULT '',
            group_folded TEXT NOT NULL DEFAULT '',
            song_folded TEXT NOT NULL DEFAULT '',
            UNIQUE ("group", song)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sync_folded_columns(pool).await?;

    tracing::info!("Database tables initialized (songs)");

    Ok(())
}

/// Add the lowercased search columns to a `songs` table created without them
/// and fill them from the stored names
async fn sync_folded_columns(pool: &SqlitePool) -> Result<()> {
    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('songs')")
        .fetch_all(pool)
        .await?;

    let mut added = false;
    for column in ["group_folded", "song_folded"] {
        if !columns.iter().any(|c| c == column) {
            let sql = format!("ALTER TABLE songs ADD COLUMN {} TEXT NOT NULL DEFAULT ''", column);
            sqlx::query(&sql).execute(pool).await?;
            tracing::info!("Added column songs.{}", column);
            added = true;
        }
    }

    if added {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as(r#"SELECT id, "group", song FROM songs"#)
                .fetch_all(pool)
                .await?;
        for (id, group, song) in &rows {
            sqlx::query("UPDATE songs SET group_folded = ?, song_folded = ? WHERE id = ?")
                .bind(songs::fold_case(group))
                .bind(songs::fold_case(song))
                .bind(id)
                .execute(pool)
                .await?;
        }
        tracing::info!("Backfilled search columns for {} songs", rows.len());
    }

    Ok(())
}
