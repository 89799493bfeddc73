//! Song database operations

use musiclib_common::{Song, SongDetail};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::pagination::PageRequest;

const SONG_COLUMNS: &str = r#"SELECT id, "group", song, release_date, text, link FROM songs"#;

/// Optional filters for the song list
///
/// `group` and `song` match case-insensitive substrings against the
/// lowercased `group_folded`/`song_folded` columns, so non-ASCII names fold
/// too; `release_date` matches exactly and must be validated by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<String>,
}

impl SongFilter {
    /// Build a filter from raw query values; empty strings mean "no filter"
    pub fn new(group: Option<&str>, song: Option<&str>, release_date: Option<&str>) -> Self {
        fn present(value: Option<&str>) -> Option<String> {
            value.filter(|v| !v.is_empty()).map(str::to_string)
        }

        Self {
            group: present(group),
            song: present(song),
            release_date: present(release_date),
        }
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut separator = " WHERE ";

        if let Some(group) = &self.group {
            qb.push(separator)
                .push("group_folded LIKE ")
                .push_bind(like_pattern(&fold_case(group)))
                .push(r" ESCAPE '\'");
            separator = " AND ";
        }
        if let Some(song) = &self.song {
            qb.push(separator)
                .push("song_folded LIKE ")
                .push_bind(like_pattern(&fold_case(song)))
                .push(r" ESCAPE '\'");
            separator = " AND ";
        }
        if let Some(release_date) = &self.release_date {
            qb.push(separator)
                .push("release_date = ")
                .push_bind(release_date.clone());
        }
    }
}

/// Lowercase form stored in the search columns and applied to filter values
pub(crate) fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Wrap `value` in `%` wildcards, escaping LIKE metacharacters it contains
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// True when `err` is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Count songs matching `filter`, ignoring pagination
pub async fn count_songs(pool: &SqlitePool, filter: &SongFilter) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM songs");
    filter.push_conditions(&mut qb);

    qb.build_query_scalar::<i64>().fetch_one(pool).await
}

/// Load one page of songs matching `filter`, ordered by id
pub async fn find_songs(
    pool: &SqlitePool,
    filter: &SongFilter,
    page: PageRequest,
) -> Result<Vec<Song>, sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new(SONG_COLUMNS);
    filter.push_conditions(&mut qb);
    qb.push(" ORDER BY id ASC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset());

    qb.build_query_as::<Song>().fetch_all(pool).await
}

/// Load song by id
pub async fn find_song_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Song>, sqlx::Error> {
    sqlx::query_as::<_, Song>(&format!("{} WHERE id = ?", SONG_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Load song by exact (group, song) pair
pub async fn find_song_by_name(
    pool: &SqlitePool,
    group: &str,
    song: &str,
) -> Result<Option<Song>, sqlx::Error> {
    sqlx::query_as::<_, Song>(&format!(r#"{} WHERE "group" = ? AND song = ?"#, SONG_COLUMNS))
        .bind(group)
        .bind(song)
        .fetch_optional(pool)
        .await
}

/// Insert a new song and return it with its assigned id
pub async fn insert_song(
    pool: &SqlitePool,
    group: &str,
    song: &str,
    detail: &SongDetail,
) -> Result<Song, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO songs ("group", song, release_date, text, link, group_folded, song_folded)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(group)
    .bind(song)
    .bind(&detail.release_date)
    .bind(&detail.text)
    .bind(&detail.link)
    .bind(fold_case(group))
    .bind(fold_case(song))
    .execute(pool)
    .await?;

    Ok(Song {
        id: result.last_insert_rowid(),
        group: group.to_string(),
        song: song.to_string(),
        release_date: detail.release_date.clone(),
        text: detail.text.clone(),
        link: detail.link.clone(),
    })
}

/// Overwrite every mutable column of `song`
///
/// Returns false if no row with `song.id` exists.
pub async fn update_song(pool: &SqlitePool, song: &Song) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE songs
        SET "group" = ?, song = ?, release_date = ?, text = ?, link = ?,
            group_folded = ?, song_folded = ?
        WHERE id = ?
        "#,
    )
    .bind(&song.group)
    .bind(&song.song)
    .bind(&song.release_date)
    .bind(&song.text)
    .bind(&song.link)
    .bind(fold_case(&song.group))
    .bind(fold_case(&song.song))
    .bind(song.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete song by id
///
/// Returns false if no row was deleted.
pub async fn delete_song(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
