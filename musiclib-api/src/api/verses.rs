//! Lyrics verse browsing
//!
//! A page past the last verse is answered with an empty list and status 200;
//! 404 only means the song id does not exist.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{load_song, parse_song_id, query_rejection};
use crate::pagination::{paginate_verses, PageRequest, DEFAULT_VERSES_LIMIT};
use crate::{ApiResult, AppState};

/// Query parameters for verse pagination
#[derive(Debug, Default, Deserialize)]
pub struct VersesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Song header plus one page of verses
#[derive(Debug, Serialize)]
pub struct SongVersesResponse {
    pub song: String,
    pub group: String,
    pub release_date: String,
    pub verses: Vec<String>,
    pub page: i64,
    pub limit: i64,
    /// Verse count of the whole song
    pub total: usize,
}

/// GET /songs/:id/verses
pub async fn get_song_verses(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<VersesQuery>, QueryRejection>,
) -> ApiResult<Json<SongVersesResponse>> {
    let id = parse_song_id(&id)?;
    let song = load_song(&state, id).await?;
    let Query(query) = query.map_err(query_rejection)?;

    let page = PageRequest::from_query(
        query.page.as_deref(),
        query.limit.as_deref(),
        DEFAULT_VERSES_LIMIT,
    )?;

    let verse_page = paginate_verses(&song.text, page.page, page.limit);
    let total = verse_page.total;
    let verses: Vec<String> = verse_page.verses.into_iter().map(str::to_string).collect();

    if verses.is_empty() {
        warn!("No more verses available for song ID: {}", id);
    } else {
        info!(
            "Returning verses for song ID: {}, page: {}, limit: {}",
            id, page.page, page.limit
        );
    }

    Ok(Json(SongVersesResponse {
        song: song.song,
        group: song.group,
        release_date: song.release_date,
        verses,
        page: page.page,
        limit: page.limit,
        total,
    }))
}
