//! Song catalog endpoints
//!
//! - `GET /songs` filtered, paginated list
//! - `POST /songs` create with enrichment
//! - `PATCH /songs/:id` partial update
//! - `DELETE /songs/:id` delete

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use musiclib_common::{validate_release_date, Song, SongInput, SongPatch};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{load_song, parse_song_id, query_rejection};
use crate::db::songs::{self, is_unique_violation, SongFilter};
use crate::pagination::{PageRequest, DEFAULT_SONGS_LIMIT};
use crate::{ApiError, ApiResult, AppState};

/// Query parameters for `GET /songs`
///
/// Numeric values are kept as text so malformed input gets the same 400
/// response as out-of-range input.
#[derive(Debug, Default, Deserialize)]
pub struct ListSongsQuery {
    pub group: Option<String>,
    pub song: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Song list with pagination metadata
#[derive(Debug, Serialize)]
pub struct SongListResponse {
    /// Matches across all pages
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub songs: Vec<Song>,
}

/// Plain acknowledgment body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /songs
pub async fn list_songs(
    State(state): State<AppState>,
    query: Result<Query<ListSongsQuery>, QueryRejection>,
) -> ApiResult<Json<SongListResponse>> {
    let Query(query) = query.map_err(query_rejection)?;

    let page = PageRequest::from_query(
        query.page.as_deref(),
        query.limit.as_deref(),
        DEFAULT_SONGS_LIMIT,
    )?;

    let filter = SongFilter::new(
        query.group.as_deref(),
        query.song.as_deref(),
        query.release_date.as_deref(),
    );

    if let Some(release_date) = &filter.release_date {
        validate_release_date(release_date).map_err(|e| {
            warn!("Rejected releaseDate filter {}: {}", release_date, e);
            ApiError::InvalidParameter(e.to_string())
        })?;
    }

    let total = songs::count_songs(&state.db, &filter).await?;
    let songs = songs::find_songs(&state.db, &filter, page).await?;

    if songs.is_empty() {
        warn!("No songs found matching the provided filters");
    } else {
        info!("Retrieved {} songs", songs.len());
    }

    Ok(Json(SongListResponse {
        total,
        page: page.page,
        limit: page.limit,
        songs,
    }))
}

/// POST /songs
///
/// **Request:** `{"group": "Muse", "song": "Uprising"}`
///
/// Release date, lyrics and link come from the enrichment service.
///
/// **Errors:**
/// - 400: malformed body or empty group/song
/// - 409: a song with the same group and title exists
/// - 500: enrichment or database failure
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let Json(input) = payload.map_err(|e| {
        warn!("Failed to bind JSON: {}", e);
        ApiError::InvalidParameter(e.body_text())
    })?;

    if !input.is_complete() {
        warn!("Rejected song without group or title: {:?}", input);
        return Err(ApiError::InvalidParameter(
            "Both group and song are required".to_string(),
        ));
    }

    if songs::find_song_by_name(&state.db, &input.group, &input.song)
        .await?
        .is_some()
    {
        warn!("Song already exists: {} by {}", input.song, input.group);
        return Err(duplicate_song());
    }

    let detail = state
        .enrichment
        .fetch_song_details(&input.group, &input.song)
        .await?;

    // The existence check above is not atomic with this insert; the UNIQUE
    // constraint catches a concurrent create of the same pair.
    let song = songs::insert_song(&state.db, &input.group, &input.song, &detail)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("Song already exists: {} by {}", input.song, input.group);
                duplicate_song()
            } else {
                ApiError::Store(e)
            }
        })?;

    info!("Created song: {} by {} with ID: {}", song.song, song.group, song.id);

    Ok(Json(song))
}

/// PATCH /songs/:id
///
/// Only fields present and non-empty in the body are changed. The id itself
/// cannot be changed, group and song cannot be set to whitespace, and
/// `release_date` must be `DD.MM.YYYY` and not in the future.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SongPatch>, JsonRejection>,
) -> ApiResult<Json<Song>> {
    let id = parse_song_id(&id)?;
    let mut song = load_song(&state, id).await?;

    let Json(patch) = payload.map_err(|e| {
        warn!("Failed to bind JSON for updating song ID: {}, error: {}", id, e);
        ApiError::InvalidParameter(e.body_text())
    })?;

    if patch.changes_id(song.id) {
        warn!("Attempt to change ID for song ID: {}, new ID: {:?}", id, patch.id);
        return Err(ApiError::InvalidParameter(
            "Changing the song ID is not allowed".to_string(),
        ));
    }

    if patch.blanks_name() {
        warn!("Rejected blank group or title for song ID: {}", id);
        return Err(ApiError::InvalidParameter(
            "Group and song cannot be blank".to_string(),
        ));
    }

    if let Some(release_date) = patch.release_date() {
        validate_release_date(release_date).map_err(|e| {
            warn!("Rejected release date for song ID: {}: {}", id, e);
            ApiError::InvalidParameter(e.to_string())
        })?;
    }

    patch.apply_to(&mut song);

    let updated = songs::update_song(&state.db, &song).await.map_err(|e| {
        if is_unique_violation(&e) {
            warn!("Update of song ID: {} collides with an existing song", id);
            duplicate_song()
        } else {
            ApiError::Store(e)
        }
    })?;

    if !updated {
        warn!("Song ID: {} disappeared before update", id);
        return Err(song_not_found());
    }

    info!("Updated song: {} by {} with ID: {}", song.song, song.group, id);

    Ok(Json(song))
}

/// DELETE /songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_song_id(&id)?;
    let song = load_song(&state, id).await?;

    if !songs::delete_song(&state.db, id).await? {
        warn!("Song ID: {} disappeared before delete", id);
        return Err(song_not_found());
    }

    info!("Deleted song: {} by {} with ID: {}", song.song, song.group, id);

    Ok(Json(MessageResponse {
        message: "Song deleted successfully".to_string(),
    }))
}

fn duplicate_song() -> ApiError {
    ApiError::Conflict("Song already exists in the library".to_string())
}

fn song_not_found() -> ApiError {
    ApiError::NotFound("Song not found".to_string())
}
