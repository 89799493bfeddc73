//! HTTP API handlers for musiclib-api

use axum::{
    extract::rejection::QueryRejection,
    routing::{get, patch},
    Router,
};
use musiclib_common::Song;

use crate::db::songs::find_song_by_id;
use crate::{ApiError, ApiResult, AppState};

pub mod health;
pub mod songs;
pub mod verses;

pub use health::health_routes;
pub use songs::{create_song, delete_song, list_songs, update_song};
pub use verses::get_song_verses;

/// Build song catalog routes
pub fn song_routes() -> Router<AppState> {
    Router::new()
        .route("/songs", get(list_songs).post(create_song))
        .route("/songs/:id", patch(update_song).delete(delete_song))
        .route("/songs/:id/verses", get(get_song_verses))
}

/// Parse a song id path segment; ids are positive integers
pub(crate) fn parse_song_id(raw: &str) -> ApiResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => {
            tracing::warn!("Invalid song ID: {}", raw);
            Err(ApiError::InvalidParameter("Invalid song ID".to_string()))
        }
    }
}

/// Load a song or fail with 404
pub(crate) async fn load_song(state: &AppState, id: i64) -> ApiResult<Song> {
    find_song_by_id(&state.db, id).await?.ok_or_else(|| {
        tracing::warn!("Song not found with ID: {}", id);
        ApiError::NotFound("Song not found".to_string())
    })
}

/// Query strings that fail to deserialize get the standard JSON error body
pub(crate) fn query_rejection(rejection: QueryRejection) -> ApiError {
    tracing::warn!("Failed to parse query string: {}", rejection);
    ApiError::InvalidParameter(rejection.body_text())
}
