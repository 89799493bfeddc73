//! Song enrichment API client
//!
//! Looks up release date, lyrics and link for a (group, song) pair:
//! `GET {base_url}?group=..&song=..` answering `{releaseDate, text, link}`.
//! Failures are reported immediately; nothing is retried.

use musiclib_common::SongDetail;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("musiclib/", env!("CARGO_PKG_VERSION"));

/// Enrichment client errors
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Enrichment service client
#[derive(Debug, Clone)]
pub struct EnrichmentClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl EnrichmentClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, EnrichmentError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| EnrichmentError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch release date, lyrics and link for a song
    pub async fn fetch_song_details(
        &self,
        group: &str,
        song: &str,
    ) -> Result<SongDetail, EnrichmentError> {
        tracing::debug!(group = %group, song = %song, url = %self.base_url, "Querying enrichment API");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let reason = status.canonical_reason().unwrap_or("").to_string();
            return Err(EnrichmentError::Status(status.as_u16(), reason));
        }

        let detail: SongDetail = response.json().await.map_err(|e| {
            if e.is_timeout() {
                EnrichmentError::Timeout(self.timeout)
            } else {
                EnrichmentError::ParseError(e.to_string())
            }
        })?;

        tracing::info!(group = %group, song = %song, "Retrieved song details");

        Ok(detail)
    }

    fn request_error(&self, err: reqwest::Error) -> EnrichmentError {
        if err.is_timeout() {
            EnrichmentError::Timeout(self.timeout)
        } else {
            EnrichmentError::NetworkError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = EnrichmentClient::new("http://localhost:9/info", Duration::from_secs(1));
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://localhost:9/info");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let client =
            EnrichmentClient::new("http://127.0.0.1:9/info", Duration::from_secs(2)).unwrap();
        let err = client.fetch_song_details("Muse", "Uprising").await.unwrap_err();
        assert!(matches!(
            err,
            EnrichmentError::NetworkError(_) | EnrichmentError::Timeout(_)
        ));
    }
}
