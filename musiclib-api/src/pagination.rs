//! Pagination utilities for musiclib-api
//!
//! Two kinds of pages are served: offset pages over the filtered song list,
//! and verse pages over a single song's lyrics.

use crate::error::ApiError;

/// Default songs per page for `GET /songs`
pub const DEFAULT_SONGS_LIMIT: i64 = 5;

/// Default verses per page for `GET /songs/{id}/verses`
pub const DEFAULT_VERSES_LIMIT: i64 = 1;

/// Verses are separated by a blank line
pub const VERSE_DELIMITER: &str = "\n\n";

/// Validated 1-indexed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Items per page
    pub limit: i64,
}

impl PageRequest {
    /// Parse raw `page`/`limit` query values.
    ///
    /// Absent values take the defaults; anything present must be a positive
    /// integer or the request is rejected.
    pub fn from_query(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: i64,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            page: parse_positive("page", page, 1)?,
            limit: parse_positive("limit", limit, default_limit)?,
        })
    }

    /// Offset for SQL LIMIT/OFFSET query
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Parse a positive integer parameter, falling back to `default` when absent
pub fn parse_positive(name: &str, raw: Option<&str>, default: i64) -> Result<i64, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => {
            tracing::warn!("Invalid {} parameter: {}", name, raw);
            Err(ApiError::InvalidParameter(format!("Invalid {} parameter", name)))
        }
    }
}

/// One page of verses plus the song's total verse count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersePage<'a> {
    pub verses: Vec<&'a str>,
    pub total: usize,
}

/// Split lyrics into verses and return the requested page
///
/// A page past the end yields an empty verse list, not an error. Empty text
/// counts as a single empty verse.
///
/// # Examples
/// ```
/// use musiclib_api::pagination::paginate_verses;
///
/// let page = paginate_verses("a\n\nb\n\nc", 2, 2);
/// assert_eq!(page.verses, vec!["c"]);
/// assert_eq!(page.total, 3);
///
/// let page = paginate_verses("a\n\nb\n\nc", 3, 2);
/// assert!(page.verses.is_empty());
/// assert_eq!(page.total, 3);
/// ```
pub fn paginate_verses(text: &str, page: i64, limit: i64) -> VersePage<'_> {
    debug_assert!(page >= 1 && limit >= 1);

    let verses: Vec<&str> = text.split(VERSE_DELIMITER).collect();
    let total = verses.len();

    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let start = usize::try_from(page - 1)
        .unwrap_or(usize::MAX)
        .saturating_mul(limit);

    if start >= total {
        return VersePage {
            verses: Vec::new(),
            total,
        };
    }

    let end = start.saturating_add(limit).min(total);

    VersePage {
        verses: verses[start..end].to_vec(),
        total,
    }
}
