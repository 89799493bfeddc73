//! Song catalog models
//!
//! `Song` is the persisted entity; the other types are transient payloads
//! exchanged with API clients and the enrichment service.

use serde::{Deserialize, Serialize};

/// Song record as stored in the `songs` table and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Song {
    /// System-assigned identifier, immutable after creation
    pub id: i64,
    /// Performer or band name
    pub group: String,
    /// Song title
    pub song: String,
    /// Release date as `DD.MM.YYYY` text
    pub release_date: String,
    /// Lyrics, verses separated by a blank line
    pub text: String,
    /// External reference URL
    pub link: String,
}

/// Body of a song creation request
#[derive(Debug, Clone, Deserialize)]
pub struct SongInput {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub song: String,
}

impl SongInput {
    /// Both fields must contain something other than whitespace
    pub fn is_complete(&self) -> bool {
        !self.group.trim().is_empty() && !self.song.trim().is_empty()
    }
}

/// Details returned by the enrichment service for a (group, song) pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongDetail {
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Partial update body; absent or empty fields leave the stored value untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongPatch {
    pub id: Option<i64>,
    pub group: Option<String>,
    pub song: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

impl SongPatch {
    /// Release date carried by the patch, if any non-empty value was supplied
    pub fn release_date(&self) -> Option<&str> {
        self.release_date.as_deref().filter(|s| !s.is_empty())
    }

    /// True when the patch tries to move the song to another id.
    ///
    /// Zero is treated as "not supplied".
    pub fn changes_id(&self, current: i64) -> bool {
        matches!(self.id, Some(id) if id != 0 && id != current)
    }

    /// True when `group` or `song` is supplied but holds only whitespace.
    ///
    /// The empty string still means "leave unchanged".
    pub fn blanks_name(&self) -> bool {
        [&self.group, &self.song]
            .into_iter()
            .flatten()
            .any(|v| !v.is_empty() && v.trim().is_empty())
    }

    /// Apply every non-empty field onto `song`
    pub fn apply_to(self, song: &mut Song) {
        fn merge(target: &mut String, value: Option<String>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *target = value;
            }
        }

        merge(&mut song.group, self.group);
        merge(&mut song.song, self.song);
        merge(&mut song.release_date, self.release_date);
        merge(&mut song.text, self.text);
        merge(&mut song.link, self.link);
    }
}
