//! # musiclib Common Library
//!
//! Shared code for the musiclib song catalog service:
//! - Song domain model and request/response payloads
//! - Release date validation
//! - Bootstrap configuration loading
//! - Common error type

pub mod config;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{Song, SongDetail, SongInput, SongPatch};
pub use time::{validate_release_date, ReleaseDateError, RELEASE_DATE_FORMAT};
