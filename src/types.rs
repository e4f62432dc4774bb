//! Shared types used across fetch, render and generate.
//!
//! [`ImageRecord`] mirrors one element of the APOD API response. Records are
//! deserialized once and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// How an APOD entry's `url` must be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// `url` is an image source.
    Image,
    /// `url` is an embeddable player (YouTube, Vimeo, ...).
    Video,
    /// Anything else the API may send. Rendered like a video.
    #[serde(other)]
    Other,
}

impl MediaType {
    pub fn is_image(self) -> bool {
        self == MediaType::Image
    }
}

/// One day's Astronomy Picture of the Day entry.
///
/// Extra fields in the API response (`hdurl`, `copyright`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
    pub media_type: MediaType,
    /// Image source or embed source, depending on `media_type`.
    /// Some non-image entries come without one.
    #[serde(default)]
    pub url: String,
    /// Shown only in the detail overlay.
    pub explanation: String,
}

impl ImageRecord {
    pub fn is_image(&self) -> bool {
        self.media_type.is_image()
    }
}

/// Snapshot of a single successful fetch, written between the fetch and
/// generate stages as `records.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSet {
    pub start_date: String,
    pub end_date: String,
    pub records: Vec<ImageRecord>,
}
