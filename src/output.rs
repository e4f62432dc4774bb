//! CLI output formatting.
//!
//! Every record is shown by its position and title first, with its date,
//! media, and a shortened explanation as indented context lines:
//!
//! ```text
//! APOD 2024-01-01 → 2024-01-03 (3 records)
//! 001 Nebula
//!     Date: 2024-01-01
//!     Image: https://apod.nasa.gov/apod/image/2401/nebula.jpg
//!     Explanation: The nebula glows in the light of young stars...
//! 002 Clip
//!     Date: 2024-01-02
//!     Video: https://www.youtube.com/embed/abc
//!     Explanation: A time-lapse of the night sky...
//! ```
//!
//! Each output has a `format_*` function (returns lines) for testability and
//! a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::gallery::{ERROR_MESSAGE, GalleryState, GalleryStatus, LOADING_MESSAGE};
use crate::generate::GeneratedPage;
use crate::types::{ImageRecord, MediaType, RecordSet};

const EXPLANATION_PREVIEW: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head.trim_end())
    }
}

/// `"1 card"`, `"3 cards"`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn media_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Image => "Image",
        MediaType::Video => "Video",
        MediaType::Other => "Other",
    }
}

/// Header line plus context lines for one record.
fn record_lines(position: usize, record: &ImageRecord) -> Vec<String> {
    let mut lines = vec![format!("{} {}", format_index(position), record.title)];
    lines.push(format!("{}Date: {}", indent(1), record.date));
    if !record.url.is_empty() {
        lines.push(format!(
            "{}{}: {}",
            indent(1),
            media_label(record.media_type),
            record.url
        ));
    }
    if !record.explanation.is_empty() {
        lines.push(format!(
            "{}Explanation: {}",
            indent(1),
            truncate_desc(&record.explanation, EXPLANATION_PREVIEW)
        ));
    }
    lines
}

/// Format the records of one fetch.
pub fn format_fetch_output(set: &RecordSet) -> Vec<String> {
    let mut lines = vec![format!(
        "APOD {} → {} ({})",
        set.start_date,
        set.end_date,
        plural(set.records.len(), "record")
    )];
    for (i, record) in set.records.iter().enumerate() {
        lines.extend(record_lines(i + 1, record));
    }
    lines
}

pub fn print_fetch_output(set: &RecordSet) {
    for line in format_fetch_output(set) {
        println!("{}", line);
    }
}

/// One progress line for a gallery transition.
pub fn format_gallery_state(state: &GalleryState) -> Option<String> {
    match state {
        GalleryState::Empty => None,
        GalleryState::Loading => Some(LOADING_MESSAGE.to_string()),
        GalleryState::Populated(cards) => Some(format!("Rendered {}", plural(cards.len(), "card"))),
        GalleryState::Error => Some(ERROR_MESSAGE.to_string()),
    }
}

pub fn print_gallery_state(state: &GalleryState) {
    if let Some(line) = format_gallery_state(state) {
        println!("{}", line);
    }
}

/// Summary of a written page.
pub fn format_generate_output(page: &GeneratedPage) -> Vec<String> {
    let detail = match page.status {
        GalleryStatus::Populated => plural(page.cards, "card"),
        GalleryStatus::Error => "error placeholder".to_string(),
        GalleryStatus::Loading => "loading placeholder".to_string(),
        GalleryStatus::Empty => "empty".to_string(),
    };
    vec![format!("Generated {} ({})", page.path.display(), detail)]
}

pub fn print_generate_output(page: &GeneratedPage) {
    for line in format_generate_output(page) {
        println!("{}", line);
    }
}
