//! Shared test utilities for the apod-gal test suite.
//!
//! Record builders, gallery extractors, and in-memory stand-ins for the two
//! outside collaborators of the controller (the APOD API and the user).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = FakeSource::returning(sample_records());
//! let mut ctl = Controller::new(source.clone(), Gallery::new());
//! ctl.get_images(&DateInputs::new("2024-01-01", "2024-01-03"), &mut RecordingAlerter::default());
//!
//! assert_eq!(card_titles(ctl.gallery()), vec!["Nebula", "Clip", "Galaxy"]);
//! assert_eq!(source.requests().len(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::Alerter;
use crate::fetch::{ApodSource, FetchError};
use crate::gallery::Gallery;
use crate::types::{ImageRecord, MediaType};

// =========================================================================
// Record builders
// =========================================================================

pub fn image_record(date: &str, title: &str) -> ImageRecord {
    ImageRecord {
        date: date.to_string(),
        title: title.to_string(),
        media_type: MediaType::Image,
        url: format!("https://apod.nasa.gov/apod/image/{date}.jpg"),
        explanation: format!("Explanation of {title}."),
    }
}

pub fn video_record(date: &str, title: &str) -> ImageRecord {
    ImageRecord {
        date: date.to_string(),
        title: title.to_string(),
        media_type: MediaType::Video,
        url: format!("https://www.youtube.com/embed/{date}"),
        explanation: format!("Explanation of {title}."),
    }
}

/// Three records, the middle one a video.
pub fn sample_records() -> Vec<ImageRecord> {
    vec![
        image_record("2024-01-01", "Nebula"),
        video_record("2024-01-02", "Clip"),
        image_record("2024-01-03", "Galaxy"),
    ]
}

// =========================================================================
// Gallery extractors
// =========================================================================

/// Card titles in display order.
pub fn card_titles(gallery: &Gallery) -> Vec<&str> {
    gallery
        .cards()
        .iter()
        .map(|c| c.record.title.as_str())
        .collect()
}

/// Number of card nodes in rendered markup.
pub fn count_cards(html: &str) -> usize {
    html.matches(r#"class="card""#).count()
}

// =========================================================================
// Collaborator stand-ins
// =========================================================================

#[derive(Default)]
struct FakeState {
    records: Vec<ImageRecord>,
    always_fail: bool,
    fail_next: bool,
    requests: Vec<(String, String)>,
}

/// In-memory [`ApodSource`]. Clones share state, so a test can keep a handle
/// after moving one into a controller.
#[derive(Clone, Default)]
pub struct FakeSource {
    state: Rc<RefCell<FakeState>>,
}

impl FakeSource {
    pub fn returning(records: Vec<ImageRecord>) -> Self {
        let source = Self::default();
        source.state.borrow_mut().records = records;
        source
    }

    pub fn failing() -> Self {
        let source = Self::default();
        source.state.borrow_mut().always_fail = true;
        source
    }

    /// Fail the next request only.
    pub fn fail_next(&self) {
        self.state.borrow_mut().fail_next = true;
    }

    /// `(start_date, end_date)` of every request made so far.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.state.borrow().requests.clone()
    }
}

impl ApodSource for FakeSource {
    fn fetch_images(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<ImageRecord>, FetchError> {
        let mut state = self.state.borrow_mut();
        state
            .requests
            .push((start_date.to_string(), end_date.to_string()));
        if state.always_fail || std::mem::take(&mut state.fail_next) {
            return Err(simulated_failure());
        }
        Ok(state.records.clone())
    }
}

/// A `FetchError` as produced by an unreadable response.
pub fn simulated_failure() -> FetchError {
    let err = serde_json::from_str::<Vec<ImageRecord>>("<html>503</html>").unwrap_err();
    FetchError::Body(err)
}

/// Collects alert messages instead of blocking.
#[derive(Default)]
pub struct RecordingAlerter {
    pub messages: Vec<String>,
}

impl Alerter for RecordingAlerter {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
