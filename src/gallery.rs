//! Card grid container.
//!
//! The gallery is always in exactly one [`GalleryState`]. Every transition
//! replaces the whole content, so a loading placeholder, a set of cards and
//! an error placeholder never coexist and repeated renders never accumulate.
//!
//! ## Card Binding
//!
//! Each card carries a control id (`details-001`, `details-002`, ...) and the
//! id of the overlay it opens (`apod-001`, ...). [`Gallery::record_for`] looks
//! a record up by control id, so activating a control always resolves to the
//! record that card was built from.

use crate::types::ImageRecord;
use maud::{Markup, html};

pub const LOADING_MESSAGE: &str = "Loading space images...";
pub const ERROR_MESSAGE: &str = "Error loading images. Please try again!";
pub const VIDEO_PLACEHOLDER: &str = "📹 Video Content";

/// One record's summary tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Id of the card's "View Details" control.
    pub control_id: String,
    /// Id of the detail overlay the control opens.
    pub modal_id: String,
    pub record: ImageRecord,
}

impl Card {
    /// Build the card at 0-based `position`.
    fn new(position: usize, record: ImageRecord) -> Self {
        let number = position + 1;
        Self {
            control_id: format!("details-{number:0>3}"),
            modal_id: format!("apod-{number:0>3}"),
            record,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GalleryState {
    /// Nothing requested yet.
    Empty,
    Loading,
    Populated(Vec<Card>),
    Error,
}

/// Which of the four states a gallery is in, without its cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryStatus {
    Empty,
    Loading,
    Populated,
    Error,
}

impl GalleryState {
    pub fn status(&self) -> GalleryStatus {
        match self {
            GalleryState::Empty => GalleryStatus::Empty,
            GalleryState::Loading => GalleryStatus::Loading,
            GalleryState::Populated(_) => GalleryStatus::Populated,
            GalleryState::Error => GalleryStatus::Error,
        }
    }
}

type Listener = Box<dyn FnMut(&GalleryState)>;

/// The container cards are rendered into.
pub struct Gallery {
    state: GalleryState,
    listener: Option<Listener>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            state: GalleryState::Empty,
            listener: None,
        }
    }

    /// Call `listener` after every state change.
    pub fn on_change(&mut self, listener: impl FnMut(&GalleryState) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn show_loading(&mut self) {
        self.replace(GalleryState::Loading);
    }

    pub fn show_error(&mut self) {
        self.replace(GalleryState::Error);
    }

    /// Replace the content with one card per record, in input order.
    pub fn render(&mut self, records: &[ImageRecord]) {
        let cards = records
            .iter()
            .cloned()
            .enumerate()
            .map(|(position, record)| Card::new(position, record))
            .collect();
        self.replace(GalleryState::Populated(cards));
    }

    /// Cards currently shown. Empty unless populated.
    pub fn cards(&self) -> &[Card] {
        match &self.state {
            GalleryState::Populated(cards) => cards,
            _ => &[],
        }
    }

    /// Record bound to the control with `control_id`.
    pub fn record_for(&self, control_id: &str) -> Option<&ImageRecord> {
        self.cards()
            .iter()
            .find(|card| card.control_id == control_id)
            .map(|card| &card.record)
    }

    /// Markup for the container's current content.
    pub fn markup(&self) -> Markup {
        match &self.state {
            GalleryState::Empty => html! {},
            GalleryState::Loading => placeholder("⏳", LOADING_MESSAGE),
            GalleryState::Error => placeholder("❌", ERROR_MESSAGE),
            GalleryState::Populated(cards) => html! {
                @for card in cards {
                    (render_card(card))
                }
            },
        }
    }

    fn replace(&mut self, state: GalleryState) {
        self.state = state;
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.state);
        }
    }
}

/// Full-width status node used for the loading and error states.
fn placeholder(icon: &str, message: &str) -> Markup {
    html! {
        div.gallery-status {
            div.placeholder {
                div.placeholder-icon { (icon) }
                p { (message) }
            }
        }
    }
}

/// Render one card: media, title, date, and the "View Details" control.
///
/// Non-image records get a fixed placeholder; the grid never embeds a player.
pub fn render_card(card: &Card) -> Markup {
    let record = &card.record;
    html! {
        div.gallery-item {
            div.card {
                @if record.is_image() {
                    img.card-img src=(record.url) alt=(record.title) loading="lazy";
                } @else {
                    div.card-img.video-placeholder {
                        span.text-muted { (VIDEO_PLACEHOLDER) }
                    }
                }
                div.card-body {
                    h5.card-title { (record.title) }
                    p.card-date { (record.date) }
                    a.btn-details id=(card.control_id) href={ "#" (card.modal_id) } {
                        "View Details"
                    }
                }
            }
        }
    }
}
