//! Detail overlay for a single record.
//!
//! [`Modal`] is the overlay slot: [`Modal::present`] replaces whatever it
//! showed before with one record's media, title, `Date: ` label and full
//! explanation, then marks it visible. [`Modal::overlay`] turns the presented
//! content into markup; the generated page holds one such overlay per card
//! and the browser shows it when the card's control targets its id.

use crate::types::ImageRecord;
use maud::{Markup, html};

/// Everything the overlay displays for one record.
#[derive(Debug, Clone)]
pub struct ModalContent {
    pub media: Markup,
    pub title: String,
    /// `"Date: YYYY-MM-DD"`.
    pub date_label: String,
    /// Verbatim; escaped on output, never truncated.
    pub explanation: String,
}

impl ModalContent {
    pub fn for_record(record: &ImageRecord) -> Self {
        Self {
            media: modal_media(record),
            title: record.title.clone(),
            date_label: format!("Date: {}", record.date),
            explanation: record.explanation.clone(),
        }
    }
}

/// The overlay slot. Hidden and empty until a record is presented.
#[derive(Debug, Default)]
pub struct Modal {
    content: Option<ModalContent>,
    visible: bool,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the overlay with `record` and request display.
    pub fn present(&mut self, record: &ImageRecord) {
        self.content = Some(ModalContent::for_record(record));
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }

    /// Markup for the presented record, anchored at `id`.
    ///
    /// `None` until something has been presented.
    pub fn overlay(&self, id: &str) -> Option<Markup> {
        self.content
            .as_ref()
            .filter(|_| self.visible)
            .map(|content| render_overlay(id, content))
    }
}

/// Media block for the overlay: a height-bounded responsive image, or a 16:9
/// embedded player for everything that is not an image.
pub fn modal_media(record: &ImageRecord) -> Markup {
    html! {
        @if record.is_image() {
            img.modal-image src=(record.url) alt=(record.title);
        } @else {
            div class="ratio ratio-16x9" {
                iframe src=(record.url) title=(record.title) allowfullscreen {}
            }
        }
    }
}

/// Render an overlay with the given anchor id.
///
/// Hidden by default; the stylesheet shows it while its id is the URL
/// fragment. Both the backdrop and the close button clear the fragment.
pub fn render_overlay(id: &str, content: &ModalContent) -> Markup {
    let title_id = format!("{id}-title");
    html! {
        div.modal id=(id) role="dialog" aria-modal="true" aria-labelledby=(title_id) {
            a.modal-backdrop href="#" aria-label="Close" {}
            div.modal-dialog {
                header.modal-header {
                    h5.modal-title id=(title_id) { (content.title) }
                    a.modal-close href="#" aria-label="Close" { "×" }
                }
                div.modal-body {
                    div.modal-media { (content.media) }
                    p.modal-date { (content.date_label) }
                    p.modal-explanation { (content.explanation) }
                }
            }
        }
    }
}
