//! The "get images" action.
//!
//! ```text
//! Empty ──activate──▶ Loading ──ok──▶ Populated
//!                        │
//!                        └───err──▶ Error
//! ```
//!
//! Missing dates never leave the starting state: the user is alerted and no
//! request is made. Activation borrows the controller mutably, so a second
//! activation cannot start while a request is in flight; every activation
//! starts over from whatever the gallery currently shows.

use crate::dates::DateInputs;
use crate::fetch::{ApodSource, FetchError};
use crate::gallery::Gallery;
use crate::modal::Modal;
use maud::Markup;
use tracing::{error, info};

pub const MISSING_DATES_MESSAGE: &str = "Please select both start and end dates!";

/// Blocking user notification.
pub trait Alerter {
    fn alert(&mut self, message: &str);
}

/// Result of one activation.
#[derive(Debug)]
pub enum Activation {
    /// A date was missing; nothing was requested.
    Rejected,
    /// The gallery now shows this many cards.
    Populated(usize),
    /// The request failed; the gallery shows the error placeholder.
    Failed(FetchError),
}

/// Wires the date inputs, the fetcher, the gallery and the detail overlay.
pub struct Controller<S> {
    source: S,
    gallery: Gallery,
    modal: Modal,
}

impl<S: ApodSource> Controller<S> {
    pub fn new(source: S, gallery: Gallery) -> Self {
        Self {
            source,
            gallery,
            modal: Modal::new(),
        }
    }

    /// Run the action for the current input values.
    pub fn get_images(&mut self, inputs: &DateInputs, alerter: &mut dyn Alerter) -> Activation {
        if !inputs.is_complete() {
            alerter.alert(MISSING_DATES_MESSAGE);
            return Activation::Rejected;
        }

        self.gallery.show_loading();
        match self.source.fetch_images(&inputs.start, &inputs.end) {
            Ok(records) => {
                info!(
                    start = %inputs.start,
                    end = %inputs.end,
                    count = records.len(),
                    "rendering gallery"
                );
                self.gallery.render(&records);
                Activation::Populated(records.len())
            }
            Err(err) => {
                error!(error = %err, "Error fetching images");
                self.gallery.show_error();
                Activation::Failed(err)
            }
        }
    }

    /// Activate the "View Details" control with `control_id`.
    ///
    /// Returns `false` (and leaves the overlay untouched) when no card has
    /// that control.
    pub fn open_details(&mut self, control_id: &str) -> bool {
        match self.gallery.record_for(control_id) {
            Some(record) => {
                self.modal.present(record);
                true
            }
            None => false,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// One detail overlay per card, in card order.
    ///
    /// Each overlay is what the modal shows after that card's control is
    /// activated.
    pub fn detail_overlays(&mut self) -> Vec<Markup> {
        let bindings: Vec<(String, String)> = self
            .gallery
            .cards()
            .iter()
            .map(|card| (card.control_id.clone(), card.modal_id.clone()))
            .collect();
        bindings
            .iter()
            .filter_map(|(control_id, modal_id)| {
                if self.open_details(control_id) {
                    self.modal.overlay(modal_id)
                } else {
                    None
                }
            })
            .collect()
    }
}
