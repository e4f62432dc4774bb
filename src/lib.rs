//! # apod-gal
//!
//! Fetch NASA's Astronomy Picture of the Day for a date range and render it
//! as a static gallery: a grid of cards, each opening a detail overlay with
//! the full image or video and its explanation.
//!
//! # Architecture: One Action, Two Stages
//!
//! The user action ("get images for this range") runs through the
//! [`controller`], which drives the same components a browser page would:
//!
//! ```text
//! dates      start/end  →  DateInputs        (defaults, archive bounds)
//! fetch      DateInputs →  Vec<ImageRecord>  (one GET, no retry)
//! gallery    records    →  cards             (loading / populated / error)
//! modal      card       →  detail overlay
//! generate   gallery    →  dist/index.html
//! ```
//!
//! On the command line the action is split into two stages that can also run
//! separately, with a JSON snapshot in between:
//!
//! ```text
//! 1. Fetch      API       →  records.json   (what the API returned)
//! 2. Generate   snapshot  →  index.html     (cards + overlays)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `ImageRecord`, `MediaType`, `RecordSet` |
//! | [`dates`] | Default date range and archive bounds |
//! | [`fetch`] | `ApodSource` trait and the blocking HTTP `ApodClient` |
//! | [`gallery`] | Card container, per-card control bindings, status placeholders |
//! | [`modal`] | Detail overlay content and markup |
//! | [`controller`] | The get-images action: validate, load, fetch, render |
//! | [`generate`] | Page assembly with Maud, `records.json` snapshots |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Explicit Slots
//!
//! The gallery, the overlay, the data source and the alert channel are values
//! handed to the controller, never looked up globally. Tests swap the data
//! source for an in-memory one and the alert channel for a recorder.
//!
//! ## Whole-Container Replacement
//!
//! The gallery holds exactly one state at a time and every transition
//! replaces it. Rendering the same records twice yields the same cards, and a
//! failure after a success leaves only the error placeholder.
//!
//! ## Overlays Without JavaScript
//!
//! Each card's control links to an overlay id; the overlay is shown while it
//! is the URL fragment. The generated page is plain HTML and CSS.

pub mod config;
pub mod controller;
pub mod dates;
pub mod fetch;
pub mod gallery;
pub mod generate;
pub mod modal;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
