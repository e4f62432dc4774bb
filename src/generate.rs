//! HTML page generation.
//!
//! Renders the gallery container, one detail overlay per card, and the page
//! chrome into a single self-contained `index.html`.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! └── index.html      # Cards, overlays, inline CSS
//! ```
//!
//! Images and players are referenced by their APOD URLs; nothing is
//! downloaded.
//!
//! ## Overlays Without JavaScript
//!
//! Each card's "View Details" control links to `#apod-NNN`. The matching
//! overlay is hidden until it becomes the `:target`, and its close button and
//! backdrop link back to `#`. Closing an overlay and opening another is plain
//! navigation, so the page works anywhere HTML and CSS do.
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time; color and theme custom
//! properties generated from the config are prepended to it.

use crate::config::{self, Config};
use crate::controller::{Alerter, Controller};
use crate::dates::DateInputs;
use crate::fetch::ApodSource;
use crate::gallery::{Gallery, GalleryStatus};
use crate::types::RecordSet;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

pub const PAGE_TITLE: &str = "Astronomy Picture of the Day";

/// What was written by [`write_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub path: PathBuf,
    /// Gallery state at the time of writing.
    pub status: GalleryStatus,
    pub cards: usize,
}

/// Read a `records.json` snapshot.
pub fn load_record_set(path: &Path) -> Result<RecordSet, GenerateError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a `records.json` snapshot, creating parent directories.
pub fn save_record_set(path: &Path, set: &RecordSet) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(set)?)?;
    Ok(())
}

/// Render a saved snapshot to `output_dir/index.html`.
///
/// The snapshot goes through the same action as a live fetch, so a snapshot
/// with a blank date is rejected through `alerter` and yields an empty page.
pub fn generate(
    records_path: &Path,
    output_dir: &Path,
    config: &Config,
    alerter: &mut dyn Alerter,
) -> Result<GeneratedPage, GenerateError> {
    let set = load_record_set(records_path)?;
    let inputs = DateInputs::new(set.start_date.clone(), set.end_date.clone());
    let mut controller = Controller::new(set, Gallery::new());
    controller.get_images(&inputs, alerter);
    write_page(&mut controller, &inputs, config, output_dir)
}

/// Write the page for the controller's current gallery state.
pub fn write_page<S: ApodSource>(
    controller: &mut Controller<S>,
    inputs: &DateInputs,
    config: &Config,
    output_dir: &Path,
) -> Result<GeneratedPage, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let css = stylesheet(config);
    let overlays = controller.detail_overlays();
    let gallery = controller.gallery();
    let page = render_page(gallery, &overlays, inputs, &css);
    let path = output_dir.join("index.html");
    fs::write(&path, page.into_string())?;
    Ok(GeneratedPage {
        path,
        status: gallery.state().status(),
        cards: gallery.cards().len(),
    })
}

/// Full stylesheet: config-driven custom properties, then the static rules.
pub fn stylesheet(config: &Config) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Header with the page title and the requested range.
fn site_header(inputs: &DateInputs) -> Markup {
    html! {
        header.site-header {
            h1 { (PAGE_TITLE) }
            p.date-range {
                time datetime=(inputs.start) { (inputs.start) }
                " – "
                time datetime=(inputs.end) { (inputs.end) }
            }
        }
    }
}

/// Renders the page: header, gallery container, and the detail overlays.
pub fn render_page(
    gallery: &Gallery,
    overlays: &[Markup],
    inputs: &DateInputs,
    css: &str,
) -> Markup {
    let content = html! {
        (site_header(inputs))
        main.gallery id="gallery" {
            (gallery.markup())
        }
        @for overlay in overlays {
            (overlay)
        }
        footer.site-footer {
            "Data: "
            a href="https://apod.nasa.gov/apod/" rel="noopener" { "NASA APOD" }
        }
    };

    base_document(PAGE_TITLE, css, content)
}

// ============================================================================
// Tests
// ============================================================================
