//! Date range inputs: defaults and bounds.
//!
//! The two date inputs start out holding a default range (`default_days` ago
//! through today) and only accept dates inside the APOD archive, from
//! [`EARLIEST_APOD`] to today. Values are kept as `YYYY-MM-DD` strings because
//! that is exactly what the API request embeds.
//!
//! Clamping mirrors what a date picker with `min`/`max` would allow. Values
//! that are not dates at all pass through untouched; the API rejects them and
//! that surfaces as a fetch failure.

use chrono::{Days, NaiveDate};
use tracing::warn;

/// First day of the APOD archive.
pub const EARLIEST_APOD: NaiveDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
    Some(date) => date,
    None => panic!("invalid archive start date"),
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current values of the start and end inputs.
///
/// An empty string means the input was left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInputs {
    pub start: String,
    pub end: String,
}

impl DateInputs {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both inputs hold a value.
    pub fn is_complete(&self) -> bool {
        !self.start.trim().is_empty() && !self.end.trim().is_empty()
    }
}

/// Inclusive range of dates the inputs accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    /// Bounds for the APOD archive as of `today`.
    pub fn archive(today: NaiveDate) -> Self {
        Self {
            min: EARLIEST_APOD,
            max: today.max(EARLIEST_APOD),
        }
    }

    /// Clamp a `YYYY-MM-DD` value into the bounds.
    ///
    /// Unparseable and empty values are returned unchanged.
    pub fn clamp(&self, value: &str) -> String {
        let Ok(date) = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) else {
            return value.to_string();
        };
        let clamped = date.clamp(self.min, self.max);
        if clamped != date {
            warn!(%date, %clamped, "date outside the APOD archive, clamped");
        }
        format_date(clamped)
    }
}

/// Fills in the two date inputs and keeps them inside the archive bounds.
#[derive(Debug, Clone, Copy)]
pub struct DateRangeInitializer {
    today: NaiveDate,
    default_days: u32,
}

impl DateRangeInitializer {
    pub fn new(today: NaiveDate, default_days: u32) -> Self {
        Self {
            today,
            default_days,
        }
    }

    /// Initializer for the local calendar day.
    pub fn for_today(default_days: u32) -> Self {
        Self::new(chrono::Local::now().date_naive(), default_days)
    }

    pub fn bounds(&self) -> DateBounds {
        DateBounds::archive(self.today)
    }

    /// The default range: `default_days` before today through today.
    pub fn defaults(&self) -> DateInputs {
        let bounds = self.bounds();
        let start = self
            .today
            .checked_sub_days(Days::new(u64::from(self.default_days)))
            .unwrap_or(bounds.min)
            .clamp(bounds.min, bounds.max);
        DateInputs::new(format_date(start), format_date(bounds.max))
    }

    /// Resolve user-supplied values.
    ///
    /// `None` takes the default for that input, `Some` is clamped into the
    /// bounds. An explicitly empty value stays empty so that the controller
    /// can reject it.
    pub fn initialize(&self, start: Option<&str>, end: Option<&str>) -> DateInputs {
        let defaults = self.defaults();
        let bounds = self.bounds();
        DateInputs {
            start: start.map(|s| bounds.clamp(s)).unwrap_or(defaults.start),
            end: end.map(|e| bounds.clamp(e)).unwrap_or(defaults.end),
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
