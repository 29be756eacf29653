/// State management module
///
/// View models for every screen. They hold no UI types and never touch
/// the network themselves: a flow starts with `begin_*`, the application
/// runs the request, and `finish_*` applies the result.
/// - Floor gallery filtering and grouping (gallery.rs)
/// - Vehicle gallery filtering and grouping (car_gallery.rs)
/// - Floor photo upload form (upload.rs)
/// - Vehicle photo upload form (car_upload.rs)
/// - Login and registration forms (auth.rs)
/// - Transient notices (notice.rs)

pub mod auth;
pub mod car_gallery;
pub mod car_upload;
pub mod gallery;
pub mod notice;
pub mod upload;

use chrono::NaiveDate;

/// A `YYYY-MM-DD` text field and the date it currently holds.
///
/// Partial or invalid text means "no date".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInput {
    text: String,
    value: Option<NaiveDate>,
}

impl DateInput {
    /// Update the text; returns whether the parsed date changed.
    pub fn set(&mut self, text: &str) -> bool {
        let value = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok();
        self.text = text.to_string();
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Empty the field; returns whether a date was set.
    pub fn clear(&mut self) -> bool {
        self.set("")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
