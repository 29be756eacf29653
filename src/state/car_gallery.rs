/// Vehicle gallery view model
///
/// Only a date change needs a new fetch; plate filtering and grouping
/// always run over the last fetched list.
use std::collections::HashMap;

use chrono::NaiveDate;

use super::DateInput;
use crate::api::models::CarImageRecord;

/// Case-insensitive prefix match of a plate against the filter text
pub fn plate_matches(plate: &str, filter: &str) -> bool {
    filter.is_empty() || plate.to_lowercase().starts_with(&filter.to_lowercase())
}

/// The photos of one plate, in fetch order
#[derive(Debug, Clone, PartialEq)]
pub struct PlateGroup<'a> {
    pub plate: &'a str,
    pub records: Vec<&'a CarImageRecord>,
}

/// Keep matching records and group them by exact plate, first appearance first.
pub fn group_by_plate<'a>(records: &'a [CarImageRecord], filter: &str) -> Vec<PlateGroup<'a>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<PlateGroup<'a>> = Vec::new();

    for record in records.iter().filter(|r| plate_matches(&r.plate, filter)) {
        let plate = record.plate.as_str();
        let slot = *index.entry(plate).or_insert_with(|| {
            groups.push(PlateGroup { plate, records: Vec::new() });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }

    groups
}

#[derive(Debug, Default)]
pub struct CarGallery {
    records: Vec<CarImageRecord>,
    plate_filter: String,
    date: DateInput,
    selected: Option<CarImageRecord>,
    loading: bool,
}

impl CarGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Date to send with the next fetch
    pub fn date(&self) -> Option<NaiveDate> {
        self.date.value()
    }

    pub fn date_text(&self) -> &str {
        self.date.text()
    }

    pub fn plate_filter(&self) -> &str {
        &self.plate_filter
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the records with a fetch result.
    ///
    /// Results are applied in arrival order: a slow response to an older
    /// date can overwrite a newer one.
    pub fn set_records(&mut self, records: Vec<CarImageRecord>) {
        self.records = records;
        self.loading = false;
    }

    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_plate_filter(&mut self, text: &str) {
        self.plate_filter = text.to_string();
    }

    /// Returns whether the list must be fetched again
    pub fn set_date_input(&mut self, text: &str) -> bool {
        self.date.set(text)
    }

    /// Reset plate and date; returns whether the list must be fetched again
    pub fn clear_filters(&mut self) -> bool {
        self.plate_filter.clear();
        self.date.clear()
    }

    pub fn groups(&self) -> Vec<PlateGroup<'_>> {
        group_by_plate(&self.records, &self.plate_filter)
    }

    /// Open the detail modal
    pub fn select(&mut self, record: CarImageRecord) {
        self.selected = Some(record);
    }

    pub fn close_modal(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&CarImageRecord> {
        self.selected.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{Section, Timestamp};

    fn record(id: i64, plate: &str, section: Section) -> CarImageRecord {
        CarImageRecord {
            id,
            file_path: format!("/uploads/car{id}.jpg"),
            plate: plate.to_string(),
            section,
            uploaded_at: Timestamp::parse("Tue, 15 Oct 2024 10:30:00 GMT"),
        }
    }

    fn sample() -> Vec<CarImageRecord> {
        vec![
            record(1, "AB123", Section::Front),
            record(2, "XAB1", Section::Front),
            record(3, "AB123", Section::Rear),
            record(4, "ab999", Section::Front),
            record(5, "CD500", Section::LeftSide),
        ]
    }

    #[test]
    fn test_plate_prefix_is_case_insensitive() {
        assert!(plate_matches("AB123", "ab"));
        assert!(!plate_matches("XAB1", "ab"));
        assert!(plate_matches("anything", ""));
        assert!(!plate_matches("AB", "ABC"));
    }

    #[test]
    fn test_grouping_by_exact_plate_in_first_appearance_order() {
        let records = sample();
        let groups = group_by_plate(&records, "ab");
        let plates: Vec<&str> = groups.iter().map(|g| g.plate).collect();
        assert_eq!(plates, ["AB123", "ab999"]);
        let ids: Vec<i64> = groups[0].records.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_plate_filter_never_refetches() {
        let mut gallery = CarGallery::new();
        gallery.set_records(sample());
        gallery.set_plate_filter("c");
        assert_eq!(gallery.groups().len(), 1);
        gallery.set_plate_filter("");
        assert_eq!(gallery.groups().len(), 4);
    }

    #[test]
    fn test_date_changes_request_refetch() {
        let mut gallery = CarGallery::new();
        assert!(!gallery.set_date_input("2024-10"));
        assert!(gallery.set_date_input("2024-10-15"));
        assert_eq!(gallery.date(), NaiveDate::from_ymd_opt(2024, 10, 15));

        gallery.set_plate_filter("AB");
        assert!(gallery.clear_filters());
        assert_eq!(gallery.plate_filter(), "");
        assert_eq!(gallery.date(), None);
        // Nothing set, nothing to refetch
        assert!(!gallery.clear_filters());
    }

    #[test]
    fn test_modal_selection() {
        let mut gallery = CarGallery::new();
        gallery.set_records(sample());
        assert!(gallery.selected().is_none());
        gallery.select(sample()[2].clone());
        assert_eq!(gallery.selected().map(|r| r.id), Some(3));
        gallery.close_modal();
        assert!(gallery.selected().is_none());
    }
}
