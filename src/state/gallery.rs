/// Floor gallery view model
///
/// Grouping is a pure function of the fetched records and the filters;
/// nothing derived is stored.
use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::NaiveDate;

use super::DateInput;
use crate::api::models::{FloorLabel, ImageRecord};

/// Thumbnails shown per floor before "show more"
pub const GROUP_CAP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FloorFilter {
    #[default]
    All,
    /// Raw wire label
    Only(FloorLabel),
}

impl fmt::Display for FloorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloorFilter::All => f.write_str("Todos los pisos"),
            FloorFilter::Only(floor) => fmt::Display::fmt(floor, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryFilters {
    pub floor: FloorFilter,
    /// Calendar day of the upload timestamp
    pub date: Option<NaiveDate>,
}

impl GalleryFilters {
    pub fn matches(&self, record: &ImageRecord) -> bool {
        let floor_ok = match &self.floor {
            FloorFilter::All => true,
            FloorFilter::Only(floor) => record.floor == *floor,
        };
        let date_ok = match self.date {
            None => true,
            Some(date) => record.uploaded_at.date() == Some(date),
        };
        floor_ok && date_ok
    }
}

/// The records of one floor, in fetch order
#[derive(Debug, Clone, PartialEq)]
pub struct FloorGroup<'a> {
    /// Display label (`Planta Baja` for the ground floor)
    pub label: String,
    pub records: Vec<&'a ImageRecord>,
    pub expanded: bool,
}

impl<'a> FloorGroup<'a> {
    /// Records on screen: capped unless expanded
    pub fn visible(&self) -> &[&'a ImageRecord] {
        if self.expanded {
            &self.records
        } else {
            &self.records[..self.records.len().min(GROUP_CAP)]
        }
    }

    pub fn has_more(&self) -> bool {
        !self.expanded && self.records.len() > GROUP_CAP
    }
}

/// Filter, partition by floor and sort the groups by floor number.
pub fn group_by_floor<'a>(
    records: &'a [ImageRecord],
    filters: &GalleryFilters,
    expanded: &HashSet<String>,
) -> Vec<FloorGroup<'a>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<FloorGroup<'a>> = Vec::new();

    for record in records.iter().filter(|r| filters.matches(r)) {
        let label = record.floor.display();
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push(FloorGroup {
                label: label.to_string(),
                records: Vec::new(),
                expanded: expanded.contains(label),
            });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }

    groups.sort_by(|a, b| FloorLabel::new(a.label.as_str()).sort_cmp(&FloorLabel::new(b.label.as_str())));
    groups
}

/// Distinct floors present in the records, sorted like the groups
pub fn floor_options(records: &[ImageRecord]) -> Vec<FloorLabel> {
    let mut seen = HashSet::new();
    let mut floors: Vec<FloorLabel> = records
        .iter()
        .filter(|r| seen.insert(r.floor.display().to_string()))
        .map(|r| r.floor.clone())
        .collect();
    floors.sort_by(FloorLabel::sort_cmp);
    floors
}

#[derive(Debug)]
pub struct FloorGallery {
    records: Vec<ImageRecord>,
    floor: FloorFilter,
    date: DateInput,
    /// Display labels of groups showing everything
    expanded: HashSet<String>,
    preview: ImageRecord,
    loading: bool,
}

impl Default for FloorGallery {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            floor: FloorFilter::All,
            date: DateInput::default(),
            expanded: HashSet::new(),
            preview: ImageRecord::placeholder(),
            loading: false,
        }
    }
}

impl FloorGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fetch is about to start
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the records with a fetch result
    pub fn set_records(&mut self, records: Vec<ImageRecord>) {
        self.records = records;
        self.loading = false;
    }

    /// A fetch failed; the last records stay on screen
    pub fn load_failed(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn filters(&self) -> GalleryFilters {
        GalleryFilters {
            floor: self.floor.clone(),
            date: self.date.value(),
        }
    }

    pub fn floor_filter(&self) -> &FloorFilter {
        &self.floor
    }

    pub fn date_text(&self) -> &str {
        self.date.text()
    }

    pub fn set_floor_filter(&mut self, floor: FloorFilter) {
        self.floor = floor;
        self.preview = ImageRecord::placeholder();
    }

    pub fn set_date_input(&mut self, text: &str) {
        self.date.set(text);
        self.preview = ImageRecord::placeholder();
    }

    pub fn show_more(&mut self, label: &str) {
        self.expanded.insert(label.to_string());
    }

    pub fn select(&mut self, record: ImageRecord) {
        self.preview = record;
    }

    pub fn preview(&self) -> &ImageRecord {
        &self.preview
    }

    /// Back to all floors, any date, capped groups and the placeholder preview.
    pub fn clear_filters(&mut self) {
        self.floor = FloorFilter::All;
        self.date.clear();
        self.expanded.clear();
        self.preview = ImageRecord::placeholder();
    }

    /// Whether there is anything for "clear filters" to undo
    pub fn has_active_filters(&self) -> bool {
        self.floor != FloorFilter::All || !self.date.is_empty() || !self.expanded.is_empty()
    }

    pub fn groups(&self) -> Vec<FloorGroup<'_>> {
        group_by_floor(&self.records, &self.filters(), &self.expanded)
    }

    pub fn floor_options(&self) -> Vec<FloorLabel> {
        floor_options(&self.records)
    }
}
