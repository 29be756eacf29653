/// Records and payloads exchanged with the backend
///
/// Wire names are the backend's (Spanish) column names; the Rust side uses
/// English field names and keeps the mapping in serde attributes.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// Wire value of the ground floor
pub const GROUND_FLOOR: &str = "Piso 0";
/// What users see instead of `Piso 0`
pub const GROUND_FLOOR_DISPLAY: &str = "Planta Baja";

/// A building level as the backend names it (`Piso -2`, `Piso 0`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorLabel(String);

impl FloorLabel {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Map a label as shown to users back to its wire value
    pub fn from_display(display: &str) -> Self {
        if display == GROUND_FLOOR_DISPLAY {
            Self::new(GROUND_FLOOR)
        } else {
            Self::new(display)
        }
    }

    /// Floors offered when uploading, lowest first
    pub fn selectable() -> Vec<FloorLabel> {
        (-6..=7).map(|n| FloorLabel::new(format!("Piso {n}"))).collect()
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    pub fn is_ground(&self) -> bool {
        self.0 == GROUND_FLOOR
    }

    pub fn display(&self) -> &str {
        if self.is_ground() {
            GROUND_FLOOR_DISPLAY
        } else {
            &self.0
        }
    }

    /// Numeric level, when the label has the `Piso <n>` form
    pub fn number(&self) -> Option<i32> {
        if self.0 == GROUND_FLOOR_DISPLAY {
            return Some(0);
        }
        self.0.strip_prefix("Piso ")?.trim().parse().ok()
    }

    /// Numbered floors ascending, then anything else alphabetically
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self.number(), other.number()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl fmt::Display for FloorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// A server timestamp: the raw text plus its parsed value.
///
/// The backend serializes datetimes as RFC 2822 (`Tue, 15 Oct 2024 10:00:00 GMT`);
/// RFC 3339 and `YYYY-MM-DD HH:MM:SS` are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timestamp {
    raw: String,
    parsed: Option<NaiveDateTime>,
}

impl Timestamp {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let text = raw.trim();
        let parsed = DateTime::parse_from_rfc2822(text)
            .map(|dt| dt.naive_utc())
            .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.naive_utc()))
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
            .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok();
        Self { raw, parsed }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    pub fn value(&self) -> Option<NaiveDateTime> {
        self.parsed
    }

    /// Calendar day of the timestamp.
    ///
    /// Falls back to the first whitespace-separated word when the text
    /// did not parse as a whole.
    pub fn date(&self) -> Option<NaiveDate> {
        self.parsed.map(|dt| dt.date()).or_else(|| {
            let first = self.raw.split_whitespace().next()?;
            NaiveDate::parse_from_str(first, "%Y-%m-%d").ok()
        })
    }

    /// Human readable form, or the raw text when unparsed
    pub fn display(&self) -> String {
        match self.parsed {
            Some(dt) => dt.format("%d/%m/%Y %H:%M:%S").to_string(),
            None => self.raw.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(Timestamp::parse(raw.unwrap_or_default()))
    }
}

/// A floor photo as listed by `GET /images`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    /// Server-relative path, e.g. `/uploads/foto.jpg`
    #[serde(rename = "ruta_archivo")]
    pub file_path: String,
    #[serde(rename = "piso")]
    pub floor: FloorLabel,
    #[serde(rename = "fecha_subida", default)]
    pub uploaded_at: Timestamp,
    /// Last-modified date of the source file on the uploader's machine
    #[serde(rename = "fecha_modificacion", default)]
    pub source_modified_at: Timestamp,
    #[serde(rename = "usuario_nombre", default)]
    pub uploader_name: Option<String>,
}

/// Local image shown while nothing is selected in the floor gallery
pub const PLACEHOLDER_IMAGE: &str = "placeholder.png";

impl ImageRecord {
    /// The "nothing selected" preview: empty metadata, local default image.
    pub fn placeholder() -> Self {
        Self {
            id: 0,
            file_path: PLACEHOLDER_IMAGE.to_string(),
            floor: FloorLabel::new(""),
            uploaded_at: Timestamp::default(),
            source_modified_at: Timestamp::default(),
            uploader_name: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.floor.raw().is_empty()
    }

    /// Whether there is metadata worth rendering
    pub fn has_metadata(&self) -> bool {
        !self.floor.raw().is_empty() && !self.uploaded_at.is_empty() && !self.source_modified_at.is_empty()
    }

    pub fn uploader_display(&self) -> &str {
        match self.uploader_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Desconocido",
        }
    }
}

/// The four fixed angles of a vehicle photo set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "Delantero")]
    Front,
    #[serde(rename = "Trasero")]
    Rear,
    #[serde(rename = "LateralIzquierdo", alias = "Lateral Izquierdo")]
    LeftSide,
    #[serde(rename = "LateralDerecho", alias = "Lateral Derecho")]
    RightSide,
}

impl Section {
    /// Upload order; the backend pairs parts with sections by position
    pub const ALL: [Section; 4] = [Section::Front, Section::Rear, Section::LeftSide, Section::RightSide];

    /// Value sent in the `section` multipart field
    pub fn wire(self) -> &'static str {
        match self {
            Section::Front => "Delantero",
            Section::Rear => "Trasero",
            Section::LeftSide => "LateralIzquierdo",
            Section::RightSide => "LateralDerecho",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Front => "Delantero",
            Section::Rear => "Trasero",
            Section::LeftSide => "Lateral Izquierdo",
            Section::RightSide => "Lateral Derecho",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A vehicle photo as listed by `GET /get_car_images`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CarImageRecord {
    pub id: i64,
    #[serde(rename = "image_path")]
    pub file_path: String,
    pub plate: String,
    pub section: Section,
    #[serde(rename = "upload_date", default)]
    pub uploaded_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub nombre: String,
    pub departamento: String,
    pub username: String,
    pub password: String,
}

/// `{ "message": ... }` bodies of successful writes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// A file on the local disk selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub file_name: String,
    /// Last modification, milliseconds since the Unix epoch
    pub last_modified_ms: i64,
}

/// Payload of `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorUpload {
    /// Wire label (`Piso 0`, never the display label)
    pub floor: FloorLabel,
    pub files: Vec<LocalFile>,
}

/// Payload of `POST /upload_car_images`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarUpload {
    pub plate: String,
    /// One file per section, in `Section::ALL` order
    pub files: Vec<(Section, LocalFile)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_floor_label_display_and_number() {
        let ground = FloorLabel::new("Piso 0");
        assert!(ground.is_ground());
        assert_eq!(ground.display(), "Planta Baja");
        assert_eq!(ground.number(), Some(0));
        assert_eq!(FloorLabel::new("Piso -2").number(), Some(-2));
        assert_eq!(FloorLabel::new("Planta Baja").number(), Some(0));
        assert_eq!(FloorLabel::new("Azotea").number(), None);
        assert_eq!(FloorLabel::from_display("Planta Baja"), ground);
        assert_eq!(FloorLabel::from_display("Piso 3").raw(), "Piso 3");
    }

    #[test]
    fn test_selectable_floors() {
        let floors = FloorLabel::selectable();
        assert_eq!(floors.len(), 14);
        assert_eq!(floors.first().unwrap().raw(), "Piso -6");
        assert_eq!(floors.last().unwrap().raw(), "Piso 7");
        assert_eq!(floors[6].display(), "Planta Baja");
    }

    #[test]
    fn test_unnumbered_floors_sort_last() {
        let mut floors = vec![
            FloorLabel::new("Sótano"),
            FloorLabel::new("Piso 3"),
            FloorLabel::new("Azotea"),
            FloorLabel::new("Piso -1"),
        ];
        floors.sort_by(FloorLabel::sort_cmp);
        let raw: Vec<&str> = floors.iter().map(FloorLabel::raw).collect();
        assert_eq!(raw, ["Piso -1", "Piso 3", "Azotea", "Sótano"]);
    }

    #[test]
    fn test_timestamp_formats() {
        let rfc2822 = Timestamp::parse("Tue, 15 Oct 2024 10:30:00 GMT");
        assert_eq!(rfc2822.date(), NaiveDate::from_ymd_opt(2024, 10, 15));

        let sql = Timestamp::parse("2024-10-15 23:59:59.123");
        assert_eq!(sql.date(), NaiveDate::from_ymd_opt(2024, 10, 15));

        let iso = Timestamp::parse("2024-10-15T08:00:00+00:00");
        assert_eq!(iso.date(), NaiveDate::from_ymd_opt(2024, 10, 15));

        let day_only = Timestamp::parse("2024-10-15 mañana");
        assert_eq!(day_only.value(), None);
        assert_eq!(day_only.date(), NaiveDate::from_ymd_opt(2024, 10, 15));

        assert!(Timestamp::default().is_empty());
        assert_eq!(Timestamp::parse("garbage").date(), None);
    }

    #[test]
    fn test_image_record_from_backend_json() {
        let body = json!([{
            "id": 7,
            "user_id": 2,
            "piso": "Piso 0",
            "nombre_archivo": "a.jpg",
            "ruta_archivo": "/uploads/a.jpg",
            "fecha_subida": "Tue, 15 Oct 2024 10:30:00 GMT",
            "fecha_modificacion": "Mon, 14 Oct 2024 09:00:00 GMT",
            "usuario_nombre": null
        }]);
        let records: Vec<ImageRecord> = serde_json::from_value(body).unwrap();
        let record = &records[0];
        assert_eq!(record.file_path, "/uploads/a.jpg");
        assert!(record.floor.is_ground());
        assert!(record.has_metadata());
        assert_eq!(record.uploader_display(), "Desconocido");
    }

    #[test]
    fn test_car_record_accepts_both_section_spellings() {
        let body = json!([
            { "id": 1, "plate": "AB123", "section": "Lateral Izquierdo", "image_path": "/uploads/l.jpg", "user_id": 1, "upload_date": "Tue, 15 Oct 2024 10:30:00 GMT" },
            { "id": 2, "plate": "AB123", "section": "LateralDerecho", "image_path": "/uploads/r.jpg", "user_id": 1, "upload_date": null }
        ]);
        let records: Vec<CarImageRecord> = serde_json::from_value(body).unwrap();
        assert_eq!(records[0].section, Section::LeftSide);
        assert_eq!(records[1].section, Section::RightSide);
        assert!(records[1].uploaded_at.is_empty());
    }

    #[test]
    fn test_placeholder_has_no_metadata() {
        let placeholder = ImageRecord::placeholder();
        assert!(placeholder.is_placeholder());
        assert!(!placeholder.has_metadata());
        assert!(placeholder.file_path.ends_with("placeholder.png"));
    }
}
