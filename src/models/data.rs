use crate::models::Team;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    /// Label as printed in the report.
    pub fn thai_label(&self) -> &'static str {
        match self {
            Gender::Male => "ชาย",
            Gender::Female => "หญิง",
            Gender::Unknown => "",
        }
    }
}

/// Fields pulled out of a household-registration document.
///
/// Every field is best effort: a label that is not found leaves the
/// field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub full_name: String,
    pub citizen_id: String,
    pub date_of_birth: String,
    pub age: String,
    pub house_no: String,
    pub moo: String,
    pub tambon: String,
    pub amphur: String,
    pub province: String,
    pub move_in_date: String,
    pub address_full: String,
    pub gender: Gender,
}

/// A composed JPEG collage of the uploaded photos.
#[derive(Debug, Clone)]
pub struct PhotoGrid {
    pub jpeg: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub width_mm: u32,
}

impl PhotoGrid {
    /// Height in millimetres at the configured width, keeping aspect ratio.
    pub fn height_mm(&self) -> f64 {
        if self.width_px == 0 {
            return 0.0;
        }
        self.width_mm as f64 * self.height_px as f64 / self.width_px as f64
    }
}

/// Placeholder values handed to the document template.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    pub values: BTreeMap<String, String>,
    pub photo_grid: Option<PhotoGrid>,
}

impl ReportContext {
    pub const PHOTO_GRID_KEY: &'static str = "PHOTO_GRID";

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Names of the files written for one request, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutput {
    pub docx_filename: String,
    pub pdf_filename: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Raw form submission, before validation.
#[derive(Debug, Clone, Default)]
pub struct ReportForm {
    pub doc_date: Option<String>,
    pub time_start: Option<String>,
    pub team_id: Option<String>,
    pub pdf_register: Option<UploadedFile>,
    pub photos: Vec<UploadedFile>,
}

/// A validated submission, ready for report generation.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub doc_date: NaiveDate,
    pub time_start: String,
    pub team: Team,
    pub pdf_bytes: Vec<u8>,
    pub photos: Vec<Vec<u8>>,
}

/// Start and end of the operation, formatted as `HH.MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub start: String,
    pub end: String,
}
