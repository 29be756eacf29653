/// Vehicle photo upload form: one plate, exactly four photos.
use std::collections::BTreeMap;
use tracing::{error, info};

use super::notice::Notice;
use crate::api::models::{CarUpload, LocalFile, MessageResponse, Section};
use crate::error::ApiError;

pub const INCOMPLETE: &str = "Por favor, completa todos los campos antes de subir.";
const UPLOADED: &str = "¡Imágenes subidas exitosamente!";
const UPLOAD_FAILED: &str = "Hubo un problema al subir las imágenes.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarUploadForm {
    plate: String,
    slots: BTreeMap<Section, LocalFile>,
}

impl CarUploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn set_plate(&mut self, plate: &str) {
        self.plate = plate.to_string();
    }

    /// Fill (or replace) the photo of one section
    pub fn set_slot(&mut self, section: Section, file: LocalFile) {
        self.slots.insert(section, file);
    }

    pub fn slot(&self, section: Section) -> Option<&LocalFile> {
        self.slots.get(&section)
    }

    pub fn is_complete(&self) -> bool {
        !self.plate.trim().is_empty() && Section::ALL.iter().all(|s| self.slots.contains_key(s))
    }

    /// Validate and build the request. A partial set is never sent.
    pub fn begin_submit(&self) -> Result<CarUpload, Notice> {
        if !self.is_complete() {
            return Err(Notice::error(INCOMPLETE));
        }

        let files = Section::ALL
            .iter()
            .filter_map(|section| self.slots.get(section).map(|file| (*section, file.clone())))
            .collect();

        Ok(CarUpload {
            plate: self.plate.trim().to_string(),
            files,
        })
    }

    /// Apply the server's answer. Only success resets the form.
    pub fn finish_submit(&mut self, result: Result<MessageResponse, ApiError>) -> Notice {
        match result {
            Ok(_) => {
                info!("✅ Uploaded vehicle photos for {}", self.plate.trim());
                *self = Self::default();
                Notice::success(UPLOADED)
            }
            Err(err) => {
                error!("Vehicle upload failed: {}", err);
                Notice::from_api(&err, UPLOAD_FAILED)
            }
        }
    }
}
