/// Floor photo upload form
///
/// Owns the pending files and their previews. Every preview that leaves
/// the list is released, and dropping the form releases the rest.
use tracing::info;

use super::notice::Notice;
use crate::api::models::{FloorLabel, FloorUpload, LocalFile, MessageResponse};
use crate::error::ApiError;
use crate::files::preview::PreviewHandle;

pub const FLOOR_REQUIRED: &str = "Por favor, seleccione un piso antes de agregar imágenes.";
pub const FILES_REQUIRED: &str = "Por favor, agrega al menos una imagen para subir.";
const UPLOAD_FAILED: &str = "Hubo un problema al subir las imágenes.";

/// A selected file and its local preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    file: LocalFile,
    preview: PreviewHandle,
}

impl PendingUpload {
    pub fn new(file: LocalFile, preview: PreviewHandle) -> Self {
        Self { file, preview }
    }

    pub fn file(&self) -> &LocalFile {
        &self.file
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Uploaded,
    Failed,
}

impl UploadStatus {
    pub fn label(self) -> Option<&'static str> {
        match self {
            UploadStatus::Idle => None,
            UploadStatus::Uploading => Some("Subiendo..."),
            UploadStatus::Uploaded => Some("Subido exitosamente"),
            UploadStatus::Failed => Some("Error al subir"),
        }
    }
}

#[derive(Debug, Default)]
pub struct FloorUploadForm {
    /// Raw wire label of the selected floor
    floor: Option<FloorLabel>,
    pending: Vec<PendingUpload>,
    /// Index of the pending file shown large
    enlarged: Option<usize>,
    status: UploadStatus,
}

impl FloorUploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floor(&self) -> Option<&FloorLabel> {
        self.floor.as_ref()
    }

    pub fn select_floor(&mut self, floor: FloorLabel) {
        self.floor = Some(floor);
    }

    pub fn pending(&self) -> &[PendingUpload] {
        &self.pending
    }

    pub fn status(&self) -> UploadStatus {
        self.status
    }

    /// Files may only be picked once a floor is chosen
    pub fn can_add_files(&self) -> Result<(), Notice> {
        match self.floor {
            Some(_) => Ok(()),
            None => Err(Notice::error(FLOOR_REQUIRED)),
        }
    }

    /// Append prepared files to the list.
    ///
    /// Without a floor the files are refused and their previews released.
    pub fn add_files(&mut self, files: Vec<PendingUpload>) -> Result<(), Notice> {
        if let Err(notice) = self.can_add_files() {
            release_all(&files);
            return Err(notice);
        }
        self.pending.extend(files);
        self.status = UploadStatus::Idle;
        Ok(())
    }

    /// Show one pending file large
    pub fn enlarge(&mut self, index: usize) {
        if index < self.pending.len() {
            self.enlarged = Some(index);
        }
    }

    pub fn enlarged(&self) -> Option<&PendingUpload> {
        self.enlarged.and_then(|i| self.pending.get(i))
    }

    /// Drop everything: files, previews, floor and status.
    pub fn cancel(&mut self) {
        release_all(&self.pending);
        self.pending.clear();
        self.enlarged = None;
        self.floor = None;
        self.status = UploadStatus::Idle;
    }

    /// Validate and build the request. Nothing is sent on error.
    pub fn begin_submit(&mut self) -> Result<FloorUpload, Notice> {
        if self.pending.is_empty() {
            return Err(Notice::error(FILES_REQUIRED));
        }
        let floor = match &self.floor {
            Some(floor) => FloorLabel::from_display(floor.raw()),
            None => return Err(Notice::error(FLOOR_REQUIRED)),
        };

        self.status = UploadStatus::Uploading;
        Ok(FloorUpload {
            floor,
            files: self.pending.iter().map(|p| p.file.clone()).collect(),
        })
    }

    /// Apply the server's answer. Failures keep the files for a retry.
    pub fn finish_submit(&mut self, result: Result<MessageResponse, ApiError>) -> Notice {
        match result {
            Ok(response) => {
                info!("✅ Uploaded {} floor images", self.pending.len());
                self.cancel();
                self.status = UploadStatus::Uploaded;
                Notice::success(
                    response
                        .message
                        .unwrap_or_else(|| "Imágenes subidas correctamente.".to_string()),
                )
            }
            Err(err) => {
                tracing::error!("Floor upload failed: {}", err);
                self.status = UploadStatus::Failed;
                Notice::from_api(&err, UPLOAD_FAILED)
            }
        }
    }
}

impl Drop for FloorUploadForm {
    fn drop(&mut self) {
        release_all(&self.pending);
    }
}

fn release_all(files: &[PendingUpload]) {
    for pending in files {
        pending.preview.release();
    }
}
