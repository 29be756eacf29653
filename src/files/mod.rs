/// Local files selected for upload
///
/// This module handles:
/// - Reading file metadata (name, last-modified time)
/// - Generating and releasing upload previews (preview.rs)
/// - Collecting images from a folder (scan.rs)

pub mod preview;
pub mod scan;

use std::io;
use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::api::models::LocalFile;

/// Extensions the backend accepts
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Whether the path has an extension the backend accepts
pub fn is_allowed_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Content type sent with a file part
pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Describe a file on disk for upload.
///
/// A modification time the platform cannot report counts as "now".
pub fn local_file(path: &Path) -> io::Result<LocalFile> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }

    let last_modified_ms = metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(LocalFile {
        path: path.to_path_buf(),
        file_name,
        last_modified_ms,
    })
}
