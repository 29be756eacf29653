/// Upload preview generation
///
/// Each selected file gets a small JPEG thumbnail in the preview cache
/// directory. The thumbnail path is the "preview handle": it stays valid
/// until `release` deletes the file.
use image::imageops::FilterType;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use super::local_file;
use crate::error::PreviewError;
use crate::state::upload::PendingUpload;

/// Size of generated previews (bounding square)
const PREVIEW_SIZE: u32 = 256;

static NEXT_PREVIEW: AtomicU64 = AtomicU64::new(0);

/// A revocable reference to a cached preview image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    path: PathBuf,
}

impl PreviewHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the cached preview. Safe to call more than once.
    pub fn release(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("🗑️  Released preview {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("⚠️  Could not release preview {}: {}", self.path.display(), e),
        }
    }
}

/// Decode `source`, shrink it and save it into `cache_dir`.
pub fn generate_preview(source: &Path, cache_dir: &Path) -> Result<PreviewHandle, PreviewError> {
    fs::create_dir_all(cache_dir)?;

    let img = image::open(source).map_err(|e| PreviewError::Decode {
        path: source.display().to_string(),
        source: e,
    })?;

    let preview = img.resize(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Triangle);

    let id = NEXT_PREVIEW.fetch_add(1, Ordering::Relaxed);
    let path = cache_dir.join(format!("{}-{}.jpg", std::process::id(), id));

    // JPEG has no alpha channel
    preview.to_rgb8().save(&path)?;

    debug!("📸 Generated preview: {}", path.display());
    Ok(PreviewHandle { path })
}

/// Files that could be prepared, and the names of those that could not
#[derive(Debug, Clone, Default)]
pub struct PreparedFiles {
    pub ready: Vec<PendingUpload>,
    pub failed: Vec<String>,
}

/// Read metadata and build previews for the selected files.
/// Runs on the blocking pool because decoding is CPU-bound.
pub async fn prepare_uploads(paths: Vec<PathBuf>, cache_dir: PathBuf) -> PreparedFiles {
    let task = tokio::task::spawn_blocking(move || prepare_uploads_blocking(&paths, &cache_dir));

    match task.await {
        Ok(prepared) => prepared,
        Err(e) => {
            warn!("⚠️  Preview task failed: {}", e);
            PreparedFiles::default()
        }
    }
}

fn prepare_uploads_blocking(paths: &[PathBuf], cache_dir: &Path) -> PreparedFiles {
    let mut prepared = PreparedFiles::default();

    for path in paths {
        let result = local_file(path)
            .map_err(PreviewError::from)
            .and_then(|file| Ok(PendingUpload::new(file, generate_preview(path, cache_dir)?)));

        match result {
            Ok(pending) => prepared.ready.push(pending),
            Err(e) => {
                warn!("⚠️  Skipping {}: {}", path.display(), e);
                prepared.failed.push(
                    path.file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string(),
                );
            }
        }
    }

    prepared
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Write a small solid-colour PNG and return its path
    pub(crate) fn write_test_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(600, 400, Rgb([200, 40, 40])).save(&path).unwrap();
        path
    }

    #[test]
    fn test_generate_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_test_png(dir.path(), "floor.png");
        let cache = dir.path().join("previews");

        let handle = generate_preview(&source, &cache).unwrap();
        assert!(handle.path().exists());

        let thumb = image::open(handle.path()).unwrap();
        assert_eq!(thumb.width(), PREVIEW_SIZE);
        assert!(thumb.height() < PREVIEW_SIZE);

        handle.release();
        assert!(!handle.path().exists());
        // Second release is a no-op
        handle.release();
    }

    #[test]
    fn test_previews_are_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_test_png(dir.path(), "floor.png");
        let a = generate_preview(&source, dir.path()).unwrap();
        let b = generate_preview(&source, dir.path()).unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_undecodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.jpg");
        fs::write(&source, b"not an image").unwrap();
        assert!(matches!(
            generate_preview(&source, dir.path()),
            Err(PreviewError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_prepare_uploads_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_test_png(dir.path(), "good.png");
        let missing = dir.path().join("missing.png");

        let prepared = prepare_uploads(vec![good, missing], dir.path().join("cache")).await;
        assert_eq!(prepared.ready.len(), 1);
        assert_eq!(prepared.ready[0].file().file_name, "good.png");
        assert_eq!(prepared.failed, vec!["missing.png".to_string()]);

        for pending in &prepared.ready {
            pending.preview().release();
        }
    }
}
