use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

use super::is_allowed_image;

/// Collect every uploadable image below `folder`, sorted by path.
pub fn collect_images(folder: &Path) -> Vec<PathBuf> {
    info!("🔍 Scanning folder: {}", folder.display());

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_allowed_image(path))
        .collect();

    images.sort();
    info!("✅ Found {} images", images.len());
    images
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collects_nested_images_only() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("obra").join("piso3");
        fs::create_dir_all(&nested).unwrap();

        fs::write(dir.path().join("b.jpg"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(nested.join("a.PNG"), b"x").unwrap();
        fs::write(nested.join("raw.nef"), b"x").unwrap();

        let found = collect_images(dir.path());
        let names: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, ["b.jpg", "obra/piso3/a.PNG"]);
    }

    #[test]
    fn test_missing_folder_is_empty() {
        assert!(collect_images(Path::new("/nonexistent/folder")).is_empty());
    }
}
