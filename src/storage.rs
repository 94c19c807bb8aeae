//! Local persistence for generated artifacts.

use crate::error::Result;
use base64::Engine;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions recognized as saved images.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// A flat output directory for generated artifacts.
#[derive(Debug, Clone)]
pub(crate) struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Creates the directory (recursively) if missing and resolves it to an
    /// absolute path, so saved paths are absolute.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let root = root.canonicalize()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes bytes under the workspace; returns the absolute path.
    pub fn save_bytes(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(filename);
        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved artifact");
        Ok(path)
    }

    /// Decodes base64 data and writes it under the workspace.
    pub fn save_base64(&self, filename: &str, data: &str) -> Result<PathBuf> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(data)?;
        self.save_bytes(filename, &bytes)
    }

    /// Saved files whose extension is on the image allow-list, sorted by
    /// name for deterministic output.
    pub fn list_images(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Deletes every saved image; returns how many were removed.
    pub fn clear_images(&self) -> Result<usize> {
        let images = self.list_images()?;
        for path in &images {
            fs::remove_file(path)?;
        }
        Ok(images.len())
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Default filename for an image response part. A caller-supplied stem
/// names the first part; later parts get an index suffix.
pub(crate) fn image_filename(stem: Option<&str>, index: usize, extension: &str) -> String {
    match stem {
        Some(stem) if index == 0 => format!("{stem}.{extension}"),
        Some(stem) => format!("{stem}_{index}.{extension}"),
        None => format!("image_{}_{index}.{extension}", Utc::now().timestamp_millis()),
    }
}

/// Default filename for saved SVG markup.
pub(crate) fn svg_filename(stem: Option<&str>) -> String {
    match stem {
        Some(stem) => format!("{stem}.svg"),
        None => format!("svg_{}.svg", Utc::now().timestamp_millis()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_resolves_absolute_path() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::create(dir.path().join("out")).unwrap();
        assert!(workspace.root().is_absolute());
        assert!(workspace.root().is_dir());
    }

    #[test]
    fn test_save_bytes_writes_file() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::create(dir.path()).unwrap();

        let path = workspace.save_bytes("a.png", &[1, 2, 3]).unwrap();
        assert!(path.exists());
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_save_base64_round_trip() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::create(dir.path()).unwrap();

        let path = workspace.save_base64("b.png", "AQID").unwrap();
        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_save_base64_rejects_invalid_input() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::create(dir.path()).unwrap();

        assert!(workspace.save_base64("c.png", "not base64!").is_err());
    }

    #[test]
    fn test_list_images_applies_allow_list() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::create(dir.path()).unwrap();
        workspace.save_bytes("a.png", b"x").unwrap();
        workspace.save_bytes("b.jpg", b"x").unwrap();
        workspace.save_bytes("c.txt", b"x").unwrap();

        let images = workspace.list_images().unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.png", "b.jpg"]);
    }

    #[test]
    fn test_list_images_is_case_insensitive() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::create(dir.path()).unwrap();
        workspace.save_bytes("shout.PNG", b"x").unwrap();

        assert_eq!(workspace.list_images().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_images_leaves_non_images() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::create(dir.path()).unwrap();
        workspace.save_bytes("a.png", b"x").unwrap();
        workspace.save_bytes("b.webp", b"x").unwrap();
        workspace.save_bytes("notes.txt", b"x").unwrap();

        let deleted = workspace.clear_images().unwrap();
        assert_eq!(deleted, 2);
        assert!(workspace.list_images().unwrap().is_empty());
        assert!(dir.path().join("notes.txt").exists());
    }

    #[test]
    fn test_image_filename_with_stem() {
        assert_eq!(image_filename(Some("sunset"), 0, "png"), "sunset.png");
        assert_eq!(image_filename(Some("sunset"), 1, "png"), "sunset_1.png");
    }

    #[test]
    fn test_image_filename_generated() {
        let name = image_filename(None, 2, "webp");
        assert!(name.starts_with("image_"));
        assert!(name.ends_with("_2.webp"));
    }

    #[test]
    fn test_svg_filename() {
        assert_eq!(svg_filename(Some("logo")), "logo.svg");
        let generated = svg_filename(None);
        assert!(generated.starts_with("svg_"));
        assert!(generated.ends_with(".svg"));
    }
}
