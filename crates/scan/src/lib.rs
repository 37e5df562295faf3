//! Gallery manifest scanning.
//!
//! Scans a local image folder (top level only) and writes the ordered
//! listing to a JSON array file for static consumption by the site.
//! Re-running replaces the manifest wholesale.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;

/// Extensions considered images, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// List image files directly inside `dir` (no recursion), alphabetical
/// by filename, as `dir/filename` relative paths.
pub fn scan_folder(dir: &str) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| has_allowed_extension(name))
        .collect();
    names.sort();

    Ok(names
        .into_iter()
        .map(|name| format!("{dir}/{name}"))
        .collect())
}

/// Whether a filename carries one of the [`ALLOWED_EXTENSIONS`].
pub fn has_allowed_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Scan `dir` and overwrite `manifest_path` with the JSON array.
///
/// When `dir` does not exist yet it is created and no manifest is
/// written; returns the number of entries written otherwise.
pub fn write_manifest(dir: &str, manifest_path: &str) -> anyhow::Result<Option<usize>> {
    if !Path::new(dir).exists() {
        fs::create_dir_all(dir).with_context(|| format!("creating folder '{dir}'"))?;
        tracing::info!(dir, "Folder did not exist; created it, nothing to scan yet");
        return Ok(None);
    }

    let images = scan_folder(dir).with_context(|| format!("scanning folder '{dir}'"))?;

    let json = serde_json::to_string_pretty(&images)?;
    fs::write(manifest_path, json).with_context(|| format!("writing '{manifest_path}'"))?;

    tracing::info!(dir, manifest = manifest_path, count = images.len(), "Manifest written");
    Ok(Some(images.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn scan_filters_and_sorts_alphabetically() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        touch(tmp.path(), "b.png");
        touch(tmp.path(), "a.jpg");
        touch(tmp.path(), "c.txt");

        let images = scan_folder(dir).unwrap();
        assert_eq!(images, vec![format!("{dir}/a.jpg"), format!("{dir}/b.png")]);
    }

    #[test]
    fn scan_is_case_insensitive_on_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        touch(tmp.path(), "upper.JPG");
        touch(tmp.path(), "mixed.WebP");

        let images = scan_folder(dir).unwrap();
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn scan_ignores_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        fs::create_dir(tmp.path().join("nested.png")).unwrap();
        touch(tmp.path(), "real.png");

        let images = scan_folder(dir).unwrap();
        assert_eq!(images, vec![format!("{dir}/real.png")]);
    }

    #[test]
    fn missing_folder_is_created_without_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("not-yet");
        let manifest = tmp.path().join("out.json");

        let written = write_manifest(
            dir.to_str().unwrap(),
            manifest.to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(written, None);
        assert!(dir.is_dir(), "folder must be created");
        assert!(!manifest.exists(), "no manifest for a fresh folder");
    }

    #[test]
    fn rerun_overwrites_manifest_entirely() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let manifest = tmp.path().join("out.json");
        let manifest_path = manifest.to_str().unwrap();

        touch(tmp.path(), "old.png");
        assert_eq!(write_manifest(dir, manifest_path).unwrap(), Some(1));

        fs::remove_file(tmp.path().join("old.png")).unwrap();
        touch(tmp.path(), "new.jpg");
        assert_eq!(write_manifest(dir, manifest_path).unwrap(), Some(1));

        let contents = fs::read_to_string(manifest).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, vec![format!("{dir}/new.jpg")]);
    }
}
