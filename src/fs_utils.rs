use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use walkdir::WalkDir;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

pub fn collect_images(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(anyhow!("{} does not exist", root.display()));
    }
    if !root.is_dir() {
        return Err(anyhow!("{} is not a directory", root.display()));
    }

    let mut files = Vec::new();
    if recursive {
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() && is_supported_image(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(root)
            .with_context(|| format!("Unable to read directory {}", root.display()))?
        {
            let entry =
                entry.with_context(|| format!("Unable to read entry in {}", root.display()))?;
            let path = entry.path();
            if path.is_file() && is_supported_image(&path) {
                files.push(path);
            }
        }
    }
    Ok(files)
}

pub fn is_supported_image(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ref ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str())
    )
}

/// Splits a file name at its last dot. The extension keeps its original case
/// and carries no dot.
pub fn split_name(file_name: &OsStr) -> (String, Option<String>) {
    let name = file_name.to_string_lossy();
    if let Some((stem, ext)) = name.rsplit_once('.') {
        (stem.to_string(), Some(ext.to_string()))
    } else {
        (name.to_string(), None)
    }
}

/// Resolves a rename target in `dir` for `stem` + `ext`, probing `stem_1`,
/// `stem_2`, ... while the candidate already exists. Check-then-rename is
/// best-effort only; a concurrent writer can still race the caller.
pub fn collision_free_path(dir: &Path, stem: &str, ext: Option<&str>) -> PathBuf {
    let file_name = |stem: &str| -> String {
        match ext {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem.to_string(),
        }
    };

    let mut candidate = dir.join(file_name(stem));
    if !candidate.exists() {
        return candidate;
    }
    for idx in 1.. {
        candidate = dir.join(file_name(&format!("{stem}_{idx}")));
        if !candidate.exists() {
            break;
        }
    }
    candidate
}
