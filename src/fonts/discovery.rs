//! System font discovery.
//!
//! Recursively scans a fixed list of font directories. Used both as the
//! "does this host have any fonts at all" probe and to pick the fallback
//! face when the request names no font.

use std::fs;
use std::path::{Path, PathBuf};

fn is_font_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref(),
        Some("ttf") | Some("otf")
    )
}

fn walk(dir: &Path, matches: &dyn Fn(&Path) -> bool) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Some(found) = walk(&path, matches) {
                return Some(found);
            }
        } else if matches(&path) {
            return Some(path);
        }
    }

    None
}

/// First font file found under any of the search paths.
pub fn find_any_font(search_paths: &[PathBuf]) -> Option<PathBuf> {
    search_paths
        .iter()
        .find_map(|dir| walk(dir, &is_font_file))
}

/// Font file whose stem matches the given name, case-insensitively.
pub fn find_named_font(search_paths: &[PathBuf], name: &str) -> Option<PathBuf> {
    let wanted = name.to_lowercase();
    let matches = move |path: &Path| {
        is_font_file(path)
            && path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(|stem| stem.to_lowercase() == wanted)
                .unwrap_or(false)
    };

    search_paths.iter().find_map(|dir| walk(dir, &matches))
}
