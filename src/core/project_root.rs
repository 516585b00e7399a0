//! Best-effort project root detection
//!
//! The root is only used to shorten absolute source paths in the `location`
//! field. Not finding one is never an error.

use std::path::{Path, PathBuf};

/// Files or directories whose presence marks a project root
pub const ROOT_MARKERS: [&str; 2] = ["Cargo.toml", ".git"];

/// Walk upward from `start` looking for a directory holding a root marker
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let start = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());

    start
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

/// Probe from the current working directory
pub fn detect() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| find_project_root(&cwd))
}

/// Render `file` relative to `root` when it lies inside it
pub fn relative_to_root(file: &str, root: Option<&Path>) -> String {
    let path = Path::new(file);
    match root {
        Some(root) if path.is_absolute() => path
            .strip_prefix(root)
            .map(|relative| relative.display().to_string())
            .unwrap_or_else(|_| file.to_string()),
        _ => file.to_string(),
    }
}
