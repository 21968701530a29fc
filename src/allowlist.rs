use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_ALLOW_LIST_FILE: &str = "urls.txt";

/// Loads the optional allow-list: one page URL per line, blank lines
/// ignored, duplicates collapsed. A missing default file means "no
/// filtering"; an explicitly requested file must exist.
pub fn load_allow_list(path: Option<&Path>) -> Result<Option<HashSet<String>>> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_ALLOW_LIST_FILE), false),
    };

    if !path.exists() {
        if explicit {
            anyhow::bail!("Allow-list file not found: {:?}", path);
        }
        info!(
            action = "skip",
            component = "allow_list",
            "No allow-list file present; all clean queries will be kept"
        );
        return Ok(None);
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read allow-list file {path:?}"))?;
    let urls: HashSet<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        warn!(action = "skip", component = "allow_list", file_path = ?path, "Allow-list file is empty");
        return Ok(None);
    }

    info!(
        action = "loaded",
        component = "allow_list",
        url_count = urls.len(),
        file_path = ?path,
        "Loaded allow-list URLs"
    );
    Ok(Some(urls))
}
