use anyhow::{Context, Result};
use glob::Pattern;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

use crate::fs::FileSystem;
use crate::logging::Logger;

/// A translation entry ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrEntry {
    pub key: String,
    pub value: String,
}

/// Glob matched against paths relative to the project root.
pub const TRANSLATION_FILE_PATTERN: &str = "**/i18n/*.i18n.json";
/// Build output is never a translation source.
pub const BUILD_EXCLUDE_PATTERN: &str = "**/build/**";

static INCLUDE_PATTERN: OnceLock<Pattern> = OnceLock::new();
static EXCLUDE_PATTERN: OnceLock<Pattern> = OnceLock::new();

fn include_pattern() -> &'static Pattern {
    INCLUDE_PATTERN.get_or_init(|| {
        Pattern::new(TRANSLATION_FILE_PATTERN)
            .expect("TRANSLATION_FILE_PATTERN is invalid - this is a bug")
    })
}

fn exclude_pattern() -> &'static Pattern {
    EXCLUDE_PATTERN.get_or_init(|| {
        Pattern::new(BUILD_EXCLUDE_PATTERN)
            .expect("BUILD_EXCLUDE_PATTERN is invalid - this is a bug")
    })
}

/// Discovers translation files under `root`, sorted for a stable processing
/// order. Unreadable directory entries are skipped rather than failing the
/// walk.
pub fn find_translation_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if exclude_pattern().matches_path(relative) {
            continue;
        }
        if include_pattern().matches_path(relative) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    files
}

/// Reads a translation file as a flat JSON mapping. An empty file counts as
/// an empty mapping.
pub fn read_translation_file<F: FileSystem>(path: &Path, fs: &F) -> Result<Map<String, Value>> {
    let content = fs
        .read_to_string(path)
        .with_context(|| format!("Failed to read translation file: {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    let map: Map<String, Value> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in: {}", path.display()))?;

    Ok(map)
}

/// Writes a translation mapping back with 2-space indentation and a trailing
/// newline.
pub fn write_translation_file<F: FileSystem>(
    path: &Path,
    content: &Map<String, Value>,
    fs: &F,
) -> Result<()> {
    let serialized = serde_json::to_string_pretty(content)?;
    fs.write(path, &format!("{}\n", serialized))
        .with_context(|| format!("Failed to write translation file: {}", path.display()))
}

/// Inserts or overwrites `entry` in every file, sequentially. A read or
/// parse failure aborts before any later file is touched; files already
/// written stay written.
pub fn merge_entry<F: FileSystem>(
    entry: &TrEntry,
    files: &[PathBuf],
    fs: &F,
    logger: &dyn Logger,
) -> Result<()> {
    for path in files {
        let mut content = read_translation_file(path, fs)?;
        content.insert(entry.key.clone(), Value::String(entry.value.clone()));
        write_translation_file(path, &content, fs)?;
        logger.line(&format!("Added {} to {}", entry.key, path.display()));
    }

    Ok(())
}
