use serde_yaml::Value;
use std::path::{Path, PathBuf};

use crate::fs::FileSystem;
use crate::logging::Logger;

/// Runtime package the extraction flow requires.
pub const RUNTIME_PACKAGE: &str = "slang";
/// Flutter bindings for the runtime package.
pub const FLUTTER_PACKAGE: &str = "slang_flutter";
/// Dev-time code generator runner.
pub const BUILD_RUNNER_PACKAGE: &str = "slang_build_runner";

pub fn pubspec_path(root: &Path) -> PathBuf {
    root.join("pubspec.yaml")
}

/// Whether `pubspec.yaml` declares `dependency` under `dependencies` (or
/// `dev_dependencies` when `dev` is set). A read or parse failure is logged
/// and reported as absent.
pub fn has_dependency<F: FileSystem>(
    pubspec: &Path,
    dependency: &str,
    dev: bool,
    fs: &F,
    logger: &dyn Logger,
) -> bool {
    let content = match fs.read_to_string(pubspec) {
        Ok(content) => content,
        Err(err) => {
            logger.line(&format!("Error reading pubspec.yaml: {}", err));
            return false;
        }
    };

    let parsed: Value = match serde_yaml::from_str(&content) {
        Ok(parsed) => parsed,
        Err(err) => {
            logger.line(&format!("Error parsing pubspec.yaml: {}", err));
            return false;
        }
    };

    let section = if dev { "dev_dependencies" } else { "dependencies" };

    // An entry with a null value (`slang:` with no version) counts as absent,
    // matching how the dependency map is consumed downstream.
    parsed
        .get(section)
        .and_then(|deps| deps.get(dependency))
        .map(|value| !value.is_null())
        .unwrap_or(false)
}

/// The slang packages `pubspec.yaml` is still missing, in `dart pub add`
/// argument form (dev-time packages carry the `dev:` prefix).
pub fn missing_dependencies<F: FileSystem>(
    pubspec: &Path,
    fs: &F,
    logger: &dyn Logger,
) -> Vec<String> {
    let mut missing = Vec::new();

    if !has_dependency(pubspec, RUNTIME_PACKAGE, false, fs, logger) {
        missing.push(RUNTIME_PACKAGE.to_string());
    }
    if !has_dependency(pubspec, FLUTTER_PACKAGE, false, fs, logger) {
        missing.push(FLUTTER_PACKAGE.to_string());
    }
    if !has_dependency(pubspec, BUILD_RUNNER_PACKAGE, true, fs, logger) {
        missing.push(format!("dev:{}", BUILD_RUNNER_PACKAGE));
    }

    missing
}
