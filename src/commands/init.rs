use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::config::SlangConfig;
use crate::fs::FileSystem;
use crate::logging::Logger;
use crate::manifest;
use crate::runner;

/// Prepares a Flutter project for slang: adds the missing packages, creates
/// `slang.yaml` and a base translation file, then runs the generator once.
pub fn run<F: FileSystem>(root: &Path, fs: &F, logger: &dyn Logger) -> Result<()> {
    logger.line("=== slang-extract init ===");

    let pubspec = manifest::pubspec_path(root);
    if !fs.is_file(&pubspec) {
        bail!("pubspec.yaml file not found.");
    }

    let missing = manifest::missing_dependencies(&pubspec, fs, logger);
    logger.line(&format!("Dependencies to add: {:?}", missing));

    if !missing.is_empty() {
        runner::add_dependencies(root, &missing, logger)
            .map_err(|err| anyhow::anyhow!("Error adding dependency: {}", err))?;
    }

    let config = SlangConfig::load_or_create(root, fs, logger);

    // Seed a base-locale translation file, but never clobber one that
    // already has content.
    let input_file = root.join(&config.input_directory).join(format!(
        "str_{}{}",
        config.base_locale, config.input_file_pattern
    ));
    if !fs.is_file(&input_file) {
        if let Some(parent) = input_file.parent() {
            fs.create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs.write(&input_file, "{}\n")
            .with_context(|| format!("Failed to create file: {}", input_file.display()))?;
        logger.line(&format!("Created: {}", input_file.display()));
    }

    match runner::run_slang_gen(root, logger) {
        Ok(_) => {
            logger.line("Localization files generated successfully.");
            Ok(())
        }
        Err(err) => {
            logger.line("Failed to generate localization files.");
            Err(err.into())
        }
    }
}
