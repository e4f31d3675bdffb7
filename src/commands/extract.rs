use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::SlangConfig;
use crate::edit;
use crate::fs::FileSystem;
use crate::locator;
use crate::logging::Logger;
use crate::manifest;
use crate::merge::{self, TrEntry};
use crate::rewriter;
use crate::runner;

pub struct ExtractOptions {
    /// Source file containing the literal.
    pub file: PathBuf,
    /// 1-based cursor line.
    pub line: usize,
    /// 1-based cursor column.
    pub column: usize,
    /// Translation key; prompted for interactively when absent.
    pub key: Option<String>,
    /// Replace with `Class.of(context).key` instead of `t.key`.
    pub use_context: bool,
    /// Report what would change without touching any file.
    pub dry_run: bool,
    /// Skip the generator run after the merge.
    pub no_generate: bool,
}

/// Extracts the string literal under the cursor position into a translation
/// key: rewrites the source, merges the entry into every translation file,
/// then runs the generator.
///
/// Aborts without mutating anything when no literal sits under the cursor,
/// the slang package is missing, or the key prompt is cancelled. Later
/// failures do not roll back earlier steps.
pub fn run<F: FileSystem>(
    root: &Path,
    options: &ExtractOptions,
    fs: &F,
    logger: &dyn Logger,
) -> Result<()> {
    logger.line("=== slang-extract extract ===");

    if options.line == 0 || options.column == 0 {
        bail!("Line and column are 1-based.");
    }

    let source_path = if options.file.is_absolute() {
        options.file.clone()
    } else {
        root.join(&options.file)
    };
    let source = fs
        .read_to_string(&source_path)
        .with_context(|| format!("Failed to read source file: {}", source_path.display()))?;

    let line_index = options.line - 1;
    let lines: Vec<&str> = source.split('\n').collect();
    let Some(line_text) = lines.get(line_index) else {
        bail!(
            "Line {} is out of range ({} lines in {})",
            options.line,
            lines.len(),
            source_path.display()
        );
    };

    let Some(literal) = locator::locate(line_text, options.column - 1) else {
        logger.line("No valid string found.");
        return Ok(());
    };

    let pubspec = manifest::pubspec_path(root);
    if !fs.is_file(&pubspec) {
        bail!("pubspec.yaml file not found.");
    }
    if !manifest::has_dependency(&pubspec, manifest::RUNTIME_PACKAGE, false, fs, logger) {
        bail!("Slang package is not found in dependencies.");
    }

    let config = SlangConfig::load_or_create(root, fs, logger);

    let key = match resolve_key(options, &literal.inner_text, logger)? {
        Some(key) => key,
        None => {
            logger.line("Aborted: no translation key entered.");
            return Ok(());
        }
    };

    let rewrite = rewriter::rewrite(&literal.inner_text, &key);

    let replaced = if options.use_context {
        format!("{}.of(context).{}", config.class_name, rewrite.replacement)
    } else {
        format!("{}.{}", config.translate_var, rewrite.replacement)
    };

    if options.dry_run {
        logger.line(&format!(
            "[Dry run] Would replace {} with {}",
            literal.full_match, replaced
        ));
        logger.line(&format!(
            "[Dry run] Would store \"{}\": \"{}\"",
            rewrite.key, rewrite.value
        ));
        return Ok(());
    }

    let edited = edit::replace_literal(&source, line_index, &literal, &replaced)?;
    fs.write(&source_path, &edited)
        .with_context(|| format!("Failed to write source file: {}", source_path.display()))?;
    logger.line(&format!("Replaced {} with {}", literal.full_match, replaced));

    let tr_files = merge::find_translation_files(root);
    if tr_files.is_empty() {
        logger.line("No i18n.json file found. Run 'slang-extract init' to initialize.");
        return Ok(());
    }

    let entry = TrEntry {
        key: rewrite.key,
        value: rewrite.value,
    };
    merge::merge_entry(&entry, &tr_files, fs, logger)?;

    if options.no_generate {
        logger.line("Skipping generation (--no-generate).");
        return Ok(());
    }

    logger.line("Generating localization files...");
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

/// Picks the translation key: the `--key` flag when given, otherwise an
/// interactive prompt seeded with a camelCase suggestion. Empty input or
/// EOF cancels.
fn resolve_key(
    options: &ExtractOptions,
    inner_text: &str,
    logger: &dyn Logger,
) -> Result<Option<String>> {
    if let Some(key) = &options.key {
        let key = key.trim();
        if !key.is_empty() {
            return Ok(Some(key.to_string()));
        }
    }

    let suggested = rewriter::suggest_key(inner_text);
    if !suggested.is_empty() {
        logger.line(&format!("Suggested key: {}", suggested));
    }

    print!("Enter translation key (camelCase): ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    if std::io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    Ok(Some(input.to_string()))
}
