use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::fs::FileSystem;
use crate::logging::Logger;

pub const CONFIG_FILE: &str = "slang.yaml";

/// Document written when no `slang.yaml` exists yet.
pub const DEFAULT_CONFIG: &str = "\
base_locale: en
fallback_strategy: base_locale
input_directory: lib/_core/i18n
input_file_pattern: .i18n.json
output_directory: lib/_core/i18n
output_file_name: translations.dart
translate_var: t
enum_name: AppLocale
class_name: Tr
string_interpolation: dart
format:
  enabled: true
  width: 120
";

/// Generator configuration read from `slang.yaml` at the project root.
///
/// Only the keys the tool consumes are modeled; the generator's remaining
/// keys pass through the file untouched. Every field is individually
/// defaulted so a partial file works.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SlangConfig {
    #[serde(default = "default_base_locale")]
    pub base_locale: String,

    /// Directory holding the JSON translation sources.
    #[serde(default = "default_input_directory")]
    pub input_directory: String,

    /// Suffix of translation files, e.g. `.i18n.json`.
    #[serde(default = "default_input_file_pattern")]
    pub input_file_pattern: String,

    /// Identifier used to prefix non-context access (`t.someKey`).
    #[serde(default = "default_translate_var")]
    pub translate_var: String,

    /// Class used for context-based access (`Tr.of(context).someKey`).
    #[serde(default = "default_class_name")]
    pub class_name: String,

    #[serde(default = "default_string_interpolation")]
    pub string_interpolation: String,
}

fn default_base_locale() -> String {
    "en".to_string()
}

fn default_input_directory() -> String {
    "lib/_core/i18n".to_string()
}

fn default_input_file_pattern() -> String {
    ".i18n.json".to_string()
}

fn default_translate_var() -> String {
    "t".to_string()
}

fn default_class_name() -> String {
    "Tr".to_string()
}

fn default_string_interpolation() -> String {
    "dart".to_string()
}

impl Default for SlangConfig {
    fn default() -> Self {
        Self {
            base_locale: default_base_locale(),
            input_directory: default_input_directory(),
            input_file_pattern: default_input_file_pattern(),
            translate_var: default_translate_var(),
            class_name: default_class_name(),
            string_interpolation: default_string_interpolation(),
        }
    }
}

impl SlangConfig {
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Reads `slang.yaml`, creating it with the default document when
    /// absent. Any read, create, or parse failure is logged and answered
    /// with the defaults; a broken config file never blocks the operation.
    pub fn load_or_create<F: FileSystem>(root: &Path, fs: &F, logger: &dyn Logger) -> Self {
        let path = Self::config_path(root);

        let content = if fs.is_file(&path) {
            match fs.read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    logger.line(&format!("Failed to read {}: {}", CONFIG_FILE, err));
                    return Self::default();
                }
            }
        } else {
            logger.line(&format!("Creating file: {}", path.display()));
            if let Err(err) = fs.write(&path, DEFAULT_CONFIG) {
                logger.line(&format!("Error creating file {}: {}", path.display(), err));
                return Self::default();
            }
            DEFAULT_CONFIG.to_string()
        };

        match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                logger.line(&format!("Failed to parse {}: {}", CONFIG_FILE, err));
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::InMemoryFileSystem;
    use crate::logging::mock::RecordingLogger;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_document_round_trips_to_defaults() {
        let config: SlangConfig = serde_yaml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, SlangConfig::default());
    }

    #[test]
    fn creates_config_file_when_absent() {
        let fs = InMemoryFileSystem::new();
        let logger = RecordingLogger::new();

        let config = SlangConfig::load_or_create(Path::new("proj"), &fs, &logger);

        assert_eq!(config, SlangConfig::default());
        assert!(fs.is_file(Path::new("proj/slang.yaml")));
        assert!(logger.contains("Creating file"));
    }

    #[test]
    fn reads_existing_config() {
        let fs = InMemoryFileSystem::new();
        fs.add_file(
            "proj/slang.yaml",
            "translate_var: tr\nclass_name: Messages\ninput_directory: assets/i18n\n",
        );
        let logger = RecordingLogger::new();

        let config = SlangConfig::load_or_create(Path::new("proj"), &fs, &logger);

        assert_eq!(config.translate_var, "tr");
        assert_eq!(config.class_name, "Messages");
        assert_eq!(config.input_directory, "assets/i18n");
        // Unlisted keys fall back per field.
        assert_eq!(config.base_locale, "en");
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("proj/slang.yaml", "translate_var: [unbalanced");
        let logger = RecordingLogger::new();

        let config = SlangConfig::load_or_create(Path::new("proj"), &fs, &logger);

        assert_eq!(config, SlangConfig::default());
        assert!(logger.contains("Failed to parse slang.yaml"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let fs = InMemoryFileSystem::new();
        fs.add_file(
            "proj/slang.yaml",
            "translate_var: t\noutput_file_name: translations.dart\nformat:\n  enabled: true\n",
        );
        let logger = RecordingLogger::new();

        let config = SlangConfig::load_or_create(Path::new("proj"), &fs, &logger);
        assert_eq!(config.translate_var, "t");
    }
}
