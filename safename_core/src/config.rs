use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SafenameError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub sanitizer: SanitizerConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Copy, Clone, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorPolicy {
    /// Leave `/` and `\` for the caller to deal with.
    #[default]
    Keep,
    Replace,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SanitizerConfig {
    pub replacement: char,
    pub path_separators: SeparatorPolicy,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        SanitizerConfig {
            replacement: '_',
            path_separators: SeparatorPolicy::Keep,
        }
    }
}

impl Config {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, SafenameError> {
        let contents = fs::read_to_string(path)?;
        let config = Config::new_from_string(&contents)?;

        info!("replacement: U+{:04X}", config.sanitizer.replacement as u32);
        info!("path separators: {:?}", config.sanitizer.path_separators);

        Ok(config)
    }

    pub fn new_from_string(contents: &str) -> Result<Self, SafenameError> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }
}

#[test]
fn config_read() {
    let config = Config::new_from_string(include_str!("../test/config.toml")).unwrap();
    assert_eq!(config.sanitizer.replacement, '-');
    assert_eq!(config.sanitizer.path_separators, SeparatorPolicy::Replace);
}

#[test]
fn config_read_empty_uses_defaults() {
    let config = Config::new_from_string("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.sanitizer.replacement, '_');
    assert_eq!(config.sanitizer.path_separators, SeparatorPolicy::Keep);
}

#[test]
fn config_read_partial_section() {
    let config = Config::new_from_string(
        r#"
[sanitizer]
path_separators = "replace"
"#,
    )
    .unwrap();

    assert_eq!(config.sanitizer.replacement, '_');
    assert_eq!(config.sanitizer.path_separators, SeparatorPolicy::Replace);
}

#[test]
fn config_read_rejects_unknown_policy() {
    let result = Config::new_from_string(
        r#"
[sanitizer]
path_separators = "escape"
"#,
    );

    assert!(matches!(result, Err(SafenameError::Config(_))));
}

#[test]
fn config_write() {
    let config = Config {
        sanitizer: SanitizerConfig {
            replacement: '#',
            path_separators: SeparatorPolicy::Replace,
        },
    };

    let toml = toml::to_string(&config).unwrap();
    assert!(toml.contains("path_separators = \"replace\""));
    assert_eq!(Config::new_from_string(&toml).unwrap(), config);
}

#[test]
fn config_new_missing_file() {
    let result = Config::new("/nonexistent/safename.toml");
    assert!(matches!(result, Err(SafenameError::Io(_))));
}
