use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EmojiError, EmojiResult};
use crate::services::emoji::{SearchLimits, FALLBACK_MAX_GROUP, FALLBACK_RESULTS, MAX_RESULTS};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

/// Where the emoji data comes from. Leave both unset for the bundled set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// emojibase `data.json`
    pub data_path: Option<String>,
    /// hexcode -> shortcode(s) table, e.g. emojibase `shortcodes/github.json`
    pub shortcodes_path: Option<String>,
}

impl DatasetConfig {
    pub fn data_path(&self) -> Option<PathBuf> {
        self.data_path.as_deref().map(expand)
    }

    pub fn shortcodes_path(&self) -> Option<PathBuf> {
        self.shortcodes_path.as_deref().map(expand)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: usize,
    pub fallback_results: usize,
    pub fallback_max_group: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory passed to `--generate-icons`; icons are read from its
    /// `icons/{hexcode}.svg`
    pub icons_dir: Option<String>,
    pub pretty: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            fallback_results: FALLBACK_RESULTS,
            fallback_max_group: FALLBACK_MAX_GROUP,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            icons_dir: None,
            pretty: true,
        }
    }
}

impl SearchConfig {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_results: self.max_results,
            fallback_results: self.fallback_results,
            fallback_max_group: self.fallback_max_group,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("emoji-search")
            .join("config.toml")
    }

    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`. A missing, unreadable or malformed file
    /// yields the defaults; only the last two are logged.
    pub fn load_from(path: &Path) -> Self {
        let mut config = if path.exists() {
            match Self::read(path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "{}, using defaults", e);
                    Self::default()
                }
            }
        } else {
            Self::default()
        };

        config.validate();
        config
    }

    fn read(path: &Path) -> EmojiResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate and clamp config values to acceptable ranges
    fn validate(&mut self) {
        // Clamp max_results to reasonable range (1 - 500)
        self.search.max_results = self.search.max_results.clamp(1, 500);

        // The fallback list never outgrows a normal result list
        self.search.fallback_results = self.search.fallback_results.min(self.search.max_results);
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> EmojiResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| EmojiError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
