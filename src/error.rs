//! Error types for emoji-search
//!
//! Only dataset loading is allowed to fail. Searching and rendering are
//! total over their inputs and never produce one of these.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing the emoji collection
#[derive(Debug, Error)]
pub enum EmojiError {
    /// A dataset file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset file is not valid emojibase JSON
    #[error("Failed to parse {}: {source}", path.display())]
    DatasetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record is missing data every emoji must carry
    #[error("Invalid emoji record {hexcode}: {reason}")]
    InvalidRecord { hexcode: String, reason: String },

    /// Two records share a hexcode, so the shortcode join would be ambiguous
    #[error("Duplicate emoji hexcode: {0}")]
    DuplicateHexcode(String),

    /// The icon index could not be encoded
    #[error("Failed to serialize icon index: {0}")]
    IconIndex(#[source] serde_json::Error),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for emoji-search operations
pub type EmojiResult<T> = Result<T, EmojiError>;
