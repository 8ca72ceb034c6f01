//! emoji-search - emoji lookup for keyboard launchers.
//!
//! Scores an emoji collection against a free-text query and renders the best
//! matches as an Alfred script filter document.
//!
//! # Architecture
//!
//! - [`services::normalize`] - case and accent folding for query and fields
//! - [`services::dataset`] - emojibase data and shortcode loading
//! - [`services::emoji`] - scoring, ranking and the empty-query fallback
//! - [`services::icons`] - SVG icon generation
//! - [`alfred`] - script filter output
//! - [`config`] - configuration loading and management
//! - [`cli`] - command line entry point
//!
//! # Example
//!
//! ```
//! use emoji_search::{alfred, Dataset};
//!
//! let dataset = Dataset::bundled().expect("bundled data is valid");
//! let matches = emoji_search::search(dataset.emojis(), "thumbsup");
//! let result = alfred::render(&matches, "thumbsup", &Default::default());
//! assert_eq!(result.items[0].uid.as_deref(), Some("1F44D"));
//! ```

pub mod alfred;
pub mod cli;
pub mod config;
pub mod services;

mod error;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{EmojiError, EmojiResult};
pub use services::dataset::Dataset;
pub use services::emoji::{search, search_with, Emoji, Emoticon, SearchLimits};
pub use services::normalize::normalize;
