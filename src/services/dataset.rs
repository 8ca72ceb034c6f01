//! Emoji dataset loading.
//!
//! Reads an emojibase `data.json` and a shortcode table
//! (`shortcodes/github.json` style, hexcode -> name or list of names) and
//! left-joins them into the immutable [`Emoji`] collection the search runs
//! over. A curated dataset in the same format is compiled in and used when
//! no files are configured.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::emoji::{Emoji, Emoticon};
use crate::config::DatasetConfig;
use crate::error::{EmojiError, EmojiResult};

const BUNDLED_DATA: &str = include_str!("../../data/emoji.json");
const BUNDLED_SHORTCODES: &str = include_str!("../../data/shortcodes.json");
const BUNDLED_NAME: &str = "<bundled>";

/// One entry of emojibase `data.json`. Fields the search never looks at
/// (`order`, `subgroup`, `skins`, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawEmoji {
    label: String,
    hexcode: String,
    emoji: Option<String>,
    /// Older emojibase releases name the glyph `unicode`
    unicode: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    group: Option<u8>,
    emoticon: Option<OneOrMany>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<serde_json::Value>),
}

impl OneOrMany {
    /// String members only; anything else in a list is skipped.
    fn into_strings(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(values) => values
                .into_iter()
                .filter_map(|v| match v {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        }
    }
}

/// The loaded, read-only emoji collection
#[derive(Debug, Clone)]
pub struct Dataset {
    emojis: Vec<Emoji>,
}

impl Dataset {
    /// Load the dataset selected by config: the files when both paths are
    /// set, the bundled dataset when neither is.
    pub fn from_config(config: &DatasetConfig) -> EmojiResult<Self> {
        match (config.data_path(), config.shortcodes_path()) {
            (Some(data), Some(shortcodes)) => Self::load(&data, &shortcodes),
            (None, None) => Self::bundled(),
            _ => Err(EmojiError::Config(
                "data_path and shortcodes_path must be set together".to_string(),
            )),
        }
    }

    /// Load from an emojibase data file and a shortcode file
    pub fn load(data_path: &Path, shortcodes_path: &Path) -> EmojiResult<Self> {
        let data = read(data_path)?;
        let shortcodes = read(shortcodes_path)?;
        let dataset = Self::parse(&data, data_path, &shortcodes, shortcodes_path)?;

        tracing::debug!(
            path = %data_path.display(),
            count = dataset.len(),
            "loaded emoji dataset"
        );
        Ok(dataset)
    }

    /// The dataset compiled into the binary
    pub fn bundled() -> EmojiResult<Self> {
        let name = Path::new(BUNDLED_NAME);
        Self::parse(BUNDLED_DATA, name, BUNDLED_SHORTCODES, name)
    }

    /// Build from JSON text, e.g. already read from elsewhere
    pub fn from_json(data: &str, shortcodes: &str) -> EmojiResult<Self> {
        Self::parse(data, Path::new("data.json"), shortcodes, Path::new("shortcodes.json"))
    }

    fn parse(
        data: &str,
        data_path: &Path,
        shortcodes: &str,
        shortcodes_path: &Path,
    ) -> EmojiResult<Self> {
        let raw: Vec<RawEmoji> = parse_json(data_path, data)?;
        let shortcodes: HashMap<String, OneOrMany> = parse_json(shortcodes_path, shortcodes)?;
        Self::merge(raw, shortcodes)
    }

    /// Left join of the shortcode table onto the records, keyed by hexcode.
    fn merge(raw: Vec<RawEmoji>, mut shortcodes: HashMap<String, OneOrMany>) -> EmojiResult<Self> {
        let mut seen = HashSet::with_capacity(raw.len());
        let mut emojis = Vec::with_capacity(raw.len());

        for entry in raw {
            if !seen.insert(entry.hexcode.clone()) {
                return Err(EmojiError::DuplicateHexcode(entry.hexcode));
            }
            if entry.label.trim().is_empty() {
                return Err(EmojiError::InvalidRecord {
                    hexcode: entry.hexcode,
                    reason: "empty label".to_string(),
                });
            }
            let Some(glyph) = entry.emoji.or(entry.unicode) else {
                return Err(EmojiError::InvalidRecord {
                    hexcode: entry.hexcode,
                    reason: "no emoji or unicode field".to_string(),
                });
            };

            let codes = shortcodes
                .remove(&entry.hexcode)
                .map(OneOrMany::into_strings)
                .unwrap_or_default();

            // Emojibase lists several emoticons for some emoji
            let emoticon = entry.emoticon.map(|e| match e {
                OneOrMany::One(text) => Emoticon::Text(text),
                many => Emoticon::List(many.into_strings()),
            });

            emojis.push(Emoji {
                emoji: glyph,
                label: entry.label,
                tags: entry.tags.unwrap_or_default(),
                shortcodes: codes,
                emoticon,
                group: entry.group,
                hexcode: entry.hexcode,
            });
        }

        if !shortcodes.is_empty() {
            tracing::debug!(unmatched = shortcodes.len(), "shortcodes without an emoji record");
        }

        Ok(Self { emojis })
    }

    /// All records, in dataset order
    pub fn emojis(&self) -> &[Emoji] {
        &self.emojis
    }

    pub fn len(&self) -> usize {
        self.emojis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }
}

fn read(path: &Path) -> EmojiResult<String> {
    fs::read_to_string(path).map_err(|source| EmojiError::DatasetRead {
        path: PathBuf::from(path),
        source,
    })
}

fn parse_json<T: DeserializeOwned>(path: &Path, contents: &str) -> EmojiResult<T> {
    serde_json::from_str(contents).map_err(|source| EmojiError::DatasetParse {
        path: PathBuf::from(path),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::emoji;

    const DATA: &str = r#"[
        {"label": "thumbs up", "hexcode": "1F44D", "emoji": "👍", "group": 1,
         "tags": ["like", "good", "yes"], "order": 1, "skins": [{"label": "x"}]},
        {"label": "winking face", "hexcode": "1F609", "unicode": "😉", "group": 0,
         "emoticon": [";)", ";-)"]},
        {"label": "light skin tone", "hexcode": "1F3FB", "emoji": "🏻"}
    ]"#;

    const SHORTCODES: &str = r#"{
        "1F44D": ["thumbsup", "+1", 7],
        "1F609": "wink",
        "FFFFF": "orphan"
    }"#;

    #[test]
    fn test_left_join() {
        let dataset = Dataset::from_json(DATA, SHORTCODES).unwrap();
        let emojis = dataset.emojis();

        assert_eq!(emojis.len(), 3);
        assert_eq!(emojis[0].shortcodes, vec!["thumbsup", "+1"]);
        assert_eq!(emojis[1].shortcodes, vec!["wink"]);
        assert!(emojis[2].shortcodes.is_empty());
    }

    #[test]
    fn test_fields() {
        let dataset = Dataset::from_json(DATA, SHORTCODES).unwrap();
        let emojis = dataset.emojis();

        assert_eq!(emojis[0].emoji, "👍");
        assert_eq!(emojis[0].tags, vec!["like", "good", "yes"]);
        assert_eq!(emojis[0].group, Some(1));
        // legacy `unicode` field and emoticon list
        assert_eq!(emojis[1].emoji, "😉");
        assert_eq!(
            emojis[1].emoticon,
            Some(Emoticon::List(vec![";)".to_string(), ";-)".to_string()]))
        );
        assert_eq!(emojis[2].group, None);
        assert!(emojis[2].tags.is_empty());
    }

    #[test]
    fn test_emoticon_list_members_match_separately() {
        let dataset = Dataset::from_json(DATA, SHORTCODES).unwrap();
        let codes = |query: &str| -> Vec<String> {
            emoji::search(dataset.emojis(), query)
                .into_iter()
                .map(|e| e.hexcode.clone())
                .collect()
        };

        assert_eq!(codes(";-)"), vec!["1F609"]);
        assert!(codes(") ;").is_empty());
        assert!(codes(")").is_empty());
    }

    #[test]
    fn test_duplicate_hexcode() {
        let data = r#"[
            {"label": "a", "hexcode": "1", "emoji": "a"},
            {"label": "b", "hexcode": "1", "emoji": "b"}
        ]"#;
        let err = Dataset::from_json(data, "{}").unwrap_err();
        assert!(matches!(err, EmojiError::DuplicateHexcode(code) if code == "1"));
    }

    #[test]
    fn test_missing_glyph() {
        let data = r#"[{"label": "a", "hexcode": "1"}]"#;
        let err = Dataset::from_json(data, "{}").unwrap_err();
        assert!(matches!(err, EmojiError::InvalidRecord { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = Dataset::from_json("[{", "{}").unwrap_err();
        assert!(matches!(err, EmojiError::DatasetParse { .. }));
        assert!(err.to_string().contains("data.json"));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("data.json");
        let codes_path = dir.path().join("github.json");
        fs::write(&data_path, DATA).unwrap();
        fs::write(&codes_path, SHORTCODES).unwrap();

        let dataset = Dataset::load(&data_path, &codes_path).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(&dir.path().join("nope.json"), &dir.path().join("nope2.json"))
            .unwrap_err();
        assert!(matches!(err, EmojiError::DatasetRead { .. }));
    }

    #[test]
    fn test_from_config_requires_both_paths() {
        let config = DatasetConfig {
            data_path: Some("/tmp/data.json".to_string()),
            shortcodes_path: None,
        };
        assert!(matches!(
            Dataset::from_config(&config),
            Err(EmojiError::Config(_))
        ));
    }

    #[test]
    fn test_bundled_dataset() {
        let dataset = Dataset::from_config(&DatasetConfig::default()).unwrap();
        assert!(!dataset.is_empty());

        let results = emoji::search(dataset.emojis(), "thumbsup");
        assert_eq!(results[0].emoji, "👍");

        let popular = emoji::search(dataset.emojis(), "");
        assert_eq!(popular.len(), emoji::FALLBACK_RESULTS);
    }
}
