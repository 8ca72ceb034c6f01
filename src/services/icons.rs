//! Icon assets for result items.
//!
//! Writes one `icons/{hexcode}.svg` per emoji, rendering the glyph with the
//! platform emoji font, plus an `icon-index.json` mapping each hexcode to its
//! relative icon path. The output is derived from the dataset and can be
//! regenerated at any time.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::emoji::Emoji;
use crate::error::{EmojiError, EmojiResult};

pub const ICONS_SUBDIR: &str = "icons";
pub const INDEX_FILE: &str = "icon-index.json";

/// Summary of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconReport {
    pub generated: usize,
}

/// SVG document for a single glyph
pub fn svg_for(glyph: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
  <text x="32" y="48" font-size="48" text-anchor="middle" font-family="Apple Color Emoji, Segoe UI Emoji, Noto Color Emoji, system-ui">{}</text>
</svg>"#,
        escape_xml(glyph)
    )
}

/// Generate icons and the index under `out_dir`
pub fn generate(emojis: &[Emoji], out_dir: &Path) -> EmojiResult<IconReport> {
    let icons_dir = out_dir.join(ICONS_SUBDIR);
    fs::create_dir_all(&icons_dir)?;

    let mut index = BTreeMap::new();
    for emoji in emojis.iter().filter(|e| !e.emoji.is_empty()) {
        let filename = format!("{}.svg", emoji.hexcode);
        fs::write(icons_dir.join(&filename), svg_for(&emoji.emoji))?;
        index.insert(emoji.hexcode.as_str(), format!("{}/{}", ICONS_SUBDIR, filename));
    }

    let json = serde_json::to_string_pretty(&index).map_err(EmojiError::IconIndex)?;
    fs::write(out_dir.join(INDEX_FILE), json)?;

    tracing::info!(count = index.len(), dir = %icons_dir.display(), "generated emoji icons");

    Ok(IconReport {
        generated: index.len(),
    })
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::emoji::tests::emoji;

    #[test]
    fn test_svg_contains_glyph() {
        let svg = svg_for("👍");
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(">👍</text>"));
    }

    #[test]
    fn test_svg_escapes_markup() {
        assert!(svg_for("<&>").contains("&lt;&amp;&gt;"));
    }

    #[test]
    fn test_index_error_is_not_a_config_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EmojiError::IconIndex(source);
        assert!(err.to_string().starts_with("Failed to serialize icon index: "));
        assert!(!err.to_string().contains("Configuration error"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_generate_writes_icons_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut blank = emoji("0", "blank", &[], &[]);
        blank.emoji.clear();
        let emojis = vec![emoji("1F44D", "thumbs up", &[], &[]), blank];

        let report = generate(&emojis, dir.path()).unwrap();
        assert_eq!(report.generated, 1);
        assert!(dir.path().join("icons/1F44D.svg").exists());
        assert!(!dir.path().join("icons/0.svg").exists());

        let index: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap())
                .unwrap();
        assert_eq!(index.get("1F44D").map(String::as_str), Some("icons/1F44D.svg"));
    }
}
