//! Alfred script filter output.
//!
//! Field names follow Alfred's JSON format exactly; optional fields are left
//! out of the document when unset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::services::emoji::Emoji;
use crate::services::icons::ICONS_SUBDIR;

/// Top-level script filter document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlfredResult {
    pub items: Vec<AlfredItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlfredItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods: Option<BTreeMap<String, Modifier>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Text>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Override applied while a modifier key is held
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largetype: Option<String>,
}

/// Rendering options for result items
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Output directory of `--generate-icons`; when set, items get
    /// `{icons_dir}/icons/{hexcode}.svg` as their icon

    pub icons_dir: Option<String>,
}

impl AlfredItem {
    /// The item for one matched emoji
    pub fn from_emoji(emoji: &Emoji, options: &RenderOptions) -> Self {
        let tags = emoji.tag_list();
        let shortcodes = emoji.shortcode_list();

        let mut subtitle = emoji.label.clone();
        if !tags.is_empty() {
            subtitle.push_str(&format!(" ({})", tags));
        }
        if !shortcodes.is_empty() {
            subtitle.push_str(&format!(" :{}:", shortcodes));
        }

        let shortcode = emoji.primary_shortcode();
        let mut mods = BTreeMap::new();
        mods.insert(
            "cmd".to_string(),
            Modifier {
                subtitle: Some(format!("Copy \"{}\" to clipboard", emoji.label)),
                arg: Some(emoji.label.clone()),
                valid: Some(true),
            },
        );
        mods.insert(
            "alt".to_string(),
            Modifier {
                subtitle: Some(format!("Copy \"{}\" to clipboard", shortcode)),
                arg: Some(shortcode),
                valid: Some(true),
            },
        );

        let icon = options.icons_dir.as_ref().map(|dir| Icon {
            kind: None,
            path: Some(format!(
                "{}/{}/{}.svg",
                dir.trim_end_matches('/'),
                ICONS_SUBDIR,
                emoji.hexcode
            )),
        });

        Self {
            uid: Some(emoji.hexcode.clone()),
            title: format!("{} {}", emoji.emoji, emoji.label),
            subtitle: Some(subtitle),
            arg: Some(emoji.emoji.clone()),
            autocomplete: Some(emoji.label.clone()),
            icon,
            valid: Some(true),
            match_text: None,
            mods: Some(mods),
            text: Some(Text {
                copy: Some(emoji.emoji.clone()),
                largetype: Some(format!(
                    "{}\n\n{}\n\nTags: {}\nShortcodes: {}",
                    emoji.emoji, emoji.label, tags, shortcodes
                )),
            }),
        }
    }

    /// The single non-actionable item shown when nothing matched
    pub fn no_results(query: &str) -> Self {
        Self {
            title: "No emojis found".to_string(),
            subtitle: Some(format!("No results for \"{}\"", query)),
            valid: Some(false),
            icon: Some(Icon {
                kind: Some("default".to_string()),
                path: Some("icon.png".to_string()),
            }),
            ..Default::default()
        }
    }
}

/// Build the script filter document for ranked matches, in rank order.
pub fn render(matches: &[&Emoji], query: &str, options: &RenderOptions) -> AlfredResult {
    let mut items: Vec<AlfredItem> = matches
        .iter()
        .map(|emoji| AlfredItem::from_emoji(emoji, options))
        .collect();

    if items.is_empty() {
        items.push(AlfredItem::no_results(query));
    }

    AlfredResult { items }
}
