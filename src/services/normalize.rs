//! Text folding shared by the query and every searchable field.
//!
//! Matching is case- and accent-insensitive: both sides go through
//! [`normalize`] before any comparison.

use unicode_normalization::UnicodeNormalization;

/// Fold `input` for comparison: lower-case, strip diacritics, trim.
///
/// Accented letters decompose to their base letter (`"Café"` -> `"cafe"`).
/// Latin letters that have no canonical decomposition (`ø`, `æ`, `ß`, ...)
/// are spelled out in ASCII instead. Only the combining diacritical mark
/// blocks are removed; marks that belong to other scripts (kana voicing,
/// Devanagari vowel signs, Hangul jamo) are kept and recomposed, so `"が"`
/// stays `"が"`.
///
/// Trimming runs last so that whitespace exposed by removing a leading or
/// trailing combining mark is also stripped, which keeps the function
/// idempotent.
pub fn normalize(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());

    for c in input.to_lowercase().nfd() {
        if is_diacritic(c) {
            continue;
        }
        match fold_latin(c) {
            Some(ascii) => folded.push_str(ascii),
            None => folded.push(c),
        }
    }

    let out: String = folded.nfc().collect();
    let trimmed = out.trim();
    if trimmed.len() == out.len() {
        out
    } else {
        trimmed.to_string()
    }
}

/// Combining Diacritical Marks, their Supplement for Symbols, and the
/// combining Half Marks.
fn is_diacritic(c: char) -> bool {
    matches!(c, '\u{300}'..='\u{36f}' | '\u{20d0}'..='\u{20ff}' | '\u{fe20}'..='\u{fe2f}')
}

/// Latin-1 Supplement and Latin Extended-A letters that NFD leaves intact.
fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'æ' => "ae",
        'ð' | 'đ' => "d",
        'ø' => "o",
        'þ' => "th",
        'ß' => "ss",
        'ħ' => "h",
        'ı' => "i",
        'ĳ' => "ij",
        'ĸ' => "k",
        'ŀ' | 'ł' => "l",
        'ŉ' => "'n",
        'ŋ' => "n",
        'œ' => "oe",
        'ŧ' => "t",
        'ſ' => "s",
        _ => return None,
    };
    Some(folded)
}
