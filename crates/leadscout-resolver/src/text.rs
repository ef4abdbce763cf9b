//! Name cleaning shared by the matchers and the query normalizer.

use crate::dictionary::{is_location_phrase, LEGAL_SUFFIXES, MAX_LOCATION_WORDS};

/// Lowercases `name`, drops apostrophes, and turns other punctuation into
/// word breaks. Whitespace is collapsed.
pub(crate) fn lowercase_words(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() || c.is_whitespace() {
            out.push(c);
        } else if c != '\'' && c != '\u{2019}' {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fully-cleaned form of a business name: [`lowercase_words`] with legal and
/// generic type suffixes removed.
///
/// `"Joe's Pizza Restaurant, LLC"` → `"joes pizza"`.
#[must_use]
pub fn clean_name(name: &str) -> String {
    lowercase_words(name)
        .split(' ')
        .filter(|w| !w.is_empty() && !LEGAL_SUFFIXES.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Removes US state names, state codes, and common city names from an
/// already-cleaned string. Longer phrases win over shorter ones.
#[must_use]
pub fn strip_locations(cleaned: &str) -> String {
    let words: Vec<&str> = cleaned.split_whitespace().collect();
    let mut kept = Vec::with_capacity(words.len());
    let mut i = 0;
    'scan: while i < words.len() {
        let longest = MAX_LOCATION_WORDS.min(words.len() - i);
        for len in (1..=longest).rev() {
            if is_location_phrase(&words[i..i + len].join(" ")) {
                i += len;
                continue 'scan;
            }
        }
        kept.push(words[i]);
        i += 1;
    }
    kept.join(" ")
}

/// Words longer than two characters.
pub(crate) fn significant_tokens(s: &str) -> Vec<&str> {
    s.split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .collect()
}

/// Normalized Levenshtein similarity in `[0.0, 1.0]`.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// `true` when `phrase` occurs in `text` on word boundaries.
pub(crate) fn contains_phrase(text: &str, phrase: &str) -> bool {
    format!(" {text} ").contains(&format!(" {phrase} "))
}
