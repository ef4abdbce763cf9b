//! Query normalization: turns free text or a maps URL into the ordered list of
//! search variants the resolver tries.

use serde::Serialize;

use crate::dictionary::QUERY_CATEGORY_KEYWORDS;
use crate::text::{contains_phrase, lowercase_words};
use crate::url::{looks_like_url, parse_maps_url};

/// A query after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedQuery {
    /// The caller's input, trimmed.
    pub raw: String,
    /// Text candidates are validated against: the raw text, or the name
    /// recovered from a URL.
    pub match_text: String,
    /// The part before the first comma, or the name recovered from a URL.
    pub business_name: Option<String>,
    /// The part after the first comma.
    pub location: Option<String>,
    /// Provider identifier recovered from a URL.
    pub place_identifier: Option<String>,
    /// Search strings in priority order, without duplicates.
    pub variants: Vec<String>,
}

impl NormalizedQuery {
    /// First known category keyword in the business-name part of the query.
    #[must_use]
    pub fn category_keyword(&self) -> Option<&'static str> {
        let name = lowercase_words(self.business_name.as_deref().unwrap_or(&self.match_text));
        QUERY_CATEGORY_KEYWORDS
            .iter()
            .copied()
            .find(|kw| contains_phrase(&name, kw))
    }
}

#[must_use]
pub fn normalize_query(input: &str) -> NormalizedQuery {
    let raw = input.trim().to_owned();
    if looks_like_url(&raw) {
        normalize_url(raw)
    } else {
        normalize_text(raw)
    }
}

fn normalize_url(raw: String) -> NormalizedQuery {
    let parts = parse_maps_url(&raw);
    let search_term = parts.business_name.clone().unwrap_or_else(|| raw.clone());
    NormalizedQuery {
        match_text: search_term.clone(),
        business_name: parts.business_name,
        location: None,
        place_identifier: parts.place_identifier,
        variants: vec![search_term],
        raw,
    }
}

fn normalize_text(raw: String) -> NormalizedQuery {
    if raw.is_empty() {
        return NormalizedQuery {
            match_text: String::new(),
            business_name: None,
            location: None,
            place_identifier: None,
            variants: Vec::new(),
            raw,
        };
    }

    let (business_name, location) = match raw.split_once(',') {
        Some((name, rest)) => {
            let rest = rest.trim();
            (
                name.trim().to_owned(),
                (!rest.is_empty()).then(|| rest.to_owned()),
            )
        }
        None => (raw.clone(), None),
    };
    let has_comma = raw.contains(',');

    let mut variants = vec![raw.clone()];

    if has_comma {
        match &location {
            Some(loc) => variants.push(format!("\"{business_name}\" {loc}")),
            None => variants.push(format!("\"{business_name}\"")),
        }
    } else {
        variants.push(format!("\"{raw}\""));
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.len() >= 3 {
            let split = words.len() - 2;
            variants.push(format!(
                "{}, {}",
                words[..split].join(" "),
                words[split..].join(" ")
            ));
        }
    }

    if let Some(loc) = location.as_deref() {
        let name_lower = lowercase_words(&business_name);
        let loc_words = loc.replace(',', " ");
        let loc_words = loc_words.split_whitespace().collect::<Vec<_>>().join(" ");
        for kw in QUERY_CATEGORY_KEYWORDS {
            if contains_phrase(&name_lower, kw) {
                variants.push(format!("{kw} {loc_words}"));
            }
        }
    }

    let mut unique: Vec<String> = Vec::with_capacity(variants.len());
    for variant in variants {
        if !unique.contains(&variant) {
            unique.push(variant);
        }
    }

    NormalizedQuery {
        match_text: raw.clone(),
        business_name: Some(business_name),
        location,
        place_identifier: None,
        variants: unique,
        raw,
    }
}
