//! Relaxed matching for category-style queries ("pest control, Waco TX"),
//! where the provider's best result rarely carries the exact queried name.

use serde::Serialize;

use crate::dictionary::{CATEGORY_STOP_WORDS, PEST_CONTROL_KEYWORDS};
use crate::text::{contains_phrase, lowercase_words, strip_locations};

const SUBSTRING_MIN_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PestControl,
}

impl Category {
    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::PestControl => PEST_CONTROL_KEYWORDS,
        }
    }

    /// `true` if `name` carries any of this category's keywords.
    #[must_use]
    pub fn describes(self, name: &str) -> bool {
        let words = lowercase_words(name);
        self.keywords().iter().any(|kw| contains_phrase(&words, kw))
    }
}

/// The recognised category a search variant belongs to, if any.
#[must_use]
pub fn detect_category(variant: &str) -> Option<Category> {
    Category::PestControl
        .describes(variant)
        .then_some(Category::PestControl)
}

/// Accepts `candidate_name` as a probable match for `query` when both belong
/// to `category` and their business-name tokens overlap.
#[must_use]
pub fn category_match(category: Category, query: &str, candidate_name: &str) -> bool {
    if !category.describes(query) || !category.describes(candidate_name) {
        return false;
    }
    let query_tokens = name_tokens(query);
    let candidate_tokens = name_tokens(candidate_name);
    query_tokens
        .iter()
        .any(|q| candidate_tokens.iter().any(|c| tokens_overlap(q, c)))
}

/// Business-name words left once category stop words and locations are gone.
fn name_tokens(name: &str) -> Vec<String> {
    strip_locations(&lowercase_words(name))
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !CATEGORY_STOP_WORDS.contains(w))
        .map(str::to_owned)
        .collect()
}

fn tokens_overlap(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let shorter = a.chars().count().min(b.chars().count());
    shorter > SUBSTRING_MIN_LEN && (a.contains(b) || b.contains(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pest_control_variants() {
        assert_eq!(detect_category("pest control Waco TX"), Some(Category::PestControl));
        assert_eq!(detect_category("Termite Pros"), Some(Category::PestControl));
        assert_eq!(detect_category("Joe's Pizza"), None);
    }

    #[test]
    fn shared_name_token_within_category_matches() {
        assert!(category_match(
            Category::PestControl,
            "Ace Pest Control, Waco, TX",
            "Ace Exterminators"
        ));
    }

    #[test]
    fn stop_words_alone_do_not_overlap() {
        assert!(!category_match(
            Category::PestControl,
            "Ace Pest Control Services",
            "Bug Busters Pest Control Services"
        ));
    }

    #[test]
    fn candidate_outside_category_is_rejected() {
        assert!(!category_match(
            Category::PestControl,
            "Ace Pest Control",
            "Ace Hardware"
        ));
    }

    #[test]
    fn long_tokens_overlap_by_substring() {
        assert!(category_match(
            Category::PestControl,
            "Guardian Pest Control",
            "Guardians Termite Service"
        ));
    }
}
