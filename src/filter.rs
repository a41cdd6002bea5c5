//! Filtering - structured predicates over stored values
//!
//! The store itself knows nothing about filtering; callers scan the
//! snapshot from `get_all()` through a [`Filter`]. The natural-language
//! translator is a best-effort heuristic layer that produces the same
//! structure, so both the explicit query parameters and the free-text
//! endpoint share one predicate.

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Optional criteria; a value matches when every present field matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<String>,
}

impl Filter {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Filter::default()
    }

    /// Apply every present criterion to one value.
    pub fn matches(&self, value: &Value) -> bool {
        let p = &value.properties;
        if let Some(pal) = self.is_palindrome {
            if p.palindrome != pal {
                return false;
            }
        }
        if let Some(min) = self.min_length {
            if p.length < min {
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if p.length > max {
                return false;
            }
        }
        if let Some(wc) = self.word_count {
            if p.word_count != wc {
                return false;
            }
        }
        if let Some(needle) = &self.contains_character {
            if !value.text.contains(needle.as_str()) {
                return false;
            }
        }
        true
    }

    /// Best-effort translation of a free-text phrase into a filter.
    ///
    /// Pure substring heuristics with no correctness guarantee. Returns an
    /// empty filter when nothing fired; the caller decides how to report
    /// that.
    pub fn from_natural_query(query: &str) -> Filter {
        let mut filter = Filter::default();
        let lq = query.to_lowercase();

        if lq.contains("single word") || lq.contains("single-word") {
            filter.word_count = Some(1);
        }
        if lq.contains("palind") {
            filter.is_palindrome = Some(true);
        }
        // "longer than 10" means strictly longer
        if let Some(tail) = lq.split_once("longer than").map(|(_, t)| t) {
            if let Some(n) = first_integer(tail) {
                filter.min_length = Some(n + 1);
            }
        }
        if lq.contains("contain") {
            if lq.contains("first vowel") {
                filter.contains_character = Some("a".to_string());
            } else if let Some(letter) = find_letter(&lq) {
                filter.contains_character = Some(letter.to_string());
            }
        }

        filter
    }
}

fn first_integer(text: &str) -> Option<usize> {
    text.split_whitespace().find_map(|tok| tok.parse().ok())
}

/// First single ascii-letter token, or the token following "letter".
fn find_letter(lq: &str) -> Option<char> {
    let tokens: Vec<&str> = lq.split_whitespace().collect();
    for (i, tok) in tokens.iter().enumerate() {
        if let Some(ch) = single_ascii_letter(tok) {
            return Some(ch);
        }
        if *tok == "letter" {
            if let Some(ch) = tokens.get(i + 1).and_then(|t| single_ascii_letter(t)) {
                return Some(ch);
            }
        }
    }
    None
}

fn single_ascii_letter(tok: &str) -> Option<char> {
    let mut chars = tok.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_lowercase() => Some(ch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = Filter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&analyze("anything")));
        assert!(filter.matches(&analyze("")));
    }

    #[test]
    fn test_palindrome_criterion() {
        let filter = Filter {
            is_palindrome: Some(true),
            ..Default::default()
        };
        assert!(filter.matches(&analyze("racecar")));
        assert!(!filter.matches(&analyze("hello")));
    }

    #[test]
    fn test_length_range() {
        let filter = Filter {
            min_length: Some(3),
            max_length: Some(5),
            ..Default::default()
        };
        assert!(!filter.matches(&analyze("ab")));
        assert!(filter.matches(&analyze("abc")));
        assert!(filter.matches(&analyze("abcde")));
        assert!(!filter.matches(&analyze("abcdef")));
    }

    #[test]
    fn test_word_count_and_contains() {
        let filter = Filter {
            word_count: Some(2),
            contains_character: Some("z".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&analyze("zig zag")));
        assert!(!filter.matches(&analyze("zig")));
        assert!(!filter.matches(&analyze("big bag")));
    }

    #[test]
    fn test_nl_single_word() {
        let filter = Filter::from_natural_query("all single word strings");
        assert_eq!(filter.word_count, Some(1));

        let filter = Filter::from_natural_query("single-word palindromes");
        assert_eq!(filter.word_count, Some(1));
        assert_eq!(filter.is_palindrome, Some(true));
    }

    #[test]
    fn test_nl_longer_than_is_strict() {
        let filter = Filter::from_natural_query("strings longer than 10 characters");
        assert_eq!(filter.min_length, Some(11));
    }

    #[test]
    fn test_nl_longer_than_without_number_is_ignored() {
        let filter = Filter::from_natural_query("longer than most");
        assert_eq!(filter.min_length, None);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_nl_contains_letter() {
        let filter = Filter::from_natural_query("strings containing the letter z");
        assert_eq!(filter.contains_character, Some("z".to_string()));

        let filter = Filter::from_natural_query("must contain x somewhere");
        assert_eq!(filter.contains_character, Some("x".to_string()));
    }

    #[test]
    fn test_nl_first_vowel() {
        let filter = Filter::from_natural_query("strings containing the first vowel");
        assert_eq!(filter.contains_character, Some("a".to_string()));
    }

    #[test]
    fn test_nl_unparsable_is_empty() {
        assert!(Filter::from_natural_query("show me everything").is_empty());
        assert!(Filter::from_natural_query("").is_empty());
    }

    #[test]
    fn test_nl_filter_applies_to_values() {
        let filter = Filter::from_natural_query("single word palindromic strings");
        assert!(filter.matches(&analyze("racecar")));
        assert!(!filter.matches(&analyze("race car")));
        assert!(!filter.matches(&analyze("hello")));
    }
}
