//! Hashtag extraction from note content.

use regex::Regex;

use crate::error::JotError;

/// `#` followed by an alphanumeric run; the run is the tag name.
const TAG_PATTERN: &str = "#([[:alnum:]]+)";

/// Extracts tag names from note text, in order of appearance.
///
/// Matches are non-overlapping and scanning resumes after each full match,
/// so adjacent tags like `#a#b` both match. Duplicate names are returned
/// once per occurrence; deduplication happens at the store via the unique
/// name constraint. Text with no tags yields an empty vector.
pub fn extract(text: &str) -> Result<Vec<String>, JotError> {
    let re = Regex::new(TAG_PATTERN).map_err(JotError::Pattern)?;
    Ok(re
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tags_in_order_of_appearance() {
        let tags = extract("hello #foo world #bar2!").unwrap();
        assert_eq!(tags, vec!["foo", "bar2"]);
    }

    #[test]
    fn no_tags_yields_empty_vec() {
        let tags = extract("no tags here").unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn adjacent_tags_both_match() {
        let tags = extract("#a#b").unwrap();
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn bare_hash_is_not_a_tag() {
        let tags = extract("just a # sign and #! punctuation").unwrap();
        assert!(tags.is_empty());
    }

    #[test]
    fn duplicate_names_appear_once_per_occurrence() {
        let tags = extract("#foo and #foo again").unwrap();
        assert_eq!(tags, vec!["foo", "foo"]);
    }

    #[test]
    fn name_stops_at_first_non_alphanumeric() {
        let tags = extract("#foo-bar baz").unwrap();
        assert_eq!(tags, vec!["foo"]);
    }

    #[test]
    fn hash_mid_word_still_matches() {
        let tags = extract("x#y").unwrap();
        assert_eq!(tags, vec!["y"]);
    }
}
