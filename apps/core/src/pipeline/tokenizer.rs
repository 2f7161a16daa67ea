//! Sentence tokenizer and keyword matcher.
//!
//! The shared text utilities every pipeline stage builds on: splitting free
//! text into ordered sentences and testing sentences against keyword sets.

/// Splits text into trimmed, non-empty sentences.
///
/// Boundaries are `.`, `!` and `?`; consecutive delimiters collapse into a
/// single boundary. Sentence order is preserved from the source text.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tests whether the lowercased haystack contains any of the given keywords.
pub fn contains_any(haystack_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack_lower.contains(k))
}

/// Returns the sentences whose lowercased form contains any of the keywords,
/// in original order.
pub fn matching_sentences(sentences: &[String], keywords: &[&str]) -> Vec<String> {
    sentences
        .iter()
        .filter(|s| contains_any(&s.to_lowercase(), keywords))
        .cloned()
        .collect()
}

/// Returns the first sentence containing any of the keywords.
pub fn find_sentence<'a>(sentences: &'a [String], keywords: &[&str]) -> Option<&'a String> {
    sentences
        .iter()
        .find(|s| contains_any(&s.to_lowercase(), keywords))
}

/// Splits text into lowercase words, dropping punctuation-only fragments.
pub fn split_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_basic() {
        let sentences = split_sentences("First. Second! Third?");
        assert_eq!(sentences, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_split_sentences_collapses_consecutive_delimiters() {
        let sentences = split_sentences("Wait... really?! Yes.");
        assert_eq!(sentences, vec!["Wait", "really", "Yes"]);
    }

    #[test]
    fn test_split_sentences_preserves_order() {
        let sentences = split_sentences("b comes second. a comes first? no, b did.");
        assert_eq!(sentences[0], "b comes second");
        assert_eq!(sentences[1], "a comes first");
    }

    #[test]
    fn test_split_sentences_empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("...!!!???").is_empty());
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("the food was great", &["food", "service"]));
        assert!(!contains_any("the weather was fine", &["food", "service"]));
    }

    #[test]
    fn test_matching_sentences_is_case_insensitive() {
        let sentences = vec!["The FOOD was great".to_string(), "No match".to_string()];
        let matched = matching_sentences(&sentences, &["food"]);
        assert_eq!(matched, vec!["The FOOD was great"]);
    }

    #[test]
    fn test_find_sentence_returns_first_match() {
        let sentences = vec![
            "nothing here".to_string(),
            "great food".to_string(),
            "more food".to_string(),
        ];
        assert_eq!(find_sentence(&sentences, &["food"]).unwrap(), "great food");
    }

    #[test]
    fn test_split_words() {
        let words = split_words("It's great, really great!");
        assert_eq!(words, vec!["it's", "great", "really", "great"]);
    }
}
