//! Whole-token lexical overlap.

use std::collections::HashSet;

/// Count the distinct expanded terms that appear as whole lowercased tokens
/// of the whitespace-tokenized candidate text. Substring hits that are not
/// whole tokens do not count; empty text yields 0.
pub fn overlap_count<'a>(terms: impl IntoIterator<Item = &'a str>, text: &str) -> usize {
    let lowered = text.to_lowercase();
    let tokens: HashSet<&str> = lowered.split_whitespace().collect();
    if tokens.is_empty() {
        return 0;
    }
    terms
        .into_iter()
        .filter(|term| {
            let term = term.to_lowercase();
            tokens.contains(term.as_str())
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_distinct_whole_token_matches() {
        let terms = ["energy", "power"];
        let count = overlap_count(terms.iter().copied(), "solar power and heat energy");
        assert_eq!(count, 2);
    }

    #[test]
    fn substrings_do_not_count() {
        let terms = ["energy"];
        assert_eq!(overlap_count(terms.iter().copied(), "renewable energies"), 0);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let terms = ["Energy"];
        assert_eq!(overlap_count(terms.iter().copied(), "ENERGY sources"), 1);
    }

    #[test]
    fn empty_text_yields_zero() {
        let terms = ["energy"];
        assert_eq!(overlap_count(terms.iter().copied(), ""), 0);
        assert_eq!(overlap_count(terms.iter().copied(), "   "), 0);
    }

    #[test]
    fn repeated_tokens_count_once_per_term() {
        let terms = ["heat"];
        assert_eq!(overlap_count(terms.iter().copied(), "heat heat heat"), 1);
    }
}
