//! Fuzzy string similarity.
//!
//! Token-set ratio for tokenizable prose (topic and skill fields) and
//! partial ratio for short free-text tags (genres). Both are scaled to
//! [0, 100] over a normalized Levenshtein base ratio and are
//! case-insensitive. Empty or missing input scores 0, never an error.

use std::collections::HashSet;

use itertools::Itertools;

/// Base similarity between two raw strings, in [0, 100].
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Order-insensitive token-set similarity, in [0, 100].
///
/// Compares the sorted intersection of the two token sets against each
/// side's remainder, so a query whose tokens are a subset of the field's
/// tokens scores 100 regardless of extra tokens or ordering.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let tokens_a: HashSet<&str> = a.split_whitespace().collect();
    let tokens_b: HashSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let sect = tokens_a.intersection(&tokens_b).sorted().join(" ");
    let diff_ab = tokens_a.difference(&tokens_b).sorted().join(" ");
    let diff_ba = tokens_b.difference(&tokens_a).sorted().join(" ");

    // One side fully contained in the other.
    if !sect.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let combined_a = join_nonempty(&sect, &diff_ab);
    let combined_b = join_nonempty(&sect, &diff_ba);

    ratio(&sect, &combined_a)
        .max(ratio(&sect, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Best similarity across a set of expanded terms. The strongest synonym
/// wins; weak matches on the rest never dilute it.
pub fn best_token_set_ratio<'a>(terms: impl IntoIterator<Item = &'a str>, text: &str) -> f64 {
    terms
        .into_iter()
        .map(|term| token_set_ratio(term, text))
        .fold(0.0, f64::max)
}

/// Best-aligning substring similarity, in [0, 100].
///
/// Slides the shorter string over same-length character windows of the
/// longer and keeps the best window ratio.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a.as_str(), b.as_str())
    } else {
        (b.as_str(), a.as_str())
    };

    let window = shorter.chars().count();
    let longer_chars: Vec<char> = longer.chars().collect();
    if window == longer_chars.len() {
        return ratio(shorter, longer);
    }

    let mut best: f64 = 0.0;
    for start in 0..=(longer_chars.len() - window) {
        let slice: String = longer_chars[start..start + window].iter().collect();
        best = best.max(ratio(shorter, &slice));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn join_nonempty(head: &str, tail: &str) -> String {
    if head.is_empty() {
        tail.to_string()
    } else if tail.is_empty() {
        head.to_string()
    } else {
        format!("{head} {tail}")
    }
}
