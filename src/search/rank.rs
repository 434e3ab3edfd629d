//! Multi-signal scoring and top-k ranking.
//!
//! One ranking function per search mode. All sorts are stable over the
//! deterministic generation order (row order; skill fields in declared
//! column order), so identical inputs always produce identical results.

use std::cmp::Ordering;

use serde::Serialize;

use crate::dataset::{Dataset, SkillField};
use crate::error::Result;
use crate::search::expand::ExpandedTerms;
use crate::search::semantic::SemanticScorer;
use crate::search::{fuzzy, overlap};

/// Fixed result-set cap for every search mode.
pub const RESULT_LIMIT: usize = 5;

/// Qualifying floor for skill and genre matches. Strict: a score of
/// exactly 60 is excluded.
pub const SCORE_FLOOR: f64 = 60.0;

/// Amplifies the small-integer overlap signal in the advanced composite.
pub const OVERLAP_WEIGHT: f64 = 2.0;

/// Rescales cosine similarity from [-1, 1] to the [0, 100] fuzzy range.
pub const SEMANTIC_WEIGHT: f64 = 100.0;

/// Topic search result: unit projection plus the per-signal scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicMatch {
    pub level: String,
    pub unit: String,
    pub part: String,
    pub unit_name: String,
    pub vocabulary: String,
    pub overlap: usize,
    pub fuzzy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite: Option<f64>,
}

/// Skill search result: one entry per qualifying (record, field) pair. A
/// record with several qualifying skill columns appears once per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMatch {
    pub level: String,
    pub unit: String,
    pub part: String,
    pub unit_name: String,
    pub field: SkillField,
    pub value: String,
    pub score: f64,
}

/// Genre search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreMatch {
    pub level: String,
    pub unit: String,
    pub part: String,
    pub unit_name: String,
    pub genres: String,
    pub score: f64,
}

/// Rank records against an expanded topic query.
///
/// Simple variant (`semantic` is `None`): stable sort by overlap count
/// descending, then fuzzy score descending. Advanced variant: composite =
/// 2 * overlap + fuzzy + 100 * embedding cosine, sorted descending.
pub fn rank_topic(
    dataset: &Dataset,
    terms: &ExpandedTerms,
    semantic: Option<&SemanticScorer>,
) -> Result<Vec<TopicMatch>> {
    let query_vector = match semantic {
        Some(scorer) => Some(scorer.embed_query(&terms.joined())?),
        None => None,
    };

    let mut matches = Vec::with_capacity(dataset.len());
    for (row, record) in dataset.records().iter().enumerate() {
        let text = record.combined_text();
        let overlap = overlap::overlap_count(terms.iter(), &text);
        let fuzzy_score = fuzzy::best_token_set_ratio(terms.iter(), &text);

        let (semantic_score, composite) = match (semantic, &query_vector) {
            (Some(scorer), Some(query)) => {
                let similarity = f64::from(scorer.record_similarity(row, query, &text)?);
                let composite = OVERLAP_WEIGHT * overlap as f64
                    + fuzzy_score
                    + SEMANTIC_WEIGHT * similarity;
                (Some(similarity), Some(composite))
            }
            _ => (None, None),
        };

        matches.push(TopicMatch {
            level: record.level.clone(),
            unit: record.unit.clone(),
            part: record.part.clone(),
            unit_name: record.unit_name.clone(),
            vocabulary: record.vocabulary.clone().unwrap_or_default(),
            overlap,
            fuzzy: fuzzy_score,
            semantic: semantic_score,
            composite,
        });
    }

    if semantic.is_some() {
        matches.sort_by(|a, b| {
            cmp_f64_desc(a.composite.unwrap_or(f64::MIN), b.composite.unwrap_or(f64::MIN))
        });
    } else {
        matches.sort_by(|a, b| {
            b.overlap
                .cmp(&a.overlap)
                .then_with(|| cmp_f64_desc(a.fuzzy, b.fuzzy))
        });
    }
    matches.truncate(RESULT_LIMIT);
    Ok(matches)
}

/// Rank skill-column values against the query.
///
/// For each of the six skill fields, every record with a non-missing value
/// is scored with token-set similarity; tuples scoring above the floor are
/// flattened across fields and sorted descending.
pub fn rank_skills(dataset: &Dataset, query: &str) -> Vec<SkillMatch> {
    let mut matches = Vec::new();
    for field in SkillField::ALL {
        for record in dataset.records() {
            let Some(value) = record.skill(field) else {
                continue;
            };
            let score = fuzzy::token_set_ratio(query, value);
            if score > SCORE_FLOOR {
                matches.push(SkillMatch {
                    level: record.level.clone(),
                    unit: record.unit.clone(),
                    part: record.part.clone(),
                    unit_name: record.unit_name.clone(),
                    field,
                    value: value.to_string(),
                    score,
                });
            }
        }
    }

    matches.sort_by(|a, b| cmp_f64_desc(a.score, b.score));
    matches.truncate(RESULT_LIMIT);
    matches
}

/// Rank genre fields against the query with partial-ratio similarity.
pub fn rank_genres(dataset: &Dataset, query: &str) -> Vec<GenreMatch> {
    let mut matches = Vec::new();
    for record in dataset.records() {
        let genres = record.genre_text();
        let score = fuzzy::partial_ratio(query, genres);
        if score > SCORE_FLOOR {
            matches.push(GenreMatch {
                level: record.level.clone(),
                unit: record.unit.clone(),
                part: record.part.clone(),
                unit_name: record.unit_name.clone(),
                genres: genres.to_string(),
                score,
            });
        }
    }

    matches.sort_by(|a, b| cmp_f64_desc(a.score, b.score));
    matches.truncate(RESULT_LIMIT);
    matches
}

/// Descending order for f64 scores. Incomparable values keep their
/// generation order under the stable sort.
fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
