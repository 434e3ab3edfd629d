//! Search engine for curriculum records.
//!
//! Combines exact token overlap, fuzzy similarity, and (in the advanced
//! variant) embedding similarity into one deterministic ranking per search
//! mode: topic, skill, and genre.

pub mod cache;
pub mod expand;
pub mod fuzzy;
pub mod overlap;
pub mod rank;
pub mod semantic;

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::{Result, RhcError};
pub use expand::{
    ExpandedTerms, FileLexicon, KeywordMap, SynonymLexicon, TermExpander, ensure_lexicon,
};
pub use rank::{GenreMatch, RESULT_LIMIT, SCORE_FLOOR, SkillMatch, TopicMatch};
pub use semantic::{Embedder, HashEmbedder, SemanticScorer, cosine_similarity};
#[cfg(feature = "semantic")]
pub use semantic::FastembedEmbedder;

/// Search engine over an immutable dataset.
///
/// Each search call is a pure function of the query and the dataset; no
/// shared state is mutated, so repeated calls with the same input return
/// identical results.
pub struct SearchEngine {
    dataset: Dataset,
    expander: TermExpander,
    semantic: Option<SemanticScorer>,
}

impl SearchEngine {
    /// Simple variant: keyword-map expansion, overlap and fuzzy signals only.
    pub fn simple(dataset: Dataset, keywords: KeywordMap) -> Self {
        debug!(records = dataset.len(), "simple search engine ready");
        Self {
            dataset,
            expander: TermExpander::Keyword(keywords),
            semantic: None,
        }
    }

    /// Advanced variant: synonym-lexicon expansion plus the embedding
    /// signal. The embedder must already be initialized; a missing model is
    /// a startup failure, not a per-query one.
    pub fn advanced(
        dataset: Dataset,
        lexicon: Box<dyn SynonymLexicon>,
        embedder: Box<dyn Embedder>,
    ) -> Self {
        debug!(records = dataset.len(), "advanced search engine ready");
        Self {
            dataset,
            expander: TermExpander::Lexicon(lexicon),
            semantic: Some(SemanticScorer::new(embedder)),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Whether the embedding signal participates in topic ranking.
    pub fn is_advanced(&self) -> bool {
        self.semantic.is_some()
    }

    /// Search units by topic. Display columns: level, unit, part, unit
    /// name, vocabulary words, plus the composite score in the advanced
    /// variant.
    pub fn topic_search(&self, query: &str) -> Result<Vec<TopicMatch>> {
        let query = validate_query(query)?;
        let terms = self.expander.expand_query(query);
        debug!(query, expansions = terms.len(), "topic search");
        rank::rank_topic(&self.dataset, &terms, self.semantic.as_ref())
    }

    /// Search the six skill columns. Display columns: level, unit, part,
    /// unit name, matched skill column, matched skill value.
    pub fn skill_search(&self, query: &str) -> Result<Vec<SkillMatch>> {
        let query = validate_query(query)?;
        debug!(query, "skill search");
        Ok(rank::rank_skills(&self.dataset, query))
    }

    /// Search genre tags. Display columns: level, unit, part, unit name,
    /// genres.
    pub fn genre_search(&self, query: &str) -> Result<Vec<GenreMatch>> {
        let query = validate_query(query)?;
        debug!(query, "genre search");
        Ok(rank::rank_genres(&self.dataset, query))
    }
}

/// The contract is undefined for empty queries: fail fast instead of
/// returning arbitrary results.
fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(RhcError::EmptyQuery);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    fn engine() -> SearchEngine {
        let records = vec![
            Record {
                unit_name: "Powering Up".to_string(),
                vocabulary: Some("energy power electricity".to_string()),
                related_words: Some("fuel heat".to_string()),
                genres: Some("Science Article".to_string()),
                ..Record::default()
            },
            Record {
                unit_name: "Story Time".to_string(),
                vocabulary: Some("character plot setting".to_string()),
                genres: Some("Mystery, Adventure".to_string()),
                reading_skill: Some("Identify Main Idea".to_string()),
                ..Record::default()
            },
        ];
        SearchEngine::simple(Dataset::new(records), KeywordMap::builtin())
    }

    #[test]
    fn empty_query_fails_fast() {
        let engine = engine();
        assert!(matches!(engine.topic_search("   "), Err(RhcError::EmptyQuery)));
        assert!(matches!(engine.skill_search(""), Err(RhcError::EmptyQuery)));
        assert!(matches!(engine.genre_search("\t"), Err(RhcError::EmptyQuery)));
    }

    #[test]
    fn topic_search_ranks_expanded_terms() {
        let matches = engine().topic_search("energy").unwrap();
        assert_eq!(matches[0].unit_name, "Powering Up");
        assert!(matches[0].overlap >= 4);
    }

    #[test]
    fn searches_are_idempotent() {
        let engine = engine();
        assert_eq!(
            engine.topic_search("energy").unwrap(),
            engine.topic_search("energy").unwrap()
        );
        assert_eq!(
            engine.genre_search("mystery").unwrap(),
            engine.genre_search("mystery").unwrap()
        );
    }

    #[test]
    fn advanced_engine_is_idempotent_with_cache() {
        let records = vec![Record {
            unit_name: "Powering Up".to_string(),
            vocabulary: Some("energy power".to_string()),
            ..Record::default()
        }];
        let engine = SearchEngine::advanced(
            Dataset::new(records),
            Box::new(FileLexicon::parse("energy\tpower,heat\n")),
            Box::new(HashEmbedder::new(64)),
        );
        assert!(engine.is_advanced());
        let first = engine.topic_search("energy").unwrap();
        let second = engine.topic_search("energy").unwrap();
        assert_eq!(first, second);
        assert!(first[0].composite.is_some());
    }
}
