//! Query term expansion.
//!
//! Two strategies: a curated topic keyword map (simple variant) and a
//! synonym lexicon (advanced variant). Either way the original term is
//! always part of the expansion and unknown terms expand to themselves.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, RhcError};

/// Deduplicated expansion of one or more query terms.
///
/// Terms are lowercased and kept in insertion order (original terms first),
/// so downstream scoring and the joined embedding input are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedTerms {
    terms: Vec<String>,
}

impl ExpandedTerms {
    pub fn push(&mut self, term: &str) {
        let term = term.trim().to_lowercase();
        if !term.is_empty() && !self.terms.iter().any(|t| t == &term) {
            self.terms.push(term);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// All terms joined into one string, for embedding input.
    pub fn joined(&self) -> String {
        self.terms.join(" ")
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Curated topic-to-related-words map, supplied at construction time so it
/// can be tested and extended independently of the scorer.
#[derive(Debug, Clone, Default)]
pub struct KeywordMap {
    map: HashMap<String, Vec<String>>,
}

impl KeywordMap {
    pub fn new(map: HashMap<String, Vec<String>>) -> Self {
        let map = map
            .into_iter()
            .map(|(topic, words)| (topic.trim().to_lowercase(), words))
            .collect();
        Self { map }
    }

    /// The built-in topic expansions.
    pub fn builtin() -> Self {
        Self::new(builtin_topics())
    }

    /// Expand one term. The term itself always comes first; unknown terms
    /// expand to the singleton set.
    pub fn expand(&self, term: &str) -> ExpandedTerms {
        let mut expanded = ExpandedTerms::default();
        expanded.push(term);
        if let Some(words) = self.map.get(&term.trim().to_lowercase()) {
            for word in words {
                expanded.push(word);
            }
        }
        expanded
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// The keyword expansions shipped with the tool.
pub fn builtin_topics() -> HashMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 3] = [
        (
            "energy",
            &["energy", "power", "electricity", "force", "motion", "fuel", "heat"],
        ),
        (
            "weather",
            &["weather", "climate", "storm", "rain", "temperature", "wind"],
        ),
        (
            "community",
            &["community", "neighborhood", "citizen", "volunteer", "help"],
        ),
    ];
    entries
        .into_iter()
        .map(|(topic, words)| {
            (
                topic.to_string(),
                words.iter().map(ToString::to_string).collect(),
            )
        })
        .collect()
}

/// Synonym lemmas for a term across all its senses.
pub trait SynonymLexicon: Send + Sync {
    fn synonyms(&self, term: &str) -> Vec<String>;
}

/// File-backed synonym lexicon.
///
/// One lemma per line: `lemma<TAB>synonym,synonym,...`. Blank lines and
/// `#` comments are skipped. Multi-word lemmas use `_` separators in the
/// file and are normalized to spaces on load.
#[derive(Debug, Default)]
pub struct FileLexicon {
    entries: HashMap<String, Vec<String>>,
}

impl FileLexicon {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            RhcError::Lexicon(format!("read lexicon {}: {err}", path.display()))
        })?;
        let lexicon = Self::parse(&raw);
        debug!(
            path = %path.display(),
            lemmas = lexicon.entries.len(),
            "loaded synonym lexicon"
        );
        Ok(lexicon)
    }

    pub fn parse(raw: &str) -> Self {
        let mut entries: HashMap<String, Vec<String>> = HashMap::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lemma, synonyms)) = line.split_once('\t') else {
                continue;
            };
            let lemma = normalize_lemma(lemma);
            if lemma.is_empty() {
                continue;
            }
            let bucket = entries.entry(lemma).or_default();
            for synonym in synonyms.split(',') {
                let synonym = normalize_lemma(synonym);
                if !synonym.is_empty() && !bucket.contains(&synonym) {
                    bucket.push(synonym);
                }
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SynonymLexicon for FileLexicon {
    fn synonyms(&self, term: &str) -> Vec<String> {
        self.entries
            .get(&normalize_lemma(term))
            .cloned()
            .unwrap_or_default()
    }
}

/// Lowercase and replace `_` word separators with spaces.
fn normalize_lemma(lemma: &str) -> String {
    lemma.trim().to_lowercase().replace('_', " ")
}

/// Fetch the lexicon file once if it is not already present. Idempotent and
/// safe to call at every startup.
pub fn ensure_lexicon(path: impl AsRef<Path>, url: &str) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        debug!(path = %path.display(), "lexicon already present, skipping fetch");
        return Ok(());
    }

    info!(url, path = %path.display(), "fetching synonym lexicon");
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    // Write through a temp file so an interrupted fetch never leaves a
    // partial lexicon behind.
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, body)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Term expander used by the engine.
pub enum TermExpander {
    /// Simple variant: curated keyword map, whole query as one term.
    Keyword(KeywordMap),
    /// Advanced variant: synonym lexicon, comma-separated terms expanded
    /// independently and unioned.
    Lexicon(Box<dyn SynonymLexicon>),
}

impl TermExpander {
    /// Expand one term.
    pub fn expand_term(&self, term: &str) -> ExpandedTerms {
        match self {
            Self::Keyword(map) => map.expand(term),
            Self::Lexicon(lexicon) => {
                let mut expanded = ExpandedTerms::default();
                expanded.push(term);
                for synonym in lexicon.synonyms(term) {
                    expanded.push(&synonym);
                }
                expanded
            }
        }
    }

    /// Expand a full query. The simple variant treats the query as a single
    /// term; the advanced variant splits on commas and unions the per-term
    /// expansions into one flat set.
    pub fn expand_query(&self, query: &str) -> ExpandedTerms {
        match self {
            Self::Keyword(_) => self.expand_term(query),
            Self::Lexicon(_) => {
                let mut expanded = ExpandedTerms::default();
                for term in query.split(',') {
                    for expansion in self.expand_term(term).iter() {
                        expanded.push(expansion);
                    }
                }
                expanded
            }
        }
    }
}
