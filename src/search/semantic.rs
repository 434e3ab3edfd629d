//! Embedding-based semantic similarity.
//!
//! The engine talks to embedders through the [`Embedder`] trait. The
//! deterministic FNV-1a [`HashEmbedder`] is always available and needs no
//! model download; [`FastembedEmbedder`] wraps a pretrained sentence
//! embedding model and is gated behind the `semantic` cargo feature.

use crate::error::Result;
use crate::search::cache::{CacheStats, EmbeddingCache};

/// Text to fixed-dimension vector.
pub trait Embedder: Send + Sync {
    /// Embedding dimension.
    fn dims(&self) -> usize;

    /// Embed text into a vector of `dims()` length.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hash embedder using FNV-1a over whitespace tokens.
///
/// Fully deterministic, no model dependencies. Token hashes pick a bucket
/// and a sign; the accumulated vector is L2-normalized so cosine scores
/// stay comparable across text lengths.
pub struct HashEmbedder {
    dim: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self { dim: 384 }
    }
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }
}

impl Embedder for HashEmbedder {
    fn dims(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dim];
        for token in text.to_lowercase().split_whitespace() {
            let hash = fnv1a(token.as_bytes());
            let bucket = (hash % self.dim as u64) as usize;
            let sign = if hash & (1 << 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        Ok(vector)
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Cosine similarity between two embeddings, in [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Semantic signal for the advanced variant: an embedder plus a per-record
/// vector cache. Query embeddings are computed fresh on every call.
pub struct SemanticScorer {
    embedder: Box<dyn Embedder>,
    cache: EmbeddingCache,
}

impl SemanticScorer {
    pub fn new(embedder: Box<dyn Embedder>) -> Self {
        Self {
            embedder,
            cache: EmbeddingCache::default(),
        }
    }

    pub fn with_cache_capacity(embedder: Box<dyn Embedder>, capacity: usize) -> Self {
        Self {
            embedder,
            cache: EmbeddingCache::new(capacity),
        }
    }

    pub fn dims(&self) -> usize {
        self.embedder.dims()
    }

    /// Embed the joined expanded-term string.
    pub fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embedder.embed(text)
    }

    /// Cosine similarity between the query vector and a record's text,
    /// reusing the cached record vector when its content is unchanged.
    pub fn record_similarity(&self, row: usize, query: &[f32], text: &str) -> Result<f32> {
        let content_hash = EmbeddingCache::content_hash(text);
        let embedding = match self.cache.get(row, &content_hash) {
            Some(cached) => cached,
            None => {
                let embedding = self.embedder.embed(text)?;
                self.cache.insert(row, content_hash, embedding.clone());
                embedding
            }
        };
        Ok(cosine_similarity(query, &embedding))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(feature = "semantic")]
pub use self::fastembed_embedder::FastembedEmbedder;

#[cfg(feature = "semantic")]
mod fastembed_embedder {
    use std::path::Path;

    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

    use super::Embedder;
    use crate::error::{Result, RhcError};

    /// Pretrained sentence-embedding model via fastembed (ONNX Runtime).
    /// Loaded once per process; initialization failure is fatal at startup,
    /// never a per-query error.
    pub struct FastembedEmbedder {
        model: TextEmbedding,
        dim: usize,
    }

    impl FastembedEmbedder {
        pub fn new(model_name: &str, cache_dir: Option<&Path>) -> Result<Self> {
            let (model, dim) = parse_model_name(model_name)?;

            let mut options = InitOptions::new(model).with_show_download_progress(false);
            if let Some(dir) = cache_dir {
                options = options.with_cache_dir(dir.to_path_buf());
            }

            let model = TextEmbedding::try_new(options).map_err(|err| {
                RhcError::Embedding(format!("initialize model '{model_name}': {err}"))
            })?;

            Ok(Self { model, dim })
        }
    }

    impl Embedder for FastembedEmbedder {
        fn dims(&self) -> usize {
            self.dim
        }

        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let mut vectors = self
                .model
                .embed(vec![text.to_string()], None)
                .map_err(|err| RhcError::Embedding(format!("embed text: {err}")))?;
            vectors
                .pop()
                .ok_or_else(|| RhcError::Embedding("model returned no vector".to_string()))
        }
    }

    fn parse_model_name(name: &str) -> Result<(EmbeddingModel, usize)> {
        let normalized = name.to_lowercase().replace(['-', '_'], "");
        match normalized.as_str() {
            "allminilml6v2" | "minilm" => Ok((EmbeddingModel::AllMiniLML6V2, 384)),
            "bgesmallenv1.5" | "bgesmall" => Ok((EmbeddingModel::BGESmallENV15, 384)),
            "nomicembedtextv1.5" | "nomicembedtext" => {
                Ok((EmbeddingModel::NomicEmbedTextV15, 768))
            }
            _ => Err(RhcError::Embedding(format!(
                "unknown embedding model '{name}'; supported: all-minilm-l6-v2, \
                 bge-small-en-v1.5, nomic-embed-text-v1.5"
            ))),
        }
    }
}
