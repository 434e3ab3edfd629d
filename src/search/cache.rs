//! LRU caching for record embeddings.
//!
//! Query embeddings are recomputed on every search call; record text is
//! stable for the life of the dataset, so per-record vectors are cached
//! keyed by row position and content hash. A content-hash mismatch (the
//! caller swapped datasets) invalidates the entry.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use sha2::{Digest, Sha256};

/// Default cache size for record embeddings (number of records).
pub const DEFAULT_EMBEDDING_CACHE_SIZE: usize = 1024;

/// Embedding cache entry.
#[derive(Debug, Clone)]
struct CachedEmbedding {
    embedding: Vec<f32>,
    content_hash: String,
}

/// Cache statistics for monitoring and tuning.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe LRU cache of record embeddings.
///
/// A poisoned lock degrades to a cache miss; lookups never take down a
/// search.
pub struct EmbeddingCache {
    entries: Mutex<LruCache<usize, CachedEmbedding>>,
    stats: Mutex<CacheStats>,
}

impl Default for EmbeddingCache {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_CACHE_SIZE)
    }
}

impl EmbeddingCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            stats: Mutex::new(CacheStats::default()),
        }
    }

    /// Hash of the text an embedding was computed from.
    pub fn content_hash(text: &str) -> String {
        hex::encode(Sha256::digest(text.as_bytes()))
    }

    /// Look up the embedding for a row, honoring the content hash.
    pub fn get(&self, row: usize, content_hash: &str) -> Option<Vec<f32>> {
        let Ok(mut entries) = self.entries.lock() else {
            return None;
        };
        let hit = entries
            .get(&row)
            .filter(|entry| entry.content_hash == content_hash)
            .map(|entry| entry.embedding.clone());
        drop(entries);

        if let Ok(mut stats) = self.stats.lock() {
            if hit.is_some() {
                stats.hits += 1;
            } else {
                stats.misses += 1;
            }
        }
        hit
    }

    /// Store the embedding for a row.
    pub fn insert(&self, row: usize, content_hash: String, embedding: Vec<f32>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.put(
                row,
                CachedEmbedding {
                    embedding,
                    content_hash,
                },
            );
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_then_hit() {
        let cache = EmbeddingCache::new(8);
        let hash = EmbeddingCache::content_hash("solar power");

        assert!(cache.get(0, &hash).is_none());
        cache.insert(0, hash.clone(), vec![1.0, 0.0]);
        assert_eq!(cache.get(0, &hash), Some(vec![1.0, 0.0]));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stale_content_hash_is_a_miss() {
        let cache = EmbeddingCache::new(8);
        cache.insert(3, EmbeddingCache::content_hash("old text"), vec![0.5]);
        let fresh = EmbeddingCache::content_hash("new text");
        assert!(cache.get(3, &fresh).is_none());
    }

    #[test]
    fn capacity_evicts_least_recent() {
        let cache = EmbeddingCache::new(2);
        let hash = EmbeddingCache::content_hash("t");
        cache.insert(0, hash.clone(), vec![0.0]);
        cache.insert(1, hash.clone(), vec![1.0]);
        cache.insert(2, hash.clone(), vec![2.0]);
        assert!(cache.get(0, &hash).is_none());
        assert!(cache.get(2, &hash).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn empty_stats_rate_is_zero() {
        let cache = EmbeddingCache::new(1);
        assert!(cache.is_empty());
        assert!((cache.stats().hit_rate() - 0.0).abs() < f64::EPSILON);
    }
}
