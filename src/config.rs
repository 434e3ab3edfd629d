//! Configuration loading.
//!
//! Defaults merged with an optional global config, an optional project
//! config, and environment overrides, in that order. The topic keyword map
//! lives here so expansions can be extended without touching the scorer;
//! ranking weights and thresholds are fixed constants, not configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RhcError};
use crate::search::expand::builtin_topics;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Topic name to curated related-words list.
    #[serde(default = "builtin_topics")]
    pub topics: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub lexicon: LexiconConfig,
    #[serde(default)]
    pub semantic: SemanticConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            topics: builtin_topics(),
            lexicon: LexiconConfig::default(),
            semantic: SemanticConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to the curriculum CSV.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Path to the synonym lexicon file. Defaults to `<root>/lexicon.tsv`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// URL to fetch the lexicon from when the file is missing.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticConfig {
    /// Embedding model name. `"hash"` selects the deterministic hash
    /// embedder; anything else needs the `semantic` feature.
    #[serde(default = "default_model")]
    pub model: String,
    /// Model download cache directory.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            cache_dir: None,
        }
    }
}

fn default_model() -> String {
    "all-minilm-l6-v2".to_string()
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("RHC_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&config_dir.join("rhc/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join("config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| RhcError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| RhcError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.dataset {
            if let Some(path) = patch.path {
                self.dataset.path = Some(path);
            }
        }
        if let Some(topics) = patch.topics {
            // Per-topic override: unlisted topics keep their defaults.
            self.topics.extend(topics);
        }
        if let Some(patch) = patch.lexicon {
            if let Some(path) = patch.path {
                self.lexicon.path = Some(path);
            }
            if let Some(url) = patch.url {
                self.lexicon.url = Some(url);
            }
        }
        if let Some(patch) = patch.semantic {
            if let Some(model) = patch.model {
                self.semantic.model = model;
            }
            if let Some(cache_dir) = patch.cache_dir {
                self.semantic.cache_dir = Some(cache_dir);
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("RHC_DATASET") {
            self.dataset.path = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("RHC_LEXICON_PATH") {
            self.lexicon.path = Some(PathBuf::from(path));
        }
        if let Ok(url) = std::env::var("RHC_LEXICON_URL") {
            self.lexicon.url = Some(url);
        }
        if let Ok(model) = std::env::var("RHC_SEMANTIC_MODEL") {
            self.semantic.model = model;
        }
    }
}

/// Partial config as read from a TOML file; merged over the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    dataset: Option<DatasetPatch>,
    topics: Option<HashMap<String, Vec<String>>>,
    lexicon: Option<LexiconPatch>,
    semantic: Option<SemanticPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatasetPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LexiconPatch {
    path: Option<PathBuf>,
    url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SemanticPatch {
    model: Option<String>,
    cache_dir: Option<PathBuf>,
}
