use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, SemanticConfig};
use crate::dataset::Dataset;
use crate::error::{Result, RhcError};
use crate::search::semantic::{Embedder, HashEmbedder};
use crate::search::{FileLexicon, KeywordMap, SearchEngine, ensure_lexicon};

pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub engine: SearchEngine,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config = Config::load(cli.config.as_deref(), &root)?;

        let csv_path = cli
            .csv
            .clone()
            .or_else(|| config.dataset.path.clone())
            .ok_or_else(|| {
                RhcError::MissingConfig(
                    "dataset CSV path: pass --csv or set [dataset] path".to_string(),
                )
            })?;
        let dataset = Dataset::from_csv_path(&csv_path)?;

        let engine = if cli.semantic {
            Self::advanced_engine(&config, &root, dataset)?
        } else {
            SearchEngine::simple(dataset, KeywordMap::new(config.topics.clone()))
        };

        Ok(Self {
            root,
            config,
            engine,
            output_format: cli.output_format(),
            verbosity: cli.verbose,
        })
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("RHC_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| RhcError::MissingConfig("data directory not found".to_string()))?;
        Ok(data_dir.join("rhc"))
    }

    /// Build the advanced engine. The lexicon is fetched once if missing;
    /// a model or lexicon that cannot be initialized fails here, before any
    /// search call is possible.
    fn advanced_engine(config: &Config, root: &Path, dataset: Dataset) -> Result<SearchEngine> {
        let lexicon_path = config
            .lexicon
            .path
            .clone()
            .unwrap_or_else(|| root.join("lexicon.tsv"));
        if let Some(url) = &config.lexicon.url {
            ensure_lexicon(&lexicon_path, url)?;
        }
        let lexicon = FileLexicon::load(&lexicon_path)?;

        let embedder = build_embedder(&config.semantic)?;
        info!(
            model = %config.semantic.model,
            lemmas = lexicon.len(),
            "advanced search initialized"
        );

        Ok(SearchEngine::advanced(
            dataset,
            Box::new(lexicon),
            embedder,
        ))
    }
}

fn build_embedder(config: &SemanticConfig) -> Result<Box<dyn Embedder>> {
    if config.model.eq_ignore_ascii_case("hash") {
        return Ok(Box::new(HashEmbedder::default()));
    }

    #[cfg(feature = "semantic")]
    {
        let embedder = crate::search::FastembedEmbedder::new(
            &config.model,
            config.cache_dir.as_deref(),
        )?;
        Ok(Box::new(embedder))
    }

    #[cfg(not(feature = "semantic"))]
    {
        Err(RhcError::Embedding(format!(
            "model '{}' requires the 'semantic' feature; set [semantic] model = \"hash\" \
             or rebuild with --features semantic",
            config.model
        )))
    }
}
