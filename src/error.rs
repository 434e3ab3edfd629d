use thiserror::Error;

pub type Result<T> = std::result::Result<T, RhcError>;

#[derive(Debug, Error)]
pub enum RhcError {
    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("query must not be empty")]
    EmptyQuery,

    #[error("lexicon error: {0}")]
    Lexicon(String),

    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RhcError {
    /// Stable machine-readable code for robot-mode error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::MissingConfig(_) => "missing_config",
            Self::Dataset(_) => "dataset",
            Self::Csv(_) => "csv",
            Self::EmptyQuery => "empty_query",
            Self::Lexicon(_) => "lexicon",
            Self::Embedding(_) => "embedding",
            Self::Http(_) => "http",
            Self::Json(_) => "json",
            Self::Io(_) => "io",
        }
    }
}
