use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeqForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Malformed Input: {0}")]
    MalformedInput(String),

    #[error("Percentile range ({lo}, {hi}) is invalid; expected 0 <= lo <= hi <= 1")]
    Range { lo: f64, hi: f64 },

    #[error("Cannot sample {requested} rows; only {available} available")]
    SampleSize { requested: usize, available: usize },

    #[error("{strategy} requested {requested} mutants but only {available} candidates exist")]
    InsufficientCandidates {
        strategy: String,
        requested: usize,
        available: usize,
    },

    #[error("Table has no gap annotation; run gap annotation first")]
    NotAnnotated,

    #[error("Table is empty")]
    EmptyTable,

    #[error("Mutant batch is empty")]
    EmptyBatch,

    #[error("Dataset '{name}' not found at {path}")]
    UnknownDataset { name: String, path: String },
}

pub type SfResult<T> = Result<T, SeqForgeError>;
