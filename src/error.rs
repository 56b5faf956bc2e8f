use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("interaction table has no `{0}` column")]
    MissingColumn(String),

    #[error("cannot compute properties of a graph with no drugs")]
    EmptyGraph,

    #[error("at least two drugs are required for interaction analysis, got {selected}")]
    SelectionTooSmall { selected: usize },

    #[error("graph rendering failed: {0}")]
    Render(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

impl NetworkError {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        NetworkError::Io {
            source,
            path: path.into(),
        }
    }
}
