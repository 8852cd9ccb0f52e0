use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Cannot read dataset {path}: {source}")]
    DatasetRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
