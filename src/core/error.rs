//! Error types for the muse library.

use thiserror::Error;

/// Result type alias using muse's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading data or serving recommendations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading the dataset or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset source is not parseable as tabular data.
    #[error("Data format error: {message}")]
    DataFormat { message: String },

    /// Vector space build produced zero usable documents.
    #[error("Empty corpus: no document contained any indexable text")]
    EmptyCorpus,

    /// Record id not present in the corpus.
    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote generation API error.
    #[error("Generation API error: {0}")]
    Api(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::DataFormat {
            message: err.to_string(),
        }
    }
}

impl Error {
    /// Create a new data format error.
    pub fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat {
            message: message.into(),
        }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new generation API error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Create a record-not-found error.
    pub fn record_not_found(id: impl Into<String>) -> Self {
        Self::RecordNotFound { id: id.into() }
    }
}
