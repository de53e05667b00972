//! Data provider error types.

/// Errors that can occur while reading network data.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Reading a dataset file failed
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A dataset file is not valid JSON for the data model
    #[error("failed to parse dataset {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backing store could not answer
    #[error("data source unavailable: {0}")]
    Unavailable(String),
}
