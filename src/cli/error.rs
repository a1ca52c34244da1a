//! CLI error types and conversions

use crate::client::SearchError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Search client error
    #[error("search error: {0}")]
    SearchError(#[from] SearchError),

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output serialization error
    #[error("output error: {0}")]
    OutputError(String),
}
