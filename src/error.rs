//! @ai:module:intent Error types for the Lighthouse analysis pipeline
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use crate::diagnostics::Diagnostic;
use thiserror::Error;

/// @ai:intent Unified error type for pipeline failures that cannot be recovered locally
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    /// No usable run was found for any framework.
    #[error("No metrics extracted: zero runs loaded for frameworks [{}]", .frameworks.join(", "))]
    EmptyDataset {
        frameworks: Vec<String>,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("Chart rendering failed: {0}")]
    Chart(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
