// In crates/api-client/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the API client: {0}")]
    ClientBuildError(String),
    #[error("Invalid forex pair '{0}', expected BASE/QUOTE")]
    InvalidPair(String),
    #[error("Invalid coin id '{0}'")]
    InvalidCoinId(String),
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("Provider responded with HTTP status {0}")]
    HttpStatus(u16),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(#[from] serde_json::Error),
    #[error("Response has no '{key}' section: {detail}")]
    MissingSeries { key: &'static str, detail: String },
    #[error("Provider returned an empty price series")]
    EmptyPayload,
    #[error(transparent)]
    InvalidPrice(#[from] core_types::Error),
    #[error("Invalid value '{value}' in field '{field}'")]
    InvalidValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
