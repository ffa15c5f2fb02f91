// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid strategy settings: {0}")]
    StrategyError(#[from] strategies::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
