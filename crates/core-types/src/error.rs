// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Price must be a finite number, got {0}")]
    NonFinitePrice(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
