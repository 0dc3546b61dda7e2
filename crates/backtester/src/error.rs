//! Error types for the backtester.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error(transparent)]
    Core(#[from] tennis_core::Error),
}

pub type Result<T> = std::result::Result<T, BacktestError>;
