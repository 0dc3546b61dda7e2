//! Error types for the Smart Tennis Bet system.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid match record: {0}")]
    InvalidMatch(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config {
            message: "BACKTEST_STAKE must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: BACKTEST_STAKE must be positive"
        );

        let err = Error::InvalidMatch("missing loser".to_string());
        assert!(err.to_string().contains("missing loser"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
