//! Tennis Core Library
//!
//! Shared match types, odds handling, and configuration for the Smart Tennis Bet backtester.

pub mod config;
pub mod error;
pub mod types;

pub use error::{Error, Result};
