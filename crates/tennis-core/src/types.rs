//! Core domain types for the Smart Tennis Bet system.

pub mod bookmaker;
pub mod match_record;

pub use bookmaker::*;
pub use match_record::*;
