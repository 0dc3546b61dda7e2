//! Smart Tennis Bet: betting-strategy backtester for tennis match odds
//!
//! This is the root crate that provides benchmark and integration-test access
//! to the workspace. For actual functionality, use the individual crates directly:
//!
//! - `tennis-core`: Match records, bookmaker odds, configuration
//! - `backtester`: Strategies, per-player replay, ranked summaries

// Re-export for benchmarks
pub use backtester as sim;
pub use tennis_core as core;
