//! Backtester
//!
//! Historical replay of betting strategies over settled tennis matches.
//!
//! # Features
//!
//! - **Strategy Trait**: Pluggable policy deciding which player to back
//! - **Match Feed**: In-memory match table partitioned by player
//! - **Backtest Simulator**: Per-player replay with a running bankroll
//! - **Player Summaries**: Win rate and net result per player, densely ranked
//!
//! # Example
//!
//! ```no_run
//! use backtester::{BacktestSimulator, FavoriteStrategy, MatchFeed, SimulatorConfig};
//! use tennis_core::types::Bookmaker;
//!
//! # fn main() -> anyhow::Result<()> {
//! let file = std::fs::File::open("matches.json")?;
//! let feed = MatchFeed::from_json_reader(file, Bookmaker::Avg)?;
//!
//! let simulator = BacktestSimulator::new(SimulatorConfig::default())?;
//! let report = simulator.run(&feed, &FavoriteStrategy);
//!
//! for row in &report.summaries {
//!     println!("{} {} {}", row.amount_rank, row.player, row.net_gain_loss);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod match_feed;
pub mod settlement;
pub mod simulator;
pub mod strategy;
pub mod summary;

// Re-exports
pub use error::{BacktestError, Result};
pub use match_feed::MatchFeed;
pub use settlement::{evaluate, evaluate_for_player, settle, BetResult};
pub use simulator::{BacktestReport, BacktestSimulator, LedgerEntry, SimulatorConfig};
pub use strategy::{FavoriteStrategy, FavoriteWithFloorStrategy, Strategy, StrategyKind};
pub use summary::{rank_summaries, PlayerSummary};
