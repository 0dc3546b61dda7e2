//! Backtest CLI
//!
//! Replays a betting strategy over an exported match table and prints the
//! ranked per-player summary as JSON.

use anyhow::{Context, Result};
use backtester::{BacktestSimulator, MatchFeed, SimulatorConfig, StrategyKind};
use clap::Parser;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use tennis_core::config::Config;
use tennis_core::types::Bookmaker;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "backtest", about = "Backtest a betting strategy per player")]
struct Args {
    /// JSON array of master export rows
    input: PathBuf,

    /// Strategy to replay (overrides BACKTEST_STRATEGY)
    #[arg(long)]
    strategy: Option<StrategyKind>,

    /// Odds source (overrides BACKTEST_BOOKMAKER)
    #[arg(long)]
    bookmaker: Option<Bookmaker>,

    /// Starting bankroll per player (overrides BACKTEST_INITIAL_BANKROLL)
    #[arg(long)]
    bankroll: Option<Decimal>,

    /// Stake per wager (overrides BACKTEST_STAKE)
    #[arg(long)]
    stake: Option<Decimal>,

    /// Run every built-in strategy and print one report each
    #[arg(long)]
    compare: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backtester=info,tennis_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?.backtest;

    if let Some(bankroll) = args.bankroll {
        config.initial_bankroll = bankroll;
    }
    if let Some(stake) = args.stake {
        config.stake = stake;
    }
    if let Some(bookmaker) = args.bookmaker {
        config.bookmaker = bookmaker;
    }
    let kind = match args.strategy {
        Some(kind) => kind,
        None => config.strategy.parse()?,
    };
    config.validate()?;

    let simulator = BacktestSimulator::new(SimulatorConfig::from(&config))?;

    let feed = MatchFeed::from_json_path(&args.input, config.bookmaker)
        .with_context(|| format!("failed to read matches from {}", args.input.display()))?;

    info!(
        input = %args.input.display(),
        matches = feed.len(),
        bookmaker = %config.bookmaker,
        "Loaded match feed"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.compare {
        let strategies: Vec<_> = StrategyKind::ALL
            .iter()
            .map(|kind| kind.build(config.odds_floor))
            .collect();
        let reports = simulator.compare_strategies(&feed, &strategies);
        serde_json::to_writer_pretty(&mut out, &reports)?;
    } else {
        let strategy = kind.build(config.odds_floor);
        let report = simulator.run(&feed, strategy.as_ref());
        serde_json::to_writer_pretty(&mut out, &report)?;
    }
    writeln!(out)?;

    Ok(())
}
