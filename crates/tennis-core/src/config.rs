//! Configuration management for the Smart Tennis Bet backtester.

use crate::types::Bookmaker;
use crate::{Error, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub backtest: BacktestConfig,
}

/// Parameters for a backtest run.
#[derive(Debug, Clone, Deserialize)]
pub struct BacktestConfig {
    /// Bankroll every player replay starts from.
    pub initial_bankroll: Decimal,
    /// Fixed amount wagered on each match.
    pub stake: Decimal,
    /// Strategy name, resolved by the backtester.
    pub strategy: String,
    /// Bookmaker whose odds are used for decisions and settlement.
    pub bookmaker: Bookmaker,
    /// Shortest odds still worth backing for floor-based strategies.
    pub odds_floor: Decimal,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_bankroll: Decimal::new(100, 0),
            stake: Decimal::new(10, 0),
            strategy: "favorite".to_string(),
            bookmaker: Bookmaker::Avg,
            odds_floor: Decimal::new(12, 1), // 1.2
        }
    }
}

impl BacktestConfig {
    /// Reject a non-positive odds floor.
    ///
    /// Bankroll and stake are checked when the simulator is built from this
    /// configuration.
    pub fn validate(&self) -> Result<()> {
        if self.odds_floor <= Decimal::ZERO {
            return Err(Error::Config {
                message: format!("odds floor must be positive, got {}", self.odds_floor),
            });
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;

        debug!(
            initial_bankroll = %config.backtest.initial_bankroll,
            stake = %config.backtest.stake,
            strategy = %config.backtest.strategy,
            bookmaker = %config.backtest.bookmaker,
            "Loaded backtest configuration"
        );

        Ok(config)
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Unset variables fall back to defaults; set but unparsable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = BacktestConfig::default();

        let backtest = BacktestConfig {
            initial_bankroll: parse_var(&lookup, "BACKTEST_INITIAL_BANKROLL")?
                .unwrap_or(defaults.initial_bankroll),
            stake: parse_var(&lookup, "BACKTEST_STAKE")?.unwrap_or(defaults.stake),
            strategy: lookup("BACKTEST_STRATEGY")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.strategy),
            bookmaker: parse_var(&lookup, "BACKTEST_BOOKMAKER")?.unwrap_or(defaults.bookmaker),
            odds_floor: parse_var(&lookup, "BACKTEST_ODDS_FLOOR")?.unwrap_or(defaults.odds_floor),
        };
        backtest.validate()?;

        Ok(Self { backtest })
    }

    /// Load configuration for testing (with defaults).
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            backtest: BacktestConfig::default(),
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|e| Error::Config {
            message: format!("{key}={raw:?} is invalid: {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.backtest.initial_bankroll, Decimal::new(100, 0));
        assert_eq!(config.backtest.stake, Decimal::new(10, 0));
        assert_eq!(config.backtest.strategy, "favorite");
        assert_eq!(config.backtest.bookmaker, Bookmaker::Avg);
        assert_eq!(config.backtest.odds_floor, Decimal::new(12, 1));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BACKTEST_INITIAL_BANKROLL", "1000"),
            ("BACKTEST_STAKE", "25.5"),
            ("BACKTEST_STRATEGY", "favorite_with_floor"),
            ("BACKTEST_BOOKMAKER", "pinnacle"),
            ("BACKTEST_ODDS_FLOOR", "1.3"),
        ]))
        .unwrap();

        assert_eq!(config.backtest.initial_bankroll, Decimal::new(1000, 0));
        assert_eq!(config.backtest.stake, Decimal::new(255, 1));
        assert_eq!(config.backtest.strategy, "favorite_with_floor");
        assert_eq!(config.backtest.bookmaker, Bookmaker::Pinnacle);
        assert_eq!(config.backtest.odds_floor, Decimal::new(13, 1));
    }

    #[test]
    fn test_unparsable_value_is_error() {
        let err = Config::from_lookup(lookup_from(&[("BACKTEST_STAKE", "ten")])).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("BACKTEST_STAKE"));
    }

    #[test]
    fn test_non_positive_odds_floor_rejected() {
        let err = Config::from_lookup(lookup_from(&[("BACKTEST_ODDS_FLOOR", "0")])).unwrap_err();
        assert!(err.to_string().contains("odds floor"));
    }

    #[test]
    fn test_stake_is_passed_through_unchecked() {
        let config = Config::from_lookup(lookup_from(&[("BACKTEST_STAKE", "0")])).unwrap();
        assert_eq!(config.backtest.stake, Decimal::ZERO);
    }

    #[test]
    fn test_test_config_is_valid() {
        assert!(Config::test_config().backtest.validate().is_ok());
    }
}
