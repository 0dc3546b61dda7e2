//! Betting strategies.
//!
//! A strategy looks at the two participants of a match and their quoted odds
//! and either names the player to back or declines. It never sees the result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BacktestError;

/// Pluggable betting policy.
pub trait Strategy: Send + Sync {
    /// Strategy name for reports and logs.
    fn name(&self) -> &str;

    /// Pick the player to back, or `None` to skip the match.
    fn pick<'a>(
        &self,
        player_a: &'a str,
        player_b: &'a str,
        odds_a: Decimal,
        odds_b: Decimal,
    ) -> Option<&'a str>;
}

/// Plain functions with the right shape are strategies.
impl<F> Strategy for F
where
    F: for<'a> Fn(&'a str, &'a str, Decimal, Decimal) -> Option<&'a str> + Send + Sync,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn pick<'a>(
        &self,
        player_a: &'a str,
        player_b: &'a str,
        odds_a: Decimal,
        odds_b: Decimal,
    ) -> Option<&'a str> {
        self(player_a, player_b, odds_a, odds_b)
    }
}

fn shorter_priced<'a>(
    player_a: &'a str,
    player_b: &'a str,
    odds_a: Decimal,
    odds_b: Decimal,
) -> Option<&'a str> {
    if odds_a < odds_b {
        Some(player_a)
    } else if odds_a > odds_b {
        Some(player_b)
    } else {
        None
    }
}

/// Back the market favorite: the side with strictly shorter odds.
#[derive(Debug, Clone, Copy, Default)]
pub struct FavoriteStrategy;

impl Strategy for FavoriteStrategy {
    fn name(&self) -> &str {
        "favorite"
    }

    fn pick<'a>(
        &self,
        player_a: &'a str,
        player_b: &'a str,
        odds_a: Decimal,
        odds_b: Decimal,
    ) -> Option<&'a str> {
        shorter_priced(player_a, player_b, odds_a, odds_b)
    }
}

/// Back the favorite unless either price is at or below the floor.
#[derive(Debug, Clone, Copy)]
pub struct FavoriteWithFloorStrategy {
    pub floor: Decimal,
}

impl FavoriteWithFloorStrategy {
    pub const DEFAULT_FLOOR: Decimal = Decimal::from_parts(12, 0, 0, false, 1); // 1.2

    pub fn new(floor: Decimal) -> Self {
        Self { floor }
    }
}

impl Default for FavoriteWithFloorStrategy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FLOOR)
    }
}

impl Strategy for FavoriteWithFloorStrategy {
    fn name(&self) -> &str {
        "favorite_with_floor"
    }

    fn pick<'a>(
        &self,
        player_a: &'a str,
        player_b: &'a str,
        odds_a: Decimal,
        odds_b: Decimal,
    ) -> Option<&'a str> {
        if odds_a <= self.floor || odds_b <= self.floor {
            return None;
        }
        shorter_priced(player_a, player_b, odds_a, odds_b)
    }
}

/// Built-in strategies selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    Favorite,
    FavoriteWithFloor,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 2] = [StrategyKind::Favorite, StrategyKind::FavoriteWithFloor];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Favorite => "favorite",
            StrategyKind::FavoriteWithFloor => "favorite_with_floor",
        }
    }

    /// Instantiate the strategy. `odds_floor` only affects floor-based kinds.
    pub fn build(&self, odds_floor: Decimal) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Favorite => Box::new(FavoriteStrategy),
            StrategyKind::FavoriteWithFloor => Box::new(FavoriteWithFloorStrategy::new(odds_floor)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = BacktestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "favorite" | "smaller_odd" => Ok(StrategyKind::Favorite),
            "favorite_with_floor" | "smaller_odd_criteria" => Ok(StrategyKind::FavoriteWithFloor),
            _ => Err(BacktestError::UnknownStrategy(s.to_string())),
        }
    }
}
