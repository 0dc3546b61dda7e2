//! Settled match records as consumed by the backtester.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// One historical match outcome with the odds quoted for each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub winner_name: String,
    pub loser_name: String,
    /// Decimal odds on the winner. `None` means the market is unwageable.
    #[serde(default, deserialize_with = "lenient_odds")]
    pub winner_odds: Option<Decimal>,
    /// Decimal odds on the loser.
    #[serde(default, deserialize_with = "lenient_odds")]
    pub loser_odds: Option<Decimal>,

    // Descriptive passthrough, never interpreted by the engine.
    #[serde(default)]
    pub match_date: Option<NaiveDate>,
    #[serde(default)]
    pub tournament: Option<String>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
}

impl MatchRecord {
    /// Create a record with the two participants and their odds.
    pub fn new(
        winner_name: impl Into<String>,
        loser_name: impl Into<String>,
        winner_odds: Option<Decimal>,
        loser_odds: Option<Decimal>,
    ) -> Self {
        Self {
            winner_name: winner_name.into(),
            loser_name: loser_name.into(),
            winner_odds,
            loser_odds,
            match_date: None,
            tournament: None,
            round: None,
            surface: None,
        }
    }

    /// Attach the match date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.match_date = Some(date);
        self
    }

    /// Attach tournament context.
    pub fn with_tournament(
        mut self,
        tournament: impl Into<String>,
        round: impl Into<String>,
        surface: impl Into<String>,
    ) -> Self {
        self.tournament = Some(tournament.into());
        self.round = Some(round.into());
        self.surface = Some(surface.into());
        self
    }

    /// Check that both participants are identified.
    pub fn validate(&self) -> Result<()> {
        if self.winner_name.trim().is_empty() {
            return Err(Error::InvalidMatch(format!(
                "missing winner (loser: {:?})",
                self.loser_name
            )));
        }
        if self.loser_name.trim().is_empty() {
            return Err(Error::InvalidMatch(format!(
                "missing loser (winner: {:?})",
                self.winner_name
            )));
        }
        if self.winner_name == self.loser_name {
            return Err(Error::InvalidMatch(format!(
                "{:?} listed as both winner and loser",
                self.winner_name
            )));
        }
        Ok(())
    }

    /// Returns `(winner_odds, loser_odds)` when both sides carry a usable price.
    ///
    /// A zero or negative quote is treated the same as a missing one. Quotes in
    /// `(0, 1]` are still wageable, although a win at them returns no profit.
    pub fn wageable_odds(&self) -> Option<(Decimal, Decimal)> {
        match (self.winner_odds, self.loser_odds) {
            (Some(w), Some(l)) if w > Decimal::ZERO && l > Decimal::ZERO => Some((w, l)),
            _ => None,
        }
    }

    /// Whether the named player took part in this match.
    pub fn involves(&self, player: &str) -> bool {
        self.winner_name == player || self.loser_name == player
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOdds {
    Numeric(Decimal),
    Other(serde::de::IgnoredAny),
}

/// Accepts numbers and numeric strings; anything else becomes `None`.
pub fn lenient_odds<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawOdds> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawOdds::Numeric(odds)) => Some(odds),
        Some(RawOdds::Other(_)) | None => None,
    })
}
