//! Bookmaker odds columns and the exported master-table row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::match_record::{lenient_odds, MatchRecord};
use crate::Error;

/// Source of the odds pair used for settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bookmaker {
    Bet365,
    Pinnacle,
    /// Best price across the market.
    Max,
    /// Market average.
    #[default]
    Avg,
}

impl Bookmaker {
    pub const ALL: [Bookmaker; 4] = [
        Bookmaker::Bet365,
        Bookmaker::Pinnacle,
        Bookmaker::Max,
        Bookmaker::Avg,
    ];

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Bookmaker::Bet365 => "Bet365",
            Bookmaker::Pinnacle => "Pinnacle",
            Bookmaker::Max => "Max",
            Bookmaker::Avg => "Avg",
        }
    }
}

impl fmt::Display for Bookmaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Bookmaker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bet365" | "b365" => Ok(Bookmaker::Bet365),
            "pinnacle" | "ps" => Ok(Bookmaker::Pinnacle),
            "max" => Ok(Bookmaker::Max),
            "avg" | "average" => Ok(Bookmaker::Avg),
            other => Err(Error::Config {
                message: format!("unknown bookmaker: {other}"),
            }),
        }
    }
}

/// One row of the master match export, with every bookmaker's odds pair.
///
/// Column names follow the export query; the upper-case spreadsheet headers are
/// accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterRow {
    #[serde(default, alias = "Winner")]
    pub winner: Option<String>,
    #[serde(default, alias = "Loser")]
    pub loser: Option<String>,
    #[serde(default, alias = "Date")]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "Tournament")]
    pub tournament: Option<String>,
    #[serde(default, alias = "Round")]
    pub round: Option<String>,
    #[serde(default, alias = "Surface")]
    pub surface: Option<String>,

    #[serde(default, alias = "B365W", deserialize_with = "lenient_odds")]
    pub b365w: Option<Decimal>,
    #[serde(default, alias = "B365L", deserialize_with = "lenient_odds")]
    pub b365l: Option<Decimal>,
    #[serde(default, alias = "PSW", deserialize_with = "lenient_odds")]
    pub psw: Option<Decimal>,
    #[serde(default, alias = "PSL", deserialize_with = "lenient_odds")]
    pub psl: Option<Decimal>,
    #[serde(default, alias = "MaxW", deserialize_with = "lenient_odds")]
    pub maxw: Option<Decimal>,
    #[serde(default, alias = "MaxL", deserialize_with = "lenient_odds")]
    pub maxl: Option<Decimal>,
    #[serde(default, alias = "AvgW", deserialize_with = "lenient_odds")]
    pub avgw: Option<Decimal>,
    #[serde(default, alias = "AvgL", deserialize_with = "lenient_odds")]
    pub avgl: Option<Decimal>,
}

impl MasterRow {
    /// The `(winner, loser)` odds quoted by a bookmaker.
    pub fn odds_for(&self, bookmaker: Bookmaker) -> (Option<Decimal>, Option<Decimal>) {
        match bookmaker {
            Bookmaker::Bet365 => (self.b365w, self.b365l),
            Bookmaker::Pinnacle => (self.psw, self.psl),
            Bookmaker::Max => (self.maxw, self.maxl),
            Bookmaker::Avg => (self.avgw, self.avgl),
        }
    }

    /// Project the row onto a [`MatchRecord`] priced by one bookmaker.
    ///
    /// Missing participant names become empty strings so the record can be
    /// rejected by [`MatchRecord::validate`] downstream.
    pub fn to_match_record(&self, bookmaker: Bookmaker) -> MatchRecord {
        let (winner_odds, loser_odds) = self.odds_for(bookmaker);
        MatchRecord {
            winner_name: self.winner.clone().unwrap_or_default(),
            loser_name: self.loser.clone().unwrap_or_default(),
            winner_odds,
            loser_odds,
            match_date: self.date,
            tournament: self.tournament.clone(),
            round: self.round.clone(),
            surface: self.surface.clone(),
        }
    }
}
