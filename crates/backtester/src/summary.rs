//! Per-player aggregation of a replay ledger and profitability ranking.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::settlement::BetResult;
use crate::simulator::LedgerEntry;

/// Backtest outcome for one player's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub player: String,
    pub wins: usize,
    pub losses: usize,
    /// Share of wagers won, in percent, rounded to 2 dp.
    pub win_percentage: f64,
    pub final_amount: Decimal,
    pub net_gain_loss: Decimal,
    pub net_gain_loss_percentage: f64,
    pub num_played_games: usize,
    /// Dense rank by `net_gain_loss`, 1 being the most profitable.
    pub amount_rank: usize,
}

impl PlayerSummary {
    /// Summarize a player's ledger. `amount_rank` stays 0 until [`rank_summaries`].
    pub fn from_ledger(player: &str, ledger: &[LedgerEntry], initial_bankroll: Decimal) -> Self {
        let wins = ledger
            .iter()
            .filter(|e| e.bet_result == BetResult::Win)
            .count();
        let losses = ledger.len() - wins;

        let win_percentage = if ledger.is_empty() {
            0.0
        } else {
            percentage(Decimal::from(wins), Decimal::from(ledger.len()))
        };

        let final_amount = ledger
            .last()
            .map(|e| e.running_total.round_dp(2))
            .unwrap_or(initial_bankroll);
        let net_gain_loss = (final_amount - initial_bankroll).round_dp(3);

        Self {
            player: player.to_string(),
            wins,
            losses,
            win_percentage,
            final_amount,
            net_gain_loss,
            net_gain_loss_percentage: percentage(net_gain_loss, initial_bankroll),
            num_played_games: ledger.len(),
            amount_rank: 0,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.net_gain_loss > Decimal::ZERO
    }
}

fn percentage(part: Decimal, whole: Decimal) -> f64 {
    if whole == Decimal::ZERO {
        return 0.0;
    }
    let rounded = (part / whole * Decimal::ONE_HUNDRED).round_dp(2);
    // A single division of exact integers yields the nearest f64 to the decimal.
    rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32)
}

/// Assign dense ranks by `net_gain_loss` descending and sort by rank.
///
/// Equal results share a rank and the next distinct result gets the next
/// integer. Players with the same rank are ordered by name.
pub fn rank_summaries(mut summaries: Vec<PlayerSummary>) -> Vec<PlayerSummary> {
    summaries.sort_by(|a, b| {
        b.net_gain_loss
            .cmp(&a.net_gain_loss)
            .then_with(|| a.player.cmp(&b.player))
    });

    let mut rank = 0;
    let mut previous: Option<Decimal> = None;
    for summary in summaries.iter_mut() {
        if previous != Some(summary.net_gain_loss) {
            rank += 1;
            previous = Some(summary.net_gain_loss);
        }
        summary.amount_rank = rank;
    }

    summaries
}
