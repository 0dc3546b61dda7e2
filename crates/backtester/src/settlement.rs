//! Outcome evaluation and bet settlement.
//!
//! Odds are decimal ("European"): the quoted number already includes the
//! returned stake.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a single wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BetResult {
    Win,
    Lose,
}

/// Classify a wager: it wins iff the backed player is the match winner.
pub fn evaluate(winner_name: &str, bet_decision: &str) -> BetResult {
    if winner_name == bet_decision {
        BetResult::Win
    } else {
        BetResult::Lose
    }
}

/// Classify a wager from one participant's side of the match.
///
/// A match the player lost is a losing wager for them whoever was backed;
/// otherwise the usual rule applies.
pub fn evaluate_for_player(player: &str, winner_name: &str, bet_decision: &str) -> BetResult {
    if player != winner_name {
        return BetResult::Lose;
    }
    evaluate(winner_name, bet_decision)
}

/// Signed amount gained or lost on one wager.
///
/// Always priced on the winner's odds: a winning bet backed the winner, and a
/// losing bet forfeits the stake regardless of price. Returns `None` when the
/// payout is not representable.
pub fn settle(result: BetResult, stake: Decimal, winner_odds: Decimal) -> Option<Decimal> {
    match result {
        BetResult::Win => stake.checked_mul(winner_odds)?.checked_sub(stake),
        BetResult::Lose => Some(-stake),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate() {
        assert_eq!(evaluate("Sinner J.", "Sinner J."), BetResult::Win);
        assert_eq!(evaluate("Sinner J.", "Medvedev D."), BetResult::Lose);
    }

    #[test]
    fn test_evaluate_for_player() {
        // Backed the winner: a win for the winner, a loss for the loser.
        assert_eq!(evaluate_for_player("A", "A", "A"), BetResult::Win);
        assert_eq!(evaluate_for_player("B", "A", "A"), BetResult::Lose);
        // Backed the loser: a loss from both sides.
        assert_eq!(evaluate_for_player("A", "A", "B"), BetResult::Lose);
        assert_eq!(evaluate_for_player("B", "A", "B"), BetResult::Lose);
    }

    #[test]
    fn test_settle_win() {
        // 10 * 1.5 - 10 = 5
        let net = settle(BetResult::Win, Decimal::new(10, 0), Decimal::new(15, 1));
        assert_eq!(net, Some(Decimal::new(5, 0)));

        // 25 * 3.40 - 25 = 60
        let net = settle(BetResult::Win, Decimal::new(25, 0), Decimal::new(340, 2));
        assert_eq!(net, Some(Decimal::new(60, 0)));
    }

    #[test]
    fn test_settle_lose_forfeits_stake() {
        for odds in [Decimal::new(101, 2), Decimal::new(2, 0), Decimal::new(1250, 2)] {
            let net = settle(BetResult::Lose, Decimal::new(10, 0), odds);
            assert_eq!(net, Some(Decimal::new(-10, 0)));
        }
    }

    #[test]
    fn test_settle_win_is_profit_over_stake() {
        let stake = Decimal::new(7, 0);
        for cents in [105i64, 150, 199, 260, 775] {
            let odds = Decimal::new(cents, 2);
            let net = settle(BetResult::Win, stake, odds).unwrap();
            assert_eq!(net, stake * odds - stake);
            assert!(net > Decimal::ZERO);
        }
    }

    #[test]
    fn test_settle_overflow_is_none() {
        let odds = Decimal::MAX / Decimal::new(2, 0);
        assert_eq!(settle(BetResult::Win, Decimal::new(10, 0), odds), None);
        // A loss never touches the price.
        assert_eq!(
            settle(BetResult::Lose, Decimal::new(10, 0), odds),
            Some(Decimal::new(-10, 0))
        );
    }

    #[test]
    fn test_bet_result_serialization() {
        assert_eq!(serde_json::to_string(&BetResult::Win).unwrap(), "\"WIN\"");
        assert_eq!(serde_json::to_string(&BetResult::Lose).unwrap(), "\"LOSE\"");
    }
}
