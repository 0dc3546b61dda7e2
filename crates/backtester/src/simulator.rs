//! Backtest simulator: per-player strategy replay with a running bankroll.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tennis_core::config::BacktestConfig;
use tennis_core::types::MatchRecord;
use tracing::{debug, info, warn};

use crate::error::{BacktestError, Result};
use crate::match_feed::MatchFeed;
use crate::settlement::{evaluate, evaluate_for_player, settle, BetResult};
use crate::strategy::Strategy;
use crate::summary::{rank_summaries, PlayerSummary};

/// Configuration for the backtest simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Bankroll each player replay starts from.
    pub initial_bankroll: Decimal,
    /// Fixed amount wagered per match.
    pub stake: Decimal,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_bankroll: Decimal::new(100, 0),
            stake: Decimal::new(10, 0),
        }
    }
}

impl SimulatorConfig {
    pub fn new(initial_bankroll: Decimal, stake: Decimal) -> Self {
        Self {
            initial_bankroll,
            stake,
        }
    }

    /// Reject non-positive bankroll or stake.
    pub fn validate(&self) -> Result<()> {
        if self.initial_bankroll <= Decimal::ZERO {
            return Err(BacktestError::InvalidConfig(format!(
                "initial bankroll must be positive, got {}",
                self.initial_bankroll
            )));
        }
        if self.stake <= Decimal::ZERO {
            return Err(BacktestError::InvalidConfig(format!(
                "stake must be positive, got {}",
                self.stake
            )));
        }
        Ok(())
    }
}

impl From<&BacktestConfig> for SimulatorConfig {
    fn from(config: &BacktestConfig) -> Self {
        Self::new(config.initial_bankroll, config.stake)
    }
}

/// One wager placed during a player's replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The match the wager was placed on.
    pub record: MatchRecord,
    /// Player the strategy backed.
    pub bet_decision: String,
    /// Bettor view in [`BacktestSimulator::simulate_bets`], the replayed
    /// player's view in [`BacktestSimulator::simulate_player_bets`].
    pub bet_result: BetResult,
    /// Amount won or lost on this wager.
    pub net_result: Decimal,
    /// Balance after settling this wager.
    pub running_total: Decimal,
}

/// Result of a full backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Strategy name.
    pub strategy_name: String,
    /// Initial bankroll per player.
    pub initial_bankroll: Decimal,
    /// Stake per wager.
    pub stake: Decimal,
    /// Well-formed matches in the feed.
    pub total_matches: usize,
    /// Records dropped before the replay for missing participants.
    pub skipped_malformed: usize,
    /// One row per player, ordered by `amount_rank`.
    pub summaries: Vec<PlayerSummary>,
}

impl BacktestReport {
    /// Sum of every player's net result.
    pub fn total_net_gain_loss(&self) -> Decimal {
        self.summaries.iter().map(|s| s.net_gain_loss).sum()
    }

    /// Total wagers placed across all player perspectives.
    pub fn total_wagers(&self) -> usize {
        self.summaries.iter().map(|s| s.num_played_games).sum()
    }

    /// Summary for a single player.
    pub fn player(&self, name: &str) -> Option<&PlayerSummary> {
        self.summaries.iter().find(|s| s.player == name)
    }
}

/// The backtest simulator engine.
#[derive(Debug, Clone)]
pub struct BacktestSimulator {
    config: SimulatorConfig,
}

impl BacktestSimulator {
    /// Create a new simulator, failing fast on an invalid configuration.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Replay a strategy over a sequence of matches, in the order given.
    ///
    /// Each wager is settled from the bettor's side: it wins iff the backed
    /// player won. Matches without usable odds on both sides, that the
    /// strategy declines, or whose payout overflows leave no ledger entry and
    /// do not move the balance. The balance may go negative.
    pub fn simulate_bets<'a, S, I>(&self, matches: I, strategy: &S) -> Vec<LedgerEntry>
    where
        S: Strategy + ?Sized,
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        self.replay(matches, strategy, None)
    }

    /// Replay a strategy over one player's matches from that player's side.
    ///
    /// Same skip rules as [`Self::simulate_bets`], but a match the player lost
    /// always settles as [`BetResult::Lose`] for them.
    pub fn simulate_player_bets<'a, S, I>(
        &self,
        player: &str,
        matches: I,
        strategy: &S,
    ) -> Vec<LedgerEntry>
    where
        S: Strategy + ?Sized,
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        self.replay(matches, strategy, Some(player))
    }

    fn replay<'a, S, I>(&self, matches: I, strategy: &S, perspective: Option<&str>) -> Vec<LedgerEntry>
    where
        S: Strategy + ?Sized,
        I: IntoIterator<Item = &'a MatchRecord>,
    {
        let mut state = ReplayState::new(self.config.initial_bankroll);

        for record in matches {
            let Some((winner_odds, loser_odds)) = record.wageable_odds() else {
                debug!(
                    winner = %record.winner_name,
                    loser = %record.loser_name,
                    winner_odds = ?record.winner_odds,
                    loser_odds = ?record.loser_odds,
                    "Skipping match with missing odds"
                );
                state.skipped_no_odds += 1;
                continue;
            };
            if winner_odds <= Decimal::ONE || loser_odds <= Decimal::ONE {
                warn!(
                    winner = %record.winner_name,
                    loser = %record.loser_name,
                    %winner_odds,
                    %loser_odds,
                    "Odds at or below 1.0 cannot return a profit"
                );
            }

            let Some(bet_decision) = strategy.pick(
                &record.winner_name,
                &record.loser_name,
                winner_odds,
                loser_odds,
            ) else {
                state.declined += 1;
                continue;
            };

            let bet_result = match perspective {
                Some(player) => evaluate_for_player(player, &record.winner_name, bet_decision),
                None => evaluate(&record.winner_name, bet_decision),
            };
            let settled = settle(bet_result, self.config.stake, winner_odds).and_then(|net| {
                state
                    .running_total
                    .checked_add(net)
                    .map(|total| (net, total))
            });
            let Some((net_result, running_total)) = settled else {
                warn!(
                    winner = %record.winner_name,
                    loser = %record.loser_name,
                    %winner_odds,
                    balance = %state.running_total,
                    "Skipping match whose settlement overflows"
                );
                state.skipped_overflow += 1;
                continue;
            };
            state.running_total = running_total;

            state.ledger.push(LedgerEntry {
                record: record.clone(),
                bet_decision: bet_decision.to_string(),
                bet_result,
                net_result,
                running_total: state.running_total,
            });
        }

        debug!(
            player = perspective.unwrap_or("-"),
            wagers = state.ledger.len(),
            skipped_no_odds = state.skipped_no_odds,
            skipped_overflow = state.skipped_overflow,
            declined = state.declined,
            final_balance = %state.running_total,
            "Replay finished"
        );

        state.ledger
    }

    /// Replay the strategy from every player's perspective and rank the results.
    ///
    /// Replays run in parallel; ranking waits for all of them.
    pub fn simulate_by_player<S>(&self, feed: &MatchFeed, strategy: &S) -> Vec<PlayerSummary>
    where
        S: Strategy + ?Sized,
    {
        let initial_bankroll = self.config.initial_bankroll;

        let summaries: Vec<PlayerSummary> = feed
            .partition_by_player()
            .into_par_iter()
            .map(|(player, matches)| {
                let ledger = self.simulate_player_bets(player, matches, strategy);
                PlayerSummary::from_ledger(player, &ledger, initial_bankroll)
            })
            .collect();

        rank_summaries(summaries)
    }

    /// Run a full backtest and wrap the summaries in a report.
    pub fn run<S>(&self, feed: &MatchFeed, strategy: &S) -> BacktestReport
    where
        S: Strategy + ?Sized,
    {
        info!(
            strategy = strategy.name(),
            matches = feed.len(),
            malformed = feed.rejected(),
            initial_bankroll = %self.config.initial_bankroll,
            stake = %self.config.stake,
            "Starting backtest"
        );

        let summaries = self.simulate_by_player(feed, strategy);
        let report = BacktestReport {
            strategy_name: strategy.name().to_string(),
            initial_bankroll: self.config.initial_bankroll,
            stake: self.config.stake,
            total_matches: feed.len(),
            skipped_malformed: feed.rejected(),
            summaries,
        };

        info!(
            strategy = strategy.name(),
            players = report.summaries.len(),
            wagers = report.total_wagers(),
            net = %report.total_net_gain_loss(),
            "Backtest completed"
        );

        report
    }

    /// Run several strategies on the same feed, best aggregate result first.
    pub fn compare_strategies(
        &self,
        feed: &MatchFeed,
        strategies: &[Box<dyn Strategy>],
    ) -> Vec<BacktestReport> {
        let mut reports: Vec<BacktestReport> = strategies
            .iter()
            .map(|strategy| self.run(feed, strategy.as_ref()))
            .collect();

        reports.sort_by(|a, b| b.total_net_gain_loss().cmp(&a.total_net_gain_loss()));
        reports
    }
}

/// Internal replay state for one player.
struct ReplayState {
    running_total: Decimal,
    ledger: Vec<LedgerEntry>,
    skipped_no_odds: usize,
    skipped_overflow: usize,
    declined: usize,
}

impl ReplayState {
    fn new(initial_bankroll: Decimal) -> Self {
        Self {
            running_total: initial_bankroll,
            ledger: Vec::new(),
            skipped_no_odds: 0,
            skipped_overflow: 0,
            declined: 0,
        }
    }
}
