//! In-memory table of settled matches fed to the simulator.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tennis_core::types::{Bookmaker, MasterRow, MatchRecord};
use tracing::{debug, warn};

/// Settled matches in caller order, with malformed records removed.
#[derive(Debug, Clone, Default)]
pub struct MatchFeed {
    matches: Vec<MatchRecord>,
    rejected: usize,
}

impl MatchFeed {
    /// Build a feed, dropping records that do not name both participants.
    pub fn new(records: impl IntoIterator<Item = MatchRecord>) -> Self {
        let mut matches = Vec::new();
        let mut rejected = 0;

        for (row, record) in records.into_iter().enumerate() {
            match record.validate() {
                Ok(()) => matches.push(record),
                Err(e) => {
                    warn!(row, error = %e, "Dropping malformed match record");
                    rejected += 1;
                }
            }
        }

        debug!(accepted = matches.len(), rejected, "Built match feed");
        Self { matches, rejected }
    }

    /// Build a feed from master export rows priced by one bookmaker.
    pub fn from_master_rows<'a>(
        rows: impl IntoIterator<Item = &'a MasterRow>,
        bookmaker: Bookmaker,
    ) -> Self {
        Self::new(rows.into_iter().map(|row| row.to_match_record(bookmaker)))
    }

    /// Read a JSON array of master export rows.
    pub fn from_json_reader<R: Read>(reader: R, bookmaker: Bookmaker) -> tennis_core::Result<Self> {
        let rows: Vec<MasterRow> = serde_json::from_reader(reader)?;
        Ok(Self::from_master_rows(&rows, bookmaker))
    }

    /// Read a JSON export from disk.
    pub fn from_json_path(path: impl AsRef<Path>, bookmaker: Bookmaker) -> tennis_core::Result<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file), bookmaker)
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Number of records dropped as malformed.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Distinct player names, in order of first appearance.
    pub fn players(&self) -> Vec<&str> {
        self.partition_by_player()
            .into_iter()
            .map(|(player, _)| player)
            .collect()
    }

    /// Matches involving one player, in feed order.
    pub fn matches_for<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a MatchRecord> + 'a {
        self.matches.iter().filter(move |m| m.involves(player))
    }

    /// Every player with the matches they took part in, both in feed order.
    ///
    /// Each match appears in two partitions: its winner's and its loser's.
    pub fn partition_by_player(&self) -> Vec<(&str, Vec<&MatchRecord>)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut partitions: Vec<(&str, Vec<&MatchRecord>)> = Vec::new();

        for record in &self.matches {
            for player in [record.winner_name.as_str(), record.loser_name.as_str()] {
                let slot = *index.entry(player).or_insert_with(|| {
                    partitions.push((player, Vec::new()));
                    partitions.len() - 1
                });
                partitions[slot].1.push(record);
            }
        }

        partitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(winner: &str, loser: &str) -> MatchRecord {
        MatchRecord::new(winner, loser, Some(Decimal::new(15, 1)), Some(Decimal::new(25, 1)))
    }

    #[test]
    fn test_drops_malformed_records() {
        let feed = MatchFeed::new(vec![record("A", "B"), record("", "C"), record("D", "")]);
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.rejected(), 2);
        assert_eq!(feed.players(), vec!["A", "B"]);
    }

    #[test]
    fn test_players_in_first_appearance_order() {
        let feed = MatchFeed::new(vec![record("B", "A"), record("C", "B"), record("A", "D")]);
        assert_eq!(feed.players(), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_partition_preserves_order() {
        let feed = MatchFeed::new(vec![
            record("A", "B").with_tournament("Doha", "1st Round", "Hard"),
            record("C", "D"),
            record("B", "A").with_tournament("Dubai", "Final", "Hard"),
            record("A", "C"),
        ]);

        let partitions = feed.partition_by_player();
        let (player, matches) = &partitions[0];
        assert_eq!(*player, "A");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].tournament.as_deref(), Some("Doha"));
        assert_eq!(matches[1].tournament.as_deref(), Some("Dubai"));
        assert_eq!(matches[2].loser_name, "C");

        let from_filter: Vec<&MatchRecord> = feed.matches_for("A").collect();
        assert_eq!(&from_filter, matches);
    }

    #[test]
    fn test_from_json_reader() {
        let json = r#"[
            {"winner": "A", "loser": "B", "avgw": 1.5, "avgl": 2.5, "psw": 1.55, "psl": 2.6},
            {"winner": null, "loser": "C", "avgw": 1.9, "avgl": 1.9},
            {"winner": "C", "loser": "A", "avgw": "", "avgl": 2.1}
        ]"#;
        let feed = MatchFeed::from_json_reader(json.as_bytes(), Bookmaker::Pinnacle).unwrap();

        assert_eq!(feed.len(), 2);
        assert_eq!(feed.rejected(), 1);
        assert_eq!(feed.matches()[0].winner_odds, Some(Decimal::new(155, 2)));
        assert_eq!(feed.matches()[1].winner_odds, None);
    }

    #[test]
    fn test_from_json_reader_rejects_non_array() {
        assert!(MatchFeed::from_json_reader(r#"{"winner": "A"}"#.as_bytes(), Bookmaker::Avg).is_err());
    }

    #[test]
    fn test_from_json_path_missing_file() {
        let path = std::env::temp_dir().join("smart-tennis-bet-no-such-export.json");
        let err = MatchFeed::from_json_path(&path, Bookmaker::Avg).unwrap_err();
        assert!(matches!(err, tennis_core::Error::Io(_)));
    }
}
