use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{HIGH_SCORE_SLOTS, HIGH_SCORES_FILE};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
}

/// Top scores, best first, at most `HIGH_SCORE_SLOTS` long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn from_entries(entries: Vec<ScoreEntry>) -> Self {
        let mut table = Self { entries };
        table.normalize();
        table
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> u64 {
        self.entries.first().map_or(0, |entry| entry.score)
    }

    /// Inserts a result and returns its 1-based rank if it made the table.
    pub fn record(&mut self, name: &str, score: u64) -> Option<usize> {
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            score,
        });
        // Stable sort: older entries win ties, so the new one goes last.
        let index = self.entries.len() - 1;
        let rank = self.entries[..index]
            .iter()
            .filter(|entry| entry.score >= score)
            .count();
        self.normalize();
        (rank < HIGH_SCORE_SLOTS).then_some(rank + 1)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_SLOTS);
    }

    /// Missing, unreadable and malformed files all load as an empty table.
    pub fn load(storage: &Storage) -> Self {
        match storage.load_json::<Vec<ScoreEntry>>(HIGH_SCORES_FILE) {
            Ok(Some(entries)) => Self::from_entries(entries),
            Ok(None) => Self::default(),
            Err(err) => {
                warn!(error = %err, "high scores unreadable, starting empty");
                Self::default()
            }
        }
    }

    /// Failures are logged and dropped.
    pub fn save(&self, storage: &Storage) {
        match storage.save_json(HIGH_SCORES_FILE, &self.entries) {
            Ok(()) => info!(entries = self.entries.len(), "high scores saved"),
            Err(err) => warn!(error = %err, "high scores not saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_sorted_desc(table: &HighScores) -> bool {
        table.entries().windows(2).all(|w| w[0].score >= w[1].score)
    }

    #[test]
    fn record_keeps_ten_best_sorted() {
        let mut table = HighScores::default();
        for score in [50, 900, 10, 300, 300, 7, 1200, 80, 40, 600, 20, 5000] {
            table.record("YOU", score);
            assert!(table.entries().len() <= HIGH_SCORE_SLOTS);
            assert!(is_sorted_desc(&table));
        }
        assert_eq!(table.entries().len(), HIGH_SCORE_SLOTS);
        assert_eq!(table.best(), 5000);
        assert_eq!(table.entries().last().unwrap().score, 20);
    }

    #[test]
    fn record_reports_rank() {
        let mut table = HighScores::default();
        assert_eq!(table.record("A", 100), Some(1));
        assert_eq!(table.record("B", 300), Some(1));
        assert_eq!(table.record("C", 100), Some(3));
        for _ in 0..7 {
            table.record("X", 1000);
        }
        assert_eq!(table.record("late", 1), None);
    }

    #[test]
    fn round_trips_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let mut table = HighScores::default();
        table.record("YOU", 1000);
        table.record("YOU", 250);
        table.save(&storage);
        assert_eq!(HighScores::load(&storage), table);
    }

    #[test]
    fn file_uses_name_score_objects() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let mut table = HighScores::default();
        table.record("YOU", 42);
        table.save(&storage);
        let text = storage.load_text(HIGH_SCORES_FILE).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, serde_json::json!([{"name": "YOU", "score": 42}]));
    }

    #[test]
    fn corrupt_or_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        assert_eq!(HighScores::load(&storage), HighScores::default());
        storage.save_text(HIGH_SCORES_FILE, "[{\"name\": 3}").unwrap();
        assert_eq!(HighScores::load(&storage), HighScores::default());
    }

    #[test]
    fn unsorted_file_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let entries: Vec<_> = (0..15)
            .map(|i| ScoreEntry {
                name: format!("P{i}"),
                score: i * 10,
            })
            .collect();
        storage.save_json(HIGH_SCORES_FILE, &entries).unwrap();
        let table = HighScores::load(&storage);
        assert_eq!(table.entries().len(), HIGH_SCORE_SLOTS);
        assert_eq!(table.best(), 140);
        assert!(is_sorted_desc(&table));
    }

    #[test]
    fn failed_save_is_absorbed() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path().join("gone"));
        let mut table = HighScores::default();
        table.record("YOU", 1);
        table.save(&storage);
        assert_eq!(table.best(), 1);
    }
}
