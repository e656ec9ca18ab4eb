//! High score leaderboard system
//!
//! Persisted as JSON, tracks top 10 scores.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's score
    pub score: u64,
    /// Wave reached (1-based)
    pub wave: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, wave: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            wave,
            timestamp,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard
    ///
    /// A missing file starts fresh and a corrupt one is replaced on the next
    /// save. Any other read failure is an error, so a board we could not
    /// read is never overwritten.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                return Ok(Self::new());
            }
            Err(e) => {
                log::warn!("Could not read high scores {}: {}", path.display(), e);
                return Err(e)
                    .with_context(|| format!("reading high scores {}", path.display()));
            }
        };
        match serde_json::from_str::<HighScores>(&json) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                Ok(scores)
            }
            Err(e) => {
                log::warn!("Ignoring corrupt high scores {}: {}", path.display(), e);
                Ok(Self::new())
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("writing high scores {}", path.display()))?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

/// Current time as a Unix timestamp in milliseconds
pub fn now_ms() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Format a timestamp as a date string relative to `now` (both in ms)
pub fn format_date(timestamp: f64, now: f64) -> String {
    let diff_mins = (now - timestamp) / 1000.0 / 60.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(100, 1, 0.0), Some(1));
        assert_eq!(scores.add_score(300, 2, 0.0), Some(1));
        assert_eq!(scores.add_score(200, 1, 0.0), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![300, 200, 100]);
        assert_eq!(scores.top_score(), Some(300));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 1, 0.0), None);
        assert!(scores.entries.is_empty());
    }

    #[test]
    fn test_full_board_trims() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(i * 10, 1, 0.0);
        }
        assert!(!scores.qualifies(10));
        assert_eq!(scores.add_score(5, 1, 0.0), None);
        assert_eq!(scores.add_score(55, 1, 0.0), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().unwrap().score, 20);
    }

    #[test]
    fn test_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        assert_eq!(HighScores::load(&path).unwrap(), HighScores::new());

        let mut scores = HighScores::new();
        scores.add_score(420, 3, 1_700_000_000_000.0);
        scores.save(&path).unwrap();
        assert_eq!(HighScores::load(&path).unwrap(), scores);

        fs::write(&path, "garbage").unwrap();
        assert_eq!(HighScores::load(&path).unwrap(), HighScores::new());
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        // A directory exists but cannot be read as a file
        let dir = tempfile::tempdir().unwrap();
        assert!(HighScores::load(dir.path()).is_err());
    }

    #[test]
    fn test_format_date() {
        let now = 10.0 * 24.0 * 3600.0 * 1000.0;
        assert_eq!(format_date(now - 5_000.0, now), "Just now");
        assert_eq!(format_date(now - 90_000.0, now), "1 min ago");
        assert_eq!(format_date(now - 3.0 * 3600.0 * 1000.0, now), "3 hours ago");
        assert_eq!(format_date(now - 30.0 * 3600.0 * 1000.0, now), "Yesterday");
        assert_eq!(format_date(now - 4.0 * 86_400_000.0, now), "4 days ago");
    }
}
