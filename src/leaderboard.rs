//! Score leaderboard
//!
//! Persisted to LocalStorage as a bare JSON array of entries, tracks the top
//! 10 finished runs.

use serde::{Deserialize, Serialize};

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Run length in whole seconds
    pub time: u32,
}

/// Top-10 leaderboard, best score first, ties broken by the shorter run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    pub entries: Vec<ScoreEntry>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ocean_dash_leaderboard";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a run, re-sort (score descending, then time ascending), and
    /// truncate to the cap
    pub fn add(&mut self, score: u32, time: u32) {
        self.entries.push(ScoreEntry { score, time });
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.time.cmp(&b.time)));
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Read-modify-write used on game end: load the stored board, append the
    /// run, write it back, and return the updated board for display
    pub fn record(score: u32, time: u32) -> Self {
        let mut board = Self::load();
        board.add(score, time);
        board.save();
        board
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the leaderboard from LocalStorage (WASM only).
    /// Missing or corrupt data is treated as an empty board.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(storage) = crate::platform::local_storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Vec<ScoreEntry>>(&json) {
                    Ok(entries) => {
                        log::info!("Loaded {} leaderboard entries", entries.len());
                        return Self { entries };
                    }
                    Err(err) => {
                        log::warn!("Discarding corrupt leaderboard data: {}", err);
                    }
                }
            }
        }

        log::info!("No leaderboard found, starting fresh");
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(storage) = crate::platform::local_storage() {
            if let Ok(json) = serde_json::to_string(&self.entries) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Leaderboard saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_by_score_then_time() {
        let mut board = Leaderboard::new();
        board.add(5, 30);
        board.add(10, 20);
        board.add(10, 15);

        let expected = [
            ScoreEntry {
                score: 10,
                time: 15,
            },
            ScoreEntry {
                score: 10,
                time: 20,
            },
            ScoreEntry { score: 5, time: 30 },
        ];
        assert_eq!(board.entries, expected);
    }

    #[test]
    fn test_truncates_to_cap() {
        let mut board = Leaderboard::new();
        for i in 0..25 {
            board.add(i, 10);
        }
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        // The weakest runs fell off the bottom
        assert_eq!(board.entries.first().unwrap().score, 24);
        assert_eq!(board.entries.last().unwrap().score, 15);
    }

    #[test]
    fn test_stored_format_is_bare_array() {
        let mut board = Leaderboard::new();
        board.add(7, 42);
        let json = serde_json::to_string(&board.entries).unwrap();
        assert_eq!(json, r#"[{"score":7,"time":42}]"#);

        let parsed: Vec<ScoreEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board.entries);
    }

    #[test]
    fn test_corrupt_json_rejected() {
        assert!(serde_json::from_str::<Vec<ScoreEntry>>("{not json").is_err());
        assert!(serde_json::from_str::<Vec<ScoreEntry>>(r#"[{"wrong":1}]"#).is_err());
    }
}
