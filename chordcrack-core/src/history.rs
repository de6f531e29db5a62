//! Append-only JSONL round log for debugging and replay.
//!
//! One line per completed round at `~/.local/share/chordcrack/rounds.jsonl`,
//! tailable via `tail -f`. Best-effort: failures are logged and never
//! surface to the player.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use chordcrack_types::{ChordId, GameMode};

/// One completed round, as persisted and as logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Seconds since the Unix epoch at resolution time.
    pub at: u64,
    pub mode: GameMode,
    pub target: ChordId,
    pub correct: bool,
    pub attempts_used: u8,
    pub points: u32,
    pub bonus: u32,
    /// Guess sequence; None marks a skipped attempt.
    pub attempts: Vec<Option<ChordId>>,
}

impl HistoryEntry {
    pub fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Log directory: `~/.local/share/chordcrack/`
fn log_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("chordcrack")
    } else {
        PathBuf::from(".")
    }
}

/// Append-only JSONL writer for the round log.
pub struct RoundLog {
    writer: BufWriter<File>,
}

impl RoundLog {
    /// Open (creating if needed) the default log file.
    pub fn open_default() -> Result<Self, String> {
        Self::open(log_dir().join("rounds.jsonl"))
    }

    pub fn open(path: PathBuf) -> Result<Self, String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create {}: {}", parent.display(), e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Append one entry and flush so `tail -f` sees it immediately.
    pub fn append(&mut self, entry: &HistoryEntry) {
        let line = match serde_json::to_string(entry) {
            Ok(line) => line,
            Err(e) => {
                log::warn!(target: "history", "could not serialize round: {}", e);
                return;
            }
        };
        if let Err(e) = writeln!(self.writer, "{}", line).and_then(|_| self.writer.flush()) {
            log::warn!(target: "history", "could not write round log: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordcrack_types::chord::CATALOG;

    #[test]
    fn append_writes_one_json_line_per_round() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let mut log = RoundLog::open(path.clone()).unwrap();

        let entry = HistoryEntry {
            at: 1000,
            mode: GameMode::Standard,
            target: CATALOG[0].id,
            correct: true,
            attempts_used: 2,
            points: 50,
            bonus: 0,
            attempts: vec![Some(CATALOG[1].id), Some(CATALOG[0].id)],
        };
        log.append(&entry);
        log.append(&entry);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: HistoryEntry = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, entry);
    }
}
