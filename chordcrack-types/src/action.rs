//! Action types for the dispatch system, plus `DispatchResult` and the
//! status events dispatch hands back to the front end.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::chord::{ChordCategory, ChordId};

/// Top-level action tree. Everything that mutates state flows through here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Game(GameAction),
    Practice(PracticeAction),
    Session(SessionAction),
    /// Feedback from the audio thread, folded back into dispatch.
    AudioFeedback(AudioFeedback),
    Quit,
    None,
}

/// Standard-game and daily-challenge actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    /// Start a new standard game.
    Start,
    /// Start (or resume reporting of) today's daily challenge.
    StartDaily,
    /// Replay the current round's audio at the current hint tier.
    ReplayAudio,
    Guess(ChordId),
    /// Move from Answered to the next round, or to GameOver.
    Advance,
    /// Abandon the session without recording a game.
    Abandon,
}

/// Practice-mode actions (single-category and mixed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PracticeAction {
    Start(ChordCategory),
    StartMixed,
    ReplayAudio,
    Guess(ChordId),
    Advance,
    Stop,
}

/// Profile and persistence actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionAction {
    SetUsername(String),
    SetVolume(f32),
    Save,
    SaveTo(PathBuf),
    Load,
    LoadFrom(PathBuf),
    ResetStats,
}

/// Feedback events from the audio thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioFeedback {
    PlaybackStarted,
    PlaybackFinished,
    Error(String),
}

/// User-facing events produced by dispatch. The front end decides how to
/// render them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatusEvent {
    Info(String),
    Error(String),
    RoundWon {
        points: u32,
        bonus: u32,
        attempt: u8,
        streak: u32,
    },
    RoundLost {
        answer: ChordId,
    },
    GameOver {
        score: u32,
        correct: u32,
        rounds: u32,
    },
    LevelUp(u32),
    AchievementUnlocked(Achievement),
    DailyAlreadyPlayed {
        score: u32,
    },
}

/// Result of dispatching one action: side effects for the caller.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DispatchResult {
    pub quit: bool,
    pub status: Vec<StatusEvent>,
    /// True when the profile changed in a way autosave should pick up.
    pub profile_dirty: bool,
}

impl DispatchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_quit() -> Self {
        Self {
            quit: true,
            ..Self::default()
        }
    }

    pub fn with_status(event: StatusEvent) -> Self {
        Self {
            status: vec![event],
            ..Self::default()
        }
    }

    pub fn push_status(&mut self, event: StatusEvent) {
        self.status.push(event);
    }

    pub fn push_info(&mut self, message: impl Into<String>) {
        self.status.push(StatusEvent::Info(message.into()));
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.status.push(StatusEvent::Error(message.into()));
    }

    pub fn merge(&mut self, other: DispatchResult) {
        self.quit = self.quit || other.quit;
        self.status.extend(other.status);
        self.profile_dirty |= other.profile_dirty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_accumulates() {
        let mut a = DispatchResult::with_status(StatusEvent::Info("one".into()));
        let mut b = DispatchResult::with_quit();
        b.profile_dirty = true;
        b.push_error("two");
        a.merge(b);
        assert!(a.quit);
        assert!(a.profile_dirty);
        assert_eq!(a.status.len(), 2);
    }
}
