//! Static achievement list and the unlocked-set state.

use serde::{Deserialize, Serialize};

/// Every achievement the game can award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    FirstCorrect,
    PerfectRound,
    Streak5,
    Streak10,
    Rounds50,
    Correct100,
    Level3,
    Level5,
    DailyDone,
    FlawlessGame,
}

impl Achievement {
    pub const ALL: [Achievement; 10] = [
        Achievement::FirstCorrect,
        Achievement::PerfectRound,
        Achievement::Streak5,
        Achievement::Streak10,
        Achievement::Rounds50,
        Achievement::Correct100,
        Achievement::Level3,
        Achievement::Level5,
        Achievement::DailyDone,
        Achievement::FlawlessGame,
    ];

    /// Stable key used in persistence.
    pub fn key(&self) -> &'static str {
        match self {
            Achievement::FirstCorrect => "first_correct",
            Achievement::PerfectRound => "perfect_round",
            Achievement::Streak5 => "streak_5",
            Achievement::Streak10 => "streak_10",
            Achievement::Rounds50 => "rounds_50",
            Achievement::Correct100 => "correct_100",
            Achievement::Level3 => "level_3",
            Achievement::Level5 => "level_5",
            Achievement::DailyDone => "daily_done",
            Achievement::FlawlessGame => "flawless_game",
        }
    }

    pub fn from_key(key: &str) -> Option<Achievement> {
        Achievement::ALL.into_iter().find(|a| a.key() == key)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstCorrect => "First Blood",
            Achievement::PerfectRound => "One Listen",
            Achievement::Streak5 => "On a Roll",
            Achievement::Streak10 => "Golden Ear",
            Achievement::Rounds50 => "Regular",
            Achievement::Correct100 => "Centurion",
            Achievement::Level3 => "Moving Up",
            Achievement::Level5 => "Fretboard Scholar",
            Achievement::DailyDone => "Daily Driver",
            Achievement::FlawlessGame => "Clean Sweep",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstCorrect => "Guess your first chord correctly",
            Achievement::PerfectRound => "Name a chord on the first attempt",
            Achievement::Streak5 => "Win 5 rounds in a row",
            Achievement::Streak10 => "Win 10 rounds in a row",
            Achievement::Rounds50 => "Play 50 rounds",
            Achievement::Correct100 => "Answer 100 rounds correctly",
            Achievement::Level3 => "Reach level 3",
            Achievement::Level5 => "Reach level 5",
            Achievement::DailyDone => "Complete a daily challenge",
            Achievement::FlawlessGame => "Finish a game without missing a round",
        }
    }
}

/// Unlocked achievements with unlock timestamps (seconds since the epoch).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AchievementState {
    pub unlocked: Vec<(Achievement, u64)>,
}

impl AchievementState {
    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.iter().any(|(a, _)| *a == achievement)
    }

    /// Unlock if not already held. Returns true when newly unlocked.
    pub fn unlock(&mut self, achievement: Achievement, at_epoch_secs: u64) -> bool {
        if self.is_unlocked(achievement) {
            return false;
        }
        self.unlocked.push((achievement, at_epoch_secs));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for a in Achievement::ALL {
            assert_eq!(Achievement::from_key(a.key()), Some(a));
        }
        assert_eq!(Achievement::from_key("nope"), None);
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut state = AchievementState::default();
        assert!(state.unlock(Achievement::FirstCorrect, 1000));
        assert!(!state.unlock(Achievement::FirstCorrect, 2000));
        assert_eq!(state.unlocked.len(), 1);
        assert_eq!(state.unlocked[0].1, 1000);
    }
}
