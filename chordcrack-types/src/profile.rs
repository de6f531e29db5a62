//! Player profile, level math, and lifetime statistics.

use serde::{Deserialize, Serialize};

use crate::chord::ChordCategory;

/// Experience required per level step.
pub const XP_PER_LEVEL: u32 = 500;

/// Level for a lifetime xp total. Level 1 starts at 0 xp; each level costs
/// another `XP_PER_LEVEL`.
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Minimum xp needed to hold `level`.
pub fn xp_for_level(level: u32) -> u32 {
    level.saturating_sub(1) * XP_PER_LEVEL
}

/// Persistent player profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileState {
    pub username: String,
    /// Lifetime points (base + bonus) across all modes.
    pub xp: u32,
    pub games_played: u32,
    pub best_streak: u32,
    pub best_game_score: u32,
    /// Consecutive calendar days with a completed daily challenge.
    pub daily_streak: u32,
    /// Last daily day completed (days since the Unix epoch).
    pub last_daily_day: Option<u64>,
}

impl ProfileState {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            xp: 0,
            games_played: 0,
            best_streak: 0,
            best_game_score: 0,
            daily_streak: 0,
            last_daily_day: None,
        }
    }

    pub fn level(&self) -> u32 {
        level_for_xp(self.xp)
    }

    /// Progress into the current level as (earned, needed).
    pub fn level_progress(&self) -> (u32, u32) {
        (self.xp - xp_for_level(self.level()), XP_PER_LEVEL)
    }

    pub fn award(&mut self, points: u32) {
        self.xp += points;
    }

    /// Record a completed daily challenge for `day`; maintains the
    /// consecutive-day streak.
    pub fn record_daily(&mut self, day: u64) {
        match self.last_daily_day {
            Some(last) if last == day => return,
            Some(last) if day == last + 1 => self.daily_streak += 1,
            _ => self.daily_streak = 1,
        }
        self.last_daily_day = Some(day);
    }
}

impl Default for ProfileState {
    fn default() -> Self {
        Self::new("player")
    }
}

/// Lifetime per-category and overall round tallies.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsState {
    /// (correct, total) aligned with `ChordCategory::ALL`.
    pub by_category: [(u32, u32); 5],
    pub rounds_played: u32,
    pub rounds_correct: u32,
}

impl StatsState {
    pub fn record(&mut self, category: ChordCategory, correct: bool) {
        let idx = ChordCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        self.by_category[idx].1 += 1;
        self.rounds_played += 1;
        if correct {
            self.by_category[idx].0 += 1;
            self.rounds_correct += 1;
        }
    }

    pub fn category(&self, category: ChordCategory) -> (u32, u32) {
        let idx = ChordCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        self.by_category[idx]
    }

    /// Overall accuracy in [0, 1]; zero before any round is played.
    pub fn accuracy(&self) -> f32 {
        if self.rounds_played == 0 {
            0.0
        } else {
            self.rounds_correct as f32 / self.rounds_played as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(499), 1);
        assert_eq!(level_for_xp(500), 2);
        assert_eq!(level_for_xp(2499), 5);
        assert_eq!(xp_for_level(1), 0);
        assert_eq!(xp_for_level(3), 1000);
    }

    #[test]
    fn level_progress_resets_each_level() {
        let mut profile = ProfileState::default();
        profile.award(520);
        assert_eq!(profile.level(), 2);
        assert_eq!(profile.level_progress(), (20, 500));
    }

    #[test]
    fn daily_streak_requires_consecutive_days() {
        let mut profile = ProfileState::default();
        profile.record_daily(100);
        assert_eq!(profile.daily_streak, 1);
        profile.record_daily(101);
        assert_eq!(profile.daily_streak, 2);
        // Same day is idempotent
        profile.record_daily(101);
        assert_eq!(profile.daily_streak, 2);
        // A gap resets
        profile.record_daily(105);
        assert_eq!(profile.daily_streak, 1);
    }

    #[test]
    fn stats_accuracy() {
        let mut stats = StatsState::default();
        stats.record(ChordCategory::Open, true);
        stats.record(ChordCategory::Open, false);
        stats.record(ChordCategory::Barre, true);
        assert_eq!(stats.category(ChordCategory::Open), (1, 2));
        assert_eq!(stats.rounds_played, 3);
        assert!((stats.accuracy() - 2.0 / 3.0).abs() < 1e-6);
    }
}
