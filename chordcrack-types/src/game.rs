//! Session containers for the three play modes: the standard game, single-
//! category practice, and mixed practice.

use serde::{Deserialize, Serialize};

use crate::chord::ChordCategory;
use crate::round::{RoundPhase, RoundResult, RoundState};

/// Which session produced a round (recorded in history).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Standard,
    Daily,
    Practice(ChordCategory),
    Mixed,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Standard => "standard",
            GameMode::Daily => "daily",
            GameMode::Practice(_) => "practice",
            GameMode::Mixed => "mixed",
        }
    }
}

/// Score, streak, and best-streak counters for one session.
/// All counters are unsigned; score can never go below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
}

impl ScoreBoard {
    /// Apply a correct round finishing on `attempt`. Returns (base, bonus).
    /// The bonus is computed from the streak *before* this round, so the
    /// first correct round of a run never carries a bonus.
    pub fn apply_correct(&mut self, attempt: u8) -> (u32, u32) {
        let base = crate::round::base_points(attempt);
        let bonus = crate::round::streak_bonus(self.streak);
        self.score += base + bonus;
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
        (base, bonus)
    }

    /// Streak resets to zero on any incorrect round.
    pub fn apply_incorrect(&mut self) {
        self.streak = 0;
    }
}

/// The standard game: a fixed sequence of rounds walking the unlocked
/// categories from easiest to hardest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: RoundPhase,
    pub round: Option<RoundState>,
    /// 0-based index of the current (or next) round.
    pub round_index: u32,
    pub rounds_per_game: u32,
    pub board: ScoreBoard,
    pub results: Vec<RoundResult>,
    /// Set when this session is the daily challenge.
    pub daily: Option<DailyInfo>,
}

/// Daily-challenge tag on a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInfo {
    /// Days since the Unix epoch.
    pub day: u64,
}

impl GameState {
    pub fn new(rounds_per_game: u32) -> Self {
        Self {
            phase: RoundPhase::Waiting,
            round: None,
            round_index: 0,
            rounds_per_game: rounds_per_game.max(1),
            board: ScoreBoard::default(),
            results: Vec::new(),
            daily: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        if self.daily.is_some() {
            GameMode::Daily
        } else {
            GameMode::Standard
        }
    }

    /// Category for a given round index: the unlocked categories (by player
    /// level) are spread across the round sequence in unlock order.
    pub fn category_for_round(round_index: u32, rounds_per_game: u32, level: u32) -> ChordCategory {
        let unlocked: Vec<ChordCategory> = ChordCategory::ALL
            .into_iter()
            .filter(|c| c.unlock_level() <= level.max(1))
            .collect();
        let rounds = rounds_per_game.max(1);
        let idx = (round_index.min(rounds - 1) as usize * unlocked.len()) / rounds as usize;
        unlocked[idx.min(unlocked.len() - 1)]
    }

    pub fn is_last_round(&self) -> bool {
        self.round_index + 1 >= self.rounds_per_game
    }
}

/// Endless single-category practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeState {
    pub category: ChordCategory,
    pub phase: RoundPhase,
    pub round: Option<RoundState>,
    pub board: ScoreBoard,
    pub rounds_played: u32,
    pub correct: u32,
}

impl PracticeState {
    pub fn new(category: ChordCategory) -> Self {
        Self {
            category,
            phase: RoundPhase::Waiting,
            round: None,
            board: ScoreBoard::default(),
            rounds_played: 0,
            correct: 0,
        }
    }
}

/// Endless practice drawing uniformly from every unlocked category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedPracticeState {
    pub phase: RoundPhase,
    pub round: Option<RoundState>,
    pub board: ScoreBoard,
    pub rounds_played: u32,
    pub correct: u32,
    /// (correct, total) per category, aligned with `ChordCategory::ALL`.
    pub tallies: [(u32, u32); 5],
}

impl MixedPracticeState {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Waiting,
            round: None,
            board: ScoreBoard::default(),
            rounds_played: 0,
            correct: 0,
            tallies: [(0, 0); 5],
        }
    }

    pub fn tally(&mut self, category: ChordCategory, correct: bool) {
        let idx = ChordCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        self.tallies[idx].1 += 1;
        if correct {
            self.tallies[idx].0 += 1;
        }
    }
}

impl Default for MixedPracticeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoreboard_streak_and_bonus() {
        let mut board = ScoreBoard::default();
        let (base, bonus) = board.apply_correct(1);
        assert_eq!((base, bonus), (60, 0));
        assert_eq!(board.streak, 1);

        let (base, bonus) = board.apply_correct(3);
        assert_eq!((base, bonus), (40, 5));
        assert_eq!(board.score, 60 + 40 + 5);
        assert_eq!(board.streak, 2);

        board.apply_incorrect();
        assert_eq!(board.streak, 0);
        assert_eq!(board.best_streak, 2);

        // Streak restarts without carrying a bonus
        let (_, bonus) = board.apply_correct(1);
        assert_eq!(bonus, 0);
    }

    #[test]
    fn category_progression_at_level_one_stays_open() {
        for i in 0..5 {
            assert_eq!(
                GameState::category_for_round(i, 5, 1),
                ChordCategory::Open
            );
        }
    }

    #[test]
    fn category_progression_walks_unlocked_categories() {
        // Level 5 unlocks everything; first round is easiest, last is hardest.
        assert_eq!(GameState::category_for_round(0, 5, 5), ChordCategory::Open);
        assert_eq!(GameState::category_for_round(4, 5, 5), ChordCategory::Power);
        // Monotone over the round sequence
        let mut last = 0;
        for i in 0..5 {
            let cat = GameState::category_for_round(i, 5, 5);
            let pos = ChordCategory::ALL.iter().position(|c| *c == cat).unwrap();
            assert!(pos >= last);
            last = pos;
        }
    }

    #[test]
    fn mixed_tallies_track_per_category() {
        let mut mixed = MixedPracticeState::new();
        mixed.tally(ChordCategory::Open, true);
        mixed.tally(ChordCategory::Open, false);
        mixed.tally(ChordCategory::Barre, true);
        assert_eq!(mixed.tallies[0], (1, 2));
        assert_eq!(mixed.tallies[2], (1, 1));
    }
}
