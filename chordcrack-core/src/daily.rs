//! Deterministic daily-challenge selection.
//!
//! The daily sequence is a pure function of the day number (days since the
//! Unix epoch), so every player hears the same chords on the same day. The
//! daily progression always walks the full category ladder regardless of
//! player level.

use serde::{Deserialize, Serialize};

use chordcrack_types::{Chord, ChordId, GameState};

use crate::dispatch::helpers::candidate_set;
use crate::rng::SplitMix64;

/// Highest unlock level; the daily ladder uses every category.
const DAILY_LEVEL: u32 = 5;

/// Recorded outcome of one day's challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResult {
    pub day: u64,
    pub score: u32,
    pub correct: u32,
    pub rounds: u32,
}

/// Days since the Unix epoch, for today.
pub fn today() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        / 86_400
}

fn round_rng(day: u64, round_index: u32) -> SplitMix64 {
    // Mix day and round so consecutive rounds decorrelate.
    SplitMix64::new(day.wrapping_mul(0xA24BAED4963EE407) ^ (round_index as u64 + 1))
}

/// Target chord for one round of the given day's challenge.
pub fn chord_for_round(day: u64, round_index: u32, rounds_per_game: u32) -> ChordId {
    let category = GameState::category_for_round(round_index, rounds_per_game, DAILY_LEVEL);
    let pool = Chord::in_category(category);
    let mut rng = round_rng(day, round_index);
    rng.choose(&pool).map(|c| c.id).unwrap_or(Chord::all()[0].id)
}

/// Candidate set (target + decoys, shuffled) for the audio-choice tier of
/// one daily round. Deterministic per day and round.
pub fn candidates_for_round(day: u64, round_index: u32, target: ChordId) -> Vec<ChordId> {
    // Offset the stream so candidates differ from the target draw.
    let mut rng = round_rng(day, round_index ^ 0x5151);
    candidate_set(&mut rng, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_a_pure_function_of_the_day() {
        for round in 0..5 {
            assert_eq!(
                chord_for_round(19_700, round, 5),
                chord_for_round(19_700, round, 5)
            );
            assert_eq!(
                candidates_for_round(19_700, round, chord_for_round(19_700, round, 5)),
                candidates_for_round(19_700, round, chord_for_round(19_700, round, 5))
            );
        }
    }

    #[test]
    fn different_days_differ_somewhere() {
        let a: Vec<ChordId> = (0..5).map(|r| chord_for_round(100, r, 5)).collect();
        let b: Vec<ChordId> = (0..5).map(|r| chord_for_round(101, r, 5)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn daily_walks_the_full_ladder() {
        // First round is an open chord; last round is a power chord.
        let first = Chord::get(chord_for_round(42, 0, 5)).unwrap();
        let last = Chord::get(chord_for_round(42, 4, 5)).unwrap();
        assert_eq!(first.category, chordcrack_types::ChordCategory::Open);
        assert_eq!(last.category, chordcrack_types::ChordCategory::Power);
    }
}
