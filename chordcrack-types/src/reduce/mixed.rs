//! Reducers for mixed practice (all unlocked categories).

use super::{resolve_guess, AdvanceOutcome, GuessOutcome};
use crate::chord::Chord;
use crate::game::MixedPracticeState;
use crate::round::{RoundPhase, RoundState};
use crate::ChordId;

pub fn begin_round(mixed: &mut MixedPracticeState, target: ChordId, candidates: Vec<ChordId>) {
    mixed.round = Some(RoundState::new(target, candidates));
    mixed.phase = RoundPhase::Playing;
}

pub fn guess(mixed: &mut MixedPracticeState, chord: ChordId) -> GuessOutcome {
    let outcome = resolve_guess(&mut mixed.phase, &mut mixed.round, &mut mixed.board, chord);
    let resolved_target = match outcome {
        GuessOutcome::Correct { ref result, .. } => Some((result.target, true)),
        GuessOutcome::RoundLost { ref result } => Some((result.target, false)),
        _ => None,
    };
    if let Some((target, correct)) = resolved_target {
        mixed.rounds_played += 1;
        if correct {
            mixed.correct += 1;
        }
        if let Some(chord) = Chord::get(target) {
            mixed.tally(chord.category, correct);
        }
    }
    outcome
}

pub fn advance(mixed: &mut MixedPracticeState) -> AdvanceOutcome {
    if mixed.phase != RoundPhase::Answered {
        return AdvanceOutcome::NotAnswered;
    }
    mixed.round = None;
    mixed.phase = RoundPhase::Waiting;
    AdvanceOutcome::NextRound
}

pub fn stop(mixed: &mut MixedPracticeState) {
    mixed.round = None;
    mixed.phase = RoundPhase::GameOver;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{ChordCategory, CATALOG};

    #[test]
    fn mixed_tallies_resolved_category() {
        let mut mixed = MixedPracticeState::new();
        // CATALOG[17] is F, a barre chord
        begin_round(&mut mixed, CATALOG[17].id, vec![]);
        guess(&mut mixed, CATALOG[17].id);
        let barre_idx = ChordCategory::ALL
            .iter()
            .position(|c| *c == ChordCategory::Barre)
            .unwrap();
        assert_eq!(mixed.tallies[barre_idx], (1, 1));
        assert_eq!(mixed.rounds_played, 1);
    }
}
