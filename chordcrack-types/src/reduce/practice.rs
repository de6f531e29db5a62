//! Reducers for single-category practice.

use super::{resolve_guess, AdvanceOutcome, GuessOutcome};
use crate::game::PracticeState;
use crate::round::{RoundPhase, RoundState};
use crate::ChordId;

pub fn begin_round(practice: &mut PracticeState, target: ChordId, candidates: Vec<ChordId>) {
    practice.round = Some(RoundState::new(target, candidates));
    practice.phase = RoundPhase::Playing;
}

pub fn guess(practice: &mut PracticeState, chord: ChordId) -> GuessOutcome {
    let outcome = resolve_guess(
        &mut practice.phase,
        &mut practice.round,
        &mut practice.board,
        chord,
    );
    match outcome {
        GuessOutcome::Correct { .. } => {
            practice.rounds_played += 1;
            practice.correct += 1;
        }
        GuessOutcome::RoundLost { .. } => {
            practice.rounds_played += 1;
        }
        _ => {}
    }
    outcome
}

/// Practice is endless: advance always readies another round until stopped.
pub fn advance(practice: &mut PracticeState) -> AdvanceOutcome {
    if practice.phase != RoundPhase::Answered {
        return AdvanceOutcome::NotAnswered;
    }
    practice.round = None;
    practice.phase = RoundPhase::Waiting;
    AdvanceOutcome::NextRound
}

pub fn stop(practice: &mut PracticeState) {
    practice.round = None;
    practice.phase = RoundPhase::GameOver;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::{Chord, ChordCategory};
    use crate::round::MAX_ATTEMPTS;

    #[test]
    fn practice_counts_rounds_and_correct() {
        let open = Chord::in_category(ChordCategory::Open);
        let mut practice = PracticeState::new(ChordCategory::Open);

        begin_round(&mut practice, open[0].id, vec![]);
        guess(&mut practice, open[0].id);
        assert_eq!((practice.rounds_played, practice.correct), (1, 1));
        assert_eq!(advance(&mut practice), AdvanceOutcome::NextRound);

        begin_round(&mut practice, open[0].id, vec![]);
        for _ in 0..MAX_ATTEMPTS {
            guess(&mut practice, open[1].id);
        }
        assert_eq!((practice.rounds_played, practice.correct), (2, 1));
    }
}
