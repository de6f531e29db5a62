//! Reducers for the standard game and daily challenge.

use super::{resolve_guess, AdvanceOutcome, GuessOutcome};
use crate::game::GameState;
use crate::round::{RoundPhase, RoundState};
use crate::ChordId;

/// Install the next round and start playing. Target and candidates are
/// chosen by dispatch (randomness stays out of reducers).
pub fn begin_round(game: &mut GameState, target: ChordId, candidates: Vec<ChordId>) {
    game.round = Some(RoundState::new(target, candidates));
    game.phase = RoundPhase::Playing;
}

pub fn guess(game: &mut GameState, chord: ChordId) -> GuessOutcome {
    let outcome = resolve_guess(&mut game.phase, &mut game.round, &mut game.board, chord);
    if let GuessOutcome::Correct { ref result, .. } | GuessOutcome::RoundLost { ref result } =
        outcome
    {
        game.results.push(result.clone());
    }
    outcome
}

pub fn advance(game: &mut GameState) -> AdvanceOutcome {
    if game.phase != RoundPhase::Answered {
        return AdvanceOutcome::NotAnswered;
    }
    if game.is_last_round() {
        game.phase = RoundPhase::GameOver;
        game.round = None;
        AdvanceOutcome::Finished
    } else {
        game.round_index += 1;
        game.round = None;
        game.phase = RoundPhase::Waiting;
        AdvanceOutcome::NextRound
    }
}
