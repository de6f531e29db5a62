//! Pure state-mutation reducers for the game sessions.
//!
//! These functions are the single source of truth for action → state
//! mutations. Dispatch in chordcrack-core calls into this module and turns
//! the returned outcomes into status events and audio side effects.
//!
//! Reducers are pure: they mutate game/profile state only. They do NOT:
//! - Construct DispatchResult or status events
//! - Pick chords (dispatch owns randomness)
//! - Persist anything
//! - Emit audio commands

pub mod game;
pub mod mixed;
pub mod practice;
pub mod profile;

use crate::game::ScoreBoard;
use crate::round::{GuessResult, HintTier, RoundPhase, RoundResult, RoundState};
use crate::ChordId;

/// Outcome of a guess against whichever session is live.
#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// No live round, or the session is not in the Playing phase.
    NotPlaying,
    /// Round won; the result carries base points and bonus. `streak` is the
    /// streak after this win.
    Correct { result: RoundResult, streak: u32 },
    /// Wrong with attempts remaining.
    Incorrect { attempts_left: u8, next_tier: HintTier },
    /// Wrong on the final attempt; the round is lost.
    RoundLost { result: RoundResult },
}

/// Outcome of advancing past an answered round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The session was not waiting on an advance.
    NotAnswered,
    /// Ready for the next round (round cleared, phase back to Waiting).
    NextRound,
    /// The session is finished.
    Finished,
}

/// Shared guess resolution over the (phase, round, board) triple every
/// session carries. On resolution the phase moves to Answered and the round
/// stays in place for the front end to inspect.
pub(crate) fn resolve_guess(
    phase: &mut RoundPhase,
    round: &mut Option<RoundState>,
    board: &mut ScoreBoard,
    guess: ChordId,
) -> GuessOutcome {
    if *phase != RoundPhase::Playing {
        return GuessOutcome::NotPlaying;
    }
    let Some(live) = round.as_mut() else {
        return GuessOutcome::NotPlaying;
    };

    match live.record_guess(guess) {
        GuessResult::Correct { attempt } => {
            let (points, bonus) = board.apply_correct(attempt);
            *phase = RoundPhase::Answered;
            GuessOutcome::Correct {
                result: RoundResult {
                    target: live.target,
                    correct: true,
                    attempts_used: attempt,
                    points,
                    bonus,
                    attempts: live.attempts.clone(),
                },
                streak: board.streak,
            }
        }
        GuessResult::Incorrect {
            attempts_left,
            next_tier,
        } => GuessOutcome::Incorrect {
            attempts_left,
            next_tier,
        },
        GuessResult::Exhausted => {
            board.apply_incorrect();
            *phase = RoundPhase::Answered;
            GuessOutcome::RoundLost {
                result: RoundResult {
                    target: live.target,
                    correct: false,
                    attempts_used: live.attempts.len() as u8,
                    points: 0,
                    bonus: 0,
                    attempts: live.attempts.clone(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::CATALOG;
    use crate::round::MAX_ATTEMPTS;

    #[test]
    fn guess_outside_playing_phase_is_rejected() {
        let mut phase = RoundPhase::Answered;
        let mut round = Some(RoundState::new(CATALOG[0].id, vec![]));
        let mut board = ScoreBoard::default();
        let before = round.clone();
        assert_eq!(
            resolve_guess(&mut phase, &mut round, &mut board, CATALOG[0].id),
            GuessOutcome::NotPlaying
        );
        assert_eq!(round, before);
        assert_eq!(board.score, 0);
    }

    #[test]
    fn winning_round_moves_to_answered_with_points() {
        let mut phase = RoundPhase::Playing;
        let mut round = Some(RoundState::new(CATALOG[0].id, vec![]));
        let mut board = ScoreBoard::default();

        match resolve_guess(&mut phase, &mut round, &mut board, CATALOG[0].id) {
            GuessOutcome::Correct { result, streak } => {
                assert_eq!(result.points, 60);
                assert_eq!(result.bonus, 0);
                assert_eq!(result.attempts_used, 1);
                assert_eq!(streak, 1);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(phase, RoundPhase::Answered);
    }

    #[test]
    fn exhaustion_resets_streak_and_answers_round() {
        let mut phase = RoundPhase::Playing;
        let mut round = Some(RoundState::new(CATALOG[0].id, vec![]));
        let mut board = ScoreBoard {
            score: 100,
            streak: 3,
            best_streak: 3,
        };

        for _ in 0..MAX_ATTEMPTS - 1 {
            assert!(matches!(
                resolve_guess(&mut phase, &mut round, &mut board, CATALOG[1].id),
                GuessOutcome::Incorrect { .. }
            ));
        }
        match resolve_guess(&mut phase, &mut round, &mut board, CATALOG[1].id) {
            GuessOutcome::RoundLost { result } => {
                assert!(!result.correct);
                assert_eq!(result.points, 0);
                assert_eq!(result.attempts_used, MAX_ATTEMPTS);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(board.streak, 0);
        // Score never decreases
        assert_eq!(board.score, 100);
        assert_eq!(phase, RoundPhase::Answered);
    }
}
