//! Dispatch for single-category and mixed practice.

use chordcrack_types::reduce::{mixed as mixed_reduce, practice as practice_reduce, AdvanceOutcome, GuessOutcome};
use chordcrack_types::{
    Chord, ChordCategory, ChordId, DispatchResult, GameMode, HintTier, MixedPracticeState,
    PracticeAction, PracticeState, RoundState, StatusEvent,
};

use crate::state::{AppState, SessionKind};

use super::helpers;
use super::side_effects::{push_round_audio, AudioSideEffect};

pub(super) fn dispatch_practice(
    action: &PracticeAction,
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
) -> DispatchResult {
    let mut result = DispatchResult::none();

    match action {
        PracticeAction::Start(category) => {
            let unlocked = category.unlock_level() <= state.profile.level();
            if !unlocked {
                result.push_error(format!(
                    "{} chords unlock at level {}",
                    category,
                    category.unlock_level()
                ));
                return result;
            }
            state.session = SessionKind::Practice(PracticeState::new(*category));
            result.push_info(format!("Practicing {} chords", category));
            begin_next_round(state, effects);
        }
        PracticeAction::StartMixed => {
            state.session = SessionKind::Mixed(MixedPracticeState::new());
            result.push_info("Mixed practice across unlocked categories");
            begin_next_round(state, effects);
        }
        PracticeAction::ReplayAudio => match live_round(state) {
            Some(round) => {
                let round = round.clone();
                push_round_audio(effects, &round);
            }
            None => result.push_error("No round is accepting guesses"),
        },
        PracticeAction::Guess(chord) => dispatch_guess(*chord, state, effects, &mut result),
        PracticeAction::Advance => {
            let outcome = match &mut state.session {
                SessionKind::Practice(p) => practice_reduce::advance(p),
                SessionKind::Mixed(m) => mixed_reduce::advance(m),
                _ => {
                    result.push_error("No practice session");
                    return result;
                }
            };
            match outcome {
                AdvanceOutcome::NotAnswered => result.push_error("Nothing to advance past"),
                _ => begin_next_round(state, effects),
            }
        }
        PracticeAction::Stop => {
            let summary = match &mut state.session {
                SessionKind::Practice(p) => {
                    practice_reduce::stop(p);
                    Some((p.correct, p.rounds_played, p.board.score))
                }
                SessionKind::Mixed(m) => {
                    mixed_reduce::stop(m);
                    Some((m.correct, m.rounds_played, m.board.score))
                }
                _ => None,
            };
            match summary {
                Some((correct, rounds, score)) => {
                    result.push_status(StatusEvent::GameOver {
                        score,
                        correct,
                        rounds,
                    });
                    state.session = SessionKind::Idle;
                    effects.push(AudioSideEffect::Stop);
                }
                None => result.push_error("No practice session"),
            }
        }
    }

    result
}

fn live_round(state: &AppState) -> Option<&RoundState> {
    match &state.session {
        SessionKind::Practice(p) => p.round.as_ref(),
        SessionKind::Mixed(m) => m.round.as_ref(),
        _ => None,
    }
}

/// Pick the next practice chord and install it. Mixed practice draws the
/// category uniformly from those the player level has unlocked.
fn begin_next_round(state: &mut AppState, effects: &mut Vec<AudioSideEffect>) {
    let level = state.profile.level();
    let category = match &state.session {
        SessionKind::Practice(p) => p.category,
        SessionKind::Mixed(_) => {
            let unlocked: Vec<ChordCategory> = ChordCategory::ALL
                .into_iter()
                .filter(|c| c.unlock_level() <= level.max(1))
                .collect();
            *state.rng.choose(&unlocked).unwrap_or(&ChordCategory::Open)
        }
        _ => return,
    };

    let target = helpers::pick_chord(&mut state.rng, category);
    let candidates = helpers::candidate_set(&mut state.rng, target);
    match &mut state.session {
        SessionKind::Practice(p) => practice_reduce::begin_round(p, target, candidates),
        SessionKind::Mixed(m) => mixed_reduce::begin_round(m, target, candidates),
        _ => return,
    }
    effects.push(AudioSideEffect::PlayChord {
        chord: target,
        tier: HintTier::FullStrum,
    });
}

fn dispatch_guess(
    chord: ChordId,
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    result: &mut DispatchResult,
) {
    let (outcome, mode, round_snapshot) = match &mut state.session {
        SessionKind::Practice(p) => (
            practice_reduce::guess(p, chord),
            GameMode::Practice(p.category),
            p.round.clone(),
        ),
        SessionKind::Mixed(m) => (mixed_reduce::guess(m, chord), GameMode::Mixed, m.round.clone()),
        _ => {
            result.push_error("No practice session");
            return;
        }
    };

    match outcome {
        GuessOutcome::NotPlaying => result.push_error("No round is accepting guesses"),
        GuessOutcome::Correct {
            result: round_result,
            streak,
        } => {
            result.push_status(StatusEvent::RoundWon {
                points: round_result.points,
                bonus: round_result.bonus,
                attempt: round_result.attempts_used,
                streak,
            });
            helpers::resolve_round(state, &round_result, streak, mode, result);
        }
        GuessOutcome::Incorrect {
            attempts_left,
            next_tier,
        } => {
            let guessed = Chord::get(chord).map(|c| c.name).unwrap_or("that");
            result.push_info(format!(
                "Not {}. {} attempts left — next hint: {}",
                guessed,
                attempts_left,
                next_tier.name()
            ));
            if let Some(round) = round_snapshot.as_ref() {
                push_round_audio(effects, round);
            }
        }
        GuessOutcome::RoundLost {
            result: round_result,
        } => {
            result.push_status(StatusEvent::RoundLost {
                answer: round_result.target,
            });
            helpers::resolve_round(state, &round_result, 0, mode, result);
        }
    }
}
