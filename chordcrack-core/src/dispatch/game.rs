//! Dispatch for the standard game and daily challenge.

use chordcrack_types::chord::STRING_NAMES;
use chordcrack_types::reduce::{game as game_reduce, profile as profile_reduce, AdvanceOutcome, GuessOutcome};
use chordcrack_types::{
    Chord, ChordId, DispatchResult, GameAction, GameState, HintTier, RoundPhase, StatusEvent,
};

use crate::achievements;
use crate::daily::{self, DailyResult};
use crate::history::HistoryEntry;
use crate::state::{AppState, SessionKind};

use super::helpers;
use super::side_effects::{push_round_audio, AudioSideEffect};

pub(super) fn dispatch_game(
    action: &GameAction,
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
) -> DispatchResult {
    let mut result = DispatchResult::none();

    match action {
        GameAction::Start => {
            let mut game = GameState::new(state.rounds_per_game);
            game.daily = None;
            state.session = SessionKind::Game(game);
            begin_next_round(state, effects, &mut result);
        }
        GameAction::StartDaily => {
            let day = daily::today();
            if let Some(prior) = state.daily_result(day) {
                result.push_status(StatusEvent::DailyAlreadyPlayed { score: prior.score });
                return result;
            }
            let mut game = GameState::new(state.rounds_per_game);
            game.daily = Some(chordcrack_types::game::DailyInfo { day });
            state.session = SessionKind::Game(game);
            result.push_info("Daily challenge — same chords for everyone today");
            begin_next_round(state, effects, &mut result);
        }
        GameAction::ReplayAudio => {
            replay_audio(state, effects, &mut result);
        }
        GameAction::Guess(chord) => {
            dispatch_guess(*chord, state, effects, &mut result);
        }
        GameAction::Advance => {
            dispatch_advance(state, effects, &mut result);
        }
        GameAction::Abandon => {
            if matches!(state.session, SessionKind::Game(_)) {
                state.session = SessionKind::Idle;
                effects.push(AudioSideEffect::Stop);
                result.push_info("Game abandoned");
            } else {
                result.push_error("No game to abandon");
            }
        }
    }

    result
}

/// Pick the next round's chord (daily-deterministic or rng-driven), install
/// it, and queue the first listen.
fn begin_next_round(
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    result: &mut DispatchResult,
) {
    let level = state.profile.level();
    let SessionKind::Game(game) = &mut state.session else {
        return;
    };
    let idx = game.round_index;
    let rounds = game.rounds_per_game;

    let (target, candidates) = match game.daily {
        Some(info) => {
            let target = daily::chord_for_round(info.day, idx, rounds);
            (target, daily::candidates_for_round(info.day, idx, target))
        }
        None => {
            let category = GameState::category_for_round(idx, rounds, level);
            let target = helpers::pick_chord(&mut state.rng, category);
            (target, helpers::candidate_set(&mut state.rng, target))
        }
    };

    game_reduce::begin_round(game, target, candidates);
    effects.push(AudioSideEffect::PlayChord {
        chord: target,
        tier: HintTier::FullStrum,
    });
    result.push_info(format!("Round {} of {} — listen and guess", idx + 1, rounds));
}

fn replay_audio(
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    result: &mut DispatchResult,
) {
    let SessionKind::Game(game) = &state.session else {
        result.push_error("No game in progress");
        return;
    };
    let (Some(round), RoundPhase::Playing) = (&game.round, game.phase) else {
        result.push_error("No round is accepting guesses");
        return;
    };
    push_round_audio(effects, round);
    describe_tier(round, result);
}

/// Status text for the current hint tier, including the choice list and the
/// revealed finger where those tiers apply.
fn describe_tier(round: &chordcrack_types::RoundState, result: &mut DispatchResult) {
    let tier = round.hint_tier();
    match tier {
        HintTier::AudioChoice => {
            let names: Vec<&str> = round
                .candidates
                .iter()
                .filter_map(|id| Chord::get(*id).map(|c| c.name))
                .collect();
            result.push_info(format!("It is one of: {}", names.join(", ")));
        }
        HintTier::FingerReveal => {
            if let Some((string, fret)) = round.revealed_finger {
                result.push_info(format!(
                    "Hint: a finger is on the {} string, fret {}",
                    STRING_NAMES[string], fret
                ));
            }
        }
        _ => result.push_info(format!("Hint tier: {}", tier.name())),
    }
}

fn dispatch_guess(
    chord: ChordId,
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    result: &mut DispatchResult,
) {
    let (outcome, mode, round_snapshot) = {
        let SessionKind::Game(game) = &mut state.session else {
            result.push_error("No game in progress");
            return;
        };
        let mode = game.mode();
        let outcome = game_reduce::guess(game, chord);
        (outcome, mode, game.round.clone())
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
                describe_tier(round, result);
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

fn dispatch_advance(
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    result: &mut DispatchResult,
) {
    let (outcome, summary) = {
        let SessionKind::Game(game) = &mut state.session else {
            result.push_error("No game in progress");
            return;
        };
        let outcome = game_reduce::advance(game);
        let correct = game.results.iter().filter(|r| r.correct).count() as u32;
        let flawless = !game.results.is_empty() && correct == game.results.len() as u32;
        (
            outcome,
            (game.board.score, correct, game.rounds_per_game, game.daily, flawless),
        )
    };

    match outcome {
        AdvanceOutcome::NotAnswered => result.push_error("Nothing to advance past"),
        AdvanceOutcome::NextRound => begin_next_round(state, effects, result),
        AdvanceOutcome::Finished => {
            let (score, correct, rounds, daily_info, flawless) = summary;
            result.push_status(StatusEvent::GameOver {
                score,
                correct,
                rounds,
            });
            profile_reduce::apply_game_end(&mut state.profile, score);

            let now = HistoryEntry::now_secs();
            let completed_daily = if let Some(info) = daily_info {
                state.daily_results.push(DailyResult {
                    day: info.day,
                    score,
                    correct,
                    rounds,
                });
                state.profile.record_daily(info.day);
                true
            } else {
                false
            };
            for achievement in achievements::evaluate_game_end(
                &mut state.achievements,
                completed_daily,
                flawless,
                now,
            ) {
                result.push_status(StatusEvent::AchievementUnlocked(achievement));
            }

            state.dirty = true;
            result.profile_dirty = true;
            effects.push(AudioSideEffect::Stop);
        }
    }
}
