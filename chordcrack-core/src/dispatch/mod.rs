mod audio_feedback;
mod game;
pub mod helpers;
mod practice;
mod session;
pub mod side_effects;

pub use side_effects::{push_round_audio, AudioSideEffect};

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::action::{Action, DispatchResult, IoFeedback, PracticeAction};
use crate::state::AppState;

/// Default path for the profile database.
pub fn default_profile_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home)
            .join(".config")
            .join("chordcrack")
            .join("profile.sqlite")
    } else {
        PathBuf::from("profile.sqlite")
    }
}

/// Dispatch an action. Returns a DispatchResult describing status events for
/// the front end.
///
/// Audio operations are collected into `effects` rather than executed
/// inline; the caller applies them to its AudioHandle after dispatch
/// returns. Save/load run on spawned threads and complete through `io_tx`.
pub fn dispatch_action(
    action: &Action,
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    io_tx: &Sender<IoFeedback>,
) -> DispatchResult {
    match action {
        Action::Quit => DispatchResult::with_quit(),
        Action::Game(a) => game::dispatch_game(a, state, effects),
        Action::Practice(a) => practice::dispatch_practice(a, state, effects),
        Action::Session(a) => session::dispatch_session(a, state, effects, io_tx),
        Action::AudioFeedback(f) => audio_feedback::dispatch_audio_feedback(f, state),
        Action::None => DispatchResult::none(),
    }
}

/// Fold an async save/load completion back into state. Stale completions
/// (superseded by a newer request) are dropped.
pub fn apply_io_feedback(feedback: IoFeedback, state: &mut AppState) -> DispatchResult {
    let mut result = DispatchResult::none();
    match feedback {
        IoFeedback::SaveComplete { id, path, result: res } => {
            if !state.io.generation.is_current_save(id) {
                return result;
            }
            state.io.save_in_progress = false;
            match res {
                Ok(name) => {
                    state.dirty = false;
                    result.push_info(format!("Saved {}", name));
                }
                Err(e) => {
                    log::warn!(target: "io", "save to {} failed: {}", path.display(), e);
                    state.io.last_io_error = Some(e.clone());
                    result.push_error(format!("Save failed: {}", e));
                }
            }
        }
        IoFeedback::LoadComplete { id, path, result: res } => {
            if !state.io.generation.is_current_load(id) {
                return result;
            }
            state.io.load_in_progress = false;
            match res {
                Ok((bundle, name)) => {
                    state.apply_loaded(bundle);
                    result.push_info(format!(
                        "Loaded {} ({}, level {})",
                        name,
                        state.profile.username,
                        state.profile.level()
                    ));
                }
                Err(e) => {
                    log::warn!(target: "io", "load from {} failed: {}", path.display(), e);
                    state.io.last_io_error = Some(e.clone());
                    result.push_error(format!("Load failed: {}", e));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{GameAction, SessionAction, StatusEvent};
    use crate::config::Config;
    use crate::state::SessionKind;
    use chordcrack_types::{Chord, HintTier, RoundPhase};

    fn test_state() -> AppState {
        let mut state = AppState::new_with_defaults(&Config::load());
        state.rng = crate::rng::SplitMix64::new(1234);
        state
    }

    fn dispatch(action: Action, state: &mut AppState) -> (DispatchResult, Vec<AudioSideEffect>) {
        let (io_tx, _io_rx) = std::sync::mpsc::channel();
        let mut effects = Vec::new();
        let result = dispatch_action(&action, state, &mut effects, &io_tx);
        (result, effects)
    }

    fn live_target(state: &AppState) -> chordcrack_types::ChordId {
        match &state.session {
            SessionKind::Game(g) => g.round.as_ref().unwrap().target,
            SessionKind::Practice(p) => p.round.as_ref().unwrap().target,
            SessionKind::Mixed(m) => m.round.as_ref().unwrap().target,
            SessionKind::Idle => panic!("no session"),
        }
    }

    #[test]
    fn starting_a_game_queues_the_first_listen() {
        let mut state = test_state();
        let (result, effects) = dispatch(Action::Game(GameAction::Start), &mut state);
        assert!(matches!(
            effects.as_slice(),
            [AudioSideEffect::PlayChord {
                tier: HintTier::FullStrum,
                ..
            }]
        ));
        assert!(result
            .status
            .iter()
            .any(|s| matches!(s, StatusEvent::Info(_))));
        assert_eq!(state.session.phase(), RoundPhase::Playing);
    }

    #[test]
    fn full_game_reaches_game_over_and_updates_profile() {
        let mut state = test_state();
        dispatch(Action::Game(GameAction::Start), &mut state);

        for round in 0..state.rounds_per_game {
            let target = live_target(&state);
            let (result, _) = dispatch(Action::Game(GameAction::Guess(target)), &mut state);
            assert!(result
                .status
                .iter()
                .any(|s| matches!(s, StatusEvent::RoundWon { .. })));

            let (result, _) = dispatch(Action::Game(GameAction::Advance), &mut state);
            if round + 1 == state.rounds_per_game {
                assert!(result
                    .status
                    .iter()
                    .any(|s| matches!(s, StatusEvent::GameOver { .. })));
            }
        }

        assert_eq!(state.session.phase(), RoundPhase::GameOver);
        assert_eq!(state.profile.games_played, 1);
        assert!(state.profile.xp > 0);
        assert_eq!(state.history.len() as u32, state.rounds_per_game);
        assert!(state.dirty);
    }

    #[test]
    fn wrong_guesses_escalate_hints_and_replay_audio() {
        let mut state = test_state();
        dispatch(Action::Game(GameAction::Start), &mut state);
        let target = live_target(&state);
        let wrong = Chord::all()
            .iter()
            .find(|c| c.id != target)
            .unwrap()
            .id;

        // Attempts 1-4 wrong: next tiers are full, slow, split, choice
        let mut tiers = Vec::new();
        for _ in 0..4 {
            let (_, effects) = dispatch(Action::Game(GameAction::Guess(wrong)), &mut state);
            tiers.push(effects.last().cloned().unwrap());
        }
        assert!(matches!(
            tiers[0],
            AudioSideEffect::PlayChord {
                tier: HintTier::FullStrum,
                ..
            }
        ));
        assert!(matches!(
            tiers[1],
            AudioSideEffect::PlayChord {
                tier: HintTier::SlowStrum,
                ..
            }
        ));
        assert!(matches!(
            tiers[2],
            AudioSideEffect::PlayChord {
                tier: HintTier::SplitStrings,
                ..
            }
        ));
        assert!(matches!(tiers[3], AudioSideEffect::PlayCandidates { .. }));
    }

    #[test]
    fn guess_after_round_resolution_is_rejected() {
        let mut state = test_state();
        dispatch(Action::Game(GameAction::Start), &mut state);
        let target = live_target(&state);
        dispatch(Action::Game(GameAction::Guess(target)), &mut state);

        let (result, _) = dispatch(Action::Game(GameAction::Guess(target)), &mut state);
        assert!(result
            .status
            .iter()
            .any(|s| matches!(s, StatusEvent::Error(_))));
    }

    #[test]
    fn daily_replay_reports_existing_result() {
        let mut state = test_state();
        state.daily_results.push(crate::daily::DailyResult {
            day: crate::daily::today(),
            score: 123,
            correct: 3,
            rounds: 5,
        });
        let (result, effects) = dispatch(Action::Game(GameAction::StartDaily), &mut state);
        assert!(effects.is_empty());
        assert!(result
            .status
            .iter()
            .any(|s| matches!(s, StatusEvent::DailyAlreadyPlayed { score: 123 })));
        assert!(matches!(state.session, SessionKind::Idle));
    }

    #[test]
    fn practice_stop_summarizes_session() {
        let mut state = test_state();
        dispatch(
            Action::Practice(PracticeAction::Start(
                chordcrack_types::ChordCategory::Open,
            )),
            &mut state,
        );
        let target = live_target(&state);
        dispatch(Action::Practice(PracticeAction::Guess(target)), &mut state);
        let (result, _) = dispatch(Action::Practice(PracticeAction::Stop), &mut state);
        assert!(result.status.iter().any(|s| matches!(
            s,
            StatusEvent::GameOver {
                correct: 1,
                rounds: 1,
                ..
            }
        )));
        assert!(matches!(state.session, SessionKind::Idle));
    }

    #[test]
    fn locked_practice_category_is_refused() {
        let mut state = test_state();
        let (result, _) = dispatch(
            Action::Practice(PracticeAction::Start(
                chordcrack_types::ChordCategory::Power,
            )),
            &mut state,
        );
        assert!(result
            .status
            .iter()
            .any(|s| matches!(s, StatusEvent::Error(_))));
        assert!(matches!(state.session, SessionKind::Idle));
    }

    #[test]
    fn save_and_load_round_trip_through_io_feedback() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.sqlite");
        let (io_tx, io_rx) = std::sync::mpsc::channel();

        let mut state = test_state();
        state.profile.username = "iris".to_string();
        state.profile.xp = 777;
        let mut effects = Vec::new();
        dispatch_action(
            &Action::Session(SessionAction::SaveTo(path.clone())),
            &mut state,
            &mut effects,
            &io_tx,
        );
        let feedback = io_rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        let result = apply_io_feedback(feedback, &mut state);
        assert!(result.status.iter().any(|s| matches!(s, StatusEvent::Info(_))));
        assert!(!state.dirty);

        let mut fresh = test_state();
        dispatch_action(
            &Action::Session(SessionAction::LoadFrom(path)),
            &mut fresh,
            &mut effects,
            &io_tx,
        );
        let feedback = io_rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        apply_io_feedback(feedback, &mut fresh);
        assert_eq!(fresh.profile.username, "iris");
        assert_eq!(fresh.profile.xp, 777);
    }
}
