//! Dispatch for profile and persistence actions.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use chordcrack_types::{DispatchResult, SessionAction, StatsState};

use crate::action::IoFeedback;
use crate::state::AppState;

use super::default_profile_path;
use super::side_effects::AudioSideEffect;

fn dispatch_save(
    path: PathBuf,
    state: &mut AppState,
    io_tx: &Sender<IoFeedback>,
    result: &mut DispatchResult,
) {
    state.io.save_in_progress = true;
    state.io.last_io_error = None;

    let bundle = state.persisted();
    let tx = io_tx.clone();
    let save_id = state.io.generation.next_save();

    std::thread::spawn(move || {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        let res = crate::state::persistence::save_profile(&path, &bundle)
            .map(|_| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("profile")
                    .to_string()
            })
            .map_err(|e| e.to_string());

        let _ = tx.send(IoFeedback::SaveComplete {
            id: save_id,
            path,
            result: res,
        });
    });

    result.push_info("Saving...");
}

fn dispatch_load(
    path: PathBuf,
    state: &mut AppState,
    io_tx: &Sender<IoFeedback>,
    result: &mut DispatchResult,
) {
    state.io.load_in_progress = true;
    state.io.last_io_error = None;

    let tx = io_tx.clone();
    let load_id = state.io.generation.next_load();

    std::thread::spawn(move || {
        let res = if path.exists() {
            crate::state::persistence::load_profile(&path)
                .map(|bundle| {
                    let name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("profile")
                        .to_string();
                    (bundle, name)
                })
                .map_err(|e| e.to_string())
        } else {
            Err("Profile file not found".to_string())
        };

        let _ = tx.send(IoFeedback::LoadComplete {
            id: load_id,
            path,
            result: res,
        });
    });

    result.push_info("Loading...");
}

pub(super) fn dispatch_session(
    action: &SessionAction,
    state: &mut AppState,
    effects: &mut Vec<AudioSideEffect>,
    io_tx: &Sender<IoFeedback>,
) -> DispatchResult {
    let mut result = DispatchResult::none();

    match action {
        SessionAction::SetUsername(name) => {
            let name = name.trim();
            if name.is_empty() {
                result.push_error("Username cannot be empty");
            } else {
                state.profile.username = name.to_string();
                state.dirty = true;
                result.profile_dirty = true;
                result.push_info(format!("Hello, {}", name));
            }
        }
        SessionAction::SetVolume(volume) => {
            state.volume = volume.clamp(0.0, 1.0);
            effects.push(AudioSideEffect::SetVolume(state.volume));
            result.push_info(format!("Volume {:.0}%", state.volume * 100.0));
        }
        SessionAction::Save => {
            let path = state.profile_path.clone().unwrap_or_else(default_profile_path);
            state.profile_path = Some(path.clone());
            dispatch_save(path, state, io_tx, &mut result);
        }
        SessionAction::SaveTo(path) => {
            state.profile_path = Some(path.clone());
            dispatch_save(path.clone(), state, io_tx, &mut result);
        }
        SessionAction::Load => {
            let path = state.profile_path.clone().unwrap_or_else(default_profile_path);
            state.profile_path = Some(path.clone());
            dispatch_load(path, state, io_tx, &mut result);
        }
        SessionAction::LoadFrom(path) => {
            state.profile_path = Some(path.clone());
            dispatch_load(path.clone(), state, io_tx, &mut result);
        }
        SessionAction::ResetStats => {
            state.stats = StatsState::default();
            state.dirty = true;
            result.profile_dirty = true;
            result.push_info("Statistics reset");
        }
    }

    result
}
