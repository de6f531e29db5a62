//! Action types for the dispatch system.
//!
//! Most action types are re-exported from chordcrack-types. This module
//! defines IoFeedback, which references the persistence bundle that stays in
//! chordcrack-core.

use std::path::PathBuf;

use crate::state::persistence::PersistedProfile;

// Re-export all action types from chordcrack-types
pub use chordcrack_types::{
    Action, AudioFeedback, DispatchResult, GameAction, PracticeAction, SessionAction, StatusEvent,
};

/// Feedback from async I/O operations to the main thread.
#[derive(Debug)]
pub enum IoFeedback {
    SaveComplete {
        id: u64,
        path: PathBuf,
        result: Result<String, String>,
    },
    LoadComplete {
        id: u64,
        path: PathBuf,
        result: Result<(PersistedProfile, String), String>,
    },
}
