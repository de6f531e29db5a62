//! # chordcrack-core
//!
//! Backend library for the ChordCrack ear-training game. Provides state
//! management, action dispatch, achievements, daily-challenge selection, and
//! persistence — independent of any front end.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chordcrack_core::action::{Action, GameAction, IoFeedback};
//! use chordcrack_core::config::Config;
//! use chordcrack_core::dispatch::dispatch_action;
//! use chordcrack_core::state::AppState;
//!
//! // 1. Create state from config defaults
//! let config = Config::load();
//! let mut state = AppState::new_with_defaults(&config);
//!
//! // 2. Dispatch actions to mutate state; audio side effects are collected
//! //    for the caller to apply to an AudioHandle
//! let (io_tx, io_rx) = std::sync::mpsc::channel::<IoFeedback>();
//! let mut effects = Vec::new();
//! let result = dispatch_action(&Action::Game(GameAction::Start), &mut state, &mut effects, &io_tx);
//!
//! // 3. Render result.status, apply effects, drain io_rx for async
//! //    save/load completions via dispatch::apply_io_feedback
//! ```
//!
//! ## Module Overview
//!
//! - [`state`] — `AppState`, the active session, and SQLite persistence
//! - [`dispatch`] — `dispatch_action()`, the single entry point for state
//!   mutation; per-domain submodules and `AudioSideEffect` collection
//! - [`config`] — TOML configuration (embedded defaults + user override)
//! - [`daily`] — deterministic daily-challenge chord selection
//! - [`achievements`] — post-dispatch achievement evaluation
//! - [`history`] — append-only JSONL round log

pub mod achievements;
pub mod action;
pub mod config;
pub mod daily;
pub mod dispatch;
pub mod history;
pub mod rng;
pub mod state;
