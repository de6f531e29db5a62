//! # chordcrack-types
//!
//! Shared type definitions for the ChordCrack ear-training engine.
//! This crate contains data structures used across chordcrack-core,
//! chordcrack-audio, and the CLI front end, plus the pure reducers that
//! implement round/attempt progression.

pub mod achievements;
pub mod action;
pub mod chord;
pub mod game;
pub mod profile;
pub mod reduce;
pub mod round;

pub use achievements::{Achievement, AchievementState};
pub use action::*;
pub use chord::{Chord, ChordCategory, ChordId, Fingering, StringFret};
pub use game::{GameMode, GameState, MixedPracticeState, PracticeState, ScoreBoard};
pub use profile::{level_for_xp, xp_for_level, ProfileState, StatsState};
pub use round::{
    base_points, streak_bonus, GuessResult, HintTier, RoundPhase, RoundResult, RoundState,
    MAX_ATTEMPTS,
};
