//! Top-level application state.

pub mod persistence;

use std::path::PathBuf;

pub use chordcrack_types::{
    AchievementState, GameState, MixedPracticeState, PracticeState, ProfileState, RoundPhase,
    ScoreBoard, StatsState,
};

use crate::config::Config;
use crate::daily::DailyResult;
use crate::history::{HistoryEntry, RoundLog};
use crate::rng::SplitMix64;
use persistence::PersistedProfile;

/// The active play session, one at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionKind {
    #[default]
    Idle,
    Game(GameState),
    Practice(PracticeState),
    Mixed(MixedPracticeState),
}

impl SessionKind {
    /// Scoreboard of the live session, if any.
    pub fn board(&self) -> Option<&ScoreBoard> {
        match self {
            SessionKind::Idle => None,
            SessionKind::Game(g) => Some(&g.board),
            SessionKind::Practice(p) => Some(&p.board),
            SessionKind::Mixed(m) => Some(&m.board),
        }
    }

    pub fn phase(&self) -> RoundPhase {
        match self {
            SessionKind::Idle => RoundPhase::Waiting,
            SessionKind::Game(g) => g.phase,
            SessionKind::Practice(p) => p.phase,
            SessionKind::Mixed(m) => m.phase,
        }
    }
}

/// Monotonic ids for async save/load, so stale completions can be ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct IoGeneration {
    save: u64,
    load: u64,
}

impl IoGeneration {
    pub fn next_save(&mut self) -> u64 {
        self.save += 1;
        self.save
    }

    pub fn next_load(&mut self) -> u64 {
        self.load += 1;
        self.load
    }

    pub fn is_current_save(&self, id: u64) -> bool {
        id == self.save
    }

    pub fn is_current_load(&self, id: u64) -> bool {
        id == self.load
    }
}

/// I/O progress flags for the front end.
#[derive(Debug, Clone, Default)]
pub struct IoState {
    pub save_in_progress: bool,
    pub load_in_progress: bool,
    pub last_io_error: Option<String>,
    pub generation: IoGeneration,
}

/// Top-level application state, owned by the front end and passed to
/// dispatch by mutable reference.
pub struct AppState {
    pub profile: ProfileState,
    pub stats: StatsState,
    pub achievements: AchievementState,
    pub session: SessionKind,
    pub daily_results: Vec<DailyResult>,
    pub history: Vec<HistoryEntry>,
    pub io: IoState,
    /// Playback volume (0.0 - 1.0), mirrored to the audio thread.
    pub volume: f32,
    pub rounds_per_game: u32,
    pub autosave: bool,
    /// Profile database path; None until first explicit save/load.
    pub profile_path: Option<PathBuf>,
    /// True when profile data changed since the last save.
    pub dirty: bool,
    /// True while the audio thread is sounding a chord.
    pub audio_playing: bool,
    pub rng: SplitMix64,
    /// JSONL round log; None when the log file could not be opened.
    pub round_log: Option<RoundLog>,
}

impl AppState {
    pub fn new_with_defaults(config: &Config) -> Self {
        Self {
            profile: ProfileState::new(config.username()),
            stats: StatsState::default(),
            achievements: AchievementState::default(),
            session: SessionKind::Idle,
            daily_results: Vec::new(),
            history: Vec::new(),
            io: IoState::default(),
            volume: config.volume(),
            rounds_per_game: config.rounds_per_game(),
            autosave: config.autosave(),
            profile_path: None,
            dirty: false,
            audio_playing: false,
            rng: SplitMix64::from_time(),
            round_log: None,
        }
    }

    /// Replace persistent data with a loaded bundle.
    pub fn apply_loaded(&mut self, bundle: PersistedProfile) {
        self.profile = bundle.profile;
        self.stats = bundle.stats;
        self.achievements = bundle.achievements;
        self.daily_results = bundle.daily;
        self.history = bundle.history;
        self.dirty = false;
    }

    /// Snapshot the persistent data for saving.
    pub fn persisted(&self) -> PersistedProfile {
        PersistedProfile {
            profile: self.profile.clone(),
            stats: self.stats.clone(),
            achievements: self.achievements.clone(),
            daily: self.daily_results.clone(),
            history: self.history.clone(),
        }
    }

    pub fn daily_result(&self, day: u64) -> Option<&DailyResult> {
        self.daily_results.iter().find(|r| r.day == day)
    }
}
