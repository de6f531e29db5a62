//! Round/attempt progression: hint tiers, point decay, and the per-round
//! state machine.
//!
//! A round presents one target chord and accepts up to [`MAX_ATTEMPTS`]
//! guesses. The hint tier is a pure function of the attempt index; base
//! points on success are a pure function of the attempt the guess landed on.

use serde::{Deserialize, Serialize};

use crate::chord::{Chord, ChordId};

/// Maximum guesses per round.
pub const MAX_ATTEMPTS: u8 = 6;

/// Base points for a correct guess on attempt `n` (1-based):
/// 60 on the first attempt, decaying 10 per attempt, floored at 10.
pub fn base_points(attempt: u8) -> u32 {
    let attempt = attempt.max(1) as u32;
    60u32.saturating_sub((attempt - 1) * 10).max(10)
}

/// Streak bonus awarded on top of base points: +5 per consecutive correct
/// round, capped at +25. Tracked separately from base points.
pub fn streak_bonus(streak: u32) -> u32 {
    (streak * 5).min(25)
}

/// Assistance unlocked at a given attempt index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintTier {
    /// Attempts 1-2: the chord strummed at normal speed.
    FullStrum,
    /// Attempt 3: slowed strum with a longer ring.
    SlowStrum,
    /// Attempt 4: each sounding string played in isolation.
    SplitStrings,
    /// Attempt 5: a reduced multiple-choice set; each candidate can be played.
    AudioChoice,
    /// Attempt 6: one fretted position of the target is revealed.
    FingerReveal,
}

impl HintTier {
    /// Deterministic tier for a 1-based attempt index. Indices past
    /// `MAX_ATTEMPTS` clamp to `FingerReveal`.
    pub fn for_attempt(attempt: u8) -> HintTier {
        match attempt {
            0 | 1 | 2 => HintTier::FullStrum,
            3 => HintTier::SlowStrum,
            4 => HintTier::SplitStrings,
            5 => HintTier::AudioChoice,
            _ => HintTier::FingerReveal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HintTier::FullStrum => "full strum",
            HintTier::SlowStrum => "slow strum",
            HintTier::SplitStrings => "split strings",
            HintTier::AudioChoice => "audio choice",
            HintTier::FingerReveal => "finger reveal",
        }
    }
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round active yet (or between start and the first audio play).
    #[default]
    Waiting,
    /// A round is live and accepting guesses.
    Playing,
    /// The round is resolved; waiting for advance.
    Answered,
    /// The session is finished.
    GameOver,
}

/// Result of recording a guess against a live round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// Guess matched the target; `attempt` is the 1-based attempt it landed on.
    Correct { attempt: u8 },
    /// Wrong, and attempts remain. `next_tier` applies to the next attempt.
    Incorrect { attempts_left: u8, next_tier: HintTier },
    /// Wrong, and that was the last attempt.
    Exhausted,
}

/// State of one live round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub target: ChordId,
    /// Guesses in order. `None` is reserved for a skipped attempt.
    pub attempts: Vec<Option<ChordId>>,
    /// Candidate set for the `AudioChoice` tier (target plus decoys),
    /// fixed at round creation.
    pub candidates: Vec<ChordId>,
    /// The (string, fret) revealed at the `FingerReveal` tier, once reached.
    pub revealed_finger: Option<(usize, u8)>,
}

impl RoundState {
    pub fn new(target: ChordId, candidates: Vec<ChordId>) -> Self {
        Self {
            target,
            attempts: Vec::new(),
            candidates,
            revealed_finger: None,
        }
    }

    /// The 1-based index of the attempt currently being played.
    pub fn current_attempt(&self) -> u8 {
        self.attempts.len() as u8 + 1
    }

    /// Hint tier for the current attempt.
    pub fn hint_tier(&self) -> HintTier {
        HintTier::for_attempt(self.current_attempt())
    }

    pub fn attempts_left(&self) -> u8 {
        MAX_ATTEMPTS.saturating_sub(self.attempts.len() as u8)
    }

    /// Record a guess. Guesses past exhaustion return `Exhausted`
    /// without mutating.
    pub fn record_guess(&mut self, guess: ChordId) -> GuessResult {
        if self.attempts.len() as u8 >= MAX_ATTEMPTS {
            return GuessResult::Exhausted;
        }
        let attempt = self.current_attempt();
        self.attempts.push(Some(guess));

        if guess == self.target {
            GuessResult::Correct { attempt }
        } else if self.attempts.len() as u8 >= MAX_ATTEMPTS {
            GuessResult::Exhausted
        } else {
            let next = self.current_attempt();
            // Reaching the reveal tier records which finger gets shown.
            if HintTier::for_attempt(next) == HintTier::FingerReveal
                && self.revealed_finger.is_none()
            {
                self.revealed_finger = Chord::get(self.target)
                    .and_then(|c| c.fingering.fretted().first().copied());
            }
            GuessResult::Incorrect {
                attempts_left: self.attempts_left(),
                next_tier: HintTier::for_attempt(next),
            }
        }
    }
}

/// Summary of a finished round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub target: ChordId,
    pub correct: bool,
    /// Attempts consumed (equals the winning attempt when correct).
    pub attempts_used: u8,
    /// Base points per the decay formula; zero on a miss.
    pub points: u32,
    /// Streak bonus awarded on top of `points`; zero on a miss.
    pub bonus: u32,
    /// Guess sequence as recorded.
    pub attempts: Vec<Option<ChordId>>,
}
