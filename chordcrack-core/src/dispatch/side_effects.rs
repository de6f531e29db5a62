//! Audio side effects collected during dispatch.
//!
//! Dispatch never touches the audio thread directly; it pushes effects into
//! a Vec the caller applies to its AudioHandle after dispatch returns.

use chordcrack_types::{ChordId, HintTier, RoundState};

/// One deferred audio operation.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSideEffect {
    /// Sound the chord using the given hint tier's treatment.
    PlayChord { chord: ChordId, tier: HintTier },
    /// Sound each candidate in order (audio-choice tier).
    PlayCandidates { chords: Vec<ChordId> },
    Stop,
    SetVolume(f32),
}

/// Push the audio for the round's current attempt: candidate comparison at
/// the audio-choice tier, the tier treatment otherwise.
pub fn push_round_audio(effects: &mut Vec<AudioSideEffect>, round: &RoundState) {
    let tier = round.hint_tier();
    if tier == HintTier::AudioChoice && !round.candidates.is_empty() {
        effects.push(AudioSideEffect::PlayCandidates {
            chords: round.candidates.clone(),
        });
    } else {
        effects.push(AudioSideEffect::PlayChord {
            chord: round.target,
            tier,
        });
    }
}
