//! Commands sent from the main thread to the audio thread.

use chordcrack_types::{Chord, HintTier};

/// Command for the audio thread. Playback commands replace whatever is
/// currently sounding.
#[derive(Debug, Clone)]
pub enum AudioCmd {
    /// Render and play one chord with the given hint tier's treatment.
    PlayChord { chord: Chord, tier: HintTier },
    /// Render and play candidate chords back to back, for comparison.
    PlayCandidates { chords: Vec<Chord> },
    /// Stop playback immediately.
    Stop,
    /// Master output volume, 0.0..=1.0.
    SetVolume(f32),
    /// Terminate the audio thread.
    Shutdown,
}
