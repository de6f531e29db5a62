//! # chordcrack-audio
//!
//! Chord audio for ChordCrack: Karplus-Strong synthesis of guitar chords,
//! hint-tier playback treatments, a dedicated playback thread behind
//! [`AudioHandle`], and WAV export.

pub mod audio_thread;
pub mod commands;
pub mod handle;
pub mod strings;
pub mod synth;
pub mod wav;

pub use commands::AudioCmd;
pub use handle::AudioHandle;
