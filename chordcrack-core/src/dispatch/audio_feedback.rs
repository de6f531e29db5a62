//! Dispatch for feedback events arriving from the audio thread.

use chordcrack_types::{AudioFeedback, DispatchResult};

use crate::state::AppState;

pub(super) fn dispatch_audio_feedback(
    feedback: &AudioFeedback,
    state: &mut AppState,
) -> DispatchResult {
    let mut result = DispatchResult::none();
    match feedback {
        AudioFeedback::PlaybackStarted => state.audio_playing = true,
        AudioFeedback::PlaybackFinished => state.audio_playing = false,
        AudioFeedback::Error(message) => {
            state.audio_playing = false;
            log::warn!(target: "audio", "playback error: {}", message);
            result.push_error(format!("Audio error: {}", message));
        }
    }
    result
}
