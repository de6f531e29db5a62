//! Main-thread handle to the audio subsystem.
//!
//! Owns the command and feedback channels. Rendering and output streaming
//! live on the audio thread.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender as CrossbeamSender;

use chordcrack_types::{AudioFeedback, Chord, HintTier};

use crate::commands::AudioCmd;

pub struct AudioHandle {
    cmd_tx: CrossbeamSender<AudioCmd>,
    feedback_rx: Receiver<AudioFeedback>,
    join_handle: Option<JoinHandle<()>>,
}

impl AudioHandle {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded();
        let (feedback_tx, feedback_rx) = mpsc::channel();

        let join_handle = thread::spawn(move || {
            let thread = crate::audio_thread::AudioThread::new(cmd_rx, feedback_tx);
            thread.run();
        });

        Self {
            cmd_tx,
            feedback_rx,
            join_handle: Some(join_handle),
        }
    }

    pub fn send_cmd(&self, cmd: AudioCmd) -> Result<(), String> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| "audio thread disconnected".to_string())
    }

    /// Fire-and-forget: send a command and log if the audio thread is gone.
    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.send_cmd(cmd) {
            log::warn!(target: "audio", "command dropped: {}", e);
        }
    }

    pub fn play_chord(&self, chord: Chord, tier: HintTier) {
        self.send(AudioCmd::PlayChord { chord, tier });
    }

    pub fn play_candidates(&self, chords: Vec<Chord>) {
        self.send(AudioCmd::PlayCandidates { chords });
    }

    pub fn stop(&self) {
        self.send(AudioCmd::Stop);
    }

    pub fn set_volume(&self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }

    pub fn drain_feedback(&mut self) -> Vec<AudioFeedback> {
        let mut out = Vec::new();
        while let Ok(msg) = self.feedback_rx.try_recv() {
            out.push(msg);
        }
        out
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        let _ = self.send_cmd(AudioCmd::Shutdown);
        if let Some(handle) = self.join_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Default for AudioHandle {
    fn default() -> Self {
        Self::new()
    }
}
