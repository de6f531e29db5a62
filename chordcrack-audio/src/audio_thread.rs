//! Dedicated audio thread: receives commands, renders chords, and streams
//! them to the default output device via cpal.
//!
//! When no output device exists (CI, headless machines) the thread falls back
//! to simulated playback: it still emits `PlaybackStarted`/`PlaybackFinished`
//! on the real timeline so game flow is unaffected.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, RecvTimeoutError};

use chordcrack_types::AudioFeedback;

use crate::commands::AudioCmd;
use crate::synth::{self, DEFAULT_SAMPLE_RATE};

/// Shared playback cursor between the command loop and the cpal callback.
struct Playback {
    samples: Vec<f32>,
    pos: usize,
    volume: f32,
}

impl Playback {
    fn active(&self) -> bool {
        self.pos < self.samples.len()
    }
}

/// Open output stream plus the sample rate it runs at.
struct Output {
    _stream: cpal::Stream,
    sample_rate: u32,
}

pub(crate) struct AudioThread {
    cmd_rx: Receiver<AudioCmd>,
    feedback_tx: Sender<AudioFeedback>,
    playback: Arc<Mutex<Playback>>,
    output: Option<Output>,
    /// End of the current simulated playback, when running headless.
    simulated_end: Option<Instant>,
    /// Whether a playback is in flight (real or simulated).
    playing: bool,
}

impl AudioThread {
    pub(crate) fn new(cmd_rx: Receiver<AudioCmd>, feedback_tx: Sender<AudioFeedback>) -> Self {
        let playback = Arc::new(Mutex::new(Playback {
            samples: Vec::new(),
            pos: 0,
            volume: 0.8,
        }));
        let output = match open_output(Arc::clone(&playback)) {
            Ok(output) => Some(output),
            Err(err) => {
                log::warn!(target: "audio", "no output device, simulating playback: {}", err);
                None
            }
        };
        Self {
            cmd_rx,
            feedback_tx,
            playback,
            output,
            simulated_end: None,
            playing: false,
        }
    }

    fn sample_rate(&self) -> u32 {
        self.output
            .as_ref()
            .map(|o| o.sample_rate)
            .unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    pub(crate) fn run(mut self) {
        const POLL_INTERVAL: Duration = Duration::from_millis(10);

        loop {
            match self.cmd_rx.recv_timeout(POLL_INTERVAL) {
                Ok(cmd) => {
                    if self.handle_cmd(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            self.poll_completion();
        }
    }

    /// Returns true on shutdown.
    fn handle_cmd(&mut self, cmd: AudioCmd) -> bool {
        match cmd {
            AudioCmd::PlayChord { chord, tier } => {
                let samples = synth::render_chord(&chord, tier, self.sample_rate());
                self.start_playback(samples);
            }
            AudioCmd::PlayCandidates { chords } => {
                let refs: Vec<&chordcrack_types::Chord> = chords.iter().collect();
                let samples = synth::render_candidates(&refs, self.sample_rate());
                self.start_playback(samples);
            }
            AudioCmd::Stop => {
                self.stop_playback();
            }
            AudioCmd::SetVolume(volume) => {
                if let Ok(mut pb) = self.playback.lock() {
                    pb.volume = volume.clamp(0.0, 1.0);
                }
            }
            AudioCmd::Shutdown => return true,
        }
        false
    }

    fn start_playback(&mut self, samples: Vec<f32>) {
        let secs = samples.len() as f64 / self.sample_rate() as f64;
        match self.playback.lock() {
            Ok(mut pb) => {
                pb.samples = samples;
                pb.pos = 0;
            }
            Err(_) => {
                let _ = self
                    .feedback_tx
                    .send(AudioFeedback::Error("playback state poisoned".to_string()));
                return;
            }
        }
        if self.output.is_none() {
            self.simulated_end = Some(Instant::now() + Duration::from_secs_f64(secs));
        }
        self.playing = true;
        let _ = self.feedback_tx.send(AudioFeedback::PlaybackStarted);
    }

    fn stop_playback(&mut self) {
        if let Ok(mut pb) = self.playback.lock() {
            pb.pos = pb.samples.len();
        }
        self.simulated_end = None;
        if self.playing {
            self.playing = false;
            let _ = self.feedback_tx.send(AudioFeedback::PlaybackFinished);
        }
    }

    /// Emit `PlaybackFinished` once the cursor (or simulated clock) passes the end.
    fn poll_completion(&mut self) {
        if !self.playing {
            return;
        }
        let finished = match (&self.output, self.simulated_end) {
            (Some(_), _) => self.playback.lock().map(|pb| !pb.active()).unwrap_or(true),
            (None, Some(end)) => Instant::now() >= end,
            (None, None) => true,
        };
        if finished {
            self.playing = false;
            self.simulated_end = None;
            let _ = self.feedback_tx.send(AudioFeedback::PlaybackFinished);
        }
    }
}

/// Build an f32 output stream on the default device. The callback copies the
/// mono render to every channel and advances the shared cursor.
fn open_output(playback: Arc<Mutex<Playback>>) -> Result<Output, String> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| "no default output device".to_string())?;
    let config = device
        .default_output_config()
        .map_err(|e| format!("no default output config: {}", e))?;
    let sample_rate = config.sample_rate().0;
    let channels = config.channels() as usize;

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut pb = match playback.lock() {
                    Ok(pb) => pb,
                    Err(_) => {
                        data.fill(0.0);
                        return;
                    }
                };
                for frame in data.chunks_mut(channels) {
                    let sample = if pb.active() {
                        let s = pb.samples[pb.pos] * pb.volume;
                        pb.pos += 1;
                        s
                    } else {
                        0.0
                    };
                    frame.fill(sample);
                }
            },
            |err| log::warn!(target: "audio", "output stream error: {}", err),
            None,
        )
        .map_err(|e| format!("failed to build output stream: {}", e))?;
    stream
        .play()
        .map_err(|e| format!("failed to start output stream: {}", e))?;

    Ok(Output {
        _stream: stream,
        sample_rate,
    })
}
