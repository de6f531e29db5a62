//! Karplus-Strong chord synthesis and the hint-tier playback treatments.
//!
//! Rendering is deterministic: the pluck excitation noise is seeded from the
//! string frequency, so the same chord always produces the same samples.

use chordcrack_types::{Chord, HintTier};

use crate::strings::string_freq;

/// Default render rate when the output device doesn't dictate one.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Per-string onset stagger for a normal strum.
const STRUM_STAGGER_SECS: f32 = 0.035;
/// Stagger for the slowed strum hint.
const SLOW_STAGGER_SECS: f32 = 0.15;
/// Ring time of a full strum.
const STRUM_RING_SECS: f32 = 2.0;
/// Ring time of the slowed strum.
const SLOW_RING_SECS: f32 = 3.0;
/// Per-string note length in the split-strings hint.
const SPLIT_NOTE_SECS: f32 = 0.9;
/// Silence between strings in the split-strings hint.
const SPLIT_GAP_SECS: f32 = 0.25;
/// Silence between chords in a candidate comparison.
const CANDIDATE_GAP_SECS: f32 = 0.4;

/// Peak level renders are normalized to.
const PEAK_LEVEL: f32 = 0.8;

/// Render a single plucked string.
pub fn render_pluck(freq: f32, secs: f32, sample_rate: u32) -> Vec<f32> {
    let total = (secs * sample_rate as f32) as usize;
    let period = (sample_rate as f32 / freq).max(2.0) as usize;

    // Excitation noise, seeded from the frequency bits for determinism
    let mut seed = freq.to_bits() as u64 | 1;
    let mut delay: Vec<f32> = (0..period)
        .map(|_| {
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((seed >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect();

    // Damped averaging filter around the delay line
    let damping = 0.996;
    let mut out = Vec::with_capacity(total);
    let mut pos = 0;
    for _ in 0..total {
        let next = (pos + 1) % period;
        let sample = delay[pos];
        delay[pos] = (sample + delay[next]) * 0.5 * damping;
        out.push(sample);
        pos = next;
    }
    out
}

fn mix_at(buffer: &mut Vec<f32>, offset: usize, samples: &[f32]) {
    let end = offset + samples.len();
    if buffer.len() < end {
        buffer.resize(end, 0.0);
    }
    for (i, s) in samples.iter().enumerate() {
        buffer[offset + i] += s;
    }
}

fn normalize(buffer: &mut [f32]) {
    let peak = buffer.iter().fold(0.0f32, |p, s| p.max(s.abs()));
    if peak > 0.0 {
        let gain = PEAK_LEVEL / peak;
        for s in buffer.iter_mut() {
            *s *= gain;
        }
    }
}

fn render_strum(chord: &Chord, stagger: f32, ring: f32, sample_rate: u32) -> Vec<f32> {
    let mut buffer = Vec::new();
    for (i, (string, fret)) in chord.fingering.sounding_strings().iter().enumerate() {
        let freq = string_freq(*string, *fret);
        let offset = (i as f32 * stagger * sample_rate as f32) as usize;
        mix_at(&mut buffer, offset, &render_pluck(freq, ring, sample_rate));
    }
    normalize(&mut buffer);
    buffer
}

fn render_split(chord: &Chord, sample_rate: u32) -> Vec<f32> {
    let note = (SPLIT_NOTE_SECS * sample_rate as f32) as usize;
    let gap = (SPLIT_GAP_SECS * sample_rate as f32) as usize;
    let mut buffer = Vec::new();
    let mut offset = 0;
    for (string, fret) in chord.fingering.sounding_strings() {
        let freq = string_freq(string, fret);
        mix_at(
            &mut buffer,
            offset,
            &render_pluck(freq, SPLIT_NOTE_SECS, sample_rate),
        );
        offset += note + gap;
    }
    normalize(&mut buffer);
    buffer
}

/// Render a chord with the given hint tier's treatment. The audio-choice and
/// finger-reveal tiers carry their hint content outside the audio, so they
/// reuse the full strum.
pub fn render_chord(chord: &Chord, tier: HintTier, sample_rate: u32) -> Vec<f32> {
    match tier {
        HintTier::FullStrum | HintTier::AudioChoice | HintTier::FingerReveal => {
            render_strum(chord, STRUM_STAGGER_SECS, STRUM_RING_SECS, sample_rate)
        }
        HintTier::SlowStrum => render_strum(chord, SLOW_STAGGER_SECS, SLOW_RING_SECS, sample_rate),
        HintTier::SplitStrings => render_split(chord, sample_rate),
    }
}

/// Render the candidate chords back to back with gaps, for the
/// audio-choice tier.
pub fn render_candidates(chords: &[&Chord], sample_rate: u32) -> Vec<f32> {
    let gap = (CANDIDATE_GAP_SECS * sample_rate as f32) as usize;
    let mut buffer = Vec::new();
    let mut offset = 0;
    for chord in chords {
        let strum = render_strum(chord, STRUM_STAGGER_SECS, STRUM_RING_SECS, sample_rate);
        let len = strum.len();
        mix_at(&mut buffer, offset, &strum);
        offset += len + gap;
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordcrack_types::chord::CATALOG;

    const SR: u32 = 22_050;

    fn energy(samples: &[f32]) -> f32 {
        samples.iter().map(|s| s * s).sum()
    }

    #[test]
    fn rendering_is_deterministic() {
        let chord = &CATALOG[0];
        let a = render_chord(chord, HintTier::FullStrum, SR);
        let b = render_chord(chord, HintTier::FullStrum, SR);
        assert_eq!(a, b);
    }

    #[test]
    fn every_catalog_chord_renders_audible_output_per_tier() {
        for chord in CATALOG.iter() {
            for tier in [
                HintTier::FullStrum,
                HintTier::SlowStrum,
                HintTier::SplitStrings,
                HintTier::AudioChoice,
                HintTier::FingerReveal,
            ] {
                let samples = render_chord(chord, tier, SR);
                assert!(
                    energy(&samples) > 0.01,
                    "{} rendered silence at {:?}",
                    chord.name,
                    tier
                );
            }
        }
    }

    #[test]
    fn hint_treatments_lengthen_playback() {
        let chord = &CATALOG[0];
        let full = render_chord(chord, HintTier::FullStrum, SR).len();
        let slow = render_chord(chord, HintTier::SlowStrum, SR).len();
        let split = render_chord(chord, HintTier::SplitStrings, SR).len();
        assert!(slow > full);
        assert!(split > full);
    }

    #[test]
    fn output_is_normalized() {
        let chord = &CATALOG[17]; // F barre, six sounding strings
        let samples = render_chord(chord, HintTier::FullStrum, SR);
        let peak = samples.iter().fold(0.0f32, |p, s| p.max(s.abs()));
        assert!(peak <= 0.8 + 1e-4);
        assert!(peak > 0.5);
    }

    #[test]
    fn candidates_render_back_to_back() {
        let chords = [&CATALOG[0], &CATALOG[1], &CATALOG[2]];
        let combined = render_candidates(&chords, SR);
        let single = render_chord(&CATALOG[0], HintTier::FullStrum, SR);
        assert!(combined.len() > single.len() * 2);
    }
}
