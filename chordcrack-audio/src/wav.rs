//! WAV export for rendered chords.

use std::path::Path;

use chordcrack_types::{Chord, HintTier};

use crate::synth::{self, DEFAULT_SAMPLE_RATE};

/// Render a chord and write it to `path` as 32-bit float mono WAV.
pub fn export_chord(chord: &Chord, tier: HintTier, path: &Path) -> Result<(), String> {
    let samples = synth::render_chord(chord, tier, DEFAULT_SAMPLE_RATE);
    write_wav(&samples, DEFAULT_SAMPLE_RATE, path)
}

pub fn write_wav(samples: &[f32], sample_rate: u32, path: &Path) -> Result<(), String> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| format!("failed to create {}: {}", path.display(), e))?;
    for &s in samples {
        writer
            .write_sample(s)
            .map_err(|e| format!("failed to write {}: {}", path.display(), e))?;
    }
    writer
        .finalize()
        .map_err(|e| format!("failed to finalize {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordcrack_types::chord::CATALOG;

    #[test]
    fn exports_a_readable_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c_major.wav");
        export_chord(&CATALOG[0], HintTier::FullStrum, &path).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, DEFAULT_SAMPLE_RATE);
        assert!(reader.duration() > 0);
    }
}
