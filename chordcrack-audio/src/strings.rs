//! Standard guitar tuning and fret-to-frequency math.

/// MIDI note numbers of the open strings, low E to high E (E2 A2 D3 G3 B3 E4).
pub const OPEN_STRING_MIDI: [u8; 6] = [40, 45, 50, 55, 59, 64];

/// Equal-temperament frequency for a MIDI note, A4 = 440 Hz.
pub fn midi_freq(midi: u8) -> f32 {
    440.0 * 2f32.powf((midi as f32 - 69.0) / 12.0)
}

/// Frequency of `string` (0 = low E) fretted at `fret` (0 = open).
pub fn string_freq(string: usize, fret: u8) -> f32 {
    midi_freq(OPEN_STRING_MIDI[string] + fret)
}
