//! The static chord catalog.
//!
//! Every quiz target is one of these entries: a name, a category, and a
//! fingering (fret per string, low E to high E). The catalog is the single
//! source of truth for audio rendering, hint reveals, and guess matching.

use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog chord. Ids are dense and equal the
/// chord's position in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChordId(u16);

impl ChordId {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
    pub fn get(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ChordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display names for the six strings, low E to high E.
pub const STRING_NAMES: [&str; 6] = ["low E", "A", "D", "G", "B", "high E"];

/// How one string is played in a fingering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringFret {
    /// String is not played.
    Muted,
    /// String rings open.
    Open,
    /// String is fretted at the given fret (1..=12).
    Fret(u8),
}

impl StringFret {
    /// Fret offset from the open string, or None if muted.
    pub fn semitones(self) -> Option<u8> {
        match self {
            StringFret::Muted => None,
            StringFret::Open => Some(0),
            StringFret::Fret(n) => Some(n),
        }
    }
}

/// A six-string fingering, ordered low E to high E.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingering(pub [StringFret; 6]);

impl Fingering {
    /// (string index, fret offset) for every string that rings.
    pub fn sounding_strings(&self) -> Vec<(usize, u8)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, sf)| sf.semitones().map(|fret| (i, fret)))
            .collect()
    }

    /// (string index, fret) for fretted positions only. These are the
    /// positions a finger actually holds down, used by the finger-reveal hint.
    pub fn fretted(&self) -> Vec<(usize, u8)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, sf)| match sf {
                StringFret::Fret(n) => Some((i, *n)),
                _ => None,
            })
            .collect()
    }
}

/// Chord category, in unlock order (see `ChordCategory::unlock_level`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordCategory {
    Open,
    Seventh,
    Barre,
    Suspended,
    Power,
}

impl ChordCategory {
    pub const ALL: [ChordCategory; 5] = [
        ChordCategory::Open,
        ChordCategory::Seventh,
        ChordCategory::Barre,
        ChordCategory::Suspended,
        ChordCategory::Power,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChordCategory::Open => "Open",
            ChordCategory::Seventh => "Seventh",
            ChordCategory::Barre => "Barre",
            ChordCategory::Suspended => "Suspended",
            ChordCategory::Power => "Power",
        }
    }

    /// Player level at which this category enters the rotation.
    pub fn unlock_level(&self) -> u32 {
        match self {
            ChordCategory::Open => 1,
            ChordCategory::Seventh => 2,
            ChordCategory::Barre => 3,
            ChordCategory::Suspended => 4,
            ChordCategory::Power => 5,
        }
    }

    pub fn parse(s: &str) -> Option<ChordCategory> {
        ChordCategory::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for ChordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One catalog chord. Immutable; see [`CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub id: ChordId,
    pub name: &'static str,
    pub category: ChordCategory,
    pub fingering: Fingering,
}

impl Chord {
    pub fn all() -> &'static [Chord] {
        &CATALOG
    }

    pub fn get(id: ChordId) -> Option<&'static Chord> {
        CATALOG.get(id.get() as usize)
    }

    /// Case-insensitive name lookup ("am7" matches "Am7").
    pub fn by_name(name: &str) -> Option<&'static Chord> {
        CATALOG.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn in_category(category: ChordCategory) -> Vec<&'static Chord> {
        CATALOG.iter().filter(|c| c.category == category).collect()
    }
}

use ChordCategory::{Barre, Open, Power, Seventh, Suspended};
use StringFret::{Muted as X, Open as O};

const fn f(n: u8) -> StringFret {
    StringFret::Fret(n)
}

const fn chord(
    id: u16,
    name: &'static str,
    category: ChordCategory,
    strings: [StringFret; 6],
) -> Chord {
    Chord {
        id: ChordId::new(id),
        name,
        category,
        fingering: Fingering(strings),
    }
}

/// Standard-tuning fingerings, low E to high E.
pub const CATALOG: [Chord; 32] = [
    // Open chords
    chord(0, "E", Open, [O, f(2), f(2), f(1), O, O]),
    chord(1, "A", Open, [X, O, f(2), f(2), f(2), O]),
    chord(2, "D", Open, [X, X, O, f(2), f(3), f(2)]),
    chord(3, "G", Open, [f(3), f(2), O, O, O, f(3)]),
    chord(4, "C", Open, [X, f(3), f(2), O, f(1), O]),
    chord(5, "Em", Open, [O, f(2), f(2), O, O, O]),
    chord(6, "Am", Open, [X, O, f(2), f(2), f(1), O]),
    chord(7, "Dm", Open, [X, X, O, f(2), f(3), f(1)]),
    // Seventh chords
    chord(8, "E7", Seventh, [O, f(2), O, f(1), O, O]),
    chord(9, "A7", Seventh, [X, O, f(2), O, f(2), O]),
    chord(10, "D7", Seventh, [X, X, O, f(2), f(1), f(2)]),
    chord(11, "G7", Seventh, [f(3), f(2), O, O, O, f(1)]),
    chord(12, "C7", Seventh, [X, f(3), f(2), f(3), f(1), O]),
    chord(13, "B7", Seventh, [X, f(2), f(1), f(2), O, f(2)]),
    chord(14, "Em7", Seventh, [O, f(2), f(2), O, f(3), O]),
    chord(15, "Am7", Seventh, [X, O, f(2), O, f(1), O]),
    chord(16, "Dm7", Seventh, [X, X, O, f(2), f(1), f(1)]),
    // Barre chords
    chord(17, "F", Barre, [f(1), f(3), f(3), f(2), f(1), f(1)]),
    chord(18, "B", Barre, [X, f(2), f(4), f(4), f(4), f(2)]),
    chord(19, "Bm", Barre, [X, f(2), f(4), f(4), f(3), f(2)]),
    chord(20, "F#m", Barre, [f(2), f(4), f(4), f(2), f(2), f(2)]),
    chord(21, "Gm", Barre, [f(3), f(5), f(5), f(3), f(3), f(3)]),
    chord(22, "Cm", Barre, [X, f(3), f(5), f(5), f(4), f(3)]),
    // Suspended chords
    chord(23, "Asus2", Suspended, [X, O, f(2), f(2), O, O]),
    chord(24, "Asus4", Suspended, [X, O, f(2), f(2), f(3), O]),
    chord(25, "Dsus2", Suspended, [X, X, O, f(2), f(3), O]),
    chord(26, "Dsus4", Suspended, [X, X, O, f(2), f(3), f(3)]),
    chord(27, "Esus4", Suspended, [O, f(2), f(2), f(2), O, O]),
    // Power chords
    chord(28, "E5", Power, [O, f(2), f(2), X, X, X]),
    chord(29, "A5", Power, [X, O, f(2), f(2), X, X]),
    chord(30, "D5", Power, [X, X, O, f(2), f(3), X]),
    chord(31, "G5", Power, [f(3), f(5), f(5), X, X, X]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_match_position() {
        for (i, chord) in CATALOG.iter().enumerate() {
            assert_eq!(chord.id.get() as usize, i);
        }
    }

    #[test]
    fn names_are_unique() {
        for a in CATALOG.iter() {
            let count = CATALOG
                .iter()
                .filter(|b| b.name.eq_ignore_ascii_case(a.name))
                .count();
            assert_eq!(count, 1, "duplicate chord name {}", a.name);
        }
    }

    #[test]
    fn every_chord_sounds_at_least_two_strings() {
        for chord in CATALOG.iter() {
            assert!(
                chord.fingering.sounding_strings().len() >= 2,
                "{} sounds fewer than two strings",
                chord.name
            );
        }
    }

    #[test]
    fn every_category_is_populated() {
        for cat in ChordCategory::ALL {
            assert!(!Chord::in_category(cat).is_empty(), "{} is empty", cat);
        }
    }

    #[test]
    fn lookup_by_name_is_case_insensitive() {
        let am7 = Chord::by_name("am7").unwrap();
        assert_eq!(am7.name, "Am7");
        assert_eq!(Chord::get(am7.id), Some(am7));
        assert!(Chord::by_name("Zmaj9").is_none());
    }

    #[test]
    fn fretted_excludes_open_and_muted() {
        let e = Chord::by_name("E").unwrap();
        // E major: frets at strings 1, 2, 3 only
        assert_eq!(e.fingering.fretted(), vec![(1, 2), (2, 2), (3, 1)]);
    }

    #[test]
    fn category_parse_round_trips() {
        for cat in ChordCategory::ALL {
            assert_eq!(ChordCategory::parse(cat.name()), Some(cat));
            assert_eq!(ChordCategory::parse(&cat.name().to_lowercase()), Some(cat));
        }
        assert_eq!(ChordCategory::parse("jazz"), None);
    }
}
