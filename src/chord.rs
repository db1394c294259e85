//! Interval and chord generators.
//!
//! Each generator maps a base pitch to a fixed set of semitone offsets.
//! The two-note "fifth" uses +6 through [`major_fifth_of`], while the triads
//! add +7 for their top note. Both offsets are kept as they are.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::note::Pitch;

/// Major third above `base`
pub fn major_third_of(base: Pitch) -> Pitch {
    base + 4
}

/// The "fifth" used by the two-note interval, six semitones above `base`
pub fn major_fifth_of(base: Pitch) -> Pitch {
    base + 6
}

/// The chord shapes a question can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordKind {
    MajorThird,
    MajorFifth,
    Major,
    Minor,
}

impl ChordKind {
    pub const ALL: [ChordKind; 4] = [
        ChordKind::MajorThird,
        ChordKind::MajorFifth,
        ChordKind::Major,
        ChordKind::Minor,
    ];

    /// Build the chord on `base`, lowest note first
    pub fn generate(self, base: Pitch) -> Vec<Pitch> {
        match self {
            ChordKind::MajorThird => vec![base, major_third_of(base)],
            ChordKind::MajorFifth => vec![base, major_fifth_of(base)],
            ChordKind::Major => vec![base, major_third_of(base), base + 7],
            ChordKind::Minor => vec![base, base + 3, base + 7],
        }
    }

    /// Semitone offsets from the base
    pub fn offsets(self) -> &'static [i32] {
        match self {
            ChordKind::MajorThird => &[0, 4],
            ChordKind::MajorFifth => &[0, 6],
            ChordKind::Major => &[0, 4, 7],
            ChordKind::Minor => &[0, 3, 7],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordKind::MajorThird => "major-third",
            ChordKind::MajorFifth => "major-fifth",
            ChordKind::Major => "major",
            ChordKind::Minor => "minor",
        }
    }
}

impl fmt::Display for ChordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChordKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ChordKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ParseError::UnknownChord {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Letter;

    fn labels(pitches: &[Pitch]) -> Vec<String> {
        pitches.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_major_third() {
        let chord = ChordKind::MajorThird.generate(Pitch::natural(Letter::C, 3));
        assert_eq!(labels(&chord), vec!["C3", "E3"]);
    }

    #[test]
    fn test_major_fifth_uses_six_semitones() {
        let chord = ChordKind::MajorFifth.generate(Pitch::natural(Letter::C, 3));
        assert_eq!(labels(&chord), vec!["C3", "F#3"]);
    }

    #[test]
    fn test_major_triad() {
        let chord = ChordKind::Major.generate(Pitch::natural(Letter::C, 3));
        assert_eq!(labels(&chord), vec!["C3", "E3", "G3"]);
    }

    #[test]
    fn test_minor_triad_crosses_octave() {
        let chord = ChordKind::Minor.generate(Pitch::natural(Letter::A, 3));
        assert_eq!(labels(&chord), vec!["A3", "C4", "E4"]);
    }

    #[test]
    fn test_offsets_match_generated_chords() {
        let base = Pitch::from_int(41);
        for kind in ChordKind::ALL {
            let chord = kind.generate(base);
            let offsets: Vec<i32> = chord.iter().map(|p| (*p - base) as i32).collect();
            assert_eq!(offsets, kind.offsets(), "{kind}");
        }
    }

    #[test]
    fn test_names_round_trip() {
        for kind in ChordKind::ALL {
            assert_eq!(kind.name().parse::<ChordKind>(), Ok(kind));
        }
        assert_eq!("Minor".parse::<ChordKind>(), Ok(ChordKind::Minor));
        assert!("diminished".parse::<ChordKind>().is_err());
    }
}
