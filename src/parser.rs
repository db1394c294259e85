use std::str::FromStr;

use crate::error::ParseError;
use crate::note::{Letter, Modifier, Pitch, PitchClass};

/// Map a keyboard character to a (PitchClass, octave_offset) pair.
/// The octave_offset indicates notes that spill into the next octave
/// on the keyboard layout (k, l, ;, ', o, p).
pub fn char_to_note(c: char) -> Option<(PitchClass, i32)> {
    let (semitone, octave_offset) = match c {
        // Home row: natural notes
        'a' => (0, 0),
        's' => (2, 0),
        'd' => (4, 0),
        'f' => (5, 0),
        'g' => (7, 0),
        'h' => (9, 0),
        'j' => (11, 0),
        'k' => (0, 1),
        'l' => (2, 1),
        ';' => (4, 1),
        '\'' => (5, 1),

        // Top row: sharps
        'w' => (1, 0),
        'e' => (3, 0),
        't' => (6, 0),
        'y' => (8, 0),
        'u' => (10, 0),
        'o' => (1, 1),
        'p' => (3, 1),

        _ => return None,
    };
    Some((PitchClass::from_int(semitone), octave_offset))
}

fn parse_letter(c: char) -> Option<Letter> {
    match c.to_ascii_uppercase() {
        'C' => Some(Letter::C),
        'D' => Some(Letter::D),
        'E' => Some(Letter::E),
        'F' => Some(Letter::F),
        'G' => Some(Letter::G),
        'A' => Some(Letter::A),
        'B' => Some(Letter::B),
        _ => None,
    }
}

/// Split "C#3" into its pitch class and the remaining text
fn split_pitch_class(input: &str) -> Result<(PitchClass, &str), ParseError> {
    let mut chars = input.chars();
    let first = chars.next().ok_or(ParseError::Empty)?;
    let letter = parse_letter(first).ok_or_else(|| ParseError::UnknownLetter {
        input: input.to_string(),
    })?;

    let rest = chars.as_str();
    let (modifier, rest) = if let Some(rest) = rest.strip_prefix('#') {
        (Modifier::Sharp, rest)
    } else if let Some(rest) = rest.strip_prefix('b') {
        (Modifier::Flat, rest)
    } else {
        (Modifier::None, rest)
    };

    Ok((PitchClass::new(letter, modifier), rest))
}

/// Parse a pitch such as "C3", "f#4", "Db2" or "B-1"
pub fn parse_pitch(input: &str) -> Result<Pitch, ParseError> {
    let trimmed = input.trim();
    let (pitch_class, octave_str) = split_pitch_class(trimmed)?;
    let invalid_octave = || ParseError::InvalidOctave {
        input: trimmed.to_string(),
    };
    let octave: i32 = octave_str.parse().map_err(|_| invalid_octave())?;
    let pitch = Pitch::from_parts(pitch_class, octave);
    // the absolute value must fit the i32 semitone domain
    pitch.checked_value().ok_or_else(invalid_octave)?;
    Ok(pitch)
}

/// Parse a pitch class such as "C", "F#" or "Bb"
pub fn parse_pitch_class(input: &str) -> Result<PitchClass, ParseError> {
    let trimmed = input.trim();
    let (pitch_class, rest) = split_pitch_class(trimmed)?;
    if !rest.is_empty() {
        return Err(ParseError::UnknownLetter {
            input: trimmed.to_string(),
        });
    }
    Ok(pitch_class)
}

/// Parse a list of pitches separated by whitespace or commas
pub fn parse_pitches(input: &str) -> Result<Vec<Pitch>, ParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(parse_pitch)
        .collect()
}

impl FromStr for Pitch {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pitch(s)
    }
}

impl FromStr for PitchClass {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pitch_class(s)
    }
}
