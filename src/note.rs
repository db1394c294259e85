use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

/// Semitones per octave
pub const OCTAVE: i32 = 12;

/// Frequency of the reference pitch A4 in Hz
pub const A4_FREQ: f64 = 440.0;

/// Natural note letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Semitone offset within an octave (C=0, B=11)
    pub fn offset(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Accidental applied to a letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modifier {
    Sharp,
    #[default]
    None,
    Flat,
}

impl Modifier {
    pub fn offset(self) -> i32 {
        match self {
            Modifier::Sharp => 1,
            Modifier::None => 0,
            Modifier::Flat => -1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Modifier::Sharp => "#",
            Modifier::None => "",
            Modifier::Flat => "b",
        }
    }
}

/// Spelling of each semitone: the natural at that position, else the sharp
/// of the natural below
const SPELLINGS: [PitchClass; 12] = [
    PitchClass::natural(Letter::C),
    PitchClass::new(Letter::C, Modifier::Sharp),
    PitchClass::natural(Letter::D),
    PitchClass::new(Letter::D, Modifier::Sharp),
    PitchClass::natural(Letter::E),
    PitchClass::natural(Letter::F),
    PitchClass::new(Letter::F, Modifier::Sharp),
    PitchClass::natural(Letter::G),
    PitchClass::new(Letter::G, Modifier::Sharp),
    PitchClass::natural(Letter::A),
    PitchClass::new(Letter::A, Modifier::Sharp),
    PitchClass::natural(Letter::B),
];

/// One of the twelve semitone positions, spelled as a letter and modifier.
///
/// Equality, hashing and ordering only look at the effective semitone
/// (`value() mod 12`), so `C#` and `Db` compare equal.
#[derive(Debug, Clone, Copy)]
pub struct PitchClass {
    pub letter: Letter,
    pub modifier: Modifier,
}

impl PitchClass {
    pub const fn new(letter: Letter, modifier: Modifier) -> Self {
        Self { letter, modifier }
    }

    pub const fn natural(letter: Letter) -> Self {
        Self::new(letter, Modifier::None)
    }

    /// Build from any integer, normalised into 0..12.
    ///
    /// Black keys are always spelled as the sharp of the natural below.
    pub fn from_int(n: i32) -> Self {
        SPELLINGS[n.rem_euclid(OCTAVE) as usize]
    }

    /// Letter offset plus modifier; -1 for Cb, 12 for B#
    pub fn value(self) -> i32 {
        self.letter.offset() + self.modifier.offset()
    }

    /// Effective semitone in 0..12
    pub fn semitone(self) -> i32 {
        self.value().rem_euclid(OCTAVE)
    }
}

impl PartialEq for PitchClass {
    fn eq(&self, other: &Self) -> bool {
        self.semitone() == other.semitone()
    }
}

impl Eq for PitchClass {}

impl Hash for PitchClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semitone().hash(state);
    }
}

impl PartialOrd for PitchClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PitchClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semitone().cmp(&other.semitone())
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.modifier.symbol())
    }
}

/// A pitch class in a given octave.
///
/// The absolute value counts semitones from C0, so C3 = 36 and A4 = 57.
/// Comparison is by absolute value, independent of spelling.
///
/// Absolute values live in the `i32` domain. Every pitch from
/// [`Pitch::from_int`] or the parser lies inside it, and [`Pitch::transpose`]
/// saturates at its edges. Only [`Pitch::from_parts`] with an extreme octave
/// can leave it, in which case [`Pitch::value`] saturates too.
#[derive(Debug, Clone, Copy)]
pub struct Pitch {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

impl Pitch {
    /// The reference pitch for frequency calculation
    pub const A4: Pitch = Pitch::from_parts(PitchClass::natural(Letter::A), 4);

    pub const fn from_parts(pitch_class: PitchClass, octave: i32) -> Self {
        Self {
            pitch_class,
            octave,
        }
    }

    pub const fn natural(letter: Letter, octave: i32) -> Self {
        Self::from_parts(PitchClass::natural(letter), octave)
    }

    /// Build from an absolute semitone value using floor division,
    /// so 12 is C1 and -1 is B-1.
    pub fn from_int(n: i32) -> Self {
        Self {
            pitch_class: PitchClass::from_int(n.rem_euclid(OCTAVE)),
            octave: n.div_euclid(OCTAVE),
        }
    }

    /// Absolute semitone value without overflow, for any octave
    pub fn wide_value(self) -> i64 {
        self.pitch_class.value() as i64 + self.octave as i64 * OCTAVE as i64
    }

    /// Absolute semitone value, if it fits the `i32` domain
    pub fn checked_value(self) -> Option<i32> {
        i32::try_from(self.wide_value()).ok()
    }

    /// Absolute semitone value
    pub fn value(self) -> i32 {
        self.wide_value().clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Shift by `semitones`, respelling with the sharp convention
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_int(self.value().saturating_add(semitones))
    }

    /// Frequency in Hz, 12-TET anchored at A4 = 440 Hz
    pub fn frequency(self) -> f64 {
        let steps = self - Pitch::A4;
        if steps == 0 {
            return A4_FREQ;
        }
        A4_FREQ * 2.0_f64.powf(steps as f64 / OCTAVE as f64)
    }
}

impl Add<i32> for Pitch {
    type Output = Pitch;

    fn add(self, semitones: i32) -> Pitch {
        self.transpose(semitones)
    }
}

impl Sub for Pitch {
    type Output = i64;

    /// Signed distance in semitones
    fn sub(self, other: Pitch) -> i64 {
        self.wide_value() - other.wide_value()
    }
}

impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        self.wide_value() == other.wide_value()
    }
}

impl Eq for Pitch {}

impl Hash for Pitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.wide_value().hash(state);
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wide_value().cmp(&other.wide_value())
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}
