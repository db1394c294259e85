//! Question generation.
//!
//! A [`Quiz`] draws a base pitch and a chord kind uniformly at random and
//! keeps the candidate only when every note lands inside the quiz range.
//! Candidates that spill out are redrawn, up to a fixed number of attempts.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::chord::ChordKind;
use crate::error::{QuizError, QuizResult};
use crate::note::{Letter, Pitch};
use crate::score::{self, NoteState};

/// Default cap on candidate draws per question
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Closed-open window `[low, high)` of pitches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRange {
    pub low: Pitch,
    pub high: Pitch,
}

impl QuizRange {
    /// An inverted window is treated as empty
    pub fn new(low: Pitch, high: Pitch) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, pitch: Pitch) -> bool {
        self.low <= pitch && pitch < self.high
    }

    pub fn len(&self) -> usize {
        (self.high - self.low).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every pitch in the window, ascending
    pub fn pitches(&self) -> impl Iterator<Item = Pitch> + use<> {
        let low = self.low.value() as i64;
        let high = (low + self.len() as i64).min(i32::MAX as i64 + 1);
        (low..high).filter_map(|n| i32::try_from(n).ok().map(Pitch::from_int))
    }

    /// The `index`-th pitch above `low`
    pub fn nth(&self, index: usize) -> Option<Pitch> {
        if index >= self.len() {
            return None;
        }
        let n = self.low.value() as i64 + index as i64;
        i32::try_from(n).ok().map(Pitch::from_int)
    }
}

impl Default for QuizRange {
    /// Two octaves from C3 up to, but excluding, C5
    fn default() -> Self {
        Self::new(Pitch::natural(Letter::C, 3), Pitch::natural(Letter::C, 5))
    }
}

impl fmt::Display for QuizRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.low, self.high)
    }
}

/// Settings for a [`Quiz`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub range: QuizRange,
    pub chords: Vec<ChordKind>,
    pub max_attempts: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            range: QuizRange::default(),
            chords: ChordKind::ALL.to_vec(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// An accepted question: the chord and how it was built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: ChordKind,
    pub base: Pitch,
    pub pitches: Vec<Pitch>,
}

impl Question {
    /// Frequencies of the chord's notes, lowest first
    pub fn frequencies(&self) -> Vec<f64> {
        self.pitches.iter().map(|p| p.frequency()).collect()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.base, self.kind)
    }
}

/// The question engine
#[derive(Debug, Clone)]
pub struct Quiz {
    config: QuizConfig,
}

impl Quiz {
    pub fn new(config: QuizConfig) -> QuizResult<Self> {
        if config.chords.is_empty() {
            return Err(QuizError::NoChords);
        }
        if config.max_attempts == 0 {
            return Err(QuizError::ZeroAttempts);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn range(&self) -> QuizRange {
        self.config.range
    }

    /// Draw a chord whose notes all lie inside the range
    pub fn generate_question<R: Rng + ?Sized>(&self, rng: &mut R) -> QuizResult<Question> {
        let range = self.config.range;
        if range.is_empty() {
            return Err(QuizError::EmptyRange);
        }

        for attempt in 1..=self.config.max_attempts {
            let base = range
                .nth(rng.gen_range(0..range.len()))
                .ok_or(QuizError::EmptyRange)?;
            let kind = *self
                .config
                .chords
                .choose(rng)
                .ok_or(QuizError::NoChords)?;
            let pitches = kind.generate(base);

            if pitches.iter().all(|&p| range.contains(p)) {
                log::debug!("accepted {} {} after {} attempt(s)", base, kind, attempt);
                return Ok(Question {
                    kind,
                    base,
                    pitches,
                });
            }
            log::trace!("rejected {} {}: leaves range {}", base, kind, range);
        }

        log::warn!(
            "gave up after {} attempts in range {}",
            self.config.max_attempts,
            range
        );
        Err(QuizError::GenerationExhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// Grade `response` against `answer` over this quiz's range
    pub fn score(&self, answer: &[Pitch], response: &[Pitch]) -> Vec<(Pitch, NoteState)> {
        score::score(self.config.range, answer, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    fn pitch(n: i32) -> Pitch {
        Pitch::from_int(n)
    }

    #[test]
    fn test_default_range() {
        let range = QuizRange::default();
        assert_eq!(range.len(), 24);
        assert_eq!(range.low.value(), 36);
        assert!(range.contains(pitch(36)));
        assert!(range.contains(pitch(59)));
        assert!(!range.contains(pitch(60)));
        assert!(!range.contains(pitch(35)));
    }

    #[test]
    fn test_range_pitches_ascending() {
        let range = QuizRange::new(pitch(36), pitch(40));
        let labels: Vec<String> = range.pitches().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["C3", "C#3", "D3", "D#3"]);
        assert_eq!(range.nth(3), Some(pitch(39)));
        assert_eq!(range.nth(4), None);
    }

    #[test]
    fn test_range_at_i32_edges() {
        let range = QuizRange::new(pitch(i32::MIN), pitch(i32::MIN + 3));
        assert_eq!(range.len(), 3);
        assert_eq!(range.nth(2), Some(pitch(i32::MIN + 2)));

        let top = QuizRange::new(pitch(i32::MAX - 2), pitch(i32::MAX));
        let values: Vec<i32> = top.pitches().map(|p| p.value()).collect();
        assert_eq!(values, vec![i32::MAX - 2, i32::MAX - 1]);

        let wide = QuizRange::new(pitch(i32::MIN), pitch(i32::MAX));
        assert_eq!(wide.len(), u32::MAX as usize);
        assert_eq!(wide.nth(wide.len() - 1), Some(pitch(i32::MAX - 1)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = QuizRange::new(pitch(50), pitch(40));
        assert!(range.is_empty());
        assert_eq!(range.pitches().count(), 0);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let no_chords = QuizConfig {
            chords: Vec::new(),
            ..QuizConfig::default()
        };
        assert_eq!(Quiz::new(no_chords).unwrap_err(), QuizError::NoChords);

        let zero = QuizConfig {
            max_attempts: 0,
            ..QuizConfig::default()
        };
        assert_eq!(Quiz::new(zero).unwrap_err(), QuizError::ZeroAttempts);
    }

    #[test]
    fn test_generated_questions_stay_in_range() {
        let quiz = Quiz::new(QuizConfig::default()).unwrap();
        let mut rng = create_rng(1);
        for _ in 0..500 {
            let question = quiz.generate_question(&mut rng).unwrap();
            assert!(question.pitches.iter().all(|&p| quiz.range().contains(p)));
            assert_eq!(question.pitches, question.kind.generate(question.base));
        }
    }

    #[test]
    fn test_same_seed_same_questions() {
        let quiz = Quiz::new(QuizConfig::default()).unwrap();
        let mut rng1 = create_rng(99);
        let mut rng2 = create_rng(99);
        for _ in 0..20 {
            assert_eq!(
                quiz.generate_question(&mut rng1).unwrap(),
                quiz.generate_question(&mut rng2).unwrap()
            );
        }
    }

    #[test]
    fn test_empty_range_fails_fast() {
        let config = QuizConfig {
            range: QuizRange::new(pitch(40), pitch(40)),
            ..QuizConfig::default()
        };
        let quiz = Quiz::new(config).unwrap();
        let mut rng = create_rng(0);
        assert_eq!(quiz.generate_question(&mut rng), Err(QuizError::EmptyRange));
    }

    #[test]
    fn test_narrow_range_exhausts() {
        // three semitones cannot hold a triad
        let config = QuizConfig {
            range: QuizRange::new(pitch(36), pitch(39)),
            chords: vec![ChordKind::Major],
            max_attempts: 25,
        };
        let quiz = Quiz::new(config).unwrap();
        let mut rng = create_rng(0);
        assert_eq!(
            quiz.generate_question(&mut rng),
            Err(QuizError::GenerationExhausted { attempts: 25 })
        );
    }

    #[test]
    fn test_single_fit_is_found() {
        // only C3 can carry a major third inside [C3, F3)
        let config = QuizConfig {
            range: QuizRange::new(pitch(36), pitch(41)),
            chords: vec![ChordKind::MajorThird],
            max_attempts: 10_000,
        };
        let quiz = Quiz::new(config).unwrap();
        let mut rng = create_rng(5);
        let question = quiz.generate_question(&mut rng).unwrap();
        assert_eq!(question.base, pitch(36));
        assert_eq!(question.to_string(), "C3 major-third");
    }
}
