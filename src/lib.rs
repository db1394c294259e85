//! Pitch and chord arithmetic for an ear-training quiz.
//!
//! The engine models pitches as a pitch class plus an octave, derives
//! intervals and triads from a base pitch, draws random questions from a
//! bounded range and scores a user's selection against the answer.

pub mod chord;
pub mod error;
pub mod note;
pub mod parser;
pub mod quiz;
pub mod rng;
pub mod score;

pub use chord::ChordKind;
pub use error::{ParseError, QuizError, QuizResult};
pub use note::{Letter, Modifier, Pitch, PitchClass};
pub use quiz::{Question, Quiz, QuizConfig, QuizRange};
pub use score::{NoteState, ScoreSummary};
