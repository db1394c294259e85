//! Error types for the quiz engine.

use thiserror::Error;

/// Result type for quiz operations.
pub type QuizResult<T> = Result<T, QuizError>;

/// Errors raised while configuring the quiz or drawing a question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The quiz range contains no pitches.
    #[error("quiz range is empty")]
    EmptyRange,

    /// No chord kinds were configured.
    #[error("no chord kinds configured")]
    NoChords,

    /// The retry cap was set to zero.
    #[error("max attempts must be at least 1")]
    ZeroAttempts,

    /// Every candidate chord fell outside the range.
    #[error("no question fits the range after {attempts} attempts")]
    GenerationExhausted {
        /// Number of candidates drawn before giving up.
        attempts: u32,
    },
}

/// Errors raised while reading pitch notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing to parse.
    #[error("empty pitch")]
    Empty,

    /// The first character is not a note letter.
    #[error("unknown note letter in '{input}'")]
    UnknownLetter {
        /// The offending text.
        input: String,
    },

    /// The octave part is missing or not an integer.
    #[error("invalid octave in '{input}'")]
    InvalidOctave {
        /// The offending text.
        input: String,
    },

    /// Not a known chord kind name.
    #[error("unknown chord kind '{input}'")]
    UnknownChord {
        /// The offending text.
        input: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_message_names_attempts() {
        let err = QuizError::GenerationExhausted { attempts: 12 };
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn test_parse_error_names_input() {
        let err = ParseError::UnknownLetter {
            input: "H4".to_string(),
        };
        assert!(err.to_string().contains("H4"));
    }
}
