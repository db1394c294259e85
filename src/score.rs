//! Grading a user's selection against the answer chord.

use crate::note::Pitch;
use crate::quiz::QuizRange;

/// Per-pitch result of a scoring pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteState {
    /// Not part of the answer
    #[default]
    Default,
    /// Part of the answer but not selected
    DoesNotExist,
    /// Part of the answer and selected
    Matches,
}

/// Classify every pitch of `range`, ascending.
///
/// Selecting a pitch outside the answer is not flagged; it stays `Default`.
pub fn score(range: QuizRange, answer: &[Pitch], response: &[Pitch]) -> Vec<(Pitch, NoteState)> {
    range
        .pitches()
        .map(|pitch| (pitch, classify(pitch, answer, response)))
        .collect()
}

fn classify(pitch: Pitch, answer: &[Pitch], response: &[Pitch]) -> NoteState {
    if !answer.contains(&pitch) {
        NoteState::Default
    } else if response.contains(&pitch) {
        NoteState::Matches
    } else {
        NoteState::DoesNotExist
    }
}

/// Counts for reporting a graded response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreSummary {
    pub matched: usize,
    pub missed: usize,
    /// Selected pitches that are not in the answer
    pub extra: usize,
}

impl ScoreSummary {
    pub fn new(answer: &[Pitch], response: &[Pitch]) -> Self {
        let mut summary = Self::default();
        let mut seen: Vec<Pitch> = Vec::with_capacity(answer.len());
        for &pitch in answer {
            if seen.contains(&pitch) {
                continue;
            }
            seen.push(pitch);
            if response.contains(&pitch) {
                summary.matched += 1;
            } else {
                summary.missed += 1;
            }
        }
        let mut extras: Vec<Pitch> = response
            .iter()
            .copied()
            .filter(|p| !answer.contains(p))
            .collect();
        extras.sort();
        extras.dedup();
        summary.extra = extras.len();
        summary
    }

    pub fn is_correct(&self) -> bool {
        self.missed == 0 && self.extra == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::ChordKind;
    use crate::note::{Letter, Modifier, PitchClass};
    use pretty_assertions::assert_eq;

    fn states_for(grid: &[(Pitch, NoteState)], state: NoteState) -> Vec<String> {
        grid.iter()
            .filter(|(_, s)| *s == state)
            .map(|(p, _)| p.to_string())
            .collect()
    }

    #[test]
    fn test_c_major_partial_response() {
        let c3 = Pitch::natural(Letter::C, 3);
        let answer = ChordKind::Major.generate(c3);
        let response = vec![c3, Pitch::natural(Letter::G, 3)];
        let grid = score(QuizRange::default(), &answer, &response);

        assert_eq!(grid.len(), 24);
        assert_eq!(states_for(&grid, NoteState::Matches), vec!["C3", "G3"]);
        assert_eq!(states_for(&grid, NoteState::DoesNotExist), vec!["E3"]);
        assert_eq!(states_for(&grid, NoteState::Default).len(), 21);
    }

    #[test]
    fn test_grid_is_ascending_over_range() {
        let grid = score(QuizRange::default(), &[], &[]);
        let values: Vec<i32> = grid.iter().map(|(p, _)| p.value()).collect();
        assert_eq!(values, (36..60).collect::<Vec<_>>());
        assert!(grid.iter().all(|(_, s)| *s == NoteState::Default));
    }

    #[test]
    fn test_wrong_selection_stays_default() {
        let c3 = Pitch::natural(Letter::C, 3);
        let answer = ChordKind::MajorThird.generate(c3);
        let wrong = Pitch::natural(Letter::D, 3);
        let grid = score(QuizRange::default(), &answer, &[wrong]);
        let d3 = grid.iter().find(|(p, _)| *p == wrong).unwrap();
        assert_eq!(d3.1, NoteState::Default);
        assert_eq!(states_for(&grid, NoteState::DoesNotExist), vec!["C3", "E3"]);
    }

    #[test]
    fn test_flat_spelling_matches() {
        let answer = vec![Pitch::from_int(37)];
        let d_flat = Pitch::from_parts(PitchClass::new(Letter::D, Modifier::Flat), 3);
        let grid = score(QuizRange::default(), &answer, &[d_flat]);
        assert_eq!(states_for(&grid, NoteState::Matches), vec!["C#3"]);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let answer = ChordKind::Minor.generate(Pitch::natural(Letter::D, 3));
        let response = vec![Pitch::natural(Letter::D, 3)];
        let first = score(QuizRange::default(), &answer, &response);
        let second = score(QuizRange::default(), &answer, &response);
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary() {
        let c3 = Pitch::natural(Letter::C, 3);
        let answer = ChordKind::Major.generate(c3);

        let exact = ScoreSummary::new(&answer, &answer);
        assert_eq!(
            exact,
            ScoreSummary {
                matched: 3,
                missed: 0,
                extra: 0
            }
        );
        assert!(exact.is_correct());

        let partial = ScoreSummary::new(&answer, &[c3, c3 + 1, c3 + 1]);
        assert_eq!(
            partial,
            ScoreSummary {
                matched: 1,
                missed: 2,
                extra: 1
            }
        );
        assert!(!partial.is_correct());
    }
}
