use std::collections::BTreeSet;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use rand::Rng;
use thiserror::Error;

use chordquiz::parser::char_to_note;
use chordquiz::{NoteState, Pitch, Question, Quiz, QuizError, ScoreSummary};

use crate::synth;

const STATUS_ROW: u16 = 16;
const SELECTION_ROW: u16 = 17;
const GRID_ROW: u16 = 19;

#[derive(Debug, Error)]
pub enum ReplError {
    #[error("terminal: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Playback settings for the live quiz
#[derive(Debug, Clone, Copy)]
pub struct LiveOptions {
    pub mute: bool,
    pub beat_secs: f64,
}

struct Session<'a, R: Rng> {
    quiz: &'a Quiz,
    rng: &'a mut R,
    options: LiveOptions,
    question: Question,
    selection: BTreeSet<Pitch>,
    octave: i32,
    revealed: bool,
    answered: u32,
    correct: u32,
}

/// Run the interactive ear-training quiz
pub fn run<R: Rng>(quiz: &Quiz, rng: &mut R, options: LiveOptions) -> Result<(), ReplError> {
    let question = quiz.generate_question(&mut *rng)?;
    let octave = quiz.range().low.octave;
    let mut session = Session {
        quiz,
        rng,
        options,
        question,
        selection: BTreeSet::new(),
        octave,
        revealed: false,
        answered: 0,
        correct: 0,
    };

    let mut stdout = io::stdout();

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    print_banner(&mut stdout, quiz);
    session.redraw(&mut stdout, "listen...");
    session.play(&mut stdout);

    let result = session.event_loop(&mut stdout);

    let _ = execute!(stdout, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    println!(
        "Answered {} question(s), {} correct",
        session.answered, session.correct
    );
    result
}

impl<R: Rng> Session<'_, R> {
    fn event_loop(&mut self, stdout: &mut io::Stdout) -> Result<(), ReplError> {
        loop {
            if !event::poll(Duration::from_millis(50))? {
                continue;
            }

            let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            else {
                continue;
            };

            match code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Enter => self.submit(stdout),
                KeyCode::Backspace => {
                    self.selection.clear();
                    self.redraw(stdout, "selection cleared");
                }
                KeyCode::Char(' ') => self.play(stdout),
                KeyCode::Char('n') => self.next_question(stdout)?,
                KeyCode::Char(c) => self.handle_char(stdout, c),
                _ => {}
            }
        }
    }

    fn handle_char(&mut self, stdout: &mut io::Stdout, c: char) {
        // Octave change with number keys
        if let Some(digit) = c.to_digit(10) {
            self.octave = digit as i32;
            self.redraw(stdout, &format!("octave {}", self.octave));
            return;
        }

        let Some((pitch_class, oct_offset)) = char_to_note(c) else {
            return;
        };
        let pitch = Pitch::from_parts(pitch_class, self.octave + oct_offset);
        if !self.quiz.range().contains(pitch) {
            self.redraw(stdout, &format!("{} is outside {}", pitch, self.quiz.range()));
            return;
        }
        if !self.selection.remove(&pitch) {
            self.selection.insert(pitch);
        }
        self.redraw(stdout, &format!("toggled {}", pitch));
    }

    fn submit(&mut self, stdout: &mut io::Stdout) {
        let response: Vec<Pitch> = self.selection.iter().copied().collect();
        let grid = self.quiz.score(&self.question.pitches, &response);
        let summary = ScoreSummary::new(&self.question.pitches, &response);

        if !self.revealed {
            self.answered += 1;
            if summary.is_correct() {
                self.correct += 1;
            }
        }
        self.revealed = true;
        log::info!("{}: {:?}", self.question, summary);

        let verdict = if summary.is_correct() {
            format!("correct! it was {}", self.question)
        } else {
            format!(
                "it was {}: {} matched, {} missed, {} extra",
                self.question, summary.matched, summary.missed, summary.extra
            )
        };
        self.redraw(stdout, &verdict);
        draw_grid(stdout, &grid);
    }

    fn next_question(&mut self, stdout: &mut io::Stdout) -> Result<(), ReplError> {
        self.question = self.quiz.generate_question(&mut *self.rng)?;
        self.selection.clear();
        self.revealed = false;
        self.redraw(stdout, "listen...");
        self.play(stdout);
        Ok(())
    }

    fn play(&mut self, stdout: &mut io::Stdout) {
        if self.options.mute {
            let freqs: Vec<String> = self
                .question
                .frequencies()
                .iter()
                .map(|f| format!("{:.1} Hz", f))
                .collect();
            self.redraw(stdout, &format!("muted: {}", freqs.join(", ")));
            return;
        }
        if let Err(e) = synth::play_chord(&self.question.pitches, self.options.beat_secs) {
            log::warn!("playback failed: {}", e);
            self.redraw(stdout, &format!("playback failed: {}", e));
        }
    }

    fn redraw(&self, stdout: &mut io::Stdout, status: &str) {
        let selected: Vec<String> = self.selection.iter().map(|p| p.to_string()).collect();
        let _ = write!(
            stdout,
            "\x1b[{};1H\x1b[2K  Octave: {}  |  Score: {}/{}  |  {}\r",
            STATUS_ROW, self.octave, self.correct, self.answered, status
        );
        let _ = write!(
            stdout,
            "\x1b[{};1H\x1b[2K  Selected: {}\r",
            SELECTION_ROW,
            if selected.is_empty() {
                "---".to_string()
            } else {
                selected.join(" ")
            }
        );
        if !self.revealed {
            let rows = self.quiz.range().len().div_ceil(12) as u16;
            for row in GRID_ROW..GRID_ROW + rows {
                let _ = write!(stdout, "\x1b[{};1H\x1b[2K", row);
            }
        }
        let _ = stdout.flush();
    }
}

fn draw_grid(stdout: &mut io::Stdout, grid: &[(Pitch, NoteState)]) {
    for (row, chunk) in grid.chunks(12).enumerate() {
        let _ = write!(stdout, "\x1b[{};1H\x1b[2K  ", GRID_ROW + row as u16);
        for (pitch, state) in chunk {
            let label = format!("{:<5}", pitch.to_string());
            let _ = match state {
                NoteState::Matches => write!(stdout, "{}", label.as_str().green()),
                NoteState::DoesNotExist => write!(stdout, "{}", label.as_str().red()),
                NoteState::Default => write!(stdout, "{}", label.as_str().dark_grey()),
            };
        }
    }
    let _ = stdout.flush();
}

fn print_banner(stdout: &mut io::Stdout, quiz: &Quiz) {
    let banner = format!(
        "\x1b[2J\x1b[H\
chordquiz - name the notes you hear\r\n\
─────────────────────────────────────────\r\n\
\r\n\
  Natural notes:  a s d f g h j k l ; '\r\n\
                  C D E F G A B C D E F\r\n\
\r\n\
  Sharps:         w e   t y u   o p\r\n\
                  C# D#  F# G# A#  C# D#\r\n\
\r\n\
  Octave (0-9):   number keys    Range: {}\r\n\
  Submit: Enter   Replay: Space   Clear: Backspace\r\n\
  Next: n         Quit: Esc\r\n\
\r\n",
        quiz.range()
    );
    let _ = write!(stdout, "{}", banner);
    let _ = stdout.flush();
}
