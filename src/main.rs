mod repl;
mod synth;

use chordquiz::parser::parse_pitches;
use chordquiz::quiz::DEFAULT_MAX_ATTEMPTS;
use chordquiz::rng::create_rng_or_entropy;
use chordquiz::score::score;
use chordquiz::{ChordKind, NoteState, Pitch, Quiz, QuizConfig, QuizRange, ScoreSummary};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chordquiz", about = "Ear-training quiz for intervals and triads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive quiz: hear a chord, pick its notes on the keyboard
    Quiz {
        #[command(flatten)]
        quiz: QuizArgs,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Draw one question and print its notes
    Question {
        #[command(flatten)]
        quiz: QuizArgs,

        #[command(flatten)]
        playback: PlaybackArgs,
    },

    /// Grade a response against an answer, e.g. --answer "C3 E3 G3" --response "C3 G3"
    Score {
        /// Pitches of the correct chord
        #[arg(long)]
        answer: String,

        /// Pitches the user selected
        #[arg(long, default_value = "")]
        response: String,

        /// Lowest pitch of the grid (inclusive)
        #[arg(long, default_value = "C3")]
        low: Pitch,

        /// Top of the grid (exclusive)
        #[arg(long, default_value = "C5")]
        high: Pitch,
    },

    /// Print the frequency of each pitch
    Freq {
        /// Pitches such as A4, C#3 or Db5
        #[arg(required = true)]
        pitches: Vec<Pitch>,
    },
}

#[derive(Args)]
struct QuizArgs {
    /// Lowest pitch a question may use (inclusive)
    #[arg(long, default_value = "C3")]
    low: Pitch,

    /// Top of the question range (exclusive)
    #[arg(long, default_value = "C5")]
    high: Pitch,

    /// Chord kinds to draw from
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "major-third,major-fifth,major,minor"
    )]
    chords: Vec<ChordKind>,

    /// Give up after this many candidates that leave the range
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Seed for a reproducible sequence of questions
    #[arg(long)]
    seed: Option<u64>,
}

impl QuizArgs {
    fn config(&self) -> QuizConfig {
        QuizConfig {
            range: QuizRange::new(self.low, self.high),
            chords: self.chords.clone(),
            max_attempts: self.max_attempts,
        }
    }
}

#[derive(Args)]
struct PlaybackArgs {
    /// Do not open the audio device
    #[arg(long)]
    mute: bool,

    /// Seconds per arpeggiated note
    #[arg(long, default_value_t = 0.6, value_parser = parse_beat)]
    beat: f64,
}

fn parse_beat(s: &str) -> Result<f64, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a number of seconds", s))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("beat must be a positive number of seconds, got {}", s));
    }
    Ok(secs)
}

fn main() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    let cli = Cli::parse();

    match cli.command {
        Command::Quiz { quiz, playback } => {
            let engine = build_quiz(&quiz);
            let mut rng = create_rng_or_entropy(quiz.seed);
            let options = repl::LiveOptions {
                mute: playback.mute,
                beat_secs: playback.beat,
            };
            if let Err(e) = repl::run(&engine, &mut rng, options) {
                fail(&format!("Quiz error: {}", e));
            }
        }
        Command::Question { quiz, playback } => {
            let engine = build_quiz(&quiz);
            let mut rng = create_rng_or_entropy(quiz.seed);
            let question = engine
                .generate_question(&mut rng)
                .unwrap_or_else(|e| fail(&format!("Question error: {}", e)));

            println!("{}", question);
            for pitch in &question.pitches {
                println!("  {:<4} ({:.2} Hz)", pitch.to_string(), pitch.frequency());
            }

            if !playback.mute {
                if let Err(e) = synth::play_chord(&question.pitches, playback.beat) {
                    fail(&format!("Playback error: {}", e));
                }
            }
        }
        Command::Score {
            answer,
            response,
            low,
            high,
        } => {
            let answer = parse_list(&answer);
            let response = parse_list(&response);
            let grid = score(QuizRange::new(low, high), &answer, &response);
            print_grid(&grid);
            let summary = ScoreSummary::new(&answer, &response);
            println!();
            println!(
                "{} matched, {} missed, {} extra{}",
                summary.matched,
                summary.missed,
                summary.extra,
                if summary.is_correct() { " - correct" } else { "" }
            );
        }
        Command::Freq { pitches } => {
            for pitch in pitches {
                println!("{:<4} {:.2} Hz", pitch.to_string(), pitch.frequency());
            }
        }
    }
}

fn build_quiz(args: &QuizArgs) -> Quiz {
    let config = args.config();
    log::debug!("quiz config: {:?}", config);
    Quiz::new(config).unwrap_or_else(|e| fail(&format!("Config error: {}", e)))
}

fn parse_list(input: &str) -> Vec<Pitch> {
    parse_pitches(input).unwrap_or_else(|e| fail(&format!("Parse error: {}", e)))
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn print_grid(grid: &[(Pitch, NoteState)]) {
    for (pitch, state) in grid {
        let mark = match state {
            NoteState::Matches => "matches",
            NoteState::DoesNotExist => "missing",
            NoteState::Default => "",
        };
        println!("  {:<4} {}", pitch.to_string(), mark);
    }
}
