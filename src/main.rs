//! Disnumber - CLI
//!
//! Daily distinct-digit code-breaking game with TUI and CLI modes.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand, builder::TypedValueParser};
use disnumber::{
    commands::{
        SolveConfig, check_feedback, hint_for, run_benchmark, run_simple, run_survey,
        solve_puzzle,
    },
    core::Sequence,
    daily::{DEFAULT_DIGITS, GameDate, Puzzle},
    game::{GameSession, MAX_GUESS_COUNT},
    output::{
        print_benchmark_result, print_check_result, print_hint_result, print_secret,
        print_solve_result, print_survey_statistics,
    },
    solver::{Engine, EngineConfig, MatchRule},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "disnumber",
    about = "Daily distinct-digit code-breaking game with deductive hints",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Number of distinct digits in the secret (1-10)
    #[arg(short, long, global = true, default_value_t = DEFAULT_DIGITS,
          value_parser = clap::value_parser!(u8).range(1..=10).map(usize::from))]
    digits: usize,

    /// Game date as YYYY-MM-DD (default: today, UTC; future dates clamp to today)
    #[arg(long, global = true)]
    date: Option<String>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Capacity of the candidate search cache
    #[arg(long, global = true)]
    search_cache: Option<usize>,

    /// Match candidates on dead/injured counts instead of digit sets
    #[arg(long, global = true)]
    legacy_counts: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play {
        /// Guesses already made today, comma separated, to resume a game
        #[arg(long, value_delimiter = ',')]
        guesses: Vec<String>,
    },

    /// Simple CLI mode (line-based game without TUI)
    Simple {
        /// Guesses already made today, comma separated, to resume a game
        #[arg(long, value_delimiter = ',')]
        guesses: Vec<String>,
    },

    /// Print the day's secret
    Secret,

    /// Show the feedback one sequence gives another
    Check {
        /// Reference sequence (usually the secret)
        reference: String,

        /// Candidate sequence (usually a guess)
        candidate: String,
    },

    /// Show candidates and next-digit hints after some guesses
    Hint {
        /// Guesses made so far
        guesses: Vec<String>,

        /// Digits already typed for the next guess
        #[arg(short, long, default_value = "")]
        prefix: String,
    },

    /// Auto-play the day, always guessing the first remaining candidate
    Solve {
        /// Show candidate counts per turn
        #[arg(short, long)]
        verbose: bool,
    },

    /// Auto-play random past days and time the searches
    Benchmark {
        /// Number of random days to play
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,

        /// Seed for reproducible day selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Tally secret digits by position over consecutive days
    Survey {
        /// Number of days, ending at the game date
        #[arg(long, default_value = "366")]
        days: usize,
    },
}

fn init_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn engine_config(cli: &Cli) -> EngineConfig {
    let mut config = EngineConfig::default();
    if cli.legacy_counts {
        config = config.with_match_rule(MatchRule::Counts);
    }
    if let Some(capacity) = cli.search_cache {
        config = config.with_search_capacity(capacity);
    }
    config
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli
        .command
        .take()
        .unwrap_or(Commands::Play { guesses: Vec::new() });

    // The TUI owns the terminal, so it gets no log writer
    if !matches!(command, Commands::Play { .. }) {
        init_logging(&cli.log_level);
    }

    let today = GameDate::today();
    let date = GameDate::resolve(cli.date.as_deref(), today)?;
    let puzzle = Puzzle::new(date, cli.digits);
    let engine = Engine::new(engine_config(&cli));
    info!(date = %date, digits = puzzle.num_digits, "puzzle selected");

    match command {
        Commands::Play { guesses } => {
            let session = resume_session(&engine, puzzle, &guesses)?;
            run_play_command(&engine, session, today)
        }
        Commands::Simple { guesses } => {
            let session = resume_session(&engine, puzzle, &guesses)?;
            run_simple(session).map_err(|e| anyhow!(e))
        }
        Commands::Secret => {
            print_secret(&puzzle, &puzzle.secret());
            Ok(())
        }
        Commands::Check {
            reference,
            candidate,
        } => {
            let result = check_feedback(&reference, &candidate, &engine).map_err(|e| anyhow!(e))?;
            print_check_result(&result);
            Ok(())
        }
        Commands::Hint { guesses, prefix } => {
            let result = hint_for(&puzzle, &guesses, &prefix, &engine).map_err(|e| anyhow!(e))?;
            print_hint_result(&result);
            Ok(())
        }
        Commands::Solve { verbose } => {
            let result =
                solve_puzzle(SolveConfig::new(puzzle), &engine).map_err(|e| anyhow!(e))?;
            print_solve_result(&result, verbose);
            Ok(())
        }
        Commands::Benchmark { count, seed } => {
            run_benchmark_command(&engine, puzzle, count, seed);
            Ok(())
        }
        Commands::Survey { days } => run_survey_command(puzzle, days),
    }
}

fn run_benchmark_command(engine: &Engine, puzzle: Puzzle, count: usize, seed: Option<u64>) {
    println!(
        "Running benchmark on {count} random days up to {} ({} digits)...",
        puzzle.date, puzzle.num_digits
    );

    let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let result = run_benchmark(engine, puzzle.num_digits, count, puzzle.date, &mut rng);
    print_benchmark_result(&result);
}

fn run_survey_command(puzzle: Puzzle, days: usize) -> Result<()> {
    let back = days.saturating_sub(1) as u64;
    let start = puzzle
        .date
        .days_before(back)
        .context("survey range starts before the earliest supported date")?;

    println!("\n{}", "═".repeat(70));
    println!(" Daily Secret Survey ");
    println!("{}", "═".repeat(70));
    println!(
        "\nDeriving {days} secrets of {} digits ending {}\n",
        puzzle.num_digits, puzzle.date
    );

    let stats = run_survey(start, days, puzzle.num_digits, true);
    print_survey_statistics(&stats);
    Ok(())
}

/// Parse saved guesses for a day, as a player would have typed them
fn parse_saved_guesses(texts: &[String]) -> Result<Vec<Sequence>> {
    if texts.len() > MAX_GUESS_COUNT {
        bail!("At most {MAX_GUESS_COUNT} guesses fit in one game");
    }
    texts
        .iter()
        .map(|text| {
            let guess = Sequence::parse(text)
                .with_context(|| format!("Invalid saved guess '{text}'"))?;
            if guess.is_empty() {
                bail!("Saved guesses must not be empty");
            }
            if !guess.has_distinct_digits() {
                bail!("Saved guess '{text}' repeats a digit");
            }
            Ok(guess)
        })
        .collect()
}

/// A fresh game for the day, or the saved one when guesses are given
///
/// Saved guesses fix the digit count, overriding `--digits`.
fn resume_session<'e>(
    engine: &'e Engine,
    puzzle: Puzzle,
    texts: &[String],
) -> Result<GameSession<'e>> {
    let guesses = parse_saved_guesses(texts)?;
    if !guesses.is_empty() {
        info!(guesses = guesses.len(), "resuming saved game");
    }
    GameSession::resume(engine, puzzle.date, puzzle.num_digits, guesses).map_err(|e| anyhow!(e))
}

fn run_play_command(engine: &Engine, session: GameSession<'_>, today: GameDate) -> Result<()> {
    use disnumber::interactive::{App, run_tui};

    let app = App::from_session(engine, session, today);
    run_tui(app)
}
