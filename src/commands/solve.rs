//! Auto-play command
//!
//! Plays a day's puzzle by always guessing the first remaining candidate and
//! records how each guess narrows the field.

use crate::core::{Feedback, Sequence};
use crate::daily::Puzzle;
use crate::game::MAX_GUESS_COUNT;
use crate::solver::Engine;

/// Configuration for an auto-play run
pub struct SolveConfig {
    pub puzzle: Puzzle,
    pub max_guesses: usize,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            max_guesses: MAX_GUESS_COUNT,
        }
    }
}

/// Result of auto-playing a puzzle
pub struct SolveResult {
    pub success: bool,
    pub guesses: Vec<GuessStep>,
    pub secret: Sequence,
}

/// A single guess step in the solution
pub struct GuessStep {
    pub guess: Sequence,
    pub feedback: Feedback,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Auto-play a puzzle with the first-candidate strategy
///
/// # Errors
///
/// Returns an error if the candidate set runs dry, which would mean the
/// engine disagrees with its own feedback.
pub fn solve_puzzle(config: SolveConfig, engine: &Engine) -> Result<SolveResult, String> {
    let secret = config.puzzle.secret();
    let mut history: Vec<Sequence> = Vec::new();
    let mut guesses: Vec<GuessStep> = Vec::new();

    for _ in 0..config.max_guesses {
        let candidates = engine
            .search_candidates(&secret, &history)
            .map_err(|e| e.to_string())?;

        let guess = *candidates
            .iter()
            .next()
            .ok_or_else(|| "No candidates remaining".to_string())?;

        let feedback = engine
            .evaluate_feedback(&secret, &guess)
            .map_err(|e| e.to_string())?;
        history.push(guess);

        let candidates_after = engine
            .search_candidates(&secret, &history)
            .map_err(|e| e.to_string())?
            .len();

        guesses.push(GuessStep {
            guess,
            feedback,
            candidates_before: candidates.len(),
            candidates_after,
        });

        if guess == secret {
            return Ok(SolveResult {
                success: true,
                guesses,
                secret,
            });
        }
    }

    Ok(SolveResult {
        success: false,
        guesses,
        secret,
    })
}
