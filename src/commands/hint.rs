//! Hint command
//!
//! Reports what a player's guesses leave open for a day's puzzle: the number
//! of consistent secrets and the digits worth typing next.

use crate::core::{DigitSet, Sequence};
use crate::daily::Puzzle;
use crate::solver::Engine;

/// Candidates and suggested next digits after a set of guesses
pub struct HintResult {
    pub history: Vec<Sequence>,
    pub prefix: Sequence,
    pub candidate_count: usize,
    pub next_digits: DigitSet,
    /// Consistent secrets, filled in only when few remain
    pub candidates: Vec<Sequence>,
}

/// Candidates listed in full at or below this count
pub const LIST_THRESHOLD: usize = 10;

/// Compute hints for `puzzle` after `guesses`, typing `prefix` next
///
/// # Errors
///
/// Returns an error if a guess or the prefix is malformed or has the wrong
/// length for the puzzle.
pub fn hint_for(
    puzzle: &Puzzle,
    guesses: &[String],
    prefix: &str,
    engine: &Engine,
) -> Result<HintResult, String> {
    let secret = puzzle.secret();
    let history = guesses
        .iter()
        .map(|text| Sequence::parse(text).map_err(|e| format!("Invalid guess '{text}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    let prefix = Sequence::parse(prefix).map_err(|e| format!("Invalid prefix: {e}"))?;

    let candidates = engine
        .search_candidates(&secret, &history)
        .map_err(|e| e.to_string())?;
    let next_digits = engine
        .suggest_next_digits(&secret, &history, &prefix)
        .map_err(|e| e.to_string())?;

    let listed = if candidates.len() <= LIST_THRESHOLD {
        candidates.as_slice().to_vec()
    } else {
        Vec::new()
    };

    Ok(HintResult {
        history,
        prefix,
        candidate_count: candidates.len(),
        next_digits,
        candidates: listed,
    })
}
