//! Next-digit suggestions
//!
//! Answers "which digit can come next without ruling out every solution". This
//! is a feasibility hint, not a ranking.

use super::search::CandidateSet;
use crate::core::{DigitSet, Sequence};

/// True while hints are meaningful: the staged guess is not full and the
/// game has not already been solved
#[must_use]
pub fn hints_apply(secret: &Sequence, history: &[Sequence], prefix: &Sequence) -> bool {
    prefix.len() < secret.len() && history.last() != Some(secret)
}

/// Digits found at position `prefix.len()` among candidates starting with `prefix`
#[must_use]
pub fn next_digits(candidates: &CandidateSet, prefix: &Sequence) -> DigitSet {
    let position = prefix.len();
    candidates
        .with_prefix(prefix)
        .iter()
        .filter_map(|candidate| candidate.digits().get(position).copied())
        .collect()
}
