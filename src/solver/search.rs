//! Candidate universe and constraint filtering
//!
//! The universe for length `L` is every sequence of `L` pairwise-distinct
//! digits, built digit by digit in ascending order. Each submitted guess then
//! keeps only the candidates that would have produced the feedback the player
//! actually saw.

use crate::core::{DigitSet, Feedback, MAX_DIGITS, Sequence};
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

/// Candidate counts at or above this are filtered in parallel
const PARALLEL_THRESHOLD: usize = 8_192;

/// How a candidate's feedback is compared to the observed feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchRule {
    /// Dead and injured digit sets must be identical
    #[default]
    DigitSets,
    /// Only the (dead, injured) counts must agree. Admits candidates the
    /// digit-set rule rejects; kept to reproduce historical results.
    Counts,
}

impl MatchRule {
    /// True when `candidate` feedback is indistinguishable from `observed`
    #[inline]
    #[must_use]
    pub fn agrees(self, candidate: Feedback, observed: Feedback) -> bool {
        match self {
            Self::DigitSets => candidate == observed,
            Self::Counts => candidate.counts() == observed.counts(),
        }
    }
}

/// Immutable, sorted set of candidate sequences
///
/// Cloning is cheap; the sequences are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateSet(Arc<[Sequence]>);

impl CandidateSet {
    /// Wrap an ascending list of sequences
    pub(crate) fn from_sorted(sequences: Vec<Sequence>) -> Self {
        debug_assert!(sequences.is_sorted());
        Self(sequences.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Sequence] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.0.iter()
    }

    /// Membership test (binary search)
    #[must_use]
    pub fn contains(&self, sequence: &Sequence) -> bool {
        self.0.binary_search(sequence).is_ok()
    }

    /// The contiguous run of candidates beginning with `prefix`
    #[must_use]
    pub fn with_prefix(&self, prefix: &Sequence) -> &[Sequence] {
        let start = self.0.partition_point(|c| c.digits() < prefix.digits());
        let run = &self.0[start..];
        let end = run.partition_point(|c| c.starts_with(prefix));
        &run[..end]
    }
}

impl fmt::Debug for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateSet")
            .field("len", &self.len())
            .field("first", &self.0.first())
            .finish()
    }
}

/// Number of distinct-digit sequences of length `len`: 10! / (10 - len)!
#[must_use]
pub const fn universe_size(len: usize) -> usize {
    let mut count = 1;
    let mut i = 0;
    while i < len && i < MAX_DIGITS {
        count *= 10 - i;
        i += 1;
    }
    count
}

/// Every sequence of `len` pairwise-distinct digits, ascending
///
/// Lengths above 10 are treated as 10.
///
/// # Examples
/// ```
/// use disnumber::solver::candidate_universe;
///
/// let universe = candidate_universe(2);
/// assert_eq!(universe.len(), 90);
/// assert_eq!(universe[0].to_string(), "01");
/// assert_eq!(universe[89].to_string(), "98");
/// ```
#[must_use]
pub fn candidate_universe(len: usize) -> Vec<Sequence> {
    let len = len.min(MAX_DIGITS);
    let mut universe = Vec::with_capacity(universe_size(len));
    let mut prefix = Vec::with_capacity(len);
    extend_distinct(&mut prefix, DigitSet::EMPTY, len, &mut universe);
    universe
}

fn extend_distinct(prefix: &mut Vec<u8>, used: DigitSet, len: usize, out: &mut Vec<Sequence>) {
    if prefix.len() == len {
        out.push(Sequence::from_valid(prefix));
        return;
    }

    for digit in DigitSet::ALL.difference(used).iter() {
        prefix.push(digit);
        extend_distinct(prefix, used.with(digit), len, out);
        prefix.pop();
    }
}

/// Keep the candidates whose feedback against `guess` agrees with `observed`
///
/// Order is preserved, so a sorted input yields a sorted output.
#[must_use]
pub fn filter_consistent(
    candidates: &[Sequence],
    guess: &Sequence,
    observed: Feedback,
    rule: MatchRule,
) -> Vec<Sequence> {
    let consistent = |candidate: &&Sequence| {
        rule.agrees(Feedback::evaluate(candidate, guess), observed)
    };

    if candidates.len() >= PARALLEL_THRESHOLD {
        candidates.par_iter().filter(consistent).copied().collect()
    } else {
        candidates.iter().filter(consistent).copied().collect()
    }
}
