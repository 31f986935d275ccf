//! Memoizing deduction engine
//!
//! The engine is the public face of the solver. Feedback, candidate search and
//! suggestions are pure functions of their arguments, so each is cached under
//! its full argument tuple. The one exception is a search with no guesses,
//! which depends only on the length and is shared by every secret. Caches are
//! bounded LRU maps behind mutexes; a lock is only held for the lookup or the
//! insert, never while computing.

use super::cache::{CacheStats, MemoCache};
use super::search::{CandidateSet, MatchRule, candidate_universe, filter_consistent};
use super::suggest::{hints_apply, next_digits};
use crate::core::{DigitSet, Feedback, Sequence};
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// Cache sizing and matching behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub feedback_capacity: usize,
    pub search_capacity: usize,
    /// Total sequences the search cache may hold across all entries
    pub search_weight_limit: usize,
    pub suggestion_capacity: usize,
    pub match_rule: MatchRule,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feedback_capacity: 200_000,
            search_capacity: 256,
            search_weight_limit: 8_000_000,
            suggestion_capacity: 100_000,
            match_rule: MatchRule::DigitSets,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub const fn with_match_rule(mut self, match_rule: MatchRule) -> Self {
        self.match_rule = match_rule;
        self
    }

    #[must_use]
    pub const fn with_search_capacity(mut self, capacity: usize) -> Self {
        self.search_capacity = capacity;
        self
    }
}

/// Contract violations rejected by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A sequence's length differs from the one it is compared against
    LengthMismatch { expected: usize, found: usize },
    /// The staged prefix is longer than the secret
    PrefixTooLong { secret_len: usize, prefix_len: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, found } => {
                write!(f, "Expected a {expected}-digit sequence, got {found} digits")
            }
            Self::PrefixTooLong {
                secret_len,
                prefix_len,
            } => write!(
                f,
                "Staged guess has {prefix_len} digits but the secret only has {secret_len}"
            ),
        }
    }
}

impl std::error::Error for EngineError {}

/// Counters for all three caches
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    pub feedback: CacheStats,
    pub search: CacheStats,
    pub suggestion: CacheStats,
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum SearchKey {
    /// Nothing guessed yet; the answer is every sequence of this length
    Universe(usize),
    Narrowed {
        secret: Sequence,
        history: Vec<Sequence>,
    },
}

impl SearchKey {
    fn new(secret: &Sequence, history: &[Sequence]) -> Self {
        if history.is_empty() {
            Self::Universe(secret.len())
        } else {
            Self::Narrowed {
                secret: *secret,
                history: history.to_vec(),
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct SuggestionKey {
    secret: Sequence,
    history: Vec<Sequence>,
    prefix: Sequence,
}

/// Deduction engine with memoized feedback, search and suggestion
///
/// # Examples
/// ```
/// use disnumber::core::Sequence;
/// use disnumber::solver::Engine;
///
/// let engine = Engine::default();
/// let secret = Sequence::parse("0123").unwrap();
/// let history = [Sequence::parse("3012").unwrap()];
///
/// let candidates = engine.search_candidates(&secret, &history).unwrap();
/// assert!(candidates.contains(&secret));
///
/// let hints = engine
///     .suggest_next_digits(&secret, &history, &Sequence::EMPTY)
///     .unwrap();
/// assert_eq!(hints.len(), 3);
/// ```
pub struct Engine {
    config: EngineConfig,
    feedback_cache: Mutex<MemoCache<(Sequence, Sequence), Feedback>>,
    search_cache: Mutex<MemoCache<SearchKey, CandidateSet>>,
    suggestion_cache: Mutex<MemoCache<SuggestionKey, DigitSet>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            feedback_cache: Mutex::new(MemoCache::new(config.feedback_capacity)),
            search_cache: Mutex::new(
                MemoCache::new(config.search_capacity)
                    .with_weight_limit(config.search_weight_limit, CandidateSet::len),
            ),
            suggestion_cache: Mutex::new(MemoCache::new(config.suggestion_capacity)),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Feedback of `candidate` against `reference`
    ///
    /// # Errors
    /// Returns `EngineError::LengthMismatch` if the lengths differ.
    pub fn evaluate_feedback(
        &self,
        reference: &Sequence,
        candidate: &Sequence,
    ) -> Result<Feedback, EngineError> {
        check_length(reference, candidate)?;
        Ok(self.feedback_unchecked(reference, candidate))
    }

    /// All distinct-digit sequences consistent with the feedback `secret` gave
    /// to every guess in `history`
    ///
    /// # Errors
    /// Returns `EngineError::LengthMismatch` if any guess differs in length
    /// from the secret.
    pub fn search_candidates(
        &self,
        secret: &Sequence,
        history: &[Sequence],
    ) -> Result<CandidateSet, EngineError> {
        check_history(secret, history)?;
        Ok(self.search_unchecked(secret, history))
    }

    /// Digits that may follow `prefix` while some candidate remains reachable
    ///
    /// Empty once the prefix is full or the last guess solved the puzzle.
    ///
    /// # Errors
    /// Returns `EngineError::PrefixTooLong` if the prefix is longer than the
    /// secret, or `EngineError::LengthMismatch` for a malformed history.
    pub fn suggest_next_digits(
        &self,
        secret: &Sequence,
        history: &[Sequence],
        prefix: &Sequence,
    ) -> Result<DigitSet, EngineError> {
        if prefix.len() > secret.len() {
            return Err(EngineError::PrefixTooLong {
                secret_len: secret.len(),
                prefix_len: prefix.len(),
            });
        }
        check_history(secret, history)?;
        Ok(self.suggest_unchecked(secret, history, prefix))
    }

    /// Snapshot of cache counters
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            feedback: lock(&self.feedback_cache).stats(),
            search: lock(&self.search_cache).stats(),
            suggestion: lock(&self.suggestion_cache).stats(),
        }
    }

    /// Sequences currently held by the search cache
    #[must_use]
    pub fn cached_search_weight(&self) -> usize {
        lock(&self.search_cache).weight()
    }

    /// Drop all cached results
    pub fn clear(&self) {
        lock(&self.feedback_cache).clear();
        lock(&self.search_cache).clear();
        lock(&self.suggestion_cache).clear();
    }

    pub(crate) fn feedback_unchecked(&self, reference: &Sequence, candidate: &Sequence) -> Feedback {
        let key = (*reference, *candidate);
        if let Some(hit) = lock(&self.feedback_cache).get(&key) {
            return hit;
        }

        let feedback = Feedback::evaluate(reference, candidate);
        lock(&self.feedback_cache).insert(key, feedback);
        feedback
    }

    pub(crate) fn search_unchecked(&self, secret: &Sequence, history: &[Sequence]) -> CandidateSet {
        let key = SearchKey::new(secret, history);
        let cached = lock(&self.search_cache).get(&key);
        if let Some(hit) = cached {
            trace!(history_len = history.len(), candidates = hit.len(), "search cache hit");
            return hit;
        }

        // Peel the most recent guess and narrow what the earlier ones allowed
        let candidates = match history.split_last() {
            None => CandidateSet::from_sorted(candidate_universe(secret.len())),
            Some((latest, earlier)) => {
                let previous = self.search_unchecked(secret, earlier);
                let observed = self.feedback_unchecked(secret, latest);
                CandidateSet::from_sorted(filter_consistent(
                    previous.as_slice(),
                    latest,
                    observed,
                    self.config.match_rule,
                ))
            }
        };

        debug!(
            history_len = history.len(),
            candidates = candidates.len(),
            "candidate search computed"
        );
        lock(&self.search_cache).insert(key, candidates.clone());
        candidates
    }

    pub(crate) fn suggest_unchecked(
        &self,
        secret: &Sequence,
        history: &[Sequence],
        prefix: &Sequence,
    ) -> DigitSet {
        if !hints_apply(secret, history, prefix) {
            return DigitSet::EMPTY;
        }

        // Hints depend on the secret even before the first guess
        let key = SuggestionKey {
            secret: *secret,
            history: history.to_vec(),
            prefix: *prefix,
        };
        let cached = lock(&self.suggestion_cache).get(&key);
        if let Some(hit) = cached {
            return hit;
        }

        let candidates = self.search_unchecked(secret, history);
        let digits = next_digits(&candidates, prefix);
        trace!(%prefix, %digits, "suggestion computed");
        lock(&self.suggestion_cache).insert(key, digits);
        digits
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Cached values are immutable results, so a poisoned lock is still usable
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn check_length(expected: &Sequence, found: &Sequence) -> Result<(), EngineError> {
    if expected.len() == found.len() {
        Ok(())
    } else {
        Err(EngineError::LengthMismatch {
            expected: expected.len(),
            found: found.len(),
        })
    }
}

fn check_history(secret: &Sequence, history: &[Sequence]) -> Result<(), EngineError> {
    history.iter().try_for_each(|guess| check_length(secret, guess))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> Sequence {
        Sequence::parse(text).unwrap()
    }

    fn seqs(texts: &[&str]) -> Vec<Sequence> {
        texts.iter().map(|t| seq(t)).collect()
    }

    fn hint_count(engine: &Engine, secret: &str, history: &[&str], prefix: &str) -> usize {
        engine
            .suggest_next_digits(&seq(secret), &seqs(history), &seq(prefix))
            .unwrap()
            .len()
    }

    #[test]
    fn worked_scenario_digit_sets() {
        let engine = Engine::default();
        let cases: &[(&[&str], [usize; 4])] = &[
            (&[], [10, 9, 8, 7]),
            (&["5432"], [8, 7, 1, 1]),
            (&["9876"], [6, 5, 0, 3]),
            (&["3012"], [3, 3, 0, 1]),
        ];
        for (history, expected) in cases {
            let counts: Vec<usize> = ["", "0", "98", "012"]
                .iter()
                .map(|prefix| hint_count(&engine, "0123", history, prefix))
                .collect();
            assert_eq!(counts, expected, "history {history:?}");
        }
    }

    #[test]
    fn worked_scenario_legacy_counts() {
        let engine = Engine::new(EngineConfig::default().with_match_rule(MatchRule::Counts));
        let counts: Vec<usize> = ["", "0", "98", "012"]
            .iter()
            .map(|prefix| hint_count(&engine, "0123", &["5432"], prefix))
            .collect();
        assert_eq!(counts, vec![9, 8, 3, 3]);
    }

    #[test]
    fn three_rotations_collapse_to_secret() {
        let engine = Engine::default();
        let secret = seq("0123");
        let history = seqs(&["3012", "2301", "1230"]);

        let candidates = engine.search_candidates(&secret, &history).unwrap();
        assert_eq!(candidates.as_slice(), &[secret]);

        for len in 0..secret.len() {
            let prefix = Sequence::from_digits(&secret.digits()[..len]).unwrap();
            let hints = engine.suggest_next_digits(&secret, &history, &prefix).unwrap();
            assert_eq!(hints, DigitSet::EMPTY.with(secret.digit_at(len)));
        }
    }

    #[test]
    fn eliminated_candidate_depends_on_rule() {
        let secret = seq("5097");
        let history = seqs(&["4321", "9876"]);

        let exact = Engine::default().search_candidates(&secret, &history).unwrap();
        assert!(exact.contains(&secret));
        assert!(!exact.contains(&seq("8065")));

        let legacy = Engine::new(EngineConfig::default().with_match_rule(MatchRule::Counts))
            .search_candidates(&secret, &history)
            .unwrap();
        assert!(legacy.contains(&secret));
        assert!(legacy.contains(&seq("8065")));
    }

    #[test]
    fn solved_game_has_no_hints() {
        let engine = Engine::default();
        let secret = seq("0123");
        let hints = engine
            .suggest_next_digits(&secret, &seqs(&["4567", "0123"]), &Sequence::EMPTY)
            .unwrap();
        assert!(hints.is_empty());
    }

    #[test]
    fn full_prefix_has_no_hints() {
        let engine = Engine::default();
        let hints = engine
            .suggest_next_digits(&seq("0123"), &[], &seq("4567"))
            .unwrap();
        assert!(hints.is_empty());
    }

    #[test]
    fn rejects_malformed_input() {
        let engine = Engine::default();
        let secret = seq("0123");

        assert_eq!(
            engine.search_candidates(&secret, &seqs(&["012"])),
            Err(EngineError::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            engine.suggest_next_digits(&secret, &[], &seq("01234")),
            Err(EngineError::PrefixTooLong {
                secret_len: 4,
                prefix_len: 5
            })
        );
        assert!(engine.evaluate_feedback(&secret, &seq("01")).is_err());
    }

    #[test]
    fn narrowing_is_monotonic() {
        let engine = Engine::default();
        let secret = seq("7315");
        let guesses = seqs(&["0123", "4567", "7351", "8902", "7315"]);

        let mut previous = engine.search_candidates(&secret, &[]).unwrap();
        for n in 1..=guesses.len() {
            let current = engine.search_candidates(&secret, &guesses[..n]).unwrap();
            assert!(current.len() <= previous.len());
            assert!(current.contains(&secret));
            assert!(current.iter().all(|c| previous.contains(c)));
            previous = current;
        }
        assert_eq!(previous.len(), 1);
    }

    #[test]
    fn repeated_calls_hit_cache() {
        let engine = Engine::default();
        let secret = seq("0123");
        let history = seqs(&["5432", "9876"]);

        let first = engine.search_candidates(&secret, &history).unwrap();
        let misses = engine.stats().search.misses;
        let second = engine.search_candidates(&secret, &history).unwrap();

        assert_eq!(first, second);
        let stats = engine.stats();
        assert_eq!(stats.search.misses, misses);
        assert!(stats.search.hits >= 1);
    }

    #[test]
    fn appending_guess_reuses_earlier_levels() {
        let engine = Engine::default();
        let secret = seq("0123");
        engine.search_candidates(&secret, &seqs(&["5432"])).unwrap();
        let before = engine.stats().search;

        engine.search_candidates(&secret, &seqs(&["5432", "9876"])).unwrap();
        let after = engine.stats().search;

        // One new level computed, the one-guess level served from cache
        assert_eq!(after.misses, before.misses + 1);
        assert_eq!(after.hits, before.hits + 1);
    }

    #[test]
    fn disabled_caches_give_same_answers() {
        let uncached = Engine::new(EngineConfig {
            feedback_capacity: 0,
            search_capacity: 0,
            search_weight_limit: 0,
            suggestion_capacity: 0,
            match_rule: MatchRule::DigitSets,
        });
        let cached = Engine::default();
        let secret = seq("0123");
        let history = seqs(&["5432"]);

        assert_eq!(
            uncached.search_candidates(&secret, &history).unwrap(),
            cached.search_candidates(&secret, &history).unwrap()
        );
        assert_eq!(uncached.stats().search.hits, 0);
    }

    #[test]
    fn empty_history_is_shared_across_secrets() {
        let engine = Engine::default();
        let sets: Vec<CandidateSet> = ["0123", "4567", "8901"]
            .iter()
            .map(|secret| engine.search_candidates(&seq(secret), &[]).unwrap())
            .collect();

        assert!(sets.iter().all(|set| set.len() == 5040));
        let stats = engine.stats().search;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn search_cache_respects_sequence_budget() {
        let engine = Engine::new(EngineConfig {
            search_weight_limit: 5100,
            ..EngineConfig::default()
        });
        let secret = seq("0123");
        // The 5040-sequence universe plus the 210 left after one guess overflow
        engine.search_candidates(&secret, &seqs(&["5432"])).unwrap();
        engine.search_candidates(&secret, &seqs(&["5432", "9876"])).unwrap();

        let stats = engine.stats().search;
        assert!(stats.evictions >= 1);
        assert!(engine.cached_search_weight() <= 5100);
    }

    #[test]
    fn feedback_is_cached() {
        let engine = Engine::default();
        let a = seq("0123");
        let b = seq("3210");
        let first = engine.evaluate_feedback(&a, &b).unwrap();
        let second = engine.evaluate_feedback(&a, &b).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.stats().feedback.hits, 1);
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = &Engine::default();
        let secret = &seq("0123");
        let history = &seqs(&["5432"]);

        let results: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(move || engine.search_candidates(secret, history).unwrap().len())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(results.iter().all(|&n| n == 210));
    }
}
