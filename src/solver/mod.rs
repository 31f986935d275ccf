//! Deduction engine
//!
//! Candidate search over the distinct-digit universe, next-digit suggestions,
//! and the bounded memoization that keeps repeated UI refreshes cheap.

pub mod cache;
mod engine;
pub mod search;
pub mod suggest;

pub use cache::{CacheStats, MemoCache};
pub use engine::{Engine, EngineConfig, EngineError, EngineStats};
pub use search::{CandidateSet, MatchRule, candidate_universe, filter_consistent, universe_size};
