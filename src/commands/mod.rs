//! Command implementations

pub mod benchmark;
pub mod check;
pub mod hint;
pub mod simple;
pub mod solve;
pub mod survey;

pub use benchmark::{BenchmarkResult, run_benchmark};
pub use check::{CheckResult, check_feedback};
pub use hint::{HintResult, hint_for};
pub use simple::run_simple;
pub use solve::{GuessStep, SolveConfig, SolveResult, solve_puzzle};
pub use survey::{SurveyStatistics, run_survey};
