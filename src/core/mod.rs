//! Core domain types for Disnumber
//!
//! This module contains the fundamental domain types with zero external dependencies.
//! All types here are pure, `Copy`, and cheap to hash, so they double as cache keys.

mod digit_set;
mod feedback;
mod sequence;

pub use digit_set::DigitSet;
pub use feedback::{Feedback, Mark};
pub use sequence::{DIGIT_POOL_SIZE, MAX_DIGITS, Sequence, SequenceError};
