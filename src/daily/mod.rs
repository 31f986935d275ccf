//! Daily puzzle derivation
//!
//! Everything needed to turn a calendar day and a digit count into the day's
//! secret, with no coordination between clients.

mod date;
mod secret;
mod seed;
mod trig;

pub use date::{DateError, GameDate};
pub use secret::secret_for_date;
pub use seed::{MAX_MONTH_DAYS, MAX_YEAR_DAYS, seed_for_date};

use crate::core::{MAX_DIGITS, Sequence};

/// Default number of digits in a puzzle
pub const DEFAULT_DIGITS: usize = 4;

/// A specific day's puzzle at a specific length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Puzzle {
    pub date: GameDate,
    pub num_digits: usize,
}

impl Puzzle {
    /// Create a puzzle; the digit count is capped at 10
    #[must_use]
    pub fn new(date: GameDate, num_digits: usize) -> Self {
        Self {
            date,
            num_digits: num_digits.min(MAX_DIGITS),
        }
    }

    /// Derive this puzzle's secret
    #[must_use]
    pub fn secret(&self) -> Sequence {
        secret_for_date(self.num_digits, &self.date.date())
    }
}
