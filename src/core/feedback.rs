//! Dead/injured feedback between two digit sequences
//!
//! Feedback is kept in set form: the digits that were dead (right digit, right
//! place) and the digits that were injured (right digit, wrong place). The
//! count pair is a projection of the sets and is only used for display, or for
//! the legacy count match rule in the solver.

use super::{DigitSet, Sequence};
use std::fmt;

/// Feedback of one sequence against another
///
/// Two feedback values are equal iff both digit sets are identical.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Feedback {
    dead: DigitSet,
    injured: DigitSet,
}

impl Feedback {
    /// Compare `candidate` against `reference`
    ///
    /// For each position `i` of `reference`, the digit is dead if `candidate`
    /// has the same digit at `i`; otherwise it is injured if `candidate` holds
    /// it anywhere. Classification walks the reference, so each reference
    /// digit lands in at most one set.
    ///
    /// Both sequences are expected to have the same length; the checked entry
    /// point is [`crate::solver::Engine::evaluate_feedback`].
    ///
    /// # Examples
    /// ```
    /// use disnumber::core::{Feedback, Sequence};
    ///
    /// let secret = Sequence::parse("0123").unwrap();
    /// let guess = Sequence::parse("0312").unwrap();
    /// let feedback = Feedback::evaluate(&secret, &guess);
    ///
    /// assert_eq!(feedback.dead().to_string(), "0");
    /// assert_eq!(feedback.injured().to_string(), "123");
    /// assert_eq!(feedback.counts(), (1, 3));
    /// ```
    #[must_use]
    pub fn evaluate(reference: &Sequence, candidate: &Sequence) -> Self {
        debug_assert_eq!(
            reference.len(),
            candidate.len(),
            "feedback requires equal-length sequences"
        );

        let mut dead = DigitSet::EMPTY;
        let mut injured = DigitSet::EMPTY;

        for (position, &digit) in reference.digits().iter().enumerate() {
            if candidate.digits().get(position) == Some(&digit) {
                dead.insert(digit);
            } else if candidate.contains(digit) {
                injured.insert(digit);
            }
        }

        Self { dead, injured }
    }

    /// Digits in the right place
    #[inline]
    #[must_use]
    pub const fn dead(self) -> DigitSet {
        self.dead
    }

    /// Digits present but misplaced
    #[inline]
    #[must_use]
    pub const fn injured(self) -> DigitSet {
        self.injured
    }

    #[inline]
    #[must_use]
    pub const fn dead_count(self) -> usize {
        self.dead.len()
    }

    #[inline]
    #[must_use]
    pub const fn injured_count(self) -> usize {
        self.injured.len()
    }

    /// The (dead, injured) count projection
    #[inline]
    #[must_use]
    pub const fn counts(self) -> (usize, usize) {
        (self.dead_count(), self.injured_count())
    }

    /// True when every one of `len` positions is dead
    #[inline]
    #[must_use]
    pub const fn is_solved(self, len: usize) -> bool {
        self.dead_count() == len
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} dead, {} injured",
            self.dead_count(),
            self.injured_count()
        )
    }
}

impl fmt::Debug for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Feedback(dead: {:?}, injured: {:?})", self.dead, self.injured)
    }
}

/// Per-position mark of a guess against the secret, used for grids and sharing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Dead,
    Injured,
    Miss,
}

impl Mark {
    /// Mark every position of `guess` against `secret`
    #[must_use]
    pub fn for_guess(secret: &Sequence, guess: &Sequence) -> Vec<Self> {
        guess
            .digits()
            .iter()
            .enumerate()
            .map(|(position, &digit)| {
                if secret.digits().get(position) == Some(&digit) {
                    Self::Dead
                } else if secret.contains(digit) {
                    Self::Injured
                } else {
                    Self::Miss
                }
            })
            .collect()
    }
}
