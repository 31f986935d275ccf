//! Digit sequence representation
//!
//! A Sequence stores up to ten decimal digits inline. Secrets, guesses, staged
//! prefixes and candidates all share this type.

use super::DigitSet;
use std::cmp::Ordering;
use std::fmt;

/// Maximum number of digits in a sequence
pub const MAX_DIGITS: usize = 10;

/// Size of the digit alphabet (0-9)
pub const DIGIT_POOL_SIZE: usize = 10;

/// An ordered run of decimal digits, at most `MAX_DIGITS` long
///
/// Unused slots are always zero so the derived `Eq`/`Hash` agree with the
/// logical contents.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sequence {
    digits: [u8; MAX_DIGITS],
    len: u8,
}

/// Error type for invalid sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    TooLong(usize),
    InvalidCharacter(char),
    InvalidDigit(u8),
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong(len) => {
                write!(f, "Sequence can hold at most {MAX_DIGITS} digits, got {len}")
            }
            Self::InvalidCharacter(ch) => {
                write!(f, "Sequence must contain only digits 0-9, found '{ch}'")
            }
            Self::InvalidDigit(digit) => write!(f, "Digit must be in 0-9, got {digit}"),
        }
    }
}

impl std::error::Error for SequenceError {}

impl Sequence {
    /// The empty sequence (e.g. a staged guess with nothing typed yet)
    pub const EMPTY: Self = Self {
        digits: [0; MAX_DIGITS],
        len: 0,
    };

    /// Parse a sequence from text such as `"0123"`
    ///
    /// Surrounding whitespace is ignored. Repeated digits are accepted here;
    /// use [`Sequence::has_distinct_digits`] when distinctness matters.
    ///
    /// # Errors
    /// Returns `SequenceError` if:
    /// - The text holds more than 10 digits
    /// - Any character is not an ASCII digit
    ///
    /// # Examples
    /// ```
    /// use disnumber::core::Sequence;
    ///
    /// let seq = Sequence::parse("0123").unwrap();
    /// assert_eq!(seq.len(), 4);
    /// assert_eq!(seq.to_string(), "0123");
    ///
    /// assert!(Sequence::parse("12a4").is_err());
    /// assert!(Sequence::parse("01234567890").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, SequenceError> {
        let text = text.trim();
        let count = text.chars().count();
        if count > MAX_DIGITS {
            return Err(SequenceError::TooLong(count));
        }

        let mut seq = Self::EMPTY;
        for ch in text.chars() {
            let digit = ch
                .to_digit(10)
                .ok_or(SequenceError::InvalidCharacter(ch))?;
            seq.push(digit as u8)?;
        }
        Ok(seq)
    }

    /// Build a sequence from raw digit values
    ///
    /// # Errors
    /// Returns `SequenceError` if there are more than 10 digits or any value exceeds 9.
    pub fn from_digits(digits: &[u8]) -> Result<Self, SequenceError> {
        if digits.len() > MAX_DIGITS {
            return Err(SequenceError::TooLong(digits.len()));
        }
        let mut seq = Self::EMPTY;
        for &digit in digits {
            seq.push(digit)?;
        }
        Ok(seq)
    }

    /// Build from digits already known to be valid (generator output)
    pub(crate) fn from_valid(digits: &[u8]) -> Self {
        debug_assert!(digits.len() <= MAX_DIGITS);
        debug_assert!(digits.iter().all(|&d| d < 10));
        let mut seq = Self::EMPTY;
        seq.digits[..digits.len()].copy_from_slice(digits);
        seq.len = digits.len() as u8;
        seq
    }

    /// Append a digit
    ///
    /// # Errors
    /// Returns `SequenceError` if the digit exceeds 9 or the sequence is full.
    pub fn push(&mut self, digit: u8) -> Result<(), SequenceError> {
        if digit > 9 {
            return Err(SequenceError::InvalidDigit(digit));
        }
        let len = self.len();
        if len == MAX_DIGITS {
            return Err(SequenceError::TooLong(len + 1));
        }
        self.digits[len] = digit;
        self.len += 1;
        Ok(())
    }

    /// Remove and return the last digit
    pub fn pop(&mut self) -> Option<u8> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let idx = usize::from(self.len);
        let digit = self.digits[idx];
        self.digits[idx] = 0;
        Some(digit)
    }

    /// Number of digits
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the digits as a slice
    #[inline]
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len()]
    }

    /// Get the digit at a specific position
    ///
    /// # Panics
    /// Panics if `position >= self.len()`
    #[inline]
    #[must_use]
    pub fn digit_at(&self, position: usize) -> u8 {
        self.digits()[position]
    }

    /// Check if the sequence contains a specific digit
    #[inline]
    #[must_use]
    pub fn contains(&self, digit: u8) -> bool {
        self.digits().contains(&digit)
    }

    /// The set of digits present, ignoring order and repeats
    #[must_use]
    pub fn digit_set(&self) -> DigitSet {
        self.digits().iter().copied().collect()
    }

    /// True when no digit appears twice
    #[must_use]
    pub fn has_distinct_digits(&self) -> bool {
        self.digit_set().len() == self.len()
    }

    /// True when `prefix` matches the leading digits of this sequence
    #[inline]
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.digits().starts_with(prefix.digits())
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Ord for Sequence {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits().cmp(other.digits())
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::str::FromStr for Sequence {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &digit in self.digits() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence(\"{self}\")")
    }
}
