//! Sets of decimal digits
//!
//! A `DigitSet` is a 10-bit mask. Iteration is always ascending, which makes the
//! mask the canonical sorted form of a set of digits.

use std::fmt;

/// A set of decimal digits stored as a bit mask (bit `d` set means digit `d` present)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct DigitSet(u16);

impl DigitSet {
    /// No digits
    pub const EMPTY: Self = Self(0);

    /// All ten digits
    pub const ALL: Self = Self(0b11_1111_1111);

    /// Create a set from a raw mask, ignoring bits above 9
    #[inline]
    #[must_use]
    pub const fn from_mask(mask: u16) -> Self {
        Self(mask & Self::ALL.0)
    }

    /// Get the raw mask
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u16 {
        self.0
    }

    /// Check whether `digit` is in the set
    #[inline]
    #[must_use]
    pub const fn contains(self, digit: u8) -> bool {
        digit < 10 && self.0 & (1 << digit) != 0
    }

    /// Add `digit` to the set; digits above 9 are ignored
    #[inline]
    pub fn insert(&mut self, digit: u8) {
        if digit < 10 {
            self.0 |= 1 << digit;
        }
    }

    /// Return a copy with `digit` added
    #[inline]
    #[must_use]
    pub fn with(mut self, digit: u8) -> Self {
        self.insert(digit);
        self
    }

    /// Remove `digit` from the set
    #[inline]
    pub fn remove(&mut self, digit: u8) {
        if digit < 10 {
            self.0 &= !(1 << digit);
        }
    }

    /// Number of digits in the set
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Iterate the digits in ascending order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..10u8).filter(move |&d| self.contains(d))
    }
}

impl FromIterator<u8> for DigitSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.iter() {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigitSet({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_all() {
        assert!(DigitSet::EMPTY.is_empty());
        assert_eq!(DigitSet::EMPTY.len(), 0);
        assert_eq!(DigitSet::ALL.len(), 10);
        assert!((0..10).all(|d| DigitSet::ALL.contains(d)));
    }

    #[test]
    fn insert_and_remove() {
        let mut set = DigitSet::EMPTY;
        set.insert(7);
        set.insert(2);
        set.insert(7);
        assert_eq!(set.len(), 2);
        assert!(set.contains(2));
        assert!(!set.contains(3));

        set.remove(7);
        assert_eq!(set.len(), 1);
        assert!(!set.contains(7));
    }

    #[test]
    fn out_of_range_digits_ignored() {
        let mut set = DigitSet::EMPTY;
        set.insert(10);
        set.insert(200);
        assert!(set.is_empty());
        assert!(!DigitSet::ALL.contains(10));
        assert_eq!(DigitSet::from_mask(u16::MAX), DigitSet::ALL);
    }

    #[test]
    fn iteration_is_sorted() {
        let set: DigitSet = [9, 3, 0, 5].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 3, 5, 9]);
        assert_eq!(set.to_string(), "0359");
    }

    #[test]
    fn set_operations() {
        let a: DigitSet = [1, 2, 3].into_iter().collect();
        let b: DigitSet = [3, 4].into_iter().collect();
        assert_eq!(a.union(b).to_string(), "1234");
        assert_eq!(a.difference(b).to_string(), "12");
        assert_eq!(a.with(9).to_string(), "1239");
    }
}
