//! Daily secret generation
//!
//! The secret is drawn without replacement from the digit pool `[0..=9]`. Pool
//! indices come from the decimal rendering of `sin(seed) * 10^16`, consumed
//! from its last digit backwards. Every client derives the same secret for a
//! given day, so nothing here may depend on anything but the arguments.
//!
//! Both the sine and the rendering follow browser number semantics exactly:
//! the shared fdlibm sine, and shortest round-trip decimals with ties going
//! to the even digit.

use super::{seed_for_date, trig};
use crate::core::{DIGIT_POOL_SIZE, MAX_DIGITS, Sequence};
use chrono::Datelike;
use tracing::trace;

/// Scale applied to `sin(seed)` before rendering the index stream
const STREAM_SCALE: f64 = 1e16;

/// Derive the secret for `num_digits` digits on `date`
///
/// The result has `min(num_digits, 10)` pairwise-distinct digits. Once the
/// index stream is exhausted every remaining draw uses index 0.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use disnumber::daily::secret_for_date;
///
/// let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
/// assert_eq!(secret_for_date(4, &date).to_string(), "9041");
/// ```
#[must_use]
pub fn secret_for_date<D: Datelike>(num_digits: usize, date: &D) -> Sequence {
    let seed = seed_for_date(date);
    let mut stream = index_stream(seed);
    let mut pool: Vec<u8> = (0..DIGIT_POOL_SIZE as u8).collect();
    let target = num_digits.min(MAX_DIGITS);
    let mut drawn = Vec::with_capacity(target);

    while drawn.len() < target && !pool.is_empty() {
        let index = usize::from(stream.pop().unwrap_or(0)) % pool.len();
        drawn.push(pool.remove(index));
    }

    trace!(seed, num_digits, remaining_stream = stream.len(), "derived secret");
    Sequence::from_valid(&drawn)
}

/// Digits of `sin(seed) * 10^16` in rendering order
///
/// The value is rendered the way a browser prints a number; the sign and
/// decimal point are dropped.
fn index_stream(seed: i64) -> Vec<u8> {
    let value = trig::sin(seed as f64) * STREAM_SCALE;
    let mut buffer = ryu_js::Buffer::new();
    buffer
        .format(value)
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const EPOCH_SECRET: &str = "9041283675";

    fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
    }

    #[test]
    fn epoch_reference_stream() {
        // sin(721021) * 1e16 renders as 3459582540467309
        assert_eq!(
            index_stream(721_021),
            vec![3, 4, 5, 9, 5, 8, 2, 5, 4, 0, 4, 6, 7, 3, 0, 9]
        );
    }

    #[test]
    fn epoch_secret_prefixes() {
        for n in [0, 1, 4, 8, 9, 10] {
            assert_eq!(
                secret_for_date(n, &epoch()).to_string(),
                &EPOCH_SECRET[..n],
                "{n} digits"
            );
        }
    }

    #[test]
    fn length_caps_at_ten() {
        for n in [10, 11, 12, 100] {
            assert_eq!(secret_for_date(n, &epoch()).to_string(), EPOCH_SECRET);
        }
    }

    #[test]
    fn deterministic() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 1).unwrap();
        assert_eq!(secret_for_date(5, &date), secret_for_date(5, &date));
    }

    #[test]
    fn digits_always_distinct() {
        let mut date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        for _ in 0..400 {
            for n in 3..=10 {
                let secret = secret_for_date(n, &date);
                assert_eq!(secret.len(), n);
                assert!(secret.has_distinct_digits(), "{secret} on {date}");
            }
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn shorter_secret_is_prefix_of_longer() {
        let date = NaiveDate::from_ymd_opt(2031, 3, 14).unwrap();
        let full = secret_for_date(10, &date);
        for n in 0..10 {
            assert!(full.starts_with(&secret_for_date(n, &date)));
        }
    }

    #[test]
    fn stream_ties_round_to_even_digit() {
        // sin(695445) * 1e16 is exactly -590184724305923.25
        let stream = index_stream(695_445);
        assert_eq!(stream.len(), 16);
        assert_eq!(stream.last(), Some(&2));
    }

    #[test]
    fn dates_sensitive_to_last_bit_rounding() {
        let cases = [
            ((2020, 1, 16), "2036517948"),
            ((1900, 2, 14), "2435908617"),
            ((1900, 1, 21), "6742530891"),
        ];
        for ((y, m, d), expected) in cases {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(secret_for_date(10, &date).to_string(), expected, "{date}");
        }
    }

    #[test]
    fn index_stream_drops_sign_and_point() {
        for seed in [-5, 1, 2, 3, 4, 5, 6] {
            assert!(index_stream(seed).iter().all(|&d| d <= 9));
            assert!(!index_stream(seed).is_empty());
        }
    }
}
