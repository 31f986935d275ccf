//! Game date selection and formatting
//!
//! A player may replay any past day, but never a future one: requested dates
//! are clamped to today (UTC).

use chrono::{Days, NaiveDate, Utc};
use std::fmt;

/// The calendar day a puzzle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameDate(NaiveDate);

/// Error type for unparseable game dates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    Invalid(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(text) => {
                write!(f, "Invalid game date '{text}', expected YYYY-MM-DD")
            }
        }
    }
}

impl std::error::Error for DateError {}

impl GameDate {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date in UTC
    #[must_use]
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    /// Build from year, 1-based month and day
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a `YYYY-MM-DD` game key, tolerating a leading `#`
    ///
    /// # Errors
    /// Returns `DateError::Invalid` when the text is not a valid calendar date.
    pub fn parse(text: &str) -> Result<Self, DateError> {
        let trimmed = text.trim().trim_start_matches('#');
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateError::Invalid(text.to_string()))
    }

    /// Resolve the date to play
    ///
    /// No request, an empty string or a bare `#` selects `today`. A valid date
    /// after `today` is clamped to `today`.
    ///
    /// # Errors
    /// Returns `DateError::Invalid` for text that is not a date.
    ///
    /// # Examples
    /// ```
    /// use disnumber::daily::GameDate;
    ///
    /// let today = GameDate::from_ymd(2001, 1, 2).unwrap();
    /// let past = GameDate::resolve(Some("1970-01-01"), today).unwrap();
    /// assert_eq!(past.game_key(), "1970-01-01");
    ///
    /// let future = GameDate::resolve(Some("2100-01-01"), today).unwrap();
    /// assert_eq!(future, today);
    /// ```
    pub fn resolve(requested: Option<&str>, today: Self) -> Result<Self, DateError> {
        match requested.map(|text| text.trim().trim_start_matches('#')) {
            None | Some("") => Ok(today),
            Some(text) => Ok(Self::parse(text)?.min(today)),
        }
    }

    /// The underlying calendar date
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Storage/URL key, e.g. `2023-09-01`
    #[must_use]
    pub fn game_key(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Human readable name, e.g. `Fri, 01 Sep 2023`
    #[must_use]
    pub fn display_name(self) -> String {
        self.0.format("%a, %d %b %Y").to_string()
    }

    /// The following day, if representable
    #[must_use]
    pub fn next_day(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// The day `days` before this one, if representable
    #[must_use]
    pub fn days_before(self, days: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(days)).map(Self)
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.game_key())
    }
}
