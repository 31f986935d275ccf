//! Survey secrets across consecutive days
//!
//! Tallies which digit lands in which position so the daily generator's spread
//! can be checked.

use crate::core::{DIGIT_POOL_SIZE, MAX_DIGITS, Sequence};
use crate::daily::{GameDate, Puzzle};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};
use tracing::info;

/// Position tallies of daily secrets over a date range
#[derive(Debug)]
pub struct SurveyStatistics {
    pub first_date: GameDate,
    pub last_date: GameDate,
    pub days: usize,
    pub num_digits: usize,
    /// `distribution[digit][position]` counts
    pub distribution: [[usize; MAX_DIGITS]; DIGIT_POOL_SIZE],
    pub distinct_secrets: usize,
    pub duration: Duration,
}

impl SurveyStatistics {
    /// Largest minus smallest cell over the surveyed positions
    #[must_use]
    pub fn spread(&self) -> usize {
        let cells = self
            .distribution
            .iter()
            .flat_map(|row| row[..self.num_digits].iter().copied());
        let (min, max) = cells.fold((usize::MAX, 0), |(lo, hi), n| (lo.min(n), hi.max(n)));
        max.saturating_sub(min.min(max))
    }

    /// How often `digit` appeared at `position`
    #[must_use]
    pub fn count(&self, digit: u8, position: usize) -> usize {
        self.distribution[usize::from(digit)][position]
    }
}

/// Derive the secrets for `days` consecutive days starting at `start`
pub fn run_survey(
    start: GameDate,
    days: usize,
    num_digits: usize,
    show_progress: bool,
) -> SurveyStatistics {
    let num_digits = num_digits.min(MAX_DIGITS);
    let started = Instant::now();

    let dates: Vec<GameDate> = std::iter::successors(Some(start), |date| date.next_day())
        .take(days)
        .collect();

    let pb = if show_progress {
        let pb = ProgressBar::new(dates.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };
    pb.set_message("deriving secrets");

    let secrets: Vec<Sequence> = dates
        .par_iter()
        .map(|&date| {
            let secret = Puzzle::new(date, num_digits).secret();
            pb.inc(1);
            secret
        })
        .collect();

    pb.finish_with_message("Complete!");

    let mut distribution = [[0; MAX_DIGITS]; DIGIT_POOL_SIZE];
    for secret in &secrets {
        for (position, &digit) in secret.digits().iter().enumerate() {
            distribution[usize::from(digit)][position] += 1;
        }
    }
    let distinct_secrets = secrets.iter().collect::<FxHashSet<_>>().len();

    let stats = SurveyStatistics {
        first_date: start,
        last_date: dates.last().copied().unwrap_or(start),
        days: dates.len(),
        num_digits,
        distribution,
        distinct_secrets,
        duration: started.elapsed(),
    };
    info!(
        days = stats.days,
        spread = stats.spread(),
        distinct = stats.distinct_secrets,
        "survey complete"
    );
    stats
}
