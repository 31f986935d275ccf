//! Formatting utilities for terminal output

use crate::core::{DigitSet, Mark, Sequence};
use colored::Colorize;

/// Format a digit set as a spaced list, or a dash when empty
#[must_use]
pub fn digit_list(digits: DigitSet) -> String {
    if digits.is_empty() {
        return "-".to_string();
    }
    digits
        .iter()
        .map(|digit| digit.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Color each digit of a guess by its mark
#[must_use]
pub fn marks_to_colored(guess: &Sequence, marks: &[Mark]) -> String {
    guess
        .digits()
        .iter()
        .zip(marks)
        .map(|(digit, mark)| {
            let text = format!(" {digit} ");
            match mark {
                Mark::Dead => text.black().on_green().bold().to_string(),
                Mark::Injured => text.white().on_red().bold().to_string(),
                Mark::Miss => text.white().on_bright_black().to_string(),
            }
        })
        .collect()
}

/// How a guess narrowed the candidates, e.g. `Candidates: 5040 → 210 (4830 ruled out)`
#[must_use]
pub fn candidate_change(before: usize, after: usize) -> String {
    format!(
        "Candidates: {before} → {after} ({} ruled out)",
        before.saturating_sub(after)
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_list_is_sorted() {
        let digits: DigitSet = [7, 0, 3].into_iter().collect();
        assert_eq!(digit_list(digits), "0 3 7");
        assert_eq!(digit_list(DigitSet::EMPTY), "-");
    }

    #[test]
    fn colored_marks_keep_digits() {
        colored::control::set_override(false);
        let guess = Sequence::parse("012").unwrap();
        let marks = [Mark::Dead, Mark::Injured, Mark::Miss];
        assert_eq!(marks_to_colored(&guess, &marks), " 0  1  2 ");
    }

    #[test]
    fn candidate_change_counts_eliminations() {
        assert_eq!(
            candidate_change(5040, 210),
            "Candidates: 5040 → 210 (4830 ruled out)"
        );
        assert_eq!(candidate_change(1, 1), "Candidates: 1 → 1 (0 ruled out)");
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(3.0, 0.0, 4), "░░░░");
    }
}
