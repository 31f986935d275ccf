//! Shareable result text for a solved game

use crate::core::{Mark, Sequence};
use crate::daily::GameDate;

/// Base URL of the public game; the game key is appended as a fragment
pub const SHARE_URL: &str = "https://ogbizi.com/disnumber";

/// Render marks as coloured squares: dead 🟩, injured 🟥, miss ⬜ (⬛ when dark)
#[must_use]
pub fn squares(marks: &[Mark], dark_mode: bool) -> String {
    marks
        .iter()
        .map(|mark| match mark {
            Mark::Dead => '🟩',
            Mark::Injured => '🟥',
            Mark::Miss if dark_mode => '⬛',
            Mark::Miss => '⬜',
        })
        .collect()
}

/// Share text for a solved game, or `None` if the last guess is not the secret
///
/// # Examples
/// ```
/// use disnumber::core::Sequence;
/// use disnumber::daily::GameDate;
/// use disnumber::game::share_text;
///
/// let date = GameDate::from_ymd(2023, 9, 1).unwrap();
/// let secret = Sequence::parse("0123").unwrap();
/// let guesses = [Sequence::parse("0132").unwrap(), secret];
///
/// let text = share_text(date, &secret, &guesses, false).unwrap();
/// assert!(text.starts_with("#Disnumber game: Fri, 01 Sep 2023.\nSolved in 2 guesses."));
/// assert!(text.ends_with("https://ogbizi.com/disnumber#2023-09-01"));
/// ```
#[must_use]
pub fn share_text(
    date: GameDate,
    secret: &Sequence,
    guesses: &[Sequence],
    dark_mode: bool,
) -> Option<String> {
    if guesses.last() != Some(secret) {
        return None;
    }

    let grid = guesses
        .iter()
        .map(|guess| squares(&Mark::for_guess(secret, guess), dark_mode))
        .collect::<Vec<_>>()
        .join("\n");

    Some(format!(
        "#Disnumber game: {}.\nSolved in {} guesses.\n\n{grid}\n\n{SHARE_URL}#{}",
        date.display_name(),
        guesses.len(),
        date.game_key()
    ))
}
