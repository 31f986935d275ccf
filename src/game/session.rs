//! Game session state machine
//!
//! Turns individual key presses into committed guesses and derives what the
//! keypad should show. All deduction is delegated to the engine.

use super::share::share_text;
use crate::core::{DigitSet, Feedback, Mark, Sequence};
use crate::daily::{GameDate, Puzzle};
use crate::solver::{Engine, EngineError};
use tracing::info;

/// Guesses allowed before the game is lost
pub const MAX_GUESS_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Solved,
    Failed,
}

/// Keypad input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Backspace,
    Enter,
}

/// What the keypad should highlight and disable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardState {
    /// Suggested digits plus the ones already staged
    pub active: DigitSet,
    pub disabled_digits: DigitSet,
    pub backspace_enabled: bool,
    pub enter_enabled: bool,
    /// False once the game is over
    pub in_progress: bool,
}

/// One player's game for one puzzle
pub struct GameSession<'e> {
    engine: &'e Engine,
    puzzle: Puzzle,
    secret: Sequence,
    guesses: Vec<Sequence>,
    staged: Sequence,
    pub hints_enabled: bool,
    /// Colour each digit of a row; when off a row only shows its counts
    pub easy_answers: bool,
}

impl<'e> GameSession<'e> {
    #[must_use]
    pub fn new(engine: &'e Engine, puzzle: Puzzle) -> Self {
        Self {
            engine,
            puzzle,
            secret: puzzle.secret(),
            guesses: Vec::new(),
            staged: Sequence::EMPTY,
            hints_enabled: true,
            easy_answers: true,
        }
    }

    /// Continue a game from previously submitted guesses
    ///
    /// The digit count comes from the first guess when there is one, so a
    /// settings change never alters a game already underway.
    ///
    /// # Errors
    /// Returns `EngineError::LengthMismatch` if the guesses differ in length.
    pub fn resume(
        engine: &'e Engine,
        date: GameDate,
        default_digits: usize,
        guesses: Vec<Sequence>,
    ) -> Result<Self, EngineError> {
        let num_digits = guesses.first().map_or(default_digits, Sequence::len);
        let mut session = Self::new(engine, Puzzle::new(date, num_digits));
        engine.search_candidates(&session.secret, &guesses)?;
        session.guesses = guesses;
        Ok(session)
    }

    /// Apply one key press; returns true if anything changed
    pub fn press(&mut self, key: Key) -> bool {
        match key {
            Key::Digit(digit) => self.stage_digit(digit),
            Key::Backspace => self.backspace(),
            Key::Enter => self.submit().is_some(),
        }
    }

    /// Stage a digit unless it is already staged, the guess is full or the game is over
    pub fn stage_digit(&mut self, digit: u8) -> bool {
        if self.status() != GameStatus::InProgress
            || self.is_staged_complete()
            || self.staged.contains(digit)
        {
            return false;
        }
        self.staged.push(digit).is_ok()
    }

    pub fn backspace(&mut self) -> bool {
        self.status() == GameStatus::InProgress && self.staged.pop().is_some()
    }

    /// Commit the staged guess if it is complete, returning its feedback
    pub fn submit(&mut self) -> Option<Feedback> {
        if self.status() != GameStatus::InProgress || !self.is_staged_complete() {
            return None;
        }

        let guess = std::mem::take(&mut self.staged);
        let feedback = self.engine.feedback_unchecked(&self.secret, &guess);
        self.guesses.push(guess);

        info!(
            guess = %guess,
            turn = self.guesses.len(),
            dead = feedback.dead_count(),
            injured = feedback.injured_count(),
            "guess submitted"
        );
        Some(feedback)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.guesses.last() == Some(&self.secret) {
            GameStatus::Solved
        } else if self.guesses.len() >= MAX_GUESS_COUNT {
            GameStatus::Failed
        } else {
            GameStatus::InProgress
        }
    }

    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub const fn secret(&self) -> &Sequence {
        &self.secret
    }

    #[must_use]
    pub fn guesses(&self) -> &[Sequence] {
        &self.guesses
    }

    #[must_use]
    pub const fn staged(&self) -> &Sequence {
        &self.staged
    }

    #[must_use]
    pub fn is_staged_complete(&self) -> bool {
        self.staged.len() >= self.secret.len()
    }

    /// Digits that keep a solution reachable, or none when hints are off
    #[must_use]
    pub fn suggestions(&self) -> DigitSet {
        if !self.hints_enabled {
            return DigitSet::EMPTY;
        }
        self.engine
            .suggest_unchecked(&self.secret, &self.guesses, &self.staged)
    }

    #[must_use]
    pub fn keyboard(&self) -> KeyboardState {
        let staged = self.staged.digit_set();
        let complete = self.is_staged_complete();

        KeyboardState {
            active: self.suggestions().union(staged),
            disabled_digits: if complete { DigitSet::ALL } else { staged },
            backspace_enabled: !self.staged.is_empty(),
            enter_enabled: complete,
            in_progress: self.status() == GameStatus::InProgress,
        }
    }

    /// Number of secrets still consistent with the submitted guesses
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.engine.search_unchecked(&self.secret, &self.guesses).len()
    }

    #[must_use]
    pub fn feedback_for(&self, guess: &Sequence) -> Feedback {
        self.engine.feedback_unchecked(&self.secret, guess)
    }

    /// Per-position marks for a row, or `None` when easy answers are off
    #[must_use]
    pub fn row_marks(&self, guess: &Sequence) -> Option<Vec<Mark>> {
        self.easy_answers.then(|| Mark::for_guess(&self.secret, guess))
    }

    /// Rows for the guess grid; a lost game reveals the secret as a final row
    #[must_use]
    pub fn rows(&self) -> Vec<Sequence> {
        let mut rows = self.guesses.clone();
        if self.status() == GameStatus::Failed {
            rows.push(self.secret);
        }
        rows
    }

    /// Share text once solved
    #[must_use]
    pub fn share_text(&self, dark_mode: bool) -> Option<String> {
        share_text(self.puzzle.date, &self.secret, &self.guesses, dark_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch_puzzle() -> Puzzle {
        // Secret "9041"
        Puzzle::new(GameDate::from_ymd(1970, 1, 1).unwrap(), 4)
    }

    fn type_guess(session: &mut GameSession<'_>, text: &str) -> Option<Feedback> {
        for ch in text.chars() {
            session.press(Key::Digit(ch.to_digit(10).unwrap() as u8));
        }
        session.submit()
    }

    #[test]
    fn staging_rejects_repeats_and_overflow() {
        let engine = Engine::default();
        let mut session = GameSession::new(&engine, epoch_puzzle());

        assert!(session.press(Key::Digit(1)));
        assert!(!session.press(Key::Digit(1)));
        assert!(session.press(Key::Digit(2)));
        assert!(session.press(Key::Digit(3)));
        assert!(session.press(Key::Digit(4)));
        assert!(!session.press(Key::Digit(5)));
        assert_eq!(session.staged().to_string(), "1234");
    }

    #[test]
    fn enter_requires_complete_guess() {
        let engine = Engine::default();
        let mut session = GameSession::new(&engine, epoch_puzzle());

        session.press(Key::Digit(1));
        assert!(!session.press(Key::Enter));
        assert!(session.guesses().is_empty());

        assert!(session.press(Key::Backspace));
        assert!(!session.press(Key::Backspace));
    }

    #[test]
    fn submit_records_guess_and_clears_stage() {
        let engine = Engine::default();
        let mut session = GameSession::new(&engine, epoch_puzzle());

        let feedback = type_guess(&mut session, "1234").unwrap();
        assert_eq!(feedback.counts(), (0, 2));
        assert_eq!(session.guesses().len(), 1);
        assert!(session.staged().is_empty());
        assert_eq!(session.status(), GameStatus::InProgress);
    }

    #[test]
    fn correct_guess_solves_and_freezes() {
        let engine = Engine::default();
        let mut session = GameSession::new(&engine, epoch_puzzle());

        type_guess(&mut session, "9041").unwrap();
        assert_eq!(session.status(), GameStatus::Solved);
        assert!(!session.press(Key::Digit(5)));
        assert!(session.suggestions().is_empty());
        assert!(session.share_text(false).is_some());
        assert!(!session.keyboard().in_progress);
    }

    #[test]
    fn nine_misses_fail_and_reveal_secret() {
        let engine = Engine::default();
        let mut session = GameSession::new(&engine, epoch_puzzle());
        let wrong = ["1235", "1236", "1237", "1238", "1253", "1263", "1273", "1283", "1325"];

        for guess in wrong {
            assert!(type_guess(&mut session, guess).is_some(), "{guess}");
        }
        assert_eq!(session.status(), GameStatus::Failed);
        assert!(type_guess(&mut session, "9041").is_none());

        let rows = session.rows();
        assert_eq!(rows.len(), MAX_GUESS_COUNT + 1);
        assert_eq!(rows.last(), Some(session.secret()));
        assert!(session.share_text(false).is_none());
    }

    #[test]
    fn keyboard_state_tracks_stage() {
        let engine = Engine::default();
        let mut session = GameSession::new(&engine, epoch_puzzle());

        let empty = session.keyboard();
        assert_eq!(empty.active, DigitSet::ALL);
        assert!(!empty.backspace_enabled);
        assert!(!empty.enter_enabled);

        for digit in [9, 0] {
            session.press(Key::Digit(digit));
        }
        let partial = session.keyboard();
        assert_eq!(partial.disabled_digits.to_string(), "09");
        assert!(partial.backspace_enabled);
        assert!(partial.active.contains(9) && partial.active.contains(0));

        for digit in [4, 1] {
            session.press(Key::Digit(digit));
        }
        let full = session.keyboard();
        assert_eq!(full.disabled_digits, DigitSet::ALL);
        assert!(full.enter_enabled);
    }

    #[test]
    fn hints_can_be_disabled() {
        let engine = Engine::default();
        let mut session = GameSession::new(&engine, epoch_puzzle());
        session.hints_enabled = false;
        assert!(session.suggestions().is_empty());

        session.press(Key::Digit(3));
        assert_eq!(session.keyboard().active, DigitSet::EMPTY.with(3));
    }

    #[test]
    fn candidates_shrink_after_guess() {
        let engine = Engine::default();
        let mut session = GameSession::new(&engine, epoch_puzzle());
        assert_eq!(session.candidate_count(), 5040);

        type_guess(&mut session, "1234").unwrap();
        assert!(session.candidate_count() < 5040);
    }

    #[test]
    fn resume_takes_length_from_first_guess() {
        let engine = Engine::default();
        let date = GameDate::from_ymd(1970, 1, 1).unwrap();
        let guesses = vec![Sequence::parse("12345").unwrap()];

        let session = GameSession::resume(&engine, date, 4, guesses).unwrap();
        assert_eq!(session.secret().to_string(), "90412");
        assert_eq!(session.guesses().len(), 1);

        let fresh = GameSession::resume(&engine, date, 3, Vec::new()).unwrap();
        assert_eq!(fresh.secret().to_string(), "904");
    }

    #[test]
    fn resume_rejects_mixed_lengths() {
        let engine = Engine::default();
        let date = GameDate::from_ymd(1970, 1, 1).unwrap();
        let guesses = vec![
            Sequence::parse("1234").unwrap(),
            Sequence::parse("123").unwrap(),
        ];
        assert!(GameSession::resume(&engine, date, 4, guesses).is_err());
    }

    #[test]
    fn row_marks_follow_easy_answers() {
        let engine = Engine::default();
        let mut session = GameSession::new(&engine, epoch_puzzle());
        let guess = Sequence::parse("1049").unwrap();

        assert_eq!(
            session.row_marks(&guess),
            Some(vec![Mark::Injured, Mark::Dead, Mark::Dead, Mark::Injured])
        );
        session.easy_answers = false;
        assert_eq!(session.row_marks(&guess), None);
        assert_eq!(session.feedback_for(&guess).dead_count(), 2);
    }
}
