//! TUI application state and logic

use crate::core::MAX_DIGITS;
use crate::daily::{GameDate, Puzzle};
use crate::game::{GameSession, GameStatus, Key};
use crate::solver::Engine;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App<'e> {
    pub engine: &'e Engine,
    pub today: GameDate,
    pub session: GameSession<'e>,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub dark_mode: bool,
    pub should_quit: bool,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
}

impl<'e> App<'e> {
    #[must_use]
    pub fn new(engine: &'e Engine, puzzle: Puzzle, today: GameDate) -> Self {
        Self::from_session(engine, GameSession::new(engine, puzzle), today)
    }

    /// Open the TUI on a game that may already have guesses
    #[must_use]
    pub fn from_session(engine: &'e Engine, session: GameSession<'e>, today: GameDate) -> Self {
        let puzzle = *session.puzzle();
        let mut app = Self {
            engine,
            today,
            session,
            messages: Vec::new(),
            stats: Statistics::default(),
            dark_mode: false,
            should_quit: false,
        };
        app.add_message(
            &format!(
                "Game {}: find the {} distinct digits.",
                puzzle.date.display_name(),
                puzzle.num_digits
            ),
            MessageStyle::Info,
        );
        app.add_message(
            "Highlighted keys keep a solution reachable.",
            MessageStyle::Info,
        );
        app
    }

    /// Dispatch one key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c @ '0'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    self.session.press(Key::Digit(digit as u8));
                }
            }
            KeyCode::Backspace => {
                self.session.press(Key::Backspace);
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char('h') => self.toggle_hints(),
            KeyCode::Char('e') => self.toggle_easy_answers(),
            KeyCode::Char('d') => {
                self.dark_mode = !self.dark_mode;
            }
            KeyCode::Char('s') => self.show_share_text(),
            KeyCode::Char('n') => self.restart(),
            KeyCode::Char('[') | KeyCode::Left => self.change_day(false),
            KeyCode::Char(']') | KeyCode::Right => self.change_day(true),
            KeyCode::Char('+') | KeyCode::Up => self.change_digits(true),
            KeyCode::Char('-') | KeyCode::Down => self.change_digits(false),
            _ => {}
        }
    }

    fn submit(&mut self) {
        if !self.session.is_staged_complete() {
            self.add_message(
                &format!("Enter {} digits first", self.session.secret().len()),
                MessageStyle::Error,
            );
            return;
        }
        let Some(feedback) = self.session.submit() else {
            return;
        };

        match self.session.status() {
            GameStatus::Solved => {
                self.stats.total_games += 1;
                self.stats.games_won += 1;
                let count = self.session.guesses().len();
                self.add_message(
                    &format!(
                        "🎉 Solved in {count} {}! Press 's' to share.",
                        if count == 1 { "guess" } else { "guesses" }
                    ),
                    MessageStyle::Success,
                );
            }
            GameStatus::Failed => {
                self.stats.total_games += 1;
                self.add_message(
                    &format!("Out of guesses. The secret was {}", self.session.secret()),
                    MessageStyle::Error,
                );
            }
            GameStatus::InProgress => {
                self.add_message(
                    &format!(
                        "{feedback} | {} candidates remain",
                        self.session.candidate_count()
                    ),
                    MessageStyle::Info,
                );
            }
        }
    }

    fn toggle_hints(&mut self) {
        self.session.hints_enabled = !self.session.hints_enabled;
        let state = if self.session.hints_enabled { "on" } else { "off" };
        self.add_message(&format!("Hints {state}"), MessageStyle::Info);
    }

    fn toggle_easy_answers(&mut self) {
        self.session.easy_answers = !self.session.easy_answers;
        let text = if self.session.easy_answers {
            "Rows colour each digit"
        } else {
            "Rows show dead and injured counts only"
        };
        self.add_message(text, MessageStyle::Info);
    }

    fn show_share_text(&mut self) {
        match self.session.share_text(self.dark_mode) {
            Some(text) => {
                for line in text.lines().filter(|line| !line.is_empty()) {
                    self.add_message(line, MessageStyle::Success);
                }
            }
            None => self.add_message("Solve the puzzle to share it", MessageStyle::Error),
        }
    }

    /// Start the current puzzle over
    pub fn restart(&mut self) {
        let puzzle = *self.session.puzzle();
        self.start(puzzle);
    }

    /// Move to the previous or next day, never past today
    pub fn change_day(&mut self, forward: bool) {
        let puzzle = *self.session.puzzle();
        let date = if forward {
            puzzle.date.next_day().filter(|date| *date <= self.today)
        } else {
            puzzle.date.days_before(1)
        };

        match date {
            Some(date) => self.start(Puzzle::new(date, puzzle.num_digits)),
            None => self.add_message("No puzzle for that day yet", MessageStyle::Error),
        }
    }

    /// Change the digit count; only allowed before the first guess
    pub fn change_digits(&mut self, more: bool) {
        if !self.session.guesses().is_empty() {
            self.add_message(
                "Digit count is fixed once a game has started",
                MessageStyle::Error,
            );
            return;
        }

        let puzzle = *self.session.puzzle();
        let num_digits = if more {
            (puzzle.num_digits + 1).min(MAX_DIGITS)
        } else {
            puzzle.num_digits.saturating_sub(1).max(1)
        };
        if num_digits != puzzle.num_digits {
            self.start(Puzzle::new(puzzle.date, num_digits));
        }
    }

    fn start(&mut self, puzzle: Puzzle) {
        let hints_enabled = self.session.hints_enabled;
        let easy_answers = self.session.easy_answers;
        self.session = GameSession::new(self.engine, puzzle);
        self.session.hints_enabled = hints_enabled;
        self.session.easy_answers = easy_answers;
        self.messages.clear();
        self.add_message(
            &format!(
                "Game {} with {} digits",
                puzzle.date.display_name(),
                puzzle.num_digits
            ),
            MessageStyle::Info,
        );
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 8 messages
        if self.messages.len() > 8 {
            self.messages.remove(0);
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App<'_>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App<'_>,
) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
