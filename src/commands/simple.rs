//! Simple interactive CLI mode
//!
//! Line-based game without the TUI

use crate::core::Sequence;
use crate::game::{GameSession, GameStatus, MAX_GUESS_COUNT};
use crate::output::formatters::{digit_list, marks_to_colored};
use colored::Colorize;
use std::io::{self, Write};

/// Typed words that are not guesses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    ToggleHints,
    ToggleEasyAnswers,
}

fn parse_command(input: &str) -> Option<Command> {
    match input {
        "quit" | "q" | "exit" => Some(Command::Quit),
        "hint" | "h" => Some(Command::ToggleHints),
        "easy" | "e" => Some(Command::ToggleEasyAnswers),
        _ => None,
    }
}

/// Run the simple interactive CLI mode on `session`, which may be resumed
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input.
pub fn run_simple(mut session: GameSession<'_>) -> Result<(), String> {
    let puzzle = *session.puzzle();
    let num_digits = session.secret().len();

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Disnumber - Interactive Mode                 ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!(
        "Game {} | {} distinct digits | {} guesses",
        puzzle.date.display_name().bright_cyan(),
        num_digits,
        MAX_GUESS_COUNT
    );
    println!("After each guess you'll see, per position:\n");
    println!("  - {} dead: right digit, right place", "■".green());
    println!("  - {} injured: right digit, wrong place", "■".red());
    println!("  - {} miss: digit not in the secret\n", "■".bright_black());
    println!(
        "Commands: 'hint' toggles suggestions, 'easy' toggles per-digit colours, 'quit' to exit\n"
    );

    for guess in session.guesses() {
        print_row(&session, guess);
    }

    while session.status() == GameStatus::InProgress {
        let turn = session.guesses().len() + 1;
        println!("────────────────────────────────────────────────────────────");
        println!(
            "Turn {turn}/{MAX_GUESS_COUNT}: {} candidates remaining",
            session.candidate_count()
        );
        if session.hints_enabled {
            println!(
                "Digits still possible: {}",
                digit_list(session.suggestions()).bright_yellow()
            );
        }

        let input = get_user_input("Guess")?.to_lowercase();
        match parse_command(&input) {
            Some(Command::Quit) => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            Some(Command::ToggleHints) => {
                session.hints_enabled = !session.hints_enabled;
                let state = if session.hints_enabled { "on" } else { "off" };
                println!("Hints {state}\n");
                continue;
            }
            Some(Command::ToggleEasyAnswers) => {
                session.easy_answers = !session.easy_answers;
                let state = if session.easy_answers { "on" } else { "off" };
                println!("Per-digit colours {state}\n");
                continue;
            }
            None => {}
        }

        let guess = match parse_guess(&input, num_digits) {
            Ok(guess) => guess,
            Err(message) => {
                println!("❌ {message}\n");
                continue;
            }
        };

        for &digit in guess.digits() {
            session.stage_digit(digit);
        }
        if session.submit().is_some() {
            print_row(&session, &guess);
        }
    }

    print_outcome(&session);
    Ok(())
}

/// One submitted guess with its feedback
fn print_row(session: &GameSession<'_>, guess: &Sequence) {
    let feedback = session.feedback_for(guess);
    let digits = match session.row_marks(guess) {
        Some(marks) => marks_to_colored(guess, &marks),
        None => guess.to_string().bold().to_string(),
    };
    println!("  {digits}   {feedback}");
}

/// Validate a typed guess for a game of `num_digits`
fn parse_guess(input: &str, num_digits: usize) -> Result<Sequence, String> {
    let guess = Sequence::parse(input).map_err(|e| format!("Invalid guess: {e}"))?;
    if guess.len() != num_digits {
        return Err(format!("Enter exactly {num_digits} digits"));
    }
    if !guess.has_distinct_digits() {
        return Err("Digits must not repeat".to_string());
    }
    Ok(guess)
}

fn print_outcome(session: &GameSession<'_>) {
    println!("\n{}", "═".repeat(62).bright_cyan());
    match session.status() {
        GameStatus::Solved => {
            let count = session.guesses().len();
            println!(
                "  {} Solved in {} {}",
                "🎉".bright_green(),
                count.to_string().bright_cyan().bold(),
                if count == 1 { "guess" } else { "guesses" }
            );
            if let Some(text) = session.share_text(false) {
                println!("\n{text}");
            }
        }
        GameStatus::Failed => {
            println!(
                "  Out of guesses. The secret was {}",
                session.secret().to_string().bright_yellow().bold()
            );
        }
        GameStatus::InProgress => {}
    }
    println!("{}", "═".repeat(62).bright_cyan());
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> Result<String, String> {
    print!("{prompt}: ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .map_err(|e| e.to_string())?;

    // End of input ends the game
    if read == 0 {
        return Ok("quit".to_string());
    }
    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_guess_accepts_distinct_digits() {
        assert_eq!(parse_guess("0123", 4).unwrap().to_string(), "0123");
        assert_eq!(parse_guess(" 987 ", 3).unwrap().to_string(), "987");
    }

    #[test]
    fn commands_are_recognised() {
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("hint"), Some(Command::ToggleHints));
        assert_eq!(parse_command("easy"), Some(Command::ToggleEasyAnswers));
        assert_eq!(parse_command("e"), Some(Command::ToggleEasyAnswers));
        assert_eq!(parse_command("0123"), None);
    }

    #[test]
    fn parse_guess_rejects_bad_input() {
        assert!(parse_guess("012", 4).is_err());
        assert!(parse_guess("0113", 4).is_err());
        assert!(parse_guess("01x3", 4).is_err());
    }
}
