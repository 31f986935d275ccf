//! Interactive TUI interface
//!
//! Keypad and guess grid for playing a day's puzzle in the terminal.

mod app;
mod rendering;

pub use app::{App, Message, MessageStyle, Statistics, run_tui};
