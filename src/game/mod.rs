//! Playing a daily puzzle
//!
//! The session layer sits between key presses and the engine; the share
//! module renders a finished game for posting.

mod session;
mod share;

pub use session::{GameSession, GameStatus, Key, KeyboardState, MAX_GUESS_COUNT};
pub use share::{SHARE_URL, share_text, squares};
