//! Disnumber
//!
//! A daily code-breaking game over sequences of distinct digits, with a
//! deduction engine that narrows the possible secrets after every guess.
//!
//! # Quick Start
//!
//! ```rust
//! use disnumber::core::Sequence;
//! use disnumber::daily::{GameDate, Puzzle};
//! use disnumber::solver::Engine;
//!
//! // Every client derives the same secret for the same day
//! let date = GameDate::from_ymd(2023, 9, 1).unwrap();
//! let secret = Puzzle::new(date, 4).secret();
//! assert_eq!(secret.to_string(), "8401");
//!
//! // Feedback and candidate search
//! let engine = Engine::default();
//! let guess = Sequence::parse("0123").unwrap();
//! let feedback = engine.evaluate_feedback(&secret, &guess).unwrap();
//! println!("{feedback}");
//!
//! let candidates = engine.search_candidates(&secret, &[guess]).unwrap();
//! assert!(candidates.contains(&secret));
//! ```

// Core domain types
pub mod core;

// Daily secret derivation
pub mod daily;

// Deduction engine
pub mod solver;

// Game session and sharing
pub mod game;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
