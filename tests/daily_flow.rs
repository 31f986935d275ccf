//! End-to-end checks through the public API

use disnumber::core::{DigitSet, Sequence};
use disnumber::daily::{GameDate, Puzzle};
use disnumber::game::{GameSession, GameStatus, Key};
use disnumber::solver::{Engine, EngineConfig, EngineError, MatchRule};

fn seq(text: &str) -> Sequence {
    Sequence::parse(text).unwrap()
}

fn seqs(texts: &[&str]) -> Vec<Sequence> {
    texts.iter().map(|t| seq(t)).collect()
}

#[test]
fn known_daily_secrets() {
    let cases = [
        ((1970, 1, 1), 10, "9041283675"),
        ((2023, 9, 1), 4, "8401"),
        ((2023, 9, 1), 7, "8401256"),
        ((2024, 2, 29), 4, "5641"),
        ((2000, 1, 1), 7, "7904316"),
        ((2020, 1, 16), 10, "2036517948"),
    ];
    for ((y, m, d), digits, expected) in cases {
        let date = GameDate::from_ymd(y, m, d).unwrap();
        assert_eq!(Puzzle::new(date, digits).secret().to_string(), expected);
    }
}

#[test]
fn worked_scenario_narrows_to_secret() {
    let engine = Engine::default();
    let secret = seq("0123");

    let hints = |history: &[&str], prefix: &str| {
        engine
            .suggest_next_digits(&secret, &seqs(history), &seq(prefix))
            .unwrap()
            .len()
    };

    assert_eq!(hints(&[], ""), 10);
    assert_eq!(hints(&["5432"], ""), 8);
    assert_eq!(hints(&["3012"], ""), 3);
    assert_eq!(hints(&["3012", "2301", "1230"], ""), 1);

    let candidates = engine
        .search_candidates(&secret, &seqs(&["3012", "2301", "1230"]))
        .unwrap();
    assert_eq!(candidates.as_slice(), [secret].as_slice());
}

#[test]
fn legacy_counts_keep_wider_candidate_sets() {
    let engine = Engine::new(EngineConfig::default().with_match_rule(MatchRule::Counts));
    let candidates = engine
        .search_candidates(&seq("5097"), &seqs(&["4321", "9876"]))
        .unwrap();
    assert!(candidates.contains(&seq("8065")));
    assert!(candidates.contains(&seq("5097")));
}

#[test]
fn malformed_requests_fail_fast() {
    let engine = Engine::default();
    assert!(matches!(
        engine.search_candidates(&seq("0123"), &seqs(&["012"])),
        Err(EngineError::LengthMismatch { .. })
    ));
    assert!(matches!(
        engine.suggest_next_digits(&seq("0123"), &[], &seq("01234")),
        Err(EngineError::PrefixTooLong { .. })
    ));
}

#[test]
fn session_plays_a_full_game() {
    let engine = Engine::default();
    let date = GameDate::from_ymd(2023, 9, 1).unwrap();
    let mut session = GameSession::new(&engine, Puzzle::new(date, 4));

    for guess in ["0123", "8401"] {
        for ch in guess.chars() {
            let digit = ch.to_digit(10).unwrap() as u8;
            // Every digit of the secret stays suggested along the way
            if guess == "8401" {
                assert!(session.keyboard().active.contains(digit));
            }
            session.press(Key::Digit(digit));
        }
        assert!(session.press(Key::Enter));
    }

    assert_eq!(session.status(), GameStatus::Solved);
    assert_eq!(session.suggestions(), DigitSet::EMPTY);

    let share = session.share_text(false).unwrap();
    assert!(share.contains("Solved in 2 guesses."));
    assert!(share.ends_with("#2023-09-01"));
}

#[test]
fn suggestions_always_lead_to_a_candidate() {
    let engines = [
        Engine::default(),
        Engine::new(EngineConfig::default().with_match_rule(MatchRule::Counts)),
    ];
    let days = [(1970, 1, 1), (2023, 9, 1), (2024, 2, 29), (2031, 3, 14)];

    for engine in &engines {
        for (y, m, d) in days {
            for num_digits in 3..=6 {
                let date = GameDate::from_ymd(y, m, d).unwrap();
                let secret = Puzzle::new(date, num_digits).secret();
                check_suggestions_feasible(engine, &secret);
            }
        }
    }
}

/// Play a fixed opening against `secret`, checking every prefix at every turn
fn check_suggestions_feasible(engine: &Engine, secret: &Sequence) {
    let n = secret.len();
    let opening: Vec<Sequence> = (0..4u8)
        .map(|k| {
            let digits: Vec<u8> = (0..n as u8).map(|i| (k * 3 + i) % 10).collect();
            Sequence::from_digits(&digits).unwrap()
        })
        .filter(|guess| guess != secret)
        .collect();

    for turn in 0..=opening.len() {
        let history = &opening[..turn];
        let candidates = engine.search_candidates(secret, history).unwrap();
        assert!(candidates.contains(secret), "{secret} after {history:?}");

        let mut prefixes: Vec<Sequence> = history.iter().chain([secret]).copied().collect();
        prefixes.extend(candidates.iter().take(3).copied());
        for source in prefixes {
            for len in 0..n {
                let prefix = Sequence::from_digits(&source.digits()[..len]).unwrap();
                let hints = engine.suggest_next_digits(secret, history, &prefix).unwrap();

                for digit in hints.iter() {
                    let mut digits = prefix.digits().to_vec();
                    digits.push(digit);
                    let extended = Sequence::from_digits(&digits).unwrap();
                    assert!(
                        candidates.iter().any(|c| c.starts_with(&extended)),
                        "{digit} after {prefix} leads nowhere for {secret}"
                    );
                }

                // The secret itself is never ruled out
                if secret.starts_with(&prefix) {
                    assert!(hints.contains(secret.digits()[len]), "{secret} at {prefix}");
                }
            }
        }
    }
}
