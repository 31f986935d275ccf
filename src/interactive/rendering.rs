//! TUI rendering with ratatui
//!
//! Guess grid, keypad and messages for the daily game.

use super::app::{App, MessageStyle};
use crate::core::{Mark, Sequence};
use crate::game::{GameSession, GameStatus, MAX_GUESS_COUNT};
use crate::solver::universe_size;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(5), // Keypad
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Guess grid
            Constraint::Percentage(50), // Info panel
        ])
        .split(chunks[1]);

    render_grid(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);
    render_keypad(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let puzzle = app.session.puzzle();
    let header = Paragraph::new(format!(
        "🔢 DISNUMBER | {} | {} digits",
        puzzle.date.display_name(),
        puzzle.num_digits
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn mark_style(mark: Mark, dark_mode: bool) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match mark {
        Mark::Dead => base.fg(Color::Black).bg(Color::Green),
        Mark::Injured => base.fg(Color::White).bg(Color::Red),
        Mark::Miss if dark_mode => base.fg(Color::White).bg(Color::Black),
        Mark::Miss => base.fg(Color::Black).bg(Color::Gray),
    }
}

fn row_line(session: &GameSession<'_>, guess: &Sequence, dark_mode: bool) -> Line<'static> {
    let mut spans = Vec::with_capacity(guess.len() * 2 + 1);
    if let Some(marks) = session.row_marks(guess) {
        for (&digit, &mark) in guess.digits().iter().zip(&marks) {
            spans.push(Span::styled(format!(" {digit} "), mark_style(mark, dark_mode)));
            spans.push(Span::raw(" "));
        }
        return Line::from(spans);
    }

    // Counts only: the player works out which digits they belong to
    let plain = Style::default().add_modifier(Modifier::BOLD);
    for &digit in guess.digits() {
        spans.push(Span::styled(format!(" {digit} "), plain));
        spans.push(Span::raw(" "));
    }
    let feedback = session.feedback_for(guess);
    if feedback.dead_count() < guess.len() {
        spans.push(Span::styled(
            format!(
                " {} dead {} injured",
                feedback.dead_count(),
                feedback.injured_count()
            ),
            Style::default().fg(Color::Cyan),
        ));
    }
    Line::from(spans)
}

fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let secret = session.secret();
    let width = secret.len();

    let mut lines: Vec<Line> = session
        .guesses()
        .iter()
        .map(|guess| row_line(session, guess, app.dark_mode))
        .collect();

    match session.status() {
        GameStatus::InProgress => {
            let staged = session.staged();
            let mut spans: Vec<Span> = staged
                .digits()
                .iter()
                .flat_map(|digit| {
                    [
                        Span::styled(
                            format!(" {digit} "),
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                        ),
                        Span::raw(" "),
                    ]
                })
                .collect();
            for _ in staged.len()..width {
                spans.push(Span::styled(" _ ", Style::default().fg(Color::DarkGray)));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        GameStatus::Failed => {
            // Reveal the secret below the last guess
            lines.push(Line::from(Span::styled(
                format!("Secret: {secret}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        GameStatus::Solved => {}
    }

    let empty_rows = MAX_GUESS_COUNT.saturating_sub(session.guesses().len() + 1);
    for _ in 0..empty_rows {
        lines.push(Line::from(Span::styled(
            " · ".repeat(width),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let grid = Paragraph::new(lines).block(
        Block::default()
            .title(format!(
                " Guesses {}/{MAX_GUESS_COUNT} ",
                session.guesses().len()
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(grid, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search space gauge
            Constraint::Min(5),    // Messages
        ])
        .split(area);

    render_search_progress(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_search_progress(f: &mut Frame, app: &App, area: Rect) {
    let total = universe_size(app.session.secret().len()).max(1);
    let remaining = app.session.candidate_count().max(1);

    // Eliminated share on a log scale, so early guesses still move the bar
    let total_log = (total as f64).ln();
    let progress_pct = if total_log > 0.0 {
        ((1.0 - (remaining as f64).ln() / total_log) * 100.0).clamp(0.0, 100.0) as u16
    } else {
        100
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Search Space ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(progress_pct)
        .label(format!("{remaining} candidates remain of {total}"));

    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_keypad(f: &mut Frame, app: &App, area: Rect) {
    let keyboard = app.session.keyboard();

    let mut spans: Vec<Span> = (0..10u8)
        .flat_map(|digit| {
            let style = if !keyboard.in_progress || keyboard.disabled_digits.contains(digit) {
                Style::default().fg(Color::DarkGray)
            } else if keyboard.active.contains(digit) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            [Span::styled(format!(" {digit} "), style), Span::raw(" ")]
        })
        .collect();

    let enabled = |on: bool| {
        if on && keyboard.in_progress {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    spans.push(Span::styled(" ⌫ ", enabled(keyboard.backspace_enabled)));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(" ⏎ ", enabled(keyboard.enter_enabled)));

    let title = if app.session.hints_enabled {
        " Keypad | highlighted digits keep a solution reachable "
    } else {
        " Keypad | hints off "
    };

    let keypad = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(Color::Yellow)),
        );

    f.render_widget(keypad, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(area);

    let mode_text = match app.session.status() {
        GameStatus::InProgress => "Playing",
        GameStatus::Solved => "Solved",
        GameStatus::Failed => "Failed",
    };
    let mode = Paragraph::new(format!("Game: {mode_text}")).alignment(Alignment::Center);
    f.render_widget(mode, chunks[0]);

    let stats_text = format!(
        "Games: {} | Won: {}",
        app.stats.total_games, app.stats.games_won
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let help = Paragraph::new(
        "q: Quit | h: Hints | e: Colours | s: Share | d: Dark | [ ]: Day | + -: Digits | n: Restart",
    )
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::daily::{GameDate, Puzzle};
    use crate::solver::Engine;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_header_and_keypad() {
        let engine = Engine::default();
        let date = GameDate::from_ymd(1970, 1, 1).unwrap();
        let app = App::new(&engine, Puzzle::new(date, 4), date);

        let text = screen_text(&app);
        assert!(text.contains("DISNUMBER"));
        assert!(text.contains("Thu, 01 Jan 1970"));
        assert!(text.contains("Keypad"));
        assert!(text.contains("5040 candidates remain"));
    }

    #[test]
    fn count_only_rows_show_totals() {
        let engine = Engine::default();
        let date = GameDate::from_ymd(1970, 1, 1).unwrap();
        let mut app = App::new(&engine, Puzzle::new(date, 4), date);
        for digit in [1, 0, 4, 9] {
            app.session.stage_digit(digit);
        }
        app.session.submit();

        assert!(!screen_text(&app).contains("2 dead 2 injured"));
        app.session.easy_answers = false;
        assert!(screen_text(&app).contains("2 dead 2 injured"));
    }
}
