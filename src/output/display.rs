//! Display functions for command results

use super::formatters::{candidate_change, create_progress_bar, digit_list, marks_to_colored};
use crate::commands::{BenchmarkResult, CheckResult, HintResult, SolveResult, SurveyStatistics};
use crate::core::{Mark, Sequence};
use crate::daily::Puzzle;
use crate::game::MAX_GUESS_COUNT;
use colored::Colorize;

/// Print a day's secret
pub fn print_secret(puzzle: &Puzzle, secret: &Sequence) {
    println!(
        "{} ({} digits): {}",
        puzzle.date.display_name().bright_cyan(),
        puzzle.num_digits,
        secret.to_string().bright_yellow().bold()
    );
}

/// Print the result of auto-playing a puzzle
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        result.secret.to_string().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.guesses.iter().enumerate() {
        let turn = i + 1;
        println!(
            "\nTurn {}: {}  {}",
            turn,
            marks_to_colored(&step.guess, &Mark::for_guess(&result.secret, &step.guess)),
            step.feedback
        );

        if verbose {
            println!(
                "  {}",
                candidate_change(step.candidates_before, step.candidates_after)
            );
        }
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("✅ Solved in {} guesses!", result.guesses.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Failed to solve in {} guesses", result.guesses.len())
                .red()
                .bold()
        );
    }
}

/// Print feedback of one sequence against another
pub fn print_check_result(result: &CheckResult) {
    println!(
        "{}  {}",
        marks_to_colored(&result.candidate, &result.marks),
        result.feedback
    );
    println!("   Dead:    {}", digit_list(result.feedback.dead()).green());
    println!("   Injured: {}", digit_list(result.feedback.injured()).red());
}

/// Print candidate count and suggested digits
pub fn print_hint_result(result: &HintResult) {
    println!(
        "\n📊 {} after {} guess{}",
        format!("{} candidates", result.candidate_count)
            .bright_yellow()
            .bold(),
        result.history.len(),
        if result.history.len() == 1 { "" } else { "es" }
    );
    if !result.prefix.is_empty() {
        println!("   Typed so far: {}", result.prefix.to_string().bright_white());
    }
    println!(
        "   Next digits:  {}",
        digit_list(result.next_digits).bright_cyan()
    );

    if !result.candidates.is_empty() {
        println!("\nRemaining candidates:");
        for candidate in &result.candidates {
            println!("  • {candidate}");
        }
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Days played:      {}", result.total_days);
    println!("   Solved:           {}", result.solved);
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_guesses).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_guesses).yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Days/second:      {:.1}", result.days_per_second);
    println!(
        "   Search cache:     {:.1}% hits",
        result.cache.search.hit_rate() * 100.0
    );

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for guess_count in 1..=MAX_GUESS_COUNT {
        if let Some(&count) = result.distribution.get(&guess_count) {
            let pct = (count as f64 / result.total_days as f64) * 100.0;
            let bar = create_progress_bar(pct, 100.0, 40);
            println!("   {guess_count}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }
}

/// Print the digit/position distribution of a survey
pub fn print_survey_statistics(stats: &SurveyStatistics) {
    println!("\n{}", "═".repeat(70));
    println!(" Survey Results ");
    println!("{}", "═".repeat(70));

    println!("\n📊 {}", "Range".bright_cyan().bold());
    println!(
        "  Days:               {} ({} to {})",
        stats.days, stats.first_date, stats.last_date
    );
    println!("  Digits per secret:  {}", stats.num_digits);
    println!("  Distinct secrets:   {}", stats.distinct_secrets);
    println!(
        "  Time:               {:.2}s",
        stats.duration.as_secs_f64()
    );

    println!("\n📈 {}", "Digit by position".bright_cyan().bold());
    let header: String = (0..stats.num_digits).map(|p| format!("{p:>5}")).collect();
    println!("  digit{header}");
    for digit in 0..10 {
        let row: String = (0..stats.num_digits)
            .map(|position| format!("{:>5}", stats.count(digit, position)))
            .collect();
        println!("  {digit:>5}{row}");
    }

    let spread = stats.spread();
    let expected = stats.days / 10;
    let spread_str = format!("{spread}");
    let colored_spread = if spread <= stats.days / 6 {
        spread_str.green()
    } else {
        spread_str.red()
    };
    println!("\n  Expected per cell:  {expected}");
    println!("  Spread (max - min): {colored_spread}");
}
