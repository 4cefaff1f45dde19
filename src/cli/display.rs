//! Terminal rendering helpers.

use console::{Style, style};

use crate::types::{Difficulty, ProblemDifficulty};

const BAR_WIDTH: usize = 20;

/// True when `NO_COLOR` is set or stdout is not a terminal.
pub fn should_disable_colors() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) || !console::colors_enabled()
}

/// Apply the color policy once at startup.
pub fn configure_colors() {
    if should_disable_colors() {
        console::set_colors_enabled(false);
    }
}

pub fn heading(text: &str) -> String {
    style(text).cyan().bold().to_string()
}

pub fn dim(text: &str) -> String {
    style(text).dim().to_string()
}

/// `[########------------]  40%`
pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));
    let color = match percent {
        100 => Style::new().green(),
        0 => Style::new().dim(),
        _ => Style::new().yellow(),
    };
    format!("[{}] {percent:>3}%", color.apply_to(bar))
}

pub fn check(done: bool) -> String {
    if done {
        style("[x]").green().to_string()
    } else {
        "[ ]".to_string()
    }
}

pub fn difficulty(level: Difficulty) -> String {
    let styled = match level {
        Difficulty::Beginner => style(level.as_str()).green(),
        Difficulty::Intermediate => style(level.as_str()).yellow(),
        Difficulty::Advanced => style(level.as_str()).red(),
    };
    styled.to_string()
}

pub fn problem_difficulty(level: ProblemDifficulty) -> String {
    let label = match level {
        ProblemDifficulty::Easy => style("easy").green(),
        ProblemDifficulty::Medium => style("medium").yellow(),
        ProblemDifficulty::Hard => style("hard").red(),
    };
    label.to_string()
}
