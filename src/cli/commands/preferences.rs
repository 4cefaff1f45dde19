//! Preference and maintenance commands: theme, eli5, reconcile, reset.

use anyhow::{Context, Result, bail};

use crate::cli::session::Session;
use crate::content::load_catalog;

pub fn run_theme(session: &mut Session) -> Result<()> {
    session.store.toggle_theme();
    println!("Theme: {}", session.store.theme());
    Ok(())
}

pub fn run_eli5(session: &mut Session) -> Result<()> {
    session.store.toggle_eli5_mode();
    let state = if session.store.eli5_mode() { "on" } else { "off" };
    println!("Simple explanations: {state}");
    Ok(())
}

pub fn run_reconcile(session: &mut Session) -> Result<()> {
    let content_path = session.settings.content_path();
    let catalog = load_catalog(&content_path)
        .with_context(|| format!("Failed to load content from {}", content_path.display()))?;
    let report = session.store.reconcile(&catalog);

    if report.is_clean() {
        println!("Progress matches the content. Nothing to remove.");
        return Ok(());
    }
    println!(
        "Removed {} completed topic(s), {} bookmark(s), {} subtopic mark(s) in {} topic(s), {} problem(s).",
        report.completed_topics,
        report.bookmarks,
        report.subtopic_indices,
        report.subtopic_topics,
        report.problems
    );
    Ok(())
}

pub fn run_reset(session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        bail!("This erases all saved progress. Re-run with --yes to confirm.");
    }
    session.store.reset();
    println!("All progress erased.");
    Ok(())
}
