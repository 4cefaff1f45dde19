//! Terminal front end over the content index and the progress store.
//!
//! Provides command-line parsing, per-command session wiring and dispatch.

pub mod args;
pub mod commands;
pub mod display;
pub mod session;

pub use args::{Cli, Commands, ToggleTarget};
pub use session::Session;

use anyhow::Result;

use crate::config::Settings;

/// Run a content or progress command. `init` and `config` are handled by the caller.
pub fn dispatch(command: Commands, settings: Settings) -> Result<()> {
    let mut session = Session::open(settings)?;
    let session = &mut session;

    match command {
        Commands::Init { .. } | Commands::Config => Ok(()),
        Commands::Tracks => commands::browse::run_tracks(session),
        Commands::Status { track } => commands::browse::run_status(session, track.as_deref()),
        Commands::Phase { track, id } => commands::browse::run_phase(session, &track, id),
        Commands::Topic { id } => commands::browse::run_topic(session, &id),
        Commands::Search {
            query,
            track,
            limit,
        } => commands::browse::run_search(session, &query, track.as_deref(), limit),
        Commands::Toggle { target } => commands::toggle::run_toggle(session, target),
        Commands::Sections { track } => commands::problems::run_sections(session, track.as_deref()),
        Commands::Section {
            index,
            filter,
            track,
        } => commands::problems::run_section(session, index, filter, track.as_deref()),
        Commands::Theme => commands::preferences::run_theme(session),
        Commands::Eli5 => commands::preferences::run_eli5(session),
        Commands::Reconcile => commands::preferences::run_reconcile(session),
        Commands::Reset { yes } => commands::preferences::run_reset(session, yes),
    }
}
