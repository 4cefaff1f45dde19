//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

use crate::progress::ProblemFilter;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Browse learning roadmaps and track your progress
#[derive(Parser, Debug)]
#[command(
    name = "roadmap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse learning roadmaps and track your progress",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true, env = "RM_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up the .roadmap directory
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,

    /// List available tracks
    Tracks,

    /// Overall progress of a track
    #[command(
        after_help = "Without a track, the last opened track is used, then the first active one."
    )]
    Status {
        /// Track id, e.g. "aiml"
        track: Option<String>,
    },

    /// Topics of one phase with completion marks
    Phase {
        /// Track id
        track: String,
        /// Phase number
        id: u32,
    },

    /// Show one topic with its subtopics and prerequisites
    Topic {
        /// Topic id, e.g. "linear-algebra"
        id: String,
    },

    /// Search topics by title, description, tag or subtopic
    Search {
        query: String,

        /// Only search this track
        #[arg(short, long)]
        track: Option<String>,

        /// Maximum results (defaults to search.limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Flip a completion mark or bookmark
    Toggle {
        #[command(subcommand)]
        target: ToggleTarget,
    },

    /// Sections of a problem track with progress
    Sections {
        /// Problem track id (defaults to the first problem track)
        #[arg(short, long)]
        track: Option<String>,
    },

    /// Problems of one section
    Section {
        /// Section position as shown by `sections`
        index: usize,

        /// all, easy, medium, hard, solved or unsolved
        #[arg(short, long, default_value_t = ProblemFilter::All)]
        filter: ProblemFilter,

        /// Problem track id (defaults to the first problem track)
        #[arg(short, long)]
        track: Option<String>,
    },

    /// Switch between dark and light theme
    Theme,

    /// Turn simplified explanations on or off
    Eli5,

    /// Drop progress for topics and problems no longer in the content
    Reconcile,

    /// Erase all saved progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ToggleTarget {
    /// Mark a topic complete or incomplete
    Topic { id: String },

    /// Add or remove a bookmark
    Bookmark { id: String },

    /// Mark a subtopic (by position, starting at 0) complete or incomplete
    Subtopic { id: String, index: usize },

    /// Mark a practice problem solved or unsolved
    Problem { id: String },
}
