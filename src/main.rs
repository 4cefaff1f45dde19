use clap::Parser;
use roadmap::Settings;
use roadmap::cli::{Cli, Commands, commands, display};

fn main() {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        Settings::default()
    });

    roadmap::logging::init_with_config(&settings.logging);
    display::configure_colors();

    // Running without a settings file is fine; defaults apply
    if cli.config.is_none() && !matches!(cli.command, Commands::Init { .. }) {
        if let Err(reason) = Settings::check_init() {
            roadmap::debug_event!("cli", "settings", "{reason}; using defaults");
        }
    }

    let result = match cli.command {
        Commands::Init { force } => commands::init::run_init(force),
        Commands::Config => commands::init::run_config(&settings),
        command => roadmap::cli::dispatch(command, settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
