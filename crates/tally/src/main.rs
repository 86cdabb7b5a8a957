use std::io::{Write, stdout};

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use tally_config::Config;
use tracing::{info, warn};

mod app;
mod cli;
mod logging;

use app::App;
use cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(log_path) = logging::init() {
        info!(path = %log_path.display(), "logging started");
    }

    let config_path = cli.config.clone().or_else(Config::default_path);
    let saved = match &config_path {
        Some(path) => Config::load_from(path).unwrap_or_else(|e| {
            warn!(error = %e, "using default config");
            Config::default()
        }),
        None => Config::default(),
    };

    if cli.print_particles_config {
        println!("{}", serde_json::to_string_pretty(&saved.particles)?);
        return Ok(());
    }

    let mut config = saved.clone();
    cli.apply(&mut config);

    let terminal = ratatui::init();
    release_mouse_on_panic();
    if let Err(e) = execute!(stdout(), EnableMouseCapture) {
        warn!(error = %e, "mouse capture unavailable, hover effects disabled");
    }
    let result = App::new(config, saved, config_path).run(terminal);
    release_mouse(&mut stdout());
    ratatui::restore();
    result
}

/// Turn off mouse reporting, logging a failure instead of returning it.
fn release_mouse<W: Write>(out: &mut W) {
    if let Err(e) = execute!(out, DisableMouseCapture) {
        warn!(error = %e, "failed to disable mouse capture");
    }
}

/// Chain onto the panic hook from `ratatui::init` so a panic also stops
/// mouse reporting before the terminal is restored.
fn release_mouse_on_panic() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        release_mouse(&mut stdout());
        hook(info);
    }));
}
