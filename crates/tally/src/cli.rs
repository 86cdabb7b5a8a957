//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;
use tally_config::Config;

/// Count a balance up from zero over a particle network.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
pub struct Cli {
    /// Balance to count up to, e.g. 2550.50
    #[arg(allow_negative_numbers = true)]
    pub balance: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Milliseconds between animation ticks
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Don't draw the particle background
    #[arg(long)]
    pub no_particles: bool,

    /// Print the particle configuration as JSON and exit
    #[arg(long)]
    pub print_particles_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(balance) = &self.balance {
            config.balance = Some(balance.clone());
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_period_ms = tick_ms;
        }
        if self.no_particles {
            config.particles_enabled = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from(["tally", "2550.50", "--tick-ms", "20", "--no-particles"])
            .expect("valid args");
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.balance.as_deref(), Some("2550.50"));
        assert_eq!(config.tick_period_ms, 20);
        assert!(!config.particles_enabled);
    }

    #[test]
    fn test_no_args_keeps_config() {
        let cli = Cli::try_parse_from(["tally"]).expect("valid args");
        let mut config = Config {
            balance: Some("12".to_string()),
            ..Default::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.balance.as_deref(), Some("12"));
        assert!(config.particles_enabled);
    }

    #[test]
    fn test_negative_balance_is_positional() {
        let cli = Cli::try_parse_from(["tally", "-42.5"]).expect("valid args");
        assert_eq!(cli.balance.as_deref(), Some("-42.5"));
    }
}
