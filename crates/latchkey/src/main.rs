// SPDX-FileCopyrightText: 2026 Latchkey Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! latchkey - sign in to a remote portal from the terminal.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod signin;
mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use latchkey_config::LatchkeyConfig;

/// latchkey - sign in to a remote portal, answering credential challenges
/// from the terminal.
#[derive(Parser, Debug)]
#[command(name = "latchkey", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in to a portal.
    SignIn {
        /// Portal URL; overrides `portal.url` from the configuration.
        #[arg(long)]
        url: Option<String>,
        /// Try anonymous access before asking for a credential.
        #[arg(long)]
        anonymous: bool,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => latchkey_config::load_and_validate_path(path),
        None => latchkey_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            latchkey_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    let outcome = match cli.command {
        Some(Commands::SignIn { url, anonymous }) => {
            signin::run_sign_in(&config, url, anonymous).await
        }
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("latchkey: use --help for available commands");
            Ok(())
        }
    };

    if outcome.is_err() {
        std::process::exit(1);
    }
}

fn print_config(config: &LatchkeyConfig) -> Result<(), latchkey_core::LatchkeyError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| latchkey_core::LatchkeyError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "latchkey={level},latchkey_auth={level},latchkey_portal={level},warn",
            level = log_level.to_ascii_lowercase()
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    #[serial_test::serial]
    fn binary_loads_config_defaults() {
        let config = latchkey_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.auth.max_attempts, 5);
    }

    #[test]
    fn parses_sign_in_flags() {
        let cli = Cli::try_parse_from([
            "latchkey",
            "sign-in",
            "--url",
            "https://portal.test/gis",
            "--anonymous",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::SignIn { url, anonymous }) => {
                assert_eq!(url.as_deref(), Some("https://portal.test/gis"));
                assert!(anonymous);
            }
            other => panic!("expected sign-in, got {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["latchkey", "config", "--config", "/tmp/latchkey.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/latchkey.toml")));
        assert!(matches!(cli.command, Some(Commands::Config)));
    }

    #[test]
    fn print_config_renders_toml() {
        assert!(print_config(&LatchkeyConfig::default()).is_ok());
    }
}
