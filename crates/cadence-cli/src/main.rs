//! Cadence CLI - Blend voice clone DNA from the command line.

use cadence_cli::commands;
use cadence_cli::repl;
use cadence_cli::{Cli, Command, Config, Formatter};
use cadence_sdk::{CadenceClient, ClientConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> cadence_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;
    if !config_path.exists() {
        config.save().ok();
    }

    if let Some(profile_name) = cli.profile.clone() {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command.unwrap_or(Command::Repl) {
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        cmd => {
            // Commands that talk to the server
            let server_url = config.server_url(cli.server.as_deref())?;
            let client = CadenceClient::from_config(
                ClientConfig::new(server_url).with_timeout(config.timeout()),
            )?;

            match cmd {
                Command::Repl => {
                    repl::run_repl(&client, &mut config, &formatter).await?;
                }
                Command::Clones(args) => {
                    commands::execute_clones(args, &client, &formatter).await?;
                }
                Command::Dna(args) => {
                    commands::execute_dna(args, &client, &formatter).await?;
                }
                Command::Merge(args) => {
                    commands::execute_merge(args, &client, &formatter).await?;
                }
                Command::Profile(_) => unreachable!(),
            }
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins, otherwise `-v` picks the level.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
