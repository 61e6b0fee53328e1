use anyhow::Context;
use clap::{Parser, Subcommand};
use cuneo_core::Config;
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::info;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cuneo", version, about = "Cuneo weather, time and chat API")]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); ignored when RUST_LOG is set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Address to bind; overrides config file and CUNEO_HOST.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on; overrides config file and CUNEO_PORT.
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Store the OpenAI API key and environment label in the config file.
    Configure,

    /// Print the config file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { host, port } => {
                let mut config = Config::load()?;
                if let Some(host) = host {
                    config.server.host = host;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }

                cuneo_server::server::run(&config).await?;
            }
            Command::Configure => configure()?,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

/// Only the file is edited here; environment overrides are not persisted.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let help = if config.has_openai_api_key() {
        "Leave empty to keep the current key"
    } else {
        "Chat requests fail until a key is set"
    };

    let api_key = Password::new("OpenAI API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message(help)
        .prompt()
        .context("Failed to read API key")?;

    if !api_key.trim().is_empty() {
        config.openai_api_key = api_key.trim().to_string();
    }

    let environment = Text::new("Environment:")
        .with_default(&config.environment)
        .prompt()
        .context("Failed to read environment")?;
    config.environment = environment;

    config.save()?;

    let path = Config::config_file_path()?;
    info!(path = %path.display(), "configuration saved");
    println!("Configuration saved to {}", path.display());

    Ok(())
}
