//! Binary crate for the `cuneo` server.
//!
//! This binary focuses on:
//! - Parsing CLI arguments
//! - Loading `.env` and logging setup
//! - Handing off to the server or the interactive configuration

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    dotenvy::dotenv().ok();
    cuneo_server::init_logging(cmd.log_level.as_deref());

    cmd.run().await
}
