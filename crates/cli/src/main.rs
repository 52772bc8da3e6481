//! b2sh - interactive shell for B2 object storage
//!
//! Presents a flat, prefix-delimited object store as a hierarchical
//! filesystem: `cd`/`ls` to navigate, `get`/`put` for resumable transfers.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use b2sh::output::TermConsole;
use b2sh::shell::Shell;
use bsh_b2::B2Client;

/// Interactive shell for B2 object storage
#[derive(Parser, Debug)]
#[command(name = "b2sh", version, about, long_about = None)]
struct Cli {
    /// The account ID or application key ID to authorise with
    #[arg(long, env = "B2SH_ACCOUNT_ID")]
    account: String,

    /// The application key to authorise with
    #[arg(long, env = "B2SH_APPLICATION_KEY")]
    key: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let local_dir = std::env::current_dir()?;

    let store = Arc::new(B2Client::new());
    let console = Arc::new(TermConsole::new());

    let mut shell = Shell::new(store, console, local_dir);
    shell.login(cli.account, cli.key).await;
    shell.run().await;

    Ok(())
}
