//! Toolbox CLI
//!
//! Command-line client for the toolbox API. Stores the client credentials
//! with `configure` and proxies operations such as UUID generation to the
//! API, authenticating each call with a fresh OAuth2 access token.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use toolbox_lib::config::default_config_path;
use toolbox_lib::{with_config_check, ConfigStore, HttpSettings};

#[derive(Parser)]
#[command(name = "toolbox")]
#[command(author, version, about = "CLI for the toolbox API", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.toolbox.yaml)
    #[arg(long, global = true, env = "TOOLBOX_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP timeout in seconds for each request
    #[arg(long, global = true, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configures the CLI with the API endpoints and client credentials
    Configure(commands::configure::ConfigureArgs),
    /// Programming tools like UUID generation
    Programming {
        #[command(subcommand)]
        command: commands::programming::ProgrammingCommands,
    },
}

impl Commands {
    /// Whether the command calls the API and therefore needs credentials.
    fn requires_config(&self) -> bool {
        match self {
            Commands::Configure(_) => false,
            Commands::Programming { .. } => true,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    run(cli, &mut stdout).await
}

async fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let path = match cli.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut store = ConfigStore::open(&path)
        .with_context(|| format!("failed to open configuration at {}", path.display()))?;

    let settings = HttpSettings {
        timeout: Duration::from_secs(cli.timeout),
    };

    tracing::debug!(
        config = %store.path().display(),
        requires_config = cli.command.requires_config(),
        "dispatching command"
    );

    match cli.command {
        Commands::Configure(args) => commands::configure::run(&mut store, args, out),
        Commands::Programming { command } => {
            with_config_check(&store, move |credentials| {
                commands::programming::run(command, credentials, settings, out)
            })
            .await
        }
    }
}
