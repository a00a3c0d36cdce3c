//! Configure command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use toolbox_lib::{ConfigStore, Credentials};

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// The client id to call the API
    #[arg(short = 'c', long)]
    pub client_id: String,

    /// The client secret to call the API
    #[arg(short = 's', long)]
    pub client_secret: String,

    /// The API endpoint
    #[arg(short = 'a', long)]
    pub api_endpoint: String,

    /// The endpoint to get authentication tokens
    #[arg(short = 't', long)]
    pub token_endpoint: String,
}

impl From<ConfigureArgs> for Credentials {
    fn from(args: ConfigureArgs) -> Self {
        Credentials {
            client_id: args.client_id,
            client_secret: args.client_secret,
            api_endpoint: args.api_endpoint,
            token_endpoint: args.token_endpoint,
        }
    }
}

pub fn run(store: &mut ConfigStore, args: ConfigureArgs, out: &mut dyn Write) -> Result<()> {
    let credentials = Credentials::from(args);
    store.set_credentials(&credentials);
    store
        .write()
        .with_context(|| format!("error writing configuration to {}", store.path().display()))?;

    tracing::info!(path = %store.path().display(), "configuration saved");
    writeln!(out, "Configuration saved to {}", store.path().display())
        .context("error writing to the output")?;

    Ok(())
}
