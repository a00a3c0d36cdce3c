//! Programming tools: UUID generation

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::Write;
use toolbox_lib::{render_json, ApiClient, ApiOperation, Credentials, HttpSettings, TokenClient};

#[derive(Subcommand, Debug)]
pub enum ProgrammingCommands {
    /// Generates an UUID, with or without hyphens
    Uuid(UuidArgs),
}

#[derive(Args, Debug)]
pub struct UuidArgs {
    /// If set the UUID generated will not contain hyphens
    #[arg(long)]
    pub no_hyphens: bool,
}

pub async fn run(
    command: ProgrammingCommands,
    credentials: Credentials,
    settings: HttpSettings,
    out: &mut dyn Write,
) -> Result<()> {
    let op = match command {
        ProgrammingCommands::Uuid(args) => ApiOperation::uuid(args.no_hyphens),
    };
    call_and_print(&op, &credentials, &settings, out).await
}

/// Fetch a token, call `op` and print the indented JSON response.
async fn call_and_print(
    op: &ApiOperation,
    credentials: &Credentials,
    settings: &HttpSettings,
    out: &mut dyn Write,
) -> Result<()> {
    let http = toolbox_lib::http::build_client(settings)?;

    let token = TokenClient::new(http.clone())
        .fetch(credentials)
        .await
        .context("error getting the access token to call the API")?;

    let response = ApiClient::new(http, credentials.api_endpoint.as_str())
        .call(op, &token)
        .await
        .context("error calling the API")?;

    let rendered = render_json(&response)?;
    writeln!(out, "{rendered}").context("error writing to the output")?;

    Ok(())
}
