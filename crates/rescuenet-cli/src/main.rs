mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rescuenet_api::{DirectoryClient, GeoClient, TriageClient};
use rescuenet_core::{Dispatcher, FileBlobStore};

use crate::cli::{Cli, Command};
use crate::config::Endpoints;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a dispatcher
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        cmd => {
            let cfg = config::load_config(&cli.global)?;
            let dispatcher = build_dispatcher(&cli.global, &cfg)?;
            dispatcher.load()?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &dispatcher, &cfg, &cli.global).await
        }
    }
}

/// Assemble the dispatcher from resolved configuration: file-backed
/// persistence plus the directory and (optional) triage collaborators.
fn build_dispatcher(
    global: &cli::GlobalOpts,
    cfg: &config::Config,
) -> Result<Dispatcher, CliError> {
    let data_dir = config::data_dir(global);
    let blobs = FileBlobStore::new(&data_dir).map_err(CliError::from)?;

    let mut dispatcher =
        Dispatcher::new(cfg.settings.clone()).with_blob_store(Arc::new(blobs));

    let timeout = cfg.endpoints.timeout();
    if let Some(directory) = directory_client(&cfg.endpoints, timeout)? {
        dispatcher = dispatcher.with_directory(directory);
    }
    if let Some(triage) = triage_client(&cfg.endpoints, timeout)? {
        dispatcher = dispatcher.with_triage(triage);
    }

    Ok(dispatcher)
}

fn directory_client(
    endpoints: &Endpoints,
    timeout: Duration,
) -> Result<Option<DirectoryClient>, CliError> {
    let url = parse_endpoint("endpoints.directory", &endpoints.directory)?;
    let client = DirectoryClient::new(url, timeout).map_err(|e| CliError::ConnectionFailed {
        service: "directory".into(),
        url: endpoints.directory.clone(),
        source: e.into(),
    })?;
    Ok(Some(client))
}

fn triage_client(
    endpoints: &Endpoints,
    timeout: Duration,
) -> Result<Option<TriageClient>, CliError> {
    let Some(ref raw) = endpoints.triage else {
        return Ok(None);
    };
    let url = parse_endpoint("endpoints.triage", raw)?;
    let client = TriageClient::new(url, timeout).map_err(|e| CliError::ConnectionFailed {
        service: "triage".into(),
        url: raw.clone(),
        source: e.into(),
    })?;
    Ok(Some(client))
}

/// Build the geolocation client; used by `resources refresh` to update
/// the reference position before querying the directory.
pub(crate) fn geo_client(
    endpoints: &Endpoints,
    timeout: Duration,
) -> Result<GeoClient, CliError> {
    let url = parse_endpoint("endpoints.geolocation", &endpoints.geolocation)?;
    GeoClient::new(url, timeout).map_err(|e| CliError::ConnectionFailed {
        service: "geolocation".into(),
        url: endpoints.geolocation.clone(),
        source: e.into(),
    })
}

fn parse_endpoint(field: &str, raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("invalid URL: {raw}"),
    })
}
