//! huddle CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use huddle_api::MeetingClient;
use huddle_core::init_tracing;

use huddle_client::cli::{Cli, Command, ConfigAction};
use huddle_client::commands;
use huddle_client::config::ClientConfig;
use huddle_client::error::{ClientError, ClientResult};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let mut config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };

    if let Err(e) = init_tracing(config.tracing(cli.debug)) {
        eprintln!("warning: {}", e);
    }

    if let Some(root) = cli.api_root {
        config.api.root = Some(root);
    }
    if let Some(timeout) = cli.timeout {
        config.api.timeout = timeout;
    }

    match cli.command {
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
        Command::Api(command) => {
            let http = config.api.to_http_config().map_err(ClientError::Config)?;
            debug!(root = %http.root, "using meeting API");
            let client = MeetingClient::http(http)?;
            let document = commands::run(&client, command).await?;
            println!("{}", commands::render(&document)?);
            Ok(())
        }
    }
}
