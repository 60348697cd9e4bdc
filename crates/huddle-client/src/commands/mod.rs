//! Subcommand implementations.
//!
//! API commands return the JSON document to print, so they can be run
//! against a [`huddle_api::MockTransport`] in tests.

pub mod config;
pub mod invitations;
pub mod library;
pub mod meeting;
pub mod members;
pub mod recording;

use serde::Serialize;
use serde_json::Value;

use huddle_api::{MeetingClient, Transport};

use crate::cli::ApiCommand;
use crate::error::{ClientError, ClientResult};

/// Runs an API command and returns the document to print.
pub async fn run<T: Transport>(client: &MeetingClient<T>, command: ApiCommand) -> ClientResult<Value> {
    match command {
        ApiCommand::Meeting { action } => meeting::run(client, action).await,
        ApiCommand::Members { action } => members::run(client, action).await,
        ApiCommand::Library { action } => library::run(client, action).await,
        ApiCommand::Recording { action } => recording::run(client, action).await,
        ApiCommand::Invitations { action } => invitations::run(client, action).await,
    }
}

/// Converts an API result into the document printed on stdout.
pub(crate) fn to_json<T: Serialize>(value: &T) -> ClientResult<Value> {
    serde_json::to_value(value).map_err(|e| ClientError::Output(e.to_string()))
}

/// Document printed for operations that return nothing.
pub(crate) fn done(operation: &str, id: &str) -> Value {
    serde_json::json!({ "ok": true, "operation": operation, "id": id })
}

/// Renders a document for the terminal.
pub fn render(document: &Value) -> ClientResult<String> {
    serde_json::to_string_pretty(document).map_err(|e| ClientError::Output(e.to_string()))
}
