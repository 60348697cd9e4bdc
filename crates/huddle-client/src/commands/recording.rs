//! `huddle recording ...`

use serde_json::Value;

use huddle_api::{MeetingClient, Transport};

use super::{done, to_json};
use crate::cli::RecordingAction;
use crate::error::ClientResult;

pub async fn run<T: Transport>(client: &MeetingClient<T>, action: RecordingAction) -> ClientResult<Value> {
    match action {
        // A missing recording prints `null` rather than failing.
        RecordingAction::Get { id } => to_json(&client.get_recording(&id).await?),
        RecordingAction::Publish { id } => {
            client.update_recording(&id, true).await?;
            Ok(done("publish", &id))
        }
        RecordingAction::Unpublish { id } => {
            client.update_recording(&id, false).await?;
            Ok(done("unpublish", &id))
        }
        RecordingAction::Delete { id } => {
            client.delete_recording(&id).await?;
            Ok(done("delete", &id))
        }
    }
}
