//! `huddle library ...`

use serde_json::Value;

use huddle_api::{MeetingClient, Transport};

use super::{done, to_json};
use crate::cli::LibraryAction;
use crate::error::ClientResult;

pub async fn run<T: Transport>(client: &MeetingClient<T>, action: LibraryAction) -> ClientResult<Value> {
    match action {
        LibraryAction::List {
            principal,
            start,
            limit,
        } => to_json(&client.get_library(&principal, start.as_deref(), limit).await?),
        LibraryAction::Remove { principal, meeting } => {
            client.delete_from_library(&principal, &meeting).await?;
            Ok(done("library-remove", &meeting))
        }
    }
}
