//! `huddle members ...`

use std::collections::HashSet;

use serde_json::{Value, json};
use tracing::{debug, warn};

use huddle_api::{MeetingClient, MembershipUpdate, Transport};

use super::{done, to_json};
use crate::cli::MembersAction;
use crate::error::ClientResult;

pub async fn run<T: Transport>(client: &MeetingClient<T>, action: MembersAction) -> ClientResult<Value> {
    match action {
        MembersAction::List {
            id,
            start,
            limit,
            all: false,
        } => to_json(&client.get_members(&id, start.as_deref(), limit).await?),
        MembersAction::List {
            id, limit, all: true, ..
        } => list_all(client, &id, limit).await,
        MembersAction::Set { id, changes } => {
            let update = changes
                .into_iter()
                .fold(MembershipUpdate::new(), |update, (principal, role)| match role {
                    Some(role) => update.set(principal, role),
                    None => update.remove(principal),
                });
            client.update_members(&id, &update).await?;
            Ok(done("members", &id))
        }
        MembersAction::Share { id, principals } => {
            client.share_meeting(&id, &principals).await?;
            Ok(done("share", &id))
        }
    }
}

/// Follows continuation tokens until the last page.
///
/// Stops early on an empty page or a token the server already handed out.
async fn list_all<T: Transport>(
    client: &MeetingClient<T>,
    id: &str,
    limit: Option<u32>,
) -> ClientResult<Value> {
    let mut results = Vec::new();
    let mut seen = HashSet::new();
    let mut token: Option<String> = None;
    loop {
        let page = client.get_members(id, token.as_deref(), limit).await?;
        debug!(meeting_id = %id, fetched = page.results.len(), "fetched member page");
        if page.results.is_empty() {
            break;
        }
        results.extend(page.results);
        match page.next_token {
            Some(next) if seen.insert(next.clone()) => token = Some(next),
            Some(next) => {
                warn!(meeting_id = %id, token = %next, "server repeated a continuation token");
                break;
            }
            None => break,
        }
    }
    Ok(json!({ "results": to_json(&results)? }))
}
