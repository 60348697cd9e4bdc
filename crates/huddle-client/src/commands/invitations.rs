//! `huddle invitations ...`

use serde_json::Value;

use huddle_api::{MeetingClient, Transport};

use super::{done, to_json};
use crate::cli::InvitationsAction;
use crate::error::ClientResult;

pub async fn run<T: Transport>(
    client: &MeetingClient<T>,
    action: InvitationsAction,
) -> ClientResult<Value> {
    match action {
        InvitationsAction::List { id } => to_json(&client.get_invitations(&id).await?),
        InvitationsAction::Resend { id, email } => {
            client.resend_invitation(&id, &email).await?;
            Ok(done("resend-invitation", &email))
        }
    }
}
