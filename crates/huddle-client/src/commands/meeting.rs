//! `huddle meeting ...`

use serde_json::Value;
use huddle_api::{CreateMeeting, MeetingClient, MeetingUpdate, Transport};

use super::{done, to_json};
use crate::cli::MeetingAction;
use crate::error::{ClientError, ClientResult};

pub async fn run<T: Transport>(client: &MeetingClient<T>, action: MeetingAction) -> ClientResult<Value> {
    match action {
        MeetingAction::Get { id } => to_json(&client.get_meeting(&id).await?),
        MeetingAction::Create {
            topic,
            description,
            record,
            all_moderators,
            wait_moderator,
            visibility,
            managers,
            members,
        } => {
            let mut meeting = CreateMeeting::new(topic)
                .with_record(record)
                .with_moderators(all_moderators, wait_moderator)
                .with_managers(managers)
                .with_members(members);
            if let Some(description) = description {
                meeting = meeting.with_description(description);
            }
            if let Some(visibility) = visibility {
                meeting = meeting.with_visibility(visibility);
            }
            to_json(&client.create_meeting(&meeting).await?)
        }
        MeetingAction::Update {
            id,
            topic,
            description,
            record,
            all_moderators,
            wait_moderator,
            visibility,
        } => {
            let update = MeetingUpdate {
                display_name: topic,
                description,
                record,
                all_moderators,
                wait_moderator,
                visibility,
            };
            if update.is_empty() {
                return Err(ClientError::Usage(
                    "nothing to update, pass at least one field".to_string(),
                ));
            }
            to_json(&client.update_meeting(&id, &update).await?)
        }
        MeetingAction::Start { id } => to_json(&client.start_meeting(&id).await?),
        MeetingAction::End { id } => {
            client.end_meeting(&id).await?;
            Ok(done("end", &id))
        }
        MeetingAction::Delete { id } => {
            client.delete_meeting(&id).await?;
            Ok(done("delete", &id))
        }
        MeetingAction::Info { id } => to_json(&client.get_meeting_info(&id).await?),
    }
}
