//! Request payloads and response bodies of the meeting endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use huddle_core::{PrincipalSummary, Role, Visibility};

/// Payload for creating a meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMeeting {
    /// Meeting topic; required.
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_moderators: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_moderator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub managers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl CreateMeeting {
    /// Creates a payload with the given topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            display_name: topic.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_record(mut self, record: bool) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_moderators(mut self, all_moderators: bool, wait_moderator: bool) -> Self {
        self.all_moderators = Some(all_moderators);
        self.wait_moderator = Some(wait_moderator);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn with_managers(mut self, managers: Vec<String>) -> Self {
        self.managers = managers;
        self
    }

    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }
}

/// Partial update of a meeting. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_moderators: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_moderator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl MeetingUpdate {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.description.is_none()
            && self.record.is_none()
            && self.all_moderators.is_none()
            && self.wait_moderator.is_none()
            && self.visibility.is_none()
    }
}

/// Role changes keyed by principal id.
///
/// `Some(role)` grants or changes a role; `None` removes the principal and
/// is sent as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipUpdate {
    changes: BTreeMap<String, Option<Role>>,
}

impl MembershipUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `role` to `principal`.
    pub fn set(mut self, principal: impl Into<String>, role: Role) -> Self {
        self.changes.insert(principal.into(), Some(role));
        self
    }

    /// Removes `principal` from the meeting.
    pub fn remove(mut self, principal: impl Into<String>) -> Self {
        self.changes.insert(principal.into(), None);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn get(&self, principal: &str) -> Option<Option<Role>> {
        self.changes.get(principal).copied()
    }
}

impl Serialize for MembershipUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.changes.len()))?;
        for (principal, role) in &self.changes {
            match role {
                Some(role) => map.serialize_entry(principal, role.as_str())?,
                None => map.serialize_entry(principal, &false)?,
            }
        }
        map.end()
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub results: Vec<T>,
    /// Continuation token for the next page; `None` on the last page.
    #[serde(default)]
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Returns true if more results are available.
    pub fn has_more(&self) -> bool {
        self.next_token.is_some()
    }
}

/// A principal's membership in a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub profile: PrincipalSummary,
    pub role: Role,
}

/// Where to send the user to join a started meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinInfo {
    pub url: String,
}

/// Conference-server details about a meeting (participants, running state).
///
/// The shape depends on the conferencing backend, so it is kept as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingInfo(pub serde_json::Value);

/// A recording of a meeting session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_id: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
}

/// An outstanding email invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub email: String,
    pub role: Role,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvitationList {
    #[serde(default)]
    pub results: Vec<Invitation>,
}
