//! Meeting profile and the small value types hanging off it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::MeetingId;

/// Who may see a meeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Anyone, including anonymous users.
    #[default]
    Public,
    /// Members of the hosting tenant.
    LoggedIn,
    /// Explicit members only.
    Private,
}

impl Visibility {
    /// Wire name of the visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::LoggedIn => "loggedin",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "loggedin" => Ok(Self::LoggedIn),
            "private" => Ok(Self::Private),
            other => Err(format!(
                "unknown visibility `{}` (expected public, loggedin or private)",
                other
            )),
        }
    }
}

/// Role a principal holds on a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Member,
}

impl Role {
    /// Every role, in the order they are offered to users.
    pub const ALL: [Role; 2] = [Role::Manager, Role::Member];

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            other => Err(format!("unknown role `{}` (expected manager or member)", other)),
        }
    }
}

/// Tenant hosting a meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub alias: String,
    #[serde(default)]
    pub display_name: String,
}

/// Opaque push-subscription authorization issued by the server.
///
/// The client never looks inside; it is handed back verbatim when
/// subscribing to a meeting's activity stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(pub serde_json::Value);

impl Signature {
    /// Returns true if the server did not issue a signature.
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }
}

/// A meeting as seen by the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingProfile {
    pub id: MeetingId,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub visibility: Visibility,
    /// Whether sessions of this meeting are recorded.
    #[serde(default)]
    pub record: bool,
    /// Every participant joins as moderator.
    #[serde(default)]
    pub all_moderators: bool,
    /// Participants wait until a moderator has joined.
    #[serde(default)]
    pub wait_moderator: bool,
    pub tenant: Tenant,
    #[serde(default)]
    pub can_share: bool,
    #[serde(default)]
    pub can_post: bool,
    #[serde(default)]
    pub is_manager: bool,
    #[serde(default, skip_serializing_if = "Signature::is_empty")]
    pub signature: Signature,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default = "default_resource_type")]
    pub resource_type: String,
}

fn default_resource_type() -> String {
    "meeting".to_string()
}

impl MeetingProfile {
    /// Creates a minimal profile; mostly useful for tests and fixtures.
    pub fn new(id: MeetingId, display_name: impl Into<String>) -> Self {
        let tenant = Tenant {
            alias: id.tenant().to_string(),
            display_name: String::new(),
        };
        Self {
            id,
            display_name: display_name.into(),
            description: String::new(),
            visibility: Visibility::default(),
            record: false,
            all_moderators: false,
            wait_moderator: false,
            tenant,
            can_share: false,
            can_post: false,
            is_manager: false,
            signature: Signature::default(),
            profile_path: None,
            last_modified: None,
            resource_type: default_resource_type(),
        }
    }

    /// Builder: set visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Builder: mark the viewer as a manager (implies share and post).
    pub fn with_manager(mut self, is_manager: bool) -> Self {
        self.is_manager = is_manager;
        self.can_share = self.can_share || is_manager;
        self.can_post = self.can_post || is_manager;
        self
    }

    /// Builder: set the push signature.
    pub fn with_signature(mut self, signature: serde_json::Value) -> Self {
        self.signature = Signature(signature);
        self
    }
}

/// Condensed view of a user or group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalSummary {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}
