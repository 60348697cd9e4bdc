//! Push-notification activities.

use serde::{Deserialize, Serialize};

use crate::profile::MeetingProfile;

/// Activity type emitted when a meeting's metadata changes.
pub const MEETING_UPDATE: &str = "meeting-update";

/// Activity type emitted when a meeting's visibility changes.
pub const MEETING_UPDATE_VISIBILITY: &str = "meeting-update-visibility";

/// Activity types that carry a fresh meeting profile as their object.
pub const PROFILE_REFRESH_ACTIVITIES: [&str; 2] = [MEETING_UPDATE, MEETING_UPDATE_VISIBILITY];

/// The principal that performed an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

/// One entry of a push-notification batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    pub activity_type: String,
    pub actor: Actor,
    /// Activity object; for meeting activities this is the meeting profile.
    #[serde(default)]
    pub object: serde_json::Value,
}

impl Activity {
    /// Returns true if this activity's type announces a profile change.
    pub fn is_profile_refresh(&self) -> bool {
        PROFILE_REFRESH_ACTIVITIES.contains(&self.activity_type.as_str())
    }

    /// Decodes the object as a meeting profile.
    pub fn profile(&self) -> Result<MeetingProfile, serde_json::Error> {
        MeetingProfile::deserialize(&self.object)
    }
}
