//! Resource identifiers.
//!
//! Meetings are addressed as `d:<tenant>:<resource>`. Principals (users and
//! groups) use the same three-part scheme with their own prefix, but the
//! client treats them as opaque strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resource-type prefix used by meeting identifiers.
pub const MEETING_PREFIX: &str = "d";

/// Errors produced while parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The identifier does not have three `:`-separated parts.
    #[error("malformed meeting id `{0}`: expected d:<tenant>:<resource>")]
    Malformed(String),

    /// The identifier has the wrong resource prefix.
    #[error("meeting id `{id}` has prefix `{prefix}`, expected `{MEETING_PREFIX}`")]
    WrongPrefix { id: String, prefix: String },
}

/// Identifier of a meeting, `d:<tenant>:<resource>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MeetingId {
    tenant: String,
    resource: String,
}

impl MeetingId {
    /// Builds an id from its tenant alias and resource part.
    ///
    /// Returns `None` if either part is empty or contains `:`.
    pub fn new(tenant: impl Into<String>, resource: impl Into<String>) -> Option<Self> {
        let tenant = tenant.into();
        let resource = resource.into();
        if !valid_part(&tenant) || !valid_part(&resource) {
            return None;
        }
        Some(Self { tenant, resource })
    }

    /// Tenant alias.
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Resource part.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Canonical page path for this meeting, `/meeting/<tenant>/<resource>`.
    pub fn base_path(&self) -> String {
        format!("/meeting/{}/{}", self.tenant, self.resource)
    }
}

fn valid_part(part: &str) -> bool {
    !part.is_empty() && !part.contains(':')
}

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", MEETING_PREFIX, self.tenant, self.resource)
    }
}

impl FromStr for MeetingId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(prefix), Some(tenant), Some(resource)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(IdError::Malformed(s.to_string()));
        };

        if prefix != MEETING_PREFIX {
            return Err(IdError::WrongPrefix {
                id: s.to_string(),
                prefix: prefix.to_string(),
            });
        }

        Self::new(tenant, resource).ok_or_else(|| IdError::Malformed(s.to_string()))
    }
}

impl TryFrom<String> for MeetingId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MeetingId> for String {
    fn from(id: MeetingId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let id: MeetingId = "d:cam:abc123".parse().unwrap();
        assert_eq!(id.tenant(), "cam");
        assert_eq!(id.resource(), "abc123");
        assert_eq!(id.to_string(), "d:cam:abc123");
        assert_eq!(id.base_path(), "/meeting/cam/abc123");
    }

    #[test]
    fn rejects_other_prefixes() {
        let err = "u:cam:alice".parse::<MeetingId>().unwrap_err();
        assert!(matches!(err, IdError::WrongPrefix { ref prefix, .. } if prefix == "u"));
    }

    #[test]
    fn rejects_malformed() {
        assert!("d:cam".parse::<MeetingId>().is_err());
        assert!("d::abc".parse::<MeetingId>().is_err());
        assert!("d:cam:".parse::<MeetingId>().is_err());
        assert!("d:cam:a:b".parse::<MeetingId>().is_err());
    }

    #[test]
    fn serde_uses_string_form() {
        let id = MeetingId::new("cam", "xyz").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"d:cam:xyz\"");

        let back: MeetingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<MeetingId>("\"nope\"").is_err());
    }
}
