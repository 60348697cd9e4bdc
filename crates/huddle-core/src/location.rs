//! Page location parsing.
//!
//! Meeting pages live under `/meeting/<tenant>/<resource>`, optionally
//! followed by a sub-page (`/meeting/cam/abc/members`).

use std::sync::LazyLock;

use regex::Regex;

use crate::id::MeetingId;

static MEETING_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/meeting/([^/:?#]+)/([^/:?#]+)(/[^?#]*)?(?:[?#].*)?$").expect("valid regex")
});

/// A meeting resolved from the current page location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingLocation {
    /// Meeting identifier, `d:<tenant>:<resource>`.
    pub id: MeetingId,
    /// Canonical base path, `/meeting/<tenant>/<resource>`.
    pub base_path: String,
    /// Trailing sub-page, without the leading slash. Empty for the summary.
    pub sub_page: String,
}

impl MeetingLocation {
    /// Parses a location path. Returns `None` if it is not a meeting page.
    pub fn parse(path: &str) -> Option<Self> {
        let caps = MEETING_PATH.captures(path)?;
        let id = MeetingId::new(&caps[1], &caps[2])?;
        let sub_page = caps
            .get(3)
            .map(|m| m.as_str().trim_matches('/').to_string())
            .unwrap_or_default();

        Some(Self {
            base_path: id.base_path(),
            id,
            sub_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_summary_page() {
        let loc = MeetingLocation::parse("/meeting/cam/abc123").unwrap();
        assert_eq!(loc.id.to_string(), "d:cam:abc123");
        assert_eq!(loc.base_path, "/meeting/cam/abc123");
        assert_eq!(loc.sub_page, "");
    }

    #[test]
    fn parses_sub_page_and_ignores_query() {
        let loc = MeetingLocation::parse("/meeting/cam/abc123/members/?tab=all").unwrap();
        assert_eq!(loc.id.to_string(), "d:cam:abc123");
        assert_eq!(loc.sub_page, "members");

        let loc = MeetingLocation::parse("/meeting/cam/abc123#top").unwrap();
        assert_eq!(loc.sub_page, "");
    }

    #[test]
    fn rejects_other_pages() {
        assert!(MeetingLocation::parse("/content/cam/abc123").is_none());
        assert!(MeetingLocation::parse("/meeting/cam").is_none());
        assert!(MeetingLocation::parse("/meeting//abc").is_none());
        assert!(MeetingLocation::parse("meeting/cam/abc").is_none());
    }
}
