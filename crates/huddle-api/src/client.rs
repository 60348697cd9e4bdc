//! Typed client for the meeting and recording endpoints.
//!
//! Every operation follows the same contract:
//!
//! 1. Required arguments are checked first. A missing id, topic or empty
//!    collection yields [`ApiError::InvalidArgument`] and nothing is sent.
//! 2. Exactly one request goes to the [`Transport`].
//! 3. A 2xx answer is decoded into the operation's result type; any other
//!    status becomes [`ApiError::Http`] carrying the status and raw body.
//!
//! Nothing is retried.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use huddle_core::MeetingProfile;

use crate::error::{ApiError, ApiResult, STATUS_NOT_FOUND};
use crate::transport::{ApiRequest, ApiResponse, HttpConfig, HttpTransport, Transport};
use crate::types::{
    CreateMeeting, Invitation, InvitationList, JoinInfo, MeetingInfo, MeetingUpdate, Member,
    MembershipUpdate, Page, Recording,
};

/// Client for the meeting REST API.
#[derive(Debug, Clone)]
pub struct MeetingClient<T = HttpTransport> {
    transport: T,
}

impl MeetingClient<HttpTransport> {
    /// Creates a client talking HTTP to the configured API root.
    pub fn http(config: HttpConfig) -> ApiResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> MeetingClient<T> {
    /// Creates a client over an arbitrary transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Meetings
    // -----------------------------------------------------------------------

    /// Fetches a meeting profile.
    pub async fn get_meeting(&self, meeting_id: &str) -> ApiResult<MeetingProfile> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        let response = self.execute(ApiRequest::get(meeting_path(meeting_id, ""))).await?;
        decode(&response)
    }

    /// Creates a meeting. The topic (`display_name`) is required.
    pub async fn create_meeting(&self, meeting: &CreateMeeting) -> ApiResult<MeetingProfile> {
        require_text(&meeting.display_name, "a valid topic should be provided")?;
        let request = ApiRequest::post("/api/meeting/create").with_body(encode(meeting)?);
        let response = self.execute(request).await?;
        let profile: MeetingProfile = decode(&response)?;
        info!(meeting_id = %profile.id, "created meeting");
        Ok(profile)
    }

    /// Updates one or more fields of a meeting and returns the new profile.
    pub async fn update_meeting(
        &self,
        meeting_id: &str,
        update: &MeetingUpdate,
    ) -> ApiResult<MeetingProfile> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        if update.is_empty() {
            return Err(ApiError::invalid_argument(
                "at least one field should be provided for updating",
            ));
        }
        let request = ApiRequest::post(meeting_path(meeting_id, "")).with_body(encode(update)?);
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// Starts (or joins) a meeting and returns the conference URL.
    pub async fn start_meeting(&self, meeting_id: &str) -> ApiResult<JoinInfo> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        let response = self
            .execute(ApiRequest::get(meeting_path(meeting_id, "/join")))
            .await?;
        decode(&response)
    }

    /// Deletes a meeting.
    pub async fn delete_meeting(&self, meeting_id: &str) -> ApiResult<()> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        self.execute(ApiRequest::delete(meeting_path(meeting_id, "")))
            .await?;
        Ok(())
    }

    /// Ends a running meeting for every participant.
    pub async fn end_meeting(&self, meeting_id: &str) -> ApiResult<()> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        self.execute(ApiRequest::post(meeting_path(meeting_id, "/end")))
            .await?;
        Ok(())
    }

    /// Fetches conference-server details about a meeting.
    pub async fn get_meeting_info(&self, meeting_id: &str) -> ApiResult<MeetingInfo> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        let response = self
            .execute(ApiRequest::get(meeting_path(meeting_id, "/info")))
            .await?;
        decode(&response)
    }

    // -----------------------------------------------------------------------
    // Members and sharing
    // -----------------------------------------------------------------------

    /// Lists members of a meeting, one page at a time.
    ///
    /// Pass `None` as `start` for the first page and the previous page's
    /// `next_token` afterwards.
    pub async fn get_members(
        &self,
        meeting_id: &str,
        start: Option<&str>,
        limit: Option<u32>,
    ) -> ApiResult<Page<Member>> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        let request = paginate(ApiRequest::get(meeting_path(meeting_id, "/members")), start, limit)?;
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// Changes roles of, or removes, members of a meeting.
    pub async fn update_members(
        &self,
        meeting_id: &str,
        update: &MembershipUpdate,
    ) -> ApiResult<()> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        if update.is_empty() {
            return Err(ApiError::invalid_argument(
                "the updated members should be provided",
            ));
        }
        let request =
            ApiRequest::post(meeting_path(meeting_id, "/members")).with_body(encode(update)?);
        self.execute(request).await?;
        Ok(())
    }

    /// Shares a meeting with principals, who become members.
    pub async fn share_meeting(&self, meeting_id: &str, principals: &[String]) -> ApiResult<()> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        if principals.is_empty() {
            return Err(ApiError::invalid_argument(
                "a list of principals to share with should be provided",
            ));
        }
        let body = serde_json::json!({ "members": principals });
        let request = ApiRequest::post(meeting_path(meeting_id, "/share")).with_body(body);
        self.execute(request).await?;
        Ok(())
    }

    /// Lists the meetings in a principal's library, one page at a time.
    pub async fn get_library(
        &self,
        principal_id: &str,
        start: Option<&str>,
        limit: Option<u32>,
    ) -> ApiResult<Page<MeetingProfile>> {
        require_id(principal_id, "a valid principal id should be provided")?;
        let path = format!("/api/meeting/library/{}", segment(principal_id));
        let request = paginate(ApiRequest::get(path), start, limit)?;
        let response = self.execute(request).await?;
        decode(&response)
    }

    /// Removes a meeting from a principal's library.
    pub async fn delete_from_library(&self, principal_id: &str, meeting_id: &str) -> ApiResult<()> {
        require_id(principal_id, "a valid principal id should be provided")?;
        require_id(meeting_id, "a valid meeting id should be provided")?;
        let path = format!(
            "/api/meeting/library/{}/{}",
            segment(principal_id),
            segment(meeting_id)
        );
        self.execute(ApiRequest::delete(path)).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Invitations
    // -----------------------------------------------------------------------

    /// Lists pending email invitations for a meeting.
    pub async fn get_invitations(&self, meeting_id: &str) -> ApiResult<Vec<Invitation>> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        let response = self
            .execute(ApiRequest::get(meeting_path(meeting_id, "/invitations")))
            .await?;
        let list: InvitationList = decode(&response)?;
        Ok(list.results)
    }

    /// Sends an invitation email again.
    pub async fn resend_invitation(&self, meeting_id: &str, email: &str) -> ApiResult<()> {
        require_id(meeting_id, "a valid meeting id should be provided")?;
        require_text(email, "a valid email should be provided")?;
        let path = meeting_path(meeting_id, &format!("/invitations/{}/resend", segment(email)));
        self.execute(ApiRequest::post(path)).await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Recordings
    // -----------------------------------------------------------------------

    /// Fetches a recording. Returns `Ok(None)` if the server has none.
    pub async fn get_recording(&self, recording_id: &str) -> ApiResult<Option<Recording>> {
        require_id(recording_id, "a valid recording id should be provided")?;
        match self.execute(ApiRequest::get(recording_path(recording_id))).await {
            Ok(response) => decode(&response).map(Some),
            Err(err) if err.code() == Some(STATUS_NOT_FOUND) => {
                debug!(recording_id, "no recording available");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Publishes or unpublishes a recording.
    pub async fn update_recording(&self, recording_id: &str, publish: bool) -> ApiResult<()> {
        require_id(recording_id, "a valid recording id should be provided")?;
        let body = serde_json::json!({ "publish": publish });
        let request = ApiRequest::patch(recording_path(recording_id)).with_body(body);
        self.execute(request).await?;
        Ok(())
    }

    /// Deletes a recording.
    pub async fn delete_recording(&self, recording_id: &str) -> ApiResult<()> {
        require_id(recording_id, "a valid recording id should be provided")?;
        self.execute(ApiRequest::delete(recording_path(recording_id)))
            .await?;
        Ok(())
    }

    /// Sends one request and maps non-2xx answers to [`ApiError::Http`].
    async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let method = request.method.as_str();
        let path = request.path.clone();
        let response = self.transport.send(request).await?;

        if response.is_success() {
            debug!(method, path = %path, status = response.status, "request succeeded");
            Ok(response)
        } else {
            warn!(method, path = %path, status = response.status, "request failed");
            Err(ApiError::http(response.status, response.body))
        }
    }
}

fn require_id(value: &str, message: &str) -> ApiResult<()> {
    require_text(value, message)
}

fn require_text(value: &str, message: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        Err(ApiError::invalid_argument(message))
    } else {
        Ok(())
    }
}

fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

fn meeting_path(meeting_id: &str, suffix: &str) -> String {
    format!("/api/meeting/{}{}", segment(meeting_id), suffix)
}

fn recording_path(recording_id: &str) -> String {
    format!("/api/recording/{}", segment(recording_id))
}

fn paginate(request: ApiRequest, start: Option<&str>, limit: Option<u32>) -> ApiResult<ApiRequest> {
    let mut request = request;
    if let Some(start) = start {
        request = request.with_query("start", start);
    }
    if let Some(limit) = limit {
        if limit == 0 {
            return Err(ApiError::invalid_argument("a page limit should be at least 1"));
        }
        request = request.with_query("limit", limit.to_string());
    }
    Ok(request)
}

fn encode<S: Serialize>(value: &S) -> ApiResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<D: DeserializeOwned>(response: &ApiResponse) -> ApiResult<D> {
    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {}", e)))
}
