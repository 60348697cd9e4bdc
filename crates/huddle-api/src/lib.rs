//! REST client for the meeting endpoints.
//!
//! - [`MeetingClient`] - typed operations on meetings, members, libraries,
//!   invitations and recordings
//! - [`Transport`] - the seam between the client and the network, with
//!   [`HttpTransport`] (reqwest) and [`MockTransport`] (in-memory)
//! - [`ApiError`] - uniform error model
//!
//! # Example
//!
//! ```ignore
//! use huddle_api::{HttpConfig, MeetingClient};
//!
//! let client = MeetingClient::http(HttpConfig::new("https://cam.example.org".parse()?))?;
//! let profile = client.get_meeting("d:cam:abc123").await?;
//! ```

pub mod client;
pub mod error;
pub mod mock;
pub mod transport;
pub mod types;

pub use client::MeetingClient;
pub use error::{ApiError, ApiResult};
pub use mock::MockTransport;
pub use transport::{
    ApiRequest, ApiResponse, BoxFuture, HttpConfig, HttpMethod, HttpTransport, Transport,
};
pub use types::{
    CreateMeeting, Invitation, JoinInfo, MeetingInfo, MeetingUpdate, Member, MembershipUpdate,
    Page, Recording,
};
