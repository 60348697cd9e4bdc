//! Core types: meeting ids, profiles, activities, page locations
//!
//! Shared by the REST client (`huddle-api`) and the page controller
//! (`huddle-page`).

pub mod activity;
pub mod escape;
pub mod id;
pub mod location;
pub mod profile;
pub mod tracing;

pub use activity::{Activity, Actor, PROFILE_REFRESH_ACTIVITIES};
pub use escape::html_escape;
pub use id::{IdError, MeetingId};
pub use location::MeetingLocation;
pub use profile::{MeetingProfile, PrincipalSummary, Role, Signature, Tenant, Visibility};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
