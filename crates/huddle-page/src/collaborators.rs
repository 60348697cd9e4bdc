//! Interfaces to the page host.
//!
//! The controller does not render, route or talk to the push service
//! itself. The host supplies implementations of these traits, bundled in
//! [`Collaborators`].

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use huddle_api::BoxFuture;
use huddle_core::{Activity, MeetingId, MeetingProfile, Role, Signature};

use crate::error::PageResult;

/// Stream of push-notification batches for one meeting.
pub type ActivityStream = mpsc::UnboundedReceiver<Vec<Activity>>;

/// Where the router sends the user when a page cannot be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The viewer is not allowed to see the meeting.
    AccessDenied,
    /// The meeting does not exist, or could not be loaded.
    NotFound,
}

impl Destination {
    /// Path of the error page.
    pub fn path(&self) -> &'static str {
        match self {
            Self::AccessDenied => "/accessdenied",
            Self::NotFound => "/notfound",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One entry of the page's left-hand navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub id: String,
    pub title: String,
    pub path: String,
}

/// Page slots the controller fills with widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetSlot {
    /// Header clip holding the meeting's navigation actions.
    Clip,
    /// Modal area used by the manage-access dialog.
    Modal,
}

/// A role offered by the manage-access dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleOption {
    pub role: Role,
    pub label: String,
}

/// Configuration handed to the manage-access widget.
#[derive(Debug, Clone, PartialEq)]
pub struct ManageAccessConfig {
    pub profile: Arc<MeetingProfile>,
    /// Dialog title; HTML-safe.
    pub title: String,
    pub roles: Vec<RoleOption>,
    pub default_role: Role,
    /// Visibility descriptions, in `public`, `loggedin`, `private` order; HTML-safe.
    pub visibility_descriptions: [String; 3],
}

/// A widget instance and its configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    /// The meeting clip, configured with the current profile.
    Clip(Arc<MeetingProfile>),
    /// The manage-access dialog.
    ManageAccess(ManageAccessConfig),
}

/// Renders the meeting summary and shows the page.
pub trait PageView: Send + Sync {
    /// Renders (or re-renders) the summary from `profile`.
    fn render_summary(&self, profile: &MeetingProfile);

    /// Makes the page visible once setup is complete.
    fn reveal(&self);
}

/// Registers the page's navigation.
pub trait Navigation: Send + Sync {
    fn register(&self, base_path: &str, entries: &[NavEntry]);
}

/// Inserts and removes widget instances.
pub trait WidgetHost: Send + Sync {
    /// Removes every widget in `slot`.
    fn clear(&self, slot: WidgetSlot);

    /// Adds a widget instance to `slot`.
    fn insert(&self, slot: WidgetSlot, widget: Widget);
}

/// Subscribes to a meeting's push notifications.
pub trait PushSubscriber: Send + Sync {
    fn subscribe<'a>(
        &'a self,
        topic: &'a MeetingId,
        signature: &'a Signature,
    ) -> BoxFuture<'a, PageResult<ActivityStream>>;
}

/// Navigates away from the page.
pub trait Router: Send + Sync {
    fn redirect(&self, destination: Destination);
}

/// Looks up localized strings.
pub trait Localizer: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

/// Everything the controller needs from its host.
#[derive(Clone)]
pub struct Collaborators {
    pub view: Arc<dyn PageView>,
    pub navigation: Arc<dyn Navigation>,
    pub widgets: Arc<dyn WidgetHost>,
    pub push: Arc<dyn PushSubscriber>,
    pub router: Arc<dyn Router>,
    pub i18n: Arc<dyn Localizer>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
