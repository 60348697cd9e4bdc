//! Meeting page controller.
//!
//! - [`PageController`] - loads a meeting from the page location and keeps
//!   the page in sync with edits and push notifications
//! - [`SessionContext`] - the current meeting profile, replaced wholesale
//! - [`EventBus`] - typed publish/subscribe channel between widgets
//! - [`Collaborators`] - host interfaces (rendering, navigation, widgets,
//!   push, routing, i18n)
//!
//! # Example
//!
//! ```ignore
//! let mut page = PageController::new(client, host.collaborators(), EventBus::default(), viewer_id);
//! if let LoadOutcome::Loaded(_) = page.load("/meeting/cam/abc123").await {
//!     page.run(shutdown).await;
//! }
//! ```

pub mod bus;
pub mod collaborators;
pub mod context;
pub mod controller;
pub mod error;

#[cfg(test)]
mod testing;

pub use bus::{EventBus, PageEvent, Recipient, Subscription};
pub use collaborators::{
    ActivityStream, Collaborators, Destination, Localizer, ManageAccessConfig, NavEntry,
    Navigation, PageView, PushSubscriber, RoleOption, Router, Widget, WidgetHost, WidgetSlot,
};
pub use context::SessionContext;
pub use controller::{LoadOutcome, PageController, PageState, refresh_candidate};
pub use error::{PageError, PageResult};
