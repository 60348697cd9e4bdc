//! Typed publish/subscribe channel between page widgets.
//!
//! Widgets never hold references to each other. They publish [`PageEvent`]s
//! on the [`EventBus`] and read them back through a [`Subscription`].
//! Subscriptions are either unscoped or scoped to a widget name; a context
//! reply addressed to widget `W` is only delivered to subscriptions scoped
//! to `W`.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{trace, warn};

use huddle_core::MeetingProfile;

/// Default number of events buffered per subscriber.
pub const DEFAULT_CAPACITY: usize = 64;

/// Who a context reply is meant for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// Every listener.
    All,
    /// Only listeners scoped to this widget.
    Widget(String),
}

impl Recipient {
    /// Directed if a widget name is given, broadcast otherwise.
    pub fn from_requester(widget: Option<&str>) -> Self {
        match widget {
            Some(name) => Self::Widget(name.to_string()),
            None => Self::All,
        }
    }
}

/// Events exchanged on a meeting page.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// A widget asks for the current meeting. `requester` names the widget
    /// when the reply should be directed at it alone.
    ContextRequest { requester: Option<String> },

    /// The current meeting, in reply to a request or broadcast after load.
    Context {
        recipient: Recipient,
        profile: Arc<MeetingProfile>,
    },

    /// The user asked to manage access to the meeting.
    ManageAccessTrigger,

    /// The manage-access widget applied its changes.
    ManageAccessDone,

    /// An edit widget saved the meeting; carries the full new profile.
    EditDone(Arc<MeetingProfile>),
}

impl PageEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ContextRequest { .. } => "context-request",
            Self::Context { .. } => "context",
            Self::ManageAccessTrigger => "manage-access-trigger",
            Self::ManageAccessDone => "manage-access-done",
            Self::EditDone(_) => "edit-done",
        }
    }
}

/// Broadcast bus for [`PageEvent`]s. Clones publish to the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PageEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event. Returns the number of subscriptions it reached.
    pub fn publish(&self, event: PageEvent) -> usize {
        let kind = event.kind();
        match self.sender.send(event) {
            Ok(receivers) => {
                trace!(kind, receivers, "published page event");
                receivers
            }
            Err(_) => {
                trace!(kind, "published page event with no listeners");
                0
            }
        }
    }

    /// Subscribes without a widget scope.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            scope: None,
        }
    }

    /// Subscribes on behalf of a named widget.
    pub fn subscribe_as(&self, widget: impl Into<String>) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            scope: Some(widget.into()),
        }
    }
}

/// Receiving end of the bus. Only sees events published after it was created.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<PageEvent>,
    scope: Option<String>,
}

impl Subscription {
    /// Widget this subscription is scoped to.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Waits for the next visible event. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<PageEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.is_visible(&event) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, scope = ?self.scope, "page event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next visible event already queued, without waiting.
    pub fn try_recv(&mut self) -> Option<PageEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.is_visible(&event) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, scope = ?self.scope, "page event subscriber lagged");
                }
                Err(_) => return None,
            }
        }
    }

    fn is_visible(&self, event: &PageEvent) -> bool {
        match event {
            PageEvent::Context {
                recipient: Recipient::Widget(name),
                ..
            } => self.scope.as_deref() == Some(name.as_str()),
            _ => true,
        }
    }
}
