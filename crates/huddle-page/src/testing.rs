//! Recording host used by the controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use huddle_api::BoxFuture;
use huddle_core::{Activity, MeetingId, MeetingProfile, Signature};

use crate::collaborators::{
    ActivityStream, Collaborators, Destination, Localizer, NavEntry, Navigation, PageView,
    PushSubscriber, Router, Widget, WidgetHost, WidgetSlot,
};
use crate::error::{PageError, PageResult};

/// Host interactions, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RenderSummary(String),
    RegisterNavigation(String, Vec<NavEntry>),
    Clear(WidgetSlot),
    Insert(WidgetSlot),
    Reveal,
    Subscribe(String, Signature),
    Redirect(Destination),
}

#[derive(Default)]
pub struct RecordingHost {
    calls: Mutex<Vec<Call>>,
    slots: Mutex<HashMap<WidgetSlot, Vec<Widget>>>,
    push: Mutex<Option<mpsc::UnboundedSender<Vec<Activity>>>>,
    refuse_push: bool,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn refusing_push() -> Arc<Self> {
        Arc::new(Self {
            refuse_push: true,
            ..Self::default()
        })
    }

    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            view: self.clone(),
            navigation: self.clone(),
            widgets: self.clone(),
            push: self.clone(),
            router: self.clone(),
            i18n: self.clone(),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn widgets(&self, slot: WidgetSlot) -> Vec<Widget> {
        self.slots
            .lock()
            .unwrap()
            .get(&slot)
            .cloned()
            .unwrap_or_default()
    }

    /// Delivers a push batch to the subscribed controller.
    pub fn push(&self, batch: Vec<Activity>) -> bool {
        match self.push.lock().unwrap().as_ref() {
            Some(sender) => sender.send(batch).is_ok(),
            None => false,
        }
    }

    /// Closes the push stream.
    pub fn close_push(&self) {
        self.push.lock().unwrap().take();
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl PageView for RecordingHost {
    fn render_summary(&self, profile: &MeetingProfile) {
        self.record(Call::RenderSummary(profile.display_name.clone()));
    }

    fn reveal(&self) {
        self.record(Call::Reveal);
    }
}

impl Navigation for RecordingHost {
    fn register(&self, base_path: &str, entries: &[NavEntry]) {
        self.record(Call::RegisterNavigation(base_path.to_string(), entries.to_vec()));
    }
}

impl WidgetHost for RecordingHost {
    fn clear(&self, slot: WidgetSlot) {
        self.record(Call::Clear(slot));
        self.slots.lock().unwrap().remove(&slot);
    }

    fn insert(&self, slot: WidgetSlot, widget: Widget) {
        self.record(Call::Insert(slot));
        self.slots
            .lock()
            .unwrap()
            .entry(slot)
            .or_default()
            .push(widget);
    }
}

impl PushSubscriber for RecordingHost {
    fn subscribe<'a>(
        &'a self,
        topic: &'a MeetingId,
        signature: &'a Signature,
    ) -> BoxFuture<'a, PageResult<ActivityStream>> {
        self.record(Call::Subscribe(topic.to_string(), signature.clone()));
        let result = if self.refuse_push {
            Err(PageError::Push("signature rejected".to_string()))
        } else {
            let (tx, rx) = mpsc::unbounded_channel();
            *self.push.lock().unwrap() = Some(tx);
            Ok(rx)
        };
        Box::pin(async move { result })
    }
}

impl Router for RecordingHost {
    fn redirect(&self, destination: Destination) {
        self.record(Call::Redirect(destination));
    }
}

impl Localizer for RecordingHost {
    fn translate(&self, key: &str) -> String {
        match key {
            "MEETING_LOGGEDIN_DESCRIPTION" => "Visible to ${tenant}".to_string(),
            other => format!("[{}]", other),
        }
    }
}
