//! Meeting page controller.
//!
//! Lifecycle:
//!
//! ```text
//!   AwaitingInitialLoad ──load()──► Loaded ──run()──► (events until shutdown)
//!          │
//!          └── fetch failed ──► redirect (401 → access denied, else not found)
//! ```
//!
//! After a successful load the controller answers context requests,
//! opens the manage-access dialog, and refreshes the page whenever a newer
//! profile arrives from an edit widget, from a push notification, or from a
//! re-fetch after access changes.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use huddle_api::{MeetingClient, Transport};
use huddle_core::{Activity, MeetingLocation, MeetingProfile, Role, Visibility, html_escape};

use crate::bus::{EventBus, PageEvent, Recipient, Subscription};
use crate::collaborators::{
    ActivityStream, Collaborators, Destination, Localizer, ManageAccessConfig, NavEntry, RoleOption,
    Widget, WidgetSlot,
};
use crate::context::SessionContext;
use crate::error::{PageError, PageResult};

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    AwaitingInitialLoad,
    Loaded,
}

/// Result of [`PageController::load`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The profile was fetched and the page set up.
    Loaded(Arc<MeetingProfile>),
    /// The page could not be shown; the router was sent here.
    Redirected(Destination),
}

/// Drives one meeting page for one viewer.
pub struct PageController<T: Transport> {
    client: MeetingClient<T>,
    collaborators: Collaborators,
    bus: EventBus,
    session: SessionContext,
    viewer_id: String,
    location: Option<MeetingLocation>,
    inbox: Option<Subscription>,
    activities: Option<ActivityStream>,
}

impl<T: Transport> PageController<T> {
    /// Creates a controller for the viewer `viewer_id`.
    pub fn new(
        client: MeetingClient<T>,
        collaborators: Collaborators,
        bus: EventBus,
        viewer_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            collaborators,
            bus,
            session: SessionContext::new(),
            viewer_id: viewer_id.into(),
            location: None,
            inbox: None,
            activities: None,
        }
    }

    pub fn state(&self) -> PageState {
        if self.session.is_loaded() {
            PageState::Loaded
        } else {
            PageState::AwaitingInitialLoad
        }
    }

    /// The session context holding the current profile.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// The resolved page location, once [`load`](Self::load) has parsed it.
    pub fn location(&self) -> Option<&MeetingLocation> {
        self.location.as_ref()
    }

    /// Resolves the meeting from `path`, fetches it and sets up the page.
    ///
    /// Setup runs in a fixed order: render summary, register navigation,
    /// register the context responder (which broadcasts once), reveal the
    /// page, subscribe to push notifications. A failed fetch redirects and
    /// leaves the controller awaiting its initial load.
    pub async fn load(&mut self, path: &str) -> LoadOutcome {
        let Some(location) = MeetingLocation::parse(path) else {
            warn!(path, "location is not a meeting page");
            return self.redirect(Destination::NotFound);
        };
        let meeting_id = location.id.to_string();
        self.location = Some(location);

        let profile = match self.client.get_meeting(&meeting_id).await {
            Ok(profile) => self.session.replace(profile),
            Err(err) => {
                let destination = if err.is_unauthorized() {
                    Destination::AccessDenied
                } else {
                    Destination::NotFound
                };
                warn!(meeting_id = %meeting_id, error = %err, "failed to load meeting");
                return self.redirect(destination);
            }
        };
        info!(meeting_id = %meeting_id, "meeting loaded");

        self.collaborators.view.render_summary(&profile);
        self.setup_navigation(&profile);
        self.setup_context_responder(&profile);
        self.collaborators.view.reveal();
        self.setup_push(&profile).await;

        LoadOutcome::Loaded(profile)
    }

    fn redirect(&self, destination: Destination) -> LoadOutcome {
        self.collaborators.router.redirect(destination);
        LoadOutcome::Redirected(destination)
    }

    fn setup_navigation(&self, profile: &Arc<MeetingProfile>) {
        let base_path = self
            .location
            .as_ref()
            .map(|l| l.base_path.clone())
            .unwrap_or_else(|| profile.id.base_path());

        let entries = vec![NavEntry {
            id: "summary".to_string(),
            title: self.collaborators.i18n.translate("SUMMARY"),
            path: base_path.clone(),
        }];
        self.collaborators.navigation.register(&base_path, &entries);
        self.collaborators
            .widgets
            .insert(WidgetSlot::Clip, Widget::Clip(Arc::clone(profile)));
    }

    fn setup_context_responder(&mut self, profile: &Arc<MeetingProfile>) {
        self.inbox = Some(self.bus.subscribe());
        self.bus.publish(PageEvent::Context {
            recipient: Recipient::All,
            profile: Arc::clone(profile),
        });
    }

    async fn setup_push(&mut self, profile: &Arc<MeetingProfile>) {
        match self
            .collaborators
            .push
            .subscribe(&profile.id, &profile.signature)
            .await
        {
            Ok(stream) => {
                debug!(meeting_id = %profile.id, "subscribed to push notifications");
                self.activities = Some(stream);
            }
            Err(err) => {
                warn!(meeting_id = %profile.id, error = %err, "push subscription failed");
            }
        }
    }

    /// Reacts to one bus event. Returns true if the page was refreshed.
    pub async fn handle(&mut self, event: PageEvent) -> bool {
        if self.state() == PageState::AwaitingInitialLoad {
            debug!(kind = event.kind(), "ignoring event before initial load");
            return false;
        }

        match event {
            PageEvent::ContextRequest { requester } => {
                self.reply_context(Recipient::from_requester(requester.as_deref()));
                false
            }
            PageEvent::Context { .. } => false,
            PageEvent::ManageAccessTrigger => {
                if let Err(err) = self.open_manage_access() {
                    warn!(error = %err, "cannot open manage access");
                }
                false
            }
            PageEvent::ManageAccessDone => self.reload().await,
            PageEvent::EditDone(profile) => {
                self.refresh(profile);
                true
            }
        }
    }

    /// Reacts to a push batch. Returns true if the page was refreshed.
    pub fn handle_activities(&mut self, batch: &[Activity]) -> bool {
        if self.state() == PageState::AwaitingInitialLoad {
            debug!("ignoring activities before initial load");
            return false;
        }
        match refresh_candidate(batch, &self.viewer_id) {
            Some(profile) => {
                self.refresh(Arc::new(profile));
                true
            }
            None => false,
        }
    }

    fn reply_context(&self, recipient: Recipient) {
        if let Some(profile) = self.session.current() {
            self.bus.publish(PageEvent::Context { recipient, profile });
        }
    }

    fn open_manage_access(&self) -> PageResult<()> {
        let profile = self.session.current().ok_or(PageError::NotLoaded)?;
        if !profile.is_manager {
            debug!(meeting_id = %profile.id, "viewer cannot manage access");
            return Ok(());
        }
        let config = manage_access_config(profile, self.collaborators.i18n.as_ref());
        self.collaborators.widgets.clear(WidgetSlot::Modal);
        self.collaborators
            .widgets
            .insert(WidgetSlot::Modal, Widget::ManageAccess(config));
        Ok(())
    }

    /// Re-fetches the profile after access changes.
    async fn reload(&mut self) -> bool {
        let Some(current) = self.session.current() else {
            return false;
        };
        let meeting_id = current.id.to_string();
        match self.client.get_meeting(&meeting_id).await {
            Ok(profile) => {
                self.refresh(Arc::new(profile));
                true
            }
            Err(err) => {
                warn!(meeting_id = %meeting_id, error = %err, "failed to reload meeting");
                false
            }
        }
    }

    /// Replaces the profile and re-renders everything that depends on it.
    fn refresh(&self, profile: Arc<MeetingProfile>) {
        let profile = self.session.replace(profile);
        debug!(meeting_id = %profile.id, "refreshing meeting page");

        self.collaborators.view.render_summary(&profile);
        self.collaborators.widgets.clear(WidgetSlot::Clip);
        self.collaborators
            .widgets
            .insert(WidgetSlot::Clip, Widget::Clip(profile));
    }

    /// Processes bus events and push notifications until `shutdown` resolves
    /// or the bus closes. Does nothing if the page never loaded.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let Some(mut inbox) = self.inbox.take() else {
            warn!("page controller not loaded; nothing to run");
            return;
        };
        let mut activities = self.activities.take();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("page controller shutting down");
                    break;
                }
                event = inbox.recv() => match event {
                    Some(event) => {
                        self.handle(event).await;
                    }
                    None => break,
                },
                batch = next_batch(&mut activities) => match batch {
                    Some(batch) => {
                        self.handle_activities(&batch);
                    }
                    None => {
                        debug!("push notification stream closed");
                        activities = None;
                    }
                },
            }
        }
    }
}

async fn next_batch(stream: &mut Option<ActivityStream>) -> Option<Vec<Activity>> {
    match stream {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Picks the profile a push batch should refresh the page with.
///
/// Only the first activity counts. It must come from someone other than the
/// viewer and announce a profile change. Repeated deliveries of the same
/// activity are not deduplicated.
pub fn refresh_candidate(batch: &[Activity], viewer_id: &str) -> Option<MeetingProfile> {
    let activity = batch.first()?;
    if activity.actor.id == viewer_id {
        return None;
    }
    if !activity.is_profile_refresh() {
        return None;
    }
    match activity.profile() {
        Ok(profile) => Some(profile),
        Err(err) => {
            warn!(activity_id = %activity.id, error = %err, "activity object is not a meeting profile");
            None
        }
    }
}

/// Builds the manage-access dialog configuration for `profile`.
fn manage_access_config(profile: Arc<MeetingProfile>, i18n: &dyn Localizer) -> ManageAccessConfig {
    let title = format!(
        "{}: {}",
        i18n.translate("MANAGE_ACCESS"),
        html_escape(&profile.display_name)
    );
    let roles = Role::ALL
        .iter()
        .map(|role| RoleOption {
            role: *role,
            label: i18n.translate(&role.as_str().to_uppercase()),
        })
        .collect();
    let tenant = html_escape(&profile.tenant.display_name);
    let visibility_descriptions = [
        Visibility::Public,
        Visibility::LoggedIn,
        Visibility::Private,
    ]
    .map(|v| {
        let key = format!("MEETING_{}_DESCRIPTION", v.as_str().to_uppercase());
        i18n.translate(&key).replace("${tenant}", &tenant)
    });

    ManageAccessConfig {
        profile,
        title,
        roles,
        default_role: Role::Member,
        visibility_descriptions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingHost};
    use huddle_api::{ApiError, MockTransport};
    use huddle_core::Actor;
    use tokio::sync::oneshot;

    const VIEWER: &str = "u:cam:alice";

    fn profile_json(name: &str, is_manager: bool) -> String {
        serde_json::json!({
            "id": "d:cam:m1",
            "displayName": name,
            "visibility": "loggedin",
            "tenant": { "alias": "cam", "displayName": "Cambridge" },
            "isManager": is_manager,
            "canShare": is_manager,
            "signature": { "signature": "sig", "expires": 1 }
        })
        .to_string()
    }

    fn profile(name: &str) -> Arc<MeetingProfile> {
        Arc::new(serde_json::from_str(&profile_json(name, true)).unwrap())
    }

    fn activity(actor: &str, activity_type: &str, name: &str) -> Activity {
        Activity {
            id: format!("act-{}", name),
            activity_type: activity_type.to_string(),
            actor: Actor {
                id: actor.to_string(),
                display_name: String::new(),
            },
            object: serde_json::from_str(&profile_json(name, true)).unwrap(),
        }
    }

    fn controller(
        transport: &MockTransport,
        host: &Arc<RecordingHost>,
    ) -> PageController<MockTransport> {
        PageController::new(
            MeetingClient::new(transport.clone()),
            host.collaborators(),
            EventBus::default(),
            VIEWER,
        )
    }

    async fn loaded(
        name: &str,
        is_manager: bool,
    ) -> (PageController<MockTransport>, MockTransport, Arc<RecordingHost>) {
        let transport = MockTransport::new().respond(200, profile_json(name, is_manager));
        let host = RecordingHost::new();
        let mut page = controller(&transport, &host);
        assert!(matches!(
            page.load("/meeting/cam/m1").await,
            LoadOutcome::Loaded(_)
        ));
        host.clear_calls();
        (page, transport, host)
    }

    async fn next_context(sub: &mut Subscription) -> (Recipient, Arc<MeetingProfile>) {
        loop {
            match sub.recv().await {
                Some(PageEvent::Context { recipient, profile }) => return (recipient, profile),
                Some(_) => continue,
                None => panic!("bus closed"),
            }
        }
    }

    #[tokio::test]
    async fn load_runs_setup_in_order() {
        let transport = MockTransport::new().respond(200, profile_json("Weekly sync", true));
        let host = RecordingHost::new();
        let mut page = controller(&transport, &host);
        let mut early_widget = page.bus().subscribe_as("members");

        let outcome = page.load("/meeting/cam/m1/members").await;

        let LoadOutcome::Loaded(profile) = outcome else {
            panic!("expected load to succeed");
        };
        assert_eq!(profile.display_name, "Weekly sync");
        assert_eq!(page.state(), PageState::Loaded);
        assert_eq!(page.location().unwrap().sub_page, "members");
        assert_eq!(transport.requests()[0].path, "/api/meeting/d%3Acam%3Am1");

        let calls = host.calls();
        assert_eq!(
            calls,
            vec![
                Call::RenderSummary("Weekly sync".to_string()),
                Call::RegisterNavigation(
                    "/meeting/cam/m1".to_string(),
                    vec![NavEntry {
                        id: "summary".to_string(),
                        title: "[SUMMARY]".to_string(),
                        path: "/meeting/cam/m1".to_string(),
                    }]
                ),
                Call::Insert(WidgetSlot::Clip),
                Call::Reveal,
                Call::Subscribe("d:cam:m1".to_string(), profile.signature.clone()),
            ]
        );

        // Widgets mounted before the fetch completed get the one broadcast.
        let Some(PageEvent::Context {
            recipient,
            profile: broadcast,
        }) = early_widget.try_recv()
        else {
            panic!("no initial broadcast");
        };
        assert_eq!(recipient, Recipient::All);
        assert!(Arc::ptr_eq(&broadcast, &profile));
    }

    #[tokio::test]
    async fn unauthorized_load_routes_to_access_denied() {
        let transport = MockTransport::new().respond(401, "not allowed");
        let host = RecordingHost::new();
        let mut page = controller(&transport, &host);

        let outcome = page.load("/meeting/cam/m1").await;

        assert_eq!(outcome, LoadOutcome::Redirected(Destination::AccessDenied));
        assert_eq!(host.calls(), vec![Call::Redirect(Destination::AccessDenied)]);
        assert_eq!(page.state(), PageState::AwaitingInitialLoad);
    }

    #[tokio::test]
    async fn other_load_failures_route_to_not_found() {
        let failures = vec![
            MockTransport::new().respond(404, "missing"),
            MockTransport::new().respond(500, "boom"),
            MockTransport::new().respond(403, "forbidden"),
            MockTransport::new().fail(ApiError::Network("refused".into())),
        ];

        for transport in failures {
            let host = RecordingHost::new();
            let mut page = controller(&transport, &host);
            let outcome = page.load("/meeting/cam/m1").await;
            assert_eq!(outcome, LoadOutcome::Redirected(Destination::NotFound));
            assert_eq!(host.calls(), vec![Call::Redirect(Destination::NotFound)]);
            // No retry.
            assert_eq!(transport.requests().len(), 1);
        }
    }

    #[tokio::test]
    async fn foreign_location_routes_to_not_found_without_fetching() {
        let transport = MockTransport::new();
        let host = RecordingHost::new();
        let mut page = controller(&transport, &host);

        let outcome = page.load("/content/cam/m1").await;

        assert_eq!(outcome, LoadOutcome::Redirected(Destination::NotFound));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn generic_context_request_is_broadcast() {
        let (mut page, _, _) = loaded("Weekly sync", true).await;
        let mut plain = page.bus().subscribe();
        let mut scoped = page.bus().subscribe_as("recordings");

        assert!(!page.handle(PageEvent::ContextRequest { requester: None }).await);

        for sub in [&mut plain, &mut scoped] {
            let (recipient, profile) = next_context(sub).await;
            assert_eq!(recipient, Recipient::All);
            assert_eq!(profile.display_name, "Weekly sync");
        }
    }

    #[tokio::test]
    async fn directed_context_request_reaches_only_the_requester() {
        let (mut page, _, _) = loaded("Weekly sync", true).await;
        let mut requester = page.bus().subscribe_as("members");
        let mut bystander = page.bus().subscribe_as("recordings");
        let mut plain = page.bus().subscribe();

        page.handle(PageEvent::ContextRequest {
            requester: Some("members".to_string()),
        })
        .await;

        let (recipient, profile) = next_context(&mut requester).await;
        assert_eq!(recipient, Recipient::Widget("members".to_string()));
        assert_eq!(profile.display_name, "Weekly sync");
        assert!(bystander.try_recv().is_none());
        assert!(plain.try_recv().is_none());
    }

    #[tokio::test]
    async fn edit_done_twice_keeps_a_single_clip() {
        let (mut page, _, host) = loaded("Weekly sync", true).await;
        let edited = profile("Renamed");

        assert!(page.handle(PageEvent::EditDone(Arc::clone(&edited))).await);
        assert!(page.handle(PageEvent::EditDone(Arc::clone(&edited))).await);

        let current = page.session().current().unwrap();
        assert_eq!(current.display_name, "Renamed");

        let clips = host.widgets(WidgetSlot::Clip);
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0], Widget::Clip(current));

        assert_eq!(
            host.calls(),
            vec![
                Call::RenderSummary("Renamed".to_string()),
                Call::Clear(WidgetSlot::Clip),
                Call::Insert(WidgetSlot::Clip),
                Call::RenderSummary("Renamed".to_string()),
                Call::Clear(WidgetSlot::Clip),
                Call::Insert(WidgetSlot::Clip),
            ]
        );
    }

    #[tokio::test]
    async fn push_from_viewer_is_ignored() {
        let (mut page, _, host) = loaded("Weekly sync", true).await;
        let batch = vec![activity(VIEWER, "meeting-update", "Mine")];

        assert!(!page.handle_activities(&batch));
        assert_eq!(page.session().current().unwrap().display_name, "Weekly sync");
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn push_of_other_types_is_ignored() {
        let (mut page, _, host) = loaded("Weekly sync", true).await;
        let batch = vec![activity("u:cam:bob", "meeting-message", "Chatty")];

        assert!(!page.handle_activities(&batch));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn qualifying_push_refreshes_once() {
        let (mut page, _, host) = loaded("Weekly sync", true).await;
        let batch = vec![
            activity("u:cam:bob", "meeting-update-visibility", "Pushed"),
            activity("u:cam:carol", "meeting-update", "Ignored"),
        ];

        assert!(page.handle_activities(&batch));
        assert_eq!(page.session().current().unwrap().display_name, "Pushed");
        let renders = host
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::RenderSummary(_)))
            .count();
        assert_eq!(renders, 1);
    }

    #[tokio::test]
    async fn only_first_activity_is_consulted() {
        let (mut page, _, _) = loaded("Weekly sync", true).await;
        let batch = vec![
            activity(VIEWER, "meeting-update", "Mine"),
            activity("u:cam:bob", "meeting-update", "Theirs"),
        ];

        assert!(!page.handle_activities(&batch));
        assert!(!page.handle_activities(&[]));
        assert_eq!(page.session().current().unwrap().display_name, "Weekly sync");
    }

    #[tokio::test]
    async fn events_before_load_are_ignored() {
        let transport = MockTransport::new();
        let host = RecordingHost::new();
        let mut page = controller(&transport, &host);
        let mut sub = page.bus().subscribe();

        assert!(!page.handle(PageEvent::EditDone(profile("Early"))).await);
        assert!(!page.handle(PageEvent::ContextRequest { requester: None }).await);
        assert!(!page.handle_activities(&[activity("u:cam:bob", "meeting-update", "Early")]));

        assert!(page.session().current().is_none());
        assert!(host.calls().is_empty());
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn manage_access_trigger_opens_dialog() {
        let (mut page, _, host) = loaded("Tom & Jerry", true).await;

        page.handle(PageEvent::ManageAccessTrigger).await;

        let dialogs = host.widgets(WidgetSlot::Modal);
        assert_eq!(dialogs.len(), 1);
        let Widget::ManageAccess(config) = &dialogs[0] else {
            panic!("expected manage access dialog");
        };
        assert_eq!(config.title, "[MANAGE_ACCESS]: Tom &amp; Jerry");
        assert_eq!(config.default_role, Role::Member);
        assert_eq!(
            config.roles.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            vec!["[MANAGER]", "[MEMBER]"]
        );
        assert_eq!(config.visibility_descriptions[1], "Visible to Cambridge");
        assert_eq!(config.visibility_descriptions[2], "[MEETING_PRIVATE_DESCRIPTION]");

        // Opening again replaces the dialog instead of stacking it.
        page.handle(PageEvent::ManageAccessTrigger).await;
        assert_eq!(host.widgets(WidgetSlot::Modal).len(), 1);
    }

    #[tokio::test]
    async fn manage_access_trigger_needs_manager() {
        let (mut page, _, host) = loaded("Weekly sync", false).await;

        page.handle(PageEvent::ManageAccessTrigger).await;

        assert!(host.widgets(WidgetSlot::Modal).is_empty());
    }

    #[tokio::test]
    async fn manage_access_done_refetches_profile() {
        let (mut page, transport, host) = loaded("Weekly sync", true).await;
        transport.push(Ok(huddle_api::ApiResponse::new(
            200,
            profile_json("Now private", true),
        )));

        assert!(page.handle(PageEvent::ManageAccessDone).await);

        assert_eq!(page.session().current().unwrap().display_name, "Now private");
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(host.widgets(WidgetSlot::Clip).len(), 1);
    }

    #[tokio::test]
    async fn failed_refetch_keeps_current_profile() {
        let (mut page, transport, host) = loaded("Weekly sync", true).await;
        transport.push(Ok(huddle_api::ApiResponse::new(500, "boom")));

        assert!(!page.handle(PageEvent::ManageAccessDone).await);

        assert_eq!(page.session().current().unwrap().display_name, "Weekly sync");
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn push_subscription_failure_does_not_abort_load() {
        let transport = MockTransport::new().respond(200, profile_json("Weekly sync", true));
        let host = RecordingHost::refusing_push();
        let mut page = controller(&transport, &host);

        assert!(matches!(
            page.load("/meeting/cam/m1").await,
            LoadOutcome::Loaded(_)
        ));
        assert!(host.calls().contains(&Call::Reveal));
        assert!(!host.push(vec![]));
    }

    #[tokio::test]
    async fn run_answers_requests_and_applies_pushes() {
        let (page, _, host) = loaded("Weekly sync", true).await;
        let session = page.session().clone();
        let bus = page.bus().clone();
        let mut widget = bus.subscribe_as("members");
        let (stop_tx, stop_rx) = oneshot::channel::<()>();

        let driver = async {
            bus.publish(PageEvent::ContextRequest {
                requester: Some("members".to_string()),
            });
            let (recipient, reply) = next_context(&mut widget).await;
            assert_eq!(recipient, Recipient::Widget("members".to_string()));
            assert_eq!(reply.display_name, "Weekly sync");

            assert!(host.push(vec![activity("u:cam:bob", "meeting-update", "Pushed")]));
            for _ in 0..100 {
                if session.current().unwrap().display_name == "Pushed" {
                    break;
                }
                tokio::task::yield_now().await;
            }
            assert_eq!(session.current().unwrap().display_name, "Pushed");

            // A closed push stream does not stop the controller.
            host.close_push();
            bus.publish(PageEvent::EditDone(profile("Edited")));
            for _ in 0..100 {
                if session.current().unwrap().display_name == "Edited" {
                    break;
                }
                tokio::task::yield_now().await;
            }
            assert_eq!(session.current().unwrap().display_name, "Edited");

            stop_tx.send(()).unwrap();
        };
        let shutdown = async {
            let _ = stop_rx.await;
        };

        tokio::join!(page.run(shutdown), driver);
    }

    #[tokio::test]
    async fn run_without_load_returns_immediately() {
        let transport = MockTransport::new();
        let host = RecordingHost::new();
        let page = controller(&transport, &host);
        page.run(std::future::pending::<()>()).await;
    }

    #[test]
    fn refresh_candidate_rejects_bad_objects() {
        let mut bad = activity("u:cam:bob", "meeting-update", "x");
        bad.object = serde_json::json!({ "unexpected": true });
        assert!(refresh_candidate(&[bad], VIEWER).is_none());
    }
}
