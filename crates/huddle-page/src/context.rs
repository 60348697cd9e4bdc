//! Session-scoped holder of the current meeting profile.

use std::sync::{Arc, RwLock};

use huddle_core::MeetingProfile;

/// The profile currently shown by a page.
///
/// At most one profile is current. Readers get an `Arc` snapshot, so a
/// replacement never tears a profile that is being rendered or broadcast.
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Arc<MeetingProfile>>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current profile, if one has been loaded.
    pub fn current(&self) -> Option<Arc<MeetingProfile>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replaces the current profile wholesale and returns the new snapshot.
    pub fn replace(&self, profile: impl Into<Arc<MeetingProfile>>) -> Arc<MeetingProfile> {
        let profile = profile.into();
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(Arc::clone(&profile));
        profile
    }

    /// Returns true once a profile has been stored.
    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }
}
