use crate::Tag;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// Tags whose next inbound event is an echo of something we just sent.
/// Registrations are presence flags: registering twice still absorbs one event.
#[derive(Debug, Clone, Default)]
pub struct Filter(Arc<Mutex<HashSet<Tag>>>);

impl Filter {
    /// Absorb the next inbound event carrying `tag`.
    pub fn expect(&self, tag: Tag) {
        self.lock().insert(tag);
    }
    /// Checks for a pending registration and clears it in one step.
    pub fn take(&self, tag: Tag) -> bool {
        self.lock().remove(&tag)
    }
    pub fn pending(&self, tag: Tag) -> bool {
        self.lock().contains(&tag)
    }
    fn lock(&self) -> MutexGuard<'_, HashSet<Tag>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
