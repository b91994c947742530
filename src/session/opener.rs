//! Session opener seam.
//!
//! The terminal dialog hands finished requests to a [`SessionOpener`] and
//! never waits for the outcome. Establishing the remote session, and
//! reporting its failures, belongs to the opener.

use std::cell::RefCell;
use std::rc::Rc;

use super::request::ConnectionRequest;

/// Receives connection requests emitted by the terminal dialog.
pub trait SessionOpener {
    /// Starts a session for the request. Fire-and-forget.
    fn open(&mut self, request: &ConnectionRequest);
}

/// Opener that queues requests for the embedding application.
///
/// Clones share the same queue, so the application can keep a handle while
/// the dialog owner holds another.
#[derive(Debug, Clone, Default)]
pub struct PendingSessions {
    queue: Rc<RefCell<Vec<ConnectionRequest>>>,
}

impl PendingSessions {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of queued requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns true if no request is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Returns a copy of the most recent request.
    #[must_use]
    pub fn last(&self) -> Option<ConnectionRequest> {
        self.queue.borrow().last().cloned()
    }

    /// Removes and returns every queued request, oldest first.
    pub fn drain(&self) -> Vec<ConnectionRequest> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }
}

impl SessionOpener for PendingSessions {
    fn open(&mut self, request: &ConnectionRequest) {
        tracing::info!(device = %request.target, method = %request.method(), "Session queued");
        self.queue.borrow_mut().push(request.clone());
    }
}
