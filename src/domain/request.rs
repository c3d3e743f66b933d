//! Loading/error bracket around dispatched backend actions

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic request id source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestIds {
    next: u64,
}

impl RequestIds {
    pub fn next_id(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }
}

/// One in-flight slot: at most a single pending request plus the last error.
///
/// A slot refuses to start a second request while one is pending, and only
/// settles for the request it is waiting on, so responses that arrive after
/// the slot moved on (or was dropped with its screen) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsyncSlot {
    pending: Option<RequestId>,
    error: Option<String>,
}

impl AsyncSlot {
    /// Starts `request`. Returns false when another request is still pending.
    pub fn begin(&mut self, request: RequestId) -> bool {
        if let Some(pending) = self.pending {
            log::debug!("Skipping request {request}: {pending} still in flight");
            return false;
        }
        self.pending = Some(request);
        self.error = None;
        true
    }

    /// Settles the slot if `request` is the pending one. Returns whether the
    /// outcome was accepted.
    pub fn settle(&mut self, request: RequestId, outcome: Result<(), &str>) -> bool {
        if self.pending != Some(request) {
            return false;
        }
        self.pending = None;
        self.error = outcome.err().map(str::to_owned);
        true
    }

    pub fn owns(&self, request: RequestId) -> bool {
        self.pending == Some(request)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
