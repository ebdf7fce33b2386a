use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

/// Long-running actions that may not overlap within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Ai,
    Export,
}

/// Tracks which (session, action) pairs are currently running.
#[derive(Clone, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<(Uuid, ActionKind)>>>,
}

impl InFlight {
    /// Marks the action as running, or returns `None` if it already is.
    /// The mark is cleared when the guard drops, whatever the outcome.
    pub fn try_begin(&self, session_id: Uuid, kind: ActionKind) -> Option<InFlightGuard> {
        let key = (session_id, kind);
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert(key) {
            return None;
        }
        Some(InFlightGuard {
            active: Arc::clone(&self.active),
            key,
        })
    }
}

pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<(Uuid, ActionKind)>>>,
    key: (Uuid, ActionKind),
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_rejected_until_guard_drops() {
        let in_flight = InFlight::default();
        let id = Uuid::new_v4();

        let guard = in_flight.try_begin(id, ActionKind::Ai).unwrap();
        assert!(in_flight.try_begin(id, ActionKind::Ai).is_none());
        drop(guard);
        assert!(in_flight.try_begin(id, ActionKind::Ai).is_some());
    }

    #[test]
    fn test_kinds_and_sessions_are_independent() {
        let in_flight = InFlight::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let _ai = in_flight.try_begin(a, ActionKind::Ai).unwrap();
        assert!(in_flight.try_begin(a, ActionKind::Export).is_some());
        assert!(in_flight.try_begin(b, ActionKind::Ai).is_some());
    }
}
