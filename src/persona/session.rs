// src/persona/session.rs
// Session-keyed persona assignments, owned by the request-handling layer

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use super::PersonaId;

/// Remembers which persona a session was given. Entries are only ever
/// inserted, never replaced.
#[derive(Debug, Default)]
pub struct SessionPersonaStore {
    assignments: Mutex<HashMap<String, PersonaId>>,
}

impl SessionPersonaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session's persona, calling `choose` only if the session
    /// has none yet.
    pub fn assign_with<F>(&self, session_id: &str, choose: F) -> PersonaId
    where
        F: FnOnce() -> PersonaId,
    {
        let mut assignments = self
            .assignments
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        *assignments.entry(session_id.to_string()).or_insert_with(|| {
            let persona = choose();
            debug!(session_id, persona = %persona, "Assigned persona to new session");
            persona
        })
    }

    /// Random persona on first sight of a session
    pub fn assign_random(&self, session_id: &str) -> PersonaId {
        self.assign_with(session_id, || PersonaId::random(&mut rand::rng()))
    }

    pub fn get(&self, session_id: &str) -> Option<PersonaId> {
        self.assignments
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(session_id)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.assignments
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
