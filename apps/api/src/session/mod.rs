//! Editing sessions: one resume draft, the selected template and the
//! templates the session has unlocked, persisted between requests.

pub mod entitlement;
pub mod handlers;
pub mod inflight;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resume::ResumeDocument;

pub use entitlement::{check_editor_access, EditorAccess, Entitlements};
pub use inflight::{ActionKind, InFlight, InFlightGuard};
pub use store::{SessionError, SessionStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    /// Set once the editor for a template has been opened.
    pub template_id: Option<String>,
    pub document: ResumeDocument,
    pub entitlements: Entitlements,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            template_id: None,
            document: ResumeDocument::default(),
            entitlements: Entitlements::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
