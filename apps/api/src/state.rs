use std::sync::Arc;

use crate::assist::LanguageModel;
use crate::catalog::TemplateRegistry;
use crate::config::Config;
use crate::session::{InFlight, SessionStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<TemplateRegistry>,
    pub sessions: Arc<SessionStore>,
    /// Pluggable text generator. Production: `LlmClient`.
    pub model: Arc<dyn LanguageModel>,
    pub in_flight: InFlight,
}
