use resus_core::models::session::Session;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// A structured record of something that happened to a session.
///
/// Emitted via `tracing`, so whichever subscriber the host installs decides
/// where session history ends up.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEvent {
    pub session_id: Uuid,
    pub action: String,
    pub state: String,
    pub elapsed_seconds: u64,
    pub details: Option<serde_json::Value>,
}

impl SessionEvent {
    pub fn new(session: &Session, action: impl Into<String>) -> Self {
        Self {
            session_id: session.id,
            action: action.into(),
            state: session.state.name().to_string(),
            elapsed_seconds: session.elapsed_seconds,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            session.id = %self.session_id,
            session.action = %self.action,
            session.state = %self.state,
            session.elapsed_seconds = self.elapsed_seconds,
            session.details = %details,
            "session event"
        );
    }
}
