//! Shared types for the form API layer.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::assessment_client::RiskBackend;
use crate::form::FormDefaults;
use crate::session::{AnalysisSession, SessionStore};

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub sessions: Arc<SessionStore>,
    pub backend: Arc<dyn RiskBackend>,
    /// Pins "today" for date defaults. `None` reads the local clock.
    today: Option<NaiveDate>,
}

impl ApiContext {
    pub fn new(backend: Arc<dyn RiskBackend>) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            backend,
            today: None,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Form defaults as of today.
    pub fn defaults(&self) -> FormDefaults {
        match self.today {
            Some(today) => FormDefaults::clinic(today),
            None => FormDefaults::clinic_today(),
        }
    }

    /// Look up a session or fail with 404. Counts as activity.
    pub fn session(&self, id: &Uuid) -> Result<Arc<AnalysisSession>, ApiError> {
        let session = self.sessions.get(id)?.ok_or(ApiError::SessionNotFound)?;
        session.touch();
        Ok(session)
    }
}
