//! Per-user analysis session state.
//!
//! Each browser session gets its own `AnalysisSession`: the last
//! submitted record, the last successful assessment, and the in-flight
//! guard. Sessions never share state. The `SessionStore` only maps ids
//! to sessions; it holds no patient data itself.
//!
//! A session the page never ends (crashed tab, no `pagehide`) is dropped
//! by `SessionStore::evict_idle` once it has been idle long enough.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::analysis_guard::{ActiveSubmission, AnalysisGuard};
use crate::assessment_client::{AssessmentError, RiskBackend};
use crate::models::assessment::Assessment;
use crate::models::patient::PatientRecord;

/// Idle time after which a session and its patient data are dropped: 15 minutes.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(900);

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("An analysis is already in progress for this session")]
    AnalysisInProgress,
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("No assessment result is available yet")]
    NoResult,
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

// ═══════════════════════════════════════════════════════════
// AnalysisSession
// ═══════════════════════════════════════════════════════════

/// Transient state of one user session. Nothing here is persisted.
pub struct AnalysisSession {
    id: Uuid,
    created_at: String,
    last_record: RwLock<Option<PatientRecord>>,
    last_assessment: RwLock<Option<Assessment>>,
    guard: AnalysisGuard,
    last_activity: Mutex<Instant>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now().to_rfc3339(),
            last_record: RwLock::new(None),
            last_assessment: RwLock::new(None),
            guard: AnalysisGuard::new(),
            last_activity: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Mark the session as used now.
    pub fn touch(&self) {
        *self
            .last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    /// Time since the session was last used.
    pub fn idle_for(&self) -> Duration {
        self.last_activity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }

    /// Submit a record for assessment. Blocks until the backend answers.
    ///
    /// While another submission is in flight this returns
    /// `AnalysisInProgress` and never calls the backend. Only a success
    /// replaces the stored assessment; on failure the previous one stays.
    pub fn submit(
        &self,
        backend: &dyn RiskBackend,
        record: PatientRecord,
    ) -> Result<Assessment, SessionError> {
        let in_flight = self.guard.try_begin().ok_or_else(|| {
            tracing::warn!(session = %self.id, "Submission ignored: analysis already in progress");
            SessionError::AnalysisInProgress
        })?;

        tracing::info!(
            session = %self.id,
            submission = %in_flight.submission_id(),
            "Analysis started"
        );

        self.touch();
        let outcome = backend.assess(&record);
        self.touch();

        *self
            .last_record
            .write()
            .map_err(|_| SessionError::LockPoisoned)? = Some(record);

        match outcome {
            Ok(assessment) => {
                *self
                    .last_assessment
                    .write()
                    .map_err(|_| SessionError::LockPoisoned)? = Some(assessment.clone());
                tracing::info!(session = %self.id, "Analysis completed");
                Ok(assessment)
            }
            Err(e) => {
                tracing::warn!(session = %self.id, error = %e, "Analysis failed");
                Err(SessionError::Assessment(e))
            }
        }
    }

    /// Last successful assessment.
    pub fn last_assessment(&self) -> Result<Assessment, SessionError> {
        self.last_assessment
            .read()
            .map_err(|_| SessionError::LockPoisoned)?
            .clone()
            .ok_or(SessionError::NoResult)
    }

    /// Last record sent, whether or not the call succeeded.
    pub fn last_record(&self) -> Option<PatientRecord> {
        self.last_record.read().ok()?.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.guard.is_in_flight()
    }

    pub fn current_submission(&self) -> Option<ActiveSubmission> {
        self.guard.current()
    }

    /// Drop the last record and result. A running submission is left
    /// to finish.
    pub fn reset(&self) -> Result<(), SessionError> {
        *self
            .last_record
            .write()
            .map_err(|_| SessionError::LockPoisoned)? = None;
        *self
            .last_assessment
            .write()
            .map_err(|_| SessionError::LockPoisoned)? = None;
        Ok(())
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// SessionStore
// ═══════════════════════════════════════════════════════════

/// All live sessions, keyed by id.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<AnalysisSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn create(&self) -> Result<Arc<AnalysisSession>, SessionError> {
        let session = Arc::new(AnalysisSession::new());
        self.sessions
            .write()
            .map_err(|_| SessionError::LockPoisoned)?
            .insert(session.id(), Arc::clone(&session));
        tracing::debug!(session = %session.id(), "Session created");
        Ok(session)
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<Arc<AnalysisSession>>, SessionError> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| SessionError::LockPoisoned)?
            .get(id)
            .cloned())
    }

    /// End a session. Returns whether it existed.
    pub fn remove(&self, id: &Uuid) -> Result<bool, SessionError> {
        let removed = self
            .sessions
            .write()
            .map_err(|_| SessionError::LockPoisoned)?
            .remove(id)
            .is_some();
        if removed {
            tracing::debug!(session = %id, "Session ended");
        }
        Ok(removed)
    }

    /// Drop sessions idle for at least `max_idle`. A session with an
    /// analysis in flight is kept. Returns how many were dropped.
    pub fn evict_idle(&self, max_idle: Duration) -> Result<usize, SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::LockPoisoned)?;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let keep = session.is_in_flight() || session.idle_for() < max_idle;
            if !keep {
                tracing::debug!(session = %id, "Session expired after inactivity");
            }
            keep
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Idle sessions evicted");
        }
        Ok(evicted)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
