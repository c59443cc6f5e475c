//! In-flight guard for risk analyses.
//!
//! A session may have at most one assessment call outstanding. A second
//! "Analyze Risk" while one is running must not reach the backend, so
//! the guard is non-blocking: `try_begin()` either hands out the single
//! token or returns `None`.

use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use serde::Serialize;
use uuid::Uuid;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Snapshot of the submission currently being assessed.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveSubmission {
    /// Identifier assigned when the submission started.
    pub submission_id: Uuid,
    /// When the submission started (ISO 8601).
    pub started_at: String,
}

// ═══════════════════════════════════════════════════════════
// AnalysisGuard
// ═══════════════════════════════════════════════════════════

/// Exclusive-access controller for one session's analyses.
pub struct AnalysisGuard {
    lock: Mutex<()>,
    current: Mutex<Option<ActiveSubmission>>,
}

impl AnalysisGuard {
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
            current: Mutex::new(None),
        }
    }

    /// Claim the in-flight slot without blocking.
    ///
    /// Returns `None` if an analysis is already running. The slot is
    /// released when the returned token is dropped, on success and
    /// failure alike. A panic inside a previous analysis poisons the
    /// lock; the slot is recovered rather than left busy forever.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        let guard = match self.lock.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return None,
            Err(TryLockError::Poisoned(poisoned)) => {
                tracing::warn!("Previous analysis panicked; releasing in-flight slot");
                self.lock.clear_poison();
                poisoned.into_inner()
            }
        };
        let submission = ActiveSubmission {
            submission_id: Uuid::new_v4(),
            started_at: chrono::Utc::now().to_rfc3339(),
        };
        self.set_current(Some(submission.clone()));
        Some(InFlight {
            _guard: guard,
            owner: self,
            submission,
        })
    }

    /// The running submission, or `None` when idle.
    pub fn current(&self) -> Option<ActiveSubmission> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Only a held lock counts; a poisoned one is free to reclaim.
    pub fn is_in_flight(&self) -> bool {
        matches!(self.lock.try_lock(), Err(TryLockError::WouldBlock))
    }

    fn set_current(&self, value: Option<ActiveSubmission>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl Default for AnalysisGuard {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// InFlight — RAII token
// ═══════════════════════════════════════════════════════════

/// Proof that this caller owns the in-flight slot.
pub struct InFlight<'a> {
    _guard: MutexGuard<'a, ()>,
    owner: &'a AnalysisGuard,
    submission: ActiveSubmission,
}

impl InFlight<'_> {
    pub fn submission_id(&self) -> Uuid {
        self.submission.submission_id
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.owner.set_current(None);
    }
}
