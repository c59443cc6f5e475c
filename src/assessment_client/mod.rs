//! Assessment client: one authenticated POST of a `PatientRecord` to the
//! risk-scoring backend, parsed into an `Assessment`.
//!
//! No retry, no caching, no idempotency key. Each call to
//! [`RiskBackend::assess`] is exactly one network request.

pub mod http;

pub use http::AssessmentClient;

use crate::models::assessment::{Assessment, ResponseShapeError};
use crate::models::patient::PatientRecord;

/// Message shown for failures where the transport detail is not useful
/// to the person filling in the form.
pub const GENERIC_TRANSPORT_MESSAGE: &str =
    "The risk service could not be reached. Check your connection and try again.";

/// Errors from a risk assessment call.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("Risk service is not reachable at {0}")]
    Unreachable(String),

    #[error("Risk service request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Risk service returned an error (status {status}): {body}")]
    BackendStatus { status: u16, body: String },

    #[error("Malformed risk service response: {0}")]
    MalformedResponse(#[from] ResponseShapeError),

    #[error("Could not encode patient record: {0}")]
    Encode(String),
}

impl AssessmentError {
    /// Text surfaced inline to the user.
    ///
    /// Transport failures get a generic message; backend statuses and
    /// malformed responses are shown verbatim to aid debugging.
    pub fn user_message(&self) -> String {
        match self {
            Self::Unreachable(_) | Self::Timeout | Self::Transport(_) => {
                GENERIC_TRANSPORT_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// The risk-scoring backend, as seen by a session.
///
/// Implementations block until the backend answers or fails; callers
/// on an async runtime run them on a blocking thread.
pub trait RiskBackend: Send + Sync {
    fn assess(&self, record: &PatientRecord) -> Result<Assessment, AssessmentError>;
}

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};

    use super::*;
    use crate::models::assessment::fixtures::sample_response;

    /// Scripted backend that counts calls.
    pub struct MockRiskBackend {
        outcome: fn() -> Result<Assessment, AssessmentError>,
        calls: AtomicUsize,
        /// When set, each call waits on the barrier twice: once to signal
        /// it has started and once before returning.
        gate: Option<Arc<Barrier>>,
    }

    impl MockRiskBackend {
        pub fn succeeding() -> Self {
            Self::with_outcome(|| Ok(Assessment::from_value(sample_response(72.0)).unwrap()))
        }

        pub fn unreachable() -> Self {
            Self::with_outcome(|| Err(AssessmentError::Unreachable("http://127.0.0.1:9".into())))
        }

        pub fn with_outcome(outcome: fn() -> Result<Assessment, AssessmentError>) -> Self {
            Self {
                outcome,
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        pub fn gated(mut self, gate: Arc<Barrier>) -> Self {
            self.gate = Some(gate);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RiskBackend for MockRiskBackend {
        fn assess(&self, _record: &PatientRecord) -> Result<Assessment, AssessmentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.wait();
                gate.wait();
            }
            (self.outcome)()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_get_generic_message() {
        for err in [
            AssessmentError::Unreachable("http://10.0.0.1".into()),
            AssessmentError::Timeout,
            AssessmentError::Transport("connection reset".into()),
        ] {
            assert_eq!(err.user_message(), GENERIC_TRANSPORT_MESSAGE);
        }
    }

    #[test]
    fn backend_status_detail_is_verbatim() {
        let err = AssessmentError::BackendStatus {
            status: 422,
            body: "{\"detail\":\"age must be provided\"}".into(),
        };
        let message = err.user_message();
        assert!(message.contains("422"));
        assert!(message.contains("age must be provided"));
    }

    #[test]
    fn malformed_response_names_missing_field() {
        let err = AssessmentError::from(ResponseShapeError::MissingField("summary".into()));
        assert!(err.user_message().contains("summary"));
    }
}
