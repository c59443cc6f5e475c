use super::{AssessmentError, RiskBackend};
use crate::config::BackendConfig;
use crate::models::assessment::Assessment;
use crate::models::patient::PatientRecord;

/// HTTP client for the risk-scoring backend.
///
/// Holds only configuration. The blocking reqwest client is built per
/// call, on the calling thread, so it never lives on an async worker.
/// No request timeout is set beyond the transport default.
pub struct AssessmentClient {
    config: BackendConfig,
}

impl AssessmentClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.config.endpoint.as_str()
    }

    fn http_client(&self) -> Result<reqwest::blocking::Client, AssessmentError> {
        reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| AssessmentError::Transport(format!("Failed to create HTTP client: {e}")))
    }

    fn classify(&self, e: reqwest::Error) -> AssessmentError {
        if e.is_builder() {
            AssessmentError::Encode(e.to_string())
        } else if e.is_connect() {
            AssessmentError::Unreachable(self.endpoint().to_string())
        } else if e.is_timeout() {
            AssessmentError::Timeout
        } else {
            AssessmentError::Transport(e.to_string())
        }
    }
}

impl RiskBackend for AssessmentClient {
    fn assess(&self, record: &PatientRecord) -> Result<Assessment, AssessmentError> {
        let client = self.http_client()?;

        tracing::info!(endpoint = self.endpoint(), "Submitting patient record for assessment");

        let response = client
            .post(self.config.endpoint.clone())
            .bearer_auth(self.config.api_key())
            .json(record)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to read risk service error body");
                format!("<body unreadable: {e}>")
            });
            tracing::warn!(status = status.as_u16(), "Risk service returned error status");
            return Err(AssessmentError::BackendStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().map_err(|e| self.classify(e))?;
        let assessment = Assessment::parse(&bytes).inspect_err(|e| {
            tracing::warn!(error = %e, "Risk service response failed validation");
        })?;

        tracing::info!(
            score = assessment.result.overall_risk.score_percent,
            band = %assessment.result.overall_risk.band(),
            "Assessment received"
        );
        Ok(assessment)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormDefaults, PatientForm};

    const OK_BODY: &str = r#"{
        "overall_risk": {"score_percent": 72, "category": "High", "interpretation": "Elevated", "description": "d"},
        "risk_breakdown": {
            "systemic_risks": [{"category": "Hepatic", "risk_level_num": 4}],
            "comorbidity_impact": [{"comorbidity": "CKD", "impact_level_num": 6}]
        },
        "drug_interactions": [],
        "special_population_warnings": [],
        "alternative_drugs": [{"name": "Pravastatin", "efficacy_score": 6, "safety_score": 8}],
        "summary": "Monitor renal function."
    }"#;

    fn client_for(url: &str) -> AssessmentClient {
        AssessmentClient::new(&BackendConfig::new(
            reqwest::Url::parse(url).unwrap(),
            "test-api-key",
        ))
    }

    fn record() -> PatientRecord {
        let mut form = PatientForm::new(&FormDefaults::clinic(
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ));
        form.current_medications.resize(0);
        form.build()
    }

    #[test]
    fn posts_record_with_bearer_credential() {
        let backend = stub::start(200, OK_BODY);
        let client = client_for(&backend.url());

        let assessment = client.assess(&record()).unwrap();
        assert_eq!(assessment.result.overall_risk.score_percent, 72.0);
        assert_eq!(assessment.result.summary, "Monitor renal function.");

        let seen = backend.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer test-api-key"));
        assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
        assert_eq!(seen[0].body["proposed_drug"]["name"], "Rosuvastatin");
        // Empty group is sent, not omitted.
        assert_eq!(seen[0].body["current_medications"], serde_json::json!([]));
    }

    #[test]
    fn each_call_is_one_request() {
        let backend = stub::start(200, OK_BODY);
        let client = client_for(&backend.url());
        let record = record();

        client.assess(&record).unwrap();
        client.assess(&record).unwrap();
        assert_eq!(backend.requests().len(), 2);
    }

    #[test]
    fn non_2xx_surfaces_status_and_body() {
        let backend = stub::start(500, "scoring engine exploded");
        let client = client_for(&backend.url());

        match client.assess(&record()) {
            Err(AssessmentError::BackendStatus { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "scoring engine exploded");
            }
            other => panic!("expected BackendStatus, got {other:?}"),
        }
    }

    #[test]
    fn unreadable_error_body_is_reported_not_blanked() {
        let client = client_for(&stub::start_truncated(503));

        match client.assess(&record()) {
            Err(AssessmentError::BackendStatus { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.starts_with("<body unreadable:"), "got {body:?}");
            }
            other => panic!("expected BackendStatus, got {other:?}"),
        }
    }

    #[test]
    fn missing_field_fails_fast() {
        let backend = stub::start(200, r#"{"overall_risk": {"score_percent": 10}}"#);
        let client = client_for(&backend.url());

        let err = client.assess(&record()).unwrap_err();
        assert!(matches!(err, AssessmentError::MalformedResponse(_)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let backend = stub::start(200, "<html>ok</html>");
        let client = client_for(&backend.url());

        let err = client.assess(&record()).unwrap_err();
        assert!(matches!(err, AssessmentError::MalformedResponse(_)));
    }

    #[test]
    fn connection_refused_is_unreachable() {
        let client = client_for(&stub::closed_url());
        let err = client.assess(&record()).unwrap_err();
        assert!(
            matches!(err, AssessmentError::Unreachable(_)),
            "expected Unreachable, got {err:?}"
        );
        assert_eq!(err.user_message(), super::super::GENERIC_TRANSPORT_MESSAGE);
    }
}
