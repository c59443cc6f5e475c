//! Response payload returned by the risk-scoring backend.
//!
//! Only field presence is checked: the backend owns the meaning of
//! every value. Unknown fields on entries are kept in `extra` so the
//! result tables can show them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary JSON object as returned for table-only sections.
pub type Record = Map<String, Value>;

/// Score at or above which a result falls in the high band.
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;
/// Score at or above which a result falls in the moderate band.
pub const MODERATE_RISK_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub overall_risk: OverallRisk,
    pub risk_breakdown: RiskBreakdown,
    pub drug_interactions: Vec<Record>,
    pub special_population_warnings: Vec<Record>,
    pub alternative_drugs: Vec<AlternativeDrug>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRisk {
    /// 0–100.
    pub score_percent: f64,
    pub category: String,
    pub interpretation: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl OverallRisk {
    pub fn band(&self) -> RiskBand {
        RiskBand::from_score(self.score_percent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub systemic_risks: Vec<SystemicRisk>,
    pub comorbidity_impact: Vec<ComorbidityImpact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemicRisk {
    pub category: String,
    /// 0–10.
    pub risk_level_num: f64,
    #[serde(flatten)]
    pub extra: Record,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComorbidityImpact {
    pub comorbidity: String,
    /// 0–10.
    pub impact_level_num: f64,
    #[serde(flatten)]
    pub extra: Record,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeDrug {
    pub name: String,
    /// 0–10.
    pub efficacy_score: f64,
    /// 0–10.
    pub safety_score: f64,
    #[serde(flatten)]
    pub extra: Record,
}

/// Coarse risk band used by band-dependent rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_score(score_percent: f64) -> Self {
        if score_percent >= HIGH_RISK_THRESHOLD {
            Self::High
        } else if score_percent >= MODERATE_RISK_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
        }
    }
}

/// A backend response parsed into `AssessmentResult`, kept alongside
/// the exact JSON document it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub raw: Value,
    pub result: AssessmentResult,
}

/// Why a response body could not be used as an assessment.
#[derive(Debug, thiserror::Error)]
pub enum ResponseShapeError {
    #[error("Response body is not valid JSON: {0}")]
    NotJson(String),
    #[error("Response is missing field '{0}'")]
    MissingField(String),
    #[error("Response field has the wrong shape: {0}")]
    WrongShape(String),
}

impl Assessment {
    /// Parse a response body and validate its shape once, up front.
    pub fn parse(body: &[u8]) -> Result<Self, ResponseShapeError> {
        let raw: Value =
            serde_json::from_slice(body).map_err(|e| ResponseShapeError::NotJson(e.to_string()))?;
        Self::from_value(raw)
    }

    pub fn from_value(raw: Value) -> Result<Self, ResponseShapeError> {
        if !raw.is_object() {
            return Err(ResponseShapeError::WrongShape(
                "top-level value is not an object".into(),
            ));
        }

        let result = AssessmentResult::deserialize(&raw).map_err(|e| {
            let message = e.to_string();
            match missing_field_name(&message) {
                Some(field) => ResponseShapeError::MissingField(field),
                None => ResponseShapeError::WrongShape(message),
            }
        })?;

        Ok(Self { raw, result })
    }

    /// Downloadable artifact: the received document with stable
    /// two-space indentation.
    pub fn to_artifact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.raw)
    }
}

/// serde reports absent fields as "missing field `name`".
fn missing_field_name(message: &str) -> Option<String> {
    let rest = message.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// A complete backend response.
    pub fn sample_response(score: f64) -> Value {
        json!({
            "overall_risk": {
                "score_percent": score,
                "category": "High",
                "interpretation": "Elevated risk of statin-associated myopathy",
                "description": "Driven by renal impairment and age"
            },
            "risk_breakdown": {
                "systemic_risks": [
                    {"category": "Hepatic", "risk_level_num": 4, "risk_level": "moderate"},
                    {"category": "Musculoskeletal", "risk_level_num": 7.5}
                ],
                "comorbidity_impact": [
                    {"comorbidity": "CKD stage 3", "impact_level_num": 6, "note": "dose-adjust"}
                ]
            },
            "drug_interactions": [
                {"drug": "Clopidogrel", "severity": "minor", "mechanism": "CYP2C8"}
            ],
            "special_population_warnings": [
                {"population": "elderly", "warning": "Start at lowest dose"}
            ],
            "alternative_drugs": [
                {"name": "Pravastatin", "efficacy_score": 6, "safety_score": 8.5},
                {"name": "Ezetimibe", "efficacy_score": 5, "safety_score": 9, "class": "NPC1L1"}
            ],
            "summary": "Proceed with caution; monitor CK and renal function."
        })
    }
}
