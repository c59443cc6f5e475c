//! Loosely typed field values as posted by the browser form.
//!
//! Every field is optional: an absent field keeps its default. Numbers
//! are signed so out-of-range entry reaches the clamps instead of
//! failing deserialization. Enumerated fields stay closed: an unknown
//! literal is rejected when the body is parsed.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::enums::{AlcoholStatus, PregnancyStatus, Route, Severity, Sex, SmokingStatus};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormSubmission {
    pub patient_info: PatientInfoInput,
    pub vitals: VitalsInput,
    pub primary_diagnosis: DiagnosisInput,
    /// `None` keeps the default count; `Some` resizes to its length.
    pub comorbidities: Option<Vec<ComorbidityInput>>,
    pub medical_history: Option<Vec<HistoryInput>>,
    pub family_history: Option<Vec<FamilyHistoryInput>>,
    pub current_medications: Option<Vec<MedicationInput>>,
    pub proposed_drug: MedicationInput,
    pub lab_results: LabResultsInput,
    pub allergies: Option<Vec<AllergyInput>>,
    pub lifestyle: LifestyleInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatientInfoInput {
    pub age: Option<i64>,
    pub sex: Option<Sex>,
    pub ethnicity: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub pregnancy_status: Option<PregnancyStatus>,
    pub smoking_status: Option<SmokingStatus>,
    pub pack_years: Option<i64>,
    pub alcohol_use: AlcoholUseInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AlcoholUseInput {
    pub status: Option<AlcoholStatus>,
    pub units_per_week: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VitalsInput {
    pub blood_pressure: BloodPressureInput,
    pub heart_rate_bpm: Option<i64>,
    pub last_measured: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BloodPressureInput {
    pub systolic: Option<i64>,
    pub diastolic: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiagnosisInput {
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub onset_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComorbidityInput {
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub date_diagnosed: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryInput {
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FamilyHistoryInput {
    pub relation: Option<String>,
    pub condition: Option<String>,
    pub age_at_diagnosis: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MedicationInput {
    pub name: Option<String>,
    pub dose_mg: Option<f64>,
    pub frequency_per_day: Option<i64>,
    pub route: Option<Route>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AllergyInput {
    pub substance: Option<String>,
    pub reaction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LifestyleInput {
    pub diet: Option<String>,
    pub exercise_frequency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabResultsInput {
    pub lipid_panel: LipidPanelInput,
    pub metabolic_panel: MetabolicPanelInput,
    pub hematology: HematologyInput,
    pub endocrine: EndocrineInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LipidPanelInput {
    #[serde(rename = "total_cholesterol_mg_dL")]
    pub total_cholesterol_mg_dl: Option<f64>,
    #[serde(rename = "LDL_mg_dL")]
    pub ldl_mg_dl: Option<f64>,
    #[serde(rename = "HDL_mg_dL")]
    pub hdl_mg_dl: Option<f64>,
    #[serde(rename = "triglycerides_mg_dL")]
    pub triglycerides_mg_dl: Option<f64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetabolicPanelInput {
    #[serde(rename = "eGFR")]
    pub egfr: Option<f64>,
    #[serde(rename = "creatinine_umol_L")]
    pub creatinine_umol_l: Option<f64>,
    #[serde(rename = "ALT_U_L")]
    pub alt_u_l: Option<f64>,
    #[serde(rename = "AST_U_L")]
    pub ast_u_l: Option<f64>,
    #[serde(rename = "potassium_mmol_L")]
    pub potassium_mmol_l: Option<f64>,
    #[serde(rename = "sodium_mmol_L")]
    pub sodium_mmol_l: Option<f64>,
    #[serde(rename = "glucose_mg_dL")]
    pub glucose_mg_dl: Option<f64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HematologyInput {
    #[serde(rename = "hemoglobin_g_dL")]
    pub hemoglobin_g_dl: Option<f64>,
    #[serde(rename = "platelets_x10_9_L")]
    pub platelets_x10_9_l: Option<f64>,
    #[serde(rename = "WBC_x10_9_L")]
    pub wbc_x10_9_l: Option<f64>,
    #[serde(rename = "INR")]
    pub inr: Option<f64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EndocrineInput {
    #[serde(rename = "HbA1c_percent")]
    pub hba1c_percent: Option<f64>,
    #[serde(rename = "TSH_mIU_L")]
    pub tsh_miu_l: Option<f64>,
    pub date: Option<NaiveDate>,
}
