use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lab results grouped into panels. Wire names are literal and
/// case-sensitive (`eGFR`, `ALT_U_L`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabResults {
    pub lipid_panel: LipidPanel,
    pub metabolic_panel: MetabolicPanel,
    pub hematology: Hematology,
    pub endocrine: Endocrine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LipidPanel {
    #[serde(rename = "total_cholesterol_mg_dL")]
    pub total_cholesterol_mg_dl: f64,
    #[serde(rename = "LDL_mg_dL")]
    pub ldl_mg_dl: f64,
    #[serde(rename = "HDL_mg_dL")]
    pub hdl_mg_dl: f64,
    #[serde(rename = "triglycerides_mg_dL")]
    pub triglycerides_mg_dl: f64,
    /// Panel draw date.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicPanel {
    #[serde(rename = "eGFR")]
    pub egfr: f64,
    #[serde(rename = "creatinine_umol_L")]
    pub creatinine_umol_l: f64,
    #[serde(rename = "ALT_U_L")]
    pub alt_u_l: f64,
    #[serde(rename = "AST_U_L")]
    pub ast_u_l: f64,
    #[serde(rename = "potassium_mmol_L")]
    pub potassium_mmol_l: f64,
    #[serde(rename = "sodium_mmol_L")]
    pub sodium_mmol_l: f64,
    #[serde(rename = "glucose_mg_dL")]
    pub glucose_mg_dl: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hematology {
    #[serde(rename = "hemoglobin_g_dL")]
    pub hemoglobin_g_dl: f64,
    #[serde(rename = "platelets_x10_9_L")]
    pub platelets_x10_9_l: f64,
    #[serde(rename = "WBC_x10_9_L")]
    pub wbc_x10_9_l: f64,
    #[serde(rename = "INR")]
    pub inr: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endocrine {
    #[serde(rename = "HbA1c_percent")]
    pub hba1c_percent: f64,
    #[serde(rename = "TSH_mIU_L")]
    pub tsh_miu_l: f64,
    pub date: Option<NaiveDate>,
}
