//! Per-field numeric bounds.
//!
//! Out-of-range entry is clamped into range, never rejected.

use crate::models::patient::PatientRecord;

/// Inclusive bounds for an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn at_least(min: i64) -> Self {
        Self::new(min, u32::MAX as i64)
    }

    pub fn clamp(self, value: i64) -> u32 {
        value.clamp(self.min, self.max) as u32
    }
}

/// Inclusive bounds for a floating-point field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatRange {
    pub min: f64,
    pub max: f64,
}

impl FloatRange {
    pub const fn at_least(min: f64) -> Self {
        Self { min, max: f64::MAX }
    }

    /// NaN and infinities fall back to `min`; `-0.0` becomes `min`.
    pub fn clamp(self, value: f64) -> f64 {
        if !value.is_finite() || value <= self.min {
            self.min
        } else if value >= self.max {
            self.max
        } else {
            value
        }
    }
}

pub const AGE: IntRange = IntRange::new(0, 120);
pub const PACK_YEARS: IntRange = IntRange::at_least(0);
pub const ALCOHOL_UNITS_PER_WEEK: IntRange = IntRange::at_least(0);
pub const BLOOD_PRESSURE: IntRange = IntRange::at_least(0);
pub const HEART_RATE_BPM: IntRange = IntRange::at_least(0);
pub const FREQUENCY_PER_DAY: IntRange = IntRange::at_least(0);
pub const AGE_AT_DIAGNOSIS: IntRange = IntRange::at_least(0);

pub const WEIGHT_KG: FloatRange = FloatRange::at_least(0.0);
pub const HEIGHT_CM: FloatRange = FloatRange::at_least(0.0);
pub const DOSE_MG: FloatRange = FloatRange::at_least(0.0);
pub const LAB_VALUE: FloatRange = FloatRange::at_least(0.0);

/// Re-apply every bound to an assembled record.
///
/// Unsigned fields are already non-negative; this covers the float
/// fields and the age ceiling, whichever way the record was edited.
pub fn clamp_record(record: &mut PatientRecord) {
    let info = &mut record.patient_info;
    info.age = AGE.clamp(i64::from(info.age)) as u8;
    info.weight_kg = WEIGHT_KG.clamp(info.weight_kg);
    info.height_cm = HEIGHT_CM.clamp(info.height_cm);

    for med in record
        .current_medications
        .iter_mut()
        .chain(std::iter::once(&mut record.proposed_drug))
    {
        med.dose_mg = DOSE_MG.clamp(med.dose_mg);
    }

    let labs = &mut record.lab_results;
    for value in [
        &mut labs.lipid_panel.total_cholesterol_mg_dl,
        &mut labs.lipid_panel.ldl_mg_dl,
        &mut labs.lipid_panel.hdl_mg_dl,
        &mut labs.lipid_panel.triglycerides_mg_dl,
        &mut labs.metabolic_panel.egfr,
        &mut labs.metabolic_panel.creatinine_umol_l,
        &mut labs.metabolic_panel.alt_u_l,
        &mut labs.metabolic_panel.ast_u_l,
        &mut labs.metabolic_panel.potassium_mmol_l,
        &mut labs.metabolic_panel.sodium_mmol_l,
        &mut labs.metabolic_panel.glucose_mg_dl,
        &mut labs.hematology.hemoglobin_g_dl,
        &mut labs.hematology.platelets_x10_9_l,
        &mut labs.hematology.wbc_x10_9_l,
        &mut labs.hematology.inr,
        &mut labs.endocrine.hba1c_percent,
        &mut labs.endocrine.tsh_miu_l,
    ] {
        *value = LAB_VALUE.clamp(*value);
    }
}
