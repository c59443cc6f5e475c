//! Request payload sent to the risk-scoring backend.
//!
//! Field names are the wire names. Optional fields serialize as `null`
//! rather than being omitted, and empty repeated groups as `[]`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{AlcoholStatus, PregnancyStatus, Route, Severity, Sex, SmokingStatus};
use super::lab::LabResults;

/// Root of the request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_info: PatientInfo,
    pub vitals: Vitals,
    pub primary_diagnosis: Diagnosis,
    pub comorbidities: Vec<Comorbidity>,
    pub medical_history: Vec<HistoryEntry>,
    pub family_history: Vec<FamilyHistoryEntry>,
    pub current_medications: Vec<Medication>,
    pub proposed_drug: Medication,
    pub lab_results: LabResults,
    pub allergies: Vec<Allergy>,
    pub lifestyle: Lifestyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    /// Years, 0–120.
    pub age: u8,
    pub sex: Sex,
    pub ethnicity: Option<String>,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub pregnancy_status: Option<PregnancyStatus>,
    pub smoking_status: SmokingStatus,
    pub pack_years: u32,
    pub alcohol_use: AlcoholUse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlcoholUse {
    pub status: AlcoholStatus,
    pub units_per_week: u32,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub blood_pressure: BloodPressure,
    pub heart_rate_bpm: u32,
    pub last_measured: NaiveDate,
}

/// mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub description: String,
    pub severity: Severity,
    pub onset_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comorbidity {
    pub description: String,
    pub severity: Severity,
    pub date_diagnosed: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyHistoryEntry {
    pub relation: String,
    pub condition: String,
    pub age_at_diagnosis: u32,
}

/// One medication entry. Also the shape of the proposed drug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dose_mg: f64,
    pub frequency_per_day: u32,
    pub route: Route,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergy {
    pub substance: String,
    pub reaction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifestyle {
    pub diet: String,
    pub exercise_frequency: String,
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::form::{FormDefaults, PatientForm};
    use proptest::prelude::*;
    use proptest::sample::select;

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (0u64..60_000).prop_map(|days| {
            NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Days::new(days)
        })
    }

    fn any_medication() -> impl Strategy<Value = Medication> {
        (".{0,24}", 0.0..5000.0f64, 0u32..24, select(Route::ALL), any_date()).prop_map(
            |(name, dose_mg, frequency_per_day, route, start_date)| Medication {
                name,
                dose_mg,
                frequency_per_day,
                route,
                start_date,
            },
        )
    }

    fn any_comorbidity() -> impl Strategy<Value = Comorbidity> {
        (".{0,24}", select(Severity::ALL), any_date()).prop_map(
            |(description, severity, date_diagnosed)| Comorbidity {
                description,
                severity,
                date_diagnosed,
            },
        )
    }

    fn any_record() -> impl Strategy<Value = PatientRecord> {
        (
            0u8..=120,
            select(Sex::ALL),
            proptest::option::of(".{0,16}"),
            0.0..400.0f64,
            proptest::option::of(select(PregnancyStatus::ALL)),
            proptest::option::of(".{0,16}"),
            proptest::collection::vec(any_comorbidity(), 0..4),
            proptest::collection::vec(any_medication(), 0..4),
            any_medication(),
            proptest::option::of(any_date()),
            0.0..1000.0f64,
        )
            .prop_map(
                |(
                    age,
                    sex,
                    ethnicity,
                    weight_kg,
                    pregnancy_status,
                    alcohol_kind,
                    comorbidities,
                    current_medications,
                    proposed_drug,
                    lipid_date,
                    egfr,
                )| {
                    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
                    let mut record = PatientForm::new(&FormDefaults::clinic(today)).build();
                    record.patient_info.age = age;
                    record.patient_info.sex = sex;
                    record.patient_info.ethnicity = ethnicity;
                    record.patient_info.weight_kg = weight_kg;
                    record.patient_info.pregnancy_status = pregnancy_status;
                    record.patient_info.alcohol_use.kind = alcohol_kind;
                    record.comorbidities = comorbidities;
                    record.current_medications = current_medications;
                    record.proposed_drug = proposed_drug;
                    record.lab_results.lipid_panel.date = lipid_date;
                    record.lab_results.metabolic_panel.egfr = egfr;
                    record
                },
            )
    }

    proptest! {
        /// Serialize then parse yields an equal record
        #[test]
        fn any_record_round_trips(record in any_record()) {
            let json = serde_json::to_string(&record).unwrap();
            let parsed: PatientRecord = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(parsed, record);
        }

        /// Groups serialize with exactly their length, optionals as keys
        #[test]
        fn any_record_keeps_shape(record in any_record()) {
            let json = serde_json::to_value(&record).unwrap();
            prop_assert_eq!(
                json["current_medications"].as_array().map(Vec::len),
                Some(record.current_medications.len())
            );
            prop_assert_eq!(
                json["comorbidities"].as_array().map(Vec::len),
                Some(record.comorbidities.len())
            );
            let info = json["patient_info"].as_object().unwrap();
            prop_assert!(info.contains_key("ethnicity"));
            prop_assert!(info.contains_key("pregnancy_status"));
            prop_assert!(json["lab_results"]["lipid_panel"].as_object().unwrap().contains_key("date"));
        }
    }
}
