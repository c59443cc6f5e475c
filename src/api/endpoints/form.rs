//! Form defaults endpoint.
//!
//! The page renders its inputs from this: the default record, the
//! starting element for each repeated group, and every enum's choices.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::form::{GroupCounts, PatientForm};
use crate::models::enums::{AlcoholStatus, PregnancyStatus, Route, Severity, Sex, SmokingStatus};
use crate::models::patient::{
    Allergy, Comorbidity, FamilyHistoryEntry, HistoryEntry, Medication, PatientRecord,
};

#[derive(Serialize)]
pub struct GroupTemplates {
    pub comorbidities: Comorbidity,
    pub medical_history: HistoryEntry,
    pub family_history: FamilyHistoryEntry,
    pub current_medications: Medication,
    pub allergies: Allergy,
}

#[derive(Serialize)]
pub struct Choices {
    pub sex: Vec<&'static str>,
    pub pregnancy_status: Vec<&'static str>,
    pub smoking_status: Vec<&'static str>,
    pub alcohol_status: Vec<&'static str>,
    pub severity: Vec<&'static str>,
    pub route: Vec<&'static str>,
}

#[derive(Serialize)]
pub struct FormDefaultsResponse {
    pub record: PatientRecord,
    pub counts: GroupCounts,
    pub templates: GroupTemplates,
    pub choices: Choices,
}

/// `GET /api/form/defaults`
pub async fn defaults(State(ctx): State<ApiContext>) -> Json<FormDefaultsResponse> {
    let defaults = ctx.defaults();
    let form = PatientForm::new(&defaults);

    Json(FormDefaultsResponse {
        record: form.build(),
        counts: defaults.counts,
        templates: GroupTemplates {
            comorbidities: form.comorbidities.template().clone(),
            medical_history: form.medical_history.template().clone(),
            family_history: form.family_history.template().clone(),
            current_medications: form.current_medications.template().clone(),
            allergies: form.allergies.template().clone(),
        },
        choices: Choices {
            sex: Sex::choices(),
            pregnancy_status: PregnancyStatus::choices(),
            smoking_status: SmokingStatus::choices(),
            alcohol_status: AlcoholStatus::choices(),
            severity: Severity::choices(),
            route: Route::choices(),
        },
    })
}
