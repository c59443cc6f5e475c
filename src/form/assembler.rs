//! Editable form state that assembles one `PatientRecord`.

use chrono::NaiveDate;

use super::constraints::{self, clamp_record};
use super::defaults::FormDefaults;
use super::group::RepeatedGroup;
use super::submission::*;
use crate::models::enums::{AlcoholStatus, PregnancyStatus, Route, Severity, Sex, SmokingStatus};
use crate::models::lab::{Endocrine, Hematology, LabResults, LipidPanel, MetabolicPanel};
use crate::models::patient::*;

/// Form state for one submission. Numeric setters clamp into the
/// declared bounds; repeated groups grow and shrink independently.
#[derive(Debug, Clone)]
pub struct PatientForm {
    info: PatientInfo,
    vitals: Vitals,
    primary_diagnosis: Diagnosis,
    pub comorbidities: RepeatedGroup<Comorbidity>,
    pub medical_history: RepeatedGroup<HistoryEntry>,
    pub family_history: RepeatedGroup<FamilyHistoryEntry>,
    pub current_medications: RepeatedGroup<Medication>,
    proposed_drug: Medication,
    lab_results: LabResults,
    pub allergies: RepeatedGroup<Allergy>,
    lifestyle: Lifestyle,
}

impl PatientForm {
    pub fn new(defaults: &FormDefaults) -> Self {
        let dates = &defaults.dates;
        let counts = &defaults.counts;

        Self {
            info: PatientInfo {
                age: 65,
                sex: Sex::Male,
                ethnicity: None,
                weight_kg: 78.0,
                height_cm: 175.0,
                pregnancy_status: None,
                smoking_status: SmokingStatus::Never,
                pack_years: 0,
                alcohol_use: AlcoholUse {
                    status: AlcoholStatus::Yes,
                    units_per_week: 5,
                    kind: None,
                },
            },
            vitals: Vitals {
                blood_pressure: BloodPressure {
                    systolic: 130,
                    diastolic: 80,
                },
                heart_rate_bpm: 72,
                last_measured: dates.last_measured,
            },
            primary_diagnosis: Diagnosis {
                description: defaults.primary_description.clone(),
                severity: Severity::Moderate,
                onset_date: dates.onset,
            },
            comorbidities: RepeatedGroup::new(
                Comorbidity {
                    description: String::new(),
                    severity: Severity::Mild,
                    date_diagnosed: dates.diagnosed,
                },
                counts.comorbidities,
            ),
            medical_history: RepeatedGroup::new(
                HistoryEntry {
                    description: String::new(),
                    date: dates.history,
                },
                counts.medical_history,
            ),
            family_history: RepeatedGroup::new(
                FamilyHistoryEntry {
                    relation: String::new(),
                    condition: String::new(),
                    age_at_diagnosis: 0,
                },
                counts.family_history,
            ),
            current_medications: RepeatedGroup::new(
                Medication {
                    name: String::new(),
                    dose_mg: 0.0,
                    frequency_per_day: 0,
                    route: Route::Oral,
                    start_date: dates.medication_start,
                },
                counts.current_medications,
            ),
            proposed_drug: Medication {
                name: defaults.proposed_drug_name.clone(),
                dose_mg: 10.0,
                frequency_per_day: 1,
                route: Route::Oral,
                start_date: dates.proposed_start,
            },
            lab_results: LabResults {
                lipid_panel: LipidPanel {
                    total_cholesterol_mg_dl: 200.0,
                    ldl_mg_dl: 130.0,
                    hdl_mg_dl: 45.0,
                    triglycerides_mg_dl: 150.0,
                    date: None,
                },
                metabolic_panel: MetabolicPanel {
                    egfr: 45.0,
                    creatinine_umol_l: 150.0,
                    alt_u_l: 35.0,
                    ast_u_l: 40.0,
                    potassium_mmol_l: 4.5,
                    sodium_mmol_l: 140.0,
                    glucose_mg_dl: 100.0,
                    date: None,
                },
                hematology: Hematology {
                    hemoglobin_g_dl: 14.2,
                    platelets_x10_9_l: 210.0,
                    wbc_x10_9_l: 7.0,
                    inr: 1.0,
                    date: None,
                },
                endocrine: Endocrine {
                    hba1c_percent: 5.7,
                    tsh_miu_l: 2.0,
                    date: None,
                },
            },
            allergies: RepeatedGroup::new(
                Allergy {
                    substance: String::new(),
                    reaction: String::new(),
                },
                counts.allergies,
            ),
            lifestyle: Lifestyle {
                diet: String::new(),
                exercise_frequency: String::new(),
            },
        }
    }

    // ── Patient info ────────────────────────────────────────

    pub fn set_age(&mut self, age: i64) {
        self.info.age = constraints::AGE.clamp(age) as u8;
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.info.sex = sex;
    }

    /// Blank text clears the field.
    pub fn set_ethnicity(&mut self, ethnicity: Option<String>) {
        self.info.ethnicity = non_blank(ethnicity);
    }

    pub fn set_weight_kg(&mut self, kg: f64) {
        self.info.weight_kg = constraints::WEIGHT_KG.clamp(kg);
    }

    pub fn set_height_cm(&mut self, cm: f64) {
        self.info.height_cm = constraints::HEIGHT_CM.clamp(cm);
    }

    pub fn set_pregnancy_status(&mut self, status: Option<PregnancyStatus>) {
        self.info.pregnancy_status = status;
    }

    pub fn set_smoking_status(&mut self, status: SmokingStatus) {
        self.info.smoking_status = status;
    }

    pub fn set_pack_years(&mut self, years: i64) {
        self.info.pack_years = constraints::PACK_YEARS.clamp(years);
    }

    pub fn set_alcohol_status(&mut self, status: AlcoholStatus) {
        self.info.alcohol_use.status = status;
    }

    pub fn set_alcohol_units_per_week(&mut self, units: i64) {
        self.info.alcohol_use.units_per_week = constraints::ALCOHOL_UNITS_PER_WEEK.clamp(units);
    }

    pub fn set_alcohol_type(&mut self, kind: Option<String>) {
        self.info.alcohol_use.kind = non_blank(kind);
    }

    // ── Vitals ──────────────────────────────────────────────

    pub fn set_blood_pressure(&mut self, systolic: i64, diastolic: i64) {
        self.vitals.blood_pressure = BloodPressure {
            systolic: constraints::BLOOD_PRESSURE.clamp(systolic),
            diastolic: constraints::BLOOD_PRESSURE.clamp(diastolic),
        };
    }

    pub fn set_heart_rate_bpm(&mut self, bpm: i64) {
        self.vitals.heart_rate_bpm = constraints::HEART_RATE_BPM.clamp(bpm);
    }

    pub fn set_last_measured(&mut self, date: NaiveDate) {
        self.vitals.last_measured = date;
    }

    // ── Diagnosis, proposed drug, lifestyle ─────────────────

    pub fn set_primary_diagnosis(&mut self, description: String, severity: Severity) {
        self.primary_diagnosis.description = description;
        self.primary_diagnosis.severity = severity;
    }

    pub fn set_onset_date(&mut self, date: NaiveDate) {
        self.primary_diagnosis.onset_date = date;
    }

    pub fn proposed_drug(&self) -> &Medication {
        &self.proposed_drug
    }

    pub fn set_lifestyle(&mut self, diet: String, exercise_frequency: String) {
        self.lifestyle = Lifestyle {
            diet,
            exercise_frequency,
        };
    }

    pub fn lab_results_mut(&mut self) -> &mut LabResults {
        &mut self.lab_results
    }

    // ── Submission ──────────────────────────────────────────

    /// Apply browser-submitted values. Absent fields keep their current
    /// value; submitted groups are resized to the submitted length.
    pub fn apply(&mut self, submission: FormSubmission) {
        self.apply_patient_info(submission.patient_info);
        self.apply_vitals(submission.vitals);

        let diagnosis = submission.primary_diagnosis;
        if let Some(description) = diagnosis.description {
            self.primary_diagnosis.description = description;
        }
        if let Some(severity) = diagnosis.severity {
            self.primary_diagnosis.severity = severity;
        }
        if let Some(date) = diagnosis.onset_date {
            self.set_onset_date(date);
        }

        apply_group(&mut self.comorbidities, submission.comorbidities, |item, input| {
            set_if(&mut item.description, input.description);
            set_if(&mut item.severity, input.severity);
            set_if(&mut item.date_diagnosed, input.date_diagnosed);
        });
        apply_group(&mut self.medical_history, submission.medical_history, |item, input| {
            set_if(&mut item.description, input.description);
            set_if(&mut item.date, input.date);
        });
        apply_group(&mut self.family_history, submission.family_history, |item, input| {
            set_if(&mut item.relation, input.relation);
            set_if(&mut item.condition, input.condition);
            if let Some(age) = input.age_at_diagnosis {
                item.age_at_diagnosis = constraints::AGE_AT_DIAGNOSIS.clamp(age);
            }
        });
        apply_group(
            &mut self.current_medications,
            submission.current_medications,
            apply_medication,
        );
        apply_medication(&mut self.proposed_drug, submission.proposed_drug);
        apply_group(&mut self.allergies, submission.allergies, |item, input| {
            set_if(&mut item.substance, input.substance);
            set_if(&mut item.reaction, input.reaction);
        });

        apply_labs(&mut self.lab_results, submission.lab_results);

        set_if(&mut self.lifestyle.diet, submission.lifestyle.diet);
        set_if(
            &mut self.lifestyle.exercise_frequency,
            submission.lifestyle.exercise_frequency,
        );
    }

    fn apply_patient_info(&mut self, input: PatientInfoInput) {
        if let Some(age) = input.age {
            self.set_age(age);
        }
        set_if(&mut self.info.sex, input.sex);
        self.set_ethnicity(input.ethnicity);
        if let Some(kg) = input.weight_kg {
            self.set_weight_kg(kg);
        }
        if let Some(cm) = input.height_cm {
            self.set_height_cm(cm);
        }
        self.set_pregnancy_status(input.pregnancy_status);
        set_if(&mut self.info.smoking_status, input.smoking_status);
        if let Some(years) = input.pack_years {
            self.set_pack_years(years);
        }

        let alcohol = input.alcohol_use;
        set_if(&mut self.info.alcohol_use.status, alcohol.status);
        if let Some(units) = alcohol.units_per_week {
            self.set_alcohol_units_per_week(units);
        }
        self.set_alcohol_type(alcohol.kind);
    }

    fn apply_vitals(&mut self, input: VitalsInput) {
        let current = self.vitals.blood_pressure;
        let systolic = input
            .blood_pressure
            .systolic
            .unwrap_or(i64::from(current.systolic));
        let diastolic = input
            .blood_pressure
            .diastolic
            .unwrap_or(i64::from(current.diastolic));
        self.set_blood_pressure(systolic, diastolic);

        if let Some(bpm) = input.heart_rate_bpm {
            self.set_heart_rate_bpm(bpm);
        }
        if let Some(date) = input.last_measured {
            self.set_last_measured(date);
        }
    }

    /// Assemble the record. Every numeric bound is re-applied so the
    /// output never falls outside range, whatever was edited directly.
    pub fn build(&self) -> PatientRecord {
        let mut record = PatientRecord {
            patient_info: self.info.clone(),
            vitals: self.vitals.clone(),
            primary_diagnosis: self.primary_diagnosis.clone(),
            comorbidities: self.comorbidities.to_vec(),
            medical_history: self.medical_history.to_vec(),
            family_history: self.family_history.to_vec(),
            current_medications: self.current_medications.to_vec(),
            proposed_drug: self.proposed_drug.clone(),
            lab_results: self.lab_results.clone(),
            allergies: self.allergies.to_vec(),
            lifestyle: self.lifestyle.clone(),
        };
        clamp_record(&mut record);
        record
    }
}

/// Build a record from defaults plus one browser submission.
pub fn assemble(defaults: &FormDefaults, submission: FormSubmission) -> PatientRecord {
    let mut form = PatientForm::new(defaults);
    form.apply(submission);
    form.build()
}

fn apply_group<T: Clone, I>(
    group: &mut RepeatedGroup<T>,
    inputs: Option<Vec<I>>,
    apply: impl Fn(&mut T, I),
) {
    let Some(inputs) = inputs else {
        return;
    };
    group.resize(inputs.len());
    for (item, input) in group.iter_mut().zip(inputs) {
        apply(item, input);
    }
}

fn apply_medication(med: &mut Medication, input: MedicationInput) {
    set_if(&mut med.name, input.name);
    if let Some(dose) = input.dose_mg {
        med.dose_mg = constraints::DOSE_MG.clamp(dose);
    }
    if let Some(freq) = input.frequency_per_day {
        med.frequency_per_day = constraints::FREQUENCY_PER_DAY.clamp(freq);
    }
    set_if(&mut med.route, input.route);
    set_if(&mut med.start_date, input.start_date);
}

fn apply_labs(labs: &mut LabResults, input: LabResultsInput) {
    let lab = |slot: &mut f64, value: Option<f64>| {
        if let Some(v) = value {
            *slot = constraints::LAB_VALUE.clamp(v);
        }
    };

    let lipid = input.lipid_panel;
    let panel = &mut labs.lipid_panel;
    lab(&mut panel.total_cholesterol_mg_dl, lipid.total_cholesterol_mg_dl);
    lab(&mut panel.ldl_mg_dl, lipid.ldl_mg_dl);
    lab(&mut panel.hdl_mg_dl, lipid.hdl_mg_dl);
    lab(&mut panel.triglycerides_mg_dl, lipid.triglycerides_mg_dl);
    panel.date = lipid.date.or(panel.date);

    let metabolic = input.metabolic_panel;
    let panel = &mut labs.metabolic_panel;
    lab(&mut panel.egfr, metabolic.egfr);
    lab(&mut panel.creatinine_umol_l, metabolic.creatinine_umol_l);
    lab(&mut panel.alt_u_l, metabolic.alt_u_l);
    lab(&mut panel.ast_u_l, metabolic.ast_u_l);
    lab(&mut panel.potassium_mmol_l, metabolic.potassium_mmol_l);
    lab(&mut panel.sodium_mmol_l, metabolic.sodium_mmol_l);
    lab(&mut panel.glucose_mg_dl, metabolic.glucose_mg_dl);
    panel.date = metabolic.date.or(panel.date);

    let hematology = input.hematology;
    let panel = &mut labs.hematology;
    lab(&mut panel.hemoglobin_g_dl, hematology.hemoglobin_g_dl);
    lab(&mut panel.platelets_x10_9_l, hematology.platelets_x10_9_l);
    lab(&mut panel.wbc_x10_9_l, hematology.wbc_x10_9_l);
    lab(&mut panel.inr, hematology.inr);
    panel.date = hematology.date.or(panel.date);

    let endocrine = input.endocrine;
    let panel = &mut labs.endocrine;
    lab(&mut panel.hba1c_percent, endocrine.hba1c_percent);
    lab(&mut panel.tsh_miu_l, endocrine.tsh_miu_l);
    panel.date = endocrine.date.or(panel.date);
}

fn set_if<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
