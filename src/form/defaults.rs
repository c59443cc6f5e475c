use chrono::NaiveDate;
use serde::Serialize;

/// Sentinel dates used wherever the user does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefaultDates {
    pub onset: NaiveDate,
    pub diagnosed: NaiveDate,
    pub history: NaiveDate,
    pub medication_start: NaiveDate,
    pub proposed_start: NaiveDate,
    pub last_measured: NaiveDate,
}

/// Initial element count of each repeated group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupCounts {
    pub comorbidities: usize,
    pub medical_history: usize,
    pub family_history: usize,
    pub current_medications: usize,
    pub allergies: usize,
}

/// Caller-supplied defaults for a fresh form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDefaults {
    pub dates: DefaultDates,
    pub counts: GroupCounts,
    pub primary_description: String,
    pub proposed_drug_name: String,
}

impl FormDefaults {
    /// Clinic defaults: a 65-year-old with coronary artery disease being
    /// evaluated for rosuvastatin starting `today`.
    pub fn clinic(today: NaiveDate) -> Self {
        Self {
            dates: DefaultDates {
                onset: ymd(2022, 4, 15),
                diagnosed: ymd(2020, 1, 1),
                history: ymd(2020, 1, 1),
                medication_start: ymd(2021, 8, 1),
                proposed_start: today,
                last_measured: today,
            },
            counts: GroupCounts {
                comorbidities: 2,
                medical_history: 0,
                family_history: 0,
                current_medications: 2,
                allergies: 1,
            },
            primary_description:
                "Atherosclerotic heart disease of native coronary artery without angina pectoris"
                    .into(),
            proposed_drug_name: "Rosuvastatin".into(),
        }
    }

    /// Clinic defaults dated from the local calendar.
    pub fn clinic_today() -> Self {
        Self::clinic(chrono::Local::now().date_naive())
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
