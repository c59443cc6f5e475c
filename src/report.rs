//! Report builder: turns a validated `AssessmentResult` into the
//! display-ready view the form page renders.
//!
//! Everything the page shows is computed here (metrics, tables, chart
//! series, risk band) so presentation logic stays testable without a
//! browser. The page only lays the values out.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::assessment::{AssessmentResult, RiskBand};

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Headline numbers for the overall risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskMetrics {
    pub score_percent: f64,
    pub category: String,
    pub band: RiskBand,
    pub interpretation: String,
    pub description: Option<String>,
}

/// A generic table: ordered column names and one row per record.
///
/// Columns are the union of keys across all records, in first-seen
/// order. A record lacking a column gets `null` in that cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// One bar in a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Named series with the scale its values are drawn against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub max: f64,
    pub points: Vec<ChartPoint>,
}

/// Paired efficacy/safety bars for one alternative drug.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlternativePoint {
    pub name: String,
    pub efficacy_score: f64,
    pub safety_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCharts {
    pub systemic_risks: ChartSeries,
    pub comorbidity_impact: ChartSeries,
    pub alternatives: Vec<AlternativePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTables {
    pub systemic_risks: Table,
    pub comorbidity_impact: Table,
    pub drug_interactions: Table,
    pub special_population_warnings: Table,
    pub alternative_drugs: Table,
}

/// Everything the result panel needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub overall: RiskMetrics,
    pub tables: ReportTables,
    pub charts: ReportCharts,
    pub summary: String,
}

/// Upper bound of the 0–10 sub-scores.
const LEVEL_SCALE_MAX: f64 = 10.0;

// ═══════════════════════════════════════════════════════════
// Builders
// ═══════════════════════════════════════════════════════════

impl AssessmentReport {
    pub fn build(result: &AssessmentResult) -> Self {
        let overall = &result.overall_risk;
        let breakdown = &result.risk_breakdown;

        let systemic_records: Vec<Map<String, Value>> =
            breakdown.systemic_risks.iter().map(to_record).collect();
        let comorbidity_records: Vec<Map<String, Value>> =
            breakdown.comorbidity_impact.iter().map(to_record).collect();
        let alternative_records: Vec<Map<String, Value>> =
            result.alternative_drugs.iter().map(to_record).collect();

        Self {
            overall: RiskMetrics {
                score_percent: overall.score_percent,
                category: overall.category.clone(),
                band: overall.band(),
                interpretation: overall.interpretation.clone(),
                description: overall.description.clone(),
            },
            tables: ReportTables {
                systemic_risks: Table::from_records(&systemic_records),
                comorbidity_impact: Table::from_records(&comorbidity_records),
                drug_interactions: Table::from_records(&result.drug_interactions),
                special_population_warnings: Table::from_records(
                    &result.special_population_warnings,
                ),
                alternative_drugs: Table::from_records(&alternative_records),
            },
            charts: ReportCharts {
                systemic_risks: ChartSeries {
                    title: "Systemic risk level".into(),
                    max: LEVEL_SCALE_MAX,
                    points: breakdown
                        .systemic_risks
                        .iter()
                        .map(|r| ChartPoint {
                            label: r.category.clone(),
                            value: r.risk_level_num,
                        })
                        .collect(),
                },
                comorbidity_impact: ChartSeries {
                    title: "Comorbidity impact".into(),
                    max: LEVEL_SCALE_MAX,
                    points: breakdown
                        .comorbidity_impact
                        .iter()
                        .map(|c| ChartPoint {
                            label: c.comorbidity.clone(),
                            value: c.impact_level_num,
                        })
                        .collect(),
                },
                alternatives: result
                    .alternative_drugs
                    .iter()
                    .map(|a| AlternativePoint {
                        name: a.name.clone(),
                        efficacy_score: a.efficacy_score,
                        safety_score: a.safety_score,
                    })
                    .collect(),
            },
            summary: result.summary.clone(),
        }
    }
}

impl Table {
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Typed fields come first, then flattened extras in received order.
fn to_record<T: Serialize>(entry: &T) -> Map<String, Value> {
    match serde_json::to_value(entry) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
