// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use mt_calc_domain::{CycleCalculation, EqualizationFactors, FinancingModality, HeadlineResult};
use serde::{Deserialize, Serialize};

const fn default_eligible() -> bool {
    true
}

/// API request for a calculation with every input supplied explicitly.
///
/// Dates are text in any accepted day-first or ISO form. A missing date
/// defaults to the current day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualCalculationRequest {
    /// Cycle start date (DIC).
    #[serde(default)]
    pub cycle_start: Option<String>,
    /// Cycle end date (DTC).
    #[serde(default)]
    pub cycle_end: Option<String>,
    /// Cycle workload hours (CHC).
    #[serde(default)]
    pub cycle_workload_hours: u32,
    /// Catalog workload hours (CHMC).
    #[serde(default)]
    pub catalog_workload_hours: u32,
    /// Matrix workload hours (CHM). Derived from the course when absent.
    #[serde(default)]
    pub matrix_workload_hours: Option<u32>,
    /// Course weight (PC). Defaults to 1.0.
    #[serde(default)]
    pub course_weight: Option<f64>,
    /// Base-year enrollments (QTM).
    #[serde(default)]
    pub base_year_enrollments: u32,
    /// Course type classifier.
    #[serde(default)]
    pub course_type: Option<String>,
    /// Offering type classifier.
    #[serde(default)]
    pub offering_type: Option<String>,
    /// Financing modality code. Defaults to on-site.
    #[serde(default)]
    pub financing_modality: Option<String>,
    /// Whether the course is an agricultural course.
    #[serde(default)]
    pub is_agricultural: bool,
    /// Whether the cycle is eligible.
    #[serde(default = "default_eligible")]
    pub is_eligible: bool,
    /// Analysis year. Required.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Per-field edits applied on top of a record before calculating.
///
/// Unset fields keep the record's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleOverrides {
    /// Cycle start date (DIC).
    #[serde(default)]
    pub cycle_start: Option<String>,
    /// Cycle end date (DTC).
    #[serde(default)]
    pub cycle_end: Option<String>,
    /// Cycle workload hours (CHC).
    #[serde(default)]
    pub cycle_workload_hours: Option<u32>,
    /// Catalog workload hours (CHMC).
    #[serde(default)]
    pub catalog_workload_hours: Option<u32>,
    /// Matrix workload hours (CHM).
    #[serde(default)]
    pub matrix_workload_hours: Option<u32>,
    /// Course weight (PC).
    #[serde(default)]
    pub course_weight: Option<f64>,
    /// Base-year enrollments (QTM).
    #[serde(default)]
    pub base_year_enrollments: Option<u32>,
    /// Financing modality code.
    #[serde(default)]
    pub financing_modality: Option<String>,
    /// Whether the course is an agricultural course.
    #[serde(default)]
    pub is_agricultural: Option<bool>,
    /// Whether the cycle is eligible.
    #[serde(default)]
    pub is_eligible: Option<bool>,
}

/// API request for a calculation over a raw source record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordCalculationRequest {
    /// The record, keyed by the labels of its source.
    pub record: serde_json::Map<String, serde_json::Value>,
    /// Edits applied on top of the record.
    #[serde(default)]
    pub overrides: CycleOverrides,
    /// Analysis year. Required.
    #[serde(default)]
    pub year: Option<i32>,
}

/// API response for a calculation.
///
/// Values are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// The headline value and its eligibility tag.
    pub result: HeadlineResult,
    /// MT before the eligibility gate.
    pub mt: f64,
    /// CMTD25, for externally funded remote courses.
    pub cmtd25: Option<f64>,
    /// CMTD80, for self-funded remote courses.
    pub cmtd80: Option<f64>,
    /// The modality used. `None` when the requested code was unrecognized.
    pub financing_modality: Option<FinancingModality>,
    /// CHM used in the calculation.
    pub matrix_workload_hours: u32,
    /// CHM suggested by the course and offering types.
    pub suggested_matrix_workload_hours: u32,
    /// QTDC through MECHDA.
    pub factors: EqualizationFactors,
    /// MP: weighted enrollments.
    #[serde(rename = "MP")]
    pub weighted_enrollments: f64,
    /// BA: agricultural bonus.
    #[serde(rename = "BA")]
    pub agricultural_bonus: f64,
    /// Analysis year.
    pub year: i32,
    /// First day of the analysis period (ISO 8601).
    pub period_start: String,
    /// Last day of the analysis period (ISO 8601).
    pub period_end: String,
    /// Total enrollments each base-year enrollment is worth.
    pub per_enrollment: Option<f64>,
    /// Non-fatal conditions found while calculating.
    pub warnings: Vec<String>,
}

impl From<&CycleCalculation> for CalculationResponse {
    fn from(calculation: &CycleCalculation) -> Self {
        Self {
            result: calculation.result,
            mt: calculation.total(),
            cmtd25: calculation.financing.remote_external_value,
            cmtd80: calculation.financing.remote_own_value,
            financing_modality: calculation.financing.modality,
            matrix_workload_hours: calculation.matrix_workload_hours,
            suggested_matrix_workload_hours: calculation.suggested_matrix_workload_hours,
            factors: calculation.factors,
            weighted_enrollments: calculation.financing.weighted_enrollments,
            agricultural_bonus: calculation.financing.agricultural_bonus,
            year: calculation.period.year(),
            period_start: calculation.period.start().to_string(),
            period_end: calculation.period.end().to_string(),
            per_enrollment: calculation.per_enrollment(),
            warnings: calculation
                .warnings
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// API response for a calculation over one row of an imported table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCalculationResponse {
    /// The row calculated.
    pub row_number: usize,
    /// Standardized course name of the row.
    pub course_name: String,
    /// The calculation.
    pub calculation: CalculationResponse,
}
