// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-record, single-year calculation.
//!
//! Runs every stage in order (equalization, financing, eligibility) and
//! returns the full chain so callers can audit how the headline value
//! was reached. The calculation is a pure function of its inputs.

use crate::eligibility::{HeadlineResult, apply_eligibility_gate};
use crate::equalization::{EqualizationFactors, calculate_equalization_factors};
use crate::financing::{FinancingOutcome, dispatch_financing};
use crate::types::{AnalysisPeriod, CycleRecord};
use crate::validation::validate_cycle_dates;
use serde::{Deserialize, Serialize};
use time::Date;

/// A non-fatal condition found while calculating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationWarning {
    /// The cycle does not end after it starts.
    CycleEndNotAfterStart {
        /// Cycle start date.
        cycle_start: Date,
        /// Cycle end date.
        cycle_end: Date,
    },
    /// The financing modality was not recognized; the total is zero.
    UnrecognizedFinancingModality,
}

impl std::fmt::Display for CalculationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CycleEndNotAfterStart {
                cycle_start,
                cycle_end,
            } => {
                write!(
                    f,
                    "Cycle end date {cycle_end} must be after cycle start date {cycle_start}"
                )
            }
            Self::UnrecognizedFinancingModality => {
                write!(f, "Financing modality not recognized; total set to zero")
            }
        }
    }
}

/// The complete result of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleCalculation {
    /// The period the cycle was measured against.
    pub period: AnalysisPeriod,
    /// CHM actually used.
    pub matrix_workload_hours: u32,
    /// CHM the rule table suggests for this record.
    pub suggested_matrix_workload_hours: u32,
    /// QTM used.
    pub base_year_enrollments: u32,
    /// The equalization chain (QTDC through MECHDA).
    pub factors: EqualizationFactors,
    /// The financing stage (MP, BA, CMTD25/CMTD80, MT).
    pub financing: FinancingOutcome,
    /// The headline value after the eligibility gate.
    pub result: HeadlineResult,
    /// Non-fatal conditions found along the way.
    pub warnings: Vec<CalculationWarning>,
}

impl CycleCalculation {
    /// Returns the computed total (MT) before the eligibility gate.
    #[must_use]
    pub const fn total(&self) -> f64 {
        self.financing.total
    }

    /// Returns how many total enrollments each base-year enrollment is
    /// worth, or `None` when there are no base-year enrollments.
    #[must_use]
    pub fn per_enrollment(&self) -> Option<f64> {
        (self.base_year_enrollments > 0)
            .then(|| self.result.value / f64::from(self.base_year_enrollments))
    }
}

/// Calculates the total-enrollment equivalence of a cycle for a period.
///
/// Never fails: malformed business input degrades to defaults and zeros,
/// and the conditions found are reported as warnings.
///
/// # Arguments
///
/// * `cycle` - The cycle inputs
/// * `period` - The analysis period
#[must_use]
pub fn calculate_cycle(cycle: &CycleRecord, period: &AnalysisPeriod) -> CycleCalculation {
    let mut warnings: Vec<CalculationWarning> = validate_cycle_dates(cycle);

    let factors: EqualizationFactors = calculate_equalization_factors(cycle, period);

    let financing: FinancingOutcome = dispatch_financing(
        factors.equalized_enrollments,
        cycle.course_weight,
        cycle.is_agricultural,
        cycle.financing_modality,
    );
    if cycle.financing_modality.is_none() {
        warnings.push(CalculationWarning::UnrecognizedFinancingModality);
    }

    let result: HeadlineResult = apply_eligibility_gate(financing.total, cycle.is_eligible);

    CycleCalculation {
        period: *period,
        matrix_workload_hours: cycle.matrix_workload_hours,
        suggested_matrix_workload_hours: cycle.suggested_matrix_workload(),
        base_year_enrollments: cycle.base_year_enrollments,
        factors,
        financing,
        result,
        warnings,
    }
}
