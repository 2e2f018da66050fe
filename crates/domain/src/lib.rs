// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::cargo_common_metadata)]

mod calculation;
mod eligibility;
mod equalization;
mod error;
mod financing;
mod matrix_workload;
mod overlap;
pub mod record;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calculation::{CalculationWarning, CycleCalculation, calculate_cycle};
pub use eligibility::{HeadlineResult, ResultStatus, apply_eligibility_gate};
pub use equalization::{
    DAYS_PER_YEAR, EqualizationFactors, REFERENCE_WORKLOAD_HOURS, STALE_CYCLE_DAYS,
    calculate_equalization_factors,
};
pub use error::DomainError;
pub use financing::{
    AGRICULTURAL_BONUS_RATE, FinancingOutcome, REMOTE_EXTERNAL_RATE, REMOTE_OWN_RATE,
    dispatch_financing,
};
pub use matrix_workload::{PROEJA_MATRIX_WORKLOAD, resolve_matrix_workload};
pub use overlap::{DayOverlap, calculate_day_overlap, inclusive_days};
pub use record::{FieldValue, RawRecord};
pub use types::{AnalysisPeriod, CycleRecord, DEFAULT_COURSE_WEIGHT, FinancingModality};
pub use validation::{validate_analysis_year, validate_cycle_dates};
