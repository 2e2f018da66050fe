// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Equalization factor pipeline.
//!
//! Chains the workload-equalization factor (FECH) and the
//! day-coverage-equalization factor (FEDA) into a combined factor
//! (FECHDA), then applies it to the base-year enrollments (MECHDA).

use crate::overlap::{DayOverlap, calculate_day_overlap, inclusive_days};
use crate::types::{AnalysisPeriod, CycleRecord};
use serde::{Deserialize, Serialize};

/// Canonical yearly workload every cycle is equalized against.
pub const REFERENCE_WORKLOAD_HOURS: f64 = 800.0;

/// Cycles longer than this many days are annualized first.
pub const DAYS_PER_YEAR: i64 = 365;

/// A cycle that ended more than this many days before the period is stale.
pub const STALE_CYCLE_DAYS: i64 = 1095;

/// The factor chain of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EqualizationFactors {
    /// QTDC: cycle length in days, inclusive.
    #[serde(rename = "QTDC")]
    pub cycle_length_days: i64,
    /// CHMD: average daily workload.
    #[serde(rename = "CHMD")]
    pub daily_workload: f64,
    /// CHA: annualized workload.
    #[serde(rename = "CHA")]
    pub annualized_workload: f64,
    /// FECH: workload-equalization factor.
    #[serde(rename = "FECH")]
    pub workload_factor: f64,
    /// DACP1..DACP5.
    #[serde(flatten)]
    pub overlap: DayOverlap,
    /// Length of the analysis period in days.
    pub period_length_days: i64,
    /// FEDA: day-coverage-equalization factor.
    #[serde(rename = "FEDA")]
    pub coverage_factor: f64,
    /// FECHDA: combined equalization factor.
    #[serde(rename = "FECHDA")]
    pub combined_factor: f64,
    /// MECHDA: equalized base-year enrollments.
    #[serde(rename = "MECHDA")]
    pub equalized_enrollments: f64,
    /// Whether the stale-cycle rule zeroed the enrollments.
    pub stale: bool,
}

/// Runs the equalization pipeline for a cycle against a period.
///
/// Degenerate inputs never fail: a non-positive cycle length zeroes the
/// daily rate, and a non-positive period length zeroes the coverage factor.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
pub fn calculate_equalization_factors(
    cycle: &CycleRecord,
    period: &AnalysisPeriod,
) -> EqualizationFactors {
    let matrix_hours: f64 = f64::from(cycle.matrix_workload_hours);
    let cycle_hours: f64 = f64::from(cycle.cycle_workload_hours);

    let cycle_length_days: i64 = inclusive_days(cycle.cycle_start, cycle.cycle_end);

    let daily_workload: f64 = if cycle_length_days > 0 {
        f64::from(cycle.matrix_workload_hours.min(cycle.cycle_workload_hours))
            / cycle_length_days as f64
    } else {
        0.0
    };

    let (annualized_workload, workload_factor): (f64, f64) = if cycle_length_days > DAYS_PER_YEAR
    {
        let annualized: f64 = daily_workload * DAYS_PER_YEAR as f64;
        (annualized, annualized / REFERENCE_WORKLOAD_HOURS)
    } else {
        (matrix_hours, cycle_hours / REFERENCE_WORKLOAD_HOURS)
    };

    let overlap: DayOverlap = calculate_day_overlap(cycle.cycle_start, cycle.cycle_end, period);

    let period_length_days: i64 = period.length_days();
    let coverage_factor: f64 = if period_length_days > 0 {
        overlap.total() / period_length_days as f64
    } else {
        0.0
    };

    let combined_factor: f64 = workload_factor * coverage_factor;
    let enrollments: f64 = f64::from(cycle.base_year_enrollments);

    let mut stale: bool = false;
    let equalized_enrollments: f64 = if overlap.precedes_period == 0.0 {
        combined_factor * enrollments
    } else if (period.start() - cycle.cycle_end).whole_days() > STALE_CYCLE_DAYS {
        stale = true;
        0.0
    } else {
        combined_factor * (enrollments / 2.0)
    };

    EqualizationFactors {
        cycle_length_days,
        daily_workload,
        annualized_workload,
        workload_factor,
        overlap,
        period_length_days,
        coverage_factor,
        combined_factor,
        equalized_enrollments,
        stale,
    }
}
