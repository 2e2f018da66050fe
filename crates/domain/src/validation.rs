// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calculation::CalculationWarning;
use crate::error::DomainError;
use crate::types::CycleRecord;

/// Checks the cycle dates of a record.
///
/// A cycle that does not end after it starts is reported as a warning;
/// the calculation still proceeds with the values as given.
///
/// # Arguments
///
/// * `cycle` - The cycle record to check
///
/// # Returns
///
/// The warnings found, possibly none.
#[must_use]
pub fn validate_cycle_dates(cycle: &CycleRecord) -> Vec<CalculationWarning> {
    let mut warnings: Vec<CalculationWarning> = Vec::new();

    if cycle.cycle_end <= cycle.cycle_start {
        warnings.push(CalculationWarning::CycleEndNotAfterStart {
            cycle_start: cycle.cycle_start,
            cycle_end: cycle.cycle_end,
        });
    }

    warnings
}

/// Validates that an analysis year lies in the accepted range.
///
/// # Arguments
///
/// * `year` - The year to validate
/// * `min` - The smallest accepted year (inclusive)
/// * `max` - The largest accepted year (inclusive)
///
/// # Errors
///
/// Returns an error if the year is outside `min..=max`.
pub fn validate_analysis_year(year: i32, min: i32, max: i32) -> Result<(), DomainError> {
    if !(min..=max).contains(&year) {
        return Err(DomainError::AnalysisYearOutOfRange { year, min, max });
    }
    Ok(())
}
