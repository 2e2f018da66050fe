// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Accepted analysis years.

use mt_calc_domain::{AnalysisPeriod, validate_analysis_year};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, translate_domain_error};

/// Smallest analysis year accepted by default.
pub const DEFAULT_MIN_YEAR: i32 = 2020;

/// Largest analysis year accepted by default.
pub const DEFAULT_MAX_YEAR: i32 = 2031;

/// Year offered to callers before they pick one.
pub const DEFAULT_ANALYSIS_YEAR: i32 = 2024;

/// The range of analysis years a deployment accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPolicy {
    /// Smallest accepted year (inclusive).
    pub min_year: i32,
    /// Largest accepted year (inclusive).
    pub max_year: i32,
    /// Year offered as the initial selection.
    pub default_year: i32,
}

impl Default for YearPolicy {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            max_year: DEFAULT_MAX_YEAR,
            default_year: DEFAULT_ANALYSIS_YEAR,
        }
    }
}

impl YearPolicy {
    /// Creates a year policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or the default year lies
    /// outside it.
    pub fn new(min_year: i32, max_year: i32, default_year: i32) -> Result<Self, ApiError> {
        if min_year > max_year {
            return Err(ApiError::InvalidInput {
                field: String::from("min_year"),
                message: format!("Minimum year {min_year} is after maximum year {max_year}"),
            });
        }
        validate_analysis_year(default_year, min_year, max_year).map_err(|_| {
            ApiError::InvalidInput {
                field: String::from("default_year"),
                message: format!(
                    "Default year {default_year} must be between {min_year} and {max_year}"
                ),
            }
        })?;

        Ok(Self {
            min_year,
            max_year,
            default_year,
        })
    }

    /// Validates a requested year and derives its analysis period.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is missing or outside the accepted range.
    pub fn resolve_period(&self, year: Option<i32>) -> Result<AnalysisPeriod, ApiError> {
        let year: i32 = year.ok_or_else(|| ApiError::InvalidInput {
            field: String::from("year"),
            message: String::from("Analysis year is required"),
        })?;

        validate_analysis_year(year, self.min_year, self.max_year)
            .map_err(translate_domain_error)?;

        AnalysisPeriod::for_year(year).map_err(translate_domain_error)
    }

    /// Returns every accepted year in ascending order.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        (self.min_year..=self.max_year).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy: YearPolicy = YearPolicy::default();
        assert_eq!(policy.min_year, 2020);
        assert_eq!(policy.max_year, 2031);
        assert_eq!(policy.default_year, 2024);
        assert_eq!(policy.years().len(), 12);
    }

    #[test]
    fn test_new_rejects_default_outside_range() {
        let result: Result<YearPolicy, ApiError> = YearPolicy::new(2020, 2025, 2030);
        assert!(matches!(
            result,
            Err(ApiError::InvalidInput { field, .. }) if field == "default_year"
        ));
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let result: Result<YearPolicy, ApiError> = YearPolicy::new(2030, 2020, 2025);
        assert!(matches!(
            result,
            Err(ApiError::InvalidInput { field, .. }) if field == "min_year"
        ));
    }
}
