// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Eligibility gate applied to the headline value.

use serde::{Deserialize, Serialize};

/// Whether the headline value reflects the computed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    /// The headline is the computed total.
    #[serde(rename = "eligible")]
    Eligible,
    /// The cycle is marked ineligible and the headline is forced to zero.
    #[serde(rename = "ineligible cycle")]
    Ineligible,
}

impl ResultStatus {
    /// Returns the tag shown next to the headline value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eligible => "eligible",
            Self::Ineligible => "ineligible cycle",
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The value returned to the caller as the result of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeadlineResult {
    /// The headline value.
    pub value: f64,
    /// Eligibility tag.
    pub status: ResultStatus,
}

/// Overrides the headline with zero for ineligible cycles.
///
/// Intermediate factors are untouched; only the returned headline changes.
#[must_use]
pub const fn apply_eligibility_gate(total: f64, is_eligible: bool) -> HeadlineResult {
    if is_eligible {
        HeadlineResult {
            value: total,
            status: ResultStatus::Eligible,
        }
    } else {
        HeadlineResult {
            value: 0.0,
            status: ResultStatus::Ineligible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligible_keeps_total() {
        let headline: HeadlineResult = apply_eligibility_gate(12.5, true);
        assert!((headline.value - 12.5).abs() < f64::EPSILON);
        assert_eq!(headline.status, ResultStatus::Eligible);
    }

    #[test]
    fn test_ineligible_forces_zero() {
        let headline: HeadlineResult = apply_eligibility_gate(12.5, false);
        assert!(headline.value.abs() < f64::EPSILON);
        assert_eq!(headline.status, ResultStatus::Ineligible);
        assert_eq!(headline.status.to_string(), "ineligible cycle");
    }
}
