// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while setting up a calculation.
///
/// Malformed business input never produces one of these: the engine
/// degrades to defaults and zeros instead. Only structurally invalid
/// parameters are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The analysis year cannot be represented as a calendar year.
    InvalidAnalysisYear {
        /// The rejected year.
        year: i32,
        /// Why the year was rejected.
        reason: String,
    },
    /// The analysis year is outside the accepted range.
    AnalysisYearOutOfRange {
        /// The rejected year.
        year: i32,
        /// The smallest accepted year (inclusive).
        min: i32,
        /// The largest accepted year (inclusive).
        max: i32,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAnalysisYear { year, reason } => {
                write!(f, "Invalid analysis year {year}: {reason}")
            }
            Self::AnalysisYearOutOfRange { year, min, max } => {
                write!(
                    f,
                    "Analysis year {year} is out of range. Must be between {min} and {max}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
