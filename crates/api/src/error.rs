// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use mt_calc_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An uploaded table could not be interpreted.
    InvalidTableFormat {
        /// Why the table was rejected.
        reason: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidTableFormat { reason } => {
                write!(f, "Invalid table format: {reason}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::AnalysisYearOutOfRange { year, min, max } => ApiError::InvalidInput {
            field: String::from("year"),
            message: format!("Analysis year {year} is out of range. Must be between {min} and {max}"),
        },
        // Only reachable after range validation passed
        DomainError::InvalidAnalysisYear { year, reason } => ApiError::Internal {
            message: format!("Cannot derive analysis period for {year}: {reason}"),
        },
    }
}
