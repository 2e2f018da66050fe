// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::matrix_workload::resolve_matrix_workload;
use crate::record::{
    FieldValue, RawRecord, aliases, resolve, resolve_count, resolve_count_opt, resolve_date,
    resolve_flag, resolve_text, resolve_weight,
};
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// Course weight applied when a record carries none.
pub const DEFAULT_COURSE_WEIGHT: f64 = 1.0;

/// Financing modality of a course cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinancingModality {
    /// Face-to-face teaching.
    OnSite,
    /// Distance learning funded externally.
    RemoteExternalFunding,
    /// Distance learning funded by the institution itself.
    RemoteOwnFunding,
}

impl FinancingModality {
    /// Classifies free text into a modality.
    ///
    /// This never fails: text mentioning own funding (`PRÓPRIO`, `FP`)
    /// wins over external funding (`EXTERNO`), and anything else is
    /// on-site.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        let upper: String = text.trim().to_uppercase();
        if upper.contains("PRÓPRIO") || upper.contains("PROPRIO") || upper.contains("FP") {
            Self::RemoteOwnFunding
        } else if upper.contains("EXTERNO") {
            Self::RemoteExternalFunding
        } else {
            Self::OnSite
        }
    }

    /// Parses an explicit modality code.
    ///
    /// Accepts the canonical codes and the labels offered by the
    /// reference deployment. Returns `None` for anything else.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "ON_SITE" | "PRESENCIAL" => Some(Self::OnSite),
            "REMOTE_EXTERNAL_FUNDING" | "EAD FINANCIAMENTO EXTERNO" => {
                Some(Self::RemoteExternalFunding)
            }
            "REMOTE_OWN_FUNDING" | "EAD FINANCIAMENTO PRÓPRIO" => Some(Self::RemoteOwnFunding),
            _ => None,
        }
    }

    /// Returns the canonical code of this modality.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OnSite => "ON_SITE",
            Self::RemoteExternalFunding => "REMOTE_EXTERNAL_FUNDING",
            Self::RemoteOwnFunding => "REMOTE_OWN_FUNDING",
        }
    }
}

impl std::fmt::Display for FinancingModality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The calendar-year interval a cycle is measured against.
///
/// Always `[Jan 1, Dec 31]` of a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisPeriod {
    year: i32,
    start: Date,
    end: Date,
}

impl AnalysisPeriod {
    /// Derives the analysis period for a calendar year.
    ///
    /// # Errors
    ///
    /// Returns an error if the year cannot be represented as a date.
    pub fn for_year(year: i32) -> Result<Self, DomainError> {
        let start: Date = Date::from_calendar_date(year, Month::January, 1).map_err(|e| {
            DomainError::InvalidAnalysisYear {
                year,
                reason: e.to_string(),
            }
        })?;
        let end: Date = Date::from_calendar_date(year, Month::December, 31).map_err(|e| {
            DomainError::InvalidAnalysisYear {
                year,
                reason: e.to_string(),
            }
        })?;

        Ok(Self { year, start, end })
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the first day of the period (DIP).
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the last day of the period (DFP).
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns the inclusive length of the period in days (365 or 366).
    #[must_use]
    pub fn length_days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }
}

/// The inputs of a single calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
    /// Cycle start date (DIC).
    pub cycle_start: Date,
    /// Cycle end date (DTC).
    pub cycle_end: Date,
    /// Cycle workload hours (CHC).
    pub cycle_workload_hours: u32,
    /// Catalog workload hours (CHMC).
    pub catalog_workload_hours: u32,
    /// Matrix workload hours (CHM), supplied or derived.
    pub matrix_workload_hours: u32,
    /// Course weight (PC).
    pub course_weight: f64,
    /// Base-year enrollments (QTM).
    pub base_year_enrollments: u32,
    /// Course type classifier.
    pub course_type: String,
    /// Offering type classifier.
    pub offering_type: String,
    /// Financing modality. `None` means an unrecognized modality.
    pub financing_modality: Option<FinancingModality>,
    /// Whether the course is an agricultural course.
    pub is_agricultural: bool,
    /// Whether the cycle is eligible ("Apto").
    pub is_eligible: bool,
}

impl CycleRecord {
    /// Builds a cycle record from a raw source record.
    ///
    /// Every field falls back to its documented default when absent or
    /// unparseable. Missing dates default to `today`. The matrix workload
    /// is derived from the course and offering types unless the record
    /// carries a usable one.
    #[must_use]
    pub fn from_record(record: &RawRecord, today: Date) -> Self {
        let cycle_start: Date = resolve_date(record, aliases::CYCLE_START).unwrap_or(today);
        let cycle_end: Date = resolve_date(record, aliases::CYCLE_END).unwrap_or(today);
        let cycle_workload_hours: u32 = resolve_count(record, aliases::CYCLE_WORKLOAD, 0);
        let catalog_workload_hours: u32 = resolve_count(record, aliases::CATALOG_WORKLOAD, 0);
        let course_type: String = resolve_text(record, aliases::COURSE_TYPE).unwrap_or_default();
        let offering_type: String =
            resolve_text(record, aliases::OFFERING_TYPE).unwrap_or_default();

        let matrix_workload_hours: u32 = resolve_count_opt(record, aliases::MATRIX_WORKLOAD)
            .unwrap_or_else(|| {
                resolve_matrix_workload(
                    &course_type,
                    &offering_type,
                    cycle_workload_hours,
                    catalog_workload_hours,
                )
            });

        let financing_text: String = resolve_text(record, aliases::FINANCING_MODALITY)
            .unwrap_or_else(|| String::from("PRESENCIAL"));

        let is_eligible: bool = !matches!(
            resolve(record, aliases::ELIGIBILITY),
            Some(value @ FieldValue::Text(_)) if is_ineligible_marker(&value.as_text())
        );

        Self {
            cycle_start,
            cycle_end,
            cycle_workload_hours,
            catalog_workload_hours,
            matrix_workload_hours,
            course_weight: resolve_weight(record, aliases::COURSE_WEIGHT, DEFAULT_COURSE_WEIGHT),
            base_year_enrollments: resolve_count(record, aliases::BASE_YEAR_ENROLLMENTS, 0),
            course_type,
            offering_type,
            financing_modality: Some(FinancingModality::classify(&financing_text)),
            is_agricultural: resolve_flag(record, aliases::AGRICULTURAL, false),
            is_eligible,
        }
    }

    /// Returns the matrix workload the rule table would suggest for this
    /// record, ignoring any override stored in `matrix_workload_hours`.
    #[must_use]
    pub fn suggested_matrix_workload(&self) -> u32 {
        resolve_matrix_workload(
            &self.course_type,
            &self.offering_type,
            self.cycle_workload_hours,
            self.catalog_workload_hours,
        )
    }
}

/// Returns whether an eligibility marker reads "NÃO".
fn is_ineligible_marker(text: &str) -> bool {
    text.trim().to_uppercase() == "NÃO"
}
