// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Source-agnostic record access.
//!
//! The same logical field arrives under different labels depending on
//! where a record came from (a remote table, an uploaded spreadsheet, a
//! JSON request). Every logical field is described by an ordered list of
//! aliases and resolved by a single lookup that treats missing, null and
//! empty values uniformly as absent.

use num_traits::ToPrimitive;
use std::collections::HashMap;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Ordered alias lists for every logical field the engine reads.
pub mod aliases {
    /// Cycle start date (DIC).
    pub const CYCLE_START: &[&str] = &["DIC"];
    /// Cycle end date (DTC).
    pub const CYCLE_END: &[&str] = &["DTC"];
    /// Cycle workload hours (CHC).
    pub const CYCLE_WORKLOAD: &[&str] = &["CHC"];
    /// Catalog workload hours (CHMC).
    pub const CATALOG_WORKLOAD: &[&str] = &["CHMC"];
    /// Matrix workload hours (CHM).
    pub const MATRIX_WORKLOAD: &[&str] = &["CHM"];
    /// Course weight (PC).
    pub const COURSE_WEIGHT: &[&str] = &["PC"];
    /// Agricultural course flag.
    pub const AGRICULTURAL: &[&str] = &["Agropecuária", "AGROPECUÁRIA", "Curso de Agropecuária"];
    /// Financing modality text.
    pub const FINANCING_MODALITY: &[&str] = &["Situação de acordo com o tipo de financiamento"];
    /// Base-year enrollments (QTM).
    pub const BASE_YEAR_ENROLLMENTS: &[&str] = &["QTM1P", "QTM"];
    /// Course type classifier.
    pub const COURSE_TYPE: &[&str] = &["Tipo de Curso"];
    /// Offering type classifier.
    pub const OFFERING_TYPE: &[&str] = &["Tipo de Oferta"];
    /// Eligibility marker.
    pub const ELIGIBILITY: &[&str] = &["Apto"];
    /// Course name.
    pub const COURSE_NAME: &[&str] = &["Nome do curso"];
    /// Campus (teaching unit).
    pub const CAMPUS: &[&str] = &["Unidade de Ensino"];
}

/// Truthy spellings for boolean text fields (compared upper-cased).
const TRUTHY_VALUES: &[&str] = &["SIM", "S", "TRUE", "1"];

/// A single cell value as supplied by a record source.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text, possibly numeric or date-like.
    Text(String),
    /// An integer number.
    Integer(i64),
    /// A decimal number. `NaN` is treated as absent.
    Decimal(f64),
    /// A boolean flag.
    Boolean(bool),
    /// An already-typed calendar date.
    Date(Date),
}

impl FieldValue {
    /// Returns whether this value counts as absent (empty text or `NaN`).
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Decimal(value) => value.is_nan(),
            Self::Integer(_) | Self::Boolean(_) | Self::Date(_) => false,
        }
    }

    /// Renders the value as text, the way a spreadsheet cell would show it.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::Date(date) => format_day_first(*date),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Date> for FieldValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

/// A raw record keyed by the labels of its source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, FieldValue>,
}

impl RawRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`RawRecord::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the raw value stored under exactly this key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Returns the number of stored fields, absent ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the record stores no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record: Self = Self::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

/// Resolves a logical field by trying each candidate key in order.
///
/// Returns the first value that is present and not absent (see
/// [`FieldValue::is_absent`]).
#[must_use]
pub fn resolve<'a>(record: &'a RawRecord, candidate_keys: &[&str]) -> Option<&'a FieldValue> {
    candidate_keys
        .iter()
        .filter_map(|key| record.get(key))
        .find(|value| !value.is_absent())
}

/// Resolves a logical field, falling back to `default` when absent.
#[must_use]
pub fn resolve_or(record: &RawRecord, candidate_keys: &[&str], default: FieldValue) -> FieldValue {
    resolve(record, candidate_keys).cloned().unwrap_or(default)
}

/// Resolves a field as trimmed text.
#[must_use]
pub fn resolve_text(record: &RawRecord, candidate_keys: &[&str]) -> Option<String> {
    resolve(record, candidate_keys).map(FieldValue::as_text)
}

/// Resolves a non-negative count (hours, enrollments).
///
/// Decimal values are truncated. Negative, non-finite and unparseable
/// values yield `default`.
#[must_use]
pub fn resolve_count(record: &RawRecord, candidate_keys: &[&str], default: u32) -> u32 {
    resolve_count_opt(record, candidate_keys).unwrap_or(default)
}

/// Resolves a non-negative count, or `None` when the field is absent or
/// its value is negative, non-finite or unparseable.
#[must_use]
pub fn resolve_count_opt(record: &RawRecord, candidate_keys: &[&str]) -> Option<u32> {
    let number: Option<f64> = match resolve(record, candidate_keys) {
        Some(FieldValue::Integer(value)) => value.to_f64(),
        Some(FieldValue::Decimal(value)) => Some(*value),
        Some(FieldValue::Text(text)) => parse_decimal_text(text),
        Some(FieldValue::Boolean(_) | FieldValue::Date(_)) | None => None,
    };

    number
        .filter(|value| value.is_finite() && *value >= 0.0)
        .and_then(|value| value.trunc().to_u32())
}

/// Resolves a calendar date, parsing day-first text when needed.
#[must_use]
pub fn resolve_date(record: &RawRecord, candidate_keys: &[&str]) -> Option<Date> {
    match resolve(record, candidate_keys)? {
        FieldValue::Date(date) => Some(*date),
        FieldValue::Text(text) => parse_day_first_date(text),
        FieldValue::Integer(_) | FieldValue::Decimal(_) | FieldValue::Boolean(_) => None,
    }
}

/// Resolves the course weight.
///
/// Accepts comma-decimal text. Falls back to `default` when absent,
/// unparseable or negative.
#[must_use]
pub fn resolve_weight(record: &RawRecord, candidate_keys: &[&str], default: f64) -> f64 {
    let weight: Option<f64> = match resolve(record, candidate_keys) {
        Some(FieldValue::Decimal(value)) => Some(*value),
        Some(FieldValue::Integer(value)) => value.to_f64(),
        Some(FieldValue::Text(text)) => parse_decimal_text(text),
        Some(FieldValue::Boolean(_) | FieldValue::Date(_)) | None => None,
    };

    weight
        .filter(|value| value.is_finite() && *value >= 0.0)
        .unwrap_or(default)
}

/// Resolves a yes/no flag.
///
/// Text is truthy when it reads `SIM`, `S`, `TRUE` or `1` (case-insensitive).
#[must_use]
pub fn resolve_flag(record: &RawRecord, candidate_keys: &[&str], default: bool) -> bool {
    match resolve(record, candidate_keys) {
        Some(FieldValue::Boolean(value)) => *value,
        Some(FieldValue::Integer(value)) => *value == 1,
        Some(value @ (FieldValue::Text(_) | FieldValue::Decimal(_))) => {
            is_truthy_text(&value.as_text())
        }
        Some(FieldValue::Date(_)) => false,
        None => default,
    }
}

/// Returns whether `text` is one of the accepted truthy spellings.
#[must_use]
pub fn is_truthy_text(text: &str) -> bool {
    let upper: String = text.trim().to_uppercase();
    TRUTHY_VALUES.contains(&upper.as_str())
}

/// Parses a decimal number written with either a comma or a dot.
#[must_use]
pub fn parse_decimal_text(text: &str) -> Option<f64> {
    let normalized: String = text.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Accepted day-first date layouts, tried in order.
const DAY_FIRST_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[day padding:none]/[month padding:none]/[year]"),
    format_description!("[day padding:none]-[month padding:none]-[year]"),
    format_description!("[day padding:none].[month padding:none].[year]"),
];

/// ISO calendar date layout.
const ISO_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Display layout for dates shown to callers.
const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year]");

/// Parses a date written day-first (`31/12/2024`, `31-12-2024`,
/// `31.12.2024`) or as ISO (`2024-12-31`).
///
/// A trailing time component is ignored. Returns `None` on any failure.
#[must_use]
pub fn parse_day_first_date(text: &str) -> Option<Date> {
    let date_part: &str = text.trim().split([' ', 'T']).next()?;
    DAY_FIRST_FORMATS
        .iter()
        .chain(std::iter::once(&ISO_FORMAT))
        .find_map(|format| Date::parse(date_part, *format).ok())
}

/// Formats a date as `dd/mm/yyyy`.
#[must_use]
pub fn format_day_first(date: Date) -> String {
    date.format(DISPLAY_FORMAT).unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sample_record() -> RawRecord {
        RawRecord::new()
            .with("QTM1P", "")
            .with("QTM", 30_i64)
            .with("PC", "1,5")
            .with("DIC", "01/02/2024")
            .with("Agropecuária", "sim")
    }

    #[test]
    fn test_resolve_skips_empty_aliases() {
        let record: RawRecord = sample_record();
        assert_eq!(
            resolve(&record, aliases::BASE_YEAR_ENROLLMENTS),
            Some(&FieldValue::Integer(30))
        );
    }

    #[test]
    fn test_resolve_prefers_first_alias() {
        let record: RawRecord = sample_record().with("QTM1P", 12_i64);
        assert_eq!(resolve_count(&record, aliases::BASE_YEAR_ENROLLMENTS, 0), 12);
    }

    #[test]
    fn test_resolve_treats_nan_as_absent() {
        let record: RawRecord = RawRecord::new().with("CHC", f64::NAN);
        assert_eq!(resolve(&record, aliases::CYCLE_WORKLOAD), None);
        assert_eq!(resolve_count(&record, aliases::CYCLE_WORKLOAD, 7), 7);
    }

    #[test]
    fn test_resolve_or_returns_default() {
        let record: RawRecord = RawRecord::new();
        let value: FieldValue = resolve_or(
            &record,
            aliases::FINANCING_MODALITY,
            FieldValue::from("PRESENCIAL"),
        );
        assert_eq!(value, FieldValue::Text(String::from("PRESENCIAL")));
    }

    #[test]
    fn test_resolve_weight_accepts_comma_decimal() {
        let record: RawRecord = sample_record();
        let weight: f64 = resolve_weight(&record, aliases::COURSE_WEIGHT, 1.0);
        assert!((weight - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_weight_falls_back_on_garbage() {
        let record: RawRecord = RawRecord::new().with("PC", "abc");
        let weight: f64 = resolve_weight(&record, aliases::COURSE_WEIGHT, 1.0);
        assert!((weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_count_truncates_decimal_text() {
        let record: RawRecord = RawRecord::new().with("CHC", "800,0");
        assert_eq!(resolve_count(&record, aliases::CYCLE_WORKLOAD, 0), 800);
    }

    #[test]
    fn test_resolve_count_opt_distinguishes_unparseable() {
        let record: RawRecord = RawRecord::new()
            .with("CHM", "n/d")
            .with("CHC", "1200");
        assert_eq!(resolve_count_opt(&record, aliases::MATRIX_WORKLOAD), None);
        assert_eq!(resolve_count_opt(&record, aliases::CYCLE_WORKLOAD), Some(1200));
        assert_eq!(resolve_count_opt(&record, aliases::CATALOG_WORKLOAD), None);
    }

    #[test]
    fn test_resolve_count_rejects_negative() {
        let record: RawRecord = RawRecord::new().with("CHC", -5_i64);
        assert_eq!(resolve_count(&record, aliases::CYCLE_WORKLOAD, 0), 0);
    }

    #[test]
    fn test_resolve_flag_truthy_spellings() {
        for text in ["SIM", "s", "True", "1", " sim "] {
            let record: RawRecord = RawRecord::new().with("Agropecuária", text);
            assert!(resolve_flag(&record, aliases::AGRICULTURAL, false), "{text}");
        }
        for text in ["Não", "N", "false", "0", "talvez"] {
            let record: RawRecord = RawRecord::new().with("AGROPECUÁRIA", text);
            assert!(!resolve_flag(&record, aliases::AGRICULTURAL, false), "{text}");
        }
    }

    #[test]
    fn test_resolve_flag_decimal_one_is_truthy_text() {
        // A spreadsheet cell holding 1.0 renders as "1"
        let record: RawRecord = RawRecord::new().with("Agropecuária", 1.0_f64);
        assert!(resolve_flag(&record, aliases::AGRICULTURAL, false));
    }

    #[test]
    fn test_resolve_date_from_text_and_typed() {
        let record: RawRecord = sample_record().with("DTC", date!(2024 - 12 - 31));
        assert_eq!(
            resolve_date(&record, aliases::CYCLE_START),
            Some(date!(2024 - 02 - 01))
        );
        assert_eq!(
            resolve_date(&record, aliases::CYCLE_END),
            Some(date!(2024 - 12 - 31))
        );
    }

    #[test]
    fn test_parse_day_first_date_formats() {
        assert_eq!(parse_day_first_date("31/12/2024"), Some(date!(2024 - 12 - 31)));
        assert_eq!(parse_day_first_date("1-2-2024"), Some(date!(2024 - 02 - 01)));
        assert_eq!(parse_day_first_date("05.03.2023"), Some(date!(2023 - 03 - 05)));
        assert_eq!(parse_day_first_date("2024-03-05"), Some(date!(2024 - 03 - 05)));
        assert_eq!(
            parse_day_first_date("2024-03-05 00:00:00"),
            Some(date!(2024 - 03 - 05))
        );
        assert_eq!(
            parse_day_first_date("2024-03-05T10:00:00"),
            Some(date!(2024 - 03 - 05))
        );
    }

    #[test]
    fn test_parse_day_first_date_failures() {
        assert_eq!(parse_day_first_date(""), None);
        assert_eq!(parse_day_first_date("not a date"), None);
        assert_eq!(parse_day_first_date("31/02/2024"), None);
        assert_eq!(parse_day_first_date("12/13/2024"), None);
        assert_eq!(parse_day_first_date("01/01/24"), None);
    }

    #[test]
    fn test_format_day_first() {
        assert_eq!(format_day_first(date!(2024 - 03 - 05)), "05/03/2024");
        assert_eq!(format_day_first(date!(2024 - 12 - 31)), "31/12/2024");
    }

    #[test]
    fn test_parse_day_first_date_accepts_padded_and_unpadded() {
        assert_eq!(parse_day_first_date("05/3/2024"), Some(date!(2024 - 03 - 05)));
        assert_eq!(parse_day_first_date(" 1.12.2024 "), Some(date!(2024 - 12 - 01)));
        assert_eq!(
            parse_day_first_date(&format_day_first(date!(2023 - 07 - 09))),
            Some(date!(2023 - 07 - 09))
        );
    }

    #[test]
    fn test_record_from_iterator() {
        let record: RawRecord = [("DIC", "01/01/2024"), ("DTC", "31/12/2024")]
            .into_iter()
            .collect();
        assert_eq!(record.len(), 2);
        assert!(!record.is_empty());
    }
}
