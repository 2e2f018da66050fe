// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cascading selection of course cycles in an imported table.
//!
//! Callers narrow a table down by campus, then course type, then
//! standardized course name, and finally pick one cycle among those
//! left. Each step lists the distinct values available for the next.

use mt_calc_domain::record::{aliases, format_day_first, resolve, resolve_date, resolve_text};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use time::Date;
use tracing::debug;

use crate::course_names::CourseNameNormalizer;
use crate::table_import::{ImportedTable, TableRow};

/// Offering labels that carry no information and are left out of labels.
const UNINFORMATIVE_OFFERINGS: &[&str] = &["NÃO SE APLICA", "N/A", "NAN"];

/// Narrows an imported table. Unset fields match every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleFilter {
    /// Campus ("Unidade de Ensino").
    #[serde(default)]
    pub campus: Option<String>,
    /// Course type ("Tipo de Curso").
    #[serde(default)]
    pub course_type: Option<String>,
    /// Standardized course name.
    #[serde(default)]
    pub course_name: Option<String>,
}

/// One selectable cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleOption {
    /// Row number in the imported table.
    pub row_number: usize,
    /// Cycle start as `dd/mm/yyyy`, or the raw cell when unparseable.
    pub cycle_start: Option<String>,
    /// Offering type, when informative.
    pub offering_type: Option<String>,
    /// Base-year enrollments as shown in the table.
    pub base_year_enrollments: String,
    /// Human-readable label.
    pub label: String,
}

/// Everything a caller needs to drive the next selection step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleListing {
    /// Distinct campuses in the table.
    pub campuses: Vec<String>,
    /// Distinct course types within the selected campus.
    pub course_types: Vec<String>,
    /// Distinct standardized course names within the selected campus and type.
    pub course_names: Vec<String>,
    /// Selectable cycles matching the whole filter, most recent first.
    pub cycles: Vec<CycleOption>,
}

/// Compares an optional filter value against a row field.
fn matches_field(
    names: &CourseNameNormalizer,
    wanted: Option<&str>,
    actual: Option<&str>,
) -> bool {
    wanted.is_none_or(|wanted| names.normalize(wanted) == names.normalize_opt(actual))
}

fn matches_campus(names: &CourseNameNormalizer, filter: &CycleFilter, row: &TableRow) -> bool {
    matches_field(
        names,
        filter.campus.as_deref(),
        resolve_text(&row.record, aliases::CAMPUS).as_deref(),
    )
}

fn matches_course_type(
    names: &CourseNameNormalizer,
    filter: &CycleFilter,
    row: &TableRow,
) -> bool {
    matches_field(
        names,
        filter.course_type.as_deref(),
        resolve_text(&row.record, aliases::COURSE_TYPE).as_deref(),
    )
}

fn matches_course_name(
    names: &CourseNameNormalizer,
    filter: &CycleFilter,
    row: &TableRow,
) -> bool {
    filter
        .course_name
        .as_deref()
        .is_none_or(|wanted| names.normalize(wanted) == row.standardized_name)
}

/// Collects the distinct non-empty values in first-seen order.
fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Builds the selectable option of a row, or `None` when the row has no
/// base-year enrollment value.
fn build_option(row: &TableRow) -> Option<(Option<Date>, CycleOption)> {
    let enrollments: String = resolve(&row.record, aliases::BASE_YEAR_ENROLLMENTS)?.as_text();

    let start_date: Option<Date> = resolve_date(&row.record, aliases::CYCLE_START);
    let cycle_start: Option<String> = start_date
        .map(format_day_first)
        .or_else(|| resolve_text(&row.record, aliases::CYCLE_START));

    let offering_type: Option<String> = resolve_text(&row.record, aliases::OFFERING_TYPE)
        .filter(|offering| {
            !UNINFORMATIVE_OFFERINGS.contains(&offering.trim().to_uppercase().as_str())
        });

    let mut label: String = format!("Start: {}", cycle_start.as_deref().unwrap_or_default());
    if let Some(offering) = &offering_type {
        label.push_str(&format!(" | Offering: {offering}"));
    }
    label.push_str(&format!(" | Base-year enrollments: {enrollments}"));

    Some((
        start_date,
        CycleOption {
            row_number: row.row_number,
            cycle_start,
            offering_type,
            base_year_enrollments: enrollments,
            label,
        },
    ))
}

/// Lists the selection state of a table under a filter.
///
/// # Arguments
///
/// * `table` - The imported table
/// * `filter` - The selections made so far
/// * `names` - Normalizer used to compare names
///
/// # Returns
///
/// The distinct values for each selection step and the cycles matching
/// the whole filter. Cycles are ordered by start date, most recent first;
/// rows whose start date cannot be parsed come last.
#[must_use]
pub fn list_cycles(
    table: &ImportedTable,
    filter: &CycleFilter,
    names: &CourseNameNormalizer,
) -> CycleListing {
    let campuses: Vec<String> = distinct(
        table
            .rows
            .iter()
            .map(|row| names.normalize_opt(resolve_text(&row.record, aliases::CAMPUS).as_deref())),
    );

    let in_campus: Vec<&TableRow> = table
        .rows
        .iter()
        .filter(|row| matches_campus(names, filter, row))
        .collect();

    let course_types: Vec<String> = distinct(in_campus.iter().map(|row| {
        names.normalize_opt(resolve_text(&row.record, aliases::COURSE_TYPE).as_deref())
    }));

    let in_type: Vec<&TableRow> = in_campus
        .into_iter()
        .filter(|row| matches_course_type(names, filter, row))
        .collect();

    let course_names: Vec<String> =
        distinct(in_type.iter().map(|row| row.standardized_name.clone()));

    let mut options: Vec<(Option<Date>, CycleOption)> = in_type
        .into_iter()
        .filter(|row| matches_course_name(names, filter, row))
        .filter_map(build_option)
        .collect();

    // Stable: rows sharing a start date keep table order
    options.sort_by_key(|(start, _)| (start.is_none(), Reverse(*start)));

    debug!(
        campuses = campuses.len(),
        course_types = course_types.len(),
        course_names = course_names.len(),
        cycles = options.len(),
        "Listed cycles"
    );

    CycleListing {
        campuses,
        course_types,
        course_names,
        cycles: options.into_iter().map(|(_, option)| option).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_calc_domain::RawRecord;

    fn row(row_number: usize, record: RawRecord) -> TableRow {
        TableRow {
            row_number,
            record,
            standardized_name: String::from("AGRONOMIA"),
        }
    }

    #[test]
    fn test_label_omits_uninformative_offering() {
        let record: RawRecord = RawRecord::new()
            .with("DIC", "01/03/2023")
            .with("Tipo de Oferta", "Não se aplica")
            .with("QTM", "12");
        let (_, option): (Option<Date>, CycleOption) = build_option(&row(1, record)).unwrap();
        assert_eq!(option.label, "Start: 01/03/2023 | Base-year enrollments: 12");
        assert_eq!(option.offering_type, None);
    }

    #[test]
    fn test_label_includes_offering() {
        let record: RawRecord = RawRecord::new()
            .with("DIC", "2023-03-01")
            .with("Tipo de Oferta", "Subsequente")
            .with("QTM1P", "40");
        let (start, option): (Option<Date>, CycleOption) =
            build_option(&row(2, record)).unwrap();
        assert!(start.is_some());
        assert_eq!(
            option.label,
            "Start: 01/03/2023 | Offering: Subsequente | Base-year enrollments: 40"
        );
    }

    #[test]
    fn test_rows_without_enrollments_are_not_selectable() {
        let record: RawRecord = RawRecord::new().with("DIC", "01/03/2023");
        assert!(build_option(&row(3, record)).is_none());
    }

    #[test]
    fn test_distinct_keeps_first_seen_order() {
        let values: Vec<String> = vec![
            String::from("B"),
            String::from("A"),
            String::new(),
            String::from("B"),
        ];
        assert_eq!(distinct(values.into_iter()), vec!["B", "A"]);
    }
}
