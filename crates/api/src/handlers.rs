// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calculation entry points.
//!
//! Every entry point validates the analysis year before anything reaches
//! the engine, then builds a `CycleRecord` from its inputs and runs a
//! single calculation.

use mt_calc_domain::record::{aliases, parse_day_first_date, resolve_count_opt};
use mt_calc_domain::{
    AnalysisPeriod, CycleCalculation, CycleRecord, DEFAULT_COURSE_WEIGHT, FieldValue,
    FinancingModality, RawRecord, calculate_cycle, resolve_matrix_workload,
};
use serde_json::Value;
use time::Date;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::request_response::{
    CalculationResponse, CycleOverrides, ManualCalculationRequest, RecordCalculationRequest,
    TableCalculationResponse,
};
use crate::table_import::{ImportedTable, TableRow};
use crate::year_policy::YearPolicy;

/// Parses a date input. Missing or blank input yields `today`.
fn parse_date_input(field: &str, text: Option<&str>, today: Date) -> Result<Date, ApiError> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(today),
        Some(t) => parse_day_first_date(t).ok_or_else(|| ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Unrecognized date '{t}'. Use dd/mm/yyyy or yyyy-mm-dd"),
        }),
    }
}

/// Validates an explicit course weight. Missing input yields the default.
fn parse_course_weight(weight: Option<f64>) -> Result<f64, ApiError> {
    match weight {
        None => Ok(DEFAULT_COURSE_WEIGHT),
        Some(w) if w.is_finite() => Ok(w),
        Some(w) => Err(ApiError::InvalidInput {
            field: String::from("course_weight"),
            message: format!("Course weight must be a finite number, got {w}"),
        }),
    }
}

/// Parses an explicit modality code. Missing input means on-site; an
/// unrecognized code yields `None`.
fn parse_modality(code: Option<&str>) -> Option<FinancingModality> {
    code.map_or(Some(FinancingModality::OnSite), FinancingModality::from_code)
}

/// Converts a JSON object into a raw record.
///
/// Strings become text, numbers become integers or decimals, booleans stay
/// booleans. Nulls, arrays and nested objects are skipped.
#[must_use]
pub fn record_from_json(object: &serde_json::Map<String, Value>) -> RawRecord {
    object
        .iter()
        .filter_map(|(key, value)| {
            let field: FieldValue = match value {
                Value::String(text) => FieldValue::Text(text.clone()),
                Value::Number(number) => number
                    .as_i64()
                    .map(FieldValue::Integer)
                    .or_else(|| number.as_f64().map(FieldValue::Decimal))?,
                Value::Bool(flag) => FieldValue::Boolean(*flag),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key.clone(), field))
        })
        .collect()
}

/// Applies per-field edits to a cycle built from a record.
///
/// The matrix workload is re-derived from the edited workloads unless the
/// edits or the record supply one explicitly.
fn apply_overrides(
    cycle: &mut CycleRecord,
    overrides: &CycleOverrides,
    record_has_matrix_workload: bool,
    today: Date,
) -> Result<(), ApiError> {
    if overrides.cycle_start.is_some() {
        cycle.cycle_start =
            parse_date_input("cycle_start", overrides.cycle_start.as_deref(), today)?;
    }
    if overrides.cycle_end.is_some() {
        cycle.cycle_end = parse_date_input("cycle_end", overrides.cycle_end.as_deref(), today)?;
    }
    if let Some(hours) = overrides.cycle_workload_hours {
        cycle.cycle_workload_hours = hours;
    }
    if let Some(hours) = overrides.catalog_workload_hours {
        cycle.catalog_workload_hours = hours;
    }
    if let Some(hours) = overrides.matrix_workload_hours {
        cycle.matrix_workload_hours = hours;
    } else if !record_has_matrix_workload {
        cycle.matrix_workload_hours = cycle.suggested_matrix_workload();
    }
    if overrides.course_weight.is_some() {
        cycle.course_weight = parse_course_weight(overrides.course_weight)?;
    }
    if let Some(enrollments) = overrides.base_year_enrollments {
        cycle.base_year_enrollments = enrollments;
    }
    if let Some(code) = &overrides.financing_modality {
        cycle.financing_modality = FinancingModality::from_code(code);
    }
    if let Some(flag) = overrides.is_agricultural {
        cycle.is_agricultural = flag;
    }
    if let Some(flag) = overrides.is_eligible {
        cycle.is_eligible = flag;
    }
    Ok(())
}

/// Runs the engine and converts its result.
fn run_calculation(cycle: &CycleRecord, period: &AnalysisPeriod) -> CalculationResponse {
    debug!(
        cycle_start = %cycle.cycle_start,
        cycle_end = %cycle.cycle_end,
        chc = cycle.cycle_workload_hours,
        chm = cycle.matrix_workload_hours,
        qtm = cycle.base_year_enrollments,
        modality = ?cycle.financing_modality,
        "Resolved calculation inputs"
    );

    let calculation: CycleCalculation = calculate_cycle(cycle, period);

    for warning in &calculation.warnings {
        warn!(warning = %warning, "Calculation warning");
    }

    info!(
        year = period.year(),
        mt = calculation.total(),
        headline = calculation.result.value,
        status = %calculation.result.status,
        "Calculation complete"
    );

    CalculationResponse::from(&calculation)
}

/// Builds a cycle from a raw record plus edits and calculates it.
fn calculate_raw_record(
    record: &RawRecord,
    overrides: &CycleOverrides,
    period: &AnalysisPeriod,
    today: Date,
) -> Result<CalculationResponse, ApiError> {
    let mut cycle: CycleRecord = CycleRecord::from_record(record, today);
    let record_has_matrix_workload: bool =
        resolve_count_opt(record, aliases::MATRIX_WORKLOAD).is_some();
    apply_overrides(&mut cycle, overrides, record_has_matrix_workload, today)?;
    Ok(run_calculation(&cycle, period))
}

/// Calculates a cycle whose inputs are all supplied explicitly.
///
/// # Arguments
///
/// * `request` - The calculation inputs
/// * `policy` - The accepted analysis years
/// * `today` - Default for missing dates
///
/// # Returns
///
/// * `Ok(CalculationResponse)` with the headline value and the factor chain
/// * `Err(ApiError)` if the request is structurally invalid
///
/// # Errors
///
/// Returns an error if:
/// - The year is missing or outside the accepted range
/// - A date cannot be parsed
/// - The course weight is not a finite number
pub fn calculate_manual(
    request: &ManualCalculationRequest,
    policy: &YearPolicy,
    today: Date,
) -> Result<CalculationResponse, ApiError> {
    let period: AnalysisPeriod = policy.resolve_period(request.year)?;

    let course_type: String = request.course_type.clone().unwrap_or_default();
    let offering_type: String = request.offering_type.clone().unwrap_or_default();
    let matrix_workload_hours: u32 = request.matrix_workload_hours.unwrap_or_else(|| {
        resolve_matrix_workload(
            &course_type,
            &offering_type,
            request.cycle_workload_hours,
            request.catalog_workload_hours,
        )
    });

    let cycle: CycleRecord = CycleRecord {
        cycle_start: parse_date_input("cycle_start", request.cycle_start.as_deref(), today)?,
        cycle_end: parse_date_input("cycle_end", request.cycle_end.as_deref(), today)?,
        cycle_workload_hours: request.cycle_workload_hours,
        catalog_workload_hours: request.catalog_workload_hours,
        matrix_workload_hours,
        course_weight: parse_course_weight(request.course_weight)?,
        base_year_enrollments: request.base_year_enrollments,
        course_type,
        offering_type,
        financing_modality: parse_modality(request.financing_modality.as_deref()),
        is_agricultural: request.is_agricultural,
        is_eligible: request.is_eligible,
    };

    Ok(run_calculation(&cycle, &period))
}

/// Calculates a cycle from a raw source record.
///
/// # Arguments
///
/// * `request` - The record, edits and year
/// * `policy` - The accepted analysis years
/// * `today` - Default for missing dates
///
/// # Errors
///
/// Returns an error if:
/// - The year is missing or outside the accepted range
/// - An edited date cannot be parsed
/// - An edited course weight is not a finite number
pub fn calculate_record(
    request: &RecordCalculationRequest,
    policy: &YearPolicy,
    today: Date,
) -> Result<CalculationResponse, ApiError> {
    let period: AnalysisPeriod = policy.resolve_period(request.year)?;
    let record: RawRecord = record_from_json(&request.record);
    calculate_raw_record(&record, &request.overrides, &period, today)
}

/// Calculates one row of an imported table.
///
/// # Arguments
///
/// * `table` - The imported table
/// * `row_number` - The row to calculate
/// * `overrides` - Edits applied on top of the row
/// * `year` - The analysis year
/// * `policy` - The accepted analysis years
/// * `today` - Default for missing dates
///
/// # Errors
///
/// Returns an error if:
/// - The year is missing or outside the accepted range
/// - The row does not exist
/// - An edited value is invalid
pub fn calculate_table_row(
    table: &ImportedTable,
    row_number: usize,
    overrides: &CycleOverrides,
    year: Option<i32>,
    policy: &YearPolicy,
    today: Date,
) -> Result<TableCalculationResponse, ApiError> {
    let period: AnalysisPeriod = policy.resolve_period(year)?;

    let row: &TableRow = table
        .row(row_number)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Table row"),
            message: format!("Row {row_number} does not exist in the imported table"),
        })?;

    let calculation: CalculationResponse =
        calculate_raw_record(&row.record, overrides, &period, today)?;

    Ok(TableCalculationResponse {
        row_number,
        course_name: row.standardized_name.clone(),
        calculation,
    })
}
