// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Import of uploaded enrollment-conference tables.
//!
//! Uploaded tables carry a few title rows before the real header, so the
//! header row is located by its content. Data rows become raw records
//! keyed by the cleaned header labels.

use csv::StringRecord;
use mt_calc_domain::RawRecord;
use mt_calc_domain::record::{aliases, resolve_text};
use tracing::{debug, info};

use crate::course_names::CourseNameNormalizer;
use crate::error::ApiError;

/// Number of leading rows searched for the header row.
pub const HEADER_SCAN_ROWS: usize = 15;

/// Standardized name given to every row of a table without course names.
pub const UNNAMED_COURSE_PLACEHOLDER: &str = "A DEFINIR";

/// Methodology codes that identify a column by the start of its label.
const METHODOLOGY_CODES: &[&str] = &[
    "DIC", "DTC", "CHC", "CHMC", "CHM", "PC", "QTDC", "CHMD", "CHA", "FECH", "DIP", "DFP",
    "QTM1P", "QTM", "DACP", "FEDA", "FECHDA", "MECHDA", "MP", "BA", "MT",
];

/// One data row of an imported table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// The row number (1-based, counted from the first row after the header).
    pub row_number: usize,
    /// The row's cells keyed by cleaned header label. Empty cells are absent.
    pub record: RawRecord,
    /// The standardized course name.
    pub standardized_name: String,
}

/// An imported table.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTable {
    /// Cleaned header labels in column order.
    pub headers: Vec<String>,
    /// The kept data rows.
    pub rows: Vec<TableRow>,
    /// Rows dropped because they had no course name.
    pub dropped_rows: usize,
}

impl ImportedTable {
    /// Looks up a row by its row number.
    #[must_use]
    pub fn row(&self, row_number: usize) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.row_number == row_number)
    }

    /// Returns the number of kept rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether no rows were kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Returns whether a row looks like the table header.
fn is_header_row(record: &StringRecord) -> bool {
    let joined: String = record.iter().collect::<Vec<&str>>().join(" ").to_uppercase();
    joined.contains("INSTITUIÇÃO")
        && joined.contains("NOME DO CURSO")
        && (joined.contains("CICLO") || joined.contains("MATRÍCULA"))
}

/// Cleans a header label.
///
/// Internal whitespace is collapsed. When the first word starts with a
/// methodology code the label is shortened to that word, so that
/// `"DIC (Data de início do ciclo)"` becomes `"DIC"`.
#[must_use]
pub fn clean_header(header: &str) -> String {
    let collapsed: String = header.split_whitespace().collect::<Vec<&str>>().join(" ");
    let first: &str = collapsed.split(' ').next().unwrap_or_default();
    if METHODOLOGY_CODES.iter().any(|code| first.starts_with(code)) {
        first.to_string()
    } else {
        collapsed
    }
}

/// Imports an uploaded table from CSV text.
///
/// # Arguments
///
/// * `csv_text` - The table exported as CSV
/// * `names` - Normalizer used for standardized course names
///
/// # Returns
///
/// * `Ok(ImportedTable)` with the data rows below the detected header
/// * `Err(ApiError)` if no header row is found or the CSV cannot be parsed
///
/// # Errors
///
/// Returns `ApiError::InvalidTableFormat` when the CSV is malformed or no
/// header row appears within the first rows.
pub fn import_table(
    csv_text: &str,
    names: &CourseNameNormalizer,
) -> Result<ImportedTable, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let records: Vec<StringRecord> = reader
        .records()
        .collect::<Result<Vec<StringRecord>, csv::Error>>()
        .map_err(|e| ApiError::InvalidTableFormat {
            reason: format!("Failed to read CSV: {e}"),
        })?;

    let header_index: usize = records
        .iter()
        .take(HEADER_SCAN_ROWS)
        .position(is_header_row)
        .ok_or_else(|| ApiError::InvalidTableFormat {
            reason: format!(
                "No header row with institution, course name and cycle or enrollment columns \
                 in the first {HEADER_SCAN_ROWS} rows"
            ),
        })?;

    debug!(header_index, "Located table header");

    let headers: Vec<String> = records[header_index].iter().map(clean_header).collect();
    let has_course_names: bool = headers
        .iter()
        .any(|header| aliases::COURSE_NAME.contains(&header.as_str()));

    let mut rows: Vec<TableRow> = Vec::new();
    let mut dropped_rows: usize = 0;

    for (idx, cells) in records.iter().skip(header_index + 1).enumerate() {
        let row_number: usize = idx + 1;
        let record: RawRecord = build_record(&headers, cells);

        let standardized_name: String = if has_course_names {
            let Some(name) = resolve_text(&record, aliases::COURSE_NAME) else {
                dropped_rows += 1;
                continue;
            };
            names.normalize(&name)
        } else {
            String::from(UNNAMED_COURSE_PLACEHOLDER)
        };

        rows.push(TableRow {
            row_number,
            record,
            standardized_name,
        });
    }

    info!(
        rows = rows.len(),
        dropped_rows,
        columns = headers.len(),
        "Imported table"
    );

    Ok(ImportedTable {
        headers,
        rows,
        dropped_rows,
    })
}

/// Builds a raw record from one data row.
///
/// Cells under an empty header and empty cells are skipped. When two
/// columns clean to the same label the first one wins.
fn build_record(headers: &[String], cells: &StringRecord) -> RawRecord {
    let mut record: RawRecord = RawRecord::new();
    for (header, cell) in headers.iter().zip(cells.iter()) {
        let value: &str = cell.trim();
        if header.is_empty() || value.is_empty() || record.get(header).is_some() {
            continue;
        }
        record.insert(header.as_str(), value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_header_collapses_whitespace() {
        assert_eq!(clean_header("  Nome   do\tcurso "), "Nome do curso");
    }

    #[test]
    fn test_clean_header_shortens_methodology_codes() {
        assert_eq!(clean_header("DIC (Data de Início do Ciclo)"), "DIC");
        assert_eq!(clean_header("QTM1P - Matrículas 1º período"), "QTM1P");
        assert_eq!(clean_header("DACP3 dias"), "DACP3");
        assert_eq!(clean_header("Tipo de Curso"), "Tipo de Curso");
    }

    #[test]
    fn test_header_row_detection() {
        let header: StringRecord =
            StringRecord::from(vec!["Instituição", "Nome do Curso", "Ciclo"]);
        assert!(is_header_row(&header));
        let title: StringRecord = StringRecord::from(vec!["Conferência de matrículas", ""]);
        assert!(!is_header_row(&title));
    }
}
