// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::cargo_common_metadata)]

mod course_names;
mod cycle_selection;
mod error;
mod handlers;
mod request_response;
mod table_import;
mod year_policy;

#[cfg(test)]
mod tests;

pub use course_names::{CourseNameNormalizer, CourseNamesError};
pub use cycle_selection::{CycleFilter, CycleListing, CycleOption, list_cycles};
pub use error::{ApiError, translate_domain_error};
pub use handlers::{calculate_manual, calculate_record, calculate_table_row, record_from_json};
pub use request_response::{
    CalculationResponse, CycleOverrides, ManualCalculationRequest, RecordCalculationRequest,
    TableCalculationResponse,
};
pub use table_import::{
    HEADER_SCAN_ROWS, ImportedTable, TableRow, UNNAMED_COURSE_PLACEHOLDER, clean_header,
    import_table,
};
pub use year_policy::{DEFAULT_ANALYSIS_YEAR, DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR, YearPolicy};
