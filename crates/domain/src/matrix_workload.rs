// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Matrix workload (CHM) rule table.

/// Course types whose matrix workload is the cycle workload itself.
const CYCLE_WORKLOAD_COURSE_TYPES: &[&str] = &[
    "QUALIFICACAO PROFISSIONAL (FIC)",
    "QUALIFICAÇÃO PROFISSIONAL (FIC)",
    "PROFESSIONAL QUALIFICATION",
    "DOUTORADO",
    "DOCTORATE",
];

/// Offering types that use the integrated-course mapping.
const INTEGRATED_OFFERING_TYPES: &[&str] = &["INTEGRADO", "INTEGRATED"];

/// Fixed matrix workload for PROEJA offerings.
pub const PROEJA_MATRIX_WORKLOAD: u32 = 2400;

/// Derives the matrix workload (CHM) for a course cycle.
///
/// Rules are evaluated in priority order:
/// 1. Professional qualification and doctorate courses use the cycle workload
/// 2. PROEJA offerings (substring match) use a fixed 2400 hours
/// 3. Integrated offerings map the catalog workload 800/1000/1200 to
///    3000/3100/3200 and pass anything else through
/// 4. Everything else uses the catalog workload
///
/// Classifiers are compared trimmed and case-insensitively.
#[must_use]
pub fn resolve_matrix_workload(
    course_type: &str,
    offering_type: &str,
    cycle_workload_hours: u32,
    catalog_workload_hours: u32,
) -> u32 {
    let course_type: String = course_type.trim().to_uppercase();
    let offering_type: String = offering_type.trim().to_uppercase();

    if CYCLE_WORKLOAD_COURSE_TYPES.contains(&course_type.as_str()) {
        cycle_workload_hours
    } else if offering_type.contains("PROEJA") {
        PROEJA_MATRIX_WORKLOAD
    } else if INTEGRATED_OFFERING_TYPES.contains(&offering_type.as_str()) {
        integrated_matrix_workload(catalog_workload_hours)
    } else {
        catalog_workload_hours
    }
}

const fn integrated_matrix_workload(catalog_workload_hours: u32) -> u32 {
    match catalog_workload_hours {
        800 => 3000,
        1000 => 3100,
        1200 => 3200,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualification_uses_cycle_workload() {
        assert_eq!(
            resolve_matrix_workload("Qualificacao Profissional (FIC)", "PROEJA", 240, 800),
            240
        );
        assert_eq!(
            resolve_matrix_workload("professional qualification", "", 160, 200),
            160
        );
    }

    #[test]
    fn test_doctorate_uses_cycle_workload() {
        assert_eq!(resolve_matrix_workload(" doutorado ", "", 1500, 2000), 1500);
        assert_eq!(resolve_matrix_workload("DOCTORATE", "INTEGRADO", 1500, 800), 1500);
    }

    #[test]
    fn test_proeja_is_substring_match() {
        assert_eq!(
            resolve_matrix_workload("TECNICO", "Integrado PROEJA", 1200, 1200),
            2400
        );
        assert_eq!(resolve_matrix_workload("TECNICO", "proeja", 0, 0), 2400);
    }

    #[test]
    fn test_integrated_mapping() {
        assert_eq!(resolve_matrix_workload("TECNICO", "INTEGRADO", 0, 800), 3000);
        assert_eq!(resolve_matrix_workload("TECNICO", "integrado", 0, 1000), 3100);
        assert_eq!(resolve_matrix_workload("TECNICO", " Integrated ", 0, 1200), 3200);
        assert_eq!(resolve_matrix_workload("TECNICO", "INTEGRADO", 0, 900), 900);
    }

    #[test]
    fn test_integrated_is_exact_match() {
        assert_eq!(
            resolve_matrix_workload("TECNICO", "INTEGRADO EM TURNO", 0, 1000),
            1000
        );
    }

    #[test]
    fn test_default_uses_catalog_workload() {
        assert_eq!(resolve_matrix_workload("TECNICO", "SUBSEQUENTE", 1300, 1200), 1200);
        assert_eq!(resolve_matrix_workload("", "", 1300, 0), 0);
    }

    #[test]
    fn test_integrated_resolution_is_repeatable() {
        let first: u32 = resolve_matrix_workload("TECNICO", "INTEGRADO", 0, 1000);
        let _other: u32 = resolve_matrix_workload("TECNICO", "INTEGRADO", 0, 800);
        let second: u32 = resolve_matrix_workload("TECNICO", "INTEGRADO", 0, 1000);
        assert_eq!(first, 3100);
        assert_eq!(first, second);
    }
}
