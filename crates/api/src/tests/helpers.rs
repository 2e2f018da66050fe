// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use time::Date;
use time::macros::date;

use crate::{CourseNameNormalizer, ImportedTable, ManualCalculationRequest, import_table};

pub const TODAY: Date = date!(2026 - 10 - 16);

pub const EPSILON: f64 = 1e-9;

/// A full-year 2024 on-site cycle of 800 hours with 30 enrollments.
pub fn create_manual_request() -> ManualCalculationRequest {
    ManualCalculationRequest {
        cycle_start: Some(String::from("01/01/2024")),
        cycle_end: Some(String::from("31/12/2024")),
        cycle_workload_hours: 800,
        catalog_workload_hours: 800,
        matrix_workload_hours: None,
        course_weight: None,
        base_year_enrollments: 30,
        course_type: Some(String::from("TECNICO")),
        offering_type: Some(String::from("SUBSEQUENTE")),
        financing_modality: None,
        is_agricultural: false,
        is_eligible: true,
        year: Some(2024),
    }
}

/// An exported enrollment-conference sheet: two title rows, the header,
/// and five data rows. Row 3 has no base-year enrollments and row 5 has
/// no course name.
pub fn sample_table_csv() -> String {
    [
        "Conferência de matrículas - 4ª fase,,,,,,,,,,,,,",
        ",,,,,,,,,,,,,",
        "Instituição,Unidade de Ensino,Nome do curso,Tipo de Curso,Tipo de Oferta,\
         DIC (Data de início do ciclo),DTC  (Data de término do ciclo),\
         CHC (Carga horária do ciclo),CHMC (Carga horária mínima do catálogo),\
         PC (Peso do curso),QTM1P (Matrículas no ano base),\
         Situação de acordo com o tipo de financiamento,Agropecuária,Apto",
        "IFXX,Campus Norte,Técnico em Agropecuária,Técnico,Integrado,01/02/2022,31/12/2024,\
         1200,1200,\"1,0\",20,PRESENCIAL,Sim,Sim",
        "IFXX,Campus Norte,Técnico em Agropecuária,Técnico,Integrado,01/02/2024,31/12/2026,\
         1200,1200,\"1,0\",35,PRESENCIAL,Sim,Sim",
        "IFXX,Campus Norte,Técnico em Informática,Técnico,Subsequente,01/03/2024,31/12/2024,\
         800,800,\"1,0\",,PRESENCIAL,Não,Sim",
        "IFXX,Campus Sul,Administração,Qualificação Profissional (FIC),Não se aplica,\
         01/08/2024,30/11/2024,160,200,\"1,0\",25,EAD FINANCIAMENTO EXTERNO,Não,Não",
        "IFXX,Campus Sul,,Técnico,Subsequente,01/03/2024,31/12/2024,800,800,\"1,0\",10,\
         PRESENCIAL,Não,Sim",
    ]
    .join("\n")
}

pub fn create_sample_table() -> ImportedTable {
    import_table(&sample_table_csv(), &CourseNameNormalizer::new()).unwrap()
}
