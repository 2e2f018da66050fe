// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Course-name normalization.
//!
//! Institutions spell the same course in several ways across tables. A
//! substitution dictionary maps known spellings onto one standardized
//! name so that filtering and grouping treat them as the same course.

use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while loading a course-name dictionary.
#[derive(Debug, Error)]
pub enum CourseNamesError {
    /// The dictionary file could not be read.
    #[error("Failed to read course-name dictionary '{path}': {source}")]
    Io {
        /// Path of the dictionary.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The dictionary file is not valid CSV.
    #[error("Malformed course-name dictionary '{path}': {source}")]
    Malformed {
        /// Path of the dictionary.
        path: String,
        /// The underlying CSV error.
        source: csv::Error,
    },
}

/// Maps course-name spellings onto standardized names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseNameNormalizer {
    /// Upper-cased original name to replacement.
    substitutions: HashMap<String, String>,
}

impl CourseNameNormalizer {
    /// Creates a normalizer without substitutions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalizer from `(original, replacement)` pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let substitutions: HashMap<String, String> = pairs
            .into_iter()
            .map(|(original, replacement)| {
                (original.as_ref().trim().to_uppercase(), replacement.into())
            })
            .collect();
        Self { substitutions }
    }

    /// Reads a two-column CSV dictionary (`original,replacement`) with a
    /// header row. Rows missing either column are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid CSV.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut pairs: Vec<(String, String)> = Vec::new();
        for result in csv_reader.records() {
            let record: StringRecord = result?;
            let original: Option<&str> = record.get(0).map(str::trim).filter(|s| !s.is_empty());
            let replacement: Option<&str> =
                record.get(1).map(str::trim).filter(|s| !s.is_empty());
            if let (Some(original), Some(replacement)) = (original, replacement) {
                pairs.push((original.to_string(), replacement.to_string()));
            }
        }

        Ok(Self::from_pairs(pairs))
    }

    /// Loads a dictionary file.
    ///
    /// A missing file is not an error: it is logged and yields an empty
    /// dictionary.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_optional(path: &Path) -> Result<Self, CourseNamesError> {
        let display_path: String = path.display().to_string();

        let file: std::fs::File = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    path = %display_path,
                    "Course-name dictionary not found, names will not be substituted"
                );
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(CourseNamesError::Io {
                    path: display_path,
                    source,
                });
            }
        };

        let normalizer: Self =
            Self::from_csv_reader(file).map_err(|source| CourseNamesError::Malformed {
                path: display_path.clone(),
                source,
            })?;

        debug!(
            path = %display_path,
            entries = normalizer.len(),
            "Loaded course-name dictionary"
        );

        Ok(normalizer)
    }

    /// Standardizes a course name.
    ///
    /// The name is trimmed and upper-cased, substituted when the
    /// dictionary knows it, and upper-cased again.
    #[must_use]
    pub fn normalize(&self, name: &str) -> String {
        let key: String = name.trim().to_uppercase();
        self.substitutions
            .get(&key)
            .map_or_else(|| key.clone(), |replacement| replacement.to_uppercase())
    }

    /// Standardizes an optional name; absent names become `""`.
    #[must_use]
    pub fn normalize_opt(&self, name: Option<&str>) -> String {
        name.map(|n| self.normalize(n)).unwrap_or_default()
    }

    /// Returns the number of substitutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.substitutions.len()
    }

    /// Returns whether the dictionary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.substitutions.is_empty()
    }
}
