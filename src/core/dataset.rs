//! In-memory named-column dataset.
//!
//! A thin tabular container: the calibration pipeline only needs to look up
//! columns by name and bind them into a design matrix. Construction
//! validates shape eagerly; downstream code can assume equal-length,
//! all-finite columns.

use faer::Col;

use crate::core::error::CalibrationError;

/// A named-column table of `f64` observations.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Col<f64>>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from `(name, values)` pairs.
    ///
    /// Fails with `InvalidData` if columns are empty, ragged, duplicated,
    /// or contain non-finite values.
    pub fn from_columns<S, I>(columns: I) -> Result<Self, CalibrationError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Vec<f64>)>,
    {
        let mut data = Self::new();
        for (name, values) in columns {
            data.push_column(name, values)?;
        }
        Ok(data)
    }

    /// Append a column, validating its shape against the existing columns.
    pub fn push_column<S: Into<String>>(
        &mut self,
        name: S,
        values: Vec<f64>,
    ) -> Result<(), CalibrationError> {
        let name = name.into();
        if values.is_empty() {
            return Err(CalibrationError::InvalidData {
                reason: format!("column `{name}` is empty"),
            });
        }
        if let Some(n) = self.columns.first().map(|c| c.nrows()) {
            if values.len() != n {
                return Err(CalibrationError::InvalidData {
                    reason: format!(
                        "column `{name}` has {} rows, expected {n}",
                        values.len()
                    ),
                });
            }
        }
        if self.names.iter().any(|existing| *existing == name) {
            return Err(CalibrationError::InvalidData {
                reason: format!("duplicate column `{name}`"),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CalibrationError::InvalidData {
                reason: format!("column `{name}` contains non-finite values"),
            });
        }
        self.names.push(name);
        self.columns.push(Col::from_fn(values.len(), |i| values[i]));
        Ok(())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Col<f64>> {
        self.names
            .iter()
            .position(|existing| existing == name)
            .map(|idx| &self.columns[idx])
    }

    /// Number of rows (0 for an empty dataset).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.nrows())
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }
}
