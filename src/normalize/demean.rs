//! Mean-centering of numeric covariates.

use crate::data::{ColumnKind, DesignTable, Value};
use crate::error::{DesignError, Result};

/// The mean removed from one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMean {
    /// Column name.
    pub column: String,
    /// Index of the column among the input covariates.
    pub source_column: usize,
    /// Mean of the present values (NaN if there were none).
    pub mean: f64,
    /// Number of values the mean was taken over.
    pub n: usize,
}

/// A table with demeaned columns.
#[derive(Debug, Clone)]
pub struct DemeanResult {
    pub table: DesignTable,
    pub means: Vec<ColumnMean>,
}

/// Subtract the column mean from each listed column.
///
/// `columns` uses input covariate indices, the same index space as a
/// column selection. Every listed column must still be in the table and
/// must be numeric. Missing values are left out of the mean and stay missing.
pub fn demean_columns(table: &DesignTable, columns: &[usize]) -> Result<DemeanResult> {
    let mut out = table.clone();
    let mut means = Vec::with_capacity(columns.len());

    for &source_column in columns {
        if source_column >= table.n_source_columns() {
            return Err(DesignError::ColumnOutOfRange {
                index: source_column,
                n_columns: table.n_source_columns(),
            });
        }
        let pos = table.position_of(source_column).ok_or_else(|| {
            DesignError::Config(format!(
                "Cannot demean column {} ('{}'): it is not among the retained columns",
                source_column,
                table.source_header()[source_column + 1]
            ))
        })?;
        let name = table.columns()[pos].name.clone();

        let values = table.column_values(pos);
        let mut present = Vec::with_capacity(values.len());
        for (row, value) in table.rows().iter().zip(&values) {
            match value {
                Value::Numeric(x) => present.push(*x),
                Value::Missing => {}
                Value::Text(s) => {
                    return Err(DesignError::NonNumeric {
                        column: name,
                        subject: row.subject.clone(),
                        value: s.clone(),
                    })
                }
            }
        }

        if present.is_empty() {
            log::warn!("Column '{}' has no values to demean; left unchanged", name);
            means.push(ColumnMean {
                column: name,
                source_column,
                mean: f64::NAN,
                n: 0,
            });
            continue;
        }

        let mean = present.iter().sum::<f64>() / present.len() as f64;
        let centered = values
            .iter()
            .map(|v| match v {
                Value::Numeric(x) => Value::Numeric(x - mean),
                other => (*other).clone(),
            })
            .collect();
        out.replace_column(pos, centered, ColumnKind::Float);

        log::info!("Demeaned '{}' (mean {:.4}, n = {})", name, mean, present.len());
        means.push(ColumnMean {
            column: name,
            source_column,
            mean,
            n: present.len(),
        });
    }

    Ok(DemeanResult { table: out, means })
}
