//! Covariate column selection.

use crate::data::{ColumnSelection, DesignTable};
use crate::error::{DesignError, Result};

/// Keep only the selected covariate columns, in the requested order.
///
/// Indices refer to the covariate columns of the input file (0 is the first
/// column after the subject ID). With no selection every column is kept.
pub fn select_columns(
    table: &DesignTable,
    selection: Option<&ColumnSelection>,
) -> Result<DesignTable> {
    let selection = match selection {
        Some(sel) if !sel.is_empty() => sel,
        _ => return Ok(table.clone()),
    };

    let positions = selection
        .indices()
        .iter()
        .map(|&idx| {
            table
                .position_of(idx)
                .ok_or(DesignError::ColumnOutOfRange {
                    index: idx,
                    n_columns: table.n_source_columns(),
                })
        })
        .collect::<Result<Vec<_>>>()?;

    let selected = table.project(&positions);
    log::debug!("Selected columns: {:?}", selected.column_names());
    Ok(selected)
}
