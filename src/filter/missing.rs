//! Dropping subjects with missing covariates.

use crate::data::DesignTable;

/// Outcome of missing-data filtering.
#[derive(Debug, Clone)]
pub struct MissingFilterResult {
    /// Table without the dropped subjects.
    pub table: DesignTable,
    /// Subjects dropped for missing data, in table order.
    pub dropped: Vec<String>,
}

/// Per-column count of missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingCount {
    pub column: String,
    pub n_missing: usize,
}

/// Drop every subject with a missing value in any retained column.
///
/// With `keep_missing` set the table is returned unchanged.
pub fn filter_missing(table: &DesignTable, keep_missing: bool) -> MissingFilterResult {
    if keep_missing {
        return MissingFilterResult {
            table: table.clone(),
            dropped: Vec::new(),
        };
    }

    let dropped: Vec<String> = table
        .rows()
        .iter()
        .filter(|r| r.values.iter().any(|v| v.is_missing()))
        .map(|r| r.subject.clone())
        .collect();

    for subject in &dropped {
        log::debug!("Dropping '{}': missing covariate data", subject);
    }
    if !dropped.is_empty() {
        log::info!("Dropped {} subjects with missing data", dropped.len());
    }

    MissingFilterResult {
        table: table.filter_rows(|r| !r.values.iter().any(|v| v.is_missing())),
        dropped,
    }
}

/// Count missing values in each retained column.
pub fn count_missing(table: &DesignTable) -> Vec<MissingCount> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(pos, col)| MissingCount {
            column: col.name.clone(),
            n_missing: table
                .column_values(pos)
                .iter()
                .filter(|v| v.is_missing())
                .count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ColumnSelection, Separator};
    use crate::filter::select_columns;

    fn create_test_table() -> DesignTable {
        let text = "id,age,iq,group\n\
                    A,25,100,x\n\
                    B,NA,110,y\n\
                    C,30,,x\n\
                    D,35,120,\n";
        DesignTable::from_reader(text.as_bytes(), Separator::Comma).unwrap()
    }

    #[test]
    fn test_drop_missing() {
        let table = create_test_table();

        let result = filter_missing(&table, false);

        assert_eq!(result.table.subject_ids(), vec!["A"]);
        assert_eq!(result.dropped, vec!["B", "C", "D"]);
    }

    #[test]
    fn test_keep_missing() {
        let table = create_test_table();

        let result = filter_missing(&table, true);

        assert_eq!(result.table.n_rows(), 4);
        assert!(result.dropped.is_empty());
    }

    #[test]
    fn test_only_retained_columns_count() {
        let table = create_test_table();
        let selected = select_columns(&table, Some(&ColumnSelection::new([1]))).unwrap();

        let result = filter_missing(&selected, false);

        assert_eq!(result.table.subject_ids(), vec!["A", "B", "D"]);
        assert_eq!(result.dropped, vec!["C"]);
    }

    #[test]
    fn test_count_missing() {
        let table = create_test_table();
        let counts: Vec<usize> = count_missing(&table).iter().map(|c| c.n_missing).collect();

        assert_eq!(counts, vec![1, 1, 1]);
    }
}
