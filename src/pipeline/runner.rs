//! Pipeline runner: subjects, then columns, then missing data, then demeaning.

use crate::data::{ColumnSelection, DesignTable, Separator, SubjectSet};
use crate::error::Result;
use crate::filter::{
    count_missing, filter_missing, filter_subjects, select_columns, SubjectFilter,
};
use crate::normalize::{demean_columns, ColumnMean};
use crate::output::{write_all_info_file, write_list, write_matrix_file, OutputPaths};
use crate::pipeline::DesignConfig;
use std::collections::HashSet;
use std::fmt;

/// Builder for a design-matrix run.
///
/// Stages always run in the same order regardless of the order the builder
/// methods are called in.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    remove: Option<SubjectSet>,
    retain: Option<SubjectSet>,
    columns: Option<ColumnSelection>,
    demean: Vec<usize>,
    keep_missing: bool,
}

impl Pipeline {
    /// Create a pipeline that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the listed subjects.
    pub fn remove_subjects(mut self, subjects: SubjectSet) -> Self {
        self.remove = Some(subjects);
        self
    }

    /// Keep only the listed subjects.
    pub fn retain_subjects(mut self, subjects: SubjectSet) -> Self {
        self.retain = Some(subjects);
        self
    }

    /// Keep only these covariate columns, in this order.
    pub fn select_columns(mut self, columns: ColumnSelection) -> Self {
        self.columns = Some(columns);
        self
    }

    /// Demean these covariate columns (input covariate indices).
    pub fn demean(mut self, columns: impl IntoIterator<Item = usize>) -> Self {
        self.demean = columns.into_iter().collect();
        self
    }

    /// Keep subjects with missing covariates instead of dropping them.
    pub fn keep_missing(mut self, keep: bool) -> Self {
        self.keep_missing = keep;
        self
    }

    /// Run the pipeline on a loaded table.
    pub fn run(&self, table: &DesignTable) -> Result<DesignOutcome> {
        let subjects = if self.remove.is_some() || self.retain.is_some() {
            let filter = SubjectFilter::from_lists(self.remove.clone(), self.retain.clone())?;
            filter_subjects(table, &filter)?.table
        } else {
            table.clone()
        };

        let selected = select_columns(&subjects, self.columns.as_ref())?;
        for count in count_missing(&selected).iter().filter(|c| c.n_missing > 0) {
            log::info!(
                "Column '{}' has {} missing values",
                count.column,
                count.n_missing
            );
        }
        let complete = filter_missing(&selected, self.keep_missing);

        let (design, means) = if self.demean.is_empty() {
            (complete.table, Vec::new())
        } else {
            let demeaned = demean_columns(&complete.table, &self.demean)?;
            (demeaned.table, demeaned.means)
        };

        let kept: HashSet<&str> = design.subject_ids().into_iter().collect();
        let (included, excluded): (Vec<String>, Vec<String>) = table
            .subject_ids()
            .into_iter()
            .map(String::from)
            .partition(|s| kept.contains(s.as_str()));

        if design.n_rows() == 0 {
            log::warn!("Every subject was excluded; the design matrix is empty");
        }

        Ok(DesignOutcome {
            original: table.clone(),
            design,
            included,
            excluded,
            dropped_missing: complete.dropped,
            means,
        })
    }
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct DesignOutcome {
    /// The table as loaded.
    pub original: DesignTable,
    /// The final design table.
    pub design: DesignTable,
    /// Subjects in the design matrix, sorted.
    pub included: Vec<String>,
    /// Subjects left out for any reason, sorted.
    pub excluded: Vec<String>,
    /// Subjects left out for missing data.
    pub dropped_missing: Vec<String>,
    /// Means removed by demeaning.
    pub means: Vec<ColumnMean>,
}

impl DesignOutcome {
    /// Write the matrix, both subject lists and the all-info record.
    pub fn write(&self, paths: &OutputPaths, sep: Separator) -> Result<()> {
        paths.create_parent()?;
        write_matrix_file(&self.design, &paths.matrix, sep)?;
        write_list(&self.included, &paths.include)?;
        write_list(&self.excluded, &paths.exclude)?;

        let included: HashSet<&str> = self.included.iter().map(String::as_str).collect();
        write_all_info_file(&self.original, &included, &paths.all_info, sep)?;

        log::info!("Wrote design matrix to {:?}", paths.matrix);
        log::debug!(
            "Wrote {:?}, {:?} and {:?}",
            paths.include,
            paths.exclude,
            paths.all_info
        );
        Ok(())
    }
}

impl fmt::Display for DesignOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Design Matrix")?;
        writeln!(f, "  Subjects in:   {}", self.original.n_rows())?;
        writeln!(f, "  Included:      {}", self.included.len())?;
        writeln!(f, "  Excluded:      {}", self.excluded.len())?;
        writeln!(f, "  Missing data:  {}", self.dropped_missing.len())?;
        writeln!(f, "  Columns:       {}", self.design.column_names().join(", "))?;
        for m in &self.means {
            writeln!(f, "  Demeaned {} (mean {:.3})", m.column, m.mean)?;
        }
        Ok(())
    }
}

/// Load the input named by `config`, run it and write every output file.
pub fn run_config(config: &DesignConfig) -> Result<DesignOutcome> {
    let input = config.input_path()?;
    let paths = OutputPaths::from_prefix(config.output_prefix()?);
    let pipeline = config.to_pipeline()?;

    log::info!("Loading {:?}", input);
    let table = DesignTable::from_path(input, config.in_sep)?;
    log::info!(
        "Loaded {} subjects x {} covariates",
        table.n_rows(),
        table.n_columns()
    );

    let outcome = pipeline.run(&table)?;
    outcome.write(&paths, config.output_separator())?;
    Ok(outcome)
}
