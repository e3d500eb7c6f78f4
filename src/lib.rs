//! Group design matrices for FSL-style analyses.
//!
//! This library turns a subject-by-covariate table into the plain-text design
//! matrix expected by group-level neuroimaging tools, together with the
//! bookkeeping that records which subjects made it in.
//!
//! # Overview
//!
//! - **data**: Tables, values, separators and subject/column lists
//! - **filter**: Subject lists, column selection, missing data
//! - **normalize**: Demeaning of numeric covariates
//! - **output**: Matrix, list and all-info writers
//! - **pipeline**: Run configuration and execution
//!
//! # Example
//!
//! ```no_run
//! use mk_design::prelude::*;
//!
//! let table = DesignTable::from_path("participants.tsv", None).unwrap();
//!
//! let outcome = Pipeline::new()
//!     .remove_subjects(SubjectSet::parse("sub-003,sub-007").unwrap())
//!     .select_columns(ColumnSelection::new([1, 3]))
//!     .demean([1])
//!     .run(&table)
//!     .unwrap();
//!
//! outcome
//!     .write(&OutputPaths::from_prefix("group/design"), Separator::Space)
//!     .unwrap();
//! ```

pub mod data;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod output;
pub mod pipeline;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::data::{
        parse_list, Column, ColumnKind, ColumnSelection, DesignTable, Row, Separator, SubjectSet,
        Value,
    };
    pub use crate::error::{DesignError, ErrorKind, Result};
    pub use crate::filter::{
        count_missing, filter_missing, filter_subjects, select_columns, MissingCount,
        MissingFilterResult, SubjectFilter, SubjectFilterResult,
    };
    pub use crate::normalize::{demean_columns, ColumnMean, DemeanResult};
    pub use crate::output::{
        format_value, write_all_info, write_list, write_matrix, OutputPaths,
    };
    pub use crate::pipeline::{run_config, DesignConfig, DesignOutcome, Pipeline};
}
