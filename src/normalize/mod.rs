//! Covariate transformations applied after filtering.

pub mod demean;

pub use demean::{demean_columns, ColumnMean, DemeanResult};
