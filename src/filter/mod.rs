//! Filtering primitives for design tables.

pub mod columns;
pub mod missing;
pub mod subjects;

pub use columns::select_columns;
pub use missing::{count_missing, filter_missing, MissingCount, MissingFilterResult};
pub use subjects::{filter_subjects, SubjectFilter, SubjectFilterResult};
