//! Data structures for design tables and the lists that filter them.

mod lists;
mod separator;
mod table;

pub use lists::{parse_list, ColumnSelection, SubjectSet};
pub use separator::Separator;
pub use table::{is_missing_token, Column, ColumnKind, DesignTable, Row, Value};
