//! Subject-by-covariate tables.

use crate::data::Separator;
use crate::error::{DesignError, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Tokens read as missing data (the pandas defaults).
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "na", "NaN", "nan", "-nan", "-NaN", "NULL", "null", "None", "#N/A",
];

/// A single covariate value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric value.
    Numeric(f64),
    /// Categorical (non-numeric) value.
    Text(String),
    /// Missing value.
    Missing,
}

impl Value {
    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Try to get as f64.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Whether a raw field denotes missing data.
pub fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw.trim())
}

/// Column type, inferred when the table is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every value is a whole number and none is missing.
    Integer,
    /// Every present value is numeric.
    Float,
    /// At least one value is non-numeric.
    Categorical,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        !matches!(self, ColumnKind::Categorical)
    }
}

/// A covariate column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header name.
    pub name: String,
    /// Inferred type.
    pub kind: ColumnKind,
    /// Index of this column among the covariates of the input file.
    pub source_column: usize,
}

/// One subject's record.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Subject identifier (first field).
    pub subject: String,
    /// Zero-based position of the row in the input file.
    pub source_index: usize,
    /// Covariate values, aligned with the table's columns.
    pub values: Vec<Value>,
    /// All raw fields as read, subject ID included.
    pub raw: Vec<String>,
}

/// A subject-by-covariate table.
///
/// Rows are kept sorted by subject ID. Filtering operations return new
/// tables; the raw input fields and header travel with every row so that the
/// original record can always be reproduced.
#[derive(Debug, Clone)]
pub struct DesignTable {
    /// Full input header, subject column included.
    source_header: Vec<String>,
    /// Retained covariate columns, in output order.
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl DesignTable {
    /// Load a table from a delimited file.
    ///
    /// When `separator` is `None` it is detected from the file extension or
    /// the header line.
    pub fn from_path<P: AsRef<Path>>(path: P, separator: Option<Separator>) -> Result<Self> {
        let path = path.as_ref();
        let open = || {
            File::open(path).map_err(|source| DesignError::Read {
                path: path.to_path_buf(),
                source,
            })
        };

        let separator = match separator {
            Some(sep) => sep,
            None => {
                let mut header_line = String::new();
                BufReader::new(open()?).read_line(&mut header_line)?;
                let sep = Separator::detect(path, &header_line);
                log::debug!("Detected {} separator for {:?}", sep, path);
                sep
            }
        };

        Self::from_reader(open()?, separator)
    }

    /// Load a table from any reader.
    ///
    /// Expected format:
    /// - First row: header (first column names the subject ID)
    /// - Subsequent rows: subject ID followed by covariate values
    ///
    /// A column is numeric if every present value parses as a number,
    /// otherwise categorical.
    pub fn from_reader<R: Read>(reader: R, separator: Separator) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(separator.as_byte())
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            let fields: Vec<String> = record
                .iter()
                // Runs of spaces are a single separator.
                .filter(|f| separator != Separator::Space || !f.is_empty())
                .map(str::to_string)
                .collect();
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }
            records.push((line, fields));
        }

        let mut records = records.into_iter();
        let (_, header) = records
            .next()
            .ok_or_else(|| DesignError::Parse("Input table has no header".to_string()))?;
        if header.len() < 2 {
            return Err(DesignError::Parse(
                "Input table must have a subject ID column and at least one covariate column"
                    .to_string(),
            ));
        }

        // First pass: collect raw fields, check shape
        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        let mut seen = HashSet::new();
        for (line, fields) in records {
            if fields.len() != header.len() {
                return Err(DesignError::RaggedRow {
                    line,
                    expected: header.len(),
                    actual: fields.len(),
                });
            }
            if !seen.insert(fields[0].clone()) {
                return Err(DesignError::Parse(format!(
                    "Duplicate subject ID '{}' at line {}",
                    fields[0], line
                )));
            }
            raw_rows.push(fields);
        }

        if raw_rows.is_empty() {
            return Err(DesignError::Parse("No subjects in input table".to_string()));
        }

        // Infer column types
        let columns: Vec<Column> = header[1..]
            .iter()
            .enumerate()
            .map(|(col_idx, name)| {
                let kind = infer_kind(raw_rows.iter().map(|r| r[col_idx + 1].as_str()));
                Column {
                    name: name.clone(),
                    kind,
                    source_column: col_idx,
                }
            })
            .collect();

        let mut rows: Vec<Row> = raw_rows
            .into_iter()
            .enumerate()
            .map(|(source_index, raw)| {
                let values = columns
                    .iter()
                    .map(|col| parse_value(&raw[col.source_column + 1], col.kind))
                    .collect();
                Row {
                    subject: raw[0].clone(),
                    source_index,
                    values,
                    raw,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.subject.cmp(&b.subject));

        Ok(Self {
            source_header: header,
            columns,
            rows,
        })
    }

    /// Name of the subject ID column.
    pub fn id_column(&self) -> &str {
        &self.source_header[0]
    }

    /// The input header, subject column included.
    pub fn source_header(&self) -> &[String] {
        &self.source_header
    }

    /// Number of covariate columns in the input file.
    pub fn n_source_columns(&self) -> usize {
        self.source_header.len() - 1
    }

    /// Retained covariate columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Retained covariate column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Rows in subject order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of subjects.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of retained covariate columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Subject IDs in order.
    pub fn subject_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.subject.as_str()).collect()
    }

    /// Check if a subject exists.
    pub fn has_subject(&self, subject: &str) -> bool {
        self.rows.iter().any(|r| r.subject == subject)
    }

    /// Position of an input covariate column within this table, if retained.
    pub fn position_of(&self, source_column: usize) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.source_column == source_column)
    }

    /// Get a value for a specific subject and column name.
    pub fn get(&self, subject: &str, column: &str) -> Option<&Value> {
        let pos = self.columns.iter().position(|c| c.name == column)?;
        self.rows
            .iter()
            .find(|r| r.subject == subject)
            .map(|r| &r.values[pos])
    }

    /// All values of the column at `position`.
    pub fn column_values(&self, position: usize) -> Vec<&Value> {
        self.rows.iter().map(|r| &r.values[position]).collect()
    }

    /// Keep only rows matching `keep`.
    pub(crate) fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Row) -> bool,
    {
        let mut filtered = Self {
            source_header: self.source_header.clone(),
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        };
        filtered.refine_kinds();
        filtered
    }

    /// Re-infer categorical columns from the remaining rows.
    ///
    /// A column whose only non-numeric values sat in dropped rows becomes
    /// numeric again. Numeric columns are never demoted.
    fn refine_kinds(&mut self) {
        for pos in 0..self.columns.len() {
            if self.columns[pos].kind.is_numeric() {
                continue;
            }
            let field = self.columns[pos].source_column + 1;
            let kind = infer_kind(self.rows.iter().map(|r| r.raw[field].as_str()));
            if !kind.is_numeric() || self.rows.is_empty() {
                continue;
            }
            log::debug!(
                "Column '{}' is numeric in the remaining rows",
                self.columns[pos].name
            );
            self.columns[pos].kind = kind;
            for row in &mut self.rows {
                row.values[pos] = parse_value(&row.raw[field], kind);
            }
        }
    }

    /// Keep only the columns at `positions`, in that order.
    pub(crate) fn project(&self, positions: &[usize]) -> Self {
        Self {
            source_header: self.source_header.clone(),
            columns: positions.iter().map(|&p| self.columns[p].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| Row {
                    values: positions.iter().map(|&p| r.values[p].clone()).collect(),
                    ..r.clone()
                })
                .collect(),
        }
    }

    /// Replace the values (one per row) and kind of the column at `position`.
    pub(crate) fn replace_column(&mut self, position: usize, values: Vec<Value>, kind: ColumnKind) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns[position].kind = kind;
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.values[position] = value;
        }
    }
}

fn infer_kind<'a, I>(raw: I) -> ColumnKind
where
    I: Iterator<Item = &'a str>,
{
    let mut any_missing = false;
    let mut all_integer = true;
    for v in raw {
        if is_missing_token(v) {
            any_missing = true;
            continue;
        }
        if v.parse::<f64>().is_err() {
            return ColumnKind::Categorical;
        }
        if v.parse::<i64>().is_err() {
            all_integer = false;
        }
    }
    if all_integer && !any_missing {
        ColumnKind::Integer
    } else {
        ColumnKind::Float
    }
}

fn parse_value(raw: &str, kind: ColumnKind) -> Value {
    if is_missing_token(raw) {
        return Value::Missing;
    }
    match kind {
        ColumnKind::Integer | ColumnKind::Float => raw
            .parse::<f64>()
            .map(Value::Numeric)
            .unwrap_or(Value::Missing),
        ColumnKind::Categorical => Value::Text(raw.to_string()),
    }
}
