//! Subject and column lists given as literals or files.

use crate::error::{DesignError, Result};
use std::fs;
use std::path::Path;

/// Split a list argument into entries.
///
/// If `arg` names an existing file, each non-blank line is an entry.
/// Otherwise `arg` is a literal list separated by commas, semicolons, tabs
/// or whitespace (e.g. `"sub-001,sub-002"`).
pub fn parse_list(arg: &str) -> Result<Vec<String>> {
    let path = Path::new(arg);
    let entries: Vec<String> = if path.is_file() {
        let text = fs::read_to_string(path).map_err(|source| DesignError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        text.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    } else {
        arg.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    };

    if entries.is_empty() {
        return Err(DesignError::Config(format!(
            "List '{}' contains no entries",
            arg
        )));
    }
    Ok(entries)
}

/// Subjects named by ID or by zero-based row index.
///
/// Entries are kept as written; they are resolved against a table by the
/// subject filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSet {
    entries: Vec<String>,
}

impl SubjectSet {
    /// Create from explicit entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse from a literal list or a file (see [`parse_list`]).
    pub fn parse(arg: &str) -> Result<Self> {
        Ok(Self {
            entries: parse_list(arg)?,
        })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered zero-based indices into the covariate columns.
///
/// Index 0 is the first column after the subject ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    indices: Vec<usize>,
}

impl ColumnSelection {
    /// Create from indices; repeated indices keep their first position.
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut unique: Vec<usize> = Vec::new();
        for idx in indices {
            if unique.contains(&idx) {
                log::warn!("Column index {} listed more than once", idx);
            } else {
                unique.push(idx);
            }
        }
        Self { indices: unique }
    }

    /// Parse from a literal list or a file of integer indices.
    pub fn parse(arg: &str) -> Result<Self> {
        let indices = parse_list(arg)?
            .iter()
            .map(|s| {
                s.parse::<usize>().map_err(|_| {
                    DesignError::Config(format!(
                        "Column index '{}' is not a non-negative integer",
                        s
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(indices))
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}
