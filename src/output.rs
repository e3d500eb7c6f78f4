//! Writers for design matrices and subject lists.

use crate::data::{ColumnKind, DesignTable, Separator, Value};
use crate::error::Result;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The four files written for an output prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Design matrix, `<prefix>` itself.
    pub matrix: PathBuf,
    /// Included subjects, `<prefix>.incl.txt`.
    pub include: PathBuf,
    /// Excluded subjects, `<prefix>.excl.txt`.
    pub exclude: PathBuf,
    /// Full record, `<prefix>.all_info.txt`.
    pub all_info: PathBuf,
}

impl OutputPaths {
    pub fn from_prefix<P: AsRef<Path>>(prefix: P) -> Self {
        let prefix = prefix.as_ref();
        let with = |suffix: &str| {
            let mut s = OsString::from(prefix.as_os_str());
            s.push(suffix);
            PathBuf::from(s)
        };
        Self {
            matrix: prefix.to_path_buf(),
            include: with(".incl.txt"),
            exclude: with(".excl.txt"),
            all_info: with(".all_info.txt"),
        }
    }

    /// Create the parent directory of the prefix if needed.
    pub fn create_parent(&self) -> Result<()> {
        if let Some(parent) = self.matrix.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Format one value for the design matrix.
///
/// Integer columns are written as integers, other numbers with three
/// decimals and missing values as `NaN`.
pub fn format_value(value: &Value, kind: ColumnKind) -> String {
    match (value, kind) {
        (Value::Missing, _) => "NaN".to_string(),
        (Value::Numeric(x), ColumnKind::Integer) => format!("{}", x.round() as i64),
        (Value::Numeric(x), _) => format!("{:.3}", x),
        (Value::Text(s), _) => s.clone(),
    }
}

/// Write the design matrix: one row per subject, no header, no subject IDs.
pub fn write_matrix<W: Write>(table: &DesignTable, writer: &mut W, sep: Separator) -> Result<()> {
    for row in table.rows() {
        let fields: Vec<String> = row
            .values
            .iter()
            .zip(table.columns())
            .map(|(v, col)| format_value(v, col.kind))
            .collect();
        writeln!(writer, "{}", fields.join(sep.as_str()))?;
    }
    Ok(())
}

/// Write the design matrix to a file.
pub fn write_matrix_file<P: AsRef<Path>>(table: &DesignTable, path: P, sep: Separator) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_matrix(table, &mut writer, sep)?;
    writer.flush()?;
    Ok(())
}

/// Write one subject per line.
pub fn write_list<P: AsRef<Path>>(subjects: &[String], path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for s in subjects {
        writeln!(writer, "{}", s)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the record of every input subject.
///
/// The header is the input header plus an `included` column; each line holds
/// a subject's raw input fields followed by `1` if the subject is in the
/// design matrix and `0` otherwise.
pub fn write_all_info<W: Write>(
    original: &DesignTable,
    included: &HashSet<&str>,
    writer: &mut W,
    sep: Separator,
) -> Result<()> {
    let mut header = original.source_header().to_vec();
    header.push("included".to_string());
    writeln!(writer, "{}", header.join(sep.as_str()))?;

    for row in original.rows() {
        let status = if included.contains(row.subject.as_str()) {
            "1"
        } else {
            "0"
        };
        let raw: Vec<&str> = row
            .raw
            .iter()
            .map(|f| if f.is_empty() { "NaN" } else { f.as_str() })
            .collect();
        writeln!(writer, "{}{}{}", raw.join(sep.as_str()), sep.as_str(), status)?;
    }
    Ok(())
}

/// Write the all-info record to a file.
pub fn write_all_info_file<P: AsRef<Path>>(
    original: &DesignTable,
    included: &HashSet<&str>,
    path: P,
    sep: Separator,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_all_info(original, included, &mut writer, sep)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> DesignTable {
        let text = "id,group,age,score\n\
                    B,y,30,\n\
                    A,x,25,1.25\n";
        DesignTable::from_reader(text.as_bytes(), Separator::Comma).unwrap()
    }

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::from_prefix("out/design");

        assert_eq!(paths.matrix, PathBuf::from("out/design"));
        assert_eq!(paths.include, PathBuf::from("out/design.incl.txt"));
        assert_eq!(paths.exclude, PathBuf::from("out/design.excl.txt"));
        assert_eq!(paths.all_info, PathBuf::from("out/design.all_info.txt"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&Value::Numeric(3.0), ColumnKind::Integer), "3");
        assert_eq!(format_value(&Value::Numeric(-0.12345), ColumnKind::Float), "-0.123");
        assert_eq!(format_value(&Value::Missing, ColumnKind::Float), "NaN");
        assert_eq!(
            format_value(&Value::Text("ctl".into()), ColumnKind::Categorical),
            "ctl"
        );
    }

    #[test]
    fn test_write_matrix() {
        let table = create_test_table();
        let mut buf = Vec::new();

        write_matrix(&table, &mut buf, Separator::Space).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "x 25 1.250\ny 30 NaN\n");
    }

    #[test]
    fn test_write_all_info() {
        let table = create_test_table();
        let included: HashSet<&str> = ["A"].into_iter().collect();
        let mut buf = Vec::new();

        write_all_info(&table, &included, &mut buf, Separator::Tab).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id\tgroup\tage\tscore\tincluded");
        assert_eq!(lines[1], "A\tx\t25\t1.25\t1");
        assert_eq!(lines[2], "B\ty\t30\tNaN\t0");
    }

    #[test]
    fn test_write_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subs.txt");

        write_list(&["sub-001".to_string(), "sub-002".to_string()], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "sub-001\nsub-002\n");
    }
}
