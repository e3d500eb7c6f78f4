//! Field separators for input tables and output matrices.

use crate::error::{DesignError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A single-character field separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    /// A single space (FSL's default matrix layout).
    #[default]
    Space,
    /// A tab character.
    Tab,
    /// A comma.
    Comma,
}

impl Separator {
    /// The separator as a byte, for the csv reader.
    pub fn as_byte(self) -> u8 {
        match self {
            Separator::Space => b' ',
            Separator::Tab => b'\t',
            Separator::Comma => b',',
        }
    }

    /// The separator as a string slice, for joining output fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Tab => "\t",
            Separator::Comma => ",",
        }
    }

    /// Guess the separator of a table file.
    ///
    /// The extension wins (`.tsv` is tab, `.csv` is comma); otherwise the
    /// header line is inspected for commas, then tabs, falling back to space.
    pub fn detect(path: &Path, header_line: &str) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("tsv") => Separator::Tab,
            Some("csv") => Separator::Comma,
            _ => Self::sniff(header_line),
        }
    }

    /// Guess the separator from a single line of text.
    pub fn sniff(line: &str) -> Self {
        if line.contains(',') {
            Separator::Comma
        } else if line.contains('\t') {
            Separator::Tab
        } else {
            Separator::Space
        }
    }
}

impl FromStr for Separator {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            " " | "space" | "SPACE" => Ok(Separator::Space),
            "\t" | "\\t" | "tab" | "TAB" => Ok(Separator::Tab),
            "," | "comma" | "COMMA" => Ok(Separator::Comma),
            other => Err(DesignError::Config(format!(
                "Unsupported separator '{}' (expected tab, comma or space)",
                other
            ))),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Separator::Space => "space",
            Separator::Tab => "tab",
            Separator::Comma => "comma",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_names_and_literals() {
        assert_eq!("tab".parse::<Separator>().unwrap(), Separator::Tab);
        assert_eq!("\t".parse::<Separator>().unwrap(), Separator::Tab);
        assert_eq!("\\t".parse::<Separator>().unwrap(), Separator::Tab);
        assert_eq!(",".parse::<Separator>().unwrap(), Separator::Comma);
        assert_eq!(" ".parse::<Separator>().unwrap(), Separator::Space);
        assert!("|".parse::<Separator>().is_err());
    }

    #[test]
    fn test_detect_prefers_extension() {
        let line = "subject,age";
        assert_eq!(Separator::detect(Path::new("design.tsv"), line), Separator::Tab);
        assert_eq!(Separator::detect(Path::new("design.CSV"), "a\tb"), Separator::Comma);
        assert_eq!(Separator::detect(Path::new("design.txt"), line), Separator::Comma);
        assert_eq!(Separator::detect(Path::new("design.txt"), "a\tb"), Separator::Tab);
        assert_eq!(Separator::detect(Path::new("design"), "a b"), Separator::Space);
    }
}
