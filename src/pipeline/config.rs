//! Run configuration, loadable from YAML.

use crate::data::{ColumnSelection, Separator, SubjectSet};
use crate::error::{DesignError, Result};
use crate::pipeline::Pipeline;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything needed for one run.
///
/// List fields hold either a literal list (`"sub-001,sub-002"`) or the path
/// of a file with one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignConfig {
    /// Input table.
    pub input: Option<PathBuf>,
    /// Output prefix.
    pub prefix: Option<PathBuf>,
    /// Subjects to remove.
    pub rm_list: Option<String>,
    /// Subjects to retain.
    pub ret_list: Option<String>,
    /// Covariate column indices to retain.
    pub ret_cols: Option<String>,
    /// Covariate column indices to demean.
    pub demean: Option<String>,
    /// Keep subjects with missing covariates.
    pub keep_nan: bool,
    /// Input separator; detected when absent.
    pub in_sep: Option<Separator>,
    /// Output separator; space when absent.
    pub sep: Option<Separator>,
}

impl DesignConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(DesignError::from)
    }

    /// Load from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DesignError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(DesignError::from)
    }

    /// Overlay `other` on top of `self`: every value set in `other` wins.
    pub fn merge(self, other: DesignConfig) -> Self {
        Self {
            input: other.input.or(self.input),
            prefix: other.prefix.or(self.prefix),
            rm_list: other.rm_list.or(self.rm_list),
            ret_list: other.ret_list.or(self.ret_list),
            ret_cols: other.ret_cols.or(self.ret_cols),
            demean: other.demean.or(self.demean),
            keep_nan: self.keep_nan || other.keep_nan,
            in_sep: other.in_sep.or(self.in_sep),
            sep: other.sep.or(self.sep),
        }
    }

    /// Input path, required.
    pub fn input_path(&self) -> Result<&Path> {
        self.input
            .as_deref()
            .ok_or_else(|| DesignError::Config("No input file given".to_string()))
    }

    /// Output prefix, required.
    pub fn output_prefix(&self) -> Result<&Path> {
        self.prefix
            .as_deref()
            .ok_or_else(|| DesignError::Config("No output prefix given".to_string()))
    }

    /// Output separator.
    pub fn output_separator(&self) -> Separator {
        self.sep.unwrap_or_default()
    }

    /// Parse the list options into a pipeline.
    ///
    /// List files are read here.
    pub fn to_pipeline(&self) -> Result<Pipeline> {
        if self.rm_list.is_some() && self.ret_list.is_some() {
            return Err(DesignError::Config(
                "--rm-list and --ret-list are mutually exclusive".to_string(),
            ));
        }

        let mut pipeline = Pipeline::new().keep_missing(self.keep_nan);
        if let Some(arg) = &self.rm_list {
            pipeline = pipeline.remove_subjects(SubjectSet::parse(arg)?);
        }
        if let Some(arg) = &self.ret_list {
            pipeline = pipeline.retain_subjects(SubjectSet::parse(arg)?);
        }
        if let Some(arg) = &self.ret_cols {
            pipeline = pipeline.select_columns(ColumnSelection::parse(arg)?);
        }
        if let Some(arg) = &self.demean {
            pipeline = pipeline.demean(ColumnSelection::parse(arg)?.indices().iter().copied());
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_yaml() {
        let config = DesignConfig {
            input: Some(PathBuf::from("participants.tsv")),
            prefix: Some(PathBuf::from("out/design")),
            rm_list: Some("sub-003,sub-007".to_string()),
            ret_cols: Some("1,3".to_string()),
            sep: Some(Separator::Comma),
            ..Default::default()
        };

        let yaml = config.to_yaml().unwrap();
        let parsed = DesignConfig::from_yaml(&yaml).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "input: data.csv\nkeep_nan: true\nsep: tab\n";
        let config = DesignConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.input, Some(PathBuf::from("data.csv")));
        assert!(config.keep_nan);
        assert_eq!(config.output_separator(), Separator::Tab);
        assert!(config.output_prefix().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(DesignConfig::from_yaml("inptu: data.csv\n").is_err());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = DesignConfig {
            input: Some(PathBuf::from("a.tsv")),
            ret_cols: Some("0".to_string()),
            keep_nan: true,
            ..Default::default()
        };
        let overrides = DesignConfig {
            input: Some(PathBuf::from("b.tsv")),
            prefix: Some(PathBuf::from("out")),
            ..Default::default()
        };

        let merged = base.merge(overrides);

        assert_eq!(merged.input, Some(PathBuf::from("b.tsv")));
        assert_eq!(merged.prefix, Some(PathBuf::from("out")));
        assert_eq!(merged.ret_cols.as_deref(), Some("0"));
        assert!(merged.keep_nan);
    }

    #[test]
    fn test_both_lists_rejected() {
        let config = DesignConfig {
            rm_list: Some("a".to_string()),
            ret_list: Some("b".to_string()),
            ..Default::default()
        };

        assert!(matches!(config.to_pipeline(), Err(DesignError::Config(_))));
    }
}
