//! Subject removal and retention lists.

use crate::data::{DesignTable, SubjectSet};
use crate::error::{DesignError, Result};
use std::collections::HashSet;

/// Which subjects to drop: everyone listed, or everyone not listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectFilter {
    /// Remove the listed subjects.
    Remove(SubjectSet),
    /// Keep only the listed subjects.
    Retain(SubjectSet),
}

impl SubjectFilter {
    /// Build from optional remove and retain lists.
    ///
    /// Exactly one of the two must be given.
    pub fn from_lists(remove: Option<SubjectSet>, retain: Option<SubjectSet>) -> Result<Self> {
        match (remove, retain) {
            (Some(rm), None) => Ok(SubjectFilter::Remove(rm)),
            (None, Some(ret)) => Ok(SubjectFilter::Retain(ret)),
            (Some(_), Some(_)) => Err(DesignError::Config(
                "A remove list and a retain list are mutually exclusive".to_string(),
            )),
            (None, None) => Err(DesignError::Config(
                "Either a remove list or a retain list is required".to_string(),
            )),
        }
    }

    fn set(&self) -> &SubjectSet {
        match self {
            SubjectFilter::Remove(s) | SubjectFilter::Retain(s) => s,
        }
    }
}

/// Outcome of subject filtering.
#[derive(Debug, Clone)]
pub struct SubjectFilterResult {
    /// Table holding the kept subjects.
    pub table: DesignTable,
    /// Kept subjects, in table order.
    pub included: Vec<String>,
    /// Dropped subjects, in table order.
    pub excluded: Vec<String>,
}

/// Apply a remove or retain list to a table.
///
/// Each list entry is matched against subject IDs first; an entry that is no
/// subject ID but a non-negative integer selects the row at that position in
/// the input file. Unknown IDs are reported and ignored, out-of-range indices
/// are an error.
pub fn filter_subjects(table: &DesignTable, filter: &SubjectFilter) -> Result<SubjectFilterResult> {
    let listed = resolve_subjects(table, filter.set())?;

    let keep = |subject: &str| match filter {
        SubjectFilter::Remove(_) => !listed.contains(subject),
        SubjectFilter::Retain(_) => listed.contains(subject),
    };

    let (included, excluded): (Vec<String>, Vec<String>) = table
        .subject_ids()
        .into_iter()
        .map(String::from)
        .partition(|s| keep(s));

    log::info!(
        "Subject filter kept {} of {} subjects",
        included.len(),
        table.n_rows()
    );

    Ok(SubjectFilterResult {
        table: table.filter_rows(|row| keep(&row.subject)),
        included,
        excluded,
    })
}

/// Resolve list entries to the subject IDs they name.
fn resolve_subjects(table: &DesignTable, set: &SubjectSet) -> Result<HashSet<String>> {
    let mut resolved = HashSet::new();

    for entry in set.entries() {
        if table.has_subject(entry) {
            resolved.insert(entry.clone());
            continue;
        }
        match entry.parse::<usize>() {
            Ok(index) => {
                let row = table
                    .rows()
                    .iter()
                    .find(|r| r.source_index == index)
                    .ok_or_else(|| {
                        DesignError::Config(format!(
                            "Subject index {} out of range ({} subjects)",
                            index,
                            table.n_rows()
                        ))
                    })?;
                resolved.insert(row.subject.clone());
            }
            Err(_) => {
                log::warn!("Subject '{}' not found in input table; ignoring", entry);
            }
        }
    }

    Ok(resolved)
}
