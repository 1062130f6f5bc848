use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Extraction settings supplied by the host.
///
/// Column settings name header cells when `includes_header` is set and use
/// the positional `col<N>` convention otherwise (see
/// [`columns::POSITIONAL_PREFIX`](crate::columns::POSITIONAL_PREFIX)).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Directory searched for the export file.
    pub directory: Option<PathBuf>,
    /// File-name prefix identifying the export inside `directory`.
    pub file_prefix: Option<String>,
    /// Column carrying the account identifier.
    pub identifier: String,
    /// Delimited list of columns whose repeated values accumulate into
    /// multi-valued attributes when an account spans several rows.
    pub merge: String,
    /// Column inspected by the ignore rule.
    pub ignore: Option<String>,
    /// Value that causes a row to be skipped when seen in the ignore column.
    pub ignore_value: Option<String>,
    /// Column accumulated into group memberships.
    pub group: Option<String>,
    /// Delimiter splitting the `merge` list.
    pub multivalue_delimiter: String,
    /// Whether the first row carries column names.
    pub includes_header: bool,
    /// Emit each record as soon as its identifier run ends, assuming rows
    /// are pre-sorted by identifier.
    pub uid_sorted: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: None,
            identifier: String::new(),
            merge: String::new(),
            ignore: None,
            ignore_value: None,
            group: None,
            multivalue_delimiter: ";".to_string(),
            includes_header: false,
            uid_sorted: false,
        }
    }
}

impl RosterConfig {
    /// Loads settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Merge column names, split on the configured delimiter. Blank entries
    /// are dropped.
    pub fn merge_names(&self) -> Vec<String> {
        self.merge
            .split(&self.multivalue_delimiter)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Rejects configurations that cannot name an identifier column.
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(RosterError::IncompleteConfig(
                "identifier column is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves the configured export location via directory discovery.
    pub fn source_path(&self) -> Result<PathBuf> {
        match (&self.directory, &self.file_prefix) {
            (Some(directory), Some(prefix)) => discover_source(directory, prefix),
            _ => Err(RosterError::IncompleteConfig(
                "directory and file_prefix are required to discover the export file".to_string(),
            )),
        }
    }
}

/// Locates the export file inside `directory`: the first entry whose name
/// starts with `prefix` wins. Export drops carry date-stamped names, so the
/// configuration only pins the stable prefix.
pub fn discover_source(directory: &Path, prefix: &str) -> Result<PathBuf> {
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(prefix) && entry.path().is_file() {
            return Ok(entry.path());
        }
    }

    Err(RosterError::SourceNotFound {
        directory: directory.to_path_buf(),
        prefix: prefix.to_string(),
    })
}
