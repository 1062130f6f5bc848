//! Resolution of configured column roles to concrete indices.
//!
//! Roles are resolved once per pass, either by matching header text or by
//! parsing the positional `col<N>` naming convention, and the resulting
//! [`ColumnMap`] drives the whole row walk.

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};

/// Prefix addressing a column by zero-based position when the sheet has no
/// header row, e.g. `col3` for the fourth column. Existing deployments
/// depend on this exact spelling.
pub const POSITIONAL_PREFIX: &str = "col";

/// Concrete column indices for each configured role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// Positionally indexed column names used when naming attributes.
    pub names: Vec<String>,
    /// Index of the identifier column.
    pub identifier: usize,
    /// Index of the ignore column, when configured and found.
    pub ignore: Option<usize>,
    /// Indices of the merge columns, in header order.
    pub merge: Vec<usize>,
    /// Index of the group column, when configured and found.
    pub group: Option<usize>,
}

impl ColumnMap {
    /// Name of the column at `index`, or an empty string for cells beyond
    /// the header width.
    pub fn name_of(&self, index: usize) -> &str {
        self.names.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Resolves the configured roles against the header declaration.
///
/// An unresolved identifier is a fatal configuration error; unresolved
/// optional roles stay absent and the aggregator treats them as not
/// applicable.
pub fn resolve(config: &RosterConfig, header: &[String]) -> Result<ColumnMap> {
    if config.includes_header {
        resolve_by_name(config, header)
    } else {
        resolve_by_position(config, header)
    }
}

fn resolve_by_name(config: &RosterConfig, header: &[String]) -> Result<ColumnMap> {
    let merge_names = config.merge_names();
    let mut identifier = None;
    let mut ignore = None;
    let mut merge = Vec::new();
    let mut group = None;

    for (index, cell) in header.iter().enumerate() {
        if *cell == config.identifier {
            identifier = Some(index);
        } else if merge_names.iter().any(|name| name == cell) {
            merge.push(index);
        } else if config.ignore.as_deref() == Some(cell.as_str()) {
            ignore = Some(index);
        } else if config.group.as_deref() == Some(cell.as_str()) {
            group = Some(index);
        }
    }

    let identifier = identifier
        .ok_or_else(|| RosterError::UnresolvedIdentifier(config.identifier.clone()))?;

    Ok(ColumnMap {
        names: header.to_vec(),
        identifier,
        ignore,
        merge,
        group,
    })
}

fn resolve_by_position(config: &RosterConfig, header: &[String]) -> Result<ColumnMap> {
    let identifier = parse_position(&config.identifier)?;
    let ignore = config.ignore.as_deref().map(parse_position).transpose()?;
    let group = config.group.as_deref().map(parse_position).transpose()?;
    let merge = config
        .merge_names()
        .iter()
        .map(|name| parse_position(name))
        .collect::<Result<Vec<_>>>()?;

    Ok(ColumnMap {
        names: header.to_vec(),
        identifier,
        ignore,
        merge,
        group,
    })
}

/// Parses the zero-based index out of a `col<N>` reference.
fn parse_position(name: &str) -> Result<usize> {
    name.strip_prefix(POSITIONAL_PREFIX)
        .and_then(|suffix| suffix.parse().ok())
        .ok_or_else(|| RosterError::InvalidColumnRef(name.to_string()))
}
