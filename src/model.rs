use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A logical identity aggregated from one or more spreadsheet rows sharing
/// an identifier.
///
/// Attribute values and group memberships keep row encounter order; group
/// duplicates are preserved at this layer and deduplicated only by callers
/// that ask for distinct groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique key within one extraction pass.
    pub identifier: String,
    /// Attribute name → values, in the order rows were encountered.
    pub attributes: BTreeMap<String, Vec<String>>,
    /// Group memberships in row encounter order.
    pub groups: Vec<String>,
}

impl Account {
    /// Creates an empty account bound to the provided identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            attributes: BTreeMap::new(),
            groups: Vec::new(),
        }
    }

    /// Appends a value to the named attribute, creating the sequence on
    /// first use.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Appends a group membership.
    pub fn add_group(&mut self, group: impl Into<String>) {
        self.groups.push(group.into());
    }
}
