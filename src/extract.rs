//! Row scanning and record aggregation.
//!
//! One pass walks the source rows in file order, folds repeated rows for the
//! same identifier into a single [`Account`], filters rows through the
//! ignore rule, and hands finished records to a [`RecordSink`]. Both
//! emission strategies share the same per-row extraction step and differ
//! only in when a record is pushed.

use std::collections::HashMap;

use tracing::debug;

use crate::columns::ColumnMap;
use crate::model::Account;
use crate::source::{CellSource, Row};

/// Receives finished records.
///
/// Returning `false` stops the pass; this is caller-driven early
/// termination, not an error.
pub trait RecordSink {
    fn handle(&mut self, account: Account) -> bool;
}

impl<F: FnMut(Account) -> bool> RecordSink for F {
    fn handle(&mut self, account: Account) -> bool {
        self(account)
    }
}

/// When finished records are pushed to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Aggregate the whole source, then emit every retained record once.
    /// Emission order is not a contract.
    Buffered,
    /// Assume rows are pre-sorted by identifier and emit each record the
    /// moment a different identifier appears. An out-of-order duplicate
    /// starts a second record rather than reopening an emitted one.
    Sorted,
}

/// One extraction pass over a cell source.
///
/// A pass owns no state between invocations of [`Pass::run`]; every run
/// starts from an empty aggregation state.
#[derive(Debug, Clone)]
pub struct Pass<'a> {
    /// Resolved column roles driving the row walk.
    pub columns: &'a ColumnMap,
    /// Row trigger for the ignore rule; only effective when the ignore
    /// column was resolved.
    pub ignore_value: Option<&'a str>,
    /// Skip the first physical row because it carries the header.
    pub has_header: bool,
    /// Selected emission strategy.
    pub emission: Emission,
}

/// Aggregation state of the selected strategy: every retained record in
/// buffered mode, at most the in-progress record in sorted mode.
enum State {
    Buffered(HashMap<String, Account>),
    Sorted(Option<Account>),
}

impl Pass<'_> {
    /// Runs the pass, pushing finished records into `sink`.
    pub fn run<S, K>(&self, source: &S, sink: &mut K)
    where
        S: CellSource + ?Sized,
        K: RecordSink + ?Sized,
    {
        let mut rows = source.rows();
        if self.has_header {
            rows.next();
        }

        let mut state = match self.emission {
            Emission::Buffered => State::Buffered(HashMap::new()),
            Emission::Sorted => State::Sorted(None),
        };

        for row in rows {
            let Some(identifier) = self.identifier_of(&row) else {
                continue;
            };
            if self.is_ignored(&row) {
                continue;
            }

            let flushed = self.fold_row(&mut state, identifier, &row);
            if let Some(finished) = flushed {
                if !sink.handle(finished) {
                    return;
                }
            }
        }

        match state {
            State::Buffered(accounts) => {
                debug!(account_count = accounts.len(), "aggregation complete");
                for account in accounts.into_values() {
                    if !sink.handle(account) {
                        return;
                    }
                }
            }
            State::Sorted(Some(finished)) => {
                sink.handle(finished);
            }
            State::Sorted(None) => {}
        }
    }

    /// Folds one surviving row into the aggregation state, returning a
    /// record the strategy considers complete.
    ///
    /// Buffered mode never completes a record mid-pass; sorted mode
    /// completes the in-progress record whenever a different identifier
    /// takes over.
    fn fold_row(&self, state: &mut State, identifier: String, row: &Row) -> Option<Account> {
        match state {
            State::Buffered(accounts) => {
                match accounts.get_mut(&identifier) {
                    Some(account) => self.extend_account(row, account),
                    None => {
                        let account = self.start_account(identifier.clone(), row);
                        accounts.insert(identifier, account);
                    }
                }
                None
            }
            State::Sorted(current) => match current.as_mut() {
                Some(account) if account.identifier == identifier => {
                    self.extend_account(row, account);
                    None
                }
                _ => {
                    let finished = current.take();
                    *current = Some(self.start_account(identifier, row));
                    finished
                }
            },
        }
    }

    /// Trimmed identifier-column value; `None` skips the row entirely.
    fn identifier_of(&self, row: &Row) -> Option<String> {
        let value = cell_text(row, self.columns.identifier);
        (!value.is_empty()).then(|| value.to_string())
    }

    fn is_ignored(&self, row: &Row) -> bool {
        match (self.columns.ignore, self.ignore_value) {
            (Some(column), Some(trigger)) => cell_text(row, column) == trigger,
            _ => false,
        }
    }

    /// Builds a record from the first row observed for an identifier.
    ///
    /// Every present cell contributes according to its column role; the
    /// ignore column and post-trim-empty values are dropped rather than
    /// stored as empty strings.
    fn start_account(&self, identifier: String, row: &Row) -> Account {
        let mut account = Account::new(identifier);

        for (index, text) in row {
            if *index == self.columns.identifier || Some(*index) == self.columns.ignore {
                continue;
            }
            let value = text.trim();
            if value.is_empty() {
                continue;
            }

            if Some(*index) == self.columns.group {
                account.add_group(value);
            } else {
                let name = self.columns.name_of(*index);
                if !name.is_empty() {
                    account.add_attribute(name, value);
                }
            }
        }

        account
    }

    /// Folds a repeat row into an existing record.
    ///
    /// Only the accumulating roles apply here: merge columns append to their
    /// attribute sequences and the group column appends a membership. Other
    /// columns are not reprocessed.
    fn extend_account(&self, row: &Row, account: &mut Account) {
        for &column in &self.columns.merge {
            let value = cell_text(row, column);
            if !value.is_empty() {
                account.add_attribute(self.columns.name_of(column), value);
            }
        }

        if let Some(column) = self.columns.group {
            let value = cell_text(row, column);
            if !value.is_empty() {
                account.add_group(value);
            }
        }
    }
}

/// Trimmed text of the cell at `column`, or an empty string when the row
/// has no such cell.
fn cell_text(row: &Row, column: usize) -> &str {
    row.iter()
        .find(|(index, _)| *index == column)
        .map(|(_, text)| text.trim())
        .unwrap_or("")
}
