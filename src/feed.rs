//! Pass orchestration: opening the source, resolving columns, and running
//! extraction passes for the host's account and group queries.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::columns;
use crate::config::RosterConfig;
use crate::error::Result;
use crate::extract::{Emission, Pass, RecordSink};
use crate::io::excel::WorkbookSource;
use crate::model::Account;
use crate::source::CellSource;

/// Streams every account in the workbook at `path` into `sink`.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn stream_accounts<K: RecordSink>(
    path: &Path,
    config: &RosterConfig,
    sink: &mut K,
) -> Result<()> {
    let source = WorkbookSource::open(path)?;
    run_pass(&source, config, sink)
}

/// Runs one extraction pass over an already-open source.
///
/// Column roles are resolved up front; an unresolvable identifier aborts
/// before any row is read.
pub fn run_pass<S, K>(source: &S, config: &RosterConfig, sink: &mut K) -> Result<()>
where
    S: CellSource + ?Sized,
    K: RecordSink,
{
    let header = source.header_row(config.includes_header);
    let columns = columns::resolve(config, &header)?;
    debug!(column_count = header.len(), "columns resolved");

    let pass = Pass {
        columns: &columns,
        ignore_value: config.ignore_value.as_deref(),
        has_header: config.includes_header,
        emission: if config.uid_sorted {
            Emission::Sorted
        } else {
            Emission::Buffered
        },
    };
    pass.run(source, sink);

    Ok(())
}

/// Collects every account into a vector.
///
/// Ordering follows emission order, which in buffered mode is not a
/// contract.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn collect_accounts(path: &Path, config: &RosterConfig) -> Result<Vec<Account>> {
    let mut accounts = Vec::new();
    stream_accounts(path, config, &mut |account: Account| {
        accounts.push(account);
        true
    })?;

    info!(account_count = accounts.len(), "accounts collected");
    Ok(accounts)
}

/// Distinct group names across all accounts, deduplicated in emission
/// order. Record-level group lists keep their duplicates; only this query
/// surface collapses them.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn collect_groups(path: &Path, config: &RosterConfig) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut groups = Vec::new();
    stream_accounts(path, config, &mut |account: Account| {
        for group in account.groups {
            if seen.insert(group.clone()) {
                groups.push(group);
            }
        }
        true
    })?;

    info!(group_count = groups.len(), "groups collected");
    Ok(groups)
}
