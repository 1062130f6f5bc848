use std::path::Path;

use rust_xlsxwriter::Workbook;
use tempfile::tempdir;
use xlsx_roster::config::RosterConfig;
use xlsx_roster::io::excel::WorkbookSource;
use xlsx_roster::{RosterError, feed};

#[test]
fn accounts_are_aggregated_from_a_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("roster.xlsx");
    write_sheet(
        &path,
        &[
            &["id", "name", "role", "active"],
            &["1", "Alice", "admin", "TRUE"],
            &["1", "Alice", "user", "TRUE"],
            &["2", "Bob", "guest", "FALSE"],
            &["3", "Cara", "ops", "TRUE"],
        ],
    );

    let config = RosterConfig {
        identifier: "id".to_string(),
        merge: "role".to_string(),
        includes_header: true,
        ..RosterConfig::default()
    };

    let mut accounts = feed::collect_accounts(&path, &config).expect("accounts collected");
    accounts.sort_by(|lhs, rhs| lhs.identifier.cmp(&rhs.identifier));

    assert_eq!(accounts.len(), 3);
    assert_eq!(accounts[0].attributes["role"], vec!["admin", "user"]);
    // Non-merge columns are read once, from the first row of the run.
    assert_eq!(accounts[0].attributes["name"], vec!["Alice"]);
}

#[test]
fn ignore_rule_suppresses_flagged_accounts() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("roster.xlsx");
    write_sheet(
        &path,
        &[
            &["id", "name", "role", "active"],
            &["1", "Alice", "admin", "TRUE"],
            &["2", "Bob", "guest", "FALSE"],
            &["3", "Cara", "ops", "TRUE"],
        ],
    );

    let config = RosterConfig {
        identifier: "id".to_string(),
        merge: "role".to_string(),
        ignore: Some("active".to_string()),
        ignore_value: Some("FALSE".to_string()),
        includes_header: true,
        ..RosterConfig::default()
    };

    let mut accounts = feed::collect_accounts(&path, &config).expect("accounts collected");
    accounts.sort_by(|lhs, rhs| lhs.identifier.cmp(&rhs.identifier));

    let identifiers: Vec<&str> = accounts.iter().map(|a| a.identifier.as_str()).collect();
    assert_eq!(identifiers, vec!["1", "3"]);
}

#[test]
fn sorted_stream_preserves_file_order() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("roster.xlsx");
    write_sheet(
        &path,
        &[
            &["id", "role"],
            &["beta", "admin"],
            &["beta", "user"],
            &["alpha", "guest"],
        ],
    );

    let config = RosterConfig {
        identifier: "id".to_string(),
        merge: "role".to_string(),
        includes_header: true,
        uid_sorted: true,
        ..RosterConfig::default()
    };

    let accounts = feed::collect_accounts(&path, &config).expect("accounts collected");

    let identifiers: Vec<&str> = accounts.iter().map(|a| a.identifier.as_str()).collect();
    assert_eq!(identifiers, vec!["beta", "alpha"]);
}

#[test]
fn groups_are_deduplicated_across_accounts() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("groups.xlsx");
    write_sheet(&path, &[&["A", "g1"], &["A", "g2"], &["B", "g1"]]);

    let config = RosterConfig {
        identifier: "col0".to_string(),
        group: Some("col1".to_string()),
        uid_sorted: true,
        ..RosterConfig::default()
    };

    let groups = feed::collect_groups(&path, &config).expect("groups collected");
    assert_eq!(groups, vec!["g1", "g2"]);

    // Record-level group lists keep their duplicates.
    let accounts = feed::collect_accounts(&path, &config).expect("accounts collected");
    let total: usize = accounts.iter().map(|a| a.groups.len()).sum();
    assert_eq!(total, 3);
}

#[test]
fn discovery_selects_the_prefixed_export() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("export-2026-08-01.xlsx");
    write_sheet(&path, &[&["id"], &["1"]]);

    let config = RosterConfig {
        directory: Some(temp_dir.path().to_path_buf()),
        file_prefix: Some("export".to_string()),
        identifier: "id".to_string(),
        includes_header: true,
        ..RosterConfig::default()
    };

    let discovered = config.source_path().expect("export discovered");
    assert_eq!(discovered, path);

    let accounts = feed::collect_accounts(&discovered, &config).expect("accounts collected");
    assert_eq!(accounts.len(), 1);
}

#[test]
fn discovery_without_a_match_is_an_error() {
    let temp_dir = tempdir().expect("temporary directory");

    let config = RosterConfig {
        directory: Some(temp_dir.path().to_path_buf()),
        file_prefix: Some("missing".to_string()),
        identifier: "id".to_string(),
        ..RosterConfig::default()
    };

    let error = config.source_path().expect_err("nothing to discover");
    assert!(matches!(error, RosterError::SourceNotFound { prefix, .. } if prefix == "missing"));
}

#[test]
fn missing_workbook_aborts_the_pass() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("absent.xlsx");

    let error = WorkbookSource::open(&path).expect_err("open should fail");
    assert!(matches!(error, RosterError::ExcelRead(_)));
}

#[test]
fn config_file_fills_defaults() {
    let temp_dir = tempdir().expect("temporary directory");
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, r#"{"identifier": "id", "includes_header": true}"#)
        .expect("settings written");

    let config = RosterConfig::from_file(&path).expect("settings loaded");

    assert_eq!(config.identifier, "id");
    assert!(config.includes_header);
    assert_eq!(config.multivalue_delimiter, ";");
    assert!(!config.uid_sorted);
    config.validate().expect("identifier present");
}

#[test]
fn validation_requires_an_identifier() {
    let error = RosterConfig::default()
        .validate()
        .expect_err("blank identifier rejected");
    assert!(matches!(error, RosterError::IncompleteConfig(_)));
}

fn write_sheet(path: &Path, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, *cell)
                .expect("cell written");
        }
    }

    workbook.save(path).expect("workbook saved");
}
