use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::columns::POSITIONAL_PREFIX;
use crate::error::{Result, RosterError};
use crate::source::{CellSource, Row};

/// [`CellSource`] over the first sheet of an `.xlsx` workbook.
///
/// The whole sheet range is materialised at open time, so read failures
/// surface here and never in the middle of a running pass.
#[derive(Debug)]
pub struct WorkbookSource {
    range: calamine::Range<DataType>,
}

impl WorkbookSource {
    /// Opens `path` and loads its first sheet.
    pub fn open(path: &Path) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;

        let sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| {
                RosterError::InvalidWorkbook(format!("'{}' has no sheets", path.display()))
            })?;
        let range = workbook
            .worksheet_range(&sheet)
            .ok_or_else(|| RosterError::InvalidWorkbook(format!("missing sheet '{sheet}'")))?
            .map_err(RosterError::from)?;

        Ok(Self { range })
    }
}

impl CellSource for WorkbookSource {
    fn header_row(&self, uses_header: bool) -> Vec<String> {
        let Some(first) = self.range.rows().next() else {
            return Vec::new();
        };

        if uses_header {
            first.iter().map(cell_to_string).collect()
        } else {
            (0..first.len())
                .map(|index| format!("{POSITIONAL_PREFIX}{index}"))
                .collect()
        }
    }

    fn rows(&self) -> Box<dyn Iterator<Item = Row> + '_> {
        Box::new(self.range.rows().map(|cells| {
            cells
                .iter()
                .enumerate()
                .map(|(index, cell)| (index, cell_to_string(cell)))
                .collect()
        }))
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        // Uppercase, the way spreadsheet UIs render booleans.
        DataType::Bool(true) => "TRUE".to_string(),
        DataType::Bool(false) => "FALSE".to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
