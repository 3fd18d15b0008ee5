//! Spreadsheet export for completed field records.
//!
//! One worksheet, two rows: field names across row 0, the collected
//! values across row 1, columns in collection order.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::info;

use ekyc_core::{EkycError, FieldRecord};

/// Write `record` to an xlsx file at `path`, creating parent
/// directories as needed. An existing file is overwritten.
pub fn write_record(path: &Path, record: &FieldRecord) -> Result<(), EkycError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| EkycError::Export(e.to_string()))?;
        }
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, (name, value)) in record.iter().enumerate() {
        let col = col as u16;
        sheet
            .write_string(0, col, name)
            .map_err(|e| EkycError::Export(e.to_string()))?;
        sheet
            .write_string(1, col, value)
            .map_err(|e| EkycError::Export(e.to_string()))?;
    }

    workbook
        .save(path)
        .map_err(|e| EkycError::Export(e.to_string()))?;

    info!(path = %path.display(), fields = record.len(), "exported field record");
    Ok(())
}
