//! Registrar export reading
//!
//! Workbooks (`.xls` from the legacy registrar system, and the newer
//! formats calamine understands) and CSV exports are both read into plain
//! text rows with the header row dropped.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, SeedError};

/// One data row, cells rendered as text
pub type Row = Vec<String>;

const WORKBOOK_EXTENSIONS: [&str; 7] = ["xls", "xlsx", "xlsm", "xlsb", "xla", "xlam", "ods"];

/// Read every data row of an export, skipping the header
pub fn read_rows(path: &Path, sheet_index: usize) -> Result<Vec<Row>> {
    if !path.is_file() {
        return Err(SeedError::Input(format!(
            "input file not found: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let rows = if extension == "csv" {
        read_csv(path)?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_workbook(path, sheet_index)?
    } else {
        return Err(SeedError::Input(format!(
            "unsupported input format '{}': {}",
            extension,
            path.display()
        )));
    };

    info!("Read {} data rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn read_workbook(path: &Path, sheet_index: usize) -> Result<Vec<Row>> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    let range = workbook.worksheet_range_at(sheet_index).ok_or_else(|| {
        SeedError::Input(format!(
            "sheet index {} out of range, workbook has {} sheet(s): {:?}",
            sheet_index,
            sheet_names.len(),
            sheet_names
        ))
    })??;

    Ok(range
        .rows()
        .skip(1)
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

// Cells that are not UTF-8 (GBK exports) are decoded lossily instead of failing the file
fn read_csv(path: &Path) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    let mut lossy_cells = 0;
    for record in reader.byte_records() {
        let record = record?;
        let row: Row = record
            .iter()
            .map(|field| match std::str::from_utf8(field) {
                Ok(text) => text.to_string(),
                Err(_) => {
                    lossy_cells += 1;
                    String::from_utf8_lossy(field).into_owned()
                }
            })
            .collect();
        rows.push(row);
    }

    if lossy_cells > 0 {
        warn!(
            "{}: {} cell(s) are not valid UTF-8, re-save the export as UTF-8 CSV",
            path.display(),
            lossy_cells
        );
    }
    Ok(rows)
}

/// Text form of a workbook cell; integral numbers lose the `.0`
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("刑法学".to_string())), "刑法学");
        assert_eq!(cell_text(&Data::Float(185450.0)), "185450");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(48)), "48");
    }

    #[test]
    fn test_csv_with_non_utf8_cell_still_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exportResult.csv");
        let mut content = "课序号,课程号,课程名\n".as_bytes().to_vec();
        content.extend_from_slice(b"A1_001,A1,");
        // "数学" in GBK
        content.extend_from_slice(&[0xca, 0xfd, 0xd1, 0xa7]);
        content.extend_from_slice("\nB2_001,B2,线性代数\n".as_bytes());
        std::fs::write(&path, content).unwrap();

        let rows = read_rows(&path, 0).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "A1");
        assert!(rows[0][2].contains('\u{fffd}'));
        assert_eq!(rows[1], vec!["B2_001", "B2", "线性代数"]);
    }

    #[test]
    fn test_missing_input_is_an_input_error() {
        let err = read_rows(Path::new("/nonexistent/exportResult.xls"), 0).unwrap_err();
        assert!(matches!(err, SeedError::Input(_)));
    }
}
