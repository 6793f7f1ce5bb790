//! Mint CSV writer.
//!
//! The header and required file extension live in a `CsvLayout` handed to the
//! writer. The header must be the Mint header in row order; only the extension
//! is free to vary.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::export::ExportError;
use crate::row::OutputRow;

/// Column names Mint uses in its own transaction exports
pub const MINT_HEADERS: [&str; OutputRow::COLUMN_COUNT] = [
    "Date",
    "Description Original",
    "Description",
    "Amount",
    "Transaction Type",
    "Category",
    "Account Name",
    "Labels",
    "Notes",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvLayout {
    pub columns: Vec<String>,
    /// Required output extension, without the dot
    pub extension: String,
}

impl CsvLayout {
    pub fn mint() -> Self {
        Self {
            columns: MINT_HEADERS.iter().map(|c| c.to_string()).collect(),
            extension: "csv".to_string(),
        }
    }
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self::mint()
    }
}

pub struct MintCsvWriter {
    layout: CsvLayout,
}

impl MintCsvWriter {
    pub fn new(layout: CsvLayout) -> Self {
        Self { layout }
    }

    /// Fails unless `path` ends in the layout's extension.
    pub fn check_path(&self, path: &Path) -> Result<(), ExportError> {
        let expected = self.layout.extension.trim_start_matches('.');
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext == expected => Ok(()),
            _ => Err(ExportError::OutputPath {
                path: path.to_path_buf(),
                expected: format!(".{expected}"),
            }),
        }
    }

    /// Render header + rows into an in-memory CSV document.
    pub fn render(&self, rows: &[OutputRow]) -> Result<Vec<u8>, ExportError> {
        // Rows serialize in struct order, so the header has to be exactly that order.
        if self.layout.columns.iter().map(String::as_str).ne(MINT_HEADERS) {
            return Err(ExportError::Layout {
                found: self.layout.columns.clone(),
                expected: MINT_HEADERS.iter().map(|c| c.to_string()).collect(),
            });
        }

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        wtr.write_record(&self.layout.columns)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }

    /// Validate the path, render everything, then write the file in one go.
    pub fn write(&self, rows: &[OutputRow], path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = path.as_ref();
        self.check_path(path)?;
        let bytes = self.render(rows)?;
        fs::write(path, bytes)?;
        info!(rows = rows.len(), path = %path.display(), "wrote csv");
        Ok(path.to_path_buf())
    }
}

impl Default for MintCsvWriter {
    fn default() -> Self {
        Self::new(CsvLayout::mint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::TransactionType;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    fn trade_row() -> OutputRow {
        OutputRow {
            date: "01/15/2020".into(),
            description_original: "AAPL".into(),
            description: "Investments:buy".into(),
            amount: Decimal::new(150005, 2),
            transaction_type: TransactionType::Credit,
            category: Some("buy".into()),
            account_name: None,
            labels: Some("10".into()),
            notes: Some("150.005".into()),
        }
    }

    fn dividend_row() -> OutputRow {
        OutputRow {
            date: "05/18/2017".into(),
            description_original: "MSFT".into(),
            description: "Investments:Dividend Income".into(),
            amount: Decimal::new(504, 2),
            transaction_type: TransactionType::Credit,
            category: None,
            account_name: None,
            labels: None,
            notes: None,
        }
    }

    #[test]
    fn test_render_header_and_empty_cells() {
        let out = MintCsvWriter::default()
            .render(&[trade_row(), dividend_row()])
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Description Original,Description,Amount,Transaction Type,Category,Account Name,Labels,Notes"
        );
        assert_eq!(lines[1], "01/15/2020,AAPL,Investments:buy,1500.05,credit,buy,,10,150.005");
        assert_eq!(lines[2], "05/18/2017,MSFT,Investments:Dividend Income,5.04,credit,,,,");
        assert!(!text.contains("null") && !text.contains("None"));
    }

    #[test]
    fn test_embedded_delimiters_are_quoted() {
        let mut row = dividend_row();
        row.description_original = "BRK,B".into();
        let text = String::from_utf8(MintCsvWriter::default().render(&[row]).unwrap()).unwrap();
        assert!(text.lines().nth(1).unwrap().contains("\"BRK,B\""));
    }

    #[test]
    fn test_wrong_extension_creates_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let err = MintCsvWriter::default().write(&[trade_row()], &path).unwrap_err();
        assert!(matches!(err, ExportError::OutputPath { ref expected, .. } if expected == ".csv"));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        let writer = MintCsvWriter::default();
        assert!(writer.check_path(Path::new("robinhood_output")).is_err());
        assert!(writer.check_path(Path::new("export.CSV")).is_err());
        assert!(writer.check_path(Path::new("nested/dir/export.csv")).is_ok());
    }

    #[test]
    fn test_layout_width_must_match_rows() {
        let layout = CsvLayout {
            columns: vec!["Date".into(), "Amount".into()],
            extension: "csv".into(),
        };
        let err = MintCsvWriter::new(layout).render(&[]).unwrap_err();
        assert!(matches!(err, ExportError::Layout { ref found, .. } if found.len() == 2));
    }

    #[test]
    fn test_reordered_layout_is_rejected() {
        let mut columns: Vec<String> = MINT_HEADERS.iter().map(|c| c.to_string()).collect();
        columns.reverse();
        let layout = CsvLayout {
            columns,
            extension: "csv".into(),
        };
        let dir = tempdir().unwrap();
        let path = dir.path().join("reversed.csv");

        let err = MintCsvWriter::new(layout)
            .write(&[dividend_row()], &path)
            .unwrap_err();
        assert!(matches!(err, ExportError::Layout { ref found, .. } if found[0] == "Notes"));
        assert!(!path.exists());
    }

    #[test]
    fn test_renamed_column_is_rejected() {
        let mut layout = CsvLayout::mint();
        layout.columns[3] = "Value".into();
        assert!(MintCsvWriter::new(layout).render(&[trade_row()]).is_err());
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempdir().unwrap();
        let layout = CsvLayout {
            extension: ".txt".into(),
            ..CsvLayout::mint()
        };
        let path = dir.path().join("out.txt");
        MintCsvWriter::new(layout).write(&[dividend_row()], &path).unwrap();
        assert!(path.exists());
    }
}
