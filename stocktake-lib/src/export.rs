//! Spreadsheet export.
//!
//! CSV for the download path, JSON as the structured alternative. Headers
//! carry an extractor from record to cell text plus an optional formatter
//! applied per cell.

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

type ExtractFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;
type FormatFn = Arc<dyn Fn(String) -> String + Send + Sync>;

/// One exported column: header text, cell extractor, optional formatter.
pub struct ExportHeader<T> {
    pub header: String,
    extract: ExtractFn<T>,
    format: Option<FormatFn>,
}

impl<T> ExportHeader<T> {
    pub fn new<F>(header: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            header: header.into(),
            extract: Arc::new(extract),
            format: None,
        }
    }

    /// Apply a formatter to every cell of this column.
    pub fn formatter<F>(mut self, format: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        self.format = Some(Arc::new(format));
        self
    }

    fn cell(&self, record: &T) -> String {
        let raw = (self.extract)(record);
        match &self.format {
            Some(format) => format(raw),
            None => raw,
        }
    }
}

impl<T> Clone for ExportHeader<T> {
    fn clone(&self) -> Self {
        Self {
            header: self.header.clone(),
            extract: Arc::clone(&self.extract),
            format: self.format.clone(),
        }
    }
}

/// Write `data` as CSV: one header row, one row per record.
pub fn export_csv<T, W: Write>(
    data: &[T],
    headers: &[ExportHeader<T>],
    writer: W,
) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(headers.iter().map(|h| h.header.as_str()))?;
    for record in data {
        csv.write_record(headers.iter().map(|h| h.cell(record)))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write `data` as a JSON array via the records' serde form.
pub fn export_json<T: Serialize, W: Write>(data: &[T], writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        qty: f64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Sugar",
                qty: 12.0,
            },
            Row {
                name: "Flour",
                qty: 3.5,
            },
        ]
    }

    #[test]
    fn csv_has_header_row_and_formatted_cells() {
        let headers = vec![
            ExportHeader::new("Product", |r: &Row| r.name.to_string()),
            ExportHeader::new("Quantity", |r: &Row| r.qty.to_string())
                .formatter(|cell| format!("{cell} pcs")),
        ];

        let mut out = Vec::new();
        export_csv(&rows(), &headers, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Product,Quantity");
        assert_eq!(lines[1], "Sugar,12 pcs");
        assert_eq!(lines[2], "Flour,3.5 pcs");
    }

    #[test]
    fn json_round_trips_through_serde() {
        let mut out = Vec::new();
        export_json(&rows(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], "Sugar");
        assert_eq!(value[1]["qty"], 3.5);
    }
}
