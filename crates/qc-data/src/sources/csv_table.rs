use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use csv::ReaderBuilder;
use qc_core::{Row, RowCollection, Value};
use crate::DataError;
use crate::config::NullPatterns;

/// Type a whole CSV column is read as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellType {
    Number,
    Boolean,
    Text,
}

/// A local CSV file read into rows, for charting without the service
#[derive(Debug, Clone)]
pub struct CsvTable {
    /// Source file name
    name: String,
    /// Header names in file order
    columns: Vec<String>,
    /// Typed rows
    rows: RowCollection,
}

impl CsvTable {
    /// Read a CSV file on a blocking thread
    pub async fn open(path: PathBuf, nulls: NullPatterns) -> Result<Self, DataError> {
        ensure_csv(&path)?;

        tokio::task::spawn_blocking(move || {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown.csv")
                .to_string();
            let file = File::open(&path)?;
            Self::from_reader(name, BufReader::new(file), &nulls)
        })
        .await?
    }

    /// Read CSV text with a header line from any reader
    pub fn from_reader<R: Read>(name: String, reader: R, nulls: &NullPatterns) -> Result<Self, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns = unique_headers(csv_reader.headers()?.iter().map(|h| h.trim().to_string()));

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            records.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        }

        let types: Vec<CellType> = (0..columns.len())
            .map(|idx| Self::detect_column_type(&records, idx, nulls))
            .collect();

        let rows: RowCollection = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .zip(&types)
                    .enumerate()
                    .map(|(idx, (column, cell_type))| {
                        let cell = record.get(idx).map(String::as_str).unwrap_or("");
                        (column.clone(), Self::parse_cell(cell, *cell_type, nulls))
                    })
                    .collect::<Row>()
            })
            .collect();

        tracing::info!(
            "Loaded '{}': {} rows, {} columns ({:?})",
            name,
            rows.len(),
            columns.len(),
            types
        );

        Ok(Self { name, columns, rows })
    }

    /// A column is numeric or boolean only if every non-null cell is
    fn detect_column_type(records: &[Vec<String>], col_idx: usize, nulls: &NullPatterns) -> CellType {
        let mut is_number = true;
        let mut is_bool = true;
        let mut seen = 0usize;

        for cell in records.iter().filter_map(|record| record.get(col_idx)) {
            if nulls.is_null(cell) {
                continue;
            }
            seen += 1;

            if is_number && parse_number(cell).is_none() {
                is_number = false;
            }
            if is_bool && parse_bool(cell).is_none() {
                is_bool = false;
            }
            if !is_number && !is_bool {
                break;
            }
        }

        if seen == 0 {
            CellType::Text
        } else if is_number {
            CellType::Number
        } else if is_bool {
            CellType::Boolean
        } else {
            CellType::Text
        }
    }

    fn parse_cell(cell: &str, cell_type: CellType, nulls: &NullPatterns) -> Value {
        if nulls.is_null(cell) {
            return Value::Null;
        }
        match cell_type {
            CellType::Number => parse_number(cell).map(Value::Number).unwrap_or(Value::Null),
            CellType::Boolean => parse_bool(cell).map(Value::Boolean).unwrap_or(Value::Null),
            CellType::Text => Value::String(cell.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &RowCollection {
        &self.rows
    }

    pub fn into_rows(self) -> RowCollection {
        self.rows
    }
}

/// Repeated header names get a `_2`, `_3`, ... suffix so every column
/// keeps its own key in a row
fn unique_headers(headers: impl Iterator<Item = String>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for header in headers {
        let mut name = header.clone();
        let mut suffix = 2;
        while columns.contains(&name) {
            name = format!("{}_{}", header, suffix);
            suffix += 1;
        }
        if name != header {
            tracing::warn!("Duplicate column '{}' renamed to '{}'", header, name);
        }
        columns.push(name);
    }
    columns
}

/// Numbers may carry `,` thousands separators
fn parse_number(cell: &str) -> Option<f64> {
    let cleaned = cell.trim().replace(',', "");
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_bool(cell: &str) -> Option<bool> {
    let cell = cell.trim();
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn ensure_csv(path: &Path) -> Result<(), DataError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        Ok(())
    } else {
        Err(DataError::UnsupportedFile(path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> CsvTable {
        CsvTable::from_reader("test.csv".to_string(), text.as_bytes(), &NullPatterns::default()).unwrap()
    }

    #[test]
    fn test_column_types() {
        let table = load("city,sales,open\nOslo,\"1,200\",true\nRome,7.5,FALSE\n");

        assert_eq!(table.columns().to_vec(), vec!["city", "sales", "open"]);
        let first = table.rows().first().unwrap();
        assert_eq!(first["city"], Value::from("Oslo"));
        assert_eq!(first["sales"], Value::from(1200));
        assert_eq!(first["open"], Value::from(true));
        assert_eq!(table.rows().rows()[1]["open"], Value::from(false));
    }

    #[test]
    fn test_null_cells() {
        let table = load("a,b\n1,N/A\n,x\n");

        assert_eq!(table.rows().rows()[0]["b"], Value::Null);
        assert_eq!(table.rows().rows()[1]["a"], Value::Null);
        assert_eq!(table.rows().rows()[1]["b"], Value::from("x"));
    }

    #[test]
    fn test_mixed_column_stays_text() {
        let table = load("v\n1\ntwo\n");
        assert_eq!(table.rows().first().unwrap()["v"], Value::from("1"));
    }

    #[test]
    fn test_short_records_fill_with_null() {
        let table = load("a,b\n1\n");
        assert_eq!(table.rows().first().unwrap()["b"], Value::Null);
        assert_eq!(table.rows().columns(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let table = load("id,value,value,value_2\n1,2,3,4\n");

        assert_eq!(table.columns().to_vec(), vec!["id", "value", "value_2", "value_2_2"]);
        assert_eq!(table.rows().columns(), table.columns().to_vec());
        let row = table.rows().first().unwrap();
        assert_eq!(row["value"], Value::from(2));
        assert_eq!(row["value_2"], Value::from(3));
        assert_eq!(row["value_2_2"], Value::from(4));
    }

    #[test]
    fn test_only_csv_files_open() {
        assert!(ensure_csv(Path::new("data.CSV")).is_ok());
        assert!(matches!(
            ensure_csv(Path::new("data.xlsx")),
            Err(DataError::UnsupportedFile(_))
        ));
    }
}
