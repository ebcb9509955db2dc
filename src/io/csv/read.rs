//! CSV reading operations.

use std::{fs::File, io::Cursor, path::Path};

use anyhow::{Context, Result, ensure};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReader, DataType}};
use serde::Serialize;

/// One row of a `bias_<boundary>.csv` file.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BiasRecord {
    /// Two-letter postal code.
    pub state: String,
    pub year: i64,
    /// Efficiency gap of that year's plan; `None` for blank cells.
    pub bias: Option<f64>,
}

/// Reads a bias CSV file from `path`.
pub fn read_bias_csv(path: &Path) -> Result<Vec<BiasRecord>> {
    let file = File::open(path)
        .with_context(|| format!("[io::csv::read] Failed to open CSV file: {}", path.display()))?;
    let df = CsvReader::new(file)
        .finish()
        .with_context(|| format!("[io::csv::read] Failed to read CSV from {:?}", path))?;
    bias_records(&df)
}

/// Reads bias CSV text, as fetched over HTTP.
pub fn read_bias_csv_str(csv: &str) -> Result<Vec<BiasRecord>> {
    let df = CsvReader::new(Cursor::new(csv.as_bytes()))
        .finish()
        .context("[io::csv::read] Failed to read CSV from string")?;
    bias_records(&df)
}

fn bias_records(df: &DataFrame) -> Result<Vec<BiasRecord>> {
    for name in ["state", "year", "bias"] {
        ensure!(df.column(name).is_ok(), "[io::csv::read] CSV is missing the {name:?} column");
    }

    let states = df.column("state")?.cast(&DataType::String)?;
    let years = df.column("year")?.cast(&DataType::Int64)?;
    let biases = df.column("bias")?.cast(&DataType::Float64)?;

    let records = states.str()?.into_iter()
        .zip(years.i64()?.into_iter())
        .zip(biases.f64()?.into_iter())
        .filter_map(|((state, year), bias)| {
            Some(BiasRecord { state: state?.trim().to_uppercase(), year: year?, bias })
        })
        .collect::<Vec<_>>();

    tracing::debug!(rows = df.height(), records = records.len(), "read bias csv");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "state,year,bias\nNC,2016,-0.19\nNC,2018,-0.12\nWI,2016,\nMD,2016,0.04\n";

    #[test]
    fn reads_records() {
        let records = read_bias_csv_str(CSV).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0], BiasRecord { state: "NC".to_string(), year: 2016, bias: Some(-0.19) });
        assert_eq!(records[2].bias, None);
    }

    #[test]
    fn reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bias_ushouse.csv");
        std::fs::write(&path, CSV).unwrap();
        assert_eq!(read_bias_csv(&path).unwrap().len(), 4);
    }

    #[test]
    fn requires_columns() {
        assert!(read_bias_csv_str("state,year\nNC,2016\n").is_err());
    }
}
