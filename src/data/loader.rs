use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;

use super::error::DatasetError;
use super::model::{
    class_from_f64, LaunchDataset, LaunchRecord, COL_BOOSTER, COL_CLASS, COL_PAYLOAD, COL_SITE,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line (extra columns are ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names as the CSV headers
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(LaunchDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

/// Read launch records from any CSV source with a header row.
pub fn read_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<LaunchRecord>> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let column = |name: &'static str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| DatasetError::MissingColumn(name).into())
    };
    let site_idx = column(COL_SITE)?;
    let payload_idx = column(COL_PAYLOAD)?;
    let class_idx = column(COL_CLASS)?;
    let booster_idx = column(COL_BOOSTER)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        let payload_mass_kg = parse_payload(cell(payload_idx), row_no)?;
        let outcome_class = parse_class(cell(class_idx), row_no)?;

        records.push(LaunchRecord {
            site: cell(site_idx).to_string(),
            payload_mass_kg,
            outcome_class,
            booster_version_category: cell(booster_idx).to_string(),
        });
    }

    Ok(records)
}

fn parse_payload(s: &str, row: usize) -> Result<f64, DatasetError> {
    s.parse::<f64>().map_err(|_| DatasetError::InvalidCell {
        row,
        column: COL_PAYLOAD,
        value: s.to_string(),
        expected: "number",
    })
}

/// Accepts `1` as well as `1.0`, which pandas emits for float-typed columns.
fn parse_class(s: &str, row: usize) -> Result<u8, DatasetError> {
    if let Ok(c) = s.parse::<u8>() {
        return Ok(c);
    }
    s.parse::<f64>()
        .ok()
        .and_then(class_from_f64)
        .ok_or_else(|| DatasetError::InvalidCell {
            row,
            column: COL_CLASS,
            value: s.to_string(),
            expected: "integer class",
        })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

pub fn read_json(text: &str) -> Result<Vec<LaunchRecord>> {
    serde_json::from_str(text).context("parsing JSON launch records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    read_parquet(file)
}

/// Read launch records from Parquet data.
///
/// String columns may be Utf8 or LargeUtf8; numeric columns may be any
/// integer or float type. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
pub fn read_parquet<R: ChunkReader + 'static>(source: R) -> Result<Vec<LaunchRecord>> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(source)
        .context("reading parquet metadata")?;
    // A file without row groups yields no batches, so check the schema up front.
    for name in [COL_SITE, COL_PAYLOAD, COL_CLASS, COL_BOOSTER] {
        builder
            .schema()
            .index_of(name)
            .map_err(|_| DatasetError::MissingColumn(name))?;
    }
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();

        let sites = string_column(&batch, COL_SITE, offset)?;
        let payloads = numeric_column(&batch, COL_PAYLOAD, offset)?;
        let classes = numeric_column(&batch, COL_CLASS, offset)?;
        let boosters = string_column(&batch, COL_BOOSTER, offset)?;

        for (i, (((site, payload), class), booster)) in sites
            .into_iter()
            .zip(payloads)
            .zip(classes)
            .zip(boosters)
            .enumerate()
        {
            let outcome_class = class_from_f64(class).ok_or_else(|| DatasetError::InvalidCell {
                row: offset + i,
                column: COL_CLASS,
                value: class.to_string(),
                expected: "integer class",
            })?;
            records.push(LaunchRecord {
                site,
                payload_mass_kg: payload,
                outcome_class,
                booster_version_category: booster,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DatasetError::MissingColumn(name))?;
    Ok(batch.column(idx))
}

fn null_cell(row: usize, column: &'static str, expected: &'static str) -> DatasetError {
    DatasetError::InvalidCell {
        row,
        column,
        value: "<null>".to_string(),
        expected,
    }
}

fn string_column(batch: &RecordBatch, name: &'static str, offset: usize) -> Result<Vec<String>> {
    let col = batch_column(batch, name)?;
    let values: Vec<Option<&str>> = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().iter().collect(),
        DataType::LargeUtf8 => col.as_string::<i64>().iter().collect(),
        other => {
            return Err(DatasetError::UnsupportedColumnType {
                column: name,
                data_type: format!("{other:?}"),
            }
            .into())
        }
    };
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.map(str::to_string)
                .ok_or_else(|| null_cell(offset + i, name, "string").into())
        })
        .collect()
}

/// Any integer or float column, widened to `f64`.
fn numeric_column(batch: &RecordBatch, name: &'static str, offset: usize) -> Result<Vec<f64>> {
    let col = batch_column(batch, name)?;
    if !col.data_type().is_numeric() {
        return Err(DatasetError::UnsupportedColumnType {
            column: name,
            data_type: format!("{:?}", col.data_type()),
        }
        .into());
    }
    let widened = arrow::compute::cast(col, &DataType::Float64)
        .with_context(|| format!("casting '{name}' to Float64"))?;
    let arr = widened.as_primitive::<Float64Type>();
    (0..arr.len())
        .map(|i| {
            if arr.is_null(i) {
                Err(null_cell(offset + i, name, "number").into())
            } else {
                Ok(arr.value(i))
            }
        })
        .collect()
}
