//! CSV ingestion
//!
//! Reads a header-keyed CSV file into [`RawRecord`]s and hands them to the
//! normalizer. Lines the CSV parser cannot decode are counted as rejected
//! alongside records that fail normalization.

use crate::record::{normalize_records, NormalizedDataset, RawRecord};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load and normalize a CSV dataset from disk
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<NormalizedDataset> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset: {}", path.display()))?;
    load_dataset_from_reader(file)
        .with_context(|| format!("Failed to load dataset: {}", path.display()))
}

/// Load and normalize CSV text from any reader
pub fn load_dataset_from_reader<R: Read>(reader: R) -> Result<NormalizedDataset> {
    let (records, unreadable) = read_records(reader)?;
    let mut dataset = normalize_records(&records);
    dataset.rejected += unreadable;
    Ok(dataset)
}

/// Parse CSV into header-keyed records
///
/// Returns the records plus the number of lines that could not be decoded.
/// Blank lines are skipped. Fails only when the header row itself is unreadable.
pub fn read_records<R: Read>(reader: R) -> Result<(Vec<RawRecord>, usize)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("CSV header error")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    let mut unreadable = 0;
    for result in reader.records() {
        match result {
            Ok(record) => records.push(to_raw(&headers, &record)),
            Err(e) => {
                tracing::warn!("Skipping unreadable CSV line: {}", e);
                unreadable += 1;
            }
        }
    }

    tracing::debug!(
        columns = headers.len(),
        records = records.len(),
        unreadable,
        "parsed CSV"
    );

    Ok((records, unreadable))
}

fn to_raw(headers: &[String], record: &StringRecord) -> RawRecord {
    headers
        .iter()
        .zip(record.iter())
        .map(|(h, v)| (h.clone(), v.to_string()))
        .collect()
}
