//! Inventory file I/O and the run loop
//!
//! Reads the raw CSV, pushes every row through a `RecordProcessor`, and
//! writes the cleaned CSV plus the anomaly report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{ReaderBuilder, Writer, WriterBuilder};
use serde::Serialize;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::error::{InvnormError, Result};
use crate::pipeline::{Anomaly, CanonicalRecord, RawRecord, RecordProcessor, CANONICAL_COLUMNS};

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub rows: usize,
    pub anomalies: usize,
    pub llm_calls: usize,
}

/// Read every row of a raw inventory CSV
///
/// Rows may be short or long (`flexible`); invalid UTF-8 is decoded lossily.
/// A row the CSV parser cannot read is logged and skipped.
pub fn read_inventory(path: &Path) -> Result<Vec<RawRecord>> {
    if !path.exists() {
        return Err(InvnormError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| InvnormError::Csv {
            source,
            context: format!("Failed to open {}", path.display()),
        })?;

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|source| InvnormError::Csv {
            source,
            context: format!("Failed to read header of {}", path.display()),
        })?
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect();

    let mut records = Vec::new();
    for (index, row) in reader.byte_records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping unreadable row {} in {}: {}", index + 1, path.display(), e);
                continue;
            }
        };

        let values: Vec<String> = row
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();

        records.push(RawRecord::from_pairs(
            headers.iter().map(String::as_str).zip(values.iter().map(String::as_str)),
        ));
    }

    Ok(records)
}

/// Cleaned-inventory CSV writer; the header is written on creation
pub struct InventoryWriter<W: Write> {
    writer: Writer<W>,
}

impl InventoryWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| InvnormError::Io {
            source,
            context: format!("Failed to create {}", path.display()),
        })?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> InventoryWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        writer
            .write_record(CANONICAL_COLUMNS)
            .map_err(|source| InvnormError::Csv {
                source,
                context: "Failed to write header".to_string(),
            })?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, record: &CanonicalRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .map_err(|source| InvnormError::Csv {
                source,
                context: format!("Failed to write row {}", record.source_row_id),
            })
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush().map_err(|source| InvnormError::Io {
            source,
            context: "Failed to flush inventory output".to_string(),
        })?;
        self.writer
            .into_inner()
            .map_err(|e| InvnormError::Io {
                source: std::io::Error::new(e.error().kind(), e.error().to_string()),
                context: "Failed to finish inventory output".to_string(),
            })
    }
}

/// Write the anomaly list as one pretty-printed JSON array
pub fn write_anomalies(path: &Path, anomalies: &[Anomaly]) -> Result<()> {
    let json = serde_json::to_string_pretty(anomalies).map_err(|source| InvnormError::Json {
        source,
        context: "Failed to serialize anomalies".to_string(),
    })?;

    std::fs::write(path, json).map_err(|source| InvnormError::Io {
        source,
        context: format!("Failed to write {}", path.display()),
    })
}

/// Normalize a whole inventory file
pub fn normalize_inventory(
    input: &Path,
    out_csv: &Path,
    anomalies_json: &Path,
    processor: &RecordProcessor,
) -> Result<RunSummary> {
    let run_id = Uuid::new_v4();
    let span = info_span!("run", %run_id);
    let _guard = span.enter();

    let records = read_inventory(input)?;
    info!(
        "Normalizing {} rows from {} (inference {})",
        records.len(),
        input.display(),
        if processor.gateway().is_enabled() { "enabled" } else { "disabled" }
    );

    let calls_before = processor.gateway().llm_calls();
    let mut writer = InventoryWriter::create(out_csv)?;
    let mut anomalies = Vec::new();

    for raw in &records {
        let (clean, record_anomalies) = processor.process(raw);
        writer.write(&clean)?;
        anomalies.extend(record_anomalies);
    }
    writer.finish()?;

    write_anomalies(anomalies_json, &anomalies)?;

    let summary = RunSummary {
        rows: records.len(),
        anomalies: anomalies.len(),
        llm_calls: processor.gateway().llm_calls() - calls_before,
    };
    info!(
        rows = summary.rows,
        anomalies = summary.anomalies,
        llm_calls = summary.llm_calls,
        "Run complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_emits_header_without_rows() {
        let writer = InventoryWriter::new(Vec::new()).unwrap();
        let bytes = writer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), CANONICAL_COLUMNS.join(","));
    }

    #[test]
    fn test_writer_booleans() {
        let mut writer = InventoryWriter::new(Vec::new()).unwrap();
        writer
            .write(&CanonicalRecord {
                source_row_id: "1".to_string(),
                ip_valid: true,
                ..CanonicalRecord::default()
            })
            .unwrap();
        let text = String::from_utf8(writer.finish().unwrap()).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("1,,true,,,,false,,false,"));
    }

    #[test]
    fn test_read_missing_input() {
        let err = read_inventory(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, InvnormError::InputNotFound { .. }));
    }
}
