//! Export/import of the whole store as a versioned JSON document

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use fuelog_api::{BACKUP_FORMAT_VERSION, BackupDocument, FuelRecord};
use tracing::warn;

use crate::{CoreError, CoreResult};

/// A rendered backup ready to hand to the frontend
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    /// Pretty-printed JSON
    pub contents: String,
    pub record_count: usize,
}

/// A validated import awaiting user confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPlan {
    pub records: Vec<FuelRecord>,
    /// Version tag found in the document, if any
    pub version: Option<String>,
}

impl ImportPlan {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// `fuel-records-YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("fuel-records-{}.json", fuelog_util::format_date(date))
}

/// Wrap records with export metadata.
///
/// The timestamp and the file name date are both taken in UTC.
pub fn build_export<Tz: TimeZone>(records: &[FuelRecord], now: &DateTime<Tz>) -> CoreResult<ExportFile> {
    if records.is_empty() {
        return Err(CoreError::EmptyExport);
    }

    let now = now.with_timezone(&Utc);
    let document = BackupDocument {
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        version: BACKUP_FORMAT_VERSION.to_string(),
        records: records.to_vec(),
    };

    let contents = serde_json::to_string_pretty(&document)
        .map_err(|e| CoreError::invalid_format(format!("could not encode records: {e}")))?;

    Ok(ExportFile {
        file_name: export_file_name(now.date_naive()),
        contents,
        record_count: records.len(),
    })
}

/// Parse a backup document.
///
/// Only the `records` field is required and it must be an array of
/// record-shaped values; every other field is informational.
pub fn parse_import(contents: &str) -> CoreResult<ImportPlan> {
    let value: serde_json::Value = serde_json::from_str(contents)
        .map_err(|e| CoreError::invalid_format(format!("not valid JSON: {e}")))?;

    let records = value
        .get("records")
        .ok_or_else(|| CoreError::invalid_format("missing 'records' field"))?
        .as_array()
        .ok_or_else(|| CoreError::invalid_format("'records' is not an array"))?;

    let records = records
        .iter()
        .enumerate()
        .map(|(i, v)| {
            serde_json::from_value::<FuelRecord>(v.clone())
                .map_err(|e| CoreError::invalid_format(format!("record {}: {e}", i + 1)))
        })
        .collect::<CoreResult<Vec<_>>>()?;

    let version = value
        .get("version")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    if let Some(v) = &version
        && v != BACKUP_FORMAT_VERSION
    {
        warn!(version = %v, expected = BACKUP_FORMAT_VERSION, "Importing backup with unknown version");
    }

    Ok(ImportPlan { records, version })
}
