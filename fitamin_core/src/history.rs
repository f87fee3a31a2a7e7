//! BMI measurement history.
//!
//! Measurements are appended to a JSONL (JSON Lines) file with file locking.
//! Only height and weight are stored; BMI and its category are derived on
//! read so they can never drift from the measurements.

use crate::bmi::{Anthropometrics, BmiResult};
use crate::Result;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One recorded height/weight measurement
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BmiRecord {
    pub id: Uuid,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub notes: String,
    pub recorded_at: DateTime<Utc>,
}

impl BmiRecord {
    pub fn new(body: Anthropometrics, notes: impl Into<String>, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            height_cm: body.height_cm(),
            weight_kg: body.weight_kg(),
            notes: notes.into(),
            recorded_at,
        }
    }

    /// BMI derived from this record's measurements
    pub fn bmi(&self) -> Result<BmiResult> {
        Ok(Anthropometrics::new(self.height_cm, self.weight_kg)?.bmi())
    }
}

/// Append-only JSONL log of BMI records
pub struct BmiLog {
    path: PathBuf,
}

impl BmiLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record under an exclusive lock
    pub fn append(&self, record: &BmiRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(record)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended BMI record {} to {:?}", record.id, self.path);
        Ok(())
    }

    /// All records in file order; unparseable lines are skipped
    pub fn read_records(&self) -> Result<Vec<BmiRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        file.lock_shared()?;

        let reader = BufReader::new(&file);
        let mut records = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<BmiRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!("Failed to parse BMI record at line {}: {}", line_num + 1, e);
                }
            }
        }

        file.unlock()?;
        tracing::debug!("Read {} BMI records", records.len());
        Ok(records)
    }

    /// Records sorted newest first
    pub fn history(&self) -> Result<Vec<BmiRecord>> {
        let mut records = self.read_records()?;
        records.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(records)
    }

    /// Most recent record, if any
    pub fn latest(&self) -> Result<Option<BmiRecord>> {
        Ok(self
            .read_records()?
            .into_iter()
            .max_by_key(|r| r.recorded_at))
    }
}

/// A row in the CSV export
#[derive(Debug, Serialize)]
struct CsvRow {
    id: String,
    recorded_at: String,
    height_cm: f64,
    weight_kg: f64,
    bmi: String,
    category: String,
    notes: String,
}

impl TryFrom<&BmiRecord> for CsvRow {
    type Error = crate::Error;

    fn try_from(record: &BmiRecord) -> Result<Self> {
        let bmi = record.bmi()?;
        Ok(CsvRow {
            id: record.id.to_string(),
            recorded_at: record.recorded_at.to_rfc3339(),
            height_cm: record.height_cm,
            weight_kg: record.weight_kg,
            bmi: bmi.display_value(),
            category: bmi.status.label().to_string(),
            notes: record.notes.clone(),
        })
    }
}

/// Write records to a CSV file (with headers), replacing any existing file.
///
/// Returns the number of rows written. Records whose measurements fall
/// outside the accepted range are skipped with a warning.
pub fn export_csv(records: &[BmiRecord], csv_path: &Path) -> Result<usize> {
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(csv_path)?;

    let mut written = 0;
    for record in records {
        match CsvRow::try_from(record) {
            Ok(row) => {
                writer.serialize(row)?;
                written += 1;
            }
            Err(e) => tracing::warn!("Skipping BMI record {}: {}", record.id, e),
        }
    }

    writer.flush()?;
    tracing::info!("Exported {} BMI records to {:?}", written, csv_path);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(height: f64, weight: f64, days_ago: i64) -> BmiRecord {
        BmiRecord::new(
            Anthropometrics::new(height, weight).unwrap(),
            "",
            Utc::now() - Duration::days(days_ago),
        )
    }

    #[test]
    fn test_append_and_read_single_record() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log = BmiLog::new(temp_dir.path().join("bmi_history.jsonl"));

        let rec = record(170.0, 68.5, 0);
        log.append(&rec).unwrap();

        let records = log.read_records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, rec.id);
    }

    #[test]
    fn test_history_is_newest_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log = BmiLog::new(temp_dir.path().join("bmi_history.jsonl"));

        log.append(&record(170.0, 69.0, 70)).unwrap();
        log.append(&record(170.0, 68.5, 0)).unwrap();
        log.append(&record(170.0, 70.2, 40)).unwrap();

        let weights: Vec<f64> = log.history().unwrap().iter().map(|r| r.weight_kg).collect();
        assert_eq!(weights, vec![68.5, 70.2, 69.0]);

        let latest = log.latest().unwrap().unwrap();
        assert_eq!(latest.weight_kg, 68.5);
    }

    #[test]
    fn test_read_missing_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log = BmiLog::new(temp_dir.path().join("nonexistent.jsonl"));
        assert!(log.read_records().unwrap().is_empty());
        assert!(log.latest().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bmi_history.jsonl");
        let log = BmiLog::new(&path);

        log.append(&record(170.0, 68.5, 1)).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{ not json").unwrap();
        drop(file);
        log.append(&record(170.0, 69.5, 0)).unwrap();

        assert_eq!(log.read_records().unwrap().len(), 2);
    }

    #[test]
    fn test_bmi_is_derived_not_stored() {
        let rec = record(170.0, 70.0, 0);
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("bmi").is_none());
        assert_eq!(rec.bmi().unwrap().display_value(), "24.2");
    }

    #[test]
    fn test_export_csv() {
        let temp_dir = tempfile::tempdir().unwrap();
        let csv_path = temp_dir.path().join("export").join("bmi.csv");

        let mut first = record(170.0, 68.5, 1);
        first.notes = "Merasa lebih sehat, dan bugar".into();
        let records = vec![first, record(170.0, 95.0, 0)];

        let count = export_csv(&records, &csv_path).unwrap();
        assert_eq!(count, 2);

        let contents = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,recorded_at,height_cm,weight_kg,bmi,category,notes"
        );
        assert!(contents.contains("23.7,Normal,\"Merasa lebih sehat, dan bugar\""));
        assert!(contents.contains("32.9,Obese,"));
    }
}
