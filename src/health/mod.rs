//! Health export ingestion
//!
//! Parses the JSON payload posted by Health Auto Export:
//!
//! ```text
//! {"data": {"metrics": [
//!     {"name": "weight_body_mass", "units": "kg",
//!      "data": [{"source": "...", "date": "2023-05-05 00:00:00 +1000", "qty": 115.0}]}
//! ]}}
//! ```
//!
//! and folds the samples into one [`Record`] per calendar day.

use chrono::{DateTime, FixedOffset, NaiveDate};
use log::{debug, trace};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

use crate::error::ImportError;
use crate::layout::Metric;
use crate::record::Record;

/// Sample timestamp format, e.g. `2023-05-05 00:00:00 +1000`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Day key / record title format
pub const TITLE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Deserialize)]
pub struct Export {
    pub data: ExportData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportData {
    #[serde(default)]
    pub metrics: Vec<ExportMetric>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportMetric {
    pub name: String,
    #[serde(default, alias = "units")]
    pub unit: String,
    #[serde(default)]
    pub data: Vec<MetricSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricSample {
    #[serde(default)]
    pub source: String,
    /// `None` when the export carries `null`
    #[serde(default, deserialize_with = "deserialize_sample_date")]
    pub date: Option<DateTime<FixedOffset>>,
    /// Zero for aggregate metrics (`Min`/`Avg`/`Max`, sleep) that carry none
    #[serde(default, rename = "qty")]
    pub quantity: f64,
}

/// Sample date deserializer: accepts a timestamp string or null
fn deserialize_sample_date<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() || raw == "null" {
        return Ok(None);
    }
    DateTime::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid sample date {:?}: {}", raw, e)))
}

/// Record field fed by an export metric, `None` for metrics not shown
pub fn metric_for(name: &str) -> Option<Metric> {
    match name {
        "active_energy" => Some(Metric::ActiveEnergy),
        "basal_energy_burned" => Some(Metric::RestingEnergy),
        "dietary_energy" => Some(Metric::IntakeEnergy),
        "weight_body_mass" => Some(Metric::Weight),
        _ => None,
    }
}

/// Fold every sample into per-day records, sorted by title.
///
/// Days are taken in each sample's own UTC offset. Later samples for the
/// same day and metric replace earlier ones. Unknown metrics and samples
/// without a date are ignored; missing metrics stay zero.
pub fn records_from_export(data: &ExportData) -> Vec<Record> {
    let mut days: BTreeMap<NaiveDate, Record> = BTreeMap::new();

    for metric in &data.metrics {
        let Some(field) = metric_for(&metric.name) else {
            trace!("Unknown metric ignored: {}", metric.name);
            continue;
        };
        for sample in &metric.data {
            let Some(date) = sample.date else {
                debug!("Sample without date ignored ({})", metric.name);
                continue;
            };
            let day = date.date_naive();
            let record = days
                .entry(day)
                .or_insert_with(|| Record::new(day.format(TITLE_FORMAT).to_string()));
            field.set(record, sample.quantity);
        }
    }

    days.into_values().collect()
}

/// Parse an export payload and fold it into records
pub fn parse_export(json: &str) -> Result<Vec<Record>, ImportError> {
    let export: Export = serde_json::from_str(json)?;
    let records = records_from_export(&export.data);
    debug!(
        "Export parsed: {} metrics, {} days",
        export.data.metrics.len(),
        records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
        "data": {
            "metrics": [
                {"name": "weight_body_mass", "units": "kg", "data": [
                    {"source": "Scale", "date": "2023-05-05 07:00:00 +1000", "qty": 115.0},
                    {"source": "Scale", "date": "2023-05-04 07:00:00 +1000", "qty": 115.4}
                ]},
                {"name": "dietary_energy", "units": "kJ", "data": [
                    {"source": "App", "date": "2023-05-05 00:00:00 +1000", "qty": 5000.00001}
                ]},
                {"name": "active_energy", "units": "kJ", "data": [
                    {"source": "Watch", "date": "2023-05-05 00:00:00 +1000", "qty": 3000}
                ]},
                {"name": "basal_energy_burned", "units": "kJ", "data": [
                    {"source": "Watch", "date": "2023-05-05 00:00:00 +1000", "qty": 10000.0}
                ]},
                {"name": "step_count", "units": "count", "data": [
                    {"source": "Watch", "date": "2023-05-06 00:00:00 +1000", "qty": 9000}
                ]}
            ]
        }
    }"#;

    #[test]
    fn test_samples_fold_by_day() {
        let records = parse_export(EXPORT).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[1],
            Record {
                title: "2023-05-05".to_string(),
                active_energy: 3000.0,
                resting_energy: 10000.0,
                intake_energy: 5000.00001,
                weight: 115.0,
            }
        );
        assert_eq!(records[0].title, "2023-05-04");
        assert_eq!(records[0].weight, 115.4);
        assert_eq!(records[0].intake_energy, 0.0);
    }

    #[test]
    fn test_day_uses_sample_offset() {
        let json = r#"{"data":{"metrics":[{"name":"weight_body_mass","units":"kg","data":[
            {"source":"Scale","date":"2023-05-05 23:30:00 -0500","qty":80.0}
        ]}]}}"#;
        let records = parse_export(json).unwrap();
        assert_eq!(records[0].title, "2023-05-05");
    }

    #[test]
    fn test_null_dates_skipped() {
        let json = r#"{"data":{"metrics":[{"name":"weight_body_mass","units":"kg","data":[
            {"source":"Scale","date":null,"qty":80.0},
            {"source":"Scale","date":"2023-01-02 08:00:00 +0000","qty":81.0}
        ]}]}}"#;
        let records = parse_export(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].weight, 81.0);
    }

    #[test]
    fn test_known_metric_with_zero_value_kept() {
        let json = r#"{"data":{"metrics":[{"name":"dietary_energy","units":"kJ","data":[
            {"source":"App","date":"2023-01-02 08:00:00 +0000","qty":0}
        ]}]}}"#;
        let records = parse_export(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "2023-01-02");
    }

    #[test]
    fn test_samples_without_qty_do_not_abort_import() {
        let json = r#"{"data":{"metrics":[
            {"name":"heart_rate","units":"count/min","data":[
                {"source":"Watch","date":"2023-05-05 00:00:00 +1000","Min":52,"Avg":71.5,"Max":140}
            ]},
            {"name":"sleep_analysis","units":"hr","data":[
                {"source":"Watch","date":"2023-05-05 00:00:00 +1000","asleep":7.2,"inBed":8.0}
            ]},
            {"name":"weight_body_mass","units":"kg","data":[
                {"source":"Scale","date":"2023-05-05 07:00:00 +1000","qty":115.0}
            ]}
        ]}}"#;
        let records = parse_export(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "2023-05-05");
        assert_eq!(records[0].weight, 115.0);
    }

    #[test]
    fn test_bad_date_is_error() {
        let json = r#"{"data":{"metrics":[{"name":"weight_body_mass","units":"kg","data":[
            {"source":"Scale","date":"05/05/2023","qty":80.0}
        ]}]}}"#;
        assert!(matches!(parse_export(json), Err(ImportError::Json(_))));
    }

    #[test]
    fn test_empty_export() {
        assert!(parse_export(r#"{"data":{}}"#).unwrap().is_empty());
    }
}
