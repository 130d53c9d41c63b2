//! Time Series
//!
//! Callers accumulate snapshots into rows tagged with the step index and, for
//! batch runs, the reality that produced them.

use serde::{Deserialize, Serialize};

use crate::Snapshot;

/// One tabulated observation: a snapshot with its step index attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub t: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reality: Option<u32>,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

impl SeriesRow {
    /// Serializes the row as one line of compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a row from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Ordered sequence of rows for one reality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reality: Option<u32>,
    rows: Vec<SeriesRow>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a series whose rows are all tagged with a reality identifier.
    pub fn with_reality(reality: u32) -> Self {
        Self {
            reality: Some(reality),
            rows: Vec::new(),
        }
    }

    pub fn reality(&self) -> Option<u32> {
        self.reality
    }

    /// Appends a snapshot taken at step `t`.
    pub fn push(&mut self, t: u64, snapshot: Snapshot) {
        self.rows.push(SeriesRow {
            t,
            reality: self.reality,
            snapshot,
        });
    }

    pub fn rows(&self) -> &[SeriesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&SeriesRow> {
        self.rows.last()
    }

    /// Step indices of all rows.
    pub fn steps(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.t).collect()
    }

    /// Extracts one column by bucket label or macro field name.
    ///
    /// Returns `None` if any row lacks the key.
    pub fn column(&self, key: &str) -> Option<Vec<f64>> {
        self.rows.iter().map(|r| r.snapshot.get(key)).collect()
    }

    /// Trailing rolling mean of a column with `min_periods = 1`.
    ///
    /// A window of 0 or 1 returns the column unchanged.
    pub fn rolling_mean(&self, key: &str, window: usize) -> Option<Vec<f64>> {
        let values = self.column(key)?;
        let window = window.max(1);

        let mut out = Vec::with_capacity(values.len());
        let mut sum = 0.0;
        for (i, value) in values.iter().enumerate() {
            sum += value;
            if i >= window {
                sum -= values[i - window];
            }
            let count = (i + 1).min(window);
            out.push(sum / count as f64);
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BucketShare, MacroSnapshot};

    fn snap(left: f64, polarization: f64) -> Snapshot {
        Snapshot::new(
            vec![
                BucketShare::new("Left", left),
                BucketShare::new("Right", 1.0 - left),
            ],
            MacroSnapshot {
                polarization,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_push_tags_rows() {
        let mut series = TimeSeries::with_reality(7);
        series.push(1, snap(0.5, 0.1));
        series.push(2, snap(0.4, 0.2));

        assert_eq!(series.len(), 2);
        assert_eq!(series.steps(), vec![1, 2]);
        assert!(series.rows().iter().all(|r| r.reality == Some(7)));
        assert_eq!(series.last().map(|r| r.t), Some(2));
    }

    #[test]
    fn test_column_extraction() {
        let mut series = TimeSeries::new();
        series.push(1, snap(0.5, 0.1));
        series.push(2, snap(0.25, 0.3));

        assert_eq!(series.column("Left"), Some(vec![0.5, 0.25]));
        assert_eq!(series.column("polarization"), Some(vec![0.1, 0.3]));
        assert_eq!(series.column("Centre"), None);
    }

    #[test]
    fn test_rolling_mean_min_periods() {
        let mut series = TimeSeries::new();
        for (t, p) in [1.0, 2.0, 3.0, 4.0].into_iter().enumerate() {
            series.push(t as u64, snap(0.5, p));
        }

        let smoothed = series.rolling_mean("polarization", 2).unwrap();
        assert_eq!(smoothed, vec![1.0, 1.5, 2.5, 3.5]);

        let raw = series.rolling_mean("polarization", 0).unwrap();
        assert_eq!(raw, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_row_serialization() {
        let mut series = TimeSeries::with_reality(3);
        series.push(10, snap(0.5, 0.1));

        let json = serde_json::to_value(&series.rows()[0]).unwrap();
        assert_eq!(json["t"], 10);
        assert_eq!(json["reality"], 3);
        assert_eq!(json["polarization"], 0.1);

        let untagged = SeriesRow {
            t: 1,
            reality: None,
            snapshot: snap(1.0, 0.0),
        };
        let json = serde_json::to_value(&untagged).unwrap();
        assert!(json.get("reality").is_none());
    }

    #[test]
    fn test_row_json_line() {
        let mut series = TimeSeries::with_reality(2);
        series.push(4, snap(0.25, 0.2));

        let line = series.rows()[0].to_json().unwrap();
        assert!(!line.contains('\n'));
        assert_eq!(SeriesRow::from_json(&line).unwrap(), series.rows()[0]);
        assert!(SeriesRow::from_json("{\"t\": 1}").is_err());
    }
}
