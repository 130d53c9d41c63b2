//! Cross-reality summaries.
//!
//! Reduces each reality's time series to a handful of end-state numbers and
//! counts which bucket dominated the most realities.

use ideology_events::{MacroField, TimeSeries};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use tracing::{info, warn};

use crate::output::SeriesWriter;
use crate::runner::RealityRun;
use crate::RunError;

/// End state of one reality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealitySummary {
    pub reality: u32,
    pub seed: u64,
    /// Step index of the last recorded row
    pub final_t: u64,
    pub final_polarization: f64,
    pub final_satisfaction: f64,
    pub final_mean_ideology: f64,
    /// Mean of the recorded mobility column
    pub mean_mobility: f64,
    /// Label of the largest bucket at the final row
    pub dominant: Option<String>,
}

impl RealitySummary {
    /// Summarizes a run. Returns `None` if it recorded no rows.
    pub fn from_run(run: &RealityRun) -> Option<Self> {
        let Some(last) = run.series.last() else {
            warn!(reality = run.reality, "Reality recorded no rows");
            return None;
        };
        let macros = &last.snapshot.macros;

        Some(Self {
            reality: run.reality,
            seed: run.seed,
            final_t: last.t,
            final_polarization: macros.polarization,
            final_satisfaction: macros.satisfaction,
            final_mean_ideology: macros.mean_ideology,
            mean_mobility: column_mean(&run.series, MacroField::Mobility),
            dominant: last.snapshot.dominant().map(str::to_string),
        })
    }
}

fn column_mean(series: &TimeSeries, field: MacroField) -> f64 {
    match series.column(field.as_str()) {
        Some(values) if !values.is_empty() => values.iter().sum::<f64>() / values.len() as f64,
        _ => 0.0,
    }
}

/// Number of realities in which a bucket ended up largest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DominantTally {
    pub label: String,
    pub realities: usize,
}

/// Results of a multiverse run, ordered by reality id.
#[derive(Debug, Clone)]
pub struct MultiverseReport {
    labels: Vec<String>,
    runs: Vec<RealityRun>,
    summaries: Vec<RealitySummary>,
}

impl MultiverseReport {
    pub fn new(labels: Vec<String>, mut runs: Vec<RealityRun>) -> Self {
        runs.sort_by_key(|run| run.reality);
        let summaries = runs.iter().filter_map(RealitySummary::from_run).collect();
        Self {
            labels,
            runs,
            summaries,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn runs(&self) -> &[RealityRun] {
        &self.runs
    }

    pub fn summaries(&self) -> &[RealitySummary] {
        &self.summaries
    }

    /// Total rows recorded across all realities.
    pub fn row_count(&self) -> usize {
        self.runs.iter().map(|run| run.series.len()).sum()
    }

    /// Dominant-bucket counts in anchor order, including buckets that never won.
    pub fn dominant_tally(&self) -> Vec<DominantTally> {
        self.labels
            .iter()
            .map(|label| DominantTally {
                label: label.clone(),
                realities: self
                    .summaries
                    .iter()
                    .filter(|s| s.dominant.as_deref() == Some(label.as_str()))
                    .count(),
            })
            .collect()
    }

    /// Writes `series.jsonl` and `summary.json` into `dir` and returns the
    /// number of rows written.
    pub fn write_to(&self, dir: &Path) -> Result<u64, RunError> {
        let mut writer = SeriesWriter::new(dir)?;
        writer.write_report(self)?;
        info!(
            dir = %dir.display(),
            rows = writer.rows_written(),
            "Output written"
        );
        Ok(writer.rows_written())
    }

    /// Plain-text table of the per-reality summaries and the tally.
    pub fn format_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:>8} {:>20} {:>6} {:>12} {:>12} {:>10} {:>10}  dominant",
            "reality", "seed", "t", "polarization", "satisfaction", "mean_ideo", "mobility"
        );
        for s in &self.summaries {
            let _ = writeln!(
                out,
                "{:>8} {:>20} {:>6} {:>12.4} {:>12.4} {:>10.4} {:>10.4}  {}",
                s.reality,
                s.seed,
                s.final_t,
                s.final_polarization,
                s.final_satisfaction,
                s.final_mean_ideology,
                s.mean_mobility,
                s.dominant.as_deref().unwrap_or("-"),
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Dominant bucket across {} realities:", self.summaries.len());
        for tally in self.dominant_tally() {
            let _ = writeln!(out, "  {:<20} {}", tally.label, tally.realities);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ideology_events::{BucketShare, MacroSnapshot, Snapshot};

    fn labels() -> Vec<String> {
        vec!["Left".into(), "Centre".into(), "Right".into()]
    }

    fn run(reality: u32, shares: [f64; 3], mobility: [f64; 2]) -> RealityRun {
        let mut series = TimeSeries::with_reality(reality);
        for (t, m) in mobility.iter().enumerate() {
            let buckets = labels()
                .into_iter()
                .zip(shares)
                .map(|(label, p)| BucketShare::new(label, p))
                .collect();
            series.push(
                t as u64 + 1,
                Snapshot::new(
                    buckets,
                    MacroSnapshot {
                        mobility: *m,
                        polarization: 0.1 * f64::from(reality),
                        ..Default::default()
                    },
                ),
            );
        }
        RealityRun {
            reality,
            seed: 7 + u64::from(reality),
            series,
        }
    }

    #[test]
    fn test_summary_reads_final_row() {
        let summary = RealitySummary::from_run(&run(2, [0.2, 0.5, 0.3], [0.4, 0.2])).unwrap();
        assert_eq!(summary.final_t, 2);
        assert_eq!(summary.seed, 9);
        assert_eq!(summary.dominant.as_deref(), Some("Centre"));
        assert!((summary.mean_mobility - 0.3).abs() < 1e-12);
        assert!((summary.final_polarization - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_empty_run_has_no_summary() {
        let empty = RealityRun {
            reality: 0,
            seed: 0,
            series: TimeSeries::with_reality(0),
        };
        assert!(RealitySummary::from_run(&empty).is_none());
    }

    #[test]
    fn test_report_orders_by_reality() {
        let report = MultiverseReport::new(
            labels(),
            vec![
                run(2, [0.6, 0.2, 0.2], [0.1, 0.1]),
                run(0, [0.2, 0.2, 0.6], [0.1, 0.1]),
                run(1, [0.6, 0.3, 0.1], [0.1, 0.1]),
            ],
        );
        let ids: Vec<u32> = report.summaries().iter().map(|s| s.reality).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(report.row_count(), 6);
    }

    #[test]
    fn test_dominant_tally_covers_every_label() {
        let report = MultiverseReport::new(
            labels(),
            vec![
                run(0, [0.6, 0.2, 0.2], [0.1, 0.1]),
                run(1, [0.5, 0.3, 0.2], [0.1, 0.1]),
                run(2, [0.1, 0.2, 0.7], [0.1, 0.1]),
            ],
        );
        let tally = report.dominant_tally();
        assert_eq!(
            tally,
            vec![
                DominantTally { label: "Left".into(), realities: 2 },
                DominantTally { label: "Centre".into(), realities: 0 },
                DominantTally { label: "Right".into(), realities: 1 },
            ]
        );
    }

    #[test]
    fn test_format_table_lists_each_reality() {
        let report = MultiverseReport::new(labels(), vec![run(0, [0.6, 0.2, 0.2], [0.1, 0.1])]);
        let table = report.format_table();
        assert!(table.contains("polarization"));
        assert!(table.contains("Dominant bucket across 1 realities"));
        assert!(table.lines().any(|l| l.trim_start().starts_with('0') && l.ends_with("Left")));
    }
}
