//! File output for multiverse runs.
//!
//! # Output Files
//!
//! - `series.jsonl` - one [`SeriesRow`](ideology_events::SeriesRow) per line,
//!   tagged with its reality
//! - `summary.json` - per-reality summaries and the dominant-bucket tally

use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use ideology_events::TimeSeries;

use crate::report::{DominantTally, MultiverseReport, RealitySummary};

/// Errors that can occur during output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    realities: usize,
    rows_written: u64,
    labels: &'a [String],
    summaries: &'a [RealitySummary],
    dominant: Vec<DominantTally>,
}

/// Writes recorded series as JSON Lines and a JSON summary.
#[derive(Debug)]
pub struct SeriesWriter {
    output_dir: PathBuf,
    series_writer: BufWriter<File>,
    rows_written: u64,
}

impl SeriesWriter {
    /// Creates the directory if needed and opens `series.jsonl`.
    pub fn new(output_dir: &Path) -> Result<Self, OutputError> {
        fs::create_dir_all(output_dir)?;
        let file = File::create(output_dir.join("series.jsonl"))?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            series_writer: BufWriter::new(file),
            rows_written: 0,
        })
    }

    /// Appends every row of `series`.
    pub fn write_series(&mut self, series: &TimeSeries) -> Result<(), OutputError> {
        for row in series.rows() {
            writeln!(self.series_writer, "{}", row.to_json()?)?;
            self.rows_written += 1;
        }
        Ok(())
    }

    /// Writes every series of a report followed by `summary.json`.
    pub fn write_report(&mut self, report: &MultiverseReport) -> Result<(), OutputError> {
        for run in report.runs() {
            self.write_series(&run.series)?;
        }
        self.flush()?;
        self.write_summary(report)
    }

    /// Writes `summary.json`.
    pub fn write_summary(&self, report: &MultiverseReport) -> Result<(), OutputError> {
        let summary = SummaryFile {
            realities: report.runs().len(),
            rows_written: self.rows_written,
            labels: report.labels(),
            summaries: report.summaries(),
            dominant: report.dominant_tally(),
        };

        let file = File::create(self.output_dir.join("summary.json"))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.series_writer.flush()?;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
