use serde::Serialize;
use std::sync::Arc;

use crate::chart::{ChartRenderer, ChartSeries};
use crate::error::{DashboardError, Result};
use crate::model::{AcademicRecord, SubjectMark};
use crate::motivation;
use crate::ring::{RingParams, RingSpec};

/// Ceiling used for the "total / out of" column.
pub const MARKS_PER_SUBJECT: f64 = 100.0;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ScorecardView {
    pub greeting: String,
    pub latest: LatestSemesterView,
    pub history: Vec<HistoryRow>,
    pub summary: SummaryPanel,
    pub chart: ChartSeries,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LatestSemesterView {
    pub label: String,
    pub subjects: Vec<SubjectMark>,
    pub total: f64,
    pub out_of: f64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RowBand {
    Plain,
    Shaded,
}

impl RowBand {
    fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            RowBand::Plain
        } else {
            RowBand::Shaded
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HistoryRow {
    pub label: String,
    pub sgpa: f64,
    pub subjects: Vec<SubjectMark>,
    pub total: f64,
    pub out_of: f64,
    pub band: RowBand,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SummaryPanel {
    pub sgpa: f64,
    pub ring: RingParams,
    pub radius: f64,
    pub stroke: f64,
    pub motivation: &'static str,
}

pub fn semester_label(index: usize) -> String {
    format!("Sem {}", index + 1)
}

pub struct ScorecardRenderer {
    ring: RingSpec,
    chart: Arc<dyn ChartRenderer>,
}

impl ScorecardRenderer {
    pub fn new(ring: RingSpec, chart: Arc<dyn ChartRenderer>) -> Self {
        ScorecardRenderer { ring, chart }
    }

    /// Builds the scorecard view for `record` and passes the SGPA series to
    /// the chart collaborator. Fails without touching the chart when the
    /// record has no semesters.
    pub fn render(&self, record: &AcademicRecord) -> Result<ScorecardView> {
        let (latest_index, latest_semester) = record
            .semesters
            .iter()
            .enumerate()
            .last()
            .ok_or(DashboardError::EmptySemesters)?;

        let latest = LatestSemesterView {
            label: semester_label(latest_index),
            subjects: latest_semester.subject_marks(),
            total: latest_semester.total,
            out_of: latest_semester.subjects.len() as f64 * MARKS_PER_SUBJECT,
        };

        let history: Vec<HistoryRow> = record
            .semesters
            .iter()
            .enumerate()
            .map(|(i, sem)| HistoryRow {
                label: semester_label(i),
                sgpa: sem.sgpa,
                subjects: sem.subject_marks(),
                total: sem.total,
                out_of: sem.subjects.len() as f64 * MARKS_PER_SUBJECT,
                band: RowBand::for_index(i),
            })
            .collect();

        let chart = ChartSeries {
            labels: history.iter().map(|row| row.label.clone()).collect(),
            values: record.semesters.iter().map(|sem| sem.sgpa).collect(),
        };

        let summary = SummaryPanel {
            sgpa: record.sgpa,
            ring: self.ring.compute(record.sgpa),
            radius: self.ring.radius,
            stroke: self.ring.stroke,
            motivation: motivation::classify(record.sgpa),
        };

        self.chart.render(&chart);

        Ok(ScorecardView {
            greeting: format!("Welcome, {}", capitalize(&record.username)),
            latest,
            history,
            summary,
            chart,
        })
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
