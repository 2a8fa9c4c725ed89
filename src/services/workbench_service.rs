use anyhow::{bail, Result};
use rand::Rng;
use tracing::info;

use crate::config::WorkbenchSettings;
use crate::models::{AlertReport, SampleRow, SeriesPoint};
use crate::utils::count_alert_runs;

/// CSV ingestion and the sensors-lesson alert rule.
#[derive(Clone)]
pub struct WorkbenchService {
    settings: WorkbenchSettings,
}

impl WorkbenchService {
    pub fn new(settings: WorkbenchSettings) -> Self {
        Self { settings }
    }

    /// Parses an uploaded sensor CSV. Header columns are matched
    /// case-insensitively by substring (`time`/`date`/`t`, `ph`,
    /// `temp`/`celsius`/`degc`); readings that fail to parse become `None`.
    pub fn parse_csv(&self, text: &str) -> Result<Vec<SampleRow>> {
        let text = text.trim();
        if text.is_empty() {
            bail!("empty CSV input");
        }

        let mut lines = text.lines();
        let header = lines.next().unwrap_or_default();
        let headers: Vec<String> = header
            .split(',')
            .map(|h| h.trim().to_lowercase())
            .collect();

        let find = |needles: &[&str]| {
            headers
                .iter()
                .position(|h| needles.iter().any(|needle| h.contains(needle)))
        };
        let t_idx = find(&["time", "date", "t"]);
        let ph_idx = find(&["ph"]);
        let temp_idx = find(&["temp", "celsius", "degc"]);

        let rows: Vec<SampleRow> = lines
            .enumerate()
            .map(|(i, line)| {
                let parts: Vec<&str> = line.split(',').map(str::trim).collect();
                let cell = |idx: Option<usize>| idx.and_then(|idx| parts.get(idx));
                SampleRow {
                    t: cell(t_idx)
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| i.to_string()),
                    ph: cell(ph_idx).and_then(|v| v.parse().ok()),
                    temp_c: cell(temp_idx).and_then(|v| v.parse().ok()),
                }
            })
            .collect();

        info!(rows = rows.len(), "loaded CSV");
        Ok(rows)
    }

    /// Synthetic pH series for the sensors lesson: a sine baseline with
    /// periodic spikes and a little noise, 72 points.
    pub fn synthetic_series(&self) -> Vec<SeriesPoint> {
        let mut rng = rand::thread_rng();
        (0..72)
            .map(|t| {
                let mut spike = 0.0;
                if t % 23 == 0 {
                    spike += 0.9;
                }
                if t % 37 == 0 {
                    spike += 1.2;
                }
                let noise = (rng.gen::<f64>() - 0.5) * 0.05;
                SeriesPoint {
                    t,
                    ph: 7.0 + (t as f64 / 8.0).sin() * 0.25 + spike + noise,
                }
            })
            .collect()
    }

    /// Runs the configured alert rule over a series; a site visit is
    /// recommended once two runs qualify.
    pub fn alert_report(&self, values: &[f64]) -> AlertReport {
        let count = count_alert_runs(
            values,
            self.settings.ph_threshold,
            self.settings.min_consecutive,
        );
        AlertReport {
            count,
            visit_recommended: count >= 2,
        }
    }

    pub fn ph_values(series: &[SeriesPoint]) -> Vec<f64> {
        series.iter().map(|point| point.ph).collect()
    }
}
