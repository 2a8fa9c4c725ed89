use serde::{Deserialize, Serialize};

/// One row of an uploaded sensor CSV. Missing or unparseable readings
/// degrade to `None` instead of failing the upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    pub t: String,
    pub ph: Option<f64>,
    pub temp_c: Option<f64>,
}

/// A point of the synthetic pH series used by the sensors lesson.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SeriesPoint {
    pub t: usize,
    pub ph: f64,
}

/// Outcome of running the alert rule over a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertReport {
    pub count: usize,
    pub visit_recommended: bool,
}
