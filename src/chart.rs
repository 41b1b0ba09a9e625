use parking_lot::Mutex;
use serde::Serialize;

/// Inputs for the SGPA growth chart: one label and one value per semester,
/// in semester order.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Whatever draws the time-series chart. The scorecard renderer hands it a
/// series and does not care how it is displayed.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, series: &ChartSeries);
}

// Line chart config in the shape the page's charting script consumes
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LineChartConfig {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: LineChartData,
    pub options: LineChartOptions,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LineChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<LineDataset>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LineChartOptions {
    pub responsive: bool,
    pub plugins: ChartPlugins,
    pub scales: ChartScales,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChartPlugins {
    pub legend: LegendOptions,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LegendOptions {
    pub display: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChartScales {
    pub y: AxisOptions,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub begin_at_zero: bool,
    pub max: f64,
}

impl LineChartConfig {
    pub fn sgpa_growth(series: &ChartSeries, y_max: f64) -> Self {
        LineChartConfig {
            chart_type: "line".to_string(),
            data: LineChartData {
                labels: series.labels.clone(),
                datasets: vec![LineDataset {
                    label: "SGPA".to_string(),
                    data: series.values.clone(),
                    border_color: "rgba(16,185,129,0.9)".to_string(),
                    background_color: "rgba(16,185,129,0.2)".to_string(),
                    fill: true,
                    tension: 0.3,
                }],
            },
            options: LineChartOptions {
                responsive: true,
                plugins: ChartPlugins {
                    legend: LegendOptions { display: false },
                },
                scales: ChartScales {
                    y: AxisOptions {
                        begin_at_zero: true,
                        max: y_max,
                    },
                },
            },
        }
    }
}

/// Keeps the config for the most recently rendered series so the page can
/// pick it up from `GET /chart`.
pub struct ChartJsAdapter {
    y_max: f64,
    latest: Mutex<Option<LineChartConfig>>,
}

impl ChartJsAdapter {
    pub fn new(y_max: f64) -> Self {
        ChartJsAdapter {
            y_max,
            latest: Mutex::new(None),
        }
    }

    pub fn latest(&self) -> Option<LineChartConfig> {
        self.latest.lock().clone()
    }

    pub fn clear(&self) {
        *self.latest.lock() = None;
    }
}

impl ChartRenderer for ChartJsAdapter {
    fn render(&self, series: &ChartSeries) {
        log::debug!("Rendering SGPA chart with {} points", series.values.len());
        *self.latest.lock() = Some(LineChartConfig::sgpa_growth(series, self.y_max));
    }
}
