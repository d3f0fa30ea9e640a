// Chart domain models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Doughnut,
    Bar,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(default)]
    pub border_color: Option<String>,
    /// One colour for line/bar fills, one per slice for doughnuts
    #[serde(default)]
    pub background_colors: Vec<String>,
    #[serde(default)]
    pub tension: Option<f64>,
    #[serde(default)]
    pub fill: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendPosition {
    #[default]
    Top,
    Bottom,
    Hidden,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartOptions {
    #[serde(default = "default_responsive")]
    pub responsive: bool,
    #[serde(default)]
    pub legend: LegendPosition,
    #[serde(default)]
    pub y_title: Option<String>,
    #[serde(default)]
    pub begin_at_zero: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            legend: LegendPosition::default(),
            y_title: None,
            begin_at_zero: false,
        }
    }
}

fn default_responsive() -> bool {
    true
}

/// Everything needed to build one chart widget
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub data: ChartData,
    #[serde(default)]
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, data: ChartData, options: ChartOptions) -> Self {
        Self { kind, data, options }
    }
}
