// Configuration - Shell settings and the static page layout
use crate::application::live_update::LiveUpdateSettings;
use crate::application::panel_controller::ControllerTiming;
use crate::application::provisioner::WidgetCatalog;
use crate::domain::bin::{BinRecord, Coordinate};
use crate::domain::chart::{ChartData, ChartKind, ChartOptions, ChartSpec};
use crate::domain::layout::{DashboardGroup, DashboardPanel, Layout, Section, WidgetAction};
use crate::domain::map::{MapSpec, PinnedMarker, TileLayer, OSM_ATTRIBUTION, OSM_TILE_URL};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct ShellConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub timing: TimingSettings,
    #[serde(default)]
    pub live: LiveSettings,
    #[serde(default)]
    pub backends: BackendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub address: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimingSettings {
    pub settle_delay_ms: u64,
    pub resize_delay_ms: u64,
    pub toast_ttl_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 100,
            resize_delay_ms: 200,
            toast_ttl_ms: 5_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LiveSettings {
    pub enabled: bool,
    pub start_delay_ms: u64,
    pub period_ms: u64,
    pub probability: f64,
    pub max_step: f64,
    /// Fixed seed for reproducible demos
    pub seed: Option<u64>,
}

impl Default for LiveSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            start_delay_ms: 3_000,
            period_ms: 5_000,
            probability: 0.3,
            max_step: 5.0,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendSettings {
    pub maps: bool,
    pub charts: bool,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            maps: true,
            charts: true,
        }
    }
}

impl ShellConfig {
    pub fn controller_timing(&self) -> ControllerTiming {
        ControllerTiming {
            settle_delay: Duration::from_millis(self.timing.settle_delay_ms),
            resize_delay: Duration::from_millis(self.timing.resize_delay_ms),
        }
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.timing.toast_ttl_ms)
    }

    pub fn live_settings(&self) -> anyhow::Result<LiveUpdateSettings> {
        if self.live.period_ms == 0 {
            anyhow::bail!("live.period_ms must be greater than zero");
        }
        Ok(LiveUpdateSettings {
            start_delay: Duration::from_millis(self.live.start_delay_ms),
            period: Duration::from_millis(self.live.period_ms),
            probability: self.live.probability.clamp(0.0, 1.0),
            max_step: self.live.max_step.abs(),
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LayoutConfig {
    pub initial_section: String,
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub dashboards: Vec<DashboardConfig>,
    #[serde(default)]
    pub maps: Vec<MapConfig>,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
    #[serde(default)]
    pub bins: Vec<BinConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SectionConfig {
    pub id: String,
    #[serde(default)]
    pub widgets: Vec<WidgetAction>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub id: String,
    pub section: String,
    pub initial_panel: Option<String>,
    pub panels: Vec<PanelConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelConfig {
    pub id: String,
    #[serde(default)]
    pub widgets: Vec<WidgetAction>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MapConfig {
    pub id: String,
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: Option<String>,
    pub attribution: Option<String>,
    #[serde(default)]
    pub show_bins: bool,
    pub pinned: Option<PinnedConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PinnedConfig {
    pub at: [f64; 2],
    pub popup: String,
    #[serde(default)]
    pub open: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub kind: ChartKind,
    pub data: ChartData,
    #[serde(default)]
    pub options: ChartOptions,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BinConfig {
    pub id: String,
    pub at: [f64; 2],
    pub address: Option<String>,
    pub fill_percent: f64,
}

impl LayoutConfig {
    pub fn layout(&self) -> Layout {
        Layout {
            sections: self
                .sections
                .iter()
                .map(|s| Section {
                    id: s.id.clone(),
                    widgets: s.widgets.clone(),
                })
                .collect(),
            initial_section: self.initial_section.clone(),
            dashboards: self
                .dashboards
                .iter()
                .map(|d| DashboardGroup {
                    id: d.id.clone(),
                    section: d.section.clone(),
                    panels: d
                        .panels
                        .iter()
                        .map(|p| DashboardPanel {
                            id: p.id.clone(),
                            widgets: p.widgets.clone(),
                        })
                        .collect(),
                })
                .collect(),
            initial_panels: self
                .dashboards
                .iter()
                .filter_map(|d| d.initial_panel.clone().map(|p| (d.id.clone(), p)))
                .collect(),
        }
    }

    pub fn catalog(&self) -> WidgetCatalog {
        let mut catalog = WidgetCatalog::default();

        for map in &self.maps {
            let spec = MapSpec {
                center: coordinate(map.center),
                zoom: map.zoom,
                tiles: TileLayer {
                    url_template: map.tile_url.clone().unwrap_or_else(|| OSM_TILE_URL.to_string()),
                    attribution: map
                        .attribution
                        .clone()
                        .unwrap_or_else(|| OSM_ATTRIBUTION.to_string()),
                },
                pinned: map.pinned.as_ref().map(|p| PinnedMarker {
                    coord: coordinate(p.at),
                    popup_html: p.popup.clone(),
                    open_popup: p.open,
                }),
                show_bins: map.show_bins,
            };
            catalog.maps.insert(map.id.clone(), spec);
        }

        for chart in &self.charts {
            catalog.charts.insert(
                chart.id.clone(),
                ChartSpec::new(chart.kind, chart.data.clone(), chart.options.clone()),
            );
        }

        catalog
    }

    pub fn bins(&self) -> Vec<BinRecord> {
        self.bins
            .iter()
            .map(|b| BinRecord::new(b.id.clone(), coordinate(b.at), b.address.clone(), b.fill_percent))
            .collect()
    }
}

fn coordinate([lat, lng]: [f64; 2]) -> Coordinate {
    Coordinate::new(lat, lng)
}

pub fn load_shell_config() -> anyhow::Result<ShellConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/shell"))
        .add_source(config::Environment::with_prefix("WASTE").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_layout_config() -> anyhow::Result<LayoutConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/layout"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
