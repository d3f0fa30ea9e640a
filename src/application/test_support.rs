// Test doubles shared by the application tests
use crate::application::bin_source::BinSource;
use crate::application::provisioner::WidgetCatalog;
use crate::application::widget_backend::{
    ChartBackend, ChartHandle, MapBackend, MapHandle, MarkerHandle,
};
use crate::domain::bin::{BinRecord, Coordinate};
use crate::domain::chart::{ChartData, ChartKind, ChartOptions, ChartSpec, Dataset};
use crate::domain::map::{MapSpec, MarkerIcon, PinnedMarker, TileLayer};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct RecordingMapBackend {
    next: AtomicU64,
    maps: Mutex<Vec<String>>,
    markers: Mutex<Vec<MarkerIcon>>,
    popups: Mutex<Vec<String>>,
    invalidations: AtomicU64,
}

impl RecordingMapBackend {
    pub fn created(&self, container: &str) -> usize {
        self.maps.lock().iter().filter(|c| *c == container).count()
    }

    pub fn total_created(&self) -> usize {
        self.maps.lock().len()
    }

    pub fn bin_markers(&self) -> usize {
        self.markers
            .lock()
            .iter()
            .filter(|icon| matches!(icon, MarkerIcon::Pin { .. }))
            .count()
    }

    pub fn marker_classes(&self) -> Vec<String> {
        self.markers.lock().iter().map(MarkerIcon::class_name).collect()
    }

    pub fn popups(&self) -> Vec<String> {
        self.popups.lock().clone()
    }

    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::SeqCst)
    }
}

impl MapBackend for RecordingMapBackend {
    fn create_map(&self, container: &str, _center: Coordinate, _zoom: u8) -> MapHandle {
        self.maps.lock().push(container.to_string());
        MapHandle(self.next.fetch_add(1, Ordering::SeqCst))
    }

    fn add_tile_layer(&self, _map: MapHandle, _url_template: &str, _attribution: &str) {}

    fn add_marker(&self, _map: MapHandle, _coord: Coordinate, icon: &MarkerIcon) -> MarkerHandle {
        self.markers.lock().push(icon.clone());
        MarkerHandle(self.next.fetch_add(1, Ordering::SeqCst))
    }

    fn bind_popup(&self, _marker: MarkerHandle, html: &str, _open: bool) {
        self.popups.lock().push(html.to_string());
    }

    fn invalidate_size(&self, _map: MapHandle) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingChartBackend {
    next: AtomicU64,
    charts: Mutex<Vec<String>>,
}

impl RecordingChartBackend {
    pub fn created(&self, container: &str) -> usize {
        self.charts.lock().iter().filter(|c| *c == container).count()
    }
}

impl ChartBackend for RecordingChartBackend {
    fn create_chart(
        &self,
        container: &str,
        _kind: ChartKind,
        _data: &ChartData,
        _options: &ChartOptions,
    ) -> ChartHandle {
        self.charts.lock().push(container.to_string());
        ChartHandle(self.next.fetch_add(1, Ordering::SeqCst))
    }
}

pub struct StaticBins(pub Vec<BinRecord>);

#[async_trait]
impl BinSource for StaticBins {
    async fn bin_locations(&self) -> anyhow::Result<Vec<BinRecord>> {
        Ok(self.0.clone())
    }
}

pub fn sample_bins() -> Vec<BinRecord> {
    [
        ("BIN-001", 40.7128, -74.0060, 75.0),
        ("BIN-002", 40.7218, -74.0100, 40.0),
        ("BIN-003", 40.7058, -74.0160, 95.0),
        ("BIN-004", 40.7180, -74.0020, 30.0),
        ("BIN-005", 40.7080, -74.0080, 80.0),
    ]
    .into_iter()
    .map(|(id, lat, lng, fill)| {
        BinRecord::new(id.to_string(), Coordinate::new(lat, lng), None, fill)
    })
    .collect()
}

/// Two maps and two charts, mirroring the household and aggregator dashboards
pub fn household_catalog() -> WidgetCatalog {
    let center = Coordinate::new(40.7128, -74.0060);
    let mut catalog = WidgetCatalog::default();

    catalog.maps.insert(
        "household-map".to_string(),
        MapSpec {
            center,
            zoom: 15,
            tiles: TileLayer::default(),
            pinned: Some(PinnedMarker {
                coord: center,
                popup_html: "<b>Your Bin</b><br>123 Green Street".to_string(),
                open_popup: true,
            }),
            show_bins: false,
        },
    );
    catalog.maps.insert(
        "aggregator-map-view".to_string(),
        MapSpec {
            center,
            zoom: 13,
            tiles: TileLayer::default(),
            pinned: None,
            show_bins: true,
        },
    );

    catalog.charts.insert(
        "wasteChart".to_string(),
        ChartSpec::new(
            ChartKind::Line,
            ChartData {
                labels: ["Mon", "Tue", "Wed"].map(String::from).to_vec(),
                datasets: vec![Dataset {
                    label: Some("Waste (kg)".to_string()),
                    data: vec![3.2, 2.8, 4.1],
                    border_color: Some("#2E8B57".to_string()),
                    background_colors: vec!["rgba(46, 139, 87, 0.1)".to_string()],
                    tension: Some(0.4),
                    fill: true,
                }],
            },
            ChartOptions::default(),
        ),
    );
    catalog.charts.insert(
        "breakdownChart".to_string(),
        ChartSpec::new(
            ChartKind::Doughnut,
            ChartData {
                labels: ["Organic", "Plastic"].map(String::from).to_vec(),
                datasets: vec![Dataset {
                    label: None,
                    data: vec![40.0, 25.0],
                    border_color: None,
                    background_colors: vec!["#2E8B57".to_string(), "#20B2AA".to_string()],
                    tension: None,
                    fill: false,
                }],
            },
            ChartOptions::default(),
        ),
    );

    catalog
}
