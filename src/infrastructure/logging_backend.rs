// Headless widget backends - Log every map and chart call instead of drawing
use crate::application::widget_backend::{
    ChartBackend, ChartHandle, MapBackend, MapHandle, MarkerHandle,
};
use crate::domain::bin::Coordinate;
use crate::domain::chart::{ChartData, ChartKind, ChartOptions};
use crate::domain::map::MarkerIcon;
use std::sync::atomic::{AtomicU64, Ordering};

/// Handles are unique across every map, marker and chart the process creates
#[derive(Debug, Default)]
pub struct HandleSequence(AtomicU64);

impl HandleSequence {
    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[derive(Debug, Default)]
pub struct LoggingMapBackend {
    handles: HandleSequence,
}

impl MapBackend for LoggingMapBackend {
    fn create_map(&self, container: &str, center: Coordinate, zoom: u8) -> MapHandle {
        let handle = MapHandle(self.handles.next());
        tracing::debug!(container, lat = center.lat, lng = center.lng, zoom, map = handle.0, "create map");
        handle
    }

    fn add_tile_layer(&self, map: MapHandle, url_template: &str, attribution: &str) {
        tracing::debug!(map = map.0, url_template, attribution, "add tile layer");
    }

    fn add_marker(&self, map: MapHandle, coord: Coordinate, icon: &MarkerIcon) -> MarkerHandle {
        let handle = MarkerHandle(self.handles.next());
        tracing::debug!(
            map = map.0,
            marker = handle.0,
            lat = coord.lat,
            lng = coord.lng,
            class = %icon.class_name(),
            "add marker"
        );
        handle
    }

    fn bind_popup(&self, marker: MarkerHandle, html: &str, open: bool) {
        tracing::debug!(marker = marker.0, html, open, "bind popup");
    }

    fn invalidate_size(&self, map: MapHandle) {
        tracing::trace!(map = map.0, "invalidate size");
    }
}

#[derive(Debug, Default)]
pub struct LoggingChartBackend {
    handles: HandleSequence,
}

impl ChartBackend for LoggingChartBackend {
    fn create_chart(
        &self,
        container: &str,
        kind: ChartKind,
        data: &ChartData,
        options: &ChartOptions,
    ) -> ChartHandle {
        let handle = ChartHandle(self.handles.next());
        tracing::debug!(
            container,
            ?kind,
            labels = data.labels.len(),
            datasets = data.datasets.len(),
            legend = ?options.legend,
            chart = handle.0,
            "create chart"
        );
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_distinct() {
        let backend = LoggingMapBackend::default();
        let map = backend.create_map("household-map", Coordinate::new(40.7, -74.0), 15);
        let marker = backend.add_marker(map, Coordinate::new(40.7, -74.0), &MarkerIcon::Default);
        assert_ne!(map.0, marker.0);
        assert_eq!(map, MapHandle(1));
    }
}
