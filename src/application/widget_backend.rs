// Backend traits for the map and chart libraries the shell drives
use crate::domain::bin::Coordinate;
use crate::domain::chart::{ChartData, ChartKind, ChartOptions};
use crate::domain::map::MarkerIcon;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MapHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChartHandle(pub u64);

pub trait MapBackend: Send + Sync {
    /// Create a map bound to `container`, centered and zoomed
    fn create_map(&self, container: &str, center: Coordinate, zoom: u8) -> MapHandle;

    fn add_tile_layer(&self, map: MapHandle, url_template: &str, attribution: &str);

    fn add_marker(&self, map: MapHandle, coord: Coordinate, icon: &MarkerIcon) -> MarkerHandle;

    fn bind_popup(&self, marker: MarkerHandle, html: &str, open: bool);

    /// Recompute the map layout after its container changed size
    fn invalidate_size(&self, map: MapHandle);
}

pub trait ChartBackend: Send + Sync {
    fn create_chart(
        &self,
        container: &str,
        kind: ChartKind,
        data: &ChartData,
        options: &ChartOptions,
    ) -> ChartHandle;
}
