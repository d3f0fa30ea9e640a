// Map widget domain models
use super::bin::{Coordinate, MarkerColor};

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// A fixed marker drawn regardless of the bin board, e.g. the household's own bin
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedMarker {
    pub coord: Coordinate,
    pub popup_html: String,
    pub open_popup: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSpec {
    pub center: Coordinate,
    pub zoom: u8,
    pub tiles: TileLayer,
    pub pinned: Option<PinnedMarker>,
    /// Draw one status-coloured marker per bin from the bin source
    pub show_bins: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerIcon {
    Default,
    Pin {
        color: MarkerColor,
        size: (u32, u32),
        anchor: (u32, u32),
    },
}

impl MarkerIcon {
    pub fn pin(color: MarkerColor) -> Self {
        MarkerIcon::Pin {
            color,
            size: (30, 42),
            anchor: (15, 42),
        }
    }

    pub fn class_name(&self) -> String {
        match self {
            MarkerIcon::Default => "leaflet-marker-icon".to_string(),
            MarkerIcon::Pin { color, .. } => format!("bin-marker bin-marker-{}", color.as_str()),
        }
    }
}
