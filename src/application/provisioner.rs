// Widget provisioner - Lazily builds maps and charts, at most once per container
use crate::application::bin_source::BinSource;
use crate::application::error::ShellError;
use crate::application::widget_backend::{ChartBackend, MapBackend};
use crate::application::widget_registry::{BuiltWidget, WidgetRegistry, WidgetView};
use crate::domain::bin::BinRecord;
use crate::domain::chart::ChartSpec;
use crate::domain::layout::{WidgetAction, WidgetKind};
use crate::domain::map::{MapSpec, MarkerIcon};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Declared widgets, keyed by container id
#[derive(Debug, Clone, Default)]
pub struct WidgetCatalog {
    pub maps: HashMap<String, MapSpec>,
    pub charts: HashMap<String, ChartSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Built,
    AlreadyBuilt,
}

pub struct WidgetProvisioner {
    registry: Mutex<WidgetRegistry>,
    catalog: WidgetCatalog,
    maps: Option<Arc<dyn MapBackend>>,
    charts: Option<Arc<dyn ChartBackend>>,
}

impl WidgetProvisioner {
    pub fn new(
        catalog: WidgetCatalog,
        maps: Option<Arc<dyn MapBackend>>,
        charts: Option<Arc<dyn ChartBackend>>,
    ) -> Self {
        let mut registry = WidgetRegistry::new();
        for container in catalog.maps.keys() {
            registry.register(container, WidgetKind::Map);
        }
        for container in catalog.charts.keys() {
            registry.register(container, WidgetKind::Chart);
        }

        Self {
            registry: Mutex::new(registry),
            catalog,
            maps,
            charts,
        }
    }

    pub fn is_built(&self, container: &str) -> bool {
        self.registry.lock().is_built(container)
    }

    pub fn chart_spec(&self, container: &str) -> Option<&ChartSpec> {
        self.catalog.charts.get(container)
    }

    pub fn map_spec(&self, container: &str) -> Option<&MapSpec> {
        self.catalog.maps.get(container)
    }

    /// Build the map for `container` with one marker per bin. No-op once built.
    pub fn provision_map(
        &self,
        container: &str,
        bins: &[BinRecord],
    ) -> Result<Provisioned, ShellError> {
        let spec = self
            .catalog
            .maps
            .get(container)
            .ok_or_else(|| ShellError::UnknownContainer {
                kind: WidgetKind::Map,
                container: container.to_string(),
            })?;

        let mut registry = self.registry.lock();
        if registry.is_built(container) {
            return Ok(Provisioned::AlreadyBuilt);
        }
        let backend = self
            .maps
            .as_ref()
            .ok_or(ShellError::CollaboratorUnavailable(WidgetKind::Map))?;

        let map = backend.create_map(container, spec.center, spec.zoom);
        backend.add_tile_layer(map, &spec.tiles.url_template, &spec.tiles.attribution);

        if let Some(pinned) = &spec.pinned {
            let marker = backend.add_marker(map, pinned.coord, &MarkerIcon::Default);
            backend.bind_popup(marker, &pinned.popup_html, pinned.open_popup);
        }

        for bin in bins {
            let icon = MarkerIcon::pin(bin.status().marker_color());
            let marker = backend.add_marker(map, bin.coord, &icon);
            backend.bind_popup(marker, &bin.popup_html(), false);
        }

        registry.mark_built(container, BuiltWidget::Map(map));
        tracing::info!(container, markers = bins.len(), "map provisioned");
        Ok(Provisioned::Built)
    }

    /// Build the chart for `container`. No-op once built.
    pub fn provision_chart(
        &self,
        container: &str,
        spec: &ChartSpec,
    ) -> Result<Provisioned, ShellError> {
        let mut registry = self.registry.lock();
        if registry.is_built(container) {
            return Ok(Provisioned::AlreadyBuilt);
        }
        let backend = self
            .charts
            .as_ref()
            .ok_or(ShellError::CollaboratorUnavailable(WidgetKind::Chart))?;

        let chart = backend.create_chart(container, spec.kind, &spec.data, &spec.options);
        registry.mark_built(container, BuiltWidget::Chart(chart));
        tracing::info!(container, kind = ?spec.kind, "chart provisioned");
        Ok(Provisioned::Built)
    }

    /// Provision every action in order, logging and skipping the ones that fail
    pub async fn reinitialize(&self, actions: &[WidgetAction], source: &dyn BinSource) {
        for action in actions {
            let result = match action.kind {
                WidgetKind::Map => {
                    if self.is_built(&action.container) {
                        continue;
                    }
                    let show_bins = self
                        .map_spec(&action.container)
                        .map(|spec| spec.show_bins)
                        .unwrap_or(false);
                    let bins = if show_bins {
                        source.bin_locations().await.unwrap_or_else(|e| {
                            tracing::warn!(container = %action.container, "bin locations unavailable: {}", e);
                            Vec::new()
                        })
                    } else {
                        Vec::new()
                    };
                    self.provision_map(&action.container, &bins)
                }
                WidgetKind::Chart => match self.chart_spec(&action.container) {
                    Some(spec) => self.provision_chart(&action.container, spec),
                    None => Err(ShellError::UnknownContainer {
                        kind: WidgetKind::Chart,
                        container: action.container.clone(),
                    }),
                },
            };

            if let Err(e) = result {
                tracing::warn!(container = %action.container, "skipping widget: {}", e);
            }
        }
    }

    /// Invalidate the size of every built map; returns how many were touched
    pub fn resize_all(&self) -> usize {
        let Some(backend) = self.maps.as_ref() else {
            return 0;
        };
        let maps = self.registry.lock().built_maps();
        for map in &maps {
            backend.invalidate_size(*map);
        }
        tracing::debug!(maps = maps.len(), "resized maps");
        maps.len()
    }

    pub fn widgets(&self) -> Vec<WidgetView> {
        self.registry.lock().views()
    }

    pub fn clear(&self) {
        self.registry.lock().clear();
    }
}
