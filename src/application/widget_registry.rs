// Widget registry - Which containers already hold a constructed widget
use crate::application::widget_backend::{ChartHandle, MapHandle};
use crate::domain::layout::{WidgetKind, WidgetState};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltWidget {
    Map(MapHandle),
    Chart(ChartHandle),
}

#[derive(Debug, Clone)]
struct WidgetHandle {
    kind: WidgetKind,
    built: Option<BuiltWidget>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WidgetView {
    pub container: String,
    pub kind: WidgetKind,
    pub state: WidgetState,
}

/// Keyed by container id. Entries only move Unbuilt -> Built until `clear`.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    handles: BTreeMap<String, WidgetHandle>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a container at startup; existing entries are left untouched
    pub fn register(&mut self, container: &str, kind: WidgetKind) {
        self.handles
            .entry(container.to_string())
            .or_insert(WidgetHandle { kind, built: None });
    }

    pub fn state(&self, container: &str) -> WidgetState {
        match self.handles.get(container).and_then(|h| h.built) {
            Some(_) => WidgetState::Built,
            None => WidgetState::Unbuilt,
        }
    }

    pub fn is_built(&self, container: &str) -> bool {
        self.state(container) == WidgetState::Built
    }

    /// Returns false when the container was already built; the first handle wins.
    pub fn mark_built(&mut self, container: &str, widget: BuiltWidget) -> bool {
        let kind = match widget {
            BuiltWidget::Map(_) => WidgetKind::Map,
            BuiltWidget::Chart(_) => WidgetKind::Chart,
        };
        let handle = self
            .handles
            .entry(container.to_string())
            .or_insert(WidgetHandle { kind, built: None });

        if handle.built.is_some() {
            return false;
        }
        handle.built = Some(widget);
        true
    }

    pub fn built_maps(&self) -> Vec<MapHandle> {
        self.handles
            .values()
            .filter_map(|h| match h.built {
                Some(BuiltWidget::Map(map)) => Some(map),
                _ => None,
            })
            .collect()
    }

    pub fn views(&self) -> Vec<WidgetView> {
        self.handles
            .iter()
            .map(|(container, h)| WidgetView {
                container: container.clone(),
                kind: h.kind,
                state: if h.built.is_some() {
                    WidgetState::Built
                } else {
                    WidgetState::Unbuilt
                },
            })
            .collect()
    }

    /// Teardown only: every entry returns to Unbuilt
    pub fn clear(&mut self) {
        for handle in self.handles.values_mut() {
            handle.built = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_build_wins() {
        let mut registry = WidgetRegistry::new();
        registry.register("household-map", WidgetKind::Map);
        assert_eq!(registry.state("household-map"), WidgetState::Unbuilt);

        assert!(registry.mark_built("household-map", BuiltWidget::Map(MapHandle(1))));
        assert!(!registry.mark_built("household-map", BuiltWidget::Map(MapHandle(2))));

        assert_eq!(registry.built_maps(), vec![MapHandle(1)]);
    }

    #[test]
    fn test_register_keeps_built_entries() {
        let mut registry = WidgetRegistry::new();
        registry.mark_built("wasteChart", BuiltWidget::Chart(ChartHandle(7)));
        registry.register("wasteChart", WidgetKind::Chart);
        assert!(registry.is_built("wasteChart"));
        assert!(registry.built_maps().is_empty());
    }

    #[test]
    fn test_clear_resets_to_unbuilt() {
        let mut registry = WidgetRegistry::new();
        registry.register("aggregator-map-view", WidgetKind::Map);
        registry.mark_built("aggregator-map-view", BuiltWidget::Map(MapHandle(3)));
        registry.clear();

        let views = registry.views();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].state, WidgetState::Unbuilt);
    }
}
