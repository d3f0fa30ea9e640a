// Navigation layout domain models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Map,
    Chart,
}

/// A widget a section or panel needs once it becomes visible
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct WidgetAction {
    pub kind: WidgetKind,
    pub container: String,
}

impl WidgetAction {
    pub fn map(container: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::Map,
            container: container.into(),
        }
    }

    pub fn chart(container: impl Into<String>) -> Self {
        Self {
            kind: WidgetKind::Chart,
            container: container.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetState {
    Unbuilt,
    Built,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub widgets: Vec<WidgetAction>,
}

#[derive(Debug, Clone)]
pub struct DashboardPanel {
    pub id: String,
    pub widgets: Vec<WidgetAction>,
}

/// Sidebar-switched panels belonging to one section
#[derive(Debug, Clone)]
pub struct DashboardGroup {
    pub id: String,
    pub section: String,
    pub panels: Vec<DashboardPanel>,
}

impl DashboardGroup {
    pub fn panel(&self, panel_id: &str) -> Option<&DashboardPanel> {
        self.panels.iter().find(|p| p.id == panel_id)
    }
}

/// Static page structure the controller is built from
#[derive(Debug, Clone)]
pub struct Layout {
    pub sections: Vec<Section>,
    pub initial_section: String,
    pub dashboards: Vec<DashboardGroup>,
    /// Initially active panel per dashboard id
    pub initial_panels: Vec<(String, String)>,
}
