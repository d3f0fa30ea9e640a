// Panel controller - Section and dashboard-panel navigation state machine
use crate::application::bin_source::BinSource;
use crate::application::error::ShellError;
use crate::application::provisioner::WidgetProvisioner;
use crate::application::settle_scheduler::SettleScheduler;
use crate::application::widget_registry::WidgetView;
use crate::domain::layout::{DashboardGroup, Layout, Section, WidgetAction};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const SECTION_SCOPE: &str = "section";
const PANEL_SCOPE_PREFIX: &str = "panel:";
const RESIZE_SCOPE: &str = "resize";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Transition {
    Activated,
    AlreadyActive,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ControllerTiming {
    /// Wait before (re)building widgets so containers have their final size
    pub settle_delay: Duration,
    pub resize_delay: Duration,
}

impl Default for ControllerTiming {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            resize_delay: Duration::from_millis(200),
        }
    }
}

#[derive(Debug)]
struct NavState {
    sections: Vec<Section>,
    active_section: String,
    dashboards: Vec<DashboardGroup>,
    active_panels: HashMap<String, String>,
    nav_menu_open: bool,
}

impl NavState {
    fn from_layout(layout: Layout) -> Result<Self, ShellError> {
        if !layout.sections.iter().any(|s| s.id == layout.initial_section) {
            return Err(ShellError::UnknownSection(layout.initial_section));
        }

        let mut active_panels = HashMap::new();
        for dashboard in &layout.dashboards {
            if !layout.sections.iter().any(|s| s.id == dashboard.section) {
                return Err(ShellError::UnknownSection(dashboard.section.clone()));
            }
            let declared = layout
                .initial_panels
                .iter()
                .find(|(d, _)| *d == dashboard.id)
                .map(|(_, p)| p.clone());

            let initial = match declared {
                Some(panel) if dashboard.panel(&panel).is_some() => Some(panel),
                Some(panel) => {
                    return Err(ShellError::UnknownPanel {
                        dashboard: dashboard.id.clone(),
                        panel,
                    });
                }
                None => dashboard.panels.first().map(|p| p.id.clone()),
            };
            if let Some(panel) = initial {
                active_panels.insert(dashboard.id.clone(), panel);
            }
        }

        Ok(Self {
            sections: layout.sections,
            active_section: layout.initial_section,
            dashboards: layout.dashboards,
            active_panels,
            nav_menu_open: false,
        })
    }

    fn section(&self, id: &str) -> Result<&Section, ShellError> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ShellError::UnknownSection(id.to_string()))
    }

    fn dashboard(&self, id: &str) -> Result<&DashboardGroup, ShellError> {
        self.dashboards
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ShellError::UnknownDashboard(id.to_string()))
    }

    /// Widgets on screen right now: the active section's own plus its active panels'
    fn visible_widgets(&self) -> Vec<WidgetAction> {
        let mut actions = self
            .section(&self.active_section)
            .map(|s| s.widgets.clone())
            .unwrap_or_default();

        for dashboard in self.dashboards.iter().filter(|d| d.section == self.active_section) {
            let panel = self
                .active_panels
                .get(&dashboard.id)
                .and_then(|p| dashboard.panel(p));
            if let Some(panel) = panel {
                actions.extend(panel.widgets.iter().cloned());
            }
        }
        actions
    }

    /// The panel's widgets, or None once the panel is no longer on screen
    fn panel_widgets_if_visible(&self, dashboard_id: &str, panel_id: &str) -> Option<Vec<WidgetAction>> {
        let dashboard = self.dashboard(dashboard_id).ok()?;
        if dashboard.section != self.active_section {
            return None;
        }
        if self.active_panels.get(dashboard_id).map(String::as_str) != Some(panel_id) {
            return None;
        }
        dashboard.panel(panel_id).map(|p| p.widgets.clone())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelView {
    pub id: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub id: String,
    pub section: String,
    pub panels: Vec<PanelView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub id: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellSnapshot {
    pub active_section: String,
    pub nav_menu_open: bool,
    pub sections: Vec<SectionView>,
    pub dashboards: Vec<DashboardView>,
    pub widgets: Vec<WidgetView>,
}

pub struct PanelController {
    state: Arc<Mutex<NavState>>,
    provisioner: Arc<WidgetProvisioner>,
    bins: Arc<dyn BinSource>,
    scheduler: Arc<SettleScheduler>,
    timing: ControllerTiming,
}

impl PanelController {
    pub fn new(
        layout: Layout,
        provisioner: Arc<WidgetProvisioner>,
        bins: Arc<dyn BinSource>,
        scheduler: Arc<SettleScheduler>,
        timing: ControllerTiming,
    ) -> Result<Self, ShellError> {
        Ok(Self {
            state: Arc::new(Mutex::new(NavState::from_layout(layout)?)),
            provisioner,
            bins,
            scheduler,
            timing,
        })
    }

    /// Build whatever the initial screen shows, after the usual settle delay
    pub fn start(&self) {
        self.schedule_section_reinit();
    }

    pub fn activate_section(&self, id: &str) -> Transition {
        let transition = {
            let mut state = self.state.lock();
            if let Err(e) = state.section(id) {
                tracing::warn!("ignoring section activation: {}", e);
                return Transition::Ignored;
            }

            state.nav_menu_open = false;
            if state.active_section == id {
                Transition::AlreadyActive
            } else {
                tracing::info!(from = %state.active_section, to = id, "section activated");
                state.active_section = id.to_string();
                Transition::Activated
            }
        };

        // Panel reinits belong to the section that was just left or are covered below
        self.scheduler.cancel_prefix(PANEL_SCOPE_PREFIX);
        self.schedule_section_reinit();
        transition
    }

    pub fn activate_panel(&self, dashboard_id: &str, panel_id: &str) -> Transition {
        let transition = {
            let mut state = self.state.lock();
            let resolved = state.dashboard(dashboard_id).and_then(|dashboard| {
                dashboard
                    .panel(panel_id)
                    .map(|_| ())
                    .ok_or_else(|| ShellError::UnknownPanel {
                        dashboard: dashboard_id.to_string(),
                        panel: panel_id.to_string(),
                    })
            });
            if let Err(e) = resolved {
                tracing::warn!("ignoring panel activation: {}", e);
                return Transition::Ignored;
            }

            let previous = state
                .active_panels
                .insert(dashboard_id.to_string(), panel_id.to_string());
            if previous.as_deref() == Some(panel_id) {
                Transition::AlreadyActive
            } else {
                tracing::info!(dashboard = dashboard_id, from = ?previous, to = panel_id, "panel activated");
                Transition::Activated
            }
        };

        self.schedule_panel_reinit(dashboard_id, panel_id);
        transition
    }

    pub fn toggle_nav_menu(&self) -> bool {
        let mut state = self.state.lock();
        state.nav_menu_open = !state.nav_menu_open;
        state.nav_menu_open
    }

    /// Debounced window-resize handling
    pub fn window_resized(&self) {
        let provisioner = self.provisioner.clone();
        self.scheduler
            .schedule(RESIZE_SCOPE, self.timing.resize_delay, async move {
                provisioner.resize_all();
            });
    }

    pub fn active_section(&self) -> String {
        self.state.lock().active_section.clone()
    }

    pub fn active_panel(&self, dashboard_id: &str) -> Option<String> {
        self.state.lock().active_panels.get(dashboard_id).cloned()
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        let state = self.state.lock();
        ShellSnapshot {
            active_section: state.active_section.clone(),
            nav_menu_open: state.nav_menu_open,
            sections: state
                .sections
                .iter()
                .map(|s| SectionView {
                    id: s.id.clone(),
                    active: s.id == state.active_section,
                })
                .collect(),
            dashboards: state
                .dashboards
                .iter()
                .map(|d| {
                    let active = state.active_panels.get(&d.id);
                    DashboardView {
                        id: d.id.clone(),
                        section: d.section.clone(),
                        panels: d
                            .panels
                            .iter()
                            .map(|p| PanelView {
                                id: p.id.clone(),
                                active: active == Some(&p.id),
                            })
                            .collect(),
                    }
                })
                .collect(),
            widgets: self.provisioner.widgets(),
        }
    }

    /// Cancel every pending callback and forget built widgets
    pub fn teardown(&self) {
        self.scheduler.cancel_all();
        self.provisioner.clear();
        tracing::info!("shell torn down");
    }

    fn schedule_section_reinit(&self) {
        let state = self.state.clone();
        let provisioner = self.provisioner.clone();
        let bins = self.bins.clone();

        self.scheduler
            .schedule(SECTION_SCOPE, self.timing.settle_delay, async move {
                let actions = state.lock().visible_widgets();
                provisioner.reinitialize(&actions, bins.as_ref()).await;
                provisioner.resize_all();
            });
    }

    fn schedule_panel_reinit(&self, dashboard_id: &str, panel_id: &str) {
        let state = self.state.clone();
        let provisioner = self.provisioner.clone();
        let bins = self.bins.clone();
        let dashboard_id = dashboard_id.to_string();
        let panel_id = panel_id.to_string();
        let scope = format!("{PANEL_SCOPE_PREFIX}{dashboard_id}");

        self.scheduler
            .schedule(scope, self.timing.settle_delay, async move {
                let actions = state.lock().panel_widgets_if_visible(&dashboard_id, &panel_id);
                let Some(actions) = actions else {
                    tracing::debug!(dashboard = %dashboard_id, panel = %panel_id, "panel hidden before settle, skipping");
                    return;
                };
                provisioner.reinitialize(&actions, bins.as_ref()).await;
                provisioner.resize_all();
            });
    }
}
