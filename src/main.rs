// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::bin_board::BinBoard;
use crate::application::form_service::FormService;
use crate::application::live_update::{FillRandom, LiveUpdateLoop, StdFillRandom};
use crate::application::notification_service::NotificationCenter;
use crate::application::panel_controller::PanelController;
use crate::application::provisioner::WidgetProvisioner;
use crate::application::settle_scheduler::SettleScheduler;
use crate::application::widget_backend::{ChartBackend, MapBackend};
use crate::infrastructure::config::{load_layout_config, load_shell_config};
use crate::infrastructure::display_feed::DisplayFeed;
use crate::infrastructure::logging_backend::{LoggingChartBackend, LoggingMapBackend};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    activate_panel, activate_section, add_to_cart, dismiss_notification, get_state, health_check,
    list_bins, list_notifications, marketplace_filter_changed, redeem_reward, settings_changed,
    stream_bins, toggle_nav_menu, window_resized,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let shell_config = load_shell_config()?;
    let layout_config = load_layout_config()?;

    // Widget backends (infrastructure layer)
    let maps: Option<Arc<dyn MapBackend>> = shell_config
        .backends
        .maps
        .then(|| Arc::new(LoggingMapBackend::default()) as Arc<dyn MapBackend>);
    let charts: Option<Arc<dyn ChartBackend>> = shell_config
        .backends
        .charts
        .then(|| Arc::new(LoggingChartBackend::default()) as Arc<dyn ChartBackend>);

    // Shell services (application layer)
    let scheduler = Arc::new(SettleScheduler::new());
    let bins = Arc::new(BinBoard::new(layout_config.bins()));
    let provisioner = Arc::new(WidgetProvisioner::new(layout_config.catalog(), maps, charts));
    let controller = Arc::new(PanelController::new(
        layout_config.layout(),
        provisioner,
        bins.clone(),
        scheduler.clone(),
        shell_config.controller_timing(),
    )?);
    let notifications = Arc::new(NotificationCenter::new(shell_config.toast_ttl()));
    let forms = FormService::new(notifications.clone());
    let feed = DisplayFeed::new();

    controller.start();

    if shell_config.live.enabled {
        let random: Box<dyn FillRandom> = match shell_config.live.seed {
            Some(seed) => Box::new(StdFillRandom::seeded(seed)),
            None => Box::new(StdFillRandom::from_entropy()),
        };
        LiveUpdateLoop::new(
            bins.clone(),
            Arc::new(feed.clone()),
            shell_config.live_settings()?,
            random,
        )
        .start(&scheduler);
    }

    // Create application state
    let state = Arc::new(AppState {
        controller: controller.clone(),
        bins,
        notifications,
        forms,
        feed,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/state", get(get_state))
        .route("/sections/:id/activate", post(activate_section))
        .route("/dashboards/:dashboard/panels/:panel/activate", post(activate_panel))
        .route("/nav/toggle", post(toggle_nav_menu))
        .route("/resize", post(window_resized))
        .route("/bins", get(list_bins))
        .route("/bins/stream", get(stream_bins))
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id", delete(dismiss_notification))
        .route("/settings", post(settings_changed))
        .route("/cart", post(add_to_cart))
        .route("/rewards/redeem", post(redeem_reward))
        .route("/marketplace/filters", post(marketplace_filter_changed))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = shell_config.server.address.parse()?;
    tracing::info!("Starting waste dashboard shell on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    controller.teardown();
    Ok(())
}
