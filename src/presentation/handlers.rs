// HTTP request handlers
use crate::application::panel_controller::{ShellSnapshot, Transition};
use crate::domain::bin::BinRecord;
use crate::domain::notification::Toast;
use crate::infrastructure::ndjson_stream::stream_from_broadcast;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub transition: Transition,
    pub state: ShellSnapshot,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavMenuResponse {
    pub nav_menu_open: bool,
}

#[derive(Deserialize)]
pub struct FieldChange {
    pub name: String,
    pub value: serde_json::Value,
}

#[derive(Deserialize)]
pub struct CartRequest {
    pub item: Option<String>,
}

#[derive(Deserialize)]
pub struct RewardRequest {
    pub name: Option<String>,
    pub cost: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<ShellSnapshot> {
    Json(state.controller.snapshot())
}

/// Switch the top-level section. Unknown ids leave the state untouched.
pub async fn activate_section(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<NavigationResponse> {
    let transition = state.controller.activate_section(&id);
    Json(NavigationResponse {
        transition,
        state: state.controller.snapshot(),
    })
}

/// Switch the sidebar panel of one dashboard
pub async fn activate_panel(
    Path((dashboard, panel)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Json<NavigationResponse> {
    let transition = state.controller.activate_panel(&dashboard, &panel);
    Json(NavigationResponse {
        transition,
        state: state.controller.snapshot(),
    })
}

pub async fn toggle_nav_menu(State(state): State<Arc<AppState>>) -> Json<NavMenuResponse> {
    Json(NavMenuResponse {
        nav_menu_open: state.controller.toggle_nav_menu(),
    })
}

pub async fn window_resized(State(state): State<Arc<AppState>>) -> StatusCode {
    state.controller.window_resized();
    StatusCode::ACCEPTED
}

/// Bin monitoring table, optionally filtered by a search term
pub async fn list_bins(
    Query(query): Query<SearchQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<BinRecord>> {
    let bins = match query.q.as_deref() {
        Some(term) => state.bins.search(term),
        None => state.bins.snapshot(),
    };
    Json(bins)
}

/// Live fill-level updates as newline-delimited JSON
pub async fn stream_bins(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    stream_from_broadcast(state.feed.subscribe())
}

pub async fn list_notifications(State(state): State<Arc<AppState>>) -> Json<Vec<Toast>> {
    Json(state.notifications.list())
}

pub async fn dismiss_notification(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    if state.notifications.dismiss(id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn settings_changed(
    State(state): State<Arc<AppState>>,
    Json(change): Json<FieldChange>,
) -> StatusCode {
    state.forms.settings_changed(&change.name, &value_text(&change.value));
    StatusCode::NO_CONTENT
}

pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CartRequest>,
) -> Json<MessageResponse> {
    let message = state.forms.add_to_cart(request.item.as_deref());
    Json(MessageResponse { message })
}

pub async fn redeem_reward(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RewardRequest>,
) -> Json<MessageResponse> {
    let message = state
        .forms
        .redeem_reward(request.name.as_deref(), request.cost.as_deref());
    Json(MessageResponse { message })
}

pub async fn marketplace_filter_changed(
    State(state): State<Arc<AppState>>,
    Json(change): Json<FieldChange>,
) -> StatusCode {
    state
        .forms
        .marketplace_filter_changed(&change.name, &value_text(&change.value));
    StatusCode::NO_CONTENT
}

/// Checkbox and select values arrive as JSON scalars; strings are logged without quotes
fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
