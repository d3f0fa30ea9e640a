// Application state for HTTP handlers
use crate::application::bin_board::BinBoard;
use crate::application::form_service::FormService;
use crate::application::notification_service::NotificationCenter;
use crate::application::panel_controller::PanelController;
use crate::infrastructure::display_feed::DisplayFeed;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<PanelController>,
    pub bins: Arc<BinBoard>,
    pub notifications: Arc<NotificationCenter>,
    pub forms: FormService,
    pub feed: DisplayFeed,
}
