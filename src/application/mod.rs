// Application layer - Navigation, provisioning and simulation use cases
pub mod bin_board;
pub mod bin_source;
pub mod error;
pub mod form_service;
pub mod live_update;
pub mod notification_service;
pub mod panel_controller;
pub mod provisioner;
pub mod settle_scheduler;
pub mod widget_backend;
pub mod widget_registry;

#[cfg(test)]
pub mod test_support;
