// Presentation layer - HTTP surface driven by the browser client
pub mod app_state;
pub mod handlers;
