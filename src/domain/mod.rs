// Domain layer - Display models with no external dependencies
pub mod bin;
pub mod chart;
pub mod layout;
pub mod map;
pub mod notification;
