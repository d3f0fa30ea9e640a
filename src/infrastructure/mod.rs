// Infrastructure layer - Configuration, backends and streaming adapters
pub mod config;
pub mod display_feed;
pub mod logging_backend;
pub mod ndjson_stream;
