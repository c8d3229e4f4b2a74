// Infrastructure layer - Adapters for config, randomness, time and HTTP encoding
pub mod clock;
pub mod config;
pub mod event_stream;
pub mod http_response;
pub mod random_source;
