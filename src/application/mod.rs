// Application layer - Use cases and the periodic tick task
pub mod dashboard_service;
pub mod sample_source;
pub mod ticker;
