// Domain layer - Samples, bounded series and dashboard controls
pub mod controls;
pub mod dashboard;
pub mod error;
pub mod sample;
pub mod series;
