// Dashboard errors
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("frequency must be an integer between 1 and 5 (got {0:?})")]
    InvalidFrequency(String),

    #[error("incorrect password")]
    WrongPassword,

    #[error("dashboard is locked")]
    Locked,

    #[error("series capacity must be at least 1")]
    InvalidCapacity,
}
