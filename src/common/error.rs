// src/common/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Schedule table load failed: {0}")]
    ScheduleLoad(String),

    #[error("Storage error")]
    StorageError,

    #[error("Time service error")]
    TimeError,

    #[error("Display update failed")]
    DisplayError,

    #[error("Invalid operator command: {0}")]
    InvalidCommand(String),

    #[error("Operator input unavailable")]
    InputError,

    #[error("Task spawn failed")]
    TaskSpawnError,
}

pub type Result<T> = core::result::Result<T, AppError>;
