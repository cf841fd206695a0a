use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the domain, service, and config layers.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Category `{0}` already exists")]
    CategoryExists(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Invalid amount: {0} (must be greater than 0)")]
    InvalidAmount(f64),
    #[error("Insufficient funds in `{category}`: requested {requested:.2}, available {available:.2}")]
    InsufficientFunds {
        category: String,
        requested: f64,
        available: f64,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}
