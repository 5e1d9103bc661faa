//! # Print Errors
//!
//! Everything that can go wrong between reading a work order and writing
//! the document. The core's `CoreError` is wrapped, never flattened to a
//! string.

use std::path::PathBuf;

use smartline_core::{CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrintError {
    /// Config file or environment could not be read or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Config values were read but are not acceptable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload held a list of work orders but none had the wanted id.
    #[error("Work order {0} not found")]
    WorkOrderNotFound(i64),

    /// A list payload was given without saying which order to print.
    #[error("Payload contains {0} work orders; pass --id to pick one")]
    AmbiguousWorkOrder(usize),

    /// A recorded payment failed validation.
    #[error("Payment {id}: {source}")]
    InvalidPayment {
        id: i64,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Document formatting failed")]
    Format(#[from] std::fmt::Error),
}

pub type PrintResult<T> = Result<T, PrintError>;
