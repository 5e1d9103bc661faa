//! # Error Types
//!
//! Messages are in Russian: they reach the shop staff verbatim.
//!
//! ```text
//! ValidationError ──► CoreError ──► PrintError (apps/print) ──► exit status
//! ```
//!
//! The totals calculator never returns these; it is total over its input.

use thiserror::Error;

/// Failures of the core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Amount-in-words was asked to spell a negative sum.
    ///
    /// Documents never bill negative totals, so this is a caller bug
    /// rather than something to clamp.
    #[error("Нельзя записать прописью отрицательную сумму ({kopecks} коп.)")]
    NegativeAmount { kopecks: i64 },

    #[error("Неизвестный статус заказ-наряда «{0}»")]
    InvalidStatus(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rejected user input, keyed by the offending field.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: обязательное поле")]
    Required { field: String },

    #[error("{field}: не длиннее {max} символов")]
    TooLong { field: String, max: usize },

    #[error("{field}: значение от {min} до {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field}: должно быть больше нуля")]
    MustBePositive { field: String },

    /// Malformed value, e.g. whitespace in a number prefix.
    #[error("{field}: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("{field}: допустимо {}", .allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },
}

pub type CoreResult<T> = Result<T, CoreError>;
