//! # Validation Module
//!
//! Input validation for new line items and work-order settings.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  └── Empty name check, numeric inputs                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── WorkItem::new / PartItem::new / PrintConfig::validate             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── status whitelist, required ids                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation only gates *new* input. Orders that already carry zero or
//! negative quantities are still totalled as-is by [`crate::totals`].
//!
//! ## Usage
//! ```rust
//! use smartline_core::validation::{validate_item_name, validate_part_quantity};
//!
//! assert!(validate_item_name("Замена масла").is_ok());
//! assert!(validate_part_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_NAME_LEN, MAX_NUMBER_PREFIX_LEN, MAX_PART_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a line-item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most MAX_ITEM_NAME_LEN characters (counted as chars, not bytes:
///   Cyrillic is two bytes per letter)
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates the work-order number prefix ("ЗН-").
///
/// ## Rules
/// - May be empty (bare numbers)
/// - At most MAX_NUMBER_PREFIX_LEN characters
/// - No whitespace
///
/// ## Example
/// ```rust
/// use smartline_core::validation::validate_number_prefix;
///
/// assert!(validate_number_prefix("ЗН-").is_ok());
/// assert!(validate_number_prefix("").is_ok());
/// assert!(validate_number_prefix("ЗН ").is_err());
/// ```
pub fn validate_number_prefix(prefix: &str) -> ValidationResult<()> {
    if prefix.chars().count() > MAX_NUMBER_PREFIX_LEN {
        return Err(ValidationError::TooLong {
            field: "number_prefix".to_string(),
            max: MAX_NUMBER_PREFIX_LEN,
        });
    }

    if prefix.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "number_prefix".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a part quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_PART_QUANTITY
pub fn validate_part_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "qty".to_string(),
        });
    }

    if qty > MAX_PART_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "qty".to_string(),
            min: 1,
            max: MAX_PART_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (warranty work, free materials).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a payment amount: must be positive.
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}
