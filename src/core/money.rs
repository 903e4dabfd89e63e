//! Fixed-point amount helpers.
//!
//! All currency in the engine is `rust_decimal::Decimal`, two decimal places.
//! Floating point is never used for balances; the source app's sign and
//! rounding drift came from exactly that.

use rust_decimal::Decimal;

use crate::core::errors::{FieldError, StokvelError};

/// Upper bound on a single ledger amount.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Validates a contribution or payout magnitude: strictly positive, at most
/// two decimal places, capped at [`MAX_AMOUNT`].
pub fn validate_amount(field: &str, amount: Decimal) -> Result<(), StokvelError> {
    if amount <= Decimal::ZERO {
        return Err(StokvelError::InvalidAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(StokvelError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: "Amount Too Large".to_string(),
                description: format!("Amount cannot exceed {}", MAX_AMOUNT),
            },
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(StokvelError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: "Invalid Amount".to_string(),
                description: "Amount cannot have more than 2 decimal places".to_string(),
            },
        ));
    }
    Ok(())
}

/// The fixed-formula payout due to the current recipient: the per-member
/// contribution times the active member count.
pub fn required_payout(contribution_amount: Decimal, members_count: usize) -> Decimal {
    contribution_amount * Decimal::from(members_count as u64)
}

/// Rand display formatting, two decimal places.
pub fn fmt_zar(amount: Decimal) -> String {
    format!("R {:.2}", amount)
}
