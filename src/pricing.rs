//! Pricing
//!
//! Pure price arithmetic over catalog entries and committed line items.
//! Monetary values are [`Decimal`]s kept at full precision; two-decimal
//! rounding happens only at presentation time via [`display_brl`].

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use thiserror::Error;

use crate::{
    carts::CartLineItem,
    catalog::{Filling, Packaging},
};

/// Minimum number of units per line item (business rule).
pub const MIN_QUANTITY: u32 = 50;

/// Errors that can occur while pricing an item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The requested quantity is below the business minimum.
    #[error("quantity {quantity} is below the minimum of {minimum} units")]
    InvalidQuantity {
        /// Quantity that was requested.
        quantity: u32,
        /// Minimum number of units per line item.
        minimum: u32,
    },
}

/// Calculates the subtotal for one configured item.
///
/// # Errors
///
/// Returns [`PricingError::InvalidQuantity`] when `quantity` is below
/// [`MIN_QUANTITY`].
pub fn subtotal(
    filling: &Filling,
    packaging: &Packaging,
    quantity: u32,
) -> Result<Decimal, PricingError> {
    if quantity < MIN_QUANTITY {
        return Err(PricingError::InvalidQuantity {
            quantity,
            minimum: MIN_QUANTITY,
        });
    }

    Ok((filling.unit_price + packaging.unit_price) * Decimal::from(quantity))
}

/// Calculates the total of a list of line items. Returns zero for an empty
/// list.
#[must_use]
pub fn order_total(items: &[CartLineItem]) -> Decimal {
    items.iter().map(|item| item.subtotal).sum()
}

/// Counts the total number of units across a list of line items.
#[must_use]
pub fn unit_count(items: &[CartLineItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}

/// Formats an amount as Brazilian reais for display.
#[must_use]
pub fn display_brl(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::BRL).to_string()
}
