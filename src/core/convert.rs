//! Pivot-currency conversion arithmetic

use crate::core::rates::RateTable;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Enter a valid amount of money (a positive number)")]
    InvalidAmount,
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

/// Outcome of a single conversion: the converted amount and the
/// effective `from -> to` rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub converted: f64,
    pub rate: f64,
}

/// Converts `amount` from one currency to another, pivoting through
/// the table's base currency when neither side is the base.
pub fn convert(
    amount: f64,
    from: &str,
    to: &str,
    table: &RateTable,
) -> Result<Conversion, ConvertError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ConvertError::InvalidAmount);
    }

    if from == to {
        return Ok(Conversion {
            converted: amount,
            rate: 1.0,
        });
    }

    let from_rate = table
        .get(from)
        .ok_or_else(|| ConvertError::UnknownCurrency(from.to_string()))?;
    let to_rate = table
        .get(to)
        .ok_or_else(|| ConvertError::UnknownCurrency(to.to_string()))?;

    let converted = if from == table.base() {
        amount * to_rate
    } else if to == table.base() {
        amount / from_rate
    } else {
        (amount / from_rate) * to_rate
    };

    Ok(Conversion {
        converted,
        rate: to_rate / from_rate,
    })
}
