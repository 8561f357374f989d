//! Money and per-currency configuration
//!
//! Amounts are always integer minor units (cents for a 2-decimal currency).
//! Parsing from text is done on the decimal string itself, never through a
//! float, so `"0.29"` is exactly 29 minor units.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DericerError, DericerResult};

/// ISO-style currency code ("USD", "EUR", "IRR", ...)
pub type CurrencyCode = String;

/// Largest integer that every consumer of the stored JSON can represent exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Maximum total digits (integer + fractional) accepted when creating money from text
pub const MAX_AMOUNT_DIGITS: usize = 15;

/// Maximum supported decimal precision
pub const MAX_DECIMALS: u8 = 6;

/// Returns true if `value` fits the safe integer range
pub fn is_safe_integer(value: i64) -> bool {
    (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value)
}

/// An amount of a specific currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub currency: CurrencyCode,
    pub minor_units: i64,
}

/// Display precision and "effectively zero" threshold for one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub currency: CurrencyCode,

    /// Decimal precision (0-6)
    pub decimals: u8,

    /// Threshold below which a balance is considered zero for display.
    /// Stored in minor units, e.g. 1 = 0.01 if decimals = 2.
    pub zero_minor_value: i64,
}

impl CurrencyConfig {
    /// Create a currency config, defaulting to 2 decimals and a zero threshold of 0
    pub fn new(
        currency: impl Into<CurrencyCode>,
        decimals: Option<u8>,
        zero_minor_value: Option<i64>,
    ) -> DericerResult<Self> {
        let config = Self {
            currency: currency.into(),
            decimals: decimals.unwrap_or(2),
            zero_minor_value: zero_minor_value.unwrap_or(0),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate precision and threshold
    pub fn validate(&self) -> DericerResult<()> {
        if self.currency.trim().is_empty() {
            return Err(DericerError::Validation(
                "Currency code cannot be empty".into(),
            ));
        }
        if self.decimals > MAX_DECIMALS {
            return Err(DericerError::Validation(format!(
                "Currency decimals must be between 0 and {}",
                MAX_DECIMALS
            )));
        }
        if self.zero_minor_value < 0 {
            return Err(DericerError::Validation(
                "zero_minor_value cannot be negative".into(),
            ));
        }
        Ok(())
    }

    /// Strictly below the threshold counts as zero; a threshold of 0 never hides anything
    pub fn is_effectively_zero(&self, minor_units: i64) -> bool {
        i128::from(minor_units).abs() < i128::from(self.zero_minor_value)
    }

    /// Format minor units using this currency's precision
    pub fn format(&self, minor_units: i64) -> String {
        format_minor_units(minor_units, self.decimals)
    }
}

impl fmt::Display for CurrencyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} decimals)", self.currency, self.decimals)
    }
}

/// Look up the config for `currency`; a missing config is a validation error
pub fn find_currency_config<'a>(
    configs: &'a [CurrencyConfig],
    currency: &str,
) -> DericerResult<&'a CurrencyConfig> {
    configs
        .iter()
        .find(|c| c.currency == currency)
        .ok_or_else(|| {
            DericerError::Validation(format!(
                "No currency configuration found for currency \"{}\"",
                currency
            ))
        })
}

/// Parse a decimal amount ("12.34", "-0,5", "1000") into minor units
///
/// Accepts `,` as the decimal separator. Digits beyond the currency precision
/// are rounded half away from zero.
pub fn to_minor_units(amount: &str, decimals: u8) -> DericerResult<i64> {
    let invalid = || DericerError::Validation(format!("Invalid amount: \"{}\"", amount));

    if decimals > MAX_DECIMALS {
        return Err(DericerError::Validation(format!(
            "Currency decimals must be between 0 and {}",
            MAX_DECIMALS
        )));
    }

    let normalized = amount.trim().replacen(',', ".", 1);
    let (negative, unsigned) = match normalized.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, normalized.strip_prefix('+').unwrap_or(&normalized)),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (unsigned, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let too_large = || {
        DericerError::Validation(format!(
            "Amount is too large for safe integer representation: \"{}\"",
            amount
        ))
    };

    let whole = whole.trim_start_matches('0');
    if whole.len() > 20 {
        return Err(too_large());
    }

    let scale = 10_i128.pow(u32::from(decimals));
    let whole_value: i128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };

    let precision = usize::from(decimals);
    let kept: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(precision)
        .collect();
    let kept_value: i128 = if kept.is_empty() {
        0
    } else {
        kept.parse().map_err(|_| invalid())?
    };
    let round_up = fraction
        .as_bytes()
        .get(precision)
        .is_some_and(|&b| b >= b'5');

    let mut magnitude = whole_value * scale + kept_value;
    if round_up {
        magnitude += 1;
    }

    if magnitude > i128::from(MAX_SAFE_INTEGER) {
        return Err(too_large());
    }

    let magnitude = magnitude as i64;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Format minor units as a plain decimal string ("-12.34")
pub fn format_minor_units(minor_units: i64, decimals: u8) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    if decimals == 0 {
        return format!("{}{}", sign, abs);
    }
    let scale = 10_u64.pow(u32::from(decimals));
    format!(
        "{}{}.{:0width$}",
        sign,
        abs / scale,
        abs % scale,
        width = usize::from(decimals)
    )
}

/// Parse `amount` into money, enforcing [`MAX_AMOUNT_DIGITS`]
pub fn create_money(
    currency: impl Into<CurrencyCode>,
    amount: &str,
    decimals: u8,
) -> DericerResult<Money> {
    let minor_units = to_minor_units(amount, decimals)?;
    validate_amount_digits(minor_units, decimals)?;
    Ok(Money {
        currency: currency.into(),
        minor_units,
    })
}

fn validate_amount_digits(minor_units: i64, decimals: u8) -> DericerResult<()> {
    let abs = minor_units.unsigned_abs();
    let whole = abs / 10_u64.pow(u32::from(decimals));
    let digits = whole.to_string().len() + usize::from(decimals);
    if digits > MAX_AMOUNT_DIGITS {
        return Err(DericerError::Validation(format!(
            "Amount exceeds maximum allowed {} digits (including decimals)",
            MAX_AMOUNT_DIGITS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_config_defaults() {
        let config = CurrencyConfig::new("USD", None, None).unwrap();
        assert_eq!(config.decimals, 2);
        assert_eq!(config.zero_minor_value, 0);
    }

    #[test]
    fn test_currency_config_rejects_bad_decimals() {
        let err = CurrencyConfig::new("BTC", Some(8), None).unwrap_err();
        assert!(err.is_validation());

        let err = CurrencyConfig::new("USD", Some(2), Some(-1)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_effectively_zero_is_strict() {
        let config = CurrencyConfig::new("EUR", Some(2), Some(100)).unwrap();
        assert!(config.is_effectively_zero(50));
        assert!(config.is_effectively_zero(-99));
        assert!(!config.is_effectively_zero(100));
        assert!(!config.is_effectively_zero(-100));

        let never = CurrencyConfig::new("USD", None, None).unwrap();
        assert!(!never.is_effectively_zero(0));
    }

    #[test]
    fn test_find_currency_config() {
        let configs = vec![CurrencyConfig::new("USD", None, Some(1)).unwrap()];
        assert!(find_currency_config(&configs, "USD").is_ok());
        assert!(find_currency_config(&configs, "EUR")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units("12.34", 2).unwrap(), 1234);
        assert_eq!(to_minor_units("0.29", 2).unwrap(), 29);
        assert_eq!(to_minor_units("-5", 2).unwrap(), -500);
        assert_eq!(to_minor_units("3,5", 2).unwrap(), 350);
        assert_eq!(to_minor_units(".5", 2).unwrap(), 50);
        assert_eq!(to_minor_units("1000", 0).unwrap(), 1000);
    }

    #[test]
    fn test_to_minor_units_rounds_half_away_from_zero() {
        assert_eq!(to_minor_units("1.005", 2).unwrap(), 101);
        assert_eq!(to_minor_units("1.004", 2).unwrap(), 100);
        assert_eq!(to_minor_units("-1.005", 2).unwrap(), -101);
    }

    #[test]
    fn test_to_minor_units_rejects_garbage() {
        assert!(to_minor_units("abc", 2).is_err());
        assert!(to_minor_units("", 2).is_err());
        assert!(to_minor_units("1.2.3", 2).is_err());
        assert!(to_minor_units("99999999999999999999", 2).is_err());
    }

    #[test]
    fn test_format_minor_units() {
        assert_eq!(format_minor_units(1234, 2), "12.34");
        assert_eq!(format_minor_units(-5, 2), "-0.05");
        assert_eq!(format_minor_units(42, 0), "42");
        assert_eq!(format_minor_units(1, 3), "0.001");
    }

    #[test]
    fn test_create_money_digit_limit() {
        let money = create_money("USD", "1234567890123.45", 2).unwrap();
        assert_eq!(money.minor_units, 123_456_789_012_345);

        let err = create_money("USD", "12345678901234.56", 2).unwrap_err();
        assert!(err.is_validation());
    }
}
