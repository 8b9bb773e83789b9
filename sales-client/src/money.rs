//! Money utilities using rust_decimal for precision
//!
//! Amounts travel as `f64` on the wire. Anything that adds or divides them
//! goes through `Decimal` first, and only presentation rounds to cents.

use rust_decimal::prelude::*;

/// Cents
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// NaN becomes zero. Values beyond Decimal's range (about 7.9e28, including
/// infinities) saturate to `Decimal::MAX` / `Decimal::MIN`.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    if value.is_nan() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Sum of wire amounts, saturating at Decimal's bounds instead of overflowing
pub fn sum_amounts(values: impl IntoIterator<Item = f64>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |sum, value| sum.saturating_add(to_decimal(value)))
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_cents(value).to_f64().unwrap_or_default()
}

#[inline]
fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Locale rules for rendering an amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimal_separator: char,
    pub thousands_separator: char,
    /// Space between symbol and digits
    pub spaced: bool,
}

impl CurrencyFormat {
    /// Brazilian real: `R$ 1.234,56`
    pub fn pt_br() -> Self {
        Self {
            symbol: "R$".into(),
            decimal_separator: ',',
            thousands_separator: '.',
            spaced: true,
        }
    }

    /// US dollar: `$1,234.56`
    pub fn en_us() -> Self {
        Self {
            symbol: "$".into(),
            decimal_separator: '.',
            thousands_separator: ',',
            spaced: false,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::pt_br()
    }
}

/// Render with exactly two decimals and grouped thousands
///
/// ```rust,ignore
/// assert_eq!(format_currency(to_decimal(1234.5), &CurrencyFormat::pt_br()), "R$ 1.234,50");
/// ```
pub fn format_currency(value: Decimal, format: &CurrencyFormat) -> String {
    let rounded = round_cents(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    // at most two digits after rounding
    let frac = format!("{:0<width$}", frac, width = DECIMAL_PLACES as usize);

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(format.thousands_separator);
        }
        grouped.push(ch);
    }

    format!(
        "{}{}{}{}{}{}",
        if negative { "-" } else { "" },
        format.symbol,
        if format.spaced { " " } else { "" },
        grouped,
        format.decimal_separator,
        frac
    )
}

/// Convenience for wire amounts
pub fn format_amount(value: f64, format: &CurrencyFormat) -> String {
    format_currency(to_decimal(value), format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_format_pt_br() {
        let fmt = CurrencyFormat::pt_br();
        assert_eq!(format_amount(0.0, &fmt), "R$ 0,00");
        assert_eq!(format_amount(10.5, &fmt), "R$ 10,50");
        assert_eq!(format_amount(1234.5, &fmt), "R$ 1.234,50");
        assert_eq!(format_amount(1234567.891, &fmt), "R$ 1.234.567,89");
        assert_eq!(format_amount(-99.999, &fmt), "-R$ 100,00");
    }

    #[test]
    fn test_format_en_us() {
        let fmt = CurrencyFormat::en_us();
        assert_eq!(format_amount(1000.0, &fmt), "$1,000.00");
        assert_eq!(format_amount(0.005, &fmt), "$0.01");
    }

    #[test]
    fn test_out_of_range_amounts_saturate() {
        assert_eq!(to_decimal(1e30), Decimal::MAX);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::MAX);
        assert_eq!(to_decimal(-1e30), Decimal::MIN);
        // in range, kept as is
        assert!(to_decimal(5e28) < Decimal::MAX);
    }

    #[test]
    fn test_sum_amounts_saturates() {
        assert_eq!(sum_amounts([10.0, 20.5]), Decimal::new(305, 1));
        assert_eq!(sum_amounts([5e28, 5e28]), Decimal::MAX);
        assert_eq!(sum_amounts([4e28, 4e28]), Decimal::MAX);
        assert_eq!(sum_amounts([-4e28, -4e28]), Decimal::MIN);
        assert_eq!(sum_amounts(std::iter::empty()), Decimal::ZERO);
    }

    #[test]
    fn test_format_decimal_bounds() {
        let fmt = CurrencyFormat::pt_br();
        assert_eq!(
            format_currency(Decimal::MAX, &fmt),
            "R$ 79.228.162.514.264.337.593.543.950.335,00"
        );
        assert_eq!(
            format_currency(Decimal::MIN, &fmt),
            "-R$ 79.228.162.514.264.337.593.543.950.335,00"
        );
    }

    #[test]
    fn test_format_does_not_touch_value() {
        let value = to_decimal(2.345);
        let _ = format_currency(value, &CurrencyFormat::default());
        assert_eq!(value, to_decimal(2.345));
    }
}
