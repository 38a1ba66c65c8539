use crate::{LedgerError, ResultLedger};

/// Parses user input into an amount.
///
/// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
/// Surrounding whitespace is ignored.
///
/// ```rust
/// use ledger::parse_amount;
///
/// assert_eq!(parse_amount("10,50").unwrap(), 10.5);
/// assert!(parse_amount("abc").is_err());
/// ```
pub fn parse_amount(input: &str) -> ResultLedger<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidAmount("empty amount".to_string()));
    }

    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| LedgerError::InvalidAmount(format!("\"{trimmed}\" is not a number")))?;
    if !value.is_finite() {
        return Err(LedgerError::InvalidAmount(format!(
            "\"{trimmed}\" is not a finite number"
        )));
    }
    Ok(value)
}

/// Formats an amount as a plain decimal for the backing file.
///
/// Never uses exponent notation; integral values keep one decimal place.
pub(crate) fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Reads a numeric field from the backing file; an empty field is zero.
pub(crate) fn parse_field(field: &str) -> Option<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!(parse_amount("10").unwrap(), 10.0);
        assert_eq!(parse_amount("10.5").unwrap(), 10.5);
        assert_eq!(parse_amount("10,50").unwrap(), 10.5);
        assert_eq!(parse_amount("-0.01").unwrap(), -0.01);
        assert_eq!(parse_amount("+1.00").unwrap(), 1.0);
        assert_eq!(parse_amount("  2.30 ").unwrap(), 2.3);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("   ").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("1.2.3").is_err());
        assert!(parse_amount("12€").is_err());
    }

    #[test]
    fn parse_rejects_non_finite() {
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("-infinity").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn format_plain_never_uses_exponent() {
        assert_eq!(format_plain(0.0), "0.0");
        assert_eq!(format_plain(5.0), "5.0");
        assert_eq!(format_plain(-12.25), "-12.25");
        assert_eq!(format_plain(1e21), "1000000000000000000000.0");
        assert_eq!(format_plain(1e-7), "0.0000001");
    }

    #[test]
    fn empty_field_reads_as_zero() {
        assert_eq!(parse_field(""), Some(0.0));
        assert_eq!(parse_field(" 3.5 "), Some(3.5));
        assert_eq!(parse_field("x"), None);
        assert_eq!(parse_field("NaN"), None);
    }
}
