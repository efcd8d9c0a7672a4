//! Update interval parsing
//!
//! Accepts Go-style duration strings: one or more `<integer><unit>` groups
//! with units `ms`, `s`, `m` and `h`, e.g. `5m`, `1h30m`, `500ms`.

use crate::error::{Error, Result};
use std::time::Duration;

/// Parse an interval string into a non-zero [`Duration`]
pub fn parse_interval(input: &str) -> Result<Duration> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_interval(input, "duration cannot be empty"));
    }

    let mut total = Duration::ZERO;
    let mut chars = trimmed.chars().peekable();

    while chars.peek().is_some() {
        let mut number = String::new();
        while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
            number.push(c);
            chars.next();
        }

        let mut unit = String::new();
        while let Some(c) = chars.peek().copied().filter(char::is_ascii_alphabetic) {
            unit.push(c);
            chars.next();
        }

        if number.is_empty() {
            return Err(Error::invalid_interval(
                input,
                format!("missing number before '{}'", unit),
            ));
        }
        let value: u64 = number
            .parse()
            .map_err(|_| Error::invalid_interval(input, format!("invalid number '{}'", number)))?;

        let part = match unit.as_str() {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.saturating_mul(60)),
            "h" => Duration::from_secs(value.saturating_mul(3600)),
            "" => return Err(Error::invalid_interval(input, "missing unit")),
            other => {
                return Err(Error::invalid_interval(
                    input,
                    format!("unknown unit '{}'", other),
                ));
            }
        };
        total = total.saturating_add(part);
    }

    if total.is_zero() {
        return Err(Error::invalid_interval(input, "interval must be > 0"));
    }

    Ok(total)
}
