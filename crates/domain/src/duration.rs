use crate::DomainError;
use std::time::Duration;

/// Parses a duration string such as `"300ms"`, `"1.5h"` or `"1h30m"`.
///
/// A duration is a sequence of decimal numbers, each followed by a unit
/// (`ns`, `us`/`µs`, `ms`, `s`, `m`, `h`). The bare string `"0"` is accepted.
/// Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, DomainError> {
    let invalid = || DomainError::InvalidDuration(input.to_string());

    let s = input.trim();
    let mut rest = s.strip_prefix('+').unwrap_or(s);
    if rest.is_empty() || rest.starts_with('-') {
        return Err(invalid());
    }
    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total_nanos = 0f64;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(invalid)?;
        let (number, tail) = rest.split_at(number_end);
        if number.is_empty() {
            return Err(invalid());
        }

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        let nanos_per_unit = match unit {
            "ns" => 1f64,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            _ => return Err(invalid()),
        };
        let value: f64 = number.parse().map_err(|_| invalid())?;

        total_nanos += value * nanos_per_unit;
        rest = tail;
    }

    if !total_nanos.is_finite() || total_nanos >= u64::MAX as f64 {
        return Err(invalid());
    }

    Ok(Duration::from_nanos(total_nanos.round() as u64))
}
