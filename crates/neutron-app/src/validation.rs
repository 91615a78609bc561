// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;

/// Largest distance, in hundredths, that survives the round trip through `f64`.
pub const MAX_DISTANCE_HUNDREDTHS: u64 = 1 << 53;

/// Upper bound for a distance typed into a cell (1 000 000.00).
pub const MAX_CELL_DISTANCE: Distance = Distance::from_hundredths(100_000_000);

/// Upper bound for a jump count typed into a cell.
pub const MAX_CELL_JUMPS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidDecimal,
    NegativeDecimal,
    DecimalOutOfRange,
    InvalidInt,
    NegativeInt,
    DistanceAboveMax,
    JumpsAboveMax,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDecimal => f.write_str("invalid decimal value"),
            Self::NegativeDecimal => f.write_str("negative decimal value"),
            Self::DecimalOutOfRange => f.write_str("decimal value out of range"),
            Self::InvalidInt => f.write_str("invalid integer value"),
            Self::NegativeInt => f.write_str("negative integer value"),
            Self::DistanceAboveMax => write!(f, "distance above {MAX_CELL_DISTANCE}"),
            Self::JumpsAboveMax => write!(f, "jumps above {MAX_CELL_JUMPS}"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// A non-negative decimal with exactly two fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Distance(u64);

impl Distance {
    pub const ZERO: Self = Self(0);

    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    pub const fn hundredths(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Parses a decimal and rounds it to the nearest hundredth.
///
/// Accepts anything `f64` parsing accepts (`5`, `5.3`, ` 1e3 `) as long as the
/// value is finite and not negative. Rounding works on the exact binary value
/// with ties to even, so `2.675` becomes `2.67` and `0.125` becomes `0.12`.
pub fn parse_distance(input: &str) -> ValidationResult<Distance> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidDecimal);
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidDecimal)?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidDecimal);
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeDecimal);
    }
    if value * 100.0 > MAX_DISTANCE_HUNDREDTHS as f64 {
        return Err(ValidationError::DecimalOutOfRange);
    }

    // abs() folds -0.0 into 0.0 so the text carries no sign.
    let rounded = format!("{:.2}", value.abs());
    let (whole, fraction) = rounded
        .split_once('.')
        .ok_or(ValidationError::InvalidDecimal)?;
    let whole = whole
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidDecimal)?;
    let fraction = fraction
        .parse::<u64>()
        .map_err(|_| ValidationError::InvalidDecimal)?;
    Ok(Distance::from_hundredths(whole * 100 + fraction))
}

/// [`parse_distance`] capped at [`MAX_CELL_DISTANCE`].
pub fn parse_cell_distance(input: &str) -> ValidationResult<Distance> {
    let distance = parse_distance(input)?;
    if distance > MAX_CELL_DISTANCE {
        return Err(ValidationError::DistanceAboveMax);
    }
    Ok(distance)
}

/// [`parse_jumps`] capped at [`MAX_CELL_JUMPS`].
pub fn parse_cell_jumps(input: &str) -> ValidationResult<u32> {
    let jumps = parse_jumps(input)?;
    if jumps > MAX_CELL_JUMPS {
        return Err(ValidationError::JumpsAboveMax);
    }
    Ok(jumps)
}

pub fn parse_jumps(input: &str) -> ValidationResult<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidInt);
    }
    if trimmed.starts_with('-') {
        return Err(ValidationError::NegativeInt);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::InvalidInt)
}

#[cfg(test)]
mod tests {
    use super::{
        Distance, MAX_CELL_DISTANCE, ValidationError, parse_cell_distance, parse_cell_jumps,
        parse_distance, parse_jumps,
    };
    use std::collections::BTreeMap;

    #[test]
    fn parse_distance_rounds_to_hundredths() {
        let cases = BTreeMap::from([
            ("0", 0),
            ("0.00", 0),
            ("5.3", 530),
            ("120.50", 12_050),
            ("115.2", 11_520),
            (" 7 ", 700),
            ("3.14159", 314),
            ("2.999", 300),
            ("1e3", 100_000),
            (".75", 75),
            ("-0", 0),
            ("0.125", 12),
            ("0.015", 1),
            ("0.045", 4),
            ("2.675", 267),
            ("0.375", 38),
            ("1.005", 100),
        ]);
        for (input, expected) in cases {
            let got = parse_distance(input).expect("distance should parse");
            assert_eq!(got.hundredths(), expected, "input {input:?}");
        }
    }

    #[test]
    fn parse_distance_rejects_bad_input() {
        for input in ["", "  ", "abc", "1.2.3", "inf", "NaN", "12ly"] {
            assert_eq!(
                parse_distance(input),
                Err(ValidationError::InvalidDecimal),
                "input {input:?}"
            );
        }
        assert_eq!(
            parse_distance("-0.5"),
            Err(ValidationError::NegativeDecimal)
        );
        assert_eq!(
            parse_distance("1e300"),
            Err(ValidationError::DecimalOutOfRange)
        );
    }

    #[test]
    fn distance_display_always_has_two_digits() {
        assert_eq!(Distance::ZERO.to_string(), "0.00");
        assert_eq!(Distance::from_hundredths(5).to_string(), "0.05");
        assert_eq!(Distance::from_hundredths(530).to_string(), "5.30");
        assert_eq!(Distance::from_hundredths(12_050).to_string(), "120.50");
    }

    #[test]
    fn parse_jumps_accepts_plain_integers() {
        assert_eq!(parse_jumps("0"), Ok(0));
        assert_eq!(parse_jumps(" 3 "), Ok(3));
        assert_eq!(parse_jumps("+4"), Ok(4));
    }

    #[test]
    fn parse_jumps_rejects_bad_input() {
        assert_eq!(parse_jumps(""), Err(ValidationError::InvalidInt));
        assert_eq!(parse_jumps("1.5"), Err(ValidationError::InvalidInt));
        assert_eq!(parse_jumps("three"), Err(ValidationError::InvalidInt));
        assert_eq!(parse_jumps("99999999999"), Err(ValidationError::InvalidInt));
        assert_eq!(parse_jumps("-1"), Err(ValidationError::NegativeInt));
    }

    #[test]
    fn cell_parsers_enforce_editor_limits() {
        assert_eq!(parse_cell_distance("1000000"), Ok(MAX_CELL_DISTANCE));
        assert_eq!(
            parse_cell_distance("1000000.01"),
            Err(ValidationError::DistanceAboveMax)
        );
        assert_eq!(parse_cell_jumps("10000"), Ok(10_000));
        assert_eq!(parse_cell_jumps("10001"), Err(ValidationError::JumpsAboveMax));
        assert_eq!(parse_cell_jumps("-2"), Err(ValidationError::NegativeInt));
        assert_eq!(
            ValidationError::DistanceAboveMax.to_string(),
            "distance above 1000000.00"
        );
        assert_eq!(ValidationError::JumpsAboveMax.to_string(), "jumps above 10000");
    }
}
