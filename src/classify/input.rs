//! Query value validation
//!
//! Turns the raw `number` query value into an `i64` under one of two
//! explicit policies. The active policy comes from configuration.

use serde::Deserialize;
use thiserror::Error;

/// How raw query values are turned into integers
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Optional leading minus followed by ASCII digits only
    Strict,
    /// Any finite decimal or exponent literal, truncated toward zero
    #[default]
    Lenient,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("missing number parameter")]
    Missing,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' does not fit in a 64-bit integer")]
    OutOfRange(String),
}

impl ParsePolicy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }

    /// Parse a raw query value. Missing and empty values are always rejected.
    pub fn parse(self, raw: Option<&str>) -> Result<i64, InputError> {
        let raw = match raw {
            Some(r) if !r.is_empty() => r,
            _ => return Err(InputError::Missing),
        };
        match self {
            Self::Strict => parse_strict(raw),
            Self::Lenient => parse_lenient(raw),
        }
    }
}

fn parse_strict(raw: &str) -> Result<i64, InputError> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotANumber(raw.to_string()));
    }
    raw.parse::<i64>()
        .map_err(|_| InputError::OutOfRange(raw.to_string()))
}

// i64::MAX rounds up to 2^63 as f64, so the upper bound is exclusive
#[allow(clippy::cast_precision_loss)]
const UPPER_BOUND: f64 = i64::MAX as f64;
#[allow(clippy::cast_precision_loss)]
const LOWER_BOUND: f64 = i64::MIN as f64;

fn parse_lenient(raw: &str) -> Result<i64, InputError> {
    let trimmed = raw.trim();
    // Integer literals are taken exactly; f64 loses precision above 2^53
    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(n);
    }
    // f64's parser also accepts "inf", "infinity" and "nan" spellings
    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::NotANumber(raw.to_string()))?;

    let truncated = value.trunc();
    if truncated >= UPPER_BOUND || truncated < LOWER_BOUND {
        return Err(InputError::OutOfRange(raw.to_string()));
    }
    #[allow(clippy::cast_possible_truncation)]
    let n = truncated as i64;
    Ok(n)
}
