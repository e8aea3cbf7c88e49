//! Display-value converters shared by the views and the CLI.
//!
//! Amounts travel as smallest-unit integers and stay exact `BigDecimal`s
//! until [`fixed_precision`] renders them.

use bigdecimal::{
    num_bigint::{BigInt, Sign},
    BigDecimal, Num,
};
use chrono::{DateTime, Utc};

use crate::error::{ExplorerError, Result};

/// Decimals of the native token (wei per FTM).
pub const NATIVE_DECIMALS: u32 = 18;

pub const HASH_PREFIX_WIDTH: usize = 6;
pub const HASH_SUFFIX_WIDTH: usize = 4;

fn hex_digits(raw: &str) -> Result<&str> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| ExplorerError::InvalidHex(raw.to_owned()))?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ExplorerError::InvalidHex(raw.to_owned()));
    }
    Ok(digits)
}

/// Parses a `0x`-prefixed hex string. A missing value is zero, and so is a
/// bare `0x`.
pub fn hex_to_integer(value: Option<&str>) -> Result<u64> {
    let Some(raw) = value else {
        return Ok(0);
    };
    let digits = hex_digits(raw)?;
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16).map_err(|_| ExplorerError::InvalidHex(raw.to_owned()))
}

/// Same as [`hex_to_integer`] for amounts that overflow 64 bits.
pub fn hex_to_bigint(value: Option<&str>) -> Result<BigInt> {
    let Some(raw) = value else {
        return Ok(BigInt::from(0u32));
    };
    let digits = hex_digits(raw)?;
    if digits.is_empty() {
        return Ok(BigInt::from(0u32));
    }
    BigInt::from_str_radix(digits, 16).map_err(|_| ExplorerError::InvalidHex(raw.to_owned()))
}

/// Encodes an integer the way the API expects `Long` arguments.
pub fn integer_to_hex(value: u64) -> String {
    format!("{:#x}", value)
}

/// Divides a smallest-unit amount by `10^decimals` without losing precision.
pub fn scale_to_decimal(amount: &BigInt, decimals: u32) -> BigDecimal {
    BigDecimal::new(amount.clone(), i64::from(decimals))
}

/// Wei to FTM.
pub fn scale_native(amount: &BigInt) -> BigDecimal {
    scale_to_decimal(amount, NATIVE_DECIMALS)
}

fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

/// Renders `value` with exactly `places` fractional digits, rounding half
/// away from zero.
pub fn fixed_precision(value: &BigDecimal, places: u32) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    let negative = digits.sign() == Sign::Minus;
    let magnitude = if negative { -digits } else { digits };

    let target = i64::from(places);
    let scaled = if scale <= target {
        magnitude * pow10((target - scale) as u32)
    } else {
        let divisor = pow10((scale - target) as u32);
        let quotient = &magnitude / &divisor;
        let remainder = &magnitude % &divisor;
        if remainder * 2u32 >= divisor {
            quotient + 1u32
        } else {
            quotient
        }
    };

    let digits = scaled.to_string();
    let width = places as usize;
    let body = if width == 0 {
        digits
    } else {
        let padded = format!("{:0>pad$}", digits, pad = width + 1);
        let (whole, fraction) = padded.split_at(padded.len() - width);
        format!("{whole}.{fraction}")
    };

    if negative && scaled.sign() != Sign::NoSign {
        format!("-{body}")
    } else {
        body
    }
}

/// Shortens a long identifier to `prefix…suffix`. Identifiers no longer than
/// `prefix + suffix` characters are returned unchanged.
pub fn shorten_hash(hash: &str, prefix: usize, suffix: usize) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() <= prefix + suffix {
        return hash.to_owned();
    }
    let head: String = chars[..prefix].iter().collect();
    let tail: String = chars[chars.len() - suffix..].iter().collect();
    format!("{head}…{tail}")
}

pub fn format_hash(hash: &str) -> String {
    shorten_hash(hash, HASH_PREFIX_WIDTH, HASH_SUFFIX_WIDTH)
}

/// UTC date for a unix timestamp in seconds, `None` when out of range.
pub fn timestamp_to_date(secs: u64) -> Option<String> {
    let secs = i64::try_from(secs).ok()?;
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Coarse relative age, e.g. `5 mins ago`.
pub fn time_ago(secs: u64, now: DateTime<Utc>) -> String {
    let elapsed = now.timestamp().saturating_sub(i64::try_from(secs).unwrap_or(i64::MAX));
    if elapsed < 0 {
        return "just now".to_owned();
    }

    let (amount, unit) = match elapsed {
        e if e < 60 => (e, "sec"),
        e if e < 3_600 => (e / 60, "min"),
        e if e < 86_400 => (e / 3_600, "hr"),
        e => (e / 86_400, "day"),
    };
    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural} ago")
}
