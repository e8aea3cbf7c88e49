//! Serde helpers for the API's scalar encoding.
//!
//! `Long` and `BigInt` scalars arrive as `0x` hex strings, `Int` as plain JSON
//! numbers, and any of them may be `null`. Missing values decode as zero.

use bigdecimal::num_bigint::BigInt;
use serde::{Deserialize, Deserializer};

use crate::convert::{hex_to_bigint, hex_to_integer};

#[derive(Deserialize)]
#[serde(untagged)]
enum WireNumber {
    Number(u64),
    Text(String),
}

pub fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<WireNumber>::deserialize(deserializer)? {
        None => Ok(0),
        Some(WireNumber::Number(n)) => Ok(n),
        Some(WireNumber::Text(s)) => hex_to_integer(Some(&s)).map_err(serde::de::Error::custom),
    }
}

pub fn deserialize_bigint<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<WireNumber>::deserialize(deserializer)? {
        None => Ok(BigInt::from(0u32)),
        Some(WireNumber::Number(n)) => Ok(BigInt::from(n)),
        Some(WireNumber::Text(s)) => hex_to_bigint(Some(&s)).map_err(serde::de::Error::custom),
    }
}

// `null` lists come back for blocks without transactions
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
