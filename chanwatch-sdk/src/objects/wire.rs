//! Serde adapters for proto3 JSON conventions.
//!
//! The REST gateway renders 64-bit integers as decimal strings, but some
//! proxies re-encode them as plain numbers, so both forms are accepted.

use serde::{Deserializer, Serializer, de};
use std::fmt;

struct U64Visitor;

impl<'de> de::Visitor<'de> for U64Visitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an unsigned integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

pub(crate) mod u64_string {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(U64Visitor)
    }
}

/// Whole seconds, string encoded.
pub(crate) mod duration_secs {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(
        value: &time::Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.whole_seconds().max(0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<time::Duration, D::Error> {
        let secs = deserializer.deserialize_any(U64Visitor)?;
        let secs = i64::try_from(secs).map_err(D::Error::custom)?;
        Ok(time::Duration::seconds(secs))
    }
}
