//! Custom scalar decoders for values the daemon encodes loosely.

use std::fmt;

use serde::{
    Deserialize, Deserializer,
    de::{self, Visitor},
};

/// Unix-seconds timestamps, transmitted as a JSON number or a numeric string.
///
/// The value is decoded by appending three zero digits (seconds to milliseconds)
/// before integer parsing, so anything that is not an integer literal is rejected.
pub mod unix_seconds {
    use chrono::{DateTime, Utc};

    use super::*;

    /// Converts the textual form of a Unix-seconds timestamp into a UTC instant.
    pub fn parse(text: &str) -> Result<DateTime<Utc>, String> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid unix timestamp: {text:?}"));
        }
        let millis = format!("{trimmed}000")
            .parse::<i64>()
            .map_err(|e| format!("invalid unix timestamp {text:?}: {e}"))?;
        DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| format!("unix timestamp out of range: {text:?}"))
    }

    struct Seconds(DateTime<Utc>);

    struct SecondsVisitor;

    impl Visitor<'_> for SecondsVisitor {
        type Value = Seconds;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("unix seconds as an integer or a numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            self.visit_str(&v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            self.visit_str(&v.to_string())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            parse(v).map(Seconds).map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for Seconds {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(SecondsVisitor)
        }
    }

    /// `deserialize_with` target for a required timestamp field.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        Seconds::deserialize(deserializer).map(|s| s.0)
    }

    /// Decoders for optional timestamp fields.
    pub mod option {
        use super::*;

        /// `deserialize_with` target for an optional timestamp field; pair with
        /// `#[serde(default)]` so that an absent field stays `None`.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Ok(Option::<Seconds>::deserialize(deserializer)?.map(|s| s.0))
        }
    }
}

/// Booleans that older daemons report as `0`/`1` integers.
pub mod flag {
    use super::*;

    struct Flag(bool);

    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = Flag;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean or an integer flag")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Flag(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Flag(v != 0))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Flag(v != 0))
        }
    }

    impl<'de> Deserialize<'de> for Flag {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(FlagVisitor)
        }
    }

    /// `deserialize_with` target for a required flag.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Flag::deserialize(deserializer).map(|f| f.0)
    }

    /// `deserialize_with` target for an optional list of flags.
    pub fn option_vec<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<bool>>, D::Error> {
        Ok(Option::<Vec<Flag>>::deserialize(deserializer)?
            .map(|flags| flags.into_iter().map(|f| f.0).collect()))
    }
}
