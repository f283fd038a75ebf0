//! Serde adapter writing a value through its `Display`/`FromStr` pair.
//!
//! The `solana-sdk` key and signature types serialize as raw byte arrays;
//! config files and reports want the base58 text instead. Use with
//! `#[serde(with = "lplock_types::serde_str")]`.

use std::fmt::Display;
use std::str::FromStr;

use serde::ser::SerializeSeq;
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(de::Error::custom)
}

/// The same for a sequence of values.
pub mod seq {
    use super::*;

    pub fn serialize<T: Display, S: Serializer>(values: &[T], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }
}
