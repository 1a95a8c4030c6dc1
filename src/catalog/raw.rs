//! Raw track records as returned by the upstream catalog.
//!
//! These types mirror the JSON returned by the Deezer search endpoint, but
//! every field is optional and deserialization is lenient: a field holding a
//! value of an unexpected type is treated as absent instead of failing the
//! whole batch.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier as sent by the upstream catalog.
///
/// Deezer uses integers, other sources use strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Int(id) => write!(f, "{}", id),
            RawId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// A single track record from the catalog search endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<RawId>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    /// Duration in whole seconds.
    #[serde(deserialize_with = "lenient_i64")]
    pub duration: Option<i64>,
    /// Catalog popularity rank.
    #[serde(deserialize_with = "lenient_i64")]
    pub rank: Option<i64>,
    #[serde(deserialize_with = "lenient_bool")]
    pub explicit_lyrics: Option<bool>,
    #[serde(deserialize_with = "lenient_string")]
    pub preview: Option<String>,
    #[serde(deserialize_with = "lenient_nested")]
    pub artist: Option<RawArtist>,
    #[serde(deserialize_with = "lenient_nested")]
    pub album: Option<RawAlbum>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawArtist {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<RawId>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAlbum {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<RawId>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cover: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cover_medium: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub release_date: Option<String>,
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<RawId>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Some(match n.as_i64() {
            Some(id) => RawId::Int(id),
            None => RawId::Text(n.to_string()),
        }),
        Value::String(s) => Some(RawId::Text(s)),
        _ => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn lenient_nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}
