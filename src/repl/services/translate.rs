//! # Body Translation
//!
//! Turns the raw body block into the bytes that go on the wire. In translate
//! mode the block is read as JSON5 (unquoted keys, single quotes, trailing
//! commas, comments) and re-encoded as compact JSON. In raw mode the bytes
//! are forwarded untouched.

use crate::repl::error::ReplError;
use crate::repl::utils::is_blank;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;

/// How the body block is turned into a request payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BodyMode {
    /// Parse the lightweight notation and send JSON
    #[default]
    Translate,
    /// Send the body exactly as typed
    Raw,
}

impl BodyMode {
    /// Whether the form content-type header goes out by default in this mode
    pub fn default_form_header(&self) -> bool {
        matches!(self, BodyMode::Translate)
    }

    pub fn translate(&self, raw: &[u8]) -> Result<Vec<u8>, ReplError> {
        match self {
            BodyMode::Raw => Ok(raw.to_vec()),
            BodyMode::Translate => translate_to_json(raw),
        }
    }
}

impl FromStr for BodyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "translate" => Ok(BodyMode::Translate),
            "raw" => Ok(BodyMode::Raw),
            other => Err(format!("unknown mode '{other}', expected translate or raw")),
        }
    }
}

/// Parse a body and encode it as compact JSON.
///
/// Strict JSON is taken as is, so integers beyond `i64` survive. Anything
/// else goes through the JSON5 parser. An empty or whitespace-only body
/// yields an empty payload.
pub fn translate_to_json(raw: &[u8]) -> Result<Vec<u8>, ReplError> {
    if is_blank(raw) {
        return Ok(Vec::new());
    }

    let document = match serde_json::from_slice::<Value>(raw) {
        Ok(document) => document,
        Err(_) => {
            let text =
                std::str::from_utf8(raw).map_err(|e| ReplError::Translation(e.to_string()))?;
            json5::from_str::<FiniteValue>(text)
                .map_err(|e| ReplError::Translation(e.to_string()))?
                .0
        }
    };

    serde_json::to_vec(&document).map_err(|e| ReplError::Translation(e.to_string()))
}

/// A JSON value that refuses NaN and infinities instead of turning them into null
struct FiniteValue(Value);

impl<'de> Deserialize<'de> for FiniteValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FiniteVisitor).map(FiniteValue)
    }
}

struct FiniteVisitor;

impl<'de> Visitor<'de> for FiniteVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| E::custom(format!("{v} is not a valid JSON number")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(FiniteVisitor)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(FiniteValue(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut object = Map::new();
        while let Some((key, FiniteValue(value))) = map.next_entry::<String, FiniteValue>()? {
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}
