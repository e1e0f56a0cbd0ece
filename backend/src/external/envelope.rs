//! Response envelope shared by the provider's forecast services
//!
//! ```json
//! {"response": {"header": {"resultCode": "00", "resultMsg": "NORMAL_SERVICE"},
//!               "body": {"items": {"item": [ ... ]}}}}
//! ```
//!
//! `item` is a list, a single object, or missing; `items` may be `""` when
//! there is no data.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::UpstreamForecastError;

/// Result code the provider uses for success
pub const RESULT_OK: &str = "00";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: EnvelopeResponse<T>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeResponse<T> {
    header: Header,
    body: Option<Body<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Header {
    result_code: String,
    #[serde(default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
struct Body<T> {
    items: Option<ItemsField<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemsField<T> {
    Items { item: Option<OneOrMany<T>> },
    Blank(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Decode an envelope, check its result code and return the items
pub fn decode_items<T: DeserializeOwned>(
    operation: &'static str,
    body: &str,
) -> Result<Vec<T>, UpstreamForecastError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|e| UpstreamForecastError::Malformed {
            operation,
            reason: format!("{} (body starts with {:?})", e, excerpt(body)),
        })?;

    let header = envelope.response.header;
    if header.result_code != RESULT_OK {
        return Err(UpstreamForecastError::ResultCode {
            operation,
            code: header.result_code,
            message: header.result_msg,
        });
    }

    let items = match envelope.response.body.and_then(|body| body.items) {
        Some(ItemsField::Items { item }) => item,
        Some(ItemsField::Blank(text)) if text.trim().is_empty() => None,
        Some(ItemsField::Blank(text)) => {
            return Err(UpstreamForecastError::Malformed {
                operation,
                reason: format!("unexpected items value {:?}", excerpt(&text)),
            })
        }
        None => None,
    };

    Ok(match items {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

fn excerpt(body: &str) -> String {
    body.chars().take(120).collect()
}

/// Accept `"12"`, `12` or `12.5` as a string field
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Value {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Value::deserialize(deserializer)? {
        Value::Text(s) => s,
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
    })
}

/// Flatten a JSON object into `(key, text)` pairs, dropping nulls and nested values
pub fn scalar_fields(
    object: serde_json::Map<String, serde_json::Value>,
) -> impl Iterator<Item = (String, String)> {
    object.into_iter().filter_map(|(key, value)| match value {
        serde_json::Value::String(s) => Some((key, s)),
        serde_json::Value::Number(n) => Some((key, n.to_string())),
        _ => None,
    })
}
