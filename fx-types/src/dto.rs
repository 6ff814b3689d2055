//! Wire shapes of the rate API.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body of `GET <base-url>?apikey=..&base_currency=..&currencies=..`.
///
/// A success carries `data`, an object (or a string holding one) mapping
/// currency code to rate. An error carries `message`. Both fields are `Some`
/// whenever the key is present, including an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestRatesResponse {
    #[serde(default, deserialize_with = "present")]
    pub message: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub data: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl LatestRatesResponse {
    /// Error text of the `message` convention, if present.
    pub fn error_message(&self) -> Option<String> {
        self.message.as_ref().map(|m| match m {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
