//! Rate response parsing.
//!
//! Turns a raw body from the rate client into a [`FetchOutcome`]. Nothing here
//! raises: every unexpected shape becomes a failed outcome.

use std::str::FromStr;

use fx_types::{CurrencyCode, FetchFailure, FetchOutcome, LatestRatesResponse};
use rust_decimal::Decimal;
use serde_json::Value;

/// Extracts `data[to]` from a latest-rates body.
///
/// - empty body: transport failure (the client folds errors into `""`)
/// - `message` key present: API error, even if `null` or `data` is also present
/// - `data` may be an object or a string holding an object
/// - the rate keeps the scale of its textual representation
pub fn parse_rate_response(body: &str, to: CurrencyCode) -> FetchOutcome {
    if body.trim().is_empty() {
        return FetchOutcome::Failed(FetchFailure::Transport);
    }

    let resp: LatestRatesResponse = match serde_json::from_str(body) {
        Ok(resp) => resp,
        Err(e) => return malformed(format!("invalid JSON: {}", e)),
    };

    if let Some(message) = resp.error_message() {
        return FetchOutcome::Failed(FetchFailure::Api(message));
    }

    let data = match resp.data {
        Some(Value::String(nested)) => match serde_json::from_str::<Value>(&nested) {
            Ok(data) => data,
            Err(e) => return malformed(format!("invalid nested data: {}", e)),
        },
        Some(data) => data,
        None => return malformed("missing data field".to_string()),
    };

    let Some(value) = data.get(to.code()) else {
        return malformed(format!("no rate for {}", to));
    };

    match decimal_from_json(value) {
        Some(rate) => FetchOutcome::from_rate(rate),
        None => malformed(format!("rate for {} is not a number: {}", to, value)),
    }
}

fn decimal_from_json(value: &Value) -> Option<Decimal> {
    let text = match value {
        // Needs serde_json's arbitrary_precision so the received digits survive.
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn malformed(reason: String) -> FetchOutcome {
    FetchOutcome::Failed(FetchFailure::Malformed(reason))
}
