//! Rate API endpoint configuration.

use fx_types::ConversionRequest;
use reqwest::Url;
use std::fmt;

/// Latest-rates endpoint of the quote provider.
pub const DEFAULT_BASE_URL: &str = "https://api.freecurrencyapi.com/v1/latest";

/// The configured base URL could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid rate API URL '{url}': {reason}")]
pub struct InvalidEndpoint {
    pub url: String,
    pub reason: String,
}

/// Base URL plus API key; builds the per-pair request URL.
#[derive(Clone)]
pub struct Endpoint {
    base_url: Url,
    api_key: String,
}

impl Endpoint {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, InvalidEndpoint> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| InvalidEndpoint {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `<base-url>?apikey=<key>&base_currency=<FROM>&currencies=<TO>`
    ///
    /// Parameters are appended to any query the base URL already carries.
    pub fn latest_url(&self, req: ConversionRequest) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("base_currency", req.from.code())
            .append_pair("currencies", req.to.code());
        url.into()
    }
}

// The key never ends up in logs.
impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_types::CurrencyCode;

    fn eur_usd() -> ConversionRequest {
        ConversionRequest::new(CurrencyCode::EUR, CurrencyCode::USD)
    }

    #[test]
    fn test_latest_url() {
        let endpoint = Endpoint::new(DEFAULT_BASE_URL, "abc123").unwrap();
        let req = ConversionRequest::new(CurrencyCode::NOK, CurrencyCode::USD);
        assert_eq!(
            endpoint.latest_url(req),
            "https://api.freecurrencyapi.com/v1/latest\
             ?apikey=abc123&base_currency=NOK&currencies=USD"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let endpoint = Endpoint::new("http://localhost:8080/latest/", "k").unwrap();
        assert_eq!(endpoint.base_url(), "http://localhost:8080/latest");
    }

    #[test]
    fn test_api_key_is_encoded() {
        let endpoint = Endpoint::new("http://x/latest", "a b&c=d").unwrap();
        assert_eq!(
            endpoint.latest_url(eur_usd()),
            "http://x/latest?apikey=a+b%26c%3Dd&base_currency=EUR&currencies=USD"
        );
    }

    #[test]
    fn test_existing_query_is_extended() {
        let endpoint = Endpoint::new("http://x/latest?v=1", "k").unwrap();
        assert_eq!(
            endpoint.latest_url(eur_usd()),
            "http://x/latest?v=1&apikey=k&base_currency=EUR&currencies=USD"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = Endpoint::new("not a url", "k").unwrap_err();
        assert_eq!(err.url, "not a url");
        assert!(err.to_string().starts_with("Invalid rate API URL 'not a url'"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let endpoint = Endpoint::new("http://x", "secret-key").unwrap();
        let debug = format!("{:?}", endpoint);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
