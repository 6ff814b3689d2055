//! Currency pair lookup request.

use currency_catalog::CurrencyCode;
use std::fmt;

/// A single rate lookup for a `from -> to` pair.
///
/// Created each time the user finalizes a currency selection. A newer request
/// supersedes any request still in flight; requests are never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl ConversionRequest {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for ConversionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let req = ConversionRequest::new(CurrencyCode::EUR, CurrencyCode::USD);
        assert_eq!(req.to_string(), "EUR->USD");
    }

    #[test]
    fn test_same_currency_pair_is_allowed() {
        let req = ConversionRequest::new(CurrencyCode::SEK, CurrencyCode::SEK);
        assert_eq!(req.from, req.to);
    }
}
