//! Result of a single non-superseded rate fetch.

use rust_decimal::Decimal;
use std::fmt;

/// Why a fetch produced no usable rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// I/O error, timeout or cancelled call; the client handed back an empty body.
    Transport,
    /// The API answered with its `message` error convention.
    Api(String),
    /// Body present but not the expected shape.
    Malformed(String),
    /// The API reported a rate of zero or below.
    NonPositiveRate,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport => write!(f, "transport failure"),
            FetchFailure::Api(msg) => write!(f, "API error: {}", msg),
            FetchFailure::Malformed(reason) => write!(f, "malformed response: {}", reason),
            FetchFailure::NonPositiveRate => write!(f, "non-positive rate"),
        }
    }
}

/// Outcome of a completed fetch.
///
/// A rate held in `Rate` is always strictly positive. Zero is reserved as the
/// failure sentinel, see [`FetchOutcome::rate_or_sentinel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Rate(Decimal),
    Failed(FetchFailure),
}

impl FetchOutcome {
    /// Wraps a parsed rate, folding zero and negative values into a failure.
    pub fn from_rate(rate: Decimal) -> Self {
        if rate > Decimal::ZERO {
            FetchOutcome::Rate(rate)
        } else {
            FetchOutcome::Failed(FetchFailure::NonPositiveRate)
        }
    }

    /// The rate, or `0` when the fetch failed.
    pub fn rate_or_sentinel(&self) -> Decimal {
        match self {
            FetchOutcome::Rate(rate) => *rate,
            FetchOutcome::Failed(_) => Decimal::ZERO,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_rate_is_kept_exactly() {
        let outcome = FetchOutcome::from_rate(dec!(1.2300));
        assert_eq!(outcome, FetchOutcome::Rate(dec!(1.2300)));
        assert_eq!(outcome.rate_or_sentinel().to_string(), "1.2300");
    }

    #[test]
    fn test_zero_rate_is_a_failure() {
        let outcome = FetchOutcome::from_rate(Decimal::ZERO);
        assert_eq!(outcome, FetchOutcome::Failed(FetchFailure::NonPositiveRate));
        assert_eq!(outcome.rate_or_sentinel(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_rate_is_a_failure() {
        assert!(FetchOutcome::from_rate(dec!(-0.5)).is_failure());
    }

    #[test]
    fn test_failure_yields_sentinel() {
        let outcome = FetchOutcome::Failed(FetchFailure::Api("Invalid key".into()));
        assert_eq!(outcome.rate_or_sentinel(), Decimal::ZERO);
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(
            FetchFailure::Api("quota".into()).to_string(),
            "API error: quota"
        );
        assert_eq!(FetchFailure::Transport.to_string(), "transport failure");
    }
}
