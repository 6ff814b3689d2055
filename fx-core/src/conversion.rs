//! User-visible conversion state.
//!
//! Holds the selected pair, the entered amount and the last good rate, and
//! keeps the converted amount in sync with them.

use std::str::FromStr;

use chrono::{Days, NaiveDate};
use currency_catalog::{START_FROM, START_TO};
use fx_types::{ConversionRequest, CurrencyCode, FetchOutcome};
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places of the converted amount.
pub const CONVERTED_SCALE: u32 = 2;

/// `amount * rate`, rounded half-up to two decimals.
///
/// Returns `None` if the product overflows.
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    let mut converted = amount
        .checked_mul(rate)?
        .round_dp_with_strategy(CONVERTED_SCALE, RoundingStrategy::MidpointAwayFromZero);
    converted.rescale(CONVERTED_SCALE);
    Some(converted)
}

/// Whether an incoming rate was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateUpdate {
    Applied,
    /// Sentinel `0`; the displayed amount was left as it was.
    Rejected,
}

/// Rate last applied, with the pair it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRate {
    pub pair: ConversionRequest,
    pub rate: Decimal,
    pub fetched_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionState {
    from: CurrencyCode,
    to: CurrencyCode,
    amount: Decimal,
    amount_text: String,
    last_rate: Option<AppliedRate>,
    converted: Decimal,
}

impl Default for ConversionState {
    fn default() -> Self {
        Self::new(START_FROM, START_TO)
    }
}

impl ConversionState {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self {
            from,
            to,
            amount: Decimal::ONE_HUNDRED,
            amount_text: "100".to_string(),
            last_rate: None,
            converted: Decimal::new(0, CONVERTED_SCALE),
        }
    }

    pub fn from(&self) -> CurrencyCode {
        self.from
    }

    pub fn to(&self) -> CurrencyCode {
        self.to
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Text shown in the amount field. Empty after unparseable input.
    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn last_rate(&self) -> Option<&AppliedRate> {
        self.last_rate.as_ref()
    }

    pub fn converted_amount(&self) -> Decimal {
        self.converted
    }

    /// Converted amount as displayed, always with two decimals.
    pub fn converted_text(&self) -> String {
        self.converted.to_string()
    }

    /// The pair currently selected.
    pub fn request(&self) -> ConversionRequest {
        ConversionRequest::new(self.from, self.to)
    }

    pub fn select_from(&mut self, code: CurrencyCode) -> ConversionRequest {
        self.from = code;
        self.request()
    }

    pub fn select_to(&mut self, code: CurrencyCode) -> ConversionRequest {
        self.to = code;
        self.request()
    }

    /// Takes new amount text and recomputes.
    ///
    /// Text that is not a number counts as zero and clears the field.
    pub fn set_amount_text(&mut self, text: &str) {
        match parse_amount(text) {
            Some(amount) => {
                self.amount = amount;
                self.amount_text = text.to_string();
            }
            None => {
                self.amount = Decimal::ZERO;
                self.amount_text.clear();
            }
        }
        self.recompute();
    }

    /// Applies a fetched rate for `pair`. A zero rate is the failure sentinel
    /// and leaves the displayed amount untouched.
    pub fn apply_rate(
        &mut self,
        pair: ConversionRequest,
        rate: Decimal,
        fetched_on: NaiveDate,
    ) -> RateUpdate {
        if rate.is_zero() {
            return RateUpdate::Rejected;
        }
        self.last_rate = Some(AppliedRate {
            pair,
            rate,
            fetched_on,
        });
        self.recompute();
        RateUpdate::Applied
    }

    pub fn apply_outcome(
        &mut self,
        pair: ConversionRequest,
        outcome: &FetchOutcome,
        fetched_on: NaiveDate,
    ) -> RateUpdate {
        self.apply_rate(pair, outcome.rate_or_sentinel(), fetched_on)
    }

    /// `1 FROM = RATE TO.` plus the publication time of the rate.
    ///
    /// The API publishes end-of-day rates, so the rate dates from the day
    /// before it was fetched.
    pub fn rate_line(&self) -> Option<String> {
        let applied = self.last_rate.as_ref()?;
        let published = applied
            .fetched_on
            .checked_sub_days(Days::new(1))
            .unwrap_or(applied.fetched_on);
        Some(format!(
            "1 {} = {} {}.\nUpdated {} 23:59:59",
            applied.pair.from,
            applied.rate,
            applied.pair.to,
            published.format("%b %-d, %Y")
        ))
    }

    fn recompute(&mut self) {
        let Some(applied) = &self.last_rate else {
            return;
        };
        match convert_amount(self.amount, applied.rate) {
            Some(converted) => self.converted = converted,
            None => tracing::warn!(amount = %self.amount, "Converted amount out of range"),
        }
    }
}

fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
