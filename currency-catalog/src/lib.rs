//! Currency Catalog with Macro-Based Code Generation
//!
//! The converter offers a fixed list of currencies. Each one is declared once in
//! the `define_currencies!` invocation below, which generates the
//! [`CurrencyCode`] enum together with its lookup, parsing and display impls.
//!
//! # Adding a New Currency
//! Simply add a line to the `define_currencies!` macro invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     ARS => ("ARS", "Argentine Peso"),
//! }
//! ```
//!
//! # Example
//! ```
//! use currency_catalog::CurrencyCode;
//!
//! let nok: CurrencyCode = "nok".parse().unwrap();
//! assert_eq!(nok.code(), "NOK");
//! assert_eq!(nok.name(), "Norwegian Krone");
//! assert_eq!(nok.label(), "NOK - Norwegian Krone");
//! ```

/// Error returned when a code is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the currency catalog.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "Display name"),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $title:literal)
        ),* $(,)?
    ) => {
        /// A currency from the fixed catalog, identified by its ISO code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $title),*
                }
            }

            /// Catalog order, as presented to the user.
            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = UnknownCurrency;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(UnknownCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    EUR => ("EUR", "Euro"),
    USD => ("USD", "US Dollar"),
    JPY => ("JPY", "Japanese Yen"),
    BGN => ("BGN", "Bulgarian Lev"),
    CZK => ("CZK", "Czech Republic Koruna"),
    DKK => ("DKK", "Danish Krone"),
    GBP => ("GBP", "British Pound Sterling"),
    HUF => ("HUF", "Hungarian Forint"),
    PLN => ("PLN", "Polish Zloty"),
    RON => ("RON", "Romanian Leu"),
    SEK => ("SEK", "Swedish Krona"),
    CHF => ("CHF", "Swiss Franc"),
    ISK => ("ISK", "Icelandic Króna"),
    NOK => ("NOK", "Norwegian Krone"),
    HRK => ("HRK", "Croatian Kuna"),
    RUB => ("RUB", "Russian Ruble"),
    TRY => ("TRY", "Turkish Lira"),
    AUD => ("AUD", "Australian Dollar"),
    BRL => ("BRL", "Brazilian Real"),
    CAD => ("CAD", "Canadian Dollar"),
    CNY => ("CNY", "Chinese Yuan"),
    HKD => ("HKD", "Hong Kong Dollar"),
    IDR => ("IDR", "Indonesian Rupiah"),
    ILS => ("ILS", "Israeli New Sheqel"),
    INR => ("INR", "Indian Rupee"),
    KRW => ("KRW", "South Korean Won"),
    MXN => ("MXN", "Mexican Peso"),
    MYR => ("MYR", "Malaysian Ringgit"),
    NZD => ("NZD", "New Zealand Dollar"),
    PHP => ("PHP", "Philippine Peso"),
    SGD => ("SGD", "Singapore Dollar"),
    THB => ("THB", "Thai Baht"),
    ZAR => ("ZAR", "South African Rand"),
}

/// Pair selected when a session starts.
pub const START_FROM: CurrencyCode = CurrencyCode::NOK;
pub const START_TO: CurrencyCode = CurrencyCode::USD;

impl CurrencyCode {
    /// List entry text, e.g. `EUR - Euro`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code(), self.name())
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
