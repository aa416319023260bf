//! Currency Catalog with Macro-Based Currency Generation
//!
//! The set of currency codes the rate service knows about is closed and
//! declared once through `define_currencies!`, which generates the
//! `CurrencyCode` enum and its lookups. Which of those codes a converter
//! actually accepts is decided at runtime by [`SupportedCurrencies`].
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     VND => ("VND", "₫", "Vietnamese Dong"),
//! }
//! ```
//!
//! # Example
//! ```
//! use fx_currency::{CurrencyCode, SupportedCurrencies};
//!
//! let supported: SupportedCurrencies = "usd, eur, thb".parse().unwrap();
//! assert!(supported.contains(CurrencyCode::THB));
//! assert!(!supported.contains(CurrencyCode::GBP));
//! assert_eq!(supported.to_string(), "USD, EUR, THB");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised while building currency values from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurrencyError {
    #[error("Unknown currency: {0}")]
    Unknown(String),

    #[error("Supported currency set cannot be empty")]
    EmptySet,
}

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define the currency catalog.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "SYMBOL", "Display name"),
/// }
/// ```
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $display:literal)
        ),* $(,)?
    ) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
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

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            /// Every code in the catalog, in declaration order.
            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = $crate::CurrencyError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err($crate::CurrencyError::Unknown(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - codes published by the rate service
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    AUD => ("AUD", "A$", "Australian Dollar"),
    BGN => ("BGN", "лв", "Bulgarian Lev"),
    BRL => ("BRL", "R$", "Brazilian Real"),
    CAD => ("CAD", "C$", "Canadian Dollar"),
    CHF => ("CHF", "Fr", "Swiss Franc"),
    CNY => ("CNY", "¥", "Chinese Renminbi Yuan"),
    CZK => ("CZK", "Kč", "Czech Koruna"),
    DKK => ("DKK", "kr", "Danish Krone"),
    EUR => ("EUR", "€", "Euro"),
    GBP => ("GBP", "£", "British Pound"),
    HKD => ("HKD", "HK$", "Hong Kong Dollar"),
    HUF => ("HUF", "Ft", "Hungarian Forint"),
    IDR => ("IDR", "Rp", "Indonesian Rupiah"),
    ILS => ("ILS", "₪", "Israeli New Sheqel"),
    INR => ("INR", "₹", "Indian Rupee"),
    ISK => ("ISK", "kr", "Icelandic Króna"),
    JPY => ("JPY", "¥", "Japanese Yen"),
    KRW => ("KRW", "₩", "South Korean Won"),
    MXN => ("MXN", "Mex$", "Mexican Peso"),
    MYR => ("MYR", "RM", "Malaysian Ringgit"),
    NOK => ("NOK", "kr", "Norwegian Krone"),
    NZD => ("NZD", "NZ$", "New Zealand Dollar"),
    PHP => ("PHP", "₱", "Philippine Peso"),
    PLN => ("PLN", "zł", "Polish Złoty"),
    RON => ("RON", "lei", "Romanian Leu"),
    SEK => ("SEK", "kr", "Swedish Krona"),
    SGD => ("SGD", "S$", "Singapore Dollar"),
    THB => ("THB", "฿", "Thai Baht"),
    TRY => ("TRY", "₺", "Turkish Lira"),
    USD => ("USD", "$", "United States Dollar"),
    ZAR => ("ZAR", "R", "South African Rand"),
}

// ─────────────────────────────────────────────────────────────────────────────
// Supported Currency Set
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered, immutable set of the currency codes a converter accepts.
///
/// Fixed when the converter is built. Duplicates are dropped, keeping the
/// first occurrence, so iteration order is the order the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurrencyCode>", into = "Vec<CurrencyCode>")]
pub struct SupportedCurrencies {
    codes: Vec<CurrencyCode>,
}

impl SupportedCurrencies {
    pub fn new(codes: impl IntoIterator<Item = CurrencyCode>) -> Result<Self, CurrencyError> {
        let mut unique: Vec<CurrencyCode> = Vec::new();
        for code in codes {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        if unique.is_empty() {
            return Err(CurrencyError::EmptySet);
        }
        Ok(Self { codes: unique })
    }

    /// The whole catalog.
    pub fn all() -> Self {
        Self {
            codes: CurrencyCode::all().to_vec(),
        }
    }

    pub fn contains(&self, code: CurrencyCode) -> bool {
        self.codes.contains(&code)
    }

    /// Looks up a raw code, returning it only if it is in this set.
    pub fn find(&self, raw: &str) -> Option<CurrencyCode> {
        raw.parse::<CurrencyCode>()
            .ok()
            .filter(|code| self.contains(*code))
    }

    pub fn iter(&self) -> impl Iterator<Item = CurrencyCode> + '_ {
        self.codes.iter().copied()
    }

    pub fn as_slice(&self) -> &[CurrencyCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for SupportedCurrencies {
    fn default() -> Self {
        Self {
            codes: vec![
                CurrencyCode::USD,
                CurrencyCode::EUR,
                CurrencyCode::JPY,
                CurrencyCode::THB,
            ],
        }
    }
}

impl TryFrom<Vec<CurrencyCode>> for SupportedCurrencies {
    type Error = CurrencyError;
    fn try_from(codes: Vec<CurrencyCode>) -> Result<Self, Self::Error> {
        Self::new(codes)
    }
}

impl From<SupportedCurrencies> for Vec<CurrencyCode> {
    fn from(set: SupportedCurrencies) -> Self {
        set.codes
    }
}

impl fmt::Display for SupportedCurrencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.codes.iter().map(|c| c.code()).collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl FromStr for SupportedCurrencies {
    type Err = CurrencyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let codes = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(CurrencyCode::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(codes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
