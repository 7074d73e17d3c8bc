//! Culture-aware decimal parsing.
//!
//! The engine only sees the [`NumberCulture`] capability; [`BuiltinCultures`]
//! is the default provider backed by a static symbol table.

use rust_decimal::Decimal;

use crate::number::{parse_decimal, NumberStyle, NumberSymbols, INVARIANT_SYMBOLS};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CultureError {
    #[error("Culture \"{0}\" is not supported")]
    Unsupported(String),

    #[error("Value \"{value}\" is not a number in culture \"{culture}\"")]
    Unparseable { value: String, culture: String },
}

/// Parses decimals under a named culture's numeric conventions.
pub trait NumberCulture: Send + Sync {
    fn parse_decimal(&self, text: &str, culture: &str) -> Result<Decimal, CultureError>;
}

/// Culture table entry.
struct CultureEntry {
    name: &'static str,
    symbols: NumberSymbols,
}

const fn entry(
    name: &'static str,
    decimal_separator: &'static str,
    group_separator: &'static str,
    currency_symbol: &'static str,
) -> CultureEntry {
    CultureEntry {
        name,
        symbols: NumberSymbols {
            decimal_separator,
            group_separator,
            negative_sign: "-",
            currency_symbol,
        },
    }
}

const fn minus_entry(
    name: &'static str,
    decimal_separator: &'static str,
    group_separator: &'static str,
    currency_symbol: &'static str,
) -> CultureEntry {
    CultureEntry {
        name,
        symbols: NumberSymbols {
            decimal_separator,
            group_separator,
            negative_sign: "\u{2212}",
            currency_symbol,
        },
    }
}

const NBSP: &str = "\u{a0}";
const NNBSP: &str = "\u{202f}";

/// Known cultures. The first entry of each language is the one a bare
/// language code resolves to.
static CULTURES: &[CultureEntry] = &[
    entry("en-us", ".", ",", "$"),
    entry("en-gb", ".", ",", "\u{a3}"),
    entry("en-ca", ".", ",", "$"),
    entry("en-au", ".", ",", "$"),
    entry("en-in", ".", ",", "\u{20b9}"),
    entry("fr-fr", ",", NNBSP, "\u{20ac}"),
    entry("fr-ca", ",", NBSP, "$"),
    entry("fr-ch", ",", NNBSP, "CHF"),
    entry("de-de", ",", ".", "\u{20ac}"),
    entry("de-at", ",", NBSP, "\u{20ac}"),
    entry("de-ch", ".", "\u{2019}", "CHF"),
    entry("es-es", ",", ".", "\u{20ac}"),
    entry("es-mx", ".", ",", "$"),
    entry("it-it", ",", ".", "\u{20ac}"),
    entry("pt-br", ",", ".", "R$"),
    entry("pt-pt", ",", NBSP, "\u{20ac}"),
    entry("nl-nl", ",", ".", "\u{20ac}"),
    minus_entry("sv-se", ",", NBSP, "kr"),
    minus_entry("nb-no", ",", NBSP, "kr"),
    entry("da-dk", ",", ".", "kr."),
    minus_entry("fi-fi", ",", NBSP, "\u{20ac}"),
    entry("pl-pl", ",", NBSP, "z\u{142}"),
    entry("cs-cz", ",", NBSP, "K\u{10d}"),
    entry("ru-ru", ",", NBSP, "\u{20bd}"),
    entry("tr-tr", ",", ".", "\u{20ba}"),
    entry("ja-jp", ".", ",", "\u{ffe5}"),
    entry("zh-cn", ".", ",", "\u{a5}"),
    entry("ko-kr", ".", ",", "\u{20a9}"),
];

/// Names that select the invariant culture.
const INVARIANT_NAMES: &[&str] = &["", "iv", "invariant"];

/// Default culture provider with a fixed symbol table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCultures;

impl BuiltinCultures {
    /// Resolve a culture identifier (`fr-FR`, `fr_fr`, `fr`) to its symbols.
    pub fn symbols(&self, culture: &str) -> Option<NumberSymbols> {
        let key = culture.trim().to_ascii_lowercase().replace('_', "-");
        if INVARIANT_NAMES.contains(&key.as_str()) {
            return Some(INVARIANT_SYMBOLS);
        }
        if let Some(found) = CULTURES.iter().find(|c| c.name == key) {
            return Some(found.symbols);
        }
        if key.contains('-') {
            return None;
        }
        CULTURES
            .iter()
            .find(|c| c.name.split('-').next() == Some(key.as_str()))
            .map(|c| c.symbols)
    }
}

impl NumberCulture for BuiltinCultures {
    fn parse_decimal(&self, text: &str, culture: &str) -> Result<Decimal, CultureError> {
        let symbols = self
            .symbols(culture)
            .ok_or_else(|| CultureError::Unsupported(culture.to_string()))?;
        parse_decimal(text, &symbols, NumberStyle::Any).ok_or_else(|| CultureError::Unparseable {
            value: text.to_string(),
            culture: culture.to_string(),
        })
    }
}
