//! Decimal number grammar and separator normalisation.
//!
//! Pure string handling, no locale database: the symbols a grammar runs
//! with come from the caller (see [`crate::culture`]).

use std::str::FromStr;

use rust_decimal::Decimal;

/// Numeric symbols of one culture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal_separator: &'static str,
    pub group_separator: &'static str,
    pub negative_sign: &'static str,
    pub currency_symbol: &'static str,
}

/// Symbols of the invariant culture (`1,234.5`).
pub const INVARIANT_SYMBOLS: NumberSymbols = NumberSymbols {
    decimal_separator: ".",
    group_separator: ",",
    negative_sign: "-",
    currency_symbol: "\u{a4}",
};

/// Which number shapes a parse accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// Whitespace, leading/trailing sign, group separators, decimal point.
    Number,
    /// `Number` plus parentheses, exponent and currency symbol.
    Any,
}

/// Separators treated as the same group separator when a culture groups
/// with a (narrow) no-break space.
const SPACE_GROUPS: [&str; 3] = [" ", "\u{a0}", "\u{202f}"];

/// Strip `thousands` and turn `decimal` into `.`, skipping unset separators.
pub fn normalize_separators(value: &str, thousands: Option<&str>, decimal: Option<&str>) -> String {
    let mut normalized = value.to_string();
    if let Some(thousands) = thousands {
        normalized = normalized.replace(thousands, "");
    }
    if let Some(decimal) = decimal {
        normalized = normalized.replace(decimal, ".");
    }
    normalized
}

/// Parse `text` as a decimal under `symbols` and `style`.
///
/// The scale of the input is kept (`"1.650"` parses to a value that
/// renders as `1.650`). Negative zero is normalised to zero.
pub fn parse_decimal(text: &str, symbols: &NumberSymbols, style: NumberStyle) -> Option<Decimal> {
    let any = style == NumberStyle::Any;
    let mut rest = text.trim();
    let mut negative = false;
    let mut signed = false;

    if any {
        if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            negative = true;
            signed = true;
            rest = inner.trim();
        }
    }

    // Leading decorations: currency and sign, in either order.
    for _ in 0..2 {
        if any {
            if let Some(r) = rest.strip_prefix(symbols.currency_symbol) {
                rest = r.trim_start();
                continue;
            }
        }
        if !signed {
            if let Some((is_negative, r)) = strip_sign_prefix(rest, symbols) {
                negative = is_negative;
                signed = true;
                rest = r.trim_start();
                continue;
            }
        }
    }

    // Trailing decorations.
    for _ in 0..2 {
        if any {
            if let Some(r) = rest.strip_suffix(symbols.currency_symbol) {
                rest = r.trim_end();
                continue;
            }
        }
        if !signed {
            if let Some((is_negative, r)) = strip_sign_suffix(rest, symbols) {
                negative = is_negative;
                signed = true;
                rest = r.trim_end();
                continue;
            }
        }
    }

    let body = scan_body(rest, symbols, any)?;
    let mut value = body.to_decimal()?;
    if negative {
        value.set_sign_negative(true);
    }
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    Some(value)
}

fn strip_sign_prefix<'a>(s: &'a str, symbols: &NumberSymbols) -> Option<(bool, &'a str)> {
    if let Some(r) = s.strip_prefix('+') {
        return Some((false, r));
    }
    if let Some(r) = s.strip_prefix(symbols.negative_sign) {
        return Some((true, r));
    }
    s.strip_prefix('-').map(|r| (true, r))
}

fn strip_sign_suffix<'a>(s: &'a str, symbols: &NumberSymbols) -> Option<(bool, &'a str)> {
    if let Some(r) = s.strip_suffix('+') {
        return Some((false, r));
    }
    if let Some(r) = s.strip_suffix(symbols.negative_sign) {
        return Some((true, r));
    }
    s.strip_suffix('-').map(|r| (true, r))
}

/// Digits of a number with separators removed.
struct Body {
    integer: String,
    fraction: String,
    exponent: Option<i64>,
}

impl Body {
    fn to_decimal(&self) -> Option<Decimal> {
        let integer = if self.integer.is_empty() { "0" } else { &self.integer };
        let mantissa = if self.fraction.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{}", self.fraction)
        };
        match self.exponent {
            None => Decimal::from_str(&mantissa).ok(),
            Some(exp) => Decimal::from_scientific(&format!("{mantissa}e{exp}")).ok(),
        }
    }
}

fn scan_body(s: &str, symbols: &NumberSymbols, allow_exponent: bool) -> Option<Body> {
    let mut body = Body {
        integer: String::new(),
        fraction: String::new(),
        exponent: None,
    };
    let mut rest = s;

    // Integer part: a group separator is only accepted after a digit.
    while let Some(c) = rest.chars().next() {
        if c.is_ascii_digit() {
            body.integer.push(c);
            rest = &rest[1..];
        } else if let Some(r) = (!body.integer.is_empty())
            .then(|| strip_group(rest, symbols))
            .flatten()
        {
            rest = r;
        } else {
            break;
        }
    }

    if let Some(r) = rest.strip_prefix(symbols.decimal_separator) {
        rest = r;
        while let Some(c) = rest.chars().next().filter(char::is_ascii_digit) {
            body.fraction.push(c);
            rest = &rest[1..];
        }
    }

    if body.integer.is_empty() && body.fraction.is_empty() {
        return None;
    }

    if allow_exponent {
        if let Some(r) = rest.strip_prefix(['e', 'E']) {
            let (negative, r) = match r.strip_prefix('-') {
                Some(r) => (true, r),
                None => (false, r.strip_prefix('+').unwrap_or(r)),
            };
            let digits: String = r.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                return None;
            }
            let magnitude: i64 = digits.parse().ok()?;
            body.exponent = Some(if negative { -magnitude } else { magnitude });
            rest = &r[digits.len()..];
        }
    }

    rest.is_empty().then_some(body)
}

fn strip_group<'a>(s: &'a str, symbols: &NumberSymbols) -> Option<&'a str> {
    if let Some(r) = s.strip_prefix(symbols.group_separator) {
        return Some(r);
    }
    if SPACE_GROUPS.contains(&symbols.group_separator) {
        return SPACE_GROUPS.iter().find_map(|sep| s.strip_prefix(sep));
    }
    None
}
