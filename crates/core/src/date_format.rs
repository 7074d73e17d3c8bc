//! Exact date parsing against `yyyy-MM-dd`-style patterns.
//!
//! Patterns use the custom date format language common to ETL column
//! mappers (`d`, `MM`, `yyyy`, `HH`, `tt`, quoted literals, ...) and are
//! always read with invariant (English) names and separators. Parsing is
//! exact: every pattern token must be matched, doubled numeric tokens need
//! exactly two digits, and no input may be left over.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

const DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];
const DAY_ABBREVIATIONS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];
const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const ERA_NAMES: [&str; 2] = ["A.D.", "AD"];

/// Longest fraction a pattern may ask for (`fffffff`).
const MAX_FRACTION_DIGITS: usize = 7;

/// Two-digit years below this pivot land in the 2000s, the rest in the 1900s.
const TWO_DIGIT_YEAR_PIVOT: i32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("Pattern \"{0}\" is not a valid date format.")]
    BadPattern(String),

    #[error("String '{0}' was not recognized as a valid DateTime.")]
    NotRecognized(String),

    #[error("The DateTime represented by the string '{0}' is out of range.")]
    OutOfRange(String),
}

/// Expand a one-letter standard pattern to its invariant custom pattern.
fn standard_pattern(specifier: char) -> Option<&'static str> {
    let expanded = match specifier {
        'd' => "MM/dd/yyyy",
        'D' => "dddd, dd MMMM yyyy",
        'f' => "dddd, dd MMMM yyyy HH:mm",
        'F' => "dddd, dd MMMM yyyy HH:mm:ss",
        'g' => "MM/dd/yyyy HH:mm",
        'G' => "MM/dd/yyyy HH:mm:ss",
        'm' | 'M' => "MMMM dd",
        'o' | 'O' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffffK",
        'r' | 'R' => "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'",
        's' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
        't' => "HH:mm",
        'T' => "HH:mm:ss",
        'u' => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'",
        'y' | 'Y' => "yyyy MMMM",
        _ => return None,
    };
    Some(expanded)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// A specifier letter and how many times it repeats.
    Specifier(char, usize),
    Literal(char),
}

fn tokenize(pattern: &str) -> Result<Vec<Token>, DateParseError> {
    let bad = || DateParseError::BadPattern(pattern.to_string());
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            'd' | 'M' | 'y' | 'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't' | 'z' | 'g' => {
                let run = chars[i..].iter().take_while(|&&x| x == c).count();
                if matches!(c, 'f' | 'F') && run > MAX_FRACTION_DIGITS {
                    return Err(bad());
                }
                tokens.push(Token::Specifier(c, run));
                i += run;
            }
            'K' => {
                tokens.push(Token::Specifier('K', 1));
                i += 1;
            }
            '\'' | '"' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&x| x == c)
                    .ok_or_else(bad)?;
                tokens.extend(chars[i + 1..i + 1 + close].iter().map(|&x| Token::Literal(x)));
                i += close + 2;
            }
            '\\' => {
                let escaped = chars.get(i + 1).ok_or_else(bad)?;
                tokens.push(Token::Literal(*escaped));
                i += 2;
            }
            '%' => {
                let next = *chars.get(i + 1).ok_or_else(bad)?;
                match next {
                    '%' => return Err(bad()),
                    'd' | 'M' | 'y' | 'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't' | 'z' | 'g' | 'K' => {
                        tokens.push(Token::Specifier(next, 1))
                    }
                    other => tokens.push(Token::Literal(other)),
                }
                i += 2;
            }
            other => {
                tokens.push(Token::Literal(other));
                i += 1;
            }
        }
    }

    Ok(tokens)
}

/// Date and time components collected while matching.
#[derive(Debug, Default)]
struct Components {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    weekday: Option<Weekday>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    nanos: Option<u32>,
    /// `Some(true)` for PM.
    pm: Option<bool>,
    offset_seconds: Option<i32>,
}

/// Record a component; a token repeated with a different value is a mismatch.
fn set<T: PartialEq + Copy>(slot: &mut Option<T>, value: T) -> Option<()> {
    match *slot {
        Some(existing) if existing != value => None,
        _ => {
            *slot = Some(value);
            Some(())
        }
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn digits(&mut self, min: usize, max: usize) -> Option<u32> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return None;
        }
        let (digits, rest) = self.rest.split_at(len);
        self.rest = rest;
        digits.parse().ok()
    }

    fn fraction(&mut self, min: usize, max: usize) -> Option<u32> {
        let len = self
            .rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return None;
        }
        let (digits, rest) = self.rest.split_at(len);
        self.rest = rest;
        if len == 0 {
            return Some(0);
        }
        let value: u32 = digits.parse().ok()?;
        Some(value * 10u32.pow((9 - len) as u32))
    }

    fn literal(&mut self, c: char) -> Option<()> {
        self.rest = self.rest.strip_prefix(c)?;
        Some(())
    }

    /// Case-insensitive longest match among `words`, returning its index.
    fn word(&mut self, words: &[&str]) -> Option<usize> {
        let (index, len) = words
            .iter()
            .enumerate()
            .filter(|(_, w)| {
                self.rest
                    .get(..w.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(w))
            })
            .map(|(i, w)| (i, w.len()))
            .max_by_key(|&(_, len)| len)?;
        self.rest = &self.rest[len..];
        Some(index)
    }

    /// `+hh`, `-h`, `+hh:mm`, `+hhmm` depending on `width`.
    fn offset(&mut self, width: usize) -> Option<i32> {
        let negative = match self.rest.chars().next()? {
            '+' => false,
            '-' => true,
            _ => return None,
        };
        self.rest = &self.rest[1..];
        let (hours, minutes) = match width {
            1 => (self.digits(1, 2)?, 0),
            2 => (self.digits(2, 2)?, 0),
            _ => {
                let hours = self.digits(2, 2)?;
                let _ = self.literal(':');
                (hours, self.digits(2, 2)?)
            }
        };
        if hours > 14 || minutes > 59 {
            return None;
        }
        let seconds = (hours * 3600 + minutes * 60) as i32;
        Some(if negative { -seconds } else { seconds })
    }
}

fn match_token(cursor: &mut Cursor<'_>, token: Token, parsed: &mut Components) -> Option<()> {
    let numeric = |n: usize| if n == 1 { (1, 2) } else { (2, 2) };

    match token {
        Token::Literal(c) => cursor.literal(c),
        Token::Specifier('d', n) if n >= 3 => {
            let names: &[&str] = if n == 3 { &DAY_ABBREVIATIONS } else { &DAY_NAMES };
            let index = cursor.word(names)?;
            set(&mut parsed.weekday, WEEKDAYS[index])
        }
        Token::Specifier('d', n) => {
            let (min, max) = numeric(n);
            set(&mut parsed.day, cursor.digits(min, max)?)
        }
        Token::Specifier('M', n) if n >= 3 => {
            let names: &[&str] = if n == 3 { &MONTH_ABBREVIATIONS } else { &MONTH_NAMES };
            let index = cursor.word(names)?;
            set(&mut parsed.month, index as u32 + 1)
        }
        Token::Specifier('M', n) => {
            let (min, max) = numeric(n);
            set(&mut parsed.month, cursor.digits(min, max)?)
        }
        Token::Specifier('y', n) => {
            let year = if n <= 2 {
                let (min, max) = numeric(n);
                let short = cursor.digits(min, max)? as i32;
                if short < TWO_DIGIT_YEAR_PIVOT {
                    2000 + short
                } else {
                    1900 + short
                }
            } else {
                cursor.digits(n, n)? as i32
            };
            set(&mut parsed.year, year)
        }
        Token::Specifier('h' | 'H', n) => {
            let (min, max) = numeric(n);
            set(&mut parsed.hour, cursor.digits(min, max)?)
        }
        Token::Specifier('m', n) => {
            let (min, max) = numeric(n);
            set(&mut parsed.minute, cursor.digits(min, max)?)
        }
        Token::Specifier('s', n) => {
            let (min, max) = numeric(n);
            set(&mut parsed.second, cursor.digits(min, max)?)
        }
        Token::Specifier('f', n) => set(&mut parsed.nanos, cursor.fraction(n, n)?),
        Token::Specifier('F', n) => set(&mut parsed.nanos, cursor.fraction(0, n)?),
        Token::Specifier('t', 1) => {
            let index = cursor.word(&["A", "P"])?;
            set(&mut parsed.pm, index == 1)
        }
        Token::Specifier('t', _) => {
            let index = cursor.word(&["AM", "PM"])?;
            set(&mut parsed.pm, index == 1)
        }
        Token::Specifier('z', n) => set(&mut parsed.offset_seconds, cursor.offset(n)?),
        Token::Specifier('K', _) => {
            if cursor.literal('Z').is_some() {
                set(&mut parsed.offset_seconds, 0)
            } else if cursor.rest.starts_with(['+', '-']) {
                set(&mut parsed.offset_seconds, cursor.offset(3)?)
            } else {
                Some(())
            }
        }
        Token::Specifier('g', _) => cursor.word(&ERA_NAMES).map(|_| ()),
        Token::Specifier(_, _) => None,
    }
}

/// Parse `value` exactly against `pattern`.
///
/// Components the pattern does not mention default to 0001-01-01 00:00:00.
/// A parsed UTC offset is applied, so the result is in UTC.
pub fn parse_exact(value: &str, pattern: &str) -> Result<NaiveDateTime, DateParseError> {
    let not_recognized = || DateParseError::NotRecognized(value.to_string());

    let mut pattern_chars = pattern.chars();
    let pattern = match (pattern_chars.next(), pattern_chars.next()) {
        (Some(c), None) => {
            standard_pattern(c).ok_or_else(|| DateParseError::BadPattern(pattern.to_string()))?
        }
        (None, _) => return Err(DateParseError::BadPattern(String::new())),
        _ => pattern,
    };

    let tokens = tokenize(pattern)?;
    let mut cursor = Cursor { rest: value };
    let mut parsed = Components::default();
    for token in tokens {
        match_token(&mut cursor, token, &mut parsed).ok_or_else(not_recognized)?;
    }
    if !cursor.rest.is_empty() {
        return Err(not_recognized());
    }

    let year = parsed.year.unwrap_or(1);
    if !(1..=9999).contains(&year) {
        return Err(DateParseError::OutOfRange(value.to_string()));
    }
    let date = NaiveDate::from_ymd_opt(year, parsed.month.unwrap_or(1), parsed.day.unwrap_or(1))
        .ok_or_else(not_recognized)?;
    if parsed.weekday.is_some_and(|weekday| weekday != date.weekday()) {
        return Err(not_recognized());
    }

    let mut hour = parsed.hour.unwrap_or(0);
    if let Some(pm) = parsed.pm {
        if hour > 12 {
            return Err(not_recognized());
        }
        if pm && hour < 12 {
            hour += 12;
        } else if !pm && hour == 12 {
            hour = 0;
        }
    }
    let time = NaiveTime::from_hms_nano_opt(
        hour,
        parsed.minute.unwrap_or(0),
        parsed.second.unwrap_or(0),
        parsed.nanos.unwrap_or(0),
    )
    .ok_or_else(not_recognized)?;

    let local = date.and_time(time);
    let time_only = parsed.year.is_none() && parsed.month.is_none() && parsed.day.is_none();
    match parsed.offset_seconds {
        // No date to carry into, so only the time of day moves.
        Some(offset) if time_only => {
            let shift = chrono::Duration::seconds(i64::from(offset));
            let (utc, _) = time.overflowing_sub_signed(shift);
            Ok(date.and_time(utc))
        }
        Some(offset) => local
            .checked_sub_signed(chrono::Duration::seconds(i64::from(offset)))
            .filter(|utc| (1..=9999).contains(&utc.year()))
            .ok_or_else(|| DateParseError::OutOfRange(value.to_string())),
        None => Ok(local),
    }
}
