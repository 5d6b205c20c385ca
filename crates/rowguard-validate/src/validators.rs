//! Field validators, one per supported column type.
//!
//! Every validator is a pure function over a non-empty raw value. Each
//! returns at most one [`Violation`]: checks run in a fixed order and the
//! first failure is reported.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use rowguard_model::{DateFormat, DateRule, NumberRule, StringRule, Violation};

static ISO_DATE_LAYOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid ISO date regex"));

static US_DATE_LAYOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("Invalid US date regex"));

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("Invalid phone regex"));

/// Calendar date layouts accepted besides the ISO forms.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%d-%B-%Y",
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%b %d, %Y %H:%M",
    "%B %d, %Y %H:%M",
    "%b %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M:%S",
];

const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
];

/// Length bounds, then pattern.
pub fn validate_string(value: &str, rule: &StringRule) -> Option<Violation> {
    let length = value.chars().count();
    if let Some(max) = rule.max_length
        && length > max
    {
        return Some(Violation::ExceedsMaxLength(max));
    }
    if let Some(min) = rule.min_length
        && length < min
    {
        return Some(Violation::BelowMinLength(min));
    }
    if let Some(pattern) = &rule.pattern
        && !pattern.is_match(value)
    {
        return Some(Violation::PatternMismatch);
    }
    None
}

/// Calendar validity, then the literal layout of a recognized format.
pub fn validate_date(value: &str, rule: &DateRule) -> Option<Violation> {
    if !is_calendar_date(value) {
        return Some(Violation::InvalidDate);
    }
    let format = rule.format.as_ref()?;
    let layout = match format {
        DateFormat::IsoDate => &*ISO_DATE_LAYOUT,
        DateFormat::UsDate => &*US_DATE_LAYOUT,
        DateFormat::Other(_) => return None,
    };
    if layout.is_match(value) {
        None
    } else {
        Some(Violation::DateFormatMismatch(format.clone()))
    }
}

/// Numeric parse, then `min`, then `max`.
pub fn validate_number(value: &str, rule: &NumberRule) -> Option<Violation> {
    let Some(number) = parse_number(value) else {
        return Some(Violation::NotANumber);
    };
    if let Some(min) = rule.min
        && number < min
    {
        return Some(Violation::BelowMinimum(min));
    }
    if let Some(max) = rule.max
        && number > max
    {
        return Some(Violation::ExceedsMaximum(max));
    }
    None
}

/// Nine digits (spaces and dashes ignored) passing the Luhn checksum.
pub fn validate_sin(value: &str) -> Option<Violation> {
    let cleaned: Vec<char> = value
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '-')
        .collect();
    if cleaned.len() != 9 || !cleaned.iter().all(char::is_ascii_digit) {
        return Some(Violation::SinLength);
    }
    let digits: Vec<u32> = cleaned.iter().filter_map(|ch| ch.to_digit(10)).collect();
    if luhn_sum(&digits) % 10 != 0 {
        return Some(Violation::SinChecksum);
    }
    None
}

pub fn validate_email(value: &str) -> Option<Violation> {
    if EMAIL_SHAPE.is_match(value) {
        None
    } else {
        Some(Violation::InvalidEmail)
    }
}

/// Optional `+` and 10 to 15 digits once spaces, parentheses and dashes are removed.
pub fn validate_phone(value: &str) -> Option<Violation> {
    let cleaned: String = value
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '(' | ')' | '-'))
        .collect();
    if PHONE_SHAPE.is_match(&cleaned) {
        None
    } else {
        Some(Violation::InvalidPhone)
    }
}

/// Sum with every second digit from the right doubled and folded below 10.
fn luhn_sum(digits: &[u32]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(position, digit)| {
            if position % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                *digit
            }
        })
        .sum()
}

/// Parse a numeric literal the way loosely typed spreadsheet exports expect.
///
/// Surrounding whitespace is ignored and blank input reads as zero.
/// `Infinity`, radix prefixes (`0x`, `0o`, `0b`) and exponents are accepted;
/// `inf`, `nan` and thousands separators are not.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
                return None;
            }
            return u128::from_str_radix(digits, radix)
                .ok()
                .map(|parsed| parsed as f64);
        }
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }
    if !is_decimal_literal(unsigned) {
        return None;
    }
    unsigned.parse::<f64>().ok().map(|parsed| sign * parsed)
}

fn is_decimal_literal(text: &str) -> bool {
    let starts_well = text
        .chars()
        .next()
        .is_some_and(|ch| ch.is_ascii_digit() || ch == '.');
    starts_well
        && text
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'))
}

/// Whether the value names a real calendar date in any accepted layout.
pub fn is_calendar_date(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    if is_year_or_month(trimmed) {
        return true;
    }
    if DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(trimmed, format).is_ok())
    {
        return true;
    }
    let without_zulu = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
        .unwrap_or(trimmed);
    if DATE_TIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(without_zulu, format).is_ok())
    {
        return true;
    }
    if OFFSET_DATE_TIME_FORMATS
        .iter()
        .any(|format| DateTime::parse_from_str(trimmed, format).is_ok())
    {
        return true;
    }
    DateTime::parse_from_rfc3339(trimmed).is_ok() || DateTime::parse_from_rfc2822(trimmed).is_ok()
}

/// `YYYY` or `YYYY-MM`.
fn is_year_or_month(value: &str) -> bool {
    let bytes = value.as_bytes();
    match bytes.len() {
        4 => bytes.iter().all(u8::is_ascii_digit),
        7 => {
            bytes[..4].iter().all(u8::is_ascii_digit)
                && bytes[4] == b'-'
                && bytes[5..].iter().all(u8::is_ascii_digit)
                && matches!(value[5..].parse::<u32>(), Ok(1..=12))
        }
        _ => false,
    }
}
