//! Value normalization.
//!
//! Statement cells mix Brazilian (`4.077,32`) and US (`4,077.32`) number
//! formats, `HH:MM` hour notation, percentages and currency symbols. This
//! module turns any of them into an `f64`, and never fails: anything that
//! cannot be read becomes `0.0`.

use std::borrow::Cow;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::Cell;

/// Informal classification of a raw value, for display and diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// `HH:MM` notation, or a small fractional number.
    Hours,
    /// Carries a `%` sign.
    Percentage,
    /// Ten or more.
    Currency,
    /// Anything else (whole numbers below ten, zero, negatives).
    Integer,
}

/// Converts a raw cell into a number.
///
/// # Rules
///
/// - empty, blank, `-`, `nan` → `0.0`
/// - numeric cells pass through (NaN and infinities become `0.0`)
/// - `H:MM` → hours plus minutes / 60
/// - `%`, `R$`, `$` and all whitespace (including NBSP) are stripped
/// - with both `.` and `,`, the last one is the decimal separator
/// - with only `,`, it is the decimal separator
/// - with only `.`, a single dot followed by at most two digits is decimal;
///   otherwise every dot is a thousands separator
///
/// # Examples
///
/// ```
/// use payroll_engine::models::Cell;
/// use payroll_engine::parsing::normalize;
///
/// assert_eq!(normalize(&Cell::from("4.077,32")), 4077.32);
/// assert_eq!(normalize(&Cell::from("4,077.32")), 4077.32);
/// assert_eq!(normalize(&Cell::from("100:30")), 100.5);
/// assert_eq!(normalize(&Cell::from("12,5%")), 12.5);
/// assert_eq!(normalize(&Cell::from("1.000")), 1000.0);
/// assert_eq!(normalize(&Cell::Empty), 0.0);
/// ```
pub fn normalize(raw: &Cell) -> f64 {
    match raw {
        Cell::Empty => 0.0,
        Cell::Number(value) if value.is_finite() => *value,
        Cell::Number(_) => 0.0,
        Cell::Text(text) => normalize_str(text),
    }
}

/// Converts raw text into a number. See [`normalize`] for the rules.
pub fn normalize_str(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() || text == "-" || text.eq_ignore_ascii_case("nan") {
        return 0.0;
    }

    if text.contains(':') {
        return parse_hours(text).unwrap_or(0.0);
    }

    let mut cleaned = text.replace('%', "").replace("R$", "").replace('$', "");
    cleaned.retain(|c| !c.is_whitespace());

    canonical_decimal(&cleaned)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Parses `H:MM` (or `H`, or `H:MM:…`, extra parts ignored) into decimal hours.
fn parse_hours(text: &str) -> Option<f64> {
    let mut parts = text.split(':');
    let hours: f64 = parts.next()?.trim().parse().ok()?;
    let minutes: f64 = match parts.next() {
        Some(part) => part.trim().parse().ok()?,
        None => 0.0,
    };
    let total = hours + minutes / 60.0;
    total.is_finite().then_some(total)
}

/// Rewrites a cleaned number so that `.` is the only decimal separator.
fn canonical_decimal(cleaned: &str) -> Cow<'_, str> {
    match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if dot < comma => {
            Cow::Owned(cleaned.replace('.', "").replace(',', "."))
        }
        (Some(_), Some(_)) => Cow::Owned(cleaned.replace(',', "")),
        (Some(_), None) => Cow::Owned(cleaned.replace(',', ".")),
        (None, Some(_)) => {
            let mut parts = cleaned.split('.');
            let _integer = parts.next();
            let decimals = parts.next().unwrap_or_default();
            if parts.next().is_none() && decimals.chars().count() <= 2 {
                Cow::Borrowed(cleaned)
            } else {
                Cow::Owned(cleaned.replace('.', ""))
            }
        }
        (None, None) => Cow::Borrowed(cleaned),
    }
}

/// Classifies a raw cell.
///
/// Used only for display and diagnostics; it never feeds back into normalization.
///
/// ```
/// use payroll_engine::models::Cell;
/// use payroll_engine::parsing::{classify, ValueKind};
///
/// assert_eq!(classify(&Cell::from("220:00")), ValueKind::Hours);
/// assert_eq!(classify(&Cell::from("12,5%")), ValueKind::Percentage);
/// assert_eq!(classify(&Cell::from("4.077,32")), ValueKind::Currency);
/// assert_eq!(classify(&Cell::from("7,5")), ValueKind::Hours);
/// assert_eq!(classify(&Cell::from("3")), ValueKind::Integer);
/// ```
pub fn classify(raw: &Cell) -> ValueKind {
    if let Cell::Text(text) = raw {
        if text.contains(':') {
            return ValueKind::Hours;
        }
        if text.contains('%') {
            return ValueKind::Percentage;
        }
    }

    let numeric = normalize(raw);
    if numeric >= 10.0 {
        ValueKind::Currency
    } else if numeric > 0.0 && numeric.fract() != 0.0 {
        ValueKind::Hours
    } else {
        ValueKind::Integer
    }
}

/// Applies the provento/desconto sign rule to a value pair.
///
/// With no type cell the values are returned untouched. A flag starting with
/// `P` (any case) forces both values positive. Any other flag forces both
/// negative, whatever sign the source carried, and a blank flag counts as
/// "any other".
///
/// ```
/// use payroll_engine::models::Cell;
/// use payroll_engine::parsing::apply_sign_override;
///
/// assert_eq!(apply_sign_override(100.0, 5.0, Some(&Cell::from("D"))), (-100.0, -5.0));
/// assert_eq!(apply_sign_override(-100.0, 5.0, Some(&Cell::from("p"))), (100.0, 5.0));
/// assert_eq!(apply_sign_override(-100.0, 5.0, None), (-100.0, 5.0));
/// assert_eq!(apply_sign_override(100.0, 5.0, Some(&Cell::Empty)), (-100.0, -5.0));
/// ```
pub fn apply_sign_override(calculated: f64, informed: f64, type_flag: Option<&Cell>) -> (f64, f64) {
    let Some(flag) = type_flag else {
        return (calculated, informed);
    };

    let positive = flag
        .text()
        .chars()
        .next()
        .is_some_and(|c| c.to_uppercase().eq(['P']));

    let sign = if positive { 1.0 } else { -1.0 };
    (calculated.abs() * sign, informed.abs() * sign)
}

/// Renders an amount for display, the way the comparison table shows it.
///
/// - zero → `-`
/// - ten or more (in magnitude) → Brazilian currency, `R$ 4.077,32`
/// - below ten with a fractional part → `H:MM`
/// - otherwise → currency
///
/// ```
/// use payroll_engine::parsing::format_value;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(format_value(Decimal::ZERO), "-");
/// assert_eq!(format_value(Decimal::from_str("4077.32").unwrap()), "R$ 4.077,32");
/// assert_eq!(format_value(Decimal::from_str("7.5").unwrap()), "7:30");
/// assert_eq!(format_value(Decimal::from_str("-1250").unwrap()), "-R$ 1.250,00");
/// ```
pub fn format_value(amount: Decimal) -> String {
    if amount.is_zero() {
        return "-".to_string();
    }

    let magnitude = amount.abs();
    if magnitude < Decimal::TEN && !amount.fract().is_zero() {
        return format_hours(amount);
    }

    format_currency(amount)
}

fn format_hours(amount: Decimal) -> String {
    let value = amount.to_f64().unwrap_or_default();
    let hours = value.floor();
    let minutes = ((value - hours) * 60.0).round();
    format!("{}:{:02}", hours as i64, minutes as i64)
}

/// Formats an amount as `R$ 1.234,56`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = crate::models::round_amount(amount);
    let text = format!("{:.2}", rounded.abs());
    let (integer, decimals) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, decimals)
}
