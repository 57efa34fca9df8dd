//! Cell values.
//!
//! Every workbook cell is normalized once, at ingestion, into one of three
//! states. Empty strings never survive past this point: they become
//! [`Value::Missing`], which is the only representation of "no data".

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl Value {
    /// Classifies a raw cell string.
    ///
    /// Text is numeric only when it contains an ASCII digit and parses as a
    /// float, so words like `inf` or `NaN` stay text. Surrounding whitespace
    /// is preserved because several rules look for it.
    pub fn from_raw(raw: &str) -> Self {
        let raw = raw.trim_start_matches('\u{feff}');
        if raw.is_empty() {
            return Value::Missing;
        }
        if raw.bytes().any(|b| b.is_ascii_digit())
            && let Ok(number) = raw.parse::<f64>()
        {
            return Value::Number(number);
        }
        Value::Text(raw.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Finite numeric value, or `None` for text, missing, NaN and infinities.
    pub fn as_finite(&self) -> Option<f64> {
        self.as_number().filter(|v| v.is_finite())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Textual rendering of a present cell; numbers use [`format_numeric`].
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Missing => None,
            Value::Number(v) => Some(Cow::Owned(format_numeric(*v))),
            Value::Text(text) => Some(Cow::Borrowed(text)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Number(v) => f.write_str(&format_numeric(*v)),
            Value::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::from_raw(value)
    }
}

/// Formats a number without trailing zeros (`12.50` → `12.5`, `3.0` → `3`).
pub fn format_numeric(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{value:.6}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_are_missing() {
        assert_eq!(Value::from_raw(""), Value::Missing);
        assert_eq!(Value::from_raw("\u{feff}"), Value::Missing);
    }

    #[test]
    fn numeric_text_becomes_number() {
        assert_eq!(Value::from_raw("12.5"), Value::Number(12.5));
        assert_eq!(Value::from_raw("-70"), Value::Number(-70.0));
        assert_eq!(Value::from_raw("1e3"), Value::Number(1000.0));
    }

    #[test]
    fn words_and_padded_numbers_stay_text() {
        assert_eq!(Value::from_raw("inf"), Value::Text("inf".to_string()));
        assert_eq!(Value::from_raw(" 12"), Value::Text(" 12".to_string()));
        assert_eq!(Value::from_raw("  "), Value::Text("  ".to_string()));
    }

    #[test]
    fn format_numeric_trims() {
        assert_eq!(format_numeric(12.5), "12.5");
        assert_eq!(format_numeric(3.0), "3");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(-0.0000001), "0");
        assert_eq!(format_numeric(55.0), "55");
    }
}
