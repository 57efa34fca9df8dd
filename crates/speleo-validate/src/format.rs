//! Text helpers shared by the checks.

use speleo_model::format_numeric;

/// `3, 4, 7`
pub fn join_rows(rows: &[usize]) -> String {
    rows.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `a, b`
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `(1, 2), (5, 6)`
pub fn join_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(a, b)| format!("({a}, {b})"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Display form of a number.
pub fn number(value: f64) -> String {
    format_numeric(value)
}

/// Comparison key for depths and ages: five decimal places.
///
/// Values that differ only in floating noise (`12.000001` against `12`)
/// share a key, whatever their magnitude.
pub fn value_key(value: f64) -> String {
    // -0.0 + 0.0 is +0.0, so both zeros share a key.
    format!("{:.5}", value + 0.0)
}

/// Placeholder words submitters use instead of real content.
const PLACEHOLDERS: &[&str] = &[
    "unknown",
    "unknwn",
    "unkwn",
    "n/a",
    "na",
    "not known",
    "notknown",
    "not applicable",
];

/// True for a placeholder word, a whitespace-only value, or (when
/// `empty_is_placeholder`) an empty value.
pub fn is_placeholder(text: Option<&str>, empty_is_placeholder: bool) -> bool {
    match text {
        None => empty_is_placeholder,
        Some(text) if text.trim().is_empty() => !text.is_empty() || empty_is_placeholder,
        Some(text) => PLACEHOLDERS.contains(&text.to_lowercase().as_str()),
    }
}

/// Leading or trailing whitespace.
pub fn has_outer_space(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins() {
        assert_eq!(join_rows(&[3, 4, 7]), "3, 4, 7");
        assert_eq!(join_rows(&[]), "");
        assert_eq!(join_names(&["a", "b"]), "a, b");
        assert_eq!(
            join_pairs(&[("1".to_string(), "2".to_string())]),
            "(1, 2)"
        );
    }

    #[test]
    fn keys_absorb_float_noise() {
        assert_eq!(value_key(12.000001), value_key(12.0));
        assert_ne!(value_key(12.5), value_key(12.0));
        assert_eq!(value_key(55.0), value_key(55.000000001));
        assert_ne!(value_key(123456.7), value_key(123457.2));
        assert_ne!(value_key(1500.0001), value_key(1500.0002));
        assert_eq!(value_key(-0.0), value_key(0.0));
    }

    #[test]
    fn placeholders() {
        assert!(is_placeholder(Some("Unknown"), false));
        assert!(is_placeholder(Some("  "), false));
        assert!(is_placeholder(None, true));
        assert!(!is_placeholder(None, false));
        assert!(!is_placeholder(Some("10.1000/x"), true));
    }

    #[test]
    fn outer_space() {
        assert!(has_outer_space(" Smith"));
        assert!(has_outer_space("Smith "));
        assert!(!has_outer_space("J. Smith"));
    }
}
