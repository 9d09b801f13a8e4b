//! Array-literal export of row sets.
//!
//! The layout follows the host language's own export format: two spaces
//! per nesting level, one element per line, a trailing comma after every
//! element and `N => ` keys on their own line before each nested row.

use std::fmt::Write;

use tables::{Row, Value};

/// Exports rows as a nested array literal. When `indexed` is false the
/// positional keys of the outer list are left out; column keys stay.
pub fn export(rows: &[Row], indexed: bool) -> String {
    let mut out = String::from("array (\n");
    for (i, row) in rows.iter().enumerate() {
        if indexed {
            let _ = writeln!(out, "  {i} => ");
        }
        out.push_str("  array (\n");
        for (column, value) in row.iter() {
            let _ = writeln!(out, "    {} => {},", export_key(column), export_value(value));
        }
        out.push_str("  ),\n");
    }
    out.push(')');
    out
}

/// Keys that read as canonical integers are integer keys in the target
/// language and are exported unquoted.
fn export_key(key: &str) -> String {
    if is_integer_key(key) {
        key.to_string()
    } else {
        export_string(key)
    }
}

fn is_integer_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits == "0" || !digits.starts_with('0'))
        && key != "-0"
        && key.parse::<i64>().is_ok()
}

pub fn export_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => export_float(*f),
        Value::Text(s) => export_string(s),
    }
}

/// Single-quoted string with `\` and `'` escaped. NUL bytes cannot appear
/// in a single-quoted literal and are spliced in as `"\0"`.
fn export_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\0' => out.push_str("' . \"\\0\" . '"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Shortest round-trip representation, always marked as a float: integral
/// values get `.0`, exponents below -4 or from 15 up use `E` notation.
fn export_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{f:e}");
    if let Some((mantissa, exponent)) = scientific.split_once('e') {
        if let Ok(exponent) = exponent.parse::<i32>() {
            if !(-4..15).contains(&exponent) {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}E{sign}{}", with_fraction(mantissa), exponent.abs());
            }
        }
    }
    with_fraction(&f.to_string())
}

fn with_fraction(number: &str) -> String {
    if number.contains('.') {
        number.to_string()
    } else {
        format!("{number}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new().with("id", 1).with("name", "ada"),
            Row::new().with("id", 2).with("name", Value::Null),
        ]
    }

    #[test]
    fn test_indexed_layout() {
        let expected = "array (\n  0 => \n  array (\n    'id' => 1,\n    'name' => 'ada',\n  ),\n  1 => \n  array (\n    'id' => 2,\n    'name' => NULL,\n  ),\n)";
        assert_eq!(export(&rows(), true), expected);
    }

    #[test]
    fn test_unindexed_layout() {
        let out = export(&rows(), false);
        assert!(!out.contains("0 =>"));
        assert!(!out.contains("1 =>"));
        assert!(out.contains("'id' => 2,"));
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(export(&[], true), "array (\n)");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(export_value(&Value::Bool(true)), "true");
        assert_eq!(export_value(&Value::Bool(false)), "false");
        assert_eq!(export_value(&Value::Int(-42)), "-42");
        assert_eq!(export_value(&Value::Null), "NULL");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(export_value(&Value::Text("it's".into())), r"'it\'s'");
        assert_eq!(export_value(&Value::Text(r"C:\tmp".into())), r"'C:\\tmp'");
        assert_eq!(
            export_value(&Value::Text("a\0b".into())),
            "'a' . \"\\0\" . 'b'"
        );
    }

    #[test]
    fn test_floats() {
        assert_eq!(export_float(1.0), "1.0");
        assert_eq!(export_float(0.1), "0.1");
        assert_eq!(export_float(-2.5), "-2.5");
        assert_eq!(export_float(123456.789), "123456.789");
        assert_eq!(export_float(1e15), "1.0E+15");
        assert_eq!(export_float(100000000000000.0), "100000000000000.0");
        assert_eq!(export_float(0.0001), "0.0001");
        assert_eq!(export_float(0.00001), "1.0E-5");
        assert_eq!(export_float(1.5e-7), "1.5E-7");
        assert_eq!(export_float(-0.0), "-0.0");
        assert_eq!(export_float(f64::NAN), "NAN");
        assert_eq!(export_float(f64::NEG_INFINITY), "-INF");
    }

    #[test]
    fn test_integer_like_keys() {
        assert_eq!(export_key("12"), "12");
        assert_eq!(export_key("-3"), "-3");
        assert_eq!(export_key("007"), "'007'");
        assert_eq!(export_key("1e3"), "'1e3'");
        assert_eq!(export_key("name"), "'name'");
    }
}
