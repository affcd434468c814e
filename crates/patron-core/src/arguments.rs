//! Caller arguments and their integer coercion.
//!
//! Arguments arrive as an untyped map (query string or routing values
//! decoded to JSON). Numeric keys like `user` and `page` are read with
//! lenient coercion: a numeric prefix counts, anything else is 0.

use serde_json::{Map, Value};

/// Opaque caller arguments.
pub type Arguments = Map<String, Value>;

/// Read `key` as an integer, or `None` if it is absent or `null`.
pub fn int_argument(arguments: &Arguments, key: &str) -> Option<i64> {
    arguments
        .get(key)
        .filter(|value| !value.is_null())
        .map(coerce_int)
}

/// Coerce a JSON value to an integer.
///
/// Integers pass through, floats truncate toward zero, strings use their
/// leading integer (`"12abc"` is 12, `"abc"` is 0), booleans are 1/0, and
/// everything else is 0.
#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
pub fn coerce_int(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s),
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut n: i64 = 0;
    for c in digits.chars().map_while(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(i64::from(c));
    }

    if negative { -n } else { n }
}
