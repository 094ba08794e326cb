//! Percent-encoded query string rendering.

use log::trace;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::{Query, QueryValue};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped,
/// matching JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Serializes a query mapping into a URL query string.
///
/// Returns an empty string for an absent or empty mapping (or one whose
/// values are all `Unset`), otherwise `?` followed by `&`-joined pairs in
/// mapping order.
pub fn serialize(query: Option<&Query>) -> String {
    let Some(query) = query else {
        return String::new();
    };

    let mut pairs = Vec::with_capacity(query.len());
    for (key, value) in query.iter() {
        let key = encode(key);
        match value {
            QueryValue::Unset => continue,
            QueryValue::Null => pairs.push(key),
            QueryValue::List(items) => {
                for item in items {
                    pairs.push(format!("{}={}", key, encode(&render(item))));
                }
            }
            scalar => pairs.push(format!("{}={}", key, encode(&render(scalar)))),
        }
    }

    if pairs.is_empty() {
        return String::new();
    }

    let serialized = format!("?{}", pairs.join("&"));
    trace!("Serialized query: {}", serialized);
    serialized
}

fn encode(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// String form of a value as it appears after `=`.
fn render(value: &QueryValue) -> String {
    match value {
        QueryValue::Text(s) => s.clone(),
        QueryValue::Int(n) => n.to_string(),
        QueryValue::Float(f) => render_float(*f),
        QueryValue::Bool(b) => b.to_string(),
        // Only reachable inside lists
        QueryValue::Null => "null".to_string(),
        QueryValue::Unset => "undefined".to_string(),
        QueryValue::List(items) => items.iter().map(render).collect::<Vec<_>>().join(","),
    }
}

fn render_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if f == 0.0 {
        "0".to_string()
    } else if f.abs() >= 1e21 || f.abs() < 1e-6 {
        exponent_form(f)
    } else if f.fract() == 0.0 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

/// Shortest round-trip mantissa with an explicitly signed exponent, e.g. `1e+21`, `1.5e-7`.
fn exponent_form(f: f64) -> String {
    let formatted = format!("{:e}", f);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}
