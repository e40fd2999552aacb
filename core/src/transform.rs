//! Key-casing and field-level normalization between local and wire shapes.
//!
//! # Design
//! The remote API speaks snake_case; callers speak camelCase. Both directions
//! are implemented as a generic tree walk over `serde_json::Value` (object,
//! array, scalar) with the irregular cases — `line1`/`line2`/`line3`, country
//! names, phone formats, SSN/EIN encryption — applied as named passes kept
//! visibly separate from the casing rule. Every transform takes a reference
//! and returns a fresh tree; caller-supplied values are never mutated.

use serde_json::{Map, Value};

use crate::cipher;

/// True for `null`, `""`, `[]`, and `{}`; numbers and booleans are data.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Recursively drop empty entries from objects. Arrays keep their length;
/// their elements are pruned in place.
pub fn remove_empty(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(remove_empty).collect()),
        Value::Object(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                if !is_empty(v) {
                    out.insert(k.clone(), remove_empty(v));
                }
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Coerce a value to a number: numbers pass through, strings are parsed
/// after stripping `,` and `$`, arrays are mapped element-wise, and
/// everything else becomes `0`.
pub fn coerce_numeric(value: &Value) -> Value {
    match value {
        Value::Number(_) => value.clone(),
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '$').collect();
            let parsed = cleaned.parse::<f64>().unwrap_or(0.0);
            Value::Number(serde_json::Number::from_f64(parsed).unwrap_or_else(|| 0.into()))
        }
        Value::Array(items) => Value::Array(items.iter().map(coerce_numeric).collect()),
        _ => Value::Number(0.into()),
    }
}

/// Deeply rename keys from the local camelCase convention to the wire's
/// snake_case convention, including the `line_1`/`line_2`/`line_3` fixup.
pub fn to_wire(value: &Value) -> Value {
    rename_keys(value, &|key| line_fixup(snake_key(key)))
}

/// Deeply rename keys from the wire's snake_case convention back to the
/// local camelCase convention (`line_1` naturally becomes `line1` here).
pub fn to_local(value: &Value) -> Value {
    rename_keys(value, &|key| camel_key(key))
}

fn rename_keys(value: &Value, rename: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(rename(k), rename_keys(v, rename));
            }
            Value::Object(out)
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| rename_keys(v, rename)).collect())
        }
        other => other.clone(),
    }
}

// `line1`..`line3` have no word boundary for the casing rule to find, but
// the wire wants `line_1`..`line_3`. A literal fixup, not a general rule.
fn line_fixup(key: String) -> String {
    match key.as_str() {
        "line1" => "line_1".to_string(),
        "line2" => "line_2".to_string(),
        "line3" => "line_3".to_string(),
        _ => key,
    }
}

fn snake_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let after_word = i > 0
                && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            let acronym_end = i > 0
                && chars[i - 1].is_ascii_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if after_word || acronym_end {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn camel_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Prepare a local-cased payload for transmission: `US` becomes
/// `United States`, phones are stripped to bare 10-digit strings, SSN/EIN
/// values with exactly 9 digits are encrypted, and nested key people get
/// the same treatment. Fields that fail the digit gate pass through
/// unmodified — malformed SSNs are sent in the clear, matching the wire
/// contract as documented.
pub fn prepare_outbound(value: &Value, secret: &str) -> Value {
    let mut out = value.clone();
    if let Value::Object(obj) = &mut out {
        if let Some(Value::Object(address)) = obj.get_mut("address") {
            if let Some(Value::String(country)) = address.get_mut("country") {
                if country.eq_ignore_ascii_case("US") {
                    *country = "United States".to_string();
                }
            }
        }
        for field in ["ssn", "EIN"] {
            if let Some(Value::String(raw)) = obj.get(field) {
                let d = digits(raw);
                if d.len() == 9 {
                    obj.insert(field.to_string(), Value::String(cipher::encrypt_pii(&d, secret)));
                }
            }
        }
        if let Some(Value::String(raw)) = obj.get("phone") {
            let d = digits(raw);
            if d.len() == 10 {
                obj.insert("phone".to_string(), Value::String(d));
            }
        }
        if let Some(Value::Array(people)) = obj.get("keyPeople") {
            let prepared: Vec<Value> = people.iter().map(|p| prepare_outbound(p, secret)).collect();
            obj.insert("keyPeople".to_string(), Value::Array(prepared));
        }
    }
    out
}

/// Undo the wire formatting on a received, local-cased payload: country
/// back to the ISO code, phones back to `DDD-DDD-DDDD`. Encrypted fields
/// are left alone — the plaintext never comes back.
pub fn restore_inbound(value: &Value) -> Value {
    let mut out = value.clone();
    if let Value::Object(obj) = &mut out {
        if let Some(Value::Object(address)) = obj.get_mut("address") {
            if let Some(Value::String(country)) = address.get_mut("country") {
                if country.eq_ignore_ascii_case("united states") {
                    *country = "US".to_string();
                }
            }
        }
        if let Some(Value::String(raw)) = obj.get("phone") {
            let d = digits(raw);
            if d.len() == 10 {
                let formatted = format!("{}-{}-{}", &d[..3], &d[3..6], &d[6..]);
                obj.insert("phone".to_string(), Value::String(formatted));
            }
        }
        if let Some(Value::Array(people)) = obj.get("keyPeople") {
            let restored: Vec<Value> = people.iter().map(restore_inbound).collect();
            obj.insert("keyPeople".to_string(), Value::Array(restored));
        }
    }
    out
}

fn digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
