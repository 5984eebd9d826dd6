//! Canonical cache key derivation
//!
//! Two logically identical requests must map to the same key regardless of
//! how their parameter objects were built, so object keys are rendered in
//! sorted order at every nesting level. Naive serialization of the
//! parameter map would make the key sensitive to insertion order and
//! silently defeat cache hits.

use serde_json::Value;

/// Derive the cache key for an endpoint and its parameter set.
///
/// The key stays a readable `endpoint:params` string rather than a hash so
/// cache contents are debuggable.
pub fn cache_key(endpoint: &str, params: &Value) -> String {
    let mut rendered = String::new();
    write_canonical(params, &mut rendered);
    format!("{}:{}", endpoint, rendered)
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_escaped_str(s, out),
        Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(obj) => {
            // Sort keys for order-independent rendering
            let mut keys: Vec<_> = obj.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped_str(key, out);
                out.push(':');
                if let Some(v) = obj.get(key.as_str()) {
                    write_canonical(v, out);
                }
            }
            out.push('}');
        }
    }
}

/// JSON-escape a string so structural characters inside parameter values
/// cannot produce the same rendering as a differently-shaped parameter set.
fn write_escaped_str(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
