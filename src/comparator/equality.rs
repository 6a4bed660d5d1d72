use serde_json::{Number, Value};

/// Structural JSON equality.
///
/// Object key order never matters and array order always does. Numbers
/// compare by value, so `1` equals `1.0` even though YAML and the engine may
/// encode them differently.
pub fn json_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => number_eq(l, r),
        (Value::Array(l), Value::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(a, b)| json_eq(a, b))
        }
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(key, a)| r.get(key).is_some_and(|b| json_eq(a, b)))
        }
        _ => left == right,
    }
}

fn number_eq(l: &Number, r: &Number) -> bool {
    if l == r {
        return true;
    }
    if l.is_f64() || r.is_f64() {
        return matches!((l.as_f64(), r.as_f64()), (Some(a), Some(b)) if a == b);
    }
    false
}
