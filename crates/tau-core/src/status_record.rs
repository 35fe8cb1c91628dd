use serde_json::{Map, Value};

/// Returns true when `value` is a JSON object (not null, not an array).
pub fn is_record(value: &Value) -> bool {
    as_record(value).is_some()
}

/// Returns the object map when `value` is record-shaped.
pub fn as_record(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// Returns the string when `value` already is one. Numbers and booleans are not coerced.
pub fn as_string(value: &Value) -> Option<&str> {
    value.as_str()
}

/// Returns the boolean only when `value` is a JSON boolean; `"true"` and `1` are not booleans.
pub fn as_strict_bool(value: &Value) -> Option<bool> {
    value.as_bool()
}

/// Returns the number when `value` is a finite JSON number.
pub fn as_finite_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|number| number.is_finite())
}

/// Reads `key` from `record` and decodes it with `decode`, yielding `None` when
/// the field is absent or has the wrong shape.
pub fn read_field<'a, T>(
    record: &'a Map<String, Value>,
    key: &str,
    decode: impl FnOnce(&'a Value) -> Option<T>,
) -> Option<T> {
    record.get(key).and_then(decode)
}
