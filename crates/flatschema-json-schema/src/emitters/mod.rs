pub mod definitions;
pub mod document;

/// Quote and escape `value` as a JSON string literal.
pub fn json_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
