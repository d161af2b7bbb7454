use schemars::JsonSchema;
use serde_json::{json, Value};

/// JSON Schema for a typed tool argument struct.
///
/// Field doc comments become the property descriptions the model sees.
pub fn parameters_for<T: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    let mut value = serde_json::to_value(schema).unwrap_or_else(|_| json!({"type": "object"}));
    if let Some(obj) = value.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    value
}

/// Schema for a tool that takes no arguments.
pub fn empty_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}
