use serde_json::{Map, Value};

/// Key the backend uses to wrap tool return values that are not objects.
const RESULT_ENVELOPE_KEY: &str = "result";

/// Shape of a function-result payload, classified once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Array(Vec<Value>),
    Object(Map<String, Value>),
    Primitive(Value),
}

impl Payload {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Payload::Array(items),
            Value::Object(mut map) => {
                if map.len() == 1 && map.contains_key(RESULT_ENVELOPE_KEY) {
                    let inner = map.remove(RESULT_ENVELOPE_KEY).unwrap_or(Value::Null);
                    return Payload::from_value(inner);
                }
                Payload::Object(map)
            }
            other => Payload::Primitive(other),
        }
    }

    /// True when the tool returned nothing, directly or inside the envelope.
    pub fn is_null(&self) -> bool {
        matches!(self, Payload::Primitive(Value::Null))
    }

    /// The payload as a list, wrapping a single value in a one-element list.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Payload::Array(items) => items,
            Payload::Object(map) => vec![Value::Object(map)],
            Payload::Primitive(value) => vec![value],
        }
    }
}
