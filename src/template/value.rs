//! JSON → template value conversion.

use std::collections::HashMap;

use gtmpl::Value;
use serde_json::Value as JsonValue;

/// Objects become maps, so a missing key yields no value instead of an error.
pub(crate) fn to_template_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Nil,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                Value::from(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Array(items) => Value::Array(items.iter().map(to_template_value).collect()),
        JsonValue::Object(map) => Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), to_template_value(v)))
                .collect::<HashMap<_, _>>(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_objects_become_maps() {
        let value = to_template_value(&json!({"db": {"host": "h"}, "ports": [1, 2]}));
        let Value::Map(map) = value else {
            panic!("expected map");
        };
        assert!(matches!(map.get("db"), Some(Value::Map(_))));
        assert!(matches!(map.get("ports"), Some(Value::Array(items)) if items.len() == 2));
    }

    #[test]
    fn test_scalars() {
        assert!(matches!(to_template_value(&json!(null)), Value::Nil));
        assert!(matches!(to_template_value(&json!(true)), Value::Bool(true)));
        assert!(matches!(to_template_value(&json!("s")), Value::String(ref s) if s == "s"));
        assert!(matches!(
            to_template_value(&json!(5432)),
            Value::Number(ref n) if n.as_i64() == Some(5432)
        ));
    }
}
