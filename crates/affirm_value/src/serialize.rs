//! `serde` serialization for values.
//!
//! Produces the stable shape handed to snapshot adapters: primitives map to
//! their JSON counterparts, behavioral values to placeholder strings.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::Value;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Void => serializer.serialize_unit(),
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(_) => serializer.serialize_str(&self.to_string()),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::Error(err) => {
                let fields = err.to_map();
                let mut out = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in &fields {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::Function(_) | Value::Pending(_) | Value::Emitter(_) => {
                serializer.serialize_str(&self.to_string())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::{ErrorValue, Value};

    #[test]
    fn serializes_to_json_shape() {
        let value = Value::object([
            ("n", Value::Int(1)),
            ("nan", Value::Float(f64::NAN)),
            ("list", Value::list(vec![Value::Null, Value::Bool(true)])),
            ("f", Value::function("cb", |_: &[Value]| Ok(Value::Void))),
        ]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "f": "<function cb>",
                "list": [null, true],
                "n": 1,
                "nan": "NaN",
            })
        );
    }

    #[test]
    fn serializes_errors_as_objects() {
        let err = Value::error(ErrorValue::named("RangeError", "too big"));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "RangeError", "message": "too big"})
        );
    }
}
