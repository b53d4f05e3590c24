use serde_json::{Number, Value};
use std::fmt::{Debug, Display};

/// A single attribute value of a feature.
#[derive(Clone, PartialEq)]
pub enum GeoValue {
	Bool(bool),
	Double(f64),
	Float(f32),
	Int(i64),
	Null,
	String(String),
	UInt(u64),
}

impl GeoValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			GeoValue::String(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			GeoValue::Double(v) => Some(*v),
			GeoValue::Float(v) => Some(f64::from(*v)),
			GeoValue::Int(v) => Some(*v as f64),
			GeoValue::UInt(v) => Some(*v as f64),
			_ => None,
		}
	}

	/// Converts a JSON property value. Nested arrays and objects are kept as their JSON text.
	pub fn from_json(value: &Value) -> Self {
		match value {
			Value::Null => GeoValue::Null,
			Value::Bool(v) => GeoValue::Bool(*v),
			Value::Number(n) => {
				if let Some(v) = n.as_u64() {
					GeoValue::UInt(v)
				} else if let Some(v) = n.as_i64() {
					GeoValue::Int(v)
				} else {
					GeoValue::Double(n.as_f64().unwrap_or(f64::NAN))
				}
			}
			Value::String(v) => GeoValue::String(v.clone()),
			Value::Array(_) | Value::Object(_) => GeoValue::String(value.to_string()),
		}
	}

	pub fn to_json(&self) -> Value {
		match self {
			GeoValue::Bool(v) => Value::Bool(*v),
			GeoValue::Double(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
			GeoValue::Float(v) => Number::from_f64(f64::from(*v)).map_or(Value::Null, Value::Number),
			GeoValue::Int(v) => Value::from(*v),
			GeoValue::Null => Value::Null,
			GeoValue::String(v) => Value::String(v.clone()),
			GeoValue::UInt(v) => Value::from(*v),
		}
	}
}

impl Debug for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(v) => f.debug_tuple("String").field(v).finish(),
			Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
			Self::Double(v) => f.debug_tuple("Double").field(v).finish(),
			Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
			Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
			Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
			Self::Null => f.debug_tuple("Null").finish(),
		}
	}
}

impl From<&str> for GeoValue {
	fn from(value: &str) -> Self {
		GeoValue::String(value.to_string())
	}
}

impl From<&String> for GeoValue {
	fn from(value: &String) -> Self {
		GeoValue::String(value.clone())
	}
}

impl From<String> for GeoValue {
	fn from(value: String) -> Self {
		GeoValue::String(value)
	}
}

impl From<i32> for GeoValue {
	fn from(value: i32) -> Self {
		if value < 0 {
			GeoValue::Int(i64::from(value))
		} else {
			GeoValue::UInt(value as u64)
		}
	}
}

impl From<i64> for GeoValue {
	fn from(value: i64) -> Self {
		GeoValue::Int(value)
	}
}

impl From<u64> for GeoValue {
	fn from(value: u64) -> Self {
		GeoValue::UInt(value)
	}
}

impl From<f64> for GeoValue {
	fn from(value: f64) -> Self {
		GeoValue::Double(value)
	}
}

impl From<bool> for GeoValue {
	fn from(value: bool) -> Self {
		GeoValue::Bool(value)
	}
}

impl Display for GeoValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			GeoValue::Bool(v) => write!(f, "{v}"),
			GeoValue::Double(v) => write!(f, "{v}"),
			GeoValue::Float(v) => write!(f, "{v}"),
			GeoValue::Int(v) => write!(f, "{v}"),
			GeoValue::Null => write!(f, "null"),
			GeoValue::String(v) => write!(f, "{v}"),
			GeoValue::UInt(v) => write!(f, "{v}"),
		}
	}
}
