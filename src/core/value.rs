//! Scalar values held in machine state, preconditions and mutations.
//!
//! Values are deliberately closed: a state slot can hold a boolean, a number
//! or a string, never a collection or a callable.

use crate::error::MachineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar stored in a machine's state.
///
/// Equality is strict. Two values are equal only when they are the same
/// variant with equal payloads, so `Value::from(1)` never equals
/// `Value::from(true)` or `Value::from("1")`. Numbers follow IEEE-754
/// semantics, which means `NaN` is never equal to anything, itself included.
///
/// # Example
///
/// ```rust
/// use machina::core::Value;
///
/// assert_eq!(Value::from(0), Value::Number(0.0));
/// assert_ne!(Value::from(1), Value::from(true));
/// assert_ne!(Value::from("1"), Value::from(1));
/// assert_ne!(Value::from(f64::NAN), Value::from(f64::NAN));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
        }
    }

    /// The boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text payload, if this is a `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(f64::from(value))
    }
}

macro_rules! number_from {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Value {
                fn from(value: $int) -> Self {
                    Self::Number(f64::from(value))
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, u8, u16, u32);

// Wide integers round to the nearest f64 above 2^53.
macro_rules! wide_number_from {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Value {
                fn from(value: $int) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

wide_number_from!(i64, u64, isize, usize);

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Conversion from dynamic JSON input.
///
/// This is the validation boundary for callers that receive values at runtime
/// (configuration files, scripting layers). Arrays, objects and `null` are
/// not scalars and are rejected.
///
/// ```rust
/// use machina::core::Value;
/// use serde_json::json;
///
/// assert_eq!(Value::try_from(json!(3)).unwrap(), Value::Number(3.0));
/// assert!(Value::try_from(json!([1, 2])).is_err());
/// assert!(Value::try_from(json!({"floor": 1})).is_err());
/// assert!(Value::try_from(json!(null)).is_err());
/// ```
impl TryFrom<serde_json::Value> for Value {
    type Error = MachineError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(Self::Number)
                .ok_or_else(|| MachineError::invalid("value", format!("{n} is not representable"))),
            serde_json::Value::String(s) => Ok(Self::Text(s)),
            serde_json::Value::Null => Err(MachineError::invalid("value", "must be defined")),
            serde_json::Value::Array(_) => Err(MachineError::invalid("value", "must not be an array")),
            serde_json::Value::Object(_) => {
                Err(MachineError::invalid("value", "must not be an object"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wide_integers_convert_to_numbers() {
        assert_eq!(Value::from(3usize), Value::Number(3.0));
        assert_eq!(Value::from(5i64), Value::Number(5.0));
        assert_eq!(Value::from(-7isize), Value::Number(-7.0));
        assert_eq!(Value::from(u64::MAX), Value::Number(u64::MAX as f64));
        assert_eq!(Value::from(3usize), Value::from(3));
    }

    #[test]
    fn equality_is_strict_across_variants() {
        assert_ne!(Value::from(0), Value::from(false));
        assert_ne!(Value::from(""), Value::from(false));
        assert_ne!(Value::from("0"), Value::from(0));
        assert_eq!(Value::from(2u8), Value::from(2.0));
    }

    #[test]
    fn nan_never_matches() {
        let nan = Value::from(f64::NAN);
        assert_ne!(nan, nan.clone());
    }

    #[test]
    fn json_scalars_convert() {
        assert_eq!(Value::try_from(json!(true)).unwrap(), Value::Bool(true));
        assert_eq!(Value::try_from(json!(1.5)).unwrap(), Value::Number(1.5));
        assert_eq!(
            Value::try_from(json!("lobby")).unwrap(),
            Value::Text("lobby".to_string())
        );
    }

    #[test]
    fn json_non_scalars_are_invalid() {
        for input in [json!(null), json!([]), json!([true]), json!({}), json!({"a": 1})] {
            let err = Value::try_from(input).unwrap_err();
            assert!(matches!(err, MachineError::InvalidArgument { .. }));
        }
    }

    #[test]
    fn untagged_serialization_is_plain_json() {
        assert_eq!(serde_json::to_value(Value::from(true)).unwrap(), json!(true));
        assert_eq!(serde_json::to_value(Value::from(1)).unwrap(), json!(1.0));
        assert_eq!(serde_json::to_value(Value::from("up")).unwrap(), json!("up"));
    }

    #[test]
    fn integers_deserialize_as_numbers() {
        let value: Value = serde_json::from_str("4").unwrap();
        assert_eq!(value, Value::Number(4.0));
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Value::from(1).to_string(), "1");
        assert_eq!(Value::from(0.5).to_string(), "0.5");
        assert_eq!(Value::from(false).to_string(), "false");
        assert_eq!(Value::from("up").to_string(), "\"up\"");
    }

    #[test]
    fn accessors_match_variant() {
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(true).as_f64(), None);
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from("x").type_name(), "string");
    }
}
