use super::ValueType;
use crate::types::Error;
use std::fmt;

/// Defines fundamental types that can be held by a device property.
/// Each variant belongs to exactly one `ValueType` (see
/// `Value::value_type()`) and a property only accepts values of the
/// type it was declared with.

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// For properties that hold a simple true/false, on/off, etc.,
    /// state.
    Bool(bool),

    /// For numeric properties. Every number a bulb reports
    /// (brightness, color temperature) is an integer, so it is
    /// stored as a signed, 32-bit value.
    Int(i32),

    /// For properties that render color values. These are declared
    /// as `ValueType::String`; the host sees them in "#RRGGBB" form.
    Color(palette::Srgb<u8>),
}

impl Value {
    /// The declared type a property must have to hold this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Boolean,
            Value::Int(_) => ValueType::Number,
            Value::Color(_) => ValueType::String,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Color(v) => {
                write!(f, "#{:02X}{:02X}{:02X}", v.red, v.green, v.blue)
            }
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if let Value::Bool(v) = value {
            Ok(v)
        } else {
            Err(Error::TypeError)
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl TryFrom<Value> for i32 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if let Value::Int(v) = value {
            return Ok(v);
        }
        Err(Error::TypeError)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<palette::Srgb<u8>> for Value {
    fn from(value: palette::Srgb<u8>) -> Self {
        Value::Color(value)
    }
}

impl TryFrom<Value> for palette::Srgb<u8> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if let Value::Color(v) = value {
            Ok(v)
        } else {
            Err(Error::TypeError)
        }
    }
}
