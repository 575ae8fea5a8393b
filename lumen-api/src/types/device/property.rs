use serde::Serialize;
use std::fmt;

/// The type of data a property holds, as declared to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Number,
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
        })
    }
}

/// Describes one property exposed by a device: its stable name, the
/// semantic tag the host uses to pick a widget, its type and, for
/// numbers, its units and range.
///
/// Serializing a descriptor produces the JSON description the host
/// stores with the property. The `name` isn't part of that
/// description; it's the key under which the description is stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    #[serde(skip)]
    pub name: &'static str,
    #[serde(rename = "@type")]
    pub semantic: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i32>,
}

impl PropertyDescriptor {
    /// Returns the range of a numeric property, if it has one.
    pub fn range(&self) -> Option<(i32, i32)> {
        self.minimum.zip(self.maximum)
    }
}
