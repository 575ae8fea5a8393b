//! This module defines types related to devices and the properties
//! they expose.

mod category;
mod property;
mod value;

pub use category::DeviceCategory;
pub use property::{PropertyDescriptor, ValueType};
pub use value::Value;

/// Types that a driver can report as a property value. Any type that
/// converts into a `Value` and can be compared with the last reported
/// reading qualifies.
pub trait ReadCompat:
    Into<Value> + Clone + PartialEq + Send + Sync + 'static
{
}

impl<T> ReadCompat for T where
    T: Into<Value> + Clone + PartialEq + Send + Sync + 'static
{
}
