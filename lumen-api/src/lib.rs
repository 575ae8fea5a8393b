//! This crate is shared by the Lumen light drivers and the host that
//! loads them.
//!
//! The interfaces and types defined in this crate describe how a
//! driver publishes the properties of a device and how it reports
//! new values for them. Registration, storage and presentation of
//! those properties belong to the host.

mod types;

// Pull types down to the `lumen-api` namespace.

pub use types::device;
pub use types::Error;

/// A specialization of `std::result::Result<>` where the error value
/// is `types::Error`.

pub type Result<T> = std::result::Result<T, Error>;

pub mod driver;
