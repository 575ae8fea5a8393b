//! Defines types and interfaces that drivers use to interact with the
//! host.

use crate::types::{device, Error};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::Result;

mod config;
mod ro_device;

pub use config::DriverConfig;
pub use ro_device::ReadOnlyDevice;

/// A closure the host hands to a driver, for each registered
/// property, so the driver can announce new values. It is called from
/// the driver's polling task and must not block; a host that can't
/// take the value right away should queue it (e.g. with an unbounded
/// or `try_send` channel) and return.
pub type ReportReading = Box<dyn Fn(device::Value) + Send + Sync>;

/// Defines the requests that can be sent to the host. Drivers don't
/// use this type directly. They are indirectly used by `RequestChan`.
pub enum Request {
    /// Registers a property of a device with the host.
    ///
    /// The reply is a channel used to report updated values of the
    /// property. `initial` is the value the property starts with.
    AddProperty {
        device_id: Arc<str>,
        descriptor: device::PropertyDescriptor,
        initial: device::Value,
        rpy_chan: oneshot::Sender<Result<ReportReading>>,
    },
}

/// A handle which is used to communicate with the host. When a
/// device is created, it is given a handle to be used while it
/// registers its properties.
///
/// This type wraps the `mpsc::Sender<>` and defines a set of helper
/// methods to send requests and receive replies.
pub struct RequestChan {
    device_id: Arc<str>,
    req_chan: mpsc::Sender<Request>,
}

impl RequestChan {
    pub fn new(device_id: Arc<str>, req_chan: &mpsc::Sender<Request>) -> Self {
        RequestChan {
            device_id,
            req_chan: req_chan.clone(),
        }
    }

    /// Returns the ID of the device whose properties are registered
    /// through this handle.
    pub fn device_id(&self) -> &Arc<str> {
        &self.device_id
    }

    /// Registers a property with the host. `descriptor` holds the
    /// property's name and schema; `initial` is its starting value.
    ///
    /// If it returns `Ok()`, the value is a handle the driver uses to
    /// announce new values of the property.
    ///
    /// If it returns `Err()`, the initial value doesn't match the
    /// declared type (`InvArgument`), the host rejected the property,
    /// or the host has shut down (`MissingPeer`).
    pub async fn add_property<T: device::ReadCompat>(
        &self,
        descriptor: device::PropertyDescriptor,
        initial: T,
    ) -> Result<ReadOnlyDevice<T>> {
        let value: device::Value = initial.clone().into();

        if value.value_type() != descriptor.kind {
            return Err(Error::InvArgument(format!(
                "'{}' is declared as {} but got {}",
                descriptor.name,
                descriptor.kind,
                value.value_type()
            )));
        }

        // Create a location for the reply.

        let (tx, rx) = oneshot::channel();

        // Send a request to the host to register the property.

        let result = self
            .req_chan
            .send(Request::AddProperty {
                device_id: self.device_id.clone(),
                descriptor,
                initial: value,
                rpy_chan: tx,
            })
            .await;

        // If the request was sent successfully and we successfully
        // received a reply, process the payload.

        if result.is_ok() {
            if let Ok(v) = rx.await {
                return v.map(|rr| ReadOnlyDevice::new(rr, Some(initial)));
            }
        }

        Err(Error::MissingPeer(String::from(
            "can't communicate with core",
        )))
    }
}
