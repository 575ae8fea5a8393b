use crate::{device, driver::ReportReading};

/// Represents a read-only property that uses a specified type for
/// its reading. Any type that can be converted to a `device::Value`
/// is acceptable.
///
/// The handle remembers the last value it reported so a driver that
/// polls its hardware can skip notifying the host when nothing
/// changed.
pub struct ReadOnlyDevice<T: device::ReadCompat> {
    report_chan: ReportReading,
    prev_val: Option<T>,
}

impl<T> ReadOnlyDevice<T>
where
    T: device::ReadCompat,
{
    /// Returns a new `ReadOnlyDevice` type.
    pub fn new(report_chan: ReportReading, prev_val: Option<T>) -> Self {
        ReadOnlyDevice {
            report_chan,
            prev_val,
        }
    }

    /// Sends a new value, returned by the hardware, to the host. The
    /// host only queues it, so this never waits.
    pub fn report_update(&mut self, value: T) {
        self.prev_val = Some(value.clone());
        (self.report_chan)(value.into())
    }

    /// Sends a new value to the host only if it differs from the last
    /// one. Returns `true` if the host was notified.
    pub fn report_if_changed(&mut self, value: T) -> bool {
        if self.prev_val.as_ref() == Some(&value) {
            false
        } else {
            self.report_update(value);
            true
        }
    }

    /// Gets the last value reported for the property.
    pub fn get_last(&self) -> Option<&T> {
        self.prev_val.as_ref()
    }
}
