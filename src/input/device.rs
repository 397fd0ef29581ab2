//! Device ownership for a calibration session.

/// An open physical input device.
pub trait InputDevice {
    /// Display name reported by the driver, if any.
    fn name(&self) -> Option<String>;

    /// Give the device back to the driver. Called at most once, by
    /// [`DeviceGuard`].
    fn close(&mut self);
}

/// Exclusive ownership of an open device.
///
/// The device is closed exactly once: on [`release`](Self::release), or on
/// drop if the session is abandoned first.
#[derive(Debug)]
pub struct DeviceGuard<D: InputDevice> {
    device: Option<D>,
}

impl<D: InputDevice> DeviceGuard<D> {
    pub fn new(device: D) -> Self {
        Self {
            device: Some(device),
        }
    }

    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    /// Close the device now. Later calls are no-ops.
    pub fn release(&mut self) {
        if let Some(mut device) = self.device.take() {
            log::debug!("Closing joystick {:?}", device.name());
            device.close();
        }
    }
}

impl<D: InputDevice> Drop for DeviceGuard<D> {
    fn drop(&mut self) {
        self.release();
    }
}
