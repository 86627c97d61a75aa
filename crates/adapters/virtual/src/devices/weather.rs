//! Virtual weather station — identity only, no readings.

use starhook_domain::device::{DeviceCategory, DeviceDescriptor};

const UNIQUE_ID: &str = "MyUniqueId";
const DEVICE_ID: &str = "MyDeviceId";

/// A mock weather-data device with fixed identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct VirtualWeatherStation;

impl VirtualWeatherStation {
    /// The descriptor registered with the host.
    #[must_use]
    pub fn descriptor(self) -> DeviceDescriptor {
        DeviceDescriptor {
            unique_id: UNIQUE_ID.to_string(),
            device_id: DEVICE_ID.to_string(),
            category: DeviceCategory::Weather,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_valid_descriptor() {
        let descriptor = VirtualWeatherStation.descriptor();
        assert!(descriptor.validate().is_ok());
        assert_eq!(descriptor.unique_id, "MyUniqueId");
    }
}
