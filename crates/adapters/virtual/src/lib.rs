//! # starhook-adapter-virtual
//!
//! Virtual/demo equipment and time sources for testing and demonstration.
//!
//! ## Provided equipment
//!
//! | Category | Unique id | Device id |
//! |----------|-----------|-----------|
//! | weather | `MyUniqueId` | `MyDeviceId` |
//!
//! ## Provided time sources
//!
//! [`VirtualTimeSource`] answers a fixed time of day on the current night,
//! standing in for an astronomical calculation such as sunset.
//!
//! ## Dependency rule
//!
//! Depends on `starhook-app` (port traits) and `starhook-domain` only.

mod devices;
mod time_source;

pub use time_source::VirtualTimeSource;

use starhook_app::ports::EquipmentProvider;
use starhook_domain::device::{DeviceCategory, DeviceDescriptor};

use devices::VirtualWeatherStation;

/// Virtual equipment provider offering one mock weather device.
#[derive(Debug, Default)]
pub struct VirtualEquipment {
    weather: VirtualWeatherStation,
}

impl EquipmentProvider for VirtualEquipment {
    fn name(&self) -> &'static str {
        "virtual"
    }

    fn list_devices(&self, category: DeviceCategory) -> Vec<DeviceDescriptor> {
        match category {
            DeviceCategory::Weather => vec![self.weather.descriptor()],
            DeviceCategory::Camera | DeviceCategory::Telescope | DeviceCategory::Focuser => {
                Vec::new()
            }
        }
    }
}
