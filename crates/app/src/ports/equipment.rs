//! Equipment port — plugins that offer devices to the imaging host.

use starhook_domain::device::{DeviceCategory, DeviceDescriptor};

/// A pluggable equipment provider.
///
/// Implementations live in adapter crates (e.g. `adapter_virtual`). The host
/// asks each provider for the devices it offers in a category when it
/// builds its device chooser.
pub trait EquipmentProvider: Send + Sync {
    /// Unique name identifying this provider (e.g. `"virtual"`).
    fn name(&self) -> &'static str;

    /// Devices available in `category`. Must not fail and must not have
    /// side effects; an empty list means the provider has nothing to offer.
    fn list_devices(&self, category: DeviceCategory) -> Vec<DeviceDescriptor>;
}
