//! Equipment catalog — use-cases for listing devices offered by providers.

use starhook_domain::device::{DeviceCategory, DeviceDescriptor};

use crate::ports::EquipmentProvider;

/// Aggregates the devices offered by every registered provider.
#[derive(Default)]
pub struct EquipmentCatalog {
    providers: Vec<Box<dyn EquipmentProvider>>,
}

impl EquipmentCatalog {
    #[must_use]
    pub fn new(providers: Vec<Box<dyn EquipmentProvider>>) -> Self {
        Self { providers }
    }

    pub fn register(&mut self, provider: impl EquipmentProvider + 'static) {
        tracing::debug!(provider = provider.name(), "equipment provider registered");
        self.providers.push(Box::new(provider));
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// All devices in `category`, in provider registration order.
    #[tracing::instrument(skip(self))]
    #[must_use]
    pub fn list_devices(&self, category: DeviceCategory) -> Vec<DeviceDescriptor> {
        let devices: Vec<DeviceDescriptor> = self
            .providers
            .iter()
            .flat_map(|p| p.list_devices(category))
            .collect();
        tracing::debug!(count = devices.len(), "devices listed");
        devices
    }
}
